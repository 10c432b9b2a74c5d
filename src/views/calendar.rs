//! The root view: month grid, navigation, pickers and the day modal.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use dialoguer::Select;
use mycal_core::calendar::{CalendarCursor, DateKey, EventStore, GridCell, grid_for};
use mycal_core::editor::DayModal;
use mycal_core::guard::Route;
use mycal_core::identity::{Identity, IdentityGateway, IdentityProvider};
use mycal_core::picker::{Pickers, YearRange};
use owo_colors::OwoColorize;

use crate::app::Navigation;
use crate::prompts::{TerminalPrompter, alert};
use crate::render::{MonthView, Render};
use crate::utils::tui::with_spinner;
use crate::views::{day_modal, pickers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Previous,
    Next,
    OpenDay,
    PickMonth,
    PickYear,
    Logout,
    Quit,
}

const ACTIONS: &[(Action, &str)] = &[
    (Action::Previous, "< Previous month"),
    (Action::Next, "> Next month"),
    (Action::OpenDay, "Open a day"),
    (Action::PickMonth, "Pick month"),
    (Action::PickYear, "Pick year"),
    (Action::Logout, "Logout"),
    (Action::Quit, "Quit"),
];

/// Everything the calendar view owns while it is on screen. Created fresh
/// each time the view is entered, so events never outlive it.
struct CalendarState {
    cursor: CalendarCursor,
    events: EventStore,
    modal: DayModal,
    pickers: Pickers,
}

impl CalendarState {
    fn new() -> Self {
        CalendarState {
            cursor: CalendarCursor::current(),
            events: EventStore::new(),
            modal: DayModal::new(),
            pickers: Pickers::new(),
        }
    }
}

pub async fn run<P: IdentityProvider>(
    gateway: &IdentityGateway<P>,
    identity: &Identity,
    years: YearRange,
) -> Result<Navigation> {
    let mut state = CalendarState::new();
    let mut prompter = TerminalPrompter;
    let mut last_action = 0;

    println!("\n{}  {}", "My Calendar".bold(), identity.render());

    loop {
        let today = Local::now().date_naive();
        let view = MonthView {
            cursor: state.cursor,
            events: &state.events,
            today,
        };
        println!("\n{}\n", view.render());

        let labels: Vec<&str> = ACTIONS.iter().map(|(_, label)| *label).collect();
        let Some(choice) = Select::new().items(&labels).default(last_action).interact_opt()? else {
            continue;
        };
        last_action = choice;

        let Some(&(action, _)) = ACTIONS.get(choice) else {
            continue;
        };

        match action {
            Action::Previous => state.cursor = state.cursor.previous(),
            Action::Next => state.cursor = state.cursor.next(),
            Action::PickMonth => {
                state.cursor = pickers::pick_month(&mut state.pickers, state.cursor)?
            }
            Action::PickYear => {
                state.cursor = pickers::pick_year(&mut state.pickers, state.cursor, years)?
            }
            Action::OpenDay => {
                if let Some(date) = pick_day(state.cursor, &state.events, today)? {
                    day_modal::run(&mut state.modal, date, &mut state.events, &mut prompter)?;
                }
            }
            Action::Logout => {
                if let Err(err) = with_spinner("Signing out...", gateway.sign_out()).await {
                    alert(&err.to_string());
                }
                return Ok(Navigation::Go(Route::Login));
            }
            Action::Quit => return Ok(Navigation::Quit),
        }
    }
}

/// Choose a day of the displayed month. Esc returns `None`.
fn pick_day(
    cursor: CalendarCursor,
    events: &EventStore,
    today: NaiveDate,
) -> Result<Option<NaiveDate>> {
    let days = day_choices(cursor, events);
    let labels: Vec<&str> = days.iter().map(|(_, label)| label.as_str()).collect();
    let default = days.iter().position(|(date, _)| *date == today).unwrap_or(0);

    let choice = Select::new()
        .with_prompt("Day")
        .items(&labels)
        .default(default)
        .max_length(10)
        .interact_opt()?;

    Ok(choice.and_then(|i| days.get(i)).map(|(date, _)| *date))
}

/// One entry per day cell, labelled with its date key and event count.
fn day_choices(cursor: CalendarCursor, events: &EventStore) -> Vec<(NaiveDate, String)> {
    grid_for(cursor)
        .iter()
        .filter_map(GridCell::day)
        .map(|cell| (cell.date, day_label(&cell.key, events.count(&cell.key))))
        .collect()
}

fn day_label(key: &DateKey, count: usize) -> String {
    match count {
        0 => key.to_string(),
        1 => format!("{key}  (1 event)"),
        n => format!("{key}  ({n} events)"),
    }
}
