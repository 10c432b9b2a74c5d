//! The per-day modal: list, add, edit and delete events for one date.

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Select;
use mycal_core::calendar::{DateKey, EventStore};
use mycal_core::editor::{DayModal, EditOutcome, Prompter, delete_event, edit_event};

use crate::render::{DayEvents, Render};

pub const NEW_EVENT_PROMPT: &str = "New event";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Add,
    Edit(usize),
    Delete(usize),
    Close,
}

impl ModalAction {
    pub fn label(&self, events: &[String]) -> String {
        let title = |i: &usize| events.get(*i).map(String::as_str).unwrap_or_default();
        match self {
            ModalAction::Add => "Add event".to_string(),
            ModalAction::Edit(i) => format!("Edit \"{}\"", title(i)),
            ModalAction::Delete(i) => format!("Delete \"{}\"", title(i)),
            ModalAction::Close => "Close".to_string(),
        }
    }
}

/// Add first, then edit/delete for each event in order, then close.
pub fn actions_for(events: &[String]) -> Vec<ModalAction> {
    let mut actions = vec![ModalAction::Add];
    for i in 0..events.len() {
        actions.push(ModalAction::Edit(i));
        actions.push(ModalAction::Delete(i));
    }
    actions.push(ModalAction::Close);
    actions
}

/// Show the modal for `date` until the user closes it.
pub fn run<P: Prompter>(
    modal: &mut DayModal,
    date: NaiveDate,
    store: &mut EventStore,
    prompter: &mut P,
) -> Result<()> {
    modal.open(date);
    let result = interact(modal, store, prompter);
    modal.close();
    result
}

fn interact<P: Prompter>(
    modal: &mut DayModal,
    store: &mut EventStore,
    prompter: &mut P,
) -> Result<()> {
    let Some(key) = modal.key() else {
        return Ok(());
    };

    loop {
        let events = store.get(&key);
        println!("\n{}\n", DayEvents { key: &key, events }.render());

        let actions = actions_for(events);
        let labels: Vec<String> = actions.iter().map(|a| a.label(events)).collect();
        let choice = Select::new().items(&labels).default(0).interact_opt()?;

        // Esc closes the modal like clicking the backdrop.
        let action = choice.and_then(|i| actions.get(i).copied()).unwrap_or(ModalAction::Close);
        if action == ModalAction::Close {
            return Ok(());
        }

        apply(action, &key, modal, store, prompter)?;
    }
}

/// Run one modal action against the store.
pub fn apply<P: Prompter + ?Sized>(
    action: ModalAction,
    key: &DateKey,
    modal: &mut DayModal,
    store: &mut EventStore,
    prompter: &mut P,
) -> Result<EditOutcome> {
    let outcome = match action {
        ModalAction::Add => match prompter.input(NEW_EVENT_PROMPT, modal.draft())? {
            Some(text) => {
                modal.set_draft(text);
                modal.submit_draft(store)
            }
            None => EditOutcome::Skipped,
        },
        ModalAction::Edit(i) => edit_event(store, key, i, prompter)?,
        ModalAction::Delete(i) => delete_event(store, key, i, prompter)?,
        ModalAction::Close => EditOutcome::Skipped,
    };
    Ok(outcome)
}
