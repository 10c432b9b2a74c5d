//! TUI rendering traits for mycal types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to mycal-core types using owo_colors.

use chrono::NaiveDate;
use mycal_core::calendar::{CalendarCursor, DateKey, EventStore, GridCell, grid_for, is_today};
use mycal_core::constants::WEEKDAY_HEADER;
use mycal_core::identity::Identity;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Width of one day column: a three-wide day number plus a badge slot.
const CELL_WIDTH: usize = 7;

/// One month laid out as a Sunday-first grid with event-count badges.
pub struct MonthView<'a> {
    pub cursor: CalendarCursor,
    pub events: &'a EventStore,
    pub today: NaiveDate,
}

impl MonthView<'_> {
    fn render_cell(&self, cell: &GridCell) -> String {
        let Some(day) = cell.day() else {
            return " ".repeat(CELL_WIDTH);
        };

        let number = format!("{:>3}", day.day);
        let number = if is_today(day.day, self.cursor, self.today) {
            number.reversed().bold().to_string()
        } else {
            number
        };

        format!("{}{}", number, render_badge(self.events.count(&day.key)))
    }
}

impl Render for MonthView<'_> {
    fn render(&self) -> String {
        let total_width = CELL_WIDTH * WEEKDAY_HEADER.len();
        let mut lines = Vec::new();

        let title = format!("{:^width$}", self.cursor.to_string(), width = total_width);
        lines.push(title.bold().to_string());

        let header: String = WEEKDAY_HEADER
            .iter()
            .map(|d| format!("{:>3}{}", d, " ".repeat(CELL_WIDTH - 3)))
            .collect();
        lines.push(header.dimmed().to_string());

        for week in grid_for(self.cursor).chunks(WEEKDAY_HEADER.len()) {
            let row: String = week.iter().map(|cell| self.render_cell(cell)).collect();
            lines.push(row.trim_end().to_string());
        }

        lines.join("\n")
    }
}

/// `[n]` after the day number, blank when the day has no events.
fn render_badge(count: usize) -> String {
    let slot = CELL_WIDTH - 3;
    if count == 0 {
        return " ".repeat(slot);
    }
    let badge = format!("[{}]", count);
    format!(" {:<width$}", badge.red(), width = slot - 1)
}

/// The events listed in the day modal.
pub struct DayEvents<'a> {
    pub key: &'a DateKey,
    pub events: &'a [String],
}

impl Render for DayEvents<'_> {
    fn render(&self) -> String {
        let mut lines = vec![format!("Events for {}", self.key).bold().to_string()];

        if self.events.is_empty() {
            lines.push(format!("   {}", "No events yet.".italic().dimmed()));
        } else {
            for (i, event) in self.events.iter().enumerate() {
                lines.push(format!("   {} {}", format!("{}.", i + 1).dimmed(), event));
            }
        }

        lines.join("\n")
    }
}

impl Render for Identity {
    fn render(&self) -> String {
        format!("Signed in as {} {}", self.label().bold(), format!("({})", self.method).dimmed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycal_core::identity::SignInMethod;

    /// Drop ANSI escape sequences so layout can be compared as plain text.
    fn plain(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn february_2024_layout() {
        let events = EventStore::new();
        let view = MonthView {
            cursor: CalendarCursor::new(2024, 1).unwrap(),
            events: &events,
            today: date(2030, 1, 1),
        };
        let rendered = plain(&view.render());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0].trim(), "February 2024");
        assert_eq!(lines.len(), 2 + 5);
        // Feb 1 2024 is a Thursday: four blank columns before it.
        assert!(lines[2].starts_with(&format!("{}  1 ", " ".repeat(4 * CELL_WIDTH))));
        assert!(lines[2].ends_with("  3"));
        assert!(lines[6].trim_end().ends_with("29"));
    }

    #[test]
    fn badge_shows_event_count() {
        let mut events = EventStore::new();
        let key = DateKey::from(date(2024, 2, 1));
        events.push(&key, "Dentist".into());
        events.push(&key, "Gym".into());

        let view = MonthView {
            cursor: CalendarCursor::new(2024, 1).unwrap(),
            events: &events,
            today: date(2030, 1, 1),
        };
        let rendered = plain(&view.render());

        assert!(rendered.contains("  1 [2]"));
        assert_eq!(rendered.matches('[').count(), 1);
    }

    #[test]
    fn today_is_highlighted() {
        let events = EventStore::new();
        let view = MonthView {
            cursor: CalendarCursor::new(2024, 1).unwrap(),
            events: &events,
            today: date(2024, 2, 14),
        };
        let rendered = view.render();
        let highlighted = " 14".reversed().bold().to_string();

        assert!(rendered.contains(&highlighted));
    }

    #[test]
    fn empty_day_lists_placeholder() {
        let key = DateKey::from(date(2024, 2, 1));
        let rendered = plain(&DayEvents { key: &key, events: &[] }.render());

        assert!(rendered.starts_with("Events for Thu Feb 01 2024"));
        assert!(rendered.contains("No events yet."));
    }

    #[test]
    fn day_events_are_numbered() {
        let key = DateKey::from(date(2024, 2, 1));
        let events = vec!["Dentist".to_string(), "Gym".to_string()];
        let rendered = plain(&DayEvents { key: &key, events: &events }.render());

        assert!(rendered.contains("1. Dentist"));
        assert!(rendered.contains("2. Gym"));
    }

    #[test]
    fn identity_uses_label() {
        let identity = Identity {
            uid: "u1".into(),
            email: Some("ada@example.com".into()),
            display_name: None,
            method: SignInMethod::Google,
        };
        assert_eq!(plain(&identity.render()), "Signed in as ada@example.com (Google)");
    }
}
