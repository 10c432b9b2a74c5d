//! Year and month picker overlays.
//!
//! Each picker holds a [`PickerScope`](mycal_core::picker::PickerScope)
//! while its list is on screen, so every way out closes it. Esc on the
//! list dismisses without changing the month. A choice the calendar
//! cannot represent is reported and leaves the month as it was.

use anyhow::Result;
use dialoguer::Select;
use mycal_core::calendar::CalendarCursor;
use mycal_core::picker::{PickerKind, Pickers, YearRange, month_names};

use crate::prompts::alert;

/// Rows shown at once in the year list.
const YEAR_PAGE: usize = 12;

pub fn pick_year(
    pickers: &mut Pickers,
    cursor: CalendarCursor,
    years: YearRange,
) -> Result<CalendarCursor> {
    let scope = pickers.open(PickerKind::Year);

    let items: Vec<String> = years.years().map(|y| y.to_string()).collect();
    let choice = Select::new()
        .with_prompt("Year")
        .items(&items)
        .default(years.position(cursor.year()).unwrap_or(0))
        .max_length(YEAR_PAGE)
        .interact_opt()?;

    match choice.and_then(|i| years.year_at(i)) {
        Some(year) => Ok(scope.select_year(cursor, year).unwrap_or_else(|err| {
            alert(&err.to_string());
            cursor
        })),
        None => {
            scope.dismiss();
            Ok(cursor)
        }
    }
}

pub fn pick_month(pickers: &mut Pickers, cursor: CalendarCursor) -> Result<CalendarCursor> {
    let scope = pickers.open(PickerKind::Month);

    let choice = Select::new()
        .with_prompt("Month")
        .items(&month_names())
        .default(cursor.month() as usize)
        .interact_opt()?;

    match choice {
        Some(month) => Ok(scope.select_month(cursor, month as u32).unwrap_or_else(|err| {
            alert(&err.to_string());
            cursor
        })),
        None => {
            scope.dismiss();
            Ok(cursor)
        }
    }
}
