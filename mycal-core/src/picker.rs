//! Month and year picker overlays.
//!
//! At most one picker is open at a time. Opening one through
//! [`Pickers::open`] hands out a [`PickerScope`]: the dismissal subscription
//! for that overlay. Dropping the scope, whether after a selection, a
//! dismissal or an early return, closes the picker.

use std::ops::RangeInclusive;

use chrono::NaiveDate;

use crate::calendar::CalendarCursor;
use crate::calendar::cursor::month_name;
use crate::constants::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};
use crate::error::{MycalError, MycalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    Year,
    Month,
}

/// Visibility flags for the two overlays.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pickers {
    year_open: bool,
    month_open: bool,
}

impl Pickers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, kind: PickerKind) -> bool {
        match kind {
            PickerKind::Year => self.year_open,
            PickerKind::Month => self.month_open,
        }
    }

    /// Flip the year picker; the month picker always ends up closed.
    pub fn toggle_year(&mut self) {
        self.year_open = !self.year_open;
        self.month_open = false;
    }

    /// Flip the month picker; the year picker always ends up closed.
    pub fn toggle_month(&mut self) {
        self.month_open = !self.month_open;
        self.year_open = false;
    }

    pub fn close_all(&mut self) {
        self.year_open = false;
        self.month_open = false;
    }

    /// Open `kind` (closing the other) for as long as the scope lives.
    pub fn open(&mut self, kind: PickerKind) -> PickerScope<'_> {
        self.close_all();
        self.set(kind, true);
        tracing::trace!(?kind, "picker opened");
        PickerScope { pickers: self, kind }
    }

    fn set(&mut self, kind: PickerKind, open: bool) {
        match kind {
            PickerKind::Year => self.year_open = open,
            PickerKind::Month => self.month_open = open,
        }
    }
}

/// An open picker. Closes it on drop.
#[derive(Debug)]
pub struct PickerScope<'a> {
    pickers: &'a mut Pickers,
    kind: PickerKind,
}

impl PickerScope<'_> {
    pub fn kind(&self) -> PickerKind {
        self.kind
    }

    /// Jump to `year`, keeping the month, and close the picker.
    pub fn select_year(self, cursor: CalendarCursor, year: i32) -> MycalResult<CalendarCursor> {
        cursor.with_year(year)
    }

    /// Jump to zero-based `month`, keeping the year, and close the picker.
    pub fn select_month(self, cursor: CalendarCursor, month: u32) -> MycalResult<CalendarCursor> {
        cursor.with_month(month)
    }

    /// Close without choosing anything.
    pub fn dismiss(self) {}
}

impl Drop for PickerScope<'_> {
    fn drop(&mut self) {
        self.pickers.set(self.kind, false);
        tracing::trace!(kind = ?self.kind, "picker closed");
    }
}

/// The years offered by the year picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    min: i32,
    max: i32,
}

impl YearRange {
    /// Both ends must be whole years chrono can represent.
    pub fn new(min: i32, max: i32) -> MycalResult<Self> {
        if min > max {
            return Err(MycalError::Config(format!(
                "year range {min}..={max} is empty"
            )));
        }
        if let Some(year) = [min, max].into_iter().find(|y| !is_whole_year(*y)) {
            return Err(MycalError::Config(format!(
                "year {year} is outside the supported calendar range"
            )));
        }
        Ok(YearRange { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    /// List position of `year`, for preselecting the current year.
    pub fn position(&self, year: i32) -> Option<usize> {
        self.contains(year).then(|| (year - self.min) as usize)
    }

    pub fn year_at(&self, position: usize) -> Option<i32> {
        let year = self.min.checked_add(i32::try_from(position).ok()?)?;
        self.contains(year).then_some(year)
    }
}

fn is_whole_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1).is_some() && NaiveDate::from_ymd_opt(year, 12, 31).is_some()
}

impl Default for YearRange {
    fn default() -> Self {
        YearRange {
            min: DEFAULT_MIN_YEAR,
            max: DEFAULT_MAX_YEAR,
        }
    }
}

/// January through December.
pub fn month_names() -> Vec<String> {
    (0..12).filter_map(month_name).collect()
}
