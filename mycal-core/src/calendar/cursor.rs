//! The currently displayed (year, month) pair.

use std::fmt;

use chrono::{Datelike, Local, Months, NaiveDate};

use crate::error::{MycalError, MycalResult};

/// Displayed month. Stored as the first day of that month so every
/// derived value goes through calendar-correct date arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarCursor {
    first: NaiveDate,
}

impl CalendarCursor {
    /// `month` is zero-based (0 = January).
    pub fn new(year: i32, month: u32) -> MycalResult<Self> {
        if month > 11 {
            return Err(MycalError::InvalidDate(format!(
                "month {month} is outside 0-11"
            )));
        }

        let first = NaiveDate::from_ymd_opt(year, month + 1, 1)
            .ok_or_else(|| MycalError::InvalidDate(format!("year {year} is out of range")))?;

        Ok(CalendarCursor { first })
    }

    /// The month that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        CalendarCursor { first }
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Zero-based month (0 = January).
    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// English month name, e.g. "February".
    pub fn month_name(&self) -> String {
        self.first.format("%B").to_string()
    }

    /// Move by `delta` months; month overflow and underflow roll the year.
    ///
    /// Navigation is not clamped here. Only chrono's own representable range
    /// stops it, in which case the cursor stays where it is.
    pub fn advance_month(self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.first.checked_add_months(months)
        } else {
            self.first.checked_sub_months(months)
        };

        match moved {
            Some(first) => CalendarCursor { first },
            None => {
                tracing::warn!(
                    cursor = %self,
                    delta,
                    "month navigation left the representable date range"
                );
                self
            }
        }
    }

    pub fn previous(self) -> Self {
        self.advance_month(-1)
    }

    pub fn next(self) -> Self {
        self.advance_month(1)
    }

    /// Same month in another year.
    pub fn with_year(self, year: i32) -> MycalResult<Self> {
        Self::new(year, self.month())
    }

    /// Another month (zero-based) of the same year.
    pub fn with_month(self, month: u32) -> MycalResult<Self> {
        Self::new(self.year(), month)
    }

    /// Number of days in the month, taken as "day 0 of the next month".
    pub fn days_in_month(&self) -> u32 {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            // Only December of chrono's final year lacks a successor month.
            .unwrap_or(31)
    }

    /// Weekday index of day 1, Sunday = 0.
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// Date of day `day` (1-based) of this month, if it exists.
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }
}

impl Default for CalendarCursor {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for CalendarCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year())
    }
}

/// English name of a zero-based month, for picker lists.
pub fn month_name(month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(2000, month + 1, 1).map(|d| d.format("%B").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(year: i32, month: u32) -> CalendarCursor {
        CalendarCursor::new(year, month).unwrap()
    }

    #[test]
    fn rejects_month_out_of_range() {
        assert!(CalendarCursor::new(2024, 12).is_err());
        assert!(CalendarCursor::new(2024, 11).is_ok());
    }

    #[test]
    fn february_leap_year() {
        let feb = cursor(2024, 1);
        assert_eq!(feb.days_in_month(), 29);
        assert_eq!(feb.leading_blanks(), 4);
    }

    #[test]
    fn february_common_year() {
        assert_eq!(cursor(2023, 1).days_in_month(), 28);
        assert_eq!(cursor(1900, 1).days_in_month(), 28);
        assert_eq!(cursor(2000, 1).days_in_month(), 29);
    }

    #[test]
    fn month_lengths_of_a_year() {
        let lengths: Vec<u32> = (0..12).map(|m| cursor(2025, m).days_in_month()).collect();
        assert_eq!(lengths, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
    }

    #[test]
    fn previous_from_january_rolls_to_december() {
        let dec = cursor(2024, 0).previous();
        assert_eq!((dec.year(), dec.month()), (2023, 11));
    }

    #[test]
    fn next_from_december_rolls_to_january() {
        let jan = cursor(2023, 11).next();
        assert_eq!((jan.year(), jan.month()), (2024, 0));
    }

    #[test]
    fn advance_by_many_months() {
        let c = cursor(2024, 1).advance_month(25);
        assert_eq!((c.year(), c.month()), (2026, 2));

        let c = cursor(2024, 1).advance_month(-14);
        assert_eq!((c.year(), c.month()), (2022, 11));
    }

    #[test]
    fn advance_is_inverse_consistent() {
        for year in [1900, 1999, 2024, 2200] {
            for month in 0..12 {
                let c = cursor(year, month);
                assert_eq!(c.advance_month(1).advance_month(-1), c);
                assert_eq!(c.advance_month(-1).advance_month(1), c);
                assert_eq!(c.advance_month(-37).advance_month(37), c);
            }
        }
    }

    #[test]
    fn with_year_keeps_month() {
        let c = cursor(2024, 6).with_year(1999).unwrap();
        assert_eq!((c.year(), c.month()), (1999, 6));
    }

    #[test]
    fn containing_snaps_to_first_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let c = CalendarCursor::containing(date);
        assert_eq!(c.first_day(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn display_uses_month_name() {
        assert_eq!(cursor(2024, 1).to_string(), "February 2024");
        assert_eq!(month_name(11).as_deref(), Some("December"));
        assert_eq!(month_name(12), None);
    }
}
