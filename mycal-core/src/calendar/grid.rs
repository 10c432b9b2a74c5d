//! Month grid layout: leading blanks, then one cell per day.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{CalendarCursor, DateKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub key: DateKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(cell) => Some(cell),
        }
    }
}

/// Lay out `cursor`'s month on a Sunday-first seven-column grid.
///
/// The grid starts with one blank per weekday before day 1 and has exactly
/// `days_in_month` day cells. It is not padded at the end.
pub fn grid_for(cursor: CalendarCursor) -> Vec<GridCell> {
    let blanks = cursor.leading_blanks() as usize;
    let days = cursor.days_in_month();

    let mut cells = Vec::with_capacity(blanks + days as usize);
    cells.extend(std::iter::repeat_n(GridCell::Blank, blanks));
    cells.extend((1..=days).filter_map(|day| {
        cursor.date_of(day).map(|date| {
            GridCell::Day(DayCell {
                day,
                date,
                key: DateKey::from(date),
            })
        })
    }));
    cells
}

/// True when day `day` of `cursor`'s month is `today`.
pub fn is_today(day: u32, cursor: CalendarCursor, today: NaiveDate) -> bool {
    day == today.day() && cursor.month() == today.month0() && cursor.year() == today.year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn cursor(year: i32, month: u32) -> CalendarCursor {
        CalendarCursor::new(year, month).unwrap()
    }

    fn count_blanks(cells: &[GridCell]) -> usize {
        cells.iter().take_while(|c| **c == GridCell::Blank).count()
    }

    #[test]
    fn february_2024_grid() {
        let cells = grid_for(cursor(2024, 1));
        assert_eq!(count_blanks(&cells), 4);
        let days: Vec<u32> = cells.iter().filter_map(|c| c.day()).map(|d| d.day).collect();
        assert_eq!(days, (1..=29).collect::<Vec<_>>());
    }

    #[test]
    fn month_starting_on_sunday_has_no_blanks() {
        // September 2024 starts on a Sunday
        let cells = grid_for(cursor(2024, 8));
        assert_eq!(count_blanks(&cells), 0);
        assert_eq!(cells.len(), 30);
    }

    #[test]
    fn blanks_match_weekday_of_first_for_every_month() {
        for year in [1900, 1970, 2024, 2100, 2200] {
            for month in 0..12 {
                let c = cursor(year, month);
                let cells = grid_for(c);
                let first = NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap();
                assert_eq!(count_blanks(&cells), first.weekday().num_days_from_sunday() as usize);
                assert_eq!(cells.len() - count_blanks(&cells), c.days_in_month() as usize);
            }
        }
    }

    #[test]
    fn day_cells_carry_their_key() {
        let cells = grid_for(cursor(2024, 1));
        let first = cells.iter().find_map(|c| c.day()).unwrap();
        assert_eq!(first.key.as_str(), "Thu Feb 01 2024");
        assert_eq!(first.date.weekday(), Weekday::Thu);
    }

    #[test]
    fn today_needs_day_month_and_year() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        assert!(is_today(14, cursor(2024, 1), today));
        assert!(!is_today(13, cursor(2024, 1), today));
        assert!(!is_today(14, cursor(2024, 2), today));
        assert!(!is_today(14, cursor(2023, 1), today));
    }
}
