//! Canonical per-day keys for the event store.

use std::borrow::Borrow;
use std::fmt;

use chrono::NaiveDate;

use crate::error::{MycalError, MycalResult};

/// `Thu Feb 01 2024`. Built from a `NaiveDate` with chrono's English
/// names, so the key never depends on locale or timezone.
const DATE_KEY_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(String);

impl DateKey {
    pub fn parse(s: &str) -> MycalResult<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), DATE_KEY_FORMAT).map_err(|_| {
            MycalError::InvalidDate(format!("'{s}' is not a date key like 'Thu Feb 01 2024'"))
        })?;
        Ok(DateKey::from(date))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date.format(DATE_KEY_FORMAT).to_string())
    }
}

impl Borrow<str> for DateKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
