//! In-memory mapping from day to its event titles.
//!
//! Created empty when the calendar opens and dropped with it. Nothing here
//! is ever written to disk.

use std::collections::HashMap;

use crate::calendar::DateKey;
use crate::error::{MycalError, MycalResult};

/// Event titles per day, in insertion order. Duplicates are allowed and a
/// missing key reads as an empty list.
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: HashMap<DateKey, Vec<String>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DateKey) -> &[String] {
        self.events.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Badge count for a day cell.
    pub fn count(&self, key: &DateKey) -> usize {
        self.get(key).len()
    }

    pub fn contains_key(&self, key: &DateKey) -> bool {
        self.events.contains_key(key)
    }

    /// Total number of events across all days.
    pub fn total(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn push(&mut self, key: &DateKey, title: String) {
        self.events.entry(key.clone()).or_default().push(title);
    }

    /// Replace the title at `index`, returning the previous one.
    pub fn replace(&mut self, key: &DateKey, index: usize, title: String) -> MycalResult<String> {
        let slot = self.slot_mut(key, index)?;
        Ok(std::mem::replace(slot, title))
    }

    /// Remove the title at `index`. The key stays mapped, possibly to an
    /// empty list.
    pub fn remove(&mut self, key: &DateKey, index: usize) -> MycalResult<String> {
        self.check_index(key, index)?;
        let titles = self.events.entry(key.clone()).or_default();
        Ok(titles.remove(index))
    }

    fn slot_mut(&mut self, key: &DateKey, index: usize) -> MycalResult<&mut String> {
        self.check_index(key, index)?;
        self.events
            .get_mut(key)
            .and_then(|titles| titles.get_mut(index))
            .ok_or_else(|| out_of_range(key, index, 0))
    }

    pub(crate) fn check_index(&self, key: &DateKey, index: usize) -> MycalResult<()> {
        let len = self.count(key);
        if index < len {
            Ok(())
        } else {
            Err(out_of_range(key, index, len))
        }
    }
}

fn out_of_range(key: &DateKey, index: usize, len: usize) -> MycalError {
    MycalError::EventIndexOutOfRange {
        key: key.to_string(),
        index,
        len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> DateKey {
        DateKey::parse("Thu Feb 01 2024").unwrap()
    }

    #[test]
    fn missing_key_reads_empty() {
        let store = EventStore::new();
        assert!(store.get(&key()).is_empty());
        assert_eq!(store.count(&key()), 0);
        assert!(!store.contains_key(&key()));
    }

    #[test]
    fn push_keeps_order_and_duplicates() {
        let mut store = EventStore::new();
        store.push(&key(), "Gym".into());
        store.push(&key(), "Dentist".into());
        store.push(&key(), "Gym".into());
        assert_eq!(store.get(&key()), ["Gym", "Dentist", "Gym"]);
        assert_eq!(store.total(), 3);
    }

    #[test]
    fn replace_returns_old_title() {
        let mut store = EventStore::new();
        store.push(&key(), "Gym".into());
        let old = store.replace(&key(), 0, "Swim".into()).unwrap();
        assert_eq!(old, "Gym");
        assert_eq!(store.get(&key()), ["Swim"]);
    }

    #[test]
    fn remove_last_leaves_empty_list() {
        let mut store = EventStore::new();
        store.push(&key(), "Gym".into());
        store.remove(&key(), 0).unwrap();
        assert!(store.contains_key(&key()));
        assert!(store.get(&key()).is_empty());
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut store = EventStore::new();
        store.push(&key(), "Gym".into());
        assert!(matches!(
            store.remove(&key(), 3),
            Err(MycalError::EventIndexOutOfRange { index: 3, len: 1, .. })
        ));
        assert!(store.replace(&key(), 1, "x".into()).is_err());
        assert_eq!(store.get(&key()), ["Gym"]);
    }
}
