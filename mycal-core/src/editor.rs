//! Per-day event editing: the modal's add, edit and delete actions.
//!
//! Edit and delete ask the user first. How they are asked is up to the
//! caller's [`Prompter`]; the terminal uses dialoguer, tests script answers.

use chrono::NaiveDate;

use crate::calendar::{DateKey, EventStore};
use crate::error::MycalResult;

pub const EDIT_PROMPT: &str = "Edit event:";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this event?";

/// Asks the user for text or a yes/no answer.
pub trait Prompter {
    /// Ask for text, pre-filled with `initial`. `None` means cancelled.
    fn input(&mut self, prompt: &str, initial: &str) -> MycalResult<Option<String>>;

    fn confirm(&mut self, prompt: &str) -> MycalResult<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Skipped,
}

/// Append `title` as typed. Blank titles are ignored.
pub fn add_event(store: &mut EventStore, key: &DateKey, title: &str) -> EditOutcome {
    if title.trim().is_empty() {
        return EditOutcome::Skipped;
    }
    store.push(key, title.to_string());
    tracing::debug!(%key, count = store.count(key), "event added");
    EditOutcome::Applied
}

/// Ask for a new title for event `index` and store it trimmed.
pub fn edit_event<P: Prompter + ?Sized>(
    store: &mut EventStore,
    key: &DateKey,
    index: usize,
    prompter: &mut P,
) -> MycalResult<EditOutcome> {
    store.check_index(key, index)?;
    let current = store.get(key)[index].clone();

    let Some(answer) = prompter.input(EDIT_PROMPT, &current)? else {
        return Ok(EditOutcome::Skipped);
    };
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return Ok(EditOutcome::Skipped);
    }

    store.replace(key, index, trimmed.to_string())?;
    tracing::debug!(%key, index, "event edited");
    Ok(EditOutcome::Applied)
}

/// Remove event `index` once the user confirms.
pub fn delete_event<P: Prompter + ?Sized>(
    store: &mut EventStore,
    key: &DateKey,
    index: usize,
    prompter: &mut P,
) -> MycalResult<EditOutcome> {
    store.check_index(key, index)?;

    if !prompter.confirm(DELETE_PROMPT)? {
        return Ok(EditOutcome::Skipped);
    }

    store.remove(key, index)?;
    tracing::debug!(%key, index, "event deleted");
    Ok(EditOutcome::Applied)
}

/// Which day the modal is showing, plus the "new event" input text.
///
/// The draft starts empty every time the modal opens and is cleared again
/// once it has been added.
#[derive(Debug, Default, Clone)]
pub struct DayModal {
    selected: Option<NaiveDate>,
    draft: String,
}

impl DayModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, date: NaiveDate) {
        self.draft.clear();
        self.selected = Some(date);
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn key(&self) -> Option<DateKey> {
        self.selected.map(DateKey::from)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Add the draft to the selected day. Does nothing when the modal is
    /// closed or the draft is blank.
    pub fn submit_draft(&mut self, store: &mut EventStore) -> EditOutcome {
        let Some(key) = self.key() else {
            return EditOutcome::Skipped;
        };
        let outcome = add_event(store, &key, &self.draft);
        if outcome == EditOutcome::Applied {
            self.draft.clear();
        }
        outcome
    }
}
