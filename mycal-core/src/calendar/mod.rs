//! The calendar state model: which month is on screen, how its grid is laid
//! out, and which events belong to which day.

pub mod cursor;
pub mod date_key;
pub mod event_store;
pub mod grid;

pub use cursor::CalendarCursor;
pub use date_key::DateKey;
pub use event_store::EventStore;
pub use grid::{DayCell, GridCell, grid_for, is_today};
