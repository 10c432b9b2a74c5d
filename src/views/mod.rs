//! One module per route, plus the overlays the calendar opens.

pub mod calendar;
pub mod day_modal;
pub mod login;
pub mod pickers;
pub mod signup;
