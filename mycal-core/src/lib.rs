//! Core types for mycal.
//!
//! This crate holds everything that is not terminal I/O or provider HTTP:
//! - `calendar` for the displayed month, its day grid and the in-memory event store
//! - `editor` and `picker` for the modal and overlay state layered on the calendar
//! - `identity` and `guard` for sessions, sign-in results and auth-gated routing

pub mod calendar;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod guard;
pub mod identity;
pub mod picker;
pub mod validation;

pub use error::{MycalError, MycalResult};
