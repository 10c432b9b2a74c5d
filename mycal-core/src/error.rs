//! Error types for mycal.

use thiserror::Error;

/// Errors that can occur in mycal operations.
#[derive(Error, Debug)]
pub enum MycalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("No event #{index} on {key} (it has {len})")]
    EventIndexOutOfRange { key: String, index: usize, len: usize },

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

/// Result type alias for mycal operations.
pub type MycalResult<T> = Result<T, MycalError>;
