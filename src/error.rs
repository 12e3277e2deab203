use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Missing required field: {field}")]
    InvalidInput { field: &'static str },
    #[error("Invalid value for {field}: {value:?}")]
    InvalidNumeric { field: &'static str, value: String },
    #[error("Invalid date {date:?}, expected DD/MM/YYYY")]
    InvalidDate { date: String },
    #[error("Session no longer exists")]
    StaleSession,
    #[error("Training log {path:?} is corrupt: {reason}")]
    CorruptStore { path: PathBuf, reason: String },
    #[error("I/O error on {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

impl LogError {
    /// Errors caused by what the user typed, as opposed to storage failures.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LogError::InvalidInput { .. }
                | LogError::InvalidNumeric { .. }
                | LogError::InvalidDate { .. }
                | LogError::StaleSession
        )
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
