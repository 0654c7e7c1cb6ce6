//! Errors raised by the workout timer core

use thiserror::Error;

/// The only failure the timer core can report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl TimerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TimerError::InvalidConfiguration(message.into())
    }
}
