//! Error types for the history engine and its hosts.
//!
//! A denied transition is not an error: it is a silent, successful no-op.

use thiserror::Error;

/// Failure reported by a host navigation primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Navigation quota exceeded: host holds at most {limit} entries")]
    QuotaExceeded { limit: usize },

    #[error("Host navigation unavailable: {0}")]
    Unavailable(String),
}

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("Key length {length} is out of range ({min}..={max})")]
    KeyLengthOutOfRange {
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("Basename '{basename}' must not contain '?' or '#'")]
    BasenameHasDelimiter { basename: String },
}

/// Errors surfaced by [`History`](crate::History) operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Invalid history options: {}", join(.0))]
    InvalidOptions(Vec<OptionsError>),

    #[error(transparent)]
    Host(#[from] HostError),
}

fn join(errors: &[OptionsError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, HistoryError>;
