//! History Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A history error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for history operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Only writes can fail; a history that cannot be read is treated as empty.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The history could not be written. Carrying on risks publishing the
    /// same build twice on the next run.
    #[display("failed to persist release history to {}", _0.display())]
    Persistence(#[error(not(source))] PathBuf),
    #[display("failed to serialize release history")]
    Serialize,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}
