//! Release Notes Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A release notes error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for release notes operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The release body template failed to compile or render.
    #[display("issue rendering release body template")]
    Template,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Template => false,
        }
    }
}
