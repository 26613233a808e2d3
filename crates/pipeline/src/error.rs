//! Pipeline Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A pipeline error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a run. Failures scoped to a single firmware build never
/// surface here; they are reported per entry in the
/// [`RunSummary`](crate::RunSummary).
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required configuration is missing or invalid.
    #[display("invalid configuration")]
    Config,
    /// The release backend isn't available.
    #[display("release backend unavailable")]
    Backend,
    /// The firmware catalog could not be fetched or understood.
    #[display("failed to fetch firmware catalog")]
    Catalog,
    /// A publish succeeded but could not be recorded; continuing could
    /// publish the same build twice.
    #[display("failed to save release history")]
    History,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Catalog | Self::History)
    }
}
