//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// ### Network Errors
/// - [`ErrorKind::Client`]
/// - [`ErrorKind::Network`]
/// - [`ErrorKind::HttpStatus`]
///
/// ### Format Errors
/// - [`ErrorKind::Format`]
/// - [`ErrorKind::MissingInfo`]
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP client could not be constructed.
    #[display("failed to build HTTP client")]
    Client,
    /// The vendor API could not be reached.
    #[display("firmware API request failed")]
    Network,
    /// The vendor API answered with a non-2xx status.
    #[display("firmware API responded with HTTP {_0}")]
    HttpStatus(#[error(not(source))] u16),
    /// The response body is not JSON, or doesn't match the expected shape.
    #[display("failed to parse firmware API response")]
    Format,
    /// The response is JSON but carries no `info` list.
    #[display("no firmware info found in API response")]
    MissingInfo,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network => true,
            Self::HttpStatus(status) => *status >= 500 || *status == 429,
            Self::Client | Self::Format | Self::MissingInfo => false,
        }
    }

    /// Network-category errors, as opposed to a reachable API returning garbage.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network | Self::HttpStatus(_))
    }
}
