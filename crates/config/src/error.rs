//! Configuration Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested configuration file does not exist.
    #[display("configuration file not found: {}", _0.display())]
    FileNotFound(#[error(not(source))] PathBuf),
    /// The configuration file extension isn't one of TOML, YAML or JSON.
    #[display("unsupported configuration format: {}", _0.display())]
    UnsupportedFormat(#[error(not(source))] PathBuf),
    /// Layered configuration could not be merged into a [`Config`](crate::Config).
    #[display("invalid configuration")]
    Invalid,
    /// A field holds a value that can never work.
    #[display("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
    /// No target repository was configured (`GITHUB_REPOSITORY`).
    #[display("target repository is not configured (set GITHUB_REPOSITORY)")]
    MissingRepository,
    /// The target repository is not in `owner/repo` form.
    #[display("repository must be in owner/repo form, found: {_0}")]
    InvalidRepository(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Configuration is static for the lifetime of a run.
        false
    }
}
