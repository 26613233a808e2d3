//! Publish Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A publish error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for download and publish operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// Every one of them is scoped to a single firmware build; none should stop a
/// run from moving on to the next build.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The firmware download could not be completed.
    #[display("firmware download failed")]
    Network,
    /// The download server answered with a non-2xx status.
    #[display("firmware download responded with HTTP {_0}")]
    HttpStatus(#[error(not(source))] u16),
    /// Local file could not be written or removed.
    Io,
    /// The vendor-supplied filename would escape the working directory.
    #[display("refusing to use firmware filename: {_0:?}")]
    InvalidFilename(#[error(not(source))] String),
    /// The release body could not be rendered.
    #[display("failed to render release notes")]
    Notes,
    /// The release-creation executable isn't installed.
    #[display("`{_0}` executable not found")]
    BackendNotFound(#[error(not(source))] &'static str),
    /// The release-creation command could not be started.
    #[display("failed to run release command")]
    Spawn,
    /// The release-creation command ran and reported failure.
    #[display("failed to create release {tag}: {diagnostics}")]
    ExternalCommand { tag: String, diagnostics: String },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network | Self::Io | Self::Spawn | Self::ExternalCommand { .. } => true,
            Self::HttpStatus(status) => *status >= 500 || *status == 429,
            Self::InvalidFilename(_) | Self::Notes | Self::BackendNotFound(_) => false,
        }
    }
}
