//! Release backend trait and implementations.
//!
//! A [`ReleaseBackend`] turns a fully-rendered [`ReleaseRequest`] into a
//! release on the hosting platform. The only production implementation shells
//! out to the GitHub CLI ([`GhCli`]); tests use [`RecordingBackend`].

mod gh;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::gh::GhCli;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::{RecordedRelease, RecordingBackend};
use crate::error::Result;
use async_trait::async_trait;
use firmrel_config::Repository;
use std::path::PathBuf;

/// Everything needed to create one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub tag: String,
    pub title: String,
    /// Markdown release body.
    pub notes: String,
    /// Local file attached to the release.
    pub artifact: PathBuf,
    pub repository: Repository,
    /// Mark this release as the repository's latest.
    pub latest: bool,
    pub prerelease: bool,
}

/// What the backend reported. `status` is the process exit code (`None` if
/// killed by a signal); captured output is kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseOutcome {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}
impl ReleaseOutcome {
    pub fn success() -> Self {
        Self { status: Some(0), ..Self::default() }
    }

    pub fn failure(status: impl Into<Option<i32>>, stderr: impl Into<String>) -> Self {
        Self { status: status.into(), stderr: stderr.into(), ..Self::default() }
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }

    /// Best available explanation of a failure: stderr, else stdout, else the exit status.
    pub fn diagnostics(&self) -> String {
        let stderr = self.stderr.trim();
        let stdout = self.stdout.trim();
        if !stderr.is_empty() {
            stderr.to_string()
        } else if !stdout.is_empty() {
            stdout.to_string()
        } else {
            match self.status {
                Some(code) => format!("exited with code {code}"),
                None => "terminated by signal".to_string(),
            }
        }
    }
}

/// Creates releases on the hosting platform.
#[async_trait]
pub trait ReleaseBackend: Send + Sync {
    /// Name of the backend, for logging.
    fn name(&self) -> &str;

    /// Create a release for `request`.
    ///
    /// `Err` means the backend could not even be invoked; a backend that ran
    /// and refused the release reports it through [`ReleaseOutcome`].
    async fn create_release(&self, request: &ReleaseRequest) -> Result<ReleaseOutcome>;
}
