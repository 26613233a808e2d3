use super::{ReleaseBackend, ReleaseOutcome, ReleaseRequest};
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::ResultExt;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::instrument;

/// Creates releases with `gh release create`.
///
/// Authentication is entirely up to `gh`; it picks up `GH_TOKEN` from the
/// inherited environment.
#[derive(Debug, Clone)]
pub struct GhCli {
    path: PathBuf,
}
impl GhCli {
    /// Find `gh` on `PATH`.
    pub fn discover() -> Result<Self> {
        let path = which::which("gh").or_raise(|| ErrorKind::BackendNotFound("gh"))?;
        tracing::debug!(gh = %path.display(), "Discovered GitHub CLI");
        Ok(Self { path })
    }

    /// Use a specific executable instead of searching `PATH`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn arguments(request: &ReleaseRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "release".into(),
            "create".into(),
            request.tag.as_str().into(),
            request.artifact.as_os_str().into(),
            "--title".into(),
            request.title.as_str().into(),
            "--notes".into(),
            request.notes.as_str().into(),
            "--repo".into(),
            request.repository.to_string().into(),
        ];
        args.push(if request.latest { "--latest" } else { "--latest=false" }.into());
        if request.prerelease {
            args.push("--prerelease".into());
        }
        args
    }
}

#[async_trait]
impl ReleaseBackend for GhCli {
    fn name(&self) -> &str {
        "gh"
    }

    #[instrument(skip_all, fields(tag = %request.tag, repository = %request.repository))]
    async fn create_release(&self, request: &ReleaseRequest) -> Result<ReleaseOutcome> {
        let output = Command::new(&self.path)
            .args(Self::arguments(request))
            .stdin(Stdio::null())
            .output()
            .await
            .or_raise(|| ErrorKind::Spawn)?;
        Ok(ReleaseOutcome {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(latest: bool) -> ReleaseRequest {
        ReleaseRequest {
            tag: "v4.8.2".to_string(),
            title: "GL-MT6000 Release 4.8.2".to_string(),
            notes: "# notes".to_string(),
            artifact: PathBuf::from("./fw.bin"),
            repository: "owner/repo".parse().unwrap(),
            latest,
            prerelease: !latest,
        }
    }

    #[test]
    fn test_arguments_latest() {
        let args = GhCli::arguments(&request(true));
        let expected = [
            "release",
            "create",
            "v4.8.2",
            "./fw.bin",
            "--title",
            "GL-MT6000 Release 4.8.2",
            "--notes",
            "# notes",
            "--repo",
            "owner/repo",
            "--latest",
        ];
        assert_eq!(args, expected.map(OsString::from));
    }

    #[test]
    fn test_arguments_prerelease() {
        let args = GhCli::arguments(&request(false));
        let tail: Vec<_> = args.iter().rev().take(2).rev().cloned().collect();
        assert_eq!(tail, [OsString::from("--latest=false"), OsString::from("--prerelease")]);
        assert!(!args.contains(&OsString::from("--latest")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_the_signal() {
        let succeeds = GhCli::with_path(which::which("true").unwrap());
        assert!(succeeds.create_release(&request(true)).await.unwrap().is_success());

        let fails = GhCli::with_path(which::which("false").unwrap());
        let outcome = fails.create_release(&request(true)).await.unwrap();
        assert!(!outcome.is_success());
        assert_eq!(outcome.status, Some(1));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stderr() {
        // `sh release create …` tries to run a script called "release".
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(true);
        req.artifact = dir.path().join("fw.bin");
        let sh = GhCli::with_path(which::which("sh").unwrap());
        let outcome = sh.create_release(&req).await.unwrap();
        assert!(!outcome.is_success());
        assert!(!outcome.stderr.trim().is_empty());
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let missing = GhCli::with_path("/definitely/not/a/real/gh");
        let err = missing.create_release(&request(true)).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Spawn);
    }
}
