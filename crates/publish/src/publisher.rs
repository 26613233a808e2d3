use crate::BackendHandle;
use crate::backend::ReleaseRequest;
use crate::download::Downloader;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use firmrel_catalog::models::{DownloadVariant, FirmwareEntry};
use firmrel_config::Repository;
use firmrel_notes::ReleaseFormatter;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// A release that was created successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub tag: String,
    pub title: String,
    /// Size of the attached artifact in bytes.
    pub bytes: u64,
}

/// Downloads a firmware build and publishes it as a release.
pub struct Publisher {
    backend: BackendHandle,
    formatter: ReleaseFormatter,
    downloader: Downloader,
    repository: Repository,
    work_dir: PathBuf,
}
impl Publisher {
    pub fn new(
        backend: BackendHandle,
        formatter: ReleaseFormatter,
        downloader: Downloader,
        repository: Repository,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self { backend, formatter, downloader, repository, work_dir: work_dir.into() }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Download `variant` and create a release for it.
    ///
    /// Only RELEASE builds are marked as the latest release; everything else
    /// is a prerelease so it can never eclipse the newest stable build. The
    /// downloaded file is removed afterwards whether or not the release was
    /// created.
    #[instrument(skip_all, fields(version = %entry.version, stage = %entry.stage, backend = self.backend.name()))]
    pub async fn publish(&self, entry: &FirmwareEntry, variant: &DownloadVariant) -> Result<Published> {
        let tag = self.formatter.render_tag(&entry.version, &entry.stage, &variant.compile_time);
        let title = self.formatter.render_title(&entry.stage, &entry.version, &variant.compile_time);
        tracing::info!(%tag, "Processing firmware build");

        let artifact = self.artifact_path(&variant.name)?;
        let notes = self.formatter.render_body(entry, variant).or_raise(|| ErrorKind::Notes)?;
        let bytes = self.downloader.download(&variant.link, &artifact).await?;

        let is_release = entry.stage.is_release();
        let request = ReleaseRequest {
            tag,
            title,
            notes,
            artifact,
            repository: self.repository.clone(),
            latest: is_release,
            prerelease: !is_release,
        };
        let outcome = self.backend.create_release(&request).await;
        // Removed on every path, success or not.
        Self::remove_artifact(&request.artifact).await;

        let outcome = outcome?;
        if !outcome.is_success() {
            let diagnostics = outcome.diagnostics();
            exn::bail!(ErrorKind::ExternalCommand { tag: request.tag, diagnostics });
        }
        tracing::info!(tag = %request.tag, "Successfully created release");
        Ok(Published { tag: request.tag, title: request.title, bytes })
    }

    /// Local download location for a vendor-supplied filename. Anything that
    /// isn't a plain filename is rejected.
    fn artifact_path(&self, filename: &str) -> Result<PathBuf> {
        let plain = Path::new(filename).file_name().is_some_and(|name| name == filename);
        if filename.is_empty() || !plain || filename.contains(['/', '\\']) {
            exn::bail!(ErrorKind::InvalidFilename(filename.to_string()));
        }
        Ok(self.work_dir.join(filename))
    }

    async fn remove_artifact(path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed downloaded firmware"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Could not remove downloaded firmware"),
        }
    }
}
