//! The release pipeline.
//!
//! A run moves through `INIT → FETCHED → (SKIPPED | PUBLISHED | FAILED)* → DONE`:
//!
//! 1. the release history is loaded (an unreadable history is an empty one),
//! 2. the vendor catalog is fetched; failure here ends the run,
//! 3. entries are sorted oldest build first, so the "latest" marker that only
//!    RELEASE builds receive always lands on the newest stable build,
//! 4. every entry whose checksum is unknown is downloaded and published, and
//!    its checksum is saved to history straight away. A failed entry is logged
//!    and the run moves on,
//! 5. a [`RunSummary`] reports what happened to each entry.

pub mod error;
mod summary;

use crate::error::{ErrorKind, Result};
pub use crate::summary::{EntryOutcome, EntryReport, RunSummary};
use exn::ResultExt;
use firmrel_catalog::CatalogClient;
use firmrel_catalog::models::FirmwareEntry;
use firmrel_config::Config;
use firmrel_history::{History, HistoryStore};
use firmrel_notes::ReleaseFormatter;
use firmrel_publish::backend::GhCli;
use firmrel_publish::{BackendHandle, Downloader, Publisher};
use std::sync::Arc;
use tracing::instrument;

pub struct Pipeline {
    model: String,
    catalog: CatalogClient,
    history: HistoryStore,
    publisher: Publisher,
}
impl Pipeline {
    pub fn new(model: impl Into<String>, catalog: CatalogClient, history: HistoryStore, publisher: Publisher) -> Self {
        Self { model: model.into(), catalog, history, publisher }
    }

    /// Wire every component from configuration.
    ///
    /// Fails before anything touches the network or filesystem if the target
    /// repository is missing or malformed.
    pub fn from_config(config: &Config, backend: BackendHandle) -> Result<Self> {
        let repository = config.repository().or_raise(|| ErrorKind::Config)?;
        let http = firmrel_catalog::http_client(config.request_timeout()).or_raise(|| ErrorKind::Config)?;
        let formatter = ReleaseFormatter::new(&config.model, config.product_name()).or_raise(|| ErrorKind::Config)?;
        let publisher = Publisher::new(backend, formatter, Downloader::new(http.clone()), repository, &config.work_dir);
        Ok(Self::new(
            config.model.trim(),
            CatalogClient::with_client(&config.api_url, http),
            HistoryStore::new(&config.history_file),
            publisher,
        ))
    }

    /// Wire the pipeline to the `gh` backend.
    ///
    /// The repository is checked before looking for `gh`, so a missing
    /// setting is reported as such even on hosts without the executable.
    pub fn with_gh(config: &Config) -> Result<Self> {
        config.repository().or_raise(|| ErrorKind::Config)?;
        Self::from_config(config, gh_backend(config)?)
    }

    #[instrument(skip(self), fields(model = %self.model, repository = %self.publisher.repository()))]
    pub async fn run(&self) -> Result<RunSummary> {
        let mut history = self.history.load();
        let catalog = self.catalog.fetch(&self.model).await.or_raise(|| ErrorKind::Catalog)?;

        let mut summary = RunSummary::default();
        for entry in catalog.into_chronological() {
            let outcome = self.process(&entry, &mut history).await?;
            summary.entries.push(EntryReport {
                version: entry.version.clone(),
                stage: entry.stage.clone(),
                checksum: entry.primary().map(|variant| variant.sha256.clone()),
                outcome,
            });
        }

        tracing::info!(
            published = summary.published(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            "Run complete"
        );
        Ok(summary)
    }

    /// Publish one entry unless it's already in `history`. Only a failure to
    /// save history is returned as an error.
    async fn process(&self, entry: &FirmwareEntry, history: &mut History) -> Result<EntryOutcome> {
        let Some(variant) = entry.primary() else {
            tracing::warn!(version = %entry.version, stage = %entry.stage, "No downloadable image listed; skipping");
            return Ok(EntryOutcome::Failed("no download listed".to_string()));
        };
        if history.contains(&variant.sha256) {
            tracing::info!(
                version = %entry.version,
                stage = %entry.stage,
                sha256 = %variant.sha256,
                "Already released; skipping"
            );
            return Ok(EntryOutcome::Skipped);
        }
        match self.publisher.publish(entry, variant).await {
            Ok(published) => {
                history.push(variant.sha256.clone());
                self.history.save(history).or_raise(|| ErrorKind::History)?;
                Ok(EntryOutcome::Published(published))
            },
            Err(e) => {
                tracing::error!(version = %entry.version, stage = %entry.stage, error = ?e, "Failed to publish firmware");
                Ok(EntryOutcome::Failed(e.to_string()))
            },
        }
    }
}

/// The `gh` backend: the configured executable, or whatever `gh` is on `PATH`.
pub fn gh_backend(config: &Config) -> Result<BackendHandle> {
    let gh = match &config.gh_binary {
        Some(path) => GhCli::with_path(path),
        None => GhCli::discover().or_raise(|| ErrorKind::Backend)?,
    };
    let handle: BackendHandle = Arc::new(gh);
    Ok(handle)
}
