//! Release history: the checksums of every firmware build already published.
//!
//! The history file is a human-readable JSON array of SHA-256 hex strings. It
//! is read once when a run starts and rewritten in full after every successful
//! publish, so a crash mid-run loses at most the release that was in flight.

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use firmrel_catalog::models::Checksum;
use std::collections::HashSet;
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::instrument;

/// Ordered list of published checksums that also answers membership queries.
///
/// Duplicates are tolerated (an older tool may have written them) and kept
/// in place, so saving never reorders or drops entries that were loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    ordered: Vec<Checksum>,
    known: HashSet<Checksum>,
}
impl History {
    pub fn contains(&self, checksum: &Checksum) -> bool {
        self.known.contains(checksum)
    }

    /// Record a newly published checksum at the end of the history.
    pub fn push(&mut self, checksum: Checksum) {
        self.known.insert(checksum.clone());
        self.ordered.push(checksum);
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checksum> {
        self.ordered.iter()
    }
}
impl<C: Into<Checksum>> FromIterator<C> for History {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut history = Self::default();
        for checksum in iter {
            history.push(checksum.into());
        }
        history
    }
}

/// File-backed persistence for [`History`].
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}
impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted history.
    ///
    /// Never fails: a missing, unreadable or malformed file degrades to an
    /// empty history (and a warning for the latter two).
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> History {
        let contents = match std::fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                tracing::info!("No release history found; starting fresh");
                return History::default();
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read release history; starting fresh");
                return History::default();
            },
        };
        match serde_json::from_slice::<Vec<String>>(&contents) {
            Ok(checksums) => {
                let history: History = checksums.into_iter().collect();
                tracing::info!(releases = history.len(), "Loaded release history");
                history
            },
            Err(e) => {
                tracing::warn!(error = %e, "Release history is not a JSON list of checksums; starting fresh");
                History::default()
            },
        }
    }

    /// Overwrite the history file with the full contents of `history`.
    ///
    /// Writes to a sibling temporary file first and renames it into place.
    #[instrument(skip_all, fields(path = %self.path.display(), releases = history.len()))]
    pub fn save(&self, history: &History) -> Result<()> {
        let persistence = || ErrorKind::Persistence(self.path.clone());
        let checksums: Vec<&str> = history.iter().map(Checksum::as_str).collect();
        let mut json = serde_json::to_string_pretty(&checksums).or_raise(|| ErrorKind::Serialize)?;
        json.push('\n');

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(directory).or_raise(persistence)?;
        tmp.write_all(json.as_bytes()).or_raise(persistence)?;
        tmp.as_file().sync_all().or_raise(persistence)?;
        tmp.persist(&self.path).or_raise(persistence)?;
        tracing::debug!("Release history saved");
        Ok(())
    }
}
