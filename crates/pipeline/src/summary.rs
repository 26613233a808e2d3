use firmrel_catalog::models::{Checksum, Stage};
use firmrel_publish::Published;

/// What happened to a single catalog entry during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Already in the release history.
    Skipped,
    Published(Published),
    /// Download or release creation failed; the message is the error's display.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub version: String,
    pub stage: Stage,
    /// Checksum of the primary download, if the entry had one.
    pub checksum: Option<Checksum>,
    pub outcome: EntryOutcome,
}

/// Per-entry outcomes of a run, in processing (chronological) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub entries: Vec<EntryReport>,
}
impl RunSummary {
    pub fn published(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Published(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Failed(_)))
    }

    /// Tags created this run, in order.
    pub fn published_tags(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match &e.outcome {
                EntryOutcome::Published(published) => Some(published.tag.as_str()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| predicate(&e.outcome)).count()
    }
}
