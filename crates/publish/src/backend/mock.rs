//! In-memory release backend for testing.

use super::{ReleaseBackend, ReleaseOutcome, ReleaseRequest};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;

/// A release request as seen by [`RecordingBackend`], along with the state of
/// the attached artifact at the moment the release was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRelease {
    pub request: ReleaseRequest,
    /// Contents of the artifact file, if it existed when the release was created.
    pub artifact: Option<Vec<u8>>,
}

/// Release backend that records every request instead of publishing.
///
/// Requests for tags registered with [`failing_on`](Self::failing_on) are
/// recorded and then reported as a failed command.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    releases: Mutex<Vec<RecordedRelease>>,
    failing: HashSet<String>,
}
impl RecordingBackend {
    pub fn failing_on(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.failing.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Every request received so far, in order.
    pub async fn releases(&self) -> Vec<RecordedRelease> {
        self.releases.lock().await.clone()
    }

    /// Tags of every request received so far, in order.
    pub async fn tags(&self) -> Vec<String> {
        self.releases.lock().await.iter().map(|r| r.request.tag.clone()).collect()
    }
}

#[async_trait]
impl ReleaseBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    async fn create_release(&self, request: &ReleaseRequest) -> Result<ReleaseOutcome> {
        let artifact = tokio::fs::read(&request.artifact).await.ok();
        self.releases.lock().await.push(RecordedRelease { request: request.clone(), artifact });
        if self.failing.contains(&request.tag) {
            return Ok(ReleaseOutcome::failure(1, format!("release {} rejected", request.tag)));
        }
        Ok(ReleaseOutcome::success())
    }
}
