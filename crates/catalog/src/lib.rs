//! Vendor firmware catalog: the data model and the HTTP client that fetches it.

mod client;
pub mod error;
pub mod models;

use crate::error::{ErrorKind, Result};
use crate::models::FirmwareEntry;
pub use client::{CatalogClient, USER_AGENT, http_client};
use exn::{OptionExt, ResultExt};
use serde::Deserialize;

/// Every firmware build the vendor currently lists for a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub entries: Vec<FirmwareEntry>,
}
impl Catalog {
    /// Parse a raw vendor API response body.
    ///
    /// The body must be a JSON object with an `info` array; anything else is
    /// a [`Format`](ErrorKind::Format) or [`MissingInfo`](ErrorKind::MissingInfo) error.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            info: Option<Vec<FirmwareEntry>>,
        }
        let response: Response = serde_json::from_slice(body).or_raise(|| ErrorKind::Format)?;
        let entries = response.info.ok_or_raise(|| ErrorKind::MissingInfo)?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered oldest build first.
    ///
    /// The sort is stable; entries without a numeric compile time sort first.
    pub fn into_chronological(mut self) -> Vec<FirmwareEntry> {
        self.entries.sort_by_key(|entry| entry.compile_time().unwrap_or(i64::MIN));
        self.entries
    }
}
impl IntoIterator for Catalog {
    type Item = FirmwareEntry;
    type IntoIter = std::vec::IntoIter<FirmwareEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
