//! Downloading firmware builds and publishing them as releases.

pub mod backend;
mod download;
pub mod error;
mod publisher;

pub use crate::backend::{ReleaseBackend, ReleaseOutcome, ReleaseRequest};
pub use crate::download::{DOWNLOAD_CHUNK_SIZE, Downloader};
pub use crate::publisher::{Published, Publisher};
use std::sync::Arc;

pub type BackendHandle = Arc<dyn ReleaseBackend>;
