use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use futures::TryStreamExt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::io::StreamReader;
use tracing::instrument;

/// Downloads are written in chunks of this size, however big the image is.
pub const DOWNLOAD_CHUNK_SIZE: usize = 8 * 1024;

/// Streams firmware images to local files.
#[derive(Debug, Clone)]
pub struct Downloader {
    http: reqwest::Client,
}
impl Downloader {
    /// The client's read timeout applies between chunks, not to the whole download.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Single-attempt streamed `GET url` into `destination`, returning the
    /// number of bytes written.
    ///
    /// A partially written file is removed on failure.
    #[instrument(skip(self, destination), fields(destination = %destination.display()))]
    pub async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        tracing::info!("Downloading firmware");
        match self.download_inner(url, destination).await {
            Ok(bytes) => {
                tracing::debug!(bytes, "Download complete");
                Ok(bytes)
            },
            Err(e) => {
                if let Err(cleanup) = tokio::fs::remove_file(destination).await
                    && cleanup.kind() != std::io::ErrorKind::NotFound
                {
                    tracing::warn!(error = %cleanup, "Could not remove partial download");
                }
                Err(e)
            },
        }
    }

    async fn download_inner(&self, url: &str, destination: &Path) -> Result<u64> {
        let response = self.http.get(url).send().await.or_raise(|| ErrorKind::Network)?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::HttpStatus(status.as_u16()));
        }
        let mut body = StreamReader::new(response.bytes_stream().map_err(std::io::Error::other));
        let mut file = File::create(destination).await.or_raise(|| ErrorKind::Io)?;
        let mut buffer = vec![0; DOWNLOAD_CHUNK_SIZE];
        let mut written: u64 = 0;
        loop {
            let bytes = body.read(&mut buffer).await.or_raise(|| ErrorKind::Network)?;
            if bytes == 0 {
                break;
            }
            file.write_all(&buffer[..bytes]).await.or_raise(|| ErrorKind::Io)?;
            written += bytes as u64;
        }
        file.flush().await.or_raise(|| ErrorKind::Io)?;
        Ok(written)
    }
}
