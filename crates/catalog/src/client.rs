use crate::Catalog;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::time::Duration;
use tracing::instrument;

pub const USER_AGENT: &str = concat!("firmrel/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by the catalog fetcher and the downloader.
///
/// The timeout bounds connecting and each wait for more data, not the whole
/// transfer: a slow download that keeps making progress never times out.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(timeout)
        .read_timeout(timeout)
        .build()
        .or_raise(|| ErrorKind::Client)
}

/// Fetches the firmware list for a model from the vendor API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: String,
}
impl CatalogClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(endpoint, http_client(timeout)?))
    }

    pub fn with_client(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self { http, endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Single-attempt `GET <endpoint>?model=<model>`.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch(&self, model: &str) -> Result<Catalog> {
        tracing::info!("Fetching firmware info");
        let response =
            self.http.get(&self.endpoint).query(&[("model", model)]).send().await.or_raise(|| ErrorKind::Network)?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::HttpStatus(status.as_u16()));
        }
        let body = response.bytes().await.or_raise(|| ErrorKind::Network)?;
        let catalog = Catalog::from_slice(&body)?;
        tracing::info!(entries = catalog.len(), "Firmware catalog fetched");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const PATH: &str = "/cloud-api/model/info";

    fn client(server: &mockito::ServerGuard) -> CatalogClient {
        CatalogClient::new(format!("{}{PATH}", server.url()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .match_query(Matcher::UrlEncoded("model".into(), "mt6000".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"info": [{"version": "4.8.2", "stage": "RELEASE", "release_note": "<p>hi</p>", "download": [
                    {"name": "fw.bin", "link": "https://x/fw.bin", "sha256": "AA", "size": 10, "compile_time": 100}
                ]}]}"#,
            )
            .create_async()
            .await;

        let catalog = client(&server).fetch("mt6000").await.unwrap();
        mock.assert_async().await;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries[0].version, "4.8.2");
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", PATH).match_query(Matcher::Any).with_status(503).create_async().await;

        let err = client(&server).fetch("mt6000").await.unwrap_err();
        assert_eq!(*err, ErrorKind::HttpStatus(503));
        assert!(err.is_network());
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_not_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = client(&server).fetch("mt6000").await.unwrap_err();
        assert_eq!(*err, ErrorKind::Format);
        assert!(!err.is_network());
    }

    #[tokio::test]
    async fn test_missing_info() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"code": -1, "msg": "unknown model"}"#)
            .create_async()
            .await;

        let err = client(&server).fetch("nope").await.unwrap_err();
        assert_eq!(*err, ErrorKind::MissingInfo);
    }

    #[tokio::test]
    async fn test_unreachable() {
        // Nothing listens on port 9 (discard) in a test sandbox.
        let client = CatalogClient::new("http://127.0.0.1:9/cloud-api/model/info", Duration::from_secs(2)).unwrap();
        let err = client.fetch("mt6000").await.unwrap_err();
        assert_eq!(*err, ErrorKind::Network);
    }
}
