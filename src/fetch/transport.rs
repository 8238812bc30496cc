//! Download transport seam with a reqwest production implementation.
//!
//! A download is two-phase: `begin` yields the response metadata (status
//! checked, declared length available) without consuming the body, so the
//! fetcher can abort oversized transfers before reading a byte.

use async_trait::async_trait;
use std::time::Duration;

/// Transport-level failures, distinct from extraction outcomes.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(String),

    #[error("unexpected status {0}")]
    Status(u16),
}

/// An in-flight download whose body has not been read yet.
#[async_trait]
pub trait Download: Send + std::fmt::Debug {
    /// Declared Content-Length, when the server sent one.
    fn declared_len(&self) -> Option<u64>;

    /// Read the full body.
    async fn body(self: Box<Self>) -> Result<Vec<u8>, TransportError>;
}

/// Begins downloads for the attachment fetcher.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn begin(&self, url: &str) -> Result<Box<dyn Download>, TransportError>;
}

/// Production transport over reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<Self> {
        use anyhow::Context as _;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }
}

#[derive(Debug)]
struct HttpDownload {
    response: reqwest::Response,
}

#[async_trait]
impl Download for HttpDownload {
    fn declared_len(&self) -> Option<u64> {
        self.response.content_length()
    }

    async fn body(self: Box<Self>) -> Result<Vec<u8>, TransportError> {
        let bytes = self
            .response
            .bytes()
            .await
            .map_err(|error| TransportError::Http(error.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn begin(&self, url: &str) -> Result<Box<dyn Download>, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|error| TransportError::Http(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(Box::new(HttpDownload { response }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn successful_download_exposes_length_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/notes.txt"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/plain")
                    .set_body_string("attachment body"),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new().expect("client");
        let download = transport
            .begin(&format!("{}/files/notes.txt", server.uri()))
            .await
            .expect("begin");

        assert_eq!(download.declared_len(), Some(15));
        assert_eq!(download.body().await.expect("body"), b"attachment body");
    }

    #[tokio::test]
    async fn error_status_fails_the_begin_phase() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/gone.pdf"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().expect("client");
        let error = transport
            .begin(&format!("{}/files/gone.pdf", server.uri()))
            .await
            .expect_err("404 should fail");

        assert!(matches!(error, TransportError::Status(404)));
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        // Nothing listens on this port.
        let transport = HttpTransport::new().expect("client");
        let error = transport
            .begin("http://127.0.0.1:1/unreachable")
            .await
            .expect_err("connect should fail");

        assert!(matches!(error, TransportError::Http(_)));
    }
}
