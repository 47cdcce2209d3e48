//! Single-shot page fetching
//!
//! One GET per check, no retries. Any transport failure, timeout or HTTP
//! error status comes back as a [`FetchError`].

use crate::config::FetchConfig;
use crate::error::Result;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Why a fetch produced no usable page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    HttpStatus(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// HTTP client wrapper used for page checks
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Create a new fetcher
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Issue exactly one GET against `url`
    pub async fn fetch(&self, url: &str) -> std::result::Result<FetchedPage, FetchError> {
        debug!("Fetching: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;

        debug!("Fetched {} ({}, {} bytes)", final_url, status, body.len());

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_with_timeout(timeout_secs: u64) -> PageFetcher {
        let config = FetchConfig {
            timeout_secs,
            user_agent: "sitecheck-test".to_string(),
        };
        PageFetcher::new(&config).expect("fetcher should build")
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><title>Hi</title></html>".as_bytes(), "text/html"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let page = fetcher_with_timeout(5)
            .fetch(&mock_server.uri())
            .await
            .unwrap();

        assert_eq!(page.status, 200);
        assert!(page.body.contains("<title>Hi</title>"));
    }

    #[tokio::test]
    async fn test_fetch_reports_final_url_after_redirect() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("Location", format!("{}/home", mock_server.uri()).as_str()),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/home"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<h1>Home</h1>".as_bytes(), "text/html"),
            )
            .mount(&mock_server)
            .await;

        let page = fetcher_with_timeout(5)
            .fetch(&mock_server.uri())
            .await
            .unwrap();

        assert_eq!(page.status, 200);
        assert_eq!(page.url, format!("{}/home", mock_server.uri()));
        assert!(page.body.contains("Home"));
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = fetcher_with_timeout(5).fetch(&mock_server.uri()).await;
        assert_eq!(result.unwrap_err(), FetchError::HttpStatus(500));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = fetcher_with_timeout(5).fetch(&mock_server.uri()).await;
        assert_eq!(result.unwrap_err(), FetchError::HttpStatus(404));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&mock_server)
            .await;

        let result = fetcher_with_timeout(1).fetch(&mock_server.uri()).await;
        assert_eq!(result.unwrap_err(), FetchError::Timeout);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop a listener to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = fetcher_with_timeout(5)
            .fetch(&format!("http://{}", addr))
            .await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
