//! HTTP GET primitive shared by every accessor.
//!
//! One pooled `reqwest::Client` backs each [`HttpClient`]. Clones are cheap
//! handles onto the same connection pool and statistics, so every fan-out
//! task can own its handle without sharing an unsynchronized connection.

use crate::config::ClientConfig;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use rtscope_core::{Error, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace, warn};
use url::Url;

/// Request counters shared by all clones of an [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientStats {
    requests: AtomicU64,
    failures: AtomicU64,
    bytes: AtomicU64,
}

impl HttpClientStats {
    /// Total GET requests issued.
    #[must_use]
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Requests that ended in an error of any kind.
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Response body bytes received.
    #[must_use]
    pub fn bytes_downloaded(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }

    fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}

/// Authenticated JSON GET client.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    token: Arc<str>,
    ssl_verify: bool,
    stats: Arc<HttpClientStats>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("client", &"reqwest::Client")
            .field("base_url", &self.base_url.as_str())
            .field("ssl_verify", &self.ssl_verify)
            .field("auth", &!self.token.is_empty())
            .finish()
    }
}

impl HttpClient {
    /// Create a client for the configured platform.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url()?;

        if !config.ssl_verify {
            warn!(
                url = %base_url,
                "TLS certificate verification is disabled; responses are not authenticated"
            );
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .gzip(true)
            .danger_accept_invalid_certs(!config.ssl_verify)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token: Arc::from(config.token.as_str()),
            ssl_verify: config.ssl_verify,
            stats: Arc::new(HttpClientStats::default()),
        })
    }

    /// Base address all endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether TLS certificates are verified.
    #[must_use]
    pub const fn ssl_verify(&self) -> bool {
        self.ssl_verify
    }

    /// Request statistics.
    #[must_use]
    pub fn stats(&self) -> &HttpClientStats {
        &self.stats
    }

    /// Build an endpoint URL by appending path segments to the base address.
    ///
    /// Each segment is percent-encoded, so identifiers taken from upstream
    /// data cannot alter the path structure.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // The base address is validated as a base URL at construction.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET a URL and decode its JSON body.
    ///
    /// # Errors
    /// - [`Error::RequestFailed`] on transport failure (with the cause) or a
    ///   non-success status (with the raw response body)
    /// - [`Error::DecodeFailed`] if a success body does not decode as `T`
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        self.stats.requests.fetch_add(1, Ordering::Relaxed);
        trace!(url = %url, "GET request starting");

        let response = self
            .client
            .get(url.as_str())
            .bearer_auth(&*self.token)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| {
                self.stats.record_failure();
                debug!(url = %url, error = %e, "GET request failed");
                Error::transport(url.as_str(), error_chain(&e))
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            self.stats.record_failure();
            debug!(url = %url, error = %e, "failed to read response body");
            Error::transport(url.as_str(), error_chain(&e))
        })?;
        self.stats
            .bytes
            .fetch_add(body.len() as u64, Ordering::Relaxed);

        if !status.is_success() {
            self.stats.record_failure();
            debug!(url = %url, status = %status, "non-success status");
            return Err(Error::status(
                url.as_str(),
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        trace!(url = %url, bytes = body.len(), "GET request succeeded");
        rtscope_core::json::decode(&body, url.as_str()).inspect_err(|e| {
            self.stats.record_failure();
            debug!(url = %url, error = %e, "response body did not decode");
        })
    }
}

/// Render an error with its source chain; reqwest keeps the useful part
/// (DNS, connect, TLS) in the sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> HttpClient {
        HttpClient::new(&ClientConfig::new(url, "token")).unwrap()
    }

    #[test]
    fn endpoint_appends_segments() {
        let client = client("https://rt.example.com/");
        let url = client.endpoint(&["access", "api", "v2", "users", "alice"]);
        assert_eq!(url.as_str(), "https://rt.example.com/access/api/v2/users/alice");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = client("https://rt.example.com/platform");
        let url = client.endpoint(&["xray", "api", "v2", "watches"]);
        assert_eq!(url.as_str(), "https://rt.example.com/platform/xray/api/v2/watches");
    }

    #[test]
    fn endpoint_encodes_identifiers() {
        let client = client("https://rt.example.com");
        let url = client.endpoint(&["access", "api", "v2", "groups", "team a/b"]);
        assert_eq!(
            url.as_str(),
            "https://rt.example.com/access/api/v2/groups/team%20a%2Fb"
        );
    }

    #[test]
    fn debug_hides_token() {
        let client = HttpClient::new(&ClientConfig::new("https://rt.example.com", "hunter2"))
            .unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("HttpClient"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn insecure_client_builds() {
        let config = ClientConfig::new("https://rt.example.com", "t").with_ssl_verify(false);
        let client = HttpClient::new(&config).unwrap();
        assert!(!client.ssl_verify());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ClientConfig::new("https://rt.example.com", "");
        assert!(HttpClient::new(&config).is_err());
    }
}
