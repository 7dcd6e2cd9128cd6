//! Client configuration.

use rtscope_core::{Error, Result};
use serde::Deserialize;
use url::Url;

/// Default ceiling on concurrent detail fetches.
pub const DEFAULT_CONCURRENT_WORKERS: usize = 20;

/// Connection settings shared by the management and scan clients.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Base address of the platform. Trailing slashes are ignored.
    pub url: String,
    /// Bearer credential sent with every request.
    pub token: String,
    /// Verify TLS certificates. Disabling this is an explicit insecure opt-in.
    #[serde(default = "default_ssl_verify")]
    pub ssl_verify: bool,
    /// Maximum number of detail fetches in flight during a fan-out.
    #[serde(default = "default_concurrent_workers")]
    pub concurrent_workers: usize,
    /// User-Agent header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_ssl_verify() -> bool {
    true
}

const fn default_concurrent_workers() -> usize {
    DEFAULT_CONCURRENT_WORKERS
}

fn default_user_agent() -> String {
    format!("rtscope/{}", env!("CARGO_PKG_VERSION"))
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("ssl_verify", &self.ssl_verify)
            .field("concurrent_workers", &self.concurrent_workers)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with default options.
    #[must_use]
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            ssl_verify: default_ssl_verify(),
            concurrent_workers: DEFAULT_CONCURRENT_WORKERS,
            user_agent: default_user_agent(),
        }
    }

    /// Load a configuration from a JSON document.
    ///
    /// # Errors
    /// Returns error if the document is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = rtscope_core::json::from_json(json)
            .map_err(|e| Error::Config(format!("invalid client configuration: {e}")))?;
        config.url = config.url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Set TLS certificate verification.
    #[must_use]
    pub const fn with_ssl_verify(mut self, ssl_verify: bool) -> Self {
        self.ssl_verify = ssl_verify;
        self
    }

    /// Set the fan-out concurrency ceiling.
    #[must_use]
    pub const fn with_concurrent_workers(mut self, workers: usize) -> Self {
        self.concurrent_workers = workers;
        self
    }

    /// Set the User-Agent header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parse the base address.
    ///
    /// # Errors
    /// Returns error if the address is not an absolute http(s) URL.
    pub fn base_url(&self) -> Result<Url> {
        let trimmed = self.url.trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|e| Error::Config(format!("invalid url '{}': {e}", self.url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "unsupported url scheme '{}' in '{}'",
                url.scheme(),
                self.url
            )));
        }
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!("url '{}' cannot be a base", self.url)));
        }

        Ok(url)
    }

    /// Check the configuration for values no client can work with.
    ///
    /// # Errors
    /// Returns error describing the first invalid option.
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.token.trim().is_empty() {
            return Err(Error::Config("token must not be empty".into()));
        }
        if self.concurrent_workers == 0 {
            return Err(Error::Config(
                "concurrent_workers must be a positive integer".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new("https://rt.example.com/", "secret");
        assert_eq!(config.url, "https://rt.example.com");
        assert!(config.ssl_verify);
        assert_eq!(config.concurrent_workers, DEFAULT_CONCURRENT_WORKERS);
        assert!(config.user_agent.starts_with("rtscope/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn debug_redacts_token() {
        let config = ClientConfig::new("https://rt.example.com", "very-secret-token");
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn rejects_zero_workers() {
        let config = ClientConfig::new("https://rt.example.com", "t").with_concurrent_workers(0);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_empty_token() {
        let config = ClientConfig::new("https://rt.example.com", "  ");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_non_http_url() {
        let config = ClientConfig::new("ftp://rt.example.com", "t");
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = ClientConfig::new("not a url", "t");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn keeps_path_prefix() {
        let config = ClientConfig::new("https://rt.example.com/platform///", "t");
        assert_eq!(config.base_url().unwrap().path(), "/platform");
    }

    #[test]
    fn from_json_applies_defaults() {
        let config =
            ClientConfig::from_json(r#"{"url": "https://rt.example.com/", "token": "t"}"#)
                .unwrap();
        assert_eq!(config.url, "https://rt.example.com");
        assert!(config.ssl_verify);
        assert_eq!(config.concurrent_workers, 20);
    }

    #[test]
    fn from_json_reads_options() {
        let config = ClientConfig::from_json(
            r#"{"url": "https://rt.example.com", "token": "t", "ssl_verify": false, "concurrent_workers": 4}"#,
        )
        .unwrap();
        assert!(!config.ssl_verify);
        assert_eq!(config.concurrent_workers, 4);
    }

    #[test]
    fn from_json_requires_token() {
        let err = ClientConfig::from_json(r#"{"url": "https://rt.example.com"}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
