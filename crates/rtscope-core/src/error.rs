//! Error types for rtscope operations.

use thiserror::Error;

/// Main error type for rtscope.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure or non-success HTTP status.
    ///
    /// `message` carries the transport error description, or the raw
    /// response body when the server answered with an error status.
    #[error("{}", request_failed_message(url, *status, message))]
    RequestFailed {
        /// Requested URL.
        url: String,
        /// HTTP status code, absent for transport failures.
        status: Option<u16>,
        /// Cause description or response body.
        message: String,
    },

    /// Success response whose body is not valid JSON or does not match the
    /// expected shape.
    #[error("failed to decode response from {url}: {message}")]
    DecodeFailed {
        /// URL or source of the JSON.
        url: String,
        /// Parser error message.
        message: String,
    },

    /// Caller-supplied argument outside its allowed set.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Lookup of an entity that is not present in the fetched data.
    #[error("{kind} '{key}' not found")]
    NotFound {
        /// Entity kind (project, user, ...).
        kind: &'static str,
        /// Requested key.
        key: String,
    },

    /// Invalid client configuration.
    #[error("config error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] sonic_rs::Error),
}

fn request_failed_message(url: &str, status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("HTTP {code} from {url}: {message}"),
        None => format!("request to {url} failed: {message}"),
    }
}

impl Error {
    /// Create a request error from a transport failure.
    #[must_use]
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            url: url.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Create a request error from an error status and its response body.
    #[must_use]
    pub fn status(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::RequestFailed {
            url: url.into(),
            status: Some(status),
            message: body.into(),
        }
    }

    /// Create a decode error.
    #[must_use]
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DecodeFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error.
    #[must_use]
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// HTTP status code, when the error came from an error response.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type for rtscope operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_body() {
        let err = Error::status("https://rt.example/access/api/v1/projects", 403, "forbidden");
        assert_eq!(err.http_status(), Some(403));
        assert_eq!(
            err.to_string(),
            "HTTP 403 from https://rt.example/access/api/v1/projects: forbidden"
        );
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = Error::transport("https://rt.example", "connection refused");
        assert_eq!(err.http_status(), None);
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn not_found_display() {
        let err = Error::not_found("project", "alpha");
        assert_eq!(err.to_string(), "project 'alpha' not found");
    }
}
