//! # vrd-client
//!
//! Typed HTTP client for the Verdict question-answering backend.
//!
//! One method per backend endpoint:
//! - chat and session history (`/chat`, `/sessions`)
//! - knowledge-base documents (`/upload`, `/documents`)
//! - test suites and test cases (`/test-suites`, `/test-cases`)
//! - test runs and their results (`/test-runs`)
//! - answer generation and validation (`/predict`, `/validate`)
//!
//! Request bodies and response entities come from [`vrd_core::wire`] and
//! [`vrd_core::entities`]; this crate never builds JSON by hand.

pub mod chat;
pub mod documents;
pub mod evaluation;
pub mod runs;
pub mod suites;

mod error;
mod http;

pub use error::ClientError;

use std::time::Duration;

use vrd_config::ApiConfig;

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path. Path segments that carry ids must
    /// already be escaped with [`segment`].
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Percent-encode an id for use as a single path segment.
fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_urls_without_double_slashes() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "http://localhost:8000/".into(),
            ..ApiConfig::default()
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/test-runs"), "http://localhost:8000/test-runs");
    }

    #[test]
    fn escapes_ids_in_path_segments() {
        assert_eq!(segment("run 1/2"), "run%201%2F2");
        assert_eq!(segment("abc-123"), "abc-123");
    }

    #[test]
    fn timeout_is_optional() {
        let config = ApiConfig {
            timeout_secs: 5,
            ..ApiConfig::default()
        };
        assert!(ApiClient::new(&config).is_ok());
        assert!(ApiClient::new(&ApiConfig::default()).is_ok());
    }
}
