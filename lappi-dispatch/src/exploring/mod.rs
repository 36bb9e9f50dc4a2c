//! Exploring sources: pluggable backends producing artist descriptions
//!
//! Each source is built fresh per request by a factory registered with the
//! [`SourceProvider`], reads its credential from the [`Registry`] at
//! construction time and is dropped once the call completes.
//!
//! # Sources
//! 1. **discogs** - database-backed lookup (`discogs.com`)
//! 2. **chatgpt** - generative-text history (`chatgpt`)

pub mod chatgpt;
pub mod discogs;
pub mod provider;

pub use chatgpt::ChatGptSource;
pub use discogs::DiscogsSource;
pub use provider::{SourceFactory, SourceProvider};

use async_trait::async_trait;
use lappi_common::{Error, Registry, Result};
use serde::Serialize;
use std::time::Duration;

/// Upper bound on upstream error bodies copied into error messages
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Per-source feature descriptor
///
/// Reserved for feature negotiation; no source reports one yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceCapabilities {}

/// Backend capable of describing music artists
#[async_trait]
pub trait ExploringSource: Send + Sync {
    /// Name the source is registered under
    fn source_name(&self) -> &str;

    fn capabilities(&self) -> Option<SourceCapabilities> {
        None
    }

    /// Describe `artist_name`
    ///
    /// # Errors
    /// - `Error::Lookup` if the backend has no matching artist
    /// - `Error::Upstream` on transport, HTTP or decoding failures
    /// - `Error::Config` if the backend rejects the credential
    async fn get_artist_description(&self, artist_name: &str) -> Result<String>;
}

/// Read a source credential from the registry
///
/// Absent, non-string and blank values are all configuration errors.
pub(crate) fn read_user_token(registry: &Registry, key: &str) -> Result<String> {
    let token = registry.get_string(key).map_err(|e| match e {
        Error::NotFound(key) => Error::Config(format!(
            "'{}' is not set; configure it with registry.set_values",
            key
        )),
        other => other,
    })?;

    if token.trim().is_empty() {
        return Err(Error::Config(format!("'{}' cannot be empty", key)));
    }
    Ok(token)
}

pub(crate) fn build_http_client(timeout: Duration, user_agent: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Map a transport-level failure to `Error::Upstream`
pub(crate) fn transport_error(source_name: &str, err: reqwest::Error) -> Error {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_decode() {
        format!("unexpected response body: {}", err)
    } else {
        err.to_string()
    };
    Error::upstream(source_name, err.status().map(|s| s.as_u16()), message)
}

/// Pass successful responses through; map failures by status
///
/// 401/403 mean the stored token was rejected, which is a configuration
/// problem rather than an upstream outage.
pub(crate) async fn check_status(
    source_name: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Config(format!(
            "{} rejected the configured user token (HTTP {})",
            source_name,
            status.as_u16()
        )));
    }

    let body = response.text().await.unwrap_or_default();
    let message: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    Err(Error::upstream(source_name, Some(status.as_u16()), message))
}
