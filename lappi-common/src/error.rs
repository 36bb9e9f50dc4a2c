//! Common error types for Lappi

use thiserror::Error;

/// Common result type for Lappi operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds surfaced by the registry, the dispatch core and the exploring sources
#[derive(Error, Debug)]
pub enum Error {
    /// Registry key was never set
    #[error("Registry key not found: {0}")]
    NotFound(String),

    /// No handler registered for the dispatch key
    #[error("Unknown handler: {0}")]
    UnknownHandler(String),

    /// No exploring source registered under this name
    #[error("Unknown exploring source: {0}")]
    UnknownSource(String),

    /// Required credential absent or invalid, or bootstrap config unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend answered but found no matching entity
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// Backend call failed at the transport or protocol level
    #[error(
        "Upstream error from {source_name}{}: {message}",
        .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
    )]
    Upstream {
        source_name: String,
        status: Option<u16>,
        message: String,
    },

    /// Request payload does not have the shape the handler expects
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an upstream error for `source_name`
    pub fn upstream(
        source_name: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Error::Upstream {
            source_name: source_name.into(),
            status,
            message: message.into(),
        }
    }
}
