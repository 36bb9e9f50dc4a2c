//! Bootstrap configuration loading
//!
//! Settings needed before the server starts: listen address, logging level
//! and outbound HTTP settings for exploring sources.
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments / environment variables (resolved by the binary)
//! 2. TOML configuration file
//! 3. Built-in defaults (code constants)
//!
//! A missing TOML file is not an error: the caller logs a warning and uses
//! defaults. A file that exists but cannot be parsed is a configuration error.
//!
//! Credentials are never read from here; they are set at runtime through the
//! registry.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default HTTP server port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default timeout for outbound exploring-source requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_DISCOGS_API_URL: &str = "https://api.discogs.com";
pub const DEFAULT_CHATGPT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_CHATGPT_MODEL: &str = "gpt-3.5-turbo";

/// Bootstrap configuration loaded from TOML file
///
/// These settings cannot change during runtime.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Bind address for the HTTP server
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Outbound settings for exploring sources (optional)
    #[serde(default)]
    pub exploring: ExploringConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Outbound HTTP settings shared by all exploring sources
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExploringConfig {
    /// Timeout applied to every outbound request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Discogs API base URL (no trailing slash)
    #[serde(default = "default_discogs_api_url")]
    pub discogs_api_url: String,

    /// OpenAI chat-completions endpoint
    #[serde(default = "default_chatgpt_api_url")]
    pub chatgpt_api_url: String,

    /// Model used for artist histories
    #[serde(default = "default_chatgpt_model")]
    pub chatgpt_model: String,
}

impl ExploringConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_discogs_api_url() -> String {
    DEFAULT_DISCOGS_API_URL.to_string()
}

fn default_chatgpt_api_url() -> String {
    DEFAULT_CHATGPT_API_URL.to_string()
}

fn default_chatgpt_model() -> String {
    DEFAULT_CHATGPT_MODEL.to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logging: LoggingConfig::default(),
            exploring: ExploringConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ExploringConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            discogs_api_url: default_discogs_api_url(),
            chatgpt_api_url: default_chatgpt_api_url(),
            chatgpt_model: default_chatgpt_model(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map(Some)
    }

    /// Load configuration from `path`, falling back to defaults if the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        Ok(Self::load(path)?.unwrap_or_default())
    }

    fn validate(&self) -> Result<()> {
        if self.exploring.request_timeout_secs == 0 {
            return Err(Error::Config(
                "exploring.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.host.trim().is_empty() {
            return Err(Error::Config("host cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Default configuration file path for the platform
///
/// `<config dir>/lappi/lappi-dispatch.toml`, or a file in the working
/// directory when the platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("lappi").join("lappi-dispatch.toml"))
        .unwrap_or_else(|| PathBuf::from("lappi-dispatch.toml"))
}
