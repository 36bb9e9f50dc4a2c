//! Tests for bootstrap configuration loading and graceful degradation
//!
//! - Missing TOML file SHALL NOT cause termination (defaults are used)
//! - Malformed TOML file is reported as a configuration error
//! - Logging and exploring sections are optional

use lappi_common::config::{TomlConfig, DEFAULT_CHATGPT_API_URL, DEFAULT_PORT};
use lappi_common::Error;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let config = TomlConfig::load_or_default(&path).expect("Missing file should not fail");
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_full_file_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
host = "0.0.0.0"
port = 5100

[logging]
level = "debug"

[exploring]
request_timeout_secs = 12
discogs_api_url = "http://localhost:9000"
chatgpt_api_url = "http://localhost:9001/v1/chat/completions"
chatgpt_model = "gpt-4"
"#
    )
    .unwrap();

    let config = TomlConfig::load_or_default(file.path()).unwrap();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 5100);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.exploring.request_timeout_secs, 12);
    assert_eq!(config.exploring.discogs_api_url, "http://localhost:9000");
    assert_eq!(config.exploring.chatgpt_model, "gpt-4");
}

#[test]
fn test_logging_only_file_keeps_other_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();

    let config = TomlConfig::load_or_default(file.path()).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.exploring.chatgpt_api_url, DEFAULT_CHATGPT_API_URL);
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "port = [this is not toml").unwrap();

    let result = TomlConfig::load_or_default(file.path());
    assert!(matches!(result, Err(Error::Config(_))));
}
