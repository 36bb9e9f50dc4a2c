//! Command-line arguments
//!
//! Arguments (or their environment variables) override values from the TOML
//! bootstrap file, which in turn overrides built-in defaults.

use clap::Parser;
use lappi_common::config::{default_config_path, TomlConfig};
use std::path::PathBuf;

/// Command-line arguments for lappi-dispatch
#[derive(Parser, Debug, Clone)]
#[command(name = "lappi-dispatch")]
#[command(about = "JSON request dispatcher with pluggable artist exploring sources")]
#[command(version)]
pub struct Args {
    /// Path to the TOML bootstrap file
    #[arg(short, long, env = "LAPPI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[arg(long, env = "LAPPI_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "LAPPI_PORT")]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LAPPI_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    /// Bootstrap file to read: `--config` if given, else the platform default
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    /// Apply command-line overrides on top of `config`
    pub fn apply_overrides(&self, mut config: TomlConfig) -> TomlConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        config
    }
}
