//! # Lappi Common Library
//!
//! Shared code for the Lappi request dispatcher:
//! - Error taxonomy surfaced to the HTTP boundary
//! - Key-value registry for runtime configuration values (API tokens)
//! - Bootstrap configuration loading (TOML + defaults)

pub mod config;
pub mod error;
pub mod registry;

pub use error::{Error, Result};
pub use registry::Registry;
