//! Factory registry for exploring sources

use std::collections::HashMap;
use std::sync::Arc;

use lappi_common::config::ExploringConfig;
use lappi_common::{Error, Registry, Result};
use parking_lot::RwLock;
use tracing::debug;

use super::{chatgpt, discogs, ChatGptSource, DiscogsSource, ExploringSource};

/// Zero-argument constructor for a source
///
/// Anything the source needs (registry, HTTP settings) is captured when the
/// factory is registered.
pub type SourceFactory = Arc<dyn Fn() -> Result<Box<dyn ExploringSource>> + Send + Sync>;

/// Maps source names to factories
#[derive(Default)]
pub struct SourceProvider {
    factories: RwLock<HashMap<String, SourceFactory>>,
}

impl SourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider with the built-in sources registered
    ///
    /// The registry must already exist: factories read credentials from it
    /// each time a source is created.
    pub fn with_default_sources(registry: Arc<Registry>, config: ExploringConfig) -> Self {
        let provider = Self::new();

        let discogs_registry = Arc::clone(&registry);
        let discogs_config = config.clone();
        provider.register(discogs::SOURCE_NAME, move || {
            let source = DiscogsSource::from_registry(&discogs_registry, &discogs_config)?;
            Ok(Box::new(source) as Box<dyn ExploringSource>)
        });

        provider.register(chatgpt::SOURCE_NAME, move || {
            let source = ChatGptSource::from_registry(&registry, &config)?;
            Ok(Box::new(source) as Box<dyn ExploringSource>)
        });

        provider
    }

    /// Associate `source_name` with `factory`, replacing any previous factory
    pub fn register<F>(&self, source_name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Box<dyn ExploringSource>> + Send + Sync + 'static,
    {
        let source_name = source_name.into();
        debug!(source = %source_name, "Exploring source registered");
        self.factories.write().insert(source_name, Arc::new(factory));
    }

    /// Construct a new instance of `source_name`
    ///
    /// # Errors
    /// `Error::UnknownSource` for unregistered names; factory failures
    /// (typically `Error::Config` for a missing credential) pass through.
    pub fn create(&self, source_name: &str) -> Result<Box<dyn ExploringSource>> {
        let factory = self
            .factories
            .read()
            .get(source_name)
            .cloned()
            .ok_or_else(|| Error::UnknownSource(source_name.to_string()))?;

        factory()
    }

    /// Registered source names, sorted
    pub fn source_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }
}
