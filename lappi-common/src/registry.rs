//! Key-value registry for runtime configuration values
//!
//! Holds values such as API tokens under dotted keys
//! (e.g. `exploring.sources.discogs.user_token`). Values live for the
//! process lifetime only; last write wins and reading an absent key is an
//! error rather than a default.
//!
//! Shared between concurrent requests behind an `Arc`. Reads take a shared
//! lock, writes an exclusive one, and no lock outlives a method call.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::{Error, Result};

/// Process-wide key-value store
#[derive(Debug, Default)]
pub struct Registry {
    values: RwLock<HashMap<String, Value>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        debug!(key = %key, "Registry value set");
        self.values.write().insert(key, value);
    }

    /// Get a clone of the value stored under `key`
    pub fn get(&self, key: &str) -> Result<Value> {
        self.values
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }

    /// Get a string value; non-string values are a configuration error
    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.get(key)? {
            Value::String(s) => Ok(s),
            other => Err(Error::Config(format!(
                "Registry key '{}' must hold a string, found {}",
                key,
                value_kind(&other)
            ))),
        }
    }

    /// Apply `set` for every entry, in iteration order
    ///
    /// No transactional guarantee: entries already applied stay applied.
    pub fn set_many<I, K>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
