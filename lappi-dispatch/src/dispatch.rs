//! Dispatch core: maps request keys to handlers
//!
//! Handlers are registered at startup (or later) under string keys and are
//! opaque to the core, which does no payload validation. Registration takes
//! the write lock; dispatch takes the read lock only long enough to clone the
//! handler out, so a slow handler never blocks registration or other requests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use lappi_common::{Error, Result};
use parking_lot::RwLock;
use serde_json::{json, Value};
use tracing::debug;

/// Result of a handler invocation
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResponse {
    /// Handler produced a payload
    Data(Value),
    /// Handler produced nothing
    Empty,
}

impl HandlerResponse {
    /// Wire form: the payload itself, or `{"empty_response": true}`
    ///
    /// A `Data(Value::Null)` payload is sent as the empty sentinel, so a
    /// successful response never carries `"data": null`.
    pub fn into_value(self) -> Value {
        match self {
            HandlerResponse::Data(Value::Null) | HandlerResponse::Empty => {
                json!({ "empty_response": true })
            }
            HandlerResponse::Data(value) => value,
        }
    }
}

impl From<Value> for HandlerResponse {
    fn from(value: Value) -> Self {
        HandlerResponse::Data(value)
    }
}

/// A function bound to a dispatch key
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, payload: Value) -> Result<HandlerResponse>;
}

struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HandlerResponse>> + Send + 'static,
{
    async fn handle(&self, payload: Value) -> Result<HandlerResponse> {
        (self.0)(payload).await
    }
}

/// Wrap an async closure as a handler
///
/// ```rust,ignore
/// dispatcher.register_handler("ping", handler_fn(|_| async {
///     Ok(HandlerResponse::Data(json!("pong")))
/// }));
/// ```
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn Handler>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HandlerResponse>> + Send + 'static,
{
    Arc::new(FnHandler(f))
}

/// Handler table keyed by dispatch key
#[derive(Default)]
pub struct Dispatcher {
    handlers: RwLock<HashMap<String, Arc<dyn Handler>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `key`, replacing any previous registration
    pub fn register_handler(&self, key: impl Into<String>, handler: Arc<dyn Handler>) {
        let key = key.into();
        debug!(key = %key, "Handler registered");
        self.handlers.write().insert(key, handler);
    }

    /// Invoke the handler bound to `key` with `payload`
    ///
    /// # Errors
    /// `Error::UnknownHandler` if nothing is registered under `key`; otherwise
    /// whatever the handler returns.
    pub async fn dispatch(&self, key: &str, payload: Value) -> Result<HandlerResponse> {
        let handler = self
            .lookup(key)
            .ok_or_else(|| Error::UnknownHandler(key.to_string()))?;

        debug!(key = %key, "Dispatching request");
        handler.handle(payload).await
    }

    fn lookup(&self, key: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.read().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.read().contains_key(key)
    }

    /// Registered keys, sorted
    pub fn handler_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.handlers.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}
