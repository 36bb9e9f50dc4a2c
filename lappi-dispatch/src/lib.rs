//! lappi-dispatch library interface
//!
//! Exposes the dispatch core, built-in handlers, exploring sources and the
//! HTTP router so integration tests can drive them directly.

pub mod api;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod exploring;
pub mod handlers;

pub use crate::dispatch::{handler_fn, Dispatcher, Handler, HandlerResponse};
pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use lappi_common::config::ExploringConfig;
use lappi_common::Registry;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::exploring::SourceProvider;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Runtime key-value registry (credentials)
    pub registry: Arc<Registry>,
    /// Dispatch key → handler table
    pub dispatcher: Arc<Dispatcher>,
    /// Exploring source factories
    pub sources: Arc<SourceProvider>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Build the full service state
    ///
    /// Initialization order: registry, then source provider (its factories
    /// capture the registry), then dispatcher with the built-in handlers.
    pub fn new(exploring: ExploringConfig) -> Self {
        let registry = Arc::new(Registry::new());
        let sources = Arc::new(SourceProvider::with_default_sources(
            Arc::clone(&registry),
            exploring,
        ));
        let dispatcher = Dispatcher::new();
        handlers::install_builtin_handlers(
            &dispatcher,
            Arc::clone(&registry),
            Arc::clone(&sources),
        );

        Self::from_parts(registry, Arc::new(dispatcher), sources)
    }

    /// Assemble state from pre-built components
    pub fn from_parts(
        registry: Arc<Registry>,
        dispatcher: Arc<Dispatcher>,
        sources: Arc<SourceProvider>,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            sources,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::request_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
