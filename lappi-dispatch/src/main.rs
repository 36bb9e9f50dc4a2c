//! lappi-dispatch - JSON request dispatcher
//!
//! Serves `POST /make_request?key=<dispatch key>` and routes each request to
//! a registered handler. Exploring-source credentials are supplied at runtime
//! through the `registry.set_values` handler.

use anyhow::{Context, Result};
use clap::Parser;
use lappi_common::config::TomlConfig;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lappi_dispatch::cli::Args;
use lappi_dispatch::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Read bootstrap config before tracing so the configured level applies;
    // the outcome is logged once the subscriber is up.
    let config_path = args.config_path();
    let file_config = TomlConfig::load(&config_path)
        .with_context(|| format!("Failed to load config file {}", config_path.display()))?;
    let config_found = file_config.is_some();
    let config = args.apply_overrides(file_config.unwrap_or_default());

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!("{},tower_http=info", config.logging.level))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting lappi-dispatch v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("LAPPI_GIT_HASH"),
        env!("LAPPI_BUILD_TIMESTAMP"),
        env!("LAPPI_BUILD_PROFILE")
    );
    if config_found {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!(
            "Config file not found at {}, using built-in defaults",
            config_path.display()
        );
    }
    info!(
        "Outbound request timeout: {}s",
        config.exploring.request_timeout_secs
    );

    let state = AppState::new(config.exploring.clone());
    info!("Handlers: {}", state.dispatcher.handler_keys().join(", "));
    info!("Exploring sources: {}", state.sources.source_names().join(", "));

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
