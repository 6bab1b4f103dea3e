//! BFHL classification service.
//!
//! Serves `POST /bfhl`, which sorts an array of mixed values into odd
//! numbers, even numbers, alphabets and special characters.
//!
//! # Environment Variables
//!
//! See [`bfhl_classifier::config`] for the full list. Logging is controlled
//! by `RUST_LOG` (default: `bfhl_classifier=debug,tower_http=debug`) and
//! `LOG_FORMAT` (`pretty` or `json`).

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bfhl_classifier::api::{AppState, build_router};
use bfhl_classifier::config::{AppConfig, IdentityConfig, LogFormat};

const DEFAULT_LOG_FILTER: &str = "bfhl_classifier=debug,tower_http=debug";

fn main() {
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            init_tracing(LogFormat::default());
            tracing::error!(%error, "Configuration error");
            std::process::exit(1);
        }
    };

    init_tracing(config.server.log_format);

    if let Some(warning) = &config.server.worker_threads.warning {
        tracing::warn!("{warning}");
    }

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if let Some(threads) = config.server.worker_threads.count {
        builder.worker_threads(threads);
        tracing::info!(threads, "Tokio worker_threads configured");
    } else {
        tracing::info!("Tokio worker_threads: using default (logical CPU count)");
    }

    let runtime = match builder.build() {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(%error, "Failed to create tokio runtime");
            std::process::exit(1);
        }
    };

    runtime.block_on(async_main(config));
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn async_main(config: AppConfig) {
    tracing::info!("Starting BFHL classification service");

    if config.identity == IdentityConfig::default() {
        tracing::warn!("Using placeholder identity; set BFHL_* variables before deploying");
    }

    tracing::info!(
        user_id = %config.identity.user_id(),
        body_limit_bytes = config.server.body_limit_bytes,
        "Configuration loaded"
    );

    let address = match config.server.socket_addr() {
        Ok(address) => address,
        Err(error) => {
            tracing::error!(%error, "Invalid server address");
            std::process::exit(1);
        }
    };

    let application = build_router(
        AppState::new(config.identity),
        config.server.body_limit_bytes,
    );

    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", address);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

/// Completes on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
