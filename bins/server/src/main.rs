//! Rollcall API Server
//!
//! Main entry point for the attendance ledger service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rollcall_api::{AppState, RouterOptions, create_router};
use rollcall_db::{LedgerRepository, connect};
use rollcall_shared::{AppConfig, IdentityGate};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rollcall=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = dotenv {
        info!(reason = %e, "No .env file loaded");
    }

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = connect(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let state = AppState::new(
        Arc::new(LedgerRepository::new(db)),
        IdentityGate::new(&config.jwt.secret),
    );

    let options = RouterOptions {
        require_token: config.auth.require_token,
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
    };
    if !options.require_token {
        warn!("Bearer authentication is disabled for /api routes");
    }

    let app = create_router(state, &options);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
