//! Main entry point for the back-office console.
//!
//! This file initializes logging and configuration, opens the session
//! storage, builds the axum router, and serves it until interrupted.

use anyhow::Context;
use backoffice::auth::RemoteAuthenticator;
use backoffice::config::ConsoleConfig;
use backoffice::{build_router, open_storage, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ConsoleConfig::from_env().context("reading configuration")?;
    init_tracing(config.log_json);

    let storage = open_storage(&config).context("opening session storage")?;
    let authenticator = RemoteAuthenticator::new(config.login_url(), config.api_timeout)
        .context("building login client")?;
    tracing::info!(login_url = authenticator.login_url(), "using remote login backend");

    let addr = config.bind_addr;
    let state = AppState::new(config, storage, Arc::new(authenticator))
        .context("building console shell")?;
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
