//! Elimination orchestrator binary: runs the round loop against the ledger and serves the REST API.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use elimination_orchestrator::{
    config::AppConfig,
    ledger::aptos::{AptosConfig, AptosLedgerClient},
    orchestrator::{Orchestrator, clock::SystemClock},
    routes,
    state::{AppState, SharedState},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let ledger_config = AptosConfig::from_env().context("loading ledger configuration")?;
    info!(
        node = %ledger_config.node_url,
        contract = %ledger_config.contract_address,
        "ledger configured"
    );
    let ledger = AptosLedgerClient::new(ledger_config).context("building ledger client")?;

    let port = config.port;
    let app_state = AppState::new(config, Arc::new(ledger), Arc::new(SystemClock));

    tokio::spawn(Orchestrator::new(app_state.clone()).run());
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
