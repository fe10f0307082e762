use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::Json;
use axum::Router;
use axum::routing::get;
use common::models::SignalRecord;
use serde::Serialize;
use strategy::SignalService;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone)]
struct AppState {
    service: Arc<SignalService>,
}

#[derive(Serialize)]
struct Status {
    message: &'static str,
}

async fn home() -> Json<Status> {
    Json(Status {
        message: "Forex Trading Signal API is Running!",
    })
}

/// GET /api/get-trading-signals recomputes every signal from fresh quotes.
async fn get_trading_signals(State(state): State<AppState>) -> Json<Vec<SignalRecord>> {
    Json(state.service.generate_signals().await)
}

pub fn router(service: Arc<SignalService>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/get-trading-signals", get(get_trading_signals))
        .with_state(AppState { service })
}

/// Binds `host` as given, so host names and bare IPv6 literals both work.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("cannot bind {} on port {}", host, port))
}

pub async fn run(service: Arc<SignalService>, listener: TcpListener) -> Result<()> {
    info!("HTTP server running on {}", listener.local_addr()?);
    axum::serve(listener, router(service)).await?;
    Ok(())
}
