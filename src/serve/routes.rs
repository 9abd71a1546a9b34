//! Web host routes

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use super::ServeState;
use crate::client::ClientConfig;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

/// GET /health
pub async fn health(State(state): State<Arc<ServeState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// GET /client-config.json
///
/// Only public values: base URLs and the OAuth client id.
pub async fn client_config(State(state): State<Arc<ServeState>>) -> Json<ClientConfig> {
    Json(state.client_config.clone())
}
