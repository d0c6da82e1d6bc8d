//! `GET /health` handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub ledger: &'static str,
}

/// 200 while the ledger RPC answers its health probe, 503 otherwise.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let ledger_healthy = state.service.ledger().is_healthy().await;

    let (code, status, ledger) = if ledger_healthy {
        (StatusCode::OK, "ok", "reachable")
    } else {
        tracing::warn!("Health probe: ledger RPC unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
    };

    (
        code,
        Json(HealthStatus {
            status,
            version: env!("CARGO_PKG_VERSION"),
            ledger,
        }),
    )
}
