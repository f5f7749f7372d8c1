pub mod accounts;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::AppState;
use crate::ports::LedgerStore;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub ledger: String,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let ledger_status = match state.ledger.ping().await {
        Ok(()) => "connected",
        Err(_) => "disconnected",
    };

    let health_response = HealthStatus {
        status: if ledger_status == "connected" {
            "healthy".to_string()
        } else {
            "unhealthy".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        ledger: ledger_status.to_string(),
    };

    let status_code = if ledger_status == "connected" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_response))
}
