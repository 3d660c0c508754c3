use std::net::SocketAddr;

use axum::{Json, extract::ConnectInfo};
use http::StatusCode;
use jiff::Timestamp;

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum HealthState {
    /// Indicates that the server is healthy and operational.
    Healthy,
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct HealthResponse {
    status: HealthState,
    timestamp: Timestamp,
}

/// Handles health check requests. No dependency is checked, so this never fails.
pub(crate) async fn health(ConnectInfo(client): ConnectInfo<SocketAddr>) -> (StatusCode, Json<HealthResponse>) {
    log::info!("• HEALTH CHECK - Client: {}", client.ip());

    let response = HealthResponse {
        status: HealthState::Healthy,
        timestamp: Timestamp::now(),
    };

    (StatusCode::OK, Json(response))
}
