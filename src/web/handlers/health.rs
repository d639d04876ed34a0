//! Health check HTTP handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::web::AppState;
use crate::web::responses::HealthResponse;

/// Application health including database connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Health status", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.database.ping().await;
    Json(HealthResponse {
        status: if connected { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    })
}

/// Ready once the database answers
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to serve traffic"),
        (status = 503, description = "Database unavailable"),
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    if state.database.ping().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}
