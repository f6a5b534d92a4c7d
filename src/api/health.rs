//! Health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::services::display::CheckinStatus;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    pub status: String,
    pub version: String,
    /// False while the first sheet fetch is still outstanding
    pub deck_loaded: bool,
    /// Slides currently in rotation
    pub deck_size: usize,
    /// Check-in feed freshness
    pub checkin: CheckinStatus,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint (reports upstream feed freshness)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadyResponse> {
    let frame = state.services.carousel.frame();
    Json(ReadyResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        deck_loaded: !frame.loading,
        deck_size: frame.total,
        checkin: state.services.display.checkin_status(),
    })
}
