//! Gym floor endpoints
//!
//! The table slide renders from these: the session active right now and the
//! ten platforms with the athletes assigned to them.

use axum::{extract::Query, extract::State, Json};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::models::ActiveSession;
use crate::services::display::PlatformSlot;
use crate::AppState;

/// Query parameters for the platform board
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PlatformsQuery {
    /// Use the wider name budget of full-screen table layouts
    #[serde(default)]
    pub large: bool,
}

/// Get the session active at the gym right now
#[utoipa::path(
    get,
    path = "/floor/session",
    tag = "floor",
    responses(
        (status = 200, description = "Currently active session", body = ActiveSession)
    )
)]
pub async fn get_session(State(state): State<AppState>) -> Json<ActiveSession> {
    Json(state.services.display.active_session())
}

/// Get the platform board for the active session
#[utoipa::path(
    get,
    path = "/floor/platforms",
    tag = "floor",
    params(PlatformsQuery),
    responses(
        (status = 200, description = "All platforms with their assigned athletes", body = Vec<PlatformSlot>)
    )
)]
pub async fn get_platforms(
    State(state): State<AppState>,
    Query(query): Query<PlatformsQuery>,
) -> Json<Vec<PlatformSlot>> {
    Json(state.services.display.platform_board(query.large))
}
