//! Slide deck endpoint

use axum::{extract::State, Json};

use crate::models::Slide;
use crate::AppState;

/// Get the slide deck currently in rotation
#[utoipa::path(
    get,
    path = "/slides",
    tag = "slides",
    responses(
        (status = 200, description = "Slides in rotation order", body = Vec<Slide>)
    )
)]
pub async fn list_slides(State(state): State<AppState>) -> Json<Vec<Slide>> {
    Json(state.services.carousel.deck())
}
