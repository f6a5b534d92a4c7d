//! Static content endpoints
//!
//! Gallery images and the weekly schedule ship with the build; these
//! endpoints expose them so every display client renders the same catalog.

use axum::Json;

use crate::models::gallery::{gallery_manifest, GalleryImage};
use crate::models::schedule::{weekly_schedule, ScheduleEntry};

/// Get the gallery image catalog
#[utoipa::path(
    get,
    path = "/gallery",
    tag = "content",
    responses(
        (status = 200, description = "Gallery images in display order", body = Vec<GalleryImage>)
    )
)]
pub async fn list_gallery() -> Json<Vec<GalleryImage>> {
    Json(gallery_manifest())
}

/// Get the weekly class schedule
#[utoipa::path(
    get,
    path = "/schedule",
    tag = "content",
    responses(
        (status = 200, description = "Weekly schedule entries", body = Vec<ScheduleEntry>)
    )
)]
pub async fn list_schedule() -> Json<Vec<ScheduleEntry>> {
    Json(weekly_schedule())
}
