//! Display rotation endpoints
//!
//! `GET /display` returns the frame the screen should be showing right now.
//! `GET /display/events` pushes the same frame over SSE whenever it changes,
//! so clients do not have to poll between transitions. The POST endpoints
//! drive manual navigation from the remote control page.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use serde::Deserialize;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use utoipa::ToSchema;

use crate::carousel::DisplayFrame;
use crate::AppState;

/// Request to jump to a specific slide
#[derive(Deserialize, ToSchema)]
pub struct JumpRequest {
    /// Target slide index; values outside the deck are clamped
    pub index: i64,
}

/// Get the current display frame
#[utoipa::path(
    get,
    path = "/display",
    tag = "display",
    responses(
        (status = 200, description = "Current display frame", body = DisplayFrame)
    )
)]
pub async fn get_frame(State(state): State<AppState>) -> Json<DisplayFrame> {
    Json(state.services.carousel.frame())
}

/// Advance to the next slide
#[utoipa::path(
    post,
    path = "/display/next",
    tag = "display",
    responses(
        (status = 200, description = "Frame after advancing", body = DisplayFrame)
    )
)]
pub async fn next_slide(State(state): State<AppState>) -> Json<DisplayFrame> {
    Json(state.services.carousel.next())
}

/// Go back to the previous slide
#[utoipa::path(
    post,
    path = "/display/previous",
    tag = "display",
    responses(
        (status = 200, description = "Frame after going back", body = DisplayFrame)
    )
)]
pub async fn previous_slide(State(state): State<AppState>) -> Json<DisplayFrame> {
    Json(state.services.carousel.previous())
}

/// Jump to a specific slide
#[utoipa::path(
    post,
    path = "/display/jump",
    tag = "display",
    request_body = JumpRequest,
    responses(
        (status = 200, description = "Frame after jumping", body = DisplayFrame)
    )
)]
pub async fn jump_to_slide(
    State(state): State<AppState>,
    Json(request): Json<JumpRequest>,
) -> Json<DisplayFrame> {
    Json(state.services.carousel.jump_to(request.index))
}

/// Stream display frames over server-sent events
///
/// The current frame is sent immediately on connect, then again on every
/// change. Refetches that leave the deck identical produce no event.
#[utoipa::path(
    get,
    path = "/display/events",
    tag = "display",
    responses(
        (status = 200, description = "SSE stream of display frames")
    )
)]
pub async fn frame_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let frames = WatchStream::new(state.services.carousel.subscribe());
    let stream = frames.map(|frame| {
        let event = Event::default().event("frame");
        Ok(match event.json_data(&frame) {
            Ok(event) => event,
            // Serialization of DisplayFrame cannot fail; keep the stream
            // alive if it ever does.
            Err(_) => Event::default().event("frame").data("{}"),
        })
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
