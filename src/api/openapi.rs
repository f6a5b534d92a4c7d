//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{content, display, floor, health, slides};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tavros Signage API",
        version = "1.0.0",
        description = "Gym floor digital signage server REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Tavros Training Club")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Display rotation
        display::get_frame,
        display::next_slide,
        display::previous_slide,
        display::jump_to_slide,
        display::frame_events,
        // Slides
        slides::list_slides,
        // Floor
        floor::get_session,
        floor::get_platforms,
        // Static content
        content::list_gallery,
        content::list_schedule,
    ),
    components(
        schemas(
            // Display rotation
            crate::carousel::DisplayFrame,
            display::JumpRequest,
            // Slides
            crate::models::slide::Slide,
            crate::models::slide::SlideKind,
            // Floor
            crate::models::session::ActiveSession,
            crate::models::session::SessionKind,
            crate::models::reservation::Reservation,
            crate::services::display::PlatformSlot,
            crate::services::display::CheckinStatus,
            // Static content
            crate::models::gallery::GalleryImage,
            crate::models::schedule::ScheduleEntry,
            crate::models::schedule::WorkoutKind,
            // Health
            health::HealthResponse,
            health::ReadyResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "display", description = "Display rotation state and navigation"),
        (name = "slides", description = "Slide deck"),
        (name = "floor", description = "Active session and platform assignments"),
        (name = "content", description = "Built-in gallery and schedule content")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
