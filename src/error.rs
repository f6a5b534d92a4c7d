//! Error types for the Tavros signage server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Feed decode error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Feed format error: {0}")]
    Feed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {:?}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream",
                    "Upstream feed unavailable".to_string(),
                )
            }
            AppError::Csv(e) => {
                tracing::error!("CSV decode error: {:?}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Feed",
                    "Upstream feed returned malformed data".to_string(),
                )
            }
            AppError::Feed(msg) => (StatusCode::BAD_GATEWAY, "Feed", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NotFound", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BadRequest", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
