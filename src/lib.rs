//! Tavros Signage Server
//!
//! Backend for the gym floor display at Tavros Training Club: rotates a
//! sheet-driven slide deck, tracks the active session from the check-in feed
//! and assigns athletes to the ten lifting platforms, serving it all over a
//! REST JSON API with server-sent frame events.

use std::sync::Arc;

pub mod api;
pub mod carousel;
pub mod config;
pub mod error;
pub mod feed;
pub mod floor;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
