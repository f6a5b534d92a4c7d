//! API handlers for Tavros signage REST endpoints

pub mod content;
pub mod display;
pub mod floor;
pub mod health;
pub mod openapi;
pub mod slides;
