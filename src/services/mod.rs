//! Business logic services

pub mod carousel;
pub mod display;

use std::sync::Arc;

use crate::carousel::CarouselEngine;
use crate::config::AppConfig;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub carousel: carousel::CarouselService,
    pub display: Arc<display::DisplayService>,
}

impl Services {
    /// Create all services around a shared rotation engine
    pub fn new(engine: CarouselEngine, config: &AppConfig) -> Self {
        Self {
            carousel: carousel::CarouselService::new(engine),
            display: Arc::new(display::DisplayService::new(config.display.clone())),
        }
    }
}
