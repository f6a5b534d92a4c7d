//! Carousel service

use tokio::sync::watch;

use crate::carousel::{CarouselEngine, DisplayFrame};
use crate::models::Slide;

/// Facade over the rotation engine for API handlers. All operations are
/// infallible: navigation on an empty deck is a no-op that returns the
/// current frame.
#[derive(Clone)]
pub struct CarouselService {
    engine: CarouselEngine,
}

impl CarouselService {
    pub fn new(engine: CarouselEngine) -> Self {
        Self { engine }
    }

    pub fn frame(&self) -> DisplayFrame {
        self.engine.current_frame()
    }

    pub fn next(&self) -> DisplayFrame {
        self.engine.next()
    }

    pub fn previous(&self) -> DisplayFrame {
        self.engine.previous()
    }

    pub fn jump_to(&self, index: i64) -> DisplayFrame {
        self.engine.jump_to(index)
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayFrame> {
        self.engine.subscribe()
    }

    pub fn deck(&self) -> Vec<Slide> {
        self.engine.deck()
    }
}
