//! Slide rotation: deck construction and the advance engine

pub mod deck;
pub mod engine;

pub use deck::build_deck;
pub use engine::{CarouselEngine, DisplayFrame};
