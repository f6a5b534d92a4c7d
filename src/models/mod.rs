//! Data models for the Tavros signage server

pub mod gallery;
pub mod reservation;
pub mod schedule;
pub mod session;
pub mod slide;

// Re-export commonly used types
pub use gallery::GalleryImage;
pub use reservation::{CheckinClasses, CheckinDay, ClassEntry, Reservation};
pub use schedule::{ScheduleEntry, WorkoutKind};
pub use session::{ActiveSession, SessionKind};
pub use slide::{Slide, SlideKind, SlideRow};
