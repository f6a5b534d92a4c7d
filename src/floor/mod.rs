//! Floor-plan logic
//!
//! Pure functions that turn a reservation snapshot into the platform board:
//! timestamp ranking, platform assignment and display-label shaping. No I/O
//! and no clocks beyond the injected calendar year.

pub mod assign;
pub mod label;
pub mod timestamp;

pub use assign::{assign_platforms, TOTAL_PLATFORMS};
pub use label::{plan_display, truncate_name, NAME_MAX_LEN, NAME_MAX_LEN_LARGE};
pub use timestamp::creation_rank;
