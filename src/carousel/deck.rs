//! Deck construction from raw sheet rows
//!
//! The published sheet is hand-edited, so rows are taken defensively: a row
//! with an unrecognized kind is dropped before the engine ever sees it,
//! missing ids fall back to the row's position, and durations are resolved
//! to bounded milliseconds here so the engine only deals in final values.

use crate::models::slide::{resolve_duration_ms, Slide, SlideKind, SlideRow};

/// Build the rotation deck from sheet rows.
///
/// `default_duration_ms` fills rows without a usable duration. Video rows
/// without a link are kept; the display renders them as unavailable rather
/// than silently skipping deck positions.
pub fn build_deck(rows: &[SlideRow], default_duration_ms: u64) -> Vec<Slide> {
    rows.iter()
        .enumerate()
        .filter_map(|(position, row)| {
            let kind = SlideKind::from_raw(row.kind.as_deref().unwrap_or(""))?;

            let id = row
                .id
                .as_deref()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .unwrap_or((position + 1) as i64);

            Some(Slide {
                id,
                kind,
                title: row.title.clone().unwrap_or_default(),
                description: row.description.clone().unwrap_or_default(),
                youtube_link: row.youtube_link.clone().filter(|s| !s.is_empty()),
                duration_ms: resolve_duration_ms(row.duration_seconds.as_ref(), default_duration_ms),
            })
        })
        .collect()
}
