//! Carousel slide models and duration resolution

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

/// Minimum slide duration. Prevents a pathological near-zero duration from
/// causing a rapid-fire advance loop.
pub const MIN_SLIDE_MS: u64 = 1_000;

/// Duration applied when the sheet gives none (overridable via config)
pub const DEFAULT_SLIDE_MS: u64 = 10_000;

// ---------------------------------------------------------------------------
// SlideKind
// ---------------------------------------------------------------------------

/// Content kind of a carousel slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Table,
    Video,
    Gallery,
}

impl SlideKind {
    /// Parse a sheet cell into a kind; anything unrecognized is not renderable
    pub fn from_raw(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Some(SlideKind::Table),
            "video" => Some(SlideKind::Video),
            "gallery" => Some(SlideKind::Gallery),
            _ => None,
        }
    }
}

impl std::fmt::Display for SlideKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SlideKind::Table => "table",
            SlideKind::Video => "video",
            SlideKind::Gallery => "gallery",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// SlideRow / DurationValue
// ---------------------------------------------------------------------------

/// A sheet duration cell: a number, or whatever text ended up in the cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(f64),
    Text(String),
}

/// One raw row of the published carousel sheet.
///
/// Everything is optional: the sheet is hand-edited and rows arrive with
/// blank cells, junk ids, or durations typed as text.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SlideRow {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "youtubeLink")]
    pub youtube_link: Option<String>,
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: Option<DurationValue>,
}

/// Resolve a raw sheet duration to display milliseconds.
///
/// Absent, null, zero, negative, NaN and non-numeric text all fall back to
/// `default_ms`; the result is floored at [`MIN_SLIDE_MS`].
pub fn resolve_duration_ms(raw: Option<&DurationValue>, default_ms: u64) -> u64 {
    let seconds = match raw {
        Some(DurationValue::Seconds(n)) if n.is_finite() => *n,
        Some(DurationValue::Seconds(_)) => 0.0,
        Some(DurationValue::Text(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        None => 0.0,
    };

    let ms = if seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        default_ms
    };

    ms.max(MIN_SLIDE_MS)
}

// ---------------------------------------------------------------------------
// Slide
// ---------------------------------------------------------------------------

/// A resolved deck entry: filtered, id-assigned, duration-normalized
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Slide {
    pub id: i64,
    pub kind: SlideKind,
    pub title: String,
    pub description: String,
    /// Only present for video slides; a video without one renders as unavailable
    pub youtube_link: Option<String>,
    /// Resolved display duration in milliseconds
    pub duration_ms: u64,
}
