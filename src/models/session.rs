//! Active-session models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::reservation::Reservation;

// ---------------------------------------------------------------------------
// SessionKind
// ---------------------------------------------------------------------------

/// Session classification derived from the free-text class name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SessionKind {
    Group,
    SemiPrivate,
    Private,
    OpenGym,
    Other,
}

impl SessionKind {
    /// Classify a class name by keyword (Spanish labels from the booking system)
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("grupal") {
            SessionKind::Group
        } else if lower.contains("semiprivad") {
            SessionKind::SemiPrivate
        } else if lower.contains("privad") {
            SessionKind::Private
        } else if lower.contains("open gym") {
            SessionKind::OpenGym
        } else {
            SessionKind::Other
        }
    }

    /// Accent color the display uses for this session kind
    pub fn color(&self) -> &'static str {
        match self {
            SessionKind::Group => "#02b105",
            SessionKind::SemiPrivate => "#22c7dd",
            SessionKind::Private => "#dbbf0a",
            SessionKind::OpenGym => "#9333ea",
            SessionKind::Other => "#6366f1",
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SessionKind::Group => "Group",
            SessionKind::SemiPrivate => "Semi-Private",
            SessionKind::Private => "Private",
            SessionKind::OpenGym => "Open Gym",
            SessionKind::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ActiveSession
// ---------------------------------------------------------------------------

/// The class currently on the board, or the explicit no-session fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActiveSession {
    pub id: String,
    /// Display time range, e.g. "10:00 a 11:00"
    pub time: String,
    pub kind: SessionKind,
    pub class_name: String,
    pub capacity: i64,
    pub reservations_count: i64,
    pub color: String,
    pub reservations: Vec<Reservation>,
}

impl ActiveSession {
    /// The "Sin sesión activa" state shown between classes
    pub fn fallback(time: String) -> Self {
        Self {
            id: "empty".to_string(),
            time,
            kind: SessionKind::Other,
            class_name: "Sin sesión activa".to_string(),
            capacity: 0,
            reservations_count: 0,
            color: "#374151".to_string(),
            reservations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_keyword() {
        assert_eq!(SessionKind::from_label("Sesión grupal 6:00 am"), SessionKind::Group);
        assert_eq!(SessionKind::from_label("Semiprivada tarde"), SessionKind::SemiPrivate);
        assert_eq!(SessionKind::from_label("Privada con Hari"), SessionKind::Private);
        assert_eq!(SessionKind::from_label("OPEN GYM"), SessionKind::OpenGym);
        assert_eq!(SessionKind::from_label("Yoga"), SessionKind::Other);
    }

    #[test]
    fn semiprivate_wins_over_private_substring() {
        // "semiprivada" contains "privad"; the more specific match must apply
        assert_eq!(SessionKind::from_label("semiprivada"), SessionKind::SemiPrivate);
    }
}
