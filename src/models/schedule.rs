//! Weekly schedule shown on table slides when no live session data applies

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

/// Workout category on the printed schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum WorkoutKind {
    GroupClass,
    Private,
    OpenGym,
}

impl std::fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            WorkoutKind::GroupClass => "Group class",
            WorkoutKind::Private => "Private",
            WorkoutKind::OpenGym => "Open Gym",
        };
        write!(f, "{}", label)
    }
}

/// One row of the weekly schedule
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleEntry {
    pub id: i64,
    pub workout_kind: WorkoutKind,
    /// Start time ("07:00") or range ("13:00-17:00") as printed
    pub workout_time: String,
    pub coach: Option<String>,
}

/// The compiled-in weekly schedule
pub fn weekly_schedule() -> Vec<ScheduleEntry> {
    fn entry(id: i64, kind: WorkoutKind, time: &str, coach: Option<&str>) -> ScheduleEntry {
        ScheduleEntry {
            id,
            workout_kind: kind,
            workout_time: time.to_string(),
            coach: coach.map(str::to_string),
        }
    }

    vec![
        // Morning classes
        entry(2, WorkoutKind::GroupClass, "07:00", Some("Hari")),
        entry(3, WorkoutKind::GroupClass, "09:00", Some("Cesar")),
        entry(4, WorkoutKind::GroupClass, "10:00", Some("Carlos")),
        entry(5, WorkoutKind::Private, "11:00", Some("Hari")),
        // Open gym block
        entry(7, WorkoutKind::OpenGym, "13:00-17:00", None),
        // Evening classes
        entry(12, WorkoutKind::GroupClass, "18:00", Some("Carlos")),
        entry(13, WorkoutKind::GroupClass, "19:00", Some("Cesar")),
        entry(14, WorkoutKind::GroupClass, "20:00", Some("Hari")),
        entry(15, WorkoutKind::GroupClass, "21:00", Some("Carlos")),
        entry(16, WorkoutKind::GroupClass, "22:00", Some("Cesar")),
    ]
}
