//! Floor display service
//!
//! Holds the latest check-in snapshot and combines it with the wall clock
//! and the platform rules into what the floor screen shows: which session is
//! running right now and who is on which platform. Session matching mirrors
//! the booking system's sloppy data: newer scrapes carry a "HH:MM a HH:MM"
//! range in the class key, older ones only a "H:MM am" time inside the class
//! name, and some days have a single unlabeled class.

use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::DisplayConfig;
use crate::floor::{
    assign_platforms, plan_display, truncate_name, NAME_MAX_LEN, NAME_MAX_LEN_LARGE,
    TOTAL_PLATFORMS,
};
use crate::models::{ActiveSession, CheckinDay, ClassEntry, Reservation, SessionKind};

/// "06:00 a 07:00" ranges embedded in class keys
static KEY_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2})\s*a\s*(\d{1,2}):(\d{2})").unwrap());

/// "6:00 am" / "12:30 pm" times embedded in class names
static NAME_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2})\s*([ap]m)").unwrap());

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Freshness report for the check-in feed, served under /ready
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckinStatus {
    /// Whether a snapshot is held at all (false until the first success)
    pub available: bool,
    /// Whether the held snapshot has classes (a scraped day can be empty)
    pub has_classes: bool,
    /// Gym-local date the snapshot covers
    pub date: Option<NaiveDate>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub age_secs: Option<i64>,
}

#[derive(Default)]
struct CheckinSnapshot {
    day: Option<CheckinDay>,
    date: Option<NaiveDate>,
    fetched_at: Option<DateTime<Utc>>,
}

pub struct DisplayService {
    config: DisplayConfig,
    checkin: RwLock<CheckinSnapshot>,
}

impl DisplayService {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            checkin: RwLock::new(CheckinSnapshot::default()),
        }
    }

    /// Store the result of a successful check-in fetch. `None` is a real
    /// result too: the scraper answered and has nothing for this day.
    pub fn store_checkin(&self, date: NaiveDate, day: Option<CheckinDay>) {
        let mut snapshot = match self.checkin.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        snapshot.day = day;
        snapshot.date = Some(date);
        snapshot.fetched_at = Some(Utc::now());
    }

    pub fn checkin_status(&self) -> CheckinStatus {
        let snapshot = self.read_snapshot();
        let fetched_at = snapshot.fetched_at;
        CheckinStatus {
            available: fetched_at.is_some(),
            has_classes: snapshot
                .day
                .as_ref()
                .map(|d| !d.data.classes.is_empty())
                .unwrap_or(false),
            date: snapshot.date,
            fetched_at,
            age_secs: fetched_at.map(|t| (Utc::now() - t).num_seconds()),
        }
    }

    /// The session running right now on the gym clock.
    pub fn active_session(&self) -> ActiveSession {
        let snapshot = self.read_snapshot();
        session_for(snapshot.day.as_ref(), self.now_minutes())
    }

    /// The platform board for the current session. `large` selects the
    /// longer name budget of the big hall screen.
    pub fn platform_board(&self, large: bool) -> Vec<PlatformSlot> {
        let session = self.active_session();
        board_for(&session, large)
    }

    fn read_snapshot(&self) -> std::sync::RwLockReadGuard<'_, CheckinSnapshot> {
        match self.checkin.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Minutes since midnight on the gym floor. The feed keys sessions by
    /// local time, so the configured offset matters around midnight UTC.
    fn now_minutes(&self) -> u32 {
        let local = Utc::now() + chrono::Duration::hours(i64::from(self.config.utc_offset_hours));
        local.hour() * 60 + local.minute()
    }
}

// ---------------------------------------------------------------------------
// Session selection
// ---------------------------------------------------------------------------

/// Resolve the active session from a day snapshot at `now_minutes` past
/// gym-local midnight.
pub fn session_for(day: Option<&CheckinDay>, now_minutes: u32) -> ActiveSession {
    let Some(day) = day else {
        return ActiveSession::fallback(hour_window_label(now_minutes));
    };

    match select_class(&day.data.classes, now_minutes) {
        Some((key, entry, time)) => {
            let label = entry
                .class_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| key.clone());
            let kind = SessionKind::from_label(&label);
            ActiveSession {
                id: key.clone(),
                time,
                kind,
                class_name: label,
                capacity: entry.limite,
                reservations_count: entry
                    .total_reservations
                    .unwrap_or(entry.reservations.len() as i64),
                color: kind.color().to_string(),
                reservations: entry.reservations.clone(),
            }
        }
        None => ActiveSession::fallback(hour_window_label(now_minutes)),
    }
}

/// Pick the class covering `now_minutes`, trying the key range first, then a
/// time inside the class name, then the single-class day. Returns the class
/// plus its display time label.
fn select_class(
    classes: &IndexMap<String, ClassEntry>,
    now_minutes: u32,
) -> Option<(&String, &ClassEntry, String)> {
    for (key, entry) in classes {
        if let Some((start, end)) = key_range(key) {
            if window_contains(now_minutes, start, end) {
                return Some((key, entry, range_label(start, end)));
            }
        }
    }

    for (key, entry) in classes {
        let name = entry.class_name.as_deref().unwrap_or("");
        if let Some(start) = name_time(name) {
            let end = (start + 60) % (24 * 60);
            if window_contains(now_minutes, start, end) {
                return Some((key, entry, range_label(start, end)));
            }
        }
    }

    if classes.len() == 1 {
        return classes
            .iter()
            .next()
            .map(|(key, entry)| (key, entry, hour_window_label(now_minutes)));
    }
    None
}

/// Extract the "HH:MM a HH:MM" range from a class key, as minutes past
/// midnight.
fn key_range(key: &str) -> Option<(u32, u32)> {
    let caps = KEY_RANGE.captures(key)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let (sh, sm, eh, em) = (num(1)?, num(2)?, num(3)?, num(4)?);
    if sh > 23 || sm > 59 || eh > 23 || em > 59 {
        return None;
    }
    Some((sh * 60 + sm, eh * 60 + em))
}

/// Extract a 12-hour clock time from a class name, as minutes past midnight.
fn name_time(name: &str) -> Option<u32> {
    let lowered = name.to_lowercase();
    let caps = NAME_TIME.captures(&lowered)?;
    let hour = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let minute = caps.get(2)?.as_str().parse::<u32>().ok()?;
    if hour == 0 || hour > 12 || minute > 59 {
        return None;
    }
    let hour24 = match (hour, caps.get(3)?.as_str()) {
        (12, "am") => 0,
        (12, "pm") => 12,
        (h, "pm") => h + 12,
        (h, _) => h,
    };
    Some(hour24 * 60 + minute)
}

/// Start-inclusive, end-exclusive; a window whose end is not after its start
/// is taken to cross midnight.
fn window_contains(now: u32, start: u32, end: u32) -> bool {
    if end <= start {
        now >= start || now < end
    } else {
        now >= start && now < end
    }
}

fn range_label(start: u32, end: u32) -> String {
    format!(
        "{:02}:{:02} a {:02}:{:02}",
        start / 60,
        start % 60,
        end / 60,
        end % 60
    )
}

/// The current wall-clock hour as a range, shown when no session matches
fn hour_window_label(now_minutes: u32) -> String {
    let hour = now_minutes / 60;
    format!("{:02}:00 a {:02}:00", hour, (hour + 1) % 24)
}

// ---------------------------------------------------------------------------
// Platform board
// ---------------------------------------------------------------------------

/// One platform on the floor board
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PlatformSlot {
    /// Platform number, 1-based
    pub platform: u8,
    pub occupied: bool,
    /// Athlete name fitted to the screen's budget
    pub display_name: Option<String>,
    /// Normalized plan label
    pub plan: Option<String>,
    pub reservation: Option<Reservation>,
}

/// Lay the session's reservations out on the fixed platform grid.
pub fn board_for(session: &ActiveSession, large: bool) -> Vec<PlatformSlot> {
    let assigned = assign_platforms(&session.reservations);
    let max_len = if large {
        NAME_MAX_LEN_LARGE
    } else {
        NAME_MAX_LEN
    };

    (1..=TOTAL_PLATFORMS as u8)
        .map(|platform| match assigned.get(&platform) {
            Some(r) => PlatformSlot {
                platform,
                occupied: true,
                display_name: Some(truncate_name(&r.name, &r.last_name, max_len)),
                plan: Some(plan_display(&r.nombre_plan)),
                reservation: Some(r.clone()),
            },
            None => PlatformSlot {
                platform,
                occupied: false,
                display_name: None,
                plan: None,
                reservation: None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckinClasses;

    fn reservation(name: &str, last_name: &str, fecha: &str) -> Reservation {
        Reservation {
            id: 0,
            reserva_id: 0,
            hash_reserva_id: String::new(),
            name: name.to_string(),
            last_name: last_name.to_string(),
            full_name: format!("{name} {last_name}"),
            email: String::new(),
            telefono: String::new(),
            status: "Confirmada".to_string(),
            nombre_plan: "Sesiones Grupales".to_string(),
            canal: String::new(),
            fecha_creacion: fecha.to_string(),
            asistencia_confirmada: None,
            pago_pendiente: false,
            form_asistencia_url: false,
            mostrar_formulario: false,
            rating: None,
            imagen: String::new(),
            fila: None,
        }
    }

    fn class(name: Option<&str>, reservations: Vec<Reservation>) -> ClassEntry {
        ClassEntry {
            class_id: "c1".to_string(),
            class_name: name.map(str::to_string),
            limite: 12,
            total_reservations: None,
            reservations,
            clase_coach_id: None,
            clase_online: None,
            extracted_at: None,
        }
    }

    fn day(classes: Vec<(&str, ClassEntry)>) -> CheckinDay {
        CheckinDay {
            data: CheckinClasses {
                classes: classes
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
                date: "07-03-2025".to_string(),
                scraped_at: String::new(),
                total_classes: 0,
            },
            date: "07-03-2025".to_string(),
        }
    }

    #[test]
    fn key_range_matches_start_inclusive_end_exclusive() {
        let d = day(vec![
            ("06:00 a 07:00 Sesión grupal", class(Some("Sesión grupal"), vec![])),
            ("07:00 a 08:00 Sesión grupal", class(Some("Sesión grupal"), vec![])),
        ]);

        let at_6 = session_for(Some(&d), 6 * 60);
        assert_eq!(at_6.id, "06:00 a 07:00 Sesión grupal");
        assert_eq!(at_6.time, "06:00 a 07:00");

        // 07:00 belongs to the next class, not the one that just ended
        let at_7 = session_for(Some(&d), 7 * 60);
        assert_eq!(at_7.id, "07:00 a 08:00 Sesión grupal");
    }

    #[test]
    fn key_range_crossing_midnight_matches_both_sides() {
        let d = day(vec![
            ("23:00 a 01:00 Open gym", class(Some("Open gym"), vec![])),
            ("10:00 a 11:00 Grupal", class(Some("Grupal"), vec![])),
        ]);

        assert_eq!(session_for(Some(&d), 23 * 60 + 30).id, "23:00 a 01:00 Open gym");
        assert_eq!(session_for(Some(&d), 30).id, "23:00 a 01:00 Open gym");
        assert_eq!(session_for(Some(&d), 2 * 60).id, "empty");
    }

    #[test]
    fn name_time_fallback_covers_one_hour() {
        let d = day(vec![
            ("clase-a", class(Some("Sesión grupal 6:00 am"), vec![])),
            ("clase-b", class(Some("Sesión grupal 7:00 am"), vec![])),
        ]);

        let hit = session_for(Some(&d), 6 * 60 + 30);
        assert_eq!(hit.id, "clase-a");
        assert_eq!(hit.time, "06:00 a 07:00");
        assert_eq!(hit.kind, SessionKind::Group);

        assert_eq!(session_for(Some(&d), 7 * 60 + 10).id, "clase-b");
        assert_eq!(session_for(Some(&d), 9 * 60).id, "empty");
    }

    #[test]
    fn pm_times_convert_but_noon_stays_twelve() {
        let d = day(vec![
            ("tarde", class(Some("Semiprivada 4:30 pm"), vec![])),
            ("mediodia", class(Some("Sesión grupal 12:00 pm"), vec![])),
        ]);

        assert_eq!(session_for(Some(&d), 16 * 60 + 45).id, "tarde");
        assert_eq!(session_for(Some(&d), 12 * 60 + 15).id, "mediodia");
        // 00:15 is 12:15 am, not pm
        assert_eq!(session_for(Some(&d), 15).id, "empty");
    }

    #[test]
    fn midnight_is_twelve_am() {
        let d = day(vec![("noche", class(Some("Open gym 12:30 am"), vec![]))]);
        // Single-class day would match anyway; check the window does too
        assert_eq!(session_for(Some(&d), 45).time, "00:30 a 01:30");
    }

    #[test]
    fn single_class_day_matches_at_any_time() {
        let d = day(vec![("unica", class(Some("Yoga"), vec![]))]);
        let session = session_for(Some(&d), 3 * 60);
        assert_eq!(session.id, "unica");
        assert_eq!(session.class_name, "Yoga");
        assert_eq!(session.time, "03:00 a 04:00");
    }

    #[test]
    fn no_match_yields_empty_session() {
        let d = day(vec![
            ("06:00 a 07:00 A", class(None, vec![])),
            ("08:00 a 09:00 B", class(None, vec![])),
        ]);
        let session = session_for(Some(&d), 7 * 60 + 30);
        assert_eq!(session.id, "empty");
        assert_eq!(session.class_name, "Sin sesión activa");
        assert_eq!(session.color, "#374151");
        assert_eq!(session.time, "07:00 a 08:00");
    }

    #[test]
    fn missing_snapshot_yields_empty_session() {
        assert_eq!(session_for(None, 10 * 60).id, "empty");
    }

    #[test]
    fn key_label_wins_over_missing_class_name() {
        let d = day(vec![("10:00 a 11:00 Privada", class(None, vec![]))]);
        let session = session_for(Some(&d), 10 * 60 + 5);
        assert_eq!(session.class_name, "10:00 a 11:00 Privada");
        assert_eq!(session.kind, SessionKind::Private);
    }

    #[test]
    fn reservation_count_prefers_scraper_total() {
        let mut entry = class(Some("Sesión grupal"), vec![reservation("Ana", "Luna", "2025-03-07")]);
        entry.total_reservations = Some(9);
        let d = day(vec![("unica", entry)]);
        assert_eq!(session_for(Some(&d), 0).reservations_count, 9);

        let d2 = day(vec![(
            "unica",
            class(Some("Sesión grupal"), vec![reservation("Ana", "Luna", "2025-03-07")]),
        )]);
        assert_eq!(session_for(Some(&d2), 0).reservations_count, 1);
    }

    #[test]
    fn board_places_athletes_in_creation_order() {
        let session = ActiveSession {
            reservations: vec![
                reservation("Paty", "Santos", "2025-03-07T10:30:00"),
                reservation("Mariam", "Heded", "2025-03-07T09:15:00"),
            ],
            ..ActiveSession::fallback("06:00 a 07:00".to_string())
        };

        let board = board_for(&session, false);
        assert_eq!(board.len(), TOTAL_PLATFORMS);

        assert!(board[0].occupied);
        assert_eq!(board[0].platform, 1);
        assert_eq!(board[0].display_name.as_deref(), Some("Mariam Heded"));
        assert_eq!(board[1].display_name.as_deref(), Some("Paty Santos"));
        assert_eq!(board[0].plan.as_deref(), Some("GRUPAL"));

        for slot in &board[2..] {
            assert!(!slot.occupied);
            assert_eq!(slot.display_name, None);
            assert_eq!(slot.reservation, None);
        }
    }

    #[test]
    fn board_large_budget_keeps_longer_names() {
        // 28 chars: over the small budget, within the large one
        let r = reservation("María Fernanda", "Heded de Alba", "2025-03-07");
        let session = ActiveSession {
            reservations: vec![r],
            ..ActiveSession::fallback("06:00 a 07:00".to_string())
        };

        let small = board_for(&session, false);
        let large = board_for(&session, true);
        let small_name = small[0].display_name.clone().unwrap();
        let large_name = large[0].display_name.clone().unwrap();
        assert!(small_name.chars().count() <= NAME_MAX_LEN);
        assert!(large_name.chars().count() > small_name.chars().count());
    }
}
