//! Check-in feed models (reservations, classes, scraped days)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Reservation
// ---------------------------------------------------------------------------

/// One person's booking for a session, as delivered by the check-in scraper.
///
/// The scraper's field set drifts between runs, so everything non-essential
/// is defaulted. `fila` is a legacy slot hint that placement ignores; it is
/// kept on the wire so older display clients can still read it.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub reserva_id: i64,
    #[serde(default)]
    pub hash_reserva_id: String,
    /// First name
    #[serde(default)]
    pub name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub status: String,
    /// Free-text plan label, normalized for display by the floor module
    #[serde(default)]
    pub nombre_plan: String,
    #[serde(default)]
    pub canal: String,
    /// Creation timestamp, either ISO `YYYY-MM-DD` or `DD/MM HH:mm:ss`
    #[serde(default)]
    pub fecha_creacion: String,
    pub asistencia_confirmada: Option<i64>,
    #[serde(default)]
    pub pago_pendiente: bool,
    #[serde(default)]
    pub form_asistencia_url: bool,
    #[serde(default)]
    pub mostrar_formulario: bool,
    pub rating: Option<String>,
    #[serde(default)]
    pub imagen: String,
    /// Legacy platform hint - never used for assignment
    pub fila: Option<String>,
}

// ---------------------------------------------------------------------------
// ClassEntry / CheckinDay
// ---------------------------------------------------------------------------

/// One scheduled class within a scraped day
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassEntry {
    #[serde(rename = "classId", default)]
    pub class_id: String,
    /// Free-text class name (newer scrapes put the time here, e.g. "Sesión grupal 6:00 am")
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    /// Capacity
    #[serde(default)]
    pub limite: i64,
    #[serde(rename = "totalReservations")]
    pub total_reservations: Option<i64>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    pub clase_coach_id: Option<String>,
    pub clase_online: Option<i64>,
    #[serde(rename = "extractedAt")]
    pub extracted_at: Option<String>,
}

/// The classes scraped for one day.
///
/// Class keys are free text (older scrapes embed "HH:MM a HH:MM" in the key);
/// their order matters for the single-class fallback, hence the IndexMap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckinClasses {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub classes: IndexMap<String, ClassEntry>,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "scrapedAt", default)]
    pub scraped_at: String,
    #[serde(rename = "totalClasses", default)]
    pub total_classes: i64,
}

/// Top-level check-in API response for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckinDay {
    pub data: CheckinClasses,
    #[serde(default)]
    pub date: String,
}
