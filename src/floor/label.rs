//! Display-label shaping for the platform board
//!
//! Names and plan labels arrive as free text sized for booking forms, not
//! for a TV cell. The board shows at most `max_len` characters per name and
//! a short uppercase category per plan.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Name budget for the compact board
pub const NAME_MAX_LEN: usize = 18;

/// Name budget for the full-screen board
pub const NAME_MAX_LEN_LARGE: usize = 36;

/// Explicit plan-name table from the booking system. Checked before any
/// keyword fallback; keys match the upstream strings verbatim, including the
/// one with a trailing space.
static PLAN_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Paquete Semestral (Grupal)", "Grupal"),
        ("Fernanda Vázquez", "Grupal"),
        ("Paquete Semestral Semiprivadas + Inscripción", "Semiprivada"),
        ("Online Coaching (Suscripción)", "Online"),
        ("Paquete Semestral: Online Coaching + Open Gym", "Grupal"),
        ("Online Coaching + Open Gym", "Grupal"),
        ("Grupal Paquete Trimestral + Inscripción", "Grupal"),
        ("Paquete Semestral Héctor Vielma Paredes", "Privada"),
        ("Paquete Semestral Cinthya Paredes", "Grupal"),
        ("Paquete familiar Grupal Full (4 personas)", "Grupal"),
        ("Online Coaching Premium", "Online"),
        ("Paquete semestral", "Grupal"),
        ("Paquete Trimestral Semiprivadas", "Semiprivada"),
        ("Online Coaching", "Online"),
        ("Open Gym", "Open gym"),
        ("Grupal (2 sesiones/semanales)", "Grupal"),
        ("Paquete de sesiones Semiprivadas", "Semiprivada"),
        ("Paquete de sesiones Privadas", "Privada"),
        ("Paquete Trimestral", "Grupal"),
        ("Grupal (Paquete Full)", "Grupal"),
        ("Plan trimestral en sesiones grupales + inscripción", "Grupal"),
        ("Paquete Trimestral Grupal + Inscripción: Pago en dos exhibiciones ", "Grupal"),
        ("Paquete Trimestral Grupal (Plan Actual)", "Grupal"),
        ("Grupal (Mensual)", "Grupal"),
    ])
});

/// Build a bounded display name from first and last name.
///
/// The full name is used as-is when it fits. When it does not, the label is
/// reduced to the first given name plus the first surname (keeping Spanish
/// compound surnames whole, see [`first_surname`]); if even that overflows,
/// it is cut to `max_len - 3` characters plus `"..."` so the result length
/// equals the budget exactly. Operates on chars, never splitting a scalar.
pub fn truncate_name(first_name: &str, last_name: &str, max_len: usize) -> String {
    let full = format!("{} {}", first_name, last_name).trim().to_string();
    if full.chars().count() <= max_len {
        return full;
    }

    let given = first_name.split_whitespace().next().unwrap_or("");
    let short = format!("{} {}", given, first_surname(last_name))
        .trim()
        .to_string();
    if short.chars().count() <= max_len {
        return short;
    }

    let kept: String = short.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Extract the first surname, keeping compound participles together:
/// "de la", "de las", "de los" and "van de" take the following token as a
/// three-token surname; "del", "de", "van" and "von" take it as two tokens.
/// Any other last name contributes only its first token.
pub fn first_surname(last_name: &str) -> String {
    let tokens: Vec<&str> = last_name.split_whitespace().collect();
    if tokens.is_empty() {
        return String::new();
    }

    let t0 = tokens[0].to_lowercase();
    if tokens.len() >= 3 {
        let t1 = tokens[1].to_lowercase();
        if matches!(
            (t0.as_str(), t1.as_str()),
            ("de", "la") | ("de", "las") | ("de", "los") | ("van", "de")
        ) {
            return tokens[..3].join(" ");
        }
    }
    if tokens.len() >= 2 && matches!(t0.as_str(), "del" | "de" | "van" | "von") {
        return tokens[..2].join(" ");
    }

    tokens[0].to_string()
}

/// Map a free-text plan name to the short category shown under a name.
///
/// Empty input gets the generic placeholder; known plans come from the
/// lookup table; otherwise keywords decide; as a last resort the raw label
/// is cut to 20 chars and uppercased.
pub fn plan_display(nombre_plan: &str) -> String {
    if nombre_plan.is_empty() {
        return "Sesión".to_string();
    }
    if let Some(mapped) = PLAN_MAPPING.get(nombre_plan) {
        return mapped.to_uppercase();
    }

    let lower = nombre_plan.to_lowercase();
    if lower.contains("grupal") {
        return "GRUPAL".to_string();
    }
    if lower.contains("semiprivad") {
        return "SEMIPRIVADA".to_string();
    }
    if lower.contains("privad") {
        return "PRIVADA".to_string();
    }
    if lower.contains("open gym") {
        return "OPEN GYM".to_string();
    }

    nombre_plan.chars().take(20).collect::<String>().to_uppercase()
}
