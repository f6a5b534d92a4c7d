//! Platform assignment
//!
//! Maps a reservation snapshot onto the gym's fixed workout platforms:
//! earliest booking gets platform 1, and so on. The feed's legacy `fila`
//! hint is deliberately ignored; creation time is the only ordering input.

use std::collections::BTreeMap;

use crate::models::Reservation;

use super::timestamp::creation_rank;

/// Number of physical platforms on the floor
pub const TOTAL_PLATFORMS: usize = 10;

/// Assign reservations to platforms 1..=10 in ascending creation-time order.
///
/// The sort is stable, so reservations with equal or unparsable timestamps
/// keep their feed order. Overflow beyond the platform count is dropped
/// silently; an empty snapshot yields an empty map.
pub fn assign_platforms(reservations: &[Reservation]) -> BTreeMap<u8, Reservation> {
    let mut ordered: Vec<&Reservation> = reservations.iter().collect();
    ordered.sort_by_cached_key(|r| creation_rank(&r.fecha_creacion));

    ordered
        .into_iter()
        .take(TOTAL_PLATFORMS)
        .enumerate()
        .map(|(i, r)| ((i + 1) as u8, r.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(name: &str, last_name: &str, fecha_creacion: &str, fila: Option<&str>) -> Reservation {
        Reservation {
            id: 1,
            reserva_id: 1,
            hash_reserva_id: "abc".to_string(),
            name: name.to_string(),
            last_name: last_name.to_string(),
            full_name: format!("{} {}", name, last_name),
            email: "test@tavros.mx".to_string(),
            telefono: "123".to_string(),
            status: "activo".to_string(),
            nombre_plan: "Grupal (Paquete Full)".to_string(),
            canal: "app".to_string(),
            fecha_creacion: fecha_creacion.to_string(),
            asistencia_confirmada: None,
            pago_pendiente: false,
            form_asistencia_url: false,
            mostrar_formulario: false,
            rating: None,
            imagen: "default.jpg".to_string(),
            fila: fila.map(str::to_string),
        }
    }

    #[test]
    fn empty_snapshot_leaves_all_platforms_free() {
        let map = assign_platforms(&[]);
        assert!(map.is_empty());
    }

    #[test]
    fn orders_by_iso_creation_date_ignoring_input_order() {
        let reservations = vec![
            reservation("Newest", "Person", "2025-12-01", Some("3")),
            reservation("Oldest", "Person", "2025-01-01", Some("2")),
            reservation("Middle", "Person", "2025-06-15", Some("1")),
        ];

        let map = assign_platforms(&reservations);
        assert_eq!(map.len(), 3);
        assert_eq!(map[&1].name, "Oldest");
        assert_eq!(map[&2].name, "Middle");
        assert_eq!(map[&3].name, "Newest");
    }

    #[test]
    fn orders_by_short_format_creation_time() {
        let reservations = vec![
            reservation("Paty", "Aquino", "12/02 01:39:05", Some("1")),
            reservation("Roxana", "Cuadra", "13/02 15:28:08", Some("5")),
            reservation("Mariam", "Heded de Alba", "10/02 06:04:29", Some("2")),
            reservation("Vinicio", "Estrada", "13/02 13:08:36", Some("3")),
        ];

        let map = assign_platforms(&reservations);
        assert_eq!(map[&1].name, "Mariam");
        assert_eq!(map[&2].name, "Paty");
        assert_eq!(map[&3].name, "Vinicio");
        assert_eq!(map[&4].name, "Roxana");
    }

    #[test]
    fn fila_never_influences_placement() {
        // fila says Paty first, but Mariam booked earlier
        let reservations = vec![
            reservation("Paty", "A", "12/02 01:39:05", Some("1")),
            reservation("Mariam", "B", "10/02 06:04:29", Some("2")),
        ];

        let map = assign_platforms(&reservations);
        assert_eq!(map[&1].name, "Mariam");
        assert_eq!(map[&2].name, "Paty");
    }

    #[test]
    fn missing_fila_is_fine() {
        let reservations = vec![
            reservation("First", "A", "01/02 08:00:00", None),
            reservation("Second", "B", "02/02 09:00:00", None),
        ];

        let map = assign_platforms(&reservations);
        assert_eq!(map[&1].name, "First");
        assert_eq!(map[&2].name, "Second");
    }

    #[test]
    fn mixed_formats_sort_by_calendar_date() {
        // ISO date well in the past vs scraper short form in the current year
        let reservations = vec![
            reservation("Short", "Form", "12/02 01:39:05", None),
            reservation("Iso", "Form", "2020-01-01", None),
        ];

        let map = assign_platforms(&reservations);
        assert_eq!(map[&1].name, "Iso");
        assert_eq!(map[&2].name, "Short");
    }

    #[test]
    fn overflow_beyond_ten_is_dropped() {
        let reservations: Vec<Reservation> = (0..15)
            .map(|i| {
                reservation(
                    &format!("User{}", i),
                    &format!("Last{}", i),
                    &format!("2025-03-{:02}", i + 1),
                    None,
                )
            })
            .collect();

        let map = assign_platforms(&reservations);
        assert_eq!(map.len(), TOTAL_PLATFORMS);
        assert_eq!(map[&1].name, "User0");
        assert_eq!(map[&10].name, "User9");
        assert!(!map.values().any(|r| r.name == "User10"));
    }

    #[test]
    fn unparsable_timestamps_sort_first_in_feed_order() {
        let reservations = vec![
            reservation("Dated", "Person", "2025-05-01", None),
            reservation("BlankA", "Person", "", None),
            reservation("BlankB", "Person", "garbage", None),
        ];

        let map = assign_platforms(&reservations);
        // Rank-0 rows come first, keeping their relative feed order
        assert_eq!(map[&1].name, "BlankA");
        assert_eq!(map[&2].name, "BlankB");
        assert_eq!(map[&3].name, "Dated");
    }
}
