//! Reservation creation-timestamp parsing
//!
//! The check-in feed emits `fecha_creacion` in two shapes: ISO dates
//! (`YYYY-MM-DD`, sometimes with a time part) and the scraper's short
//! `DD/MM HH:mm:ss` form, which carries no year. Both are reduced to a
//! sortable rank in epoch milliseconds; anything unparsable ranks 0 and
//! therefore sorts first.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static DAY_MONTH_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})/(\d{2}) (\d{2}):(\d{2}):(\d{2})$").unwrap());

/// Rank a raw creation timestamp against the current calendar year
pub fn creation_rank(raw: &str) -> i64 {
    creation_rank_in_year(raw, Utc::now().year())
}

/// Rank a raw creation timestamp, resolving the short format against `year`.
///
/// The year injection keeps tests deterministic; it also documents the known
/// simplification that short timestamps read near New Year can land in the
/// wrong year.
pub fn creation_rank_in_year(raw: &str, year: i32) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }

    if let Some(ts) = parse_iso(trimmed) {
        return ts;
    }

    if let Some(ts) = parse_day_month_time(trimmed, year) {
        return ts;
    }

    0
}

/// ISO-like forms, most specific first
fn parse_iso(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp_millis());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Some(dt.and_utc().timestamp_millis());
    }
    None
}

/// The scraper's `DD/MM HH:mm:ss` form. Invalid calendar dates (e.g. 31/02)
/// fail the chrono construction and rank 0 with the rest of the unparsable.
fn parse_day_month_time(s: &str, year: i32) -> Option<i64> {
    let caps = DAY_MONTH_TIME.captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let hour: u32 = caps[3].parse().ok()?;
    let minute: u32 = caps[4].parse().ok()?;
    let second: u32 = caps[5].parse().ok()?;

    let dt = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    Some(dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_date_parses_to_midnight() {
        let rank = creation_rank_in_year("2025-01-01", 2025);
        let expected = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        assert_eq!(rank, expected);
    }

    #[test]
    fn iso_datetime_parses() {
        assert!(creation_rank_in_year("2025-03-10T08:30:00", 2025) > 0);
        assert!(creation_rank_in_year("2025-03-10 08:30:00", 2025) > 0);
    }

    #[test]
    fn short_format_uses_injected_year() {
        let rank = creation_rank_in_year("12/02 01:39:05", 2025);
        let expected = NaiveDate::from_ymd_opt(2025, 2, 12)
            .unwrap()
            .and_hms_opt(1, 39, 5)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        assert_eq!(rank, expected);
    }

    #[test]
    fn short_format_orders_within_a_day() {
        let earlier = creation_rank_in_year("13/02 13:08:36", 2025);
        let later = creation_rank_in_year("13/02 15:28:08", 2025);
        assert!(earlier < later);
    }

    #[test]
    fn mixed_formats_order_by_calendar_date() {
        let iso = creation_rank_in_year("2025-01-01", 2025);
        let short = creation_rank_in_year("12/02 01:39:05", 2025);
        assert!(iso < short);
    }

    #[test]
    fn empty_and_whitespace_rank_zero() {
        assert_eq!(creation_rank_in_year("", 2025), 0);
        assert_eq!(creation_rank_in_year("   ", 2025), 0);
    }

    #[test]
    fn garbage_ranks_zero() {
        assert_eq!(creation_rank_in_year("not a date", 2025), 0);
        assert_eq!(creation_rank_in_year("99/99 10:00:00", 2025), 0);
        assert_eq!(creation_rank_in_year("31/02 10:00:00", 2025), 0);
    }

    #[test]
    fn leading_trailing_whitespace_is_trimmed() {
        assert!(creation_rank_in_year("  10/02 06:04:29  ", 2025) > 0);
    }
}
