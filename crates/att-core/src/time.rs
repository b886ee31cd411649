//! Calendar-day keys, clock times and duration text.
//!
//! Timestamps are epoch milliseconds (`i64`). Durations are whole minutes.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::types::DayKey;

/// Placeholder rendered for a missing time or duration.
pub const PLACEHOLDER: &str = "—";

const MS_PER_MINUTE: i64 = 60_000;

/// Derives the local-calendar day key for an instant.
///
/// All instants within the same calendar day of `instant`'s time zone map to
/// the same key.
pub fn day_key<Tz: TimeZone>(instant: &DateTime<Tz>) -> DayKey {
    DayKey::from(instant.date_naive())
}

/// Renders a short time of day in the local time zone, e.g. `9:05 AM`.
pub fn format_clock(ms: Option<i64>) -> String {
    format_clock_in(ms, &Local)
}

/// Renders a short time of day in the given time zone.
pub fn format_clock_in<Tz>(ms: Option<i64>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ms.and_then(DateTime::from_timestamp_millis)
        .map_or_else(
            || PLACEHOLDER.to_string(),
            |utc| utc.with_timezone(tz).format("%-I:%M %p").to_string(),
        )
}

/// Formats whole minutes as `"{h}h {m}m"`, or `"{m}m"` under an hour.
///
/// Negative durations are treated as 0m.
pub fn format_duration(minutes: Option<i64>) -> String {
    let Some(minutes) = minutes else {
        return PLACEHOLDER.to_string();
    };
    let minutes = minutes.max(0);
    let hours = minutes / 60;
    let minutes = minutes % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Whole minutes from `start_ms` to `end_ms`, rounded half up.
///
/// Returns `None` when either endpoint is missing or when `end_ms < start_ms`,
/// so out-of-order events never produce a negative duration.
pub fn minutes_between(start_ms: Option<i64>, end_ms: Option<i64>) -> Option<i64> {
    let (start, end) = (start_ms?, end_ms?);
    if end < start {
        return None;
    }
    let elapsed = end.checked_sub(start)?;
    Some(elapsed.saturating_add(MS_PER_MINUTE / 2) / MS_PER_MINUTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Utc};

    fn ms(h: u32, m: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(2025, 1, 29, h, m, s)
            .unwrap()
            .timestamp_millis()
    }

    // ========== day_key ==========

    #[test]
    fn day_key_is_stable_within_local_day() {
        let tz = FixedOffset::west_opt(8 * 3600).unwrap();
        let morning = tz.with_ymd_and_hms(2025, 1, 29, 0, 0, 0).unwrap();
        let night = tz.with_ymd_and_hms(2025, 1, 29, 23, 59, 59).unwrap();

        assert_eq!(day_key(&morning), day_key(&night));
        assert_eq!(day_key(&morning).to_string(), "2025-01-29");
    }

    #[test]
    fn day_key_uses_the_instants_own_offset() {
        // 03:00 UTC on the 30th is still the 29th in UTC-8
        let utc = Utc.with_ymd_and_hms(2025, 1, 30, 3, 0, 0).unwrap();
        let local = utc.with_timezone(&FixedOffset::west_opt(8 * 3600).unwrap());

        assert_eq!(day_key(&utc).to_string(), "2025-01-30");
        assert_eq!(day_key(&local).to_string(), "2025-01-29");
    }

    #[test]
    fn day_key_zero_pads_month_and_day() {
        let instant = NaiveDate::from_ymd_opt(2025, 2, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(day_key(&instant).to_string(), "2025-02-03");
    }

    // ========== format_clock ==========

    #[test]
    fn format_clock_renders_twelve_hour_time() {
        assert_eq!(format_clock_in(Some(ms(9, 5, 0)), &Utc), "9:05 AM");
        assert_eq!(format_clock_in(Some(ms(17, 30, 0)), &Utc), "5:30 PM");
    }

    #[test]
    fn format_clock_respects_time_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_clock_in(Some(ms(9, 0, 0)), &tz), "11:00 AM");
    }

    #[test]
    fn format_clock_placeholder_when_absent() {
        assert_eq!(format_clock_in(None, &Utc), PLACEHOLDER);
        assert_eq!(format_clock(None), "—");
    }

    // ========== format_duration ==========

    #[test]
    fn format_duration_hours_and_minutes() {
        assert_eq!(format_duration(Some(150)), "2h 30m");
        assert_eq!(format_duration(Some(60)), "1h 0m");
    }

    #[test]
    fn format_duration_minutes_only() {
        assert_eq!(format_duration(Some(45)), "45m");
        assert_eq!(format_duration(Some(0)), "0m");
    }

    #[test]
    fn format_duration_placeholder_and_negative() {
        assert_eq!(format_duration(None), PLACEHOLDER);
        assert_eq!(format_duration(Some(-5)), "0m");
    }

    // ========== minutes_between ==========

    #[test]
    fn minutes_between_rounds_to_nearest_minute() {
        assert_eq!(minutes_between(Some(ms(9, 0, 0)), Some(ms(9, 30, 0))), Some(30));
        assert_eq!(minutes_between(Some(ms(9, 0, 0)), Some(ms(9, 0, 29))), Some(0));
        assert_eq!(minutes_between(Some(ms(9, 0, 0)), Some(ms(9, 0, 30))), Some(1));
        assert_eq!(minutes_between(Some(ms(9, 0, 0)), Some(ms(9, 1, 31))), Some(2));
    }

    #[test]
    fn minutes_between_is_zero_for_equal_endpoints() {
        assert_eq!(minutes_between(Some(1_000), Some(1_000)), Some(0));
    }

    #[test]
    fn minutes_between_absent_for_missing_endpoint() {
        assert_eq!(minutes_between(None, Some(ms(9, 0, 0))), None);
        assert_eq!(minutes_between(Some(ms(9, 0, 0)), None), None);
        assert_eq!(minutes_between(None, None), None);
    }

    #[test]
    fn minutes_between_absent_when_end_precedes_start() {
        assert_eq!(minutes_between(Some(ms(10, 0, 0)), Some(ms(9, 0, 0))), None);
        assert_eq!(minutes_between(Some(1), Some(0)), None);
    }

    #[test]
    fn minutes_between_never_negative() {
        let start = ms(8, 0, 0);
        for offset in [0, 1, 29_999, 30_000, 59_999, 3_600_000] {
            let minutes = minutes_between(Some(start), Some(start + offset)).unwrap();
            assert!(minutes >= 0, "offset {offset} gave {minutes}");
        }
    }
}
