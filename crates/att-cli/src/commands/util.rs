//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::{Context, bail};
use att_core::{Child, ChildId, Snapshot};
use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone};
use regex::Regex;

/// Pre-compiled regex for relative time parsing.
static RELATIVE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(minute|hour|day)s?\s+ago$").unwrap());

/// Conservative bounds for relative time parsing (~1 year in minutes).
const MAX_RELATIVE_MINUTES: i64 = 366 * 24 * 60;

/// Number of ID characters shown in tables.
pub const SHORT_ID_LEN: usize = 8;

/// Parse an operator-supplied time relative to `now`, whose offset is used
/// for clock times and relative times.
///
/// Supports:
/// - ISO 8601: "2026-01-15T10:30:00-05:00"
/// - Clock time today: "09:15"
/// - Relative: "30 minutes ago", "2 hours ago", "1 day ago"
pub fn parse_datetime_at(
    s: &str,
    now: DateTime<FixedOffset>,
) -> anyhow::Result<DateTime<FixedOffset>> {
    let s = s.trim();

    // Try ISO 8601 first
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    // Clock time on today's date
    if let Ok(time) = NaiveTime::parse_from_str(s, "%H:%M") {
        let local = now.date_naive().and_time(time);
        return now
            .offset()
            .from_local_datetime(&local)
            .single()
            .with_context(|| format!("time {s} does not exist today"));
    }

    // Try relative time: "N minutes/hours/days ago"
    let Some(caps) = RELATIVE_TIME_RE.captures(s) else {
        bail!(
            "Invalid time: {s}. Use ISO 8601 (e.g., 2026-01-15T09:30:00-05:00), a clock time (e.g., 09:30) or relative (e.g., '30 minutes ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative time")?;

    let (max_for_unit, minutes_per_unit) = match &caps[2] {
        "minute" => (MAX_RELATIVE_MINUTES, 1),
        "hour" => (MAX_RELATIVE_MINUTES / 60, 60),
        "day" => (MAX_RELATIVE_MINUTES / (60 * 24), 60 * 24),
        unit => bail!("Unknown time unit: {unit}"),
    };

    if n > max_for_unit {
        bail!("Relative time value too large: {n} {}", &caps[2]);
    }

    // Safe to create Duration now that we've validated the range
    Ok(now - Duration::minutes(n * minutes_per_unit))
}

/// Finds a roster child by full ID or unambiguous ID prefix.
pub fn resolve_child<'a>(snapshot: &'a Snapshot, query: &str) -> anyhow::Result<&'a Child> {
    let query = query.trim();
    let exact = ChildId::new(query).ok();
    if let Some(child) = exact.and_then(|id| snapshot.child(&id)) {
        return Ok(child);
    }

    let mut matches = snapshot
        .children
        .iter()
        .filter(|c| !query.is_empty() && c.id.as_str().starts_with(query));
    match (matches.next(), matches.next()) {
        (Some(child), None) => Ok(child),
        (Some(_), Some(_)) => bail!("child ID prefix '{query}' is ambiguous"),
        (None, _) => bail!("no child with ID '{query}'. Run 'att roster list --all' to see IDs."),
    }
}

/// The first few characters of an ID, for table display.
pub fn short_id(id: &ChildId) -> String {
    id.as_str().chars().take(SHORT_ID_LEN).collect()
}
