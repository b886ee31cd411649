//! Multi-day attendance totals per child.

use std::collections::HashMap;

use serde::Serialize;

use crate::attendance::AttendanceHistory;
use crate::child::Child;
use crate::types::{ChildId, DayKey};

/// Totals for one roster child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub child_id: ChildId,
    pub name: String,
    /// Days the child counts as present.
    pub days: u32,
    pub minutes: i64,
    pub is_active: bool,
}

/// Sums over a set of report rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    pub days: u32,
    pub minutes: i64,
}

impl ReportTotals {
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        rows.iter().fold(Self::default(), |acc, row| Self {
            days: acc.days + row.days,
            minutes: acc.minutes + row.minutes,
        })
    }
}

/// Reduces the whole history to one row per roster child.
///
/// See [`aggregate_between`].
pub fn aggregate(children: &[Child], history: &AttendanceHistory) -> Vec<ReportRow> {
    aggregate_between(children, history, None, None)
}

/// Reduces the days in `from..=to` to one row per roster child.
///
/// Every roster child appears exactly once, archived or not, even without
/// any records. Records for IDs missing from the roster are skipped. Rows
/// are ordered by descending minutes; ties keep roster order.
pub fn aggregate_between(
    children: &[Child],
    history: &AttendanceHistory,
    from: Option<DayKey>,
    to: Option<DayKey>,
) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = children
        .iter()
        .map(|child| ReportRow {
            child_id: child.id.clone(),
            name: child.display_name(),
            days: 0,
            minutes: 0,
            is_active: child.is_active,
        })
        .collect();
    let index: HashMap<&ChildId, usize> = children
        .iter()
        .enumerate()
        .map(|(i, child)| (&child.id, i))
        .collect();

    for (day, records) in history.days_between(from, to) {
        for (child_id, record) in records {
            let Some(&i) = index.get(child_id) else {
                tracing::debug!(child = %child_id, %day, "record for child not on roster skipped");
                continue;
            };
            let row = &mut rows[i];
            row.minutes += record.total_minutes.unwrap_or(0);
            if record.counts_as_present() {
                row.days += 1;
            }
        }
    }

    rows.sort_by_key(|row| std::cmp::Reverse(row.minutes));
    rows
}
