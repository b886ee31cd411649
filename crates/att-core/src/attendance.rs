//! Per-day attendance records and the check-in/check-out lifecycle.
//!
//! Each `(day, child)` pair is either absent (no record, or `ABSENT`) or
//! present (`PRESENT` with a check-in time). Both transitions are total:
//! checking in while present restarts the session, and checking out while
//! absent records an exit with no duration.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use crate::time::minutes_between;
use crate::types::{ChildId, DayKey};

/// Whether a child is currently checked in for a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Checked in, session open.
    Present,
    /// Never checked in, or already checked out.
    #[default]
    Absent,
}

impl AttendanceStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

/// One child's attendance on one day.
///
/// All fields default when missing so partially written records still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_ms: Option<i64>,
    /// Session length in minutes, set on check-out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_minutes: Option<i64>,
    #[serde(default)]
    pub check_in_note: String,
    #[serde(default)]
    pub check_out_note: String,
}

impl AttendanceRecord {
    /// Starts a fresh session at `now_ms`.
    ///
    /// Any earlier session for the day, including its check-out note, is
    /// discarded.
    pub fn checked_in(now_ms: i64, note: Option<&str>) -> Self {
        Self {
            status: AttendanceStatus::Present,
            check_in_ms: Some(now_ms),
            check_out_ms: None,
            total_minutes: None,
            check_in_note: note.unwrap_or_default().to_string(),
            check_out_note: String::new(),
        }
    }

    /// Closes the session in `existing` (if any) at `now_ms`.
    ///
    /// Check-in time and note carry over. Without a usable check-in the
    /// duration is recorded as 0.
    pub fn checked_out(existing: Option<&Self>, now_ms: i64, note: Option<&str>) -> Self {
        let check_in_ms = existing.and_then(|r| r.check_in_ms);
        let check_in_note = existing
            .map(|r| r.check_in_note.clone())
            .unwrap_or_default();

        Self {
            status: AttendanceStatus::Absent,
            check_in_ms,
            check_out_ms: Some(now_ms),
            total_minutes: Some(minutes_between(check_in_ms, Some(now_ms)).unwrap_or(0)),
            check_in_note,
            check_out_note: note.unwrap_or_default().to_string(),
        }
    }

    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }

    /// Whether this record counts as an attended day in reports.
    ///
    /// Partially filled records count too: a check-in time or a positive
    /// duration is enough without a `PRESENT` status.
    pub fn counts_as_present(&self) -> bool {
        self.is_present()
            || self.check_in_ms.is_some()
            || self.total_minutes.is_some_and(|m| m > 0)
    }
}

/// Records of one day, keyed by child.
pub type DayRecords = BTreeMap<ChildId, AttendanceRecord>;

/// All attendance, keyed by day then child.
///
/// Iteration is in ascending day order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceHistory(BTreeMap<DayKey, DayRecords>);

impl AttendanceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day: DayKey, child_id: &ChildId) -> Option<&AttendanceRecord> {
        self.0.get(&day).and_then(|records| records.get(child_id))
    }

    /// All records for one day.
    pub fn day(&self, day: DayKey) -> Option<&DayRecords> {
        self.0.get(&day)
    }

    /// Days in ascending order with their records.
    pub fn days(&self) -> btree_map::Iter<'_, DayKey, DayRecords> {
        self.0.iter()
    }

    /// Days within `from..=to` in ascending order. Open bounds are unbounded.
    pub fn days_between(
        &self,
        from: Option<DayKey>,
        to: Option<DayKey>,
    ) -> impl Iterator<Item = (&DayKey, &DayRecords)> {
        self.0
            .iter()
            .filter(move |(day, _)| from.is_none_or(|f| **day >= f) && to.is_none_or(|t| **day <= t))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy with only the `(day, child_id)` entry replaced.
    #[must_use]
    pub fn with_record(&self, day: DayKey, child_id: ChildId, record: AttendanceRecord) -> Self {
        let mut next = self.clone();
        next.0.entry(day).or_default().insert(child_id, record);
        next
    }
}

impl FromIterator<(DayKey, ChildId, AttendanceRecord)> for AttendanceHistory {
    fn from_iter<T: IntoIterator<Item = (DayKey, ChildId, AttendanceRecord)>>(iter: T) -> Self {
        let mut history = BTreeMap::<DayKey, DayRecords>::new();
        for (day, child_id, record) in iter {
            history.entry(day).or_default().insert(child_id, record);
        }
        Self(history)
    }
}
