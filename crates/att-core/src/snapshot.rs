//! The persisted unit: roster plus attendance history.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::attendance::{AttendanceHistory, AttendanceRecord};
use crate::child::Child;
use crate::time::day_key;
use crate::types::{ChildId, DayKey};

/// Complete tracker state, saved and restored as a whole.
///
/// Operations take `&self` and return a new snapshot; the caller owns the
/// current value and threads it through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub history: AttendanceHistory,
}

impl Snapshot {
    /// State used when nothing usable is stored: empty roster, no history.
    pub fn seed() -> Self {
        Self::default()
    }

    pub fn child(&self, id: &ChildId) -> Option<&Child> {
        self.children.iter().find(|c| &c.id == id)
    }

    /// Children shown on the daily board, in roster order.
    pub fn active_children(&self) -> impl Iterator<Item = &Child> {
        self.children.iter().filter(|c| c.is_active)
    }

    pub fn record(&self, day: DayKey, child_id: &ChildId) -> Option<&AttendanceRecord> {
        self.history.get(day, child_id)
    }

    /// Opens a new session for `child_id` on the day of `now`.
    #[must_use]
    pub fn check_in(
        &self,
        child_id: &ChildId,
        note: Option<&str>,
        now: DateTime<FixedOffset>,
    ) -> Self {
        let day = day_key(&now);
        let record = AttendanceRecord::checked_in(now.timestamp_millis(), note);
        tracing::debug!(child = %child_id, %day, "check-in");
        self.with_record(day, child_id, record)
    }

    /// Closes the session for `child_id` on the day of `now`.
    #[must_use]
    pub fn check_out(
        &self,
        child_id: &ChildId,
        note: Option<&str>,
        now: DateTime<FixedOffset>,
    ) -> Self {
        let day = day_key(&now);
        let existing = self.history.get(day, child_id);
        if existing.is_none_or(|r| r.check_in_ms.is_none()) {
            tracing::debug!(child = %child_id, %day, "check-out without check-in");
        }
        let record = AttendanceRecord::checked_out(existing, now.timestamp_millis(), note);
        tracing::debug!(child = %child_id, %day, minutes = ?record.total_minutes, "check-out");
        self.with_record(day, child_id, record)
    }

    fn with_record(&self, day: DayKey, child_id: &ChildId, record: AttendanceRecord) -> Self {
        Self {
            children: self.children.clone(),
            history: self.history.with_record(day, child_id.clone(), record),
        }
    }
}
