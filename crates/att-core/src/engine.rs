//! Engine entry points with injected clock and ID capabilities.

use chrono::{DateTime, FixedOffset};

use crate::board::{BoardRow, day_board};
use crate::child::ChildFields;
use crate::clock::Clock;
use crate::id::IdGenerator;
use crate::report::{ReportRow, aggregate, aggregate_between};
use crate::snapshot::Snapshot;
use crate::time::day_key;
use crate::types::{ChildId, DayKey};

/// Applies operator actions to snapshots.
///
/// Every operation is total: it returns the next snapshot (possibly equal to
/// the input) and never fails.
#[derive(Debug, Clone, Default)]
pub struct Engine<C, I> {
    clock: C,
    ids: I,
}

impl<C: Clock, I: IdGenerator> Engine<C, I> {
    pub const fn new(clock: C, ids: I) -> Self {
        Self { clock, ids }
    }

    pub fn check_in(&self, snapshot: &Snapshot, child_id: &ChildId, note: Option<&str>) -> Snapshot {
        snapshot.check_in(child_id, note, self.clock.now())
    }

    pub fn check_out(
        &self,
        snapshot: &Snapshot,
        child_id: &ChildId,
        note: Option<&str>,
    ) -> Snapshot {
        snapshot.check_out(child_id, note, self.clock.now())
    }

    pub fn add_child(&self, snapshot: &Snapshot, fields: &ChildFields) -> Snapshot {
        snapshot.add_child(fields, &self.ids)
    }

    pub fn update_child(
        &self,
        snapshot: &Snapshot,
        child_id: &ChildId,
        fields: &ChildFields,
    ) -> Snapshot {
        snapshot.update_child(child_id, fields)
    }

    pub fn archive_child(&self, snapshot: &Snapshot, child_id: &ChildId) -> Snapshot {
        snapshot.set_active(child_id, false)
    }

    pub fn restore_child(&self, snapshot: &Snapshot, child_id: &ChildId) -> Snapshot {
        snapshot.set_active(child_id, true)
    }

    pub fn aggregate(&self, snapshot: &Snapshot) -> Vec<ReportRow> {
        aggregate(&snapshot.children, &snapshot.history)
    }

    pub fn aggregate_between(
        &self,
        snapshot: &Snapshot,
        from: Option<DayKey>,
        to: Option<DayKey>,
    ) -> Vec<ReportRow> {
        aggregate_between(&snapshot.children, &snapshot.history, from, to)
    }

    /// The board for `day`, or for the clock's current day.
    pub fn day_board(&self, snapshot: &Snapshot, day: Option<DayKey>) -> Vec<BoardRow> {
        let now = self.clock.now();
        day_board(snapshot, day.unwrap_or_else(|| day_key(&now)), now)
    }

    /// The engine clock's current instant.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    /// Today's key according to the engine's clock.
    pub fn today(&self) -> DayKey {
        day_key(&self.clock.now())
    }
}
