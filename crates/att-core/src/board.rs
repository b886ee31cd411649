//! The daily attendance board.

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;

use crate::attendance::AttendanceStatus;
use crate::snapshot::Snapshot;
use crate::time::minutes_between;
use crate::types::{ChildId, DayKey};

/// One active child's state for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardRow {
    pub child_id: ChildId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    pub status: AttendanceStatus,
    pub check_in_ms: Option<i64>,
    pub check_out_ms: Option<i64>,
    /// Running time while present, the recorded total once checked out.
    ///
    /// A session left open on an earlier day runs until that day's midnight.
    pub minutes: Option<i64>,
    pub check_in_note: String,
    pub check_out_note: String,
}

/// Builds the board for `day` with one row per active child, in roster order.
///
/// `now` is used for the running time of open sessions; its offset decides
/// where `day` ends.
pub fn day_board(snapshot: &Snapshot, day: DayKey, now: DateTime<FixedOffset>) -> Vec<BoardRow> {
    let until_ms = end_of_day_ms(day, now.offset())
        .map_or(now.timestamp_millis(), |end| end.min(now.timestamp_millis()));
    snapshot
        .active_children()
        .map(|child| {
            let record = snapshot.record(day, &child.id).cloned().unwrap_or_default();
            let minutes = if record.is_present() {
                minutes_between(record.check_in_ms, Some(until_ms))
            } else {
                record.total_minutes
            };
            BoardRow {
                child_id: child.id.clone(),
                name: child.display_name(),
                allergies: child.allergies.clone(),
                status: record.status,
                check_in_ms: record.check_in_ms,
                check_out_ms: record.check_out_ms,
                minutes,
                check_in_note: record.check_in_note,
                check_out_note: record.check_out_note,
            }
        })
        .collect()
}

/// Midnight after `day` in `offset`, as epoch milliseconds.
fn end_of_day_ms(day: DayKey, offset: &FixedOffset) -> Option<i64> {
    let midnight = day.date().succ_opt()?.and_hms_opt(0, 0, 0)?;
    offset
        .from_local_datetime(&midnight)
        .single()
        .map(|end| end.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::child::ChildFields;
    use crate::id::SequentialIds;

    fn at(h: u32, m: u32) -> DateTime<FixedOffset> {
        on(29, h, m)
    }

    fn on(d: u32, h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 1, d, h, m, 0)
            .unwrap()
    }

    fn roster() -> Snapshot {
        let ids = SequentialIds::new("k");
        Snapshot::seed()
            .add_child(&ChildFields::new("Ann", "Doe", "Pat"), &ids)
            .add_child(&ChildFields::new("Bo", "Doe", "Pat").with_allergies("nuts"), &ids)
            .add_child(&ChildFields::new("Cy", "Doe", "Pat"), &ids)
    }

    #[test]
    fn board_lists_active_children_with_state() {
        let k1 = ChildId::new("k1").unwrap();
        let k2 = ChildId::new("k2").unwrap();
        let s = roster()
            .set_active(&ChildId::new("k3").unwrap(), false)
            .check_in(&k1, Some("Dropped off by Dad"), at(8, 0))
            .check_in(&k2, None, at(8, 0))
            .check_out(&k2, Some("Picked up by Mom"), at(9, 15));

        let day = "2025-01-29".parse().unwrap();
        let board = day_board(&s, day, at(10, 0));

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].name, "Ann Doe");
        assert_eq!(board[0].status, AttendanceStatus::Present);
        assert_eq!(board[0].minutes, Some(120));
        assert_eq!(board[0].check_in_note, "Dropped off by Dad");

        assert_eq!(board[1].status, AttendanceStatus::Absent);
        assert_eq!(board[1].minutes, Some(75));
        assert_eq!(board[1].allergies.as_deref(), Some("nuts"));
        assert_eq!(board[1].check_out_note, "Picked up by Mom");
    }

    #[test]
    fn board_shows_absent_without_record() {
        let day = "2025-01-30".parse().unwrap();
        let board = day_board(&roster(), day, at(10, 0));
        assert_eq!(board.len(), 3);
        assert!(board.iter().all(|r| r.status == AttendanceStatus::Absent));
        assert!(board.iter().all(|r| r.minutes.is_none() && r.check_in_ms.is_none()));
    }

    #[test]
    fn open_session_on_past_day_stops_at_midnight() {
        let k1 = ChildId::new("k1").unwrap();
        let s = roster().check_in(&k1, None, on(28, 22, 0));

        let day = "2025-01-28".parse().unwrap();
        let board = day_board(&s, day, on(30, 10, 0));
        assert_eq!(board[0].status, AttendanceStatus::Present);
        assert_eq!(board[0].minutes, Some(120));

        // Same session seen on its own day keeps running until now
        let board = day_board(&s, day, on(28, 23, 30));
        assert_eq!(board[0].minutes, Some(90));
    }
}
