//! Core domain logic for the attendance tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Attendance: the check-in/check-out lifecycle for one child on one day
//! - Notes: merging free-text fragments without duplicates
//! - Reports: reducing multi-day history into per-child totals
//! - Storage contract: loading and saving whole snapshots

pub mod attendance;
pub mod board;
pub mod child;
pub mod clock;
mod engine;
pub mod id;
pub mod note;
pub mod report;
mod roster;
pub mod snapshot;
pub mod store;
pub mod time;
pub mod types;

pub use attendance::{AttendanceHistory, AttendanceRecord, AttendanceStatus};
pub use board::{BoardRow, day_board};
pub use child::{Child, ChildFields};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::Engine;
pub use id::{IdGenerator, SequentialIds, UuidIds};
pub use note::merge_note;
pub use report::{ReportRow, ReportTotals, aggregate, aggregate_between};
pub use snapshot::Snapshot;
pub use store::{MemoryStore, StateStore, load_or_seed};
pub use types::{ChildId, DayKey, ValidationError};
