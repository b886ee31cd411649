//! Check-in and check-out commands.

use std::io::Write;

use anyhow::{Context, Result};
use att_core::time::{format_clock_in, format_duration};
use att_core::{Clock, Engine, FixedClock, IdGenerator, SystemClock, UuidIds, merge_note};
use att_db::Database;

use super::util::{parse_datetime_at, resolve_child};
use crate::cli::CheckArgs;

/// Which transition to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

/// Runs the command, honoring `--at` when given.
///
/// Clock times and relative times in `--at` are read in `clock`'s offset.
pub fn run_cli<W: Write>(
    writer: &mut W,
    db: &mut Database,
    clock: SystemClock,
    direction: Direction,
    args: &CheckArgs,
) -> Result<()> {
    match args.at.as_deref() {
        Some(at) => {
            let at = parse_datetime_at(at, clock.now())?;
            run(writer, db, &Engine::new(FixedClock(at), UuidIds), direction, args)
        }
        None => run(writer, db, &Engine::new(clock, UuidIds), direction, args),
    }
}

/// Applies the transition for one roster child and saves the result.
pub fn run<W: Write, C: Clock, I: IdGenerator>(
    writer: &mut W,
    db: &mut Database,
    engine: &Engine<C, I>,
    direction: Direction,
    args: &CheckArgs,
) -> Result<()> {
    let snapshot = att_core::load_or_seed(&*db);
    let child = resolve_child(&snapshot, &args.child)?;
    let (id, name) = (child.id.clone(), child.display_name());

    let note = combine_notes(&args.notes);
    let note = (!note.is_empty()).then_some(note.as_str());

    let next = match direction {
        Direction::In => engine.check_in(&snapshot, &id, note),
        Direction::Out => engine.check_out(&snapshot, &id, note),
    };
    db.write_snapshot(&next).context("failed to save attendance")?;

    let now = engine.now();
    let record = next
        .record(engine.today(), &id)
        .context("transition produced no record")?;
    match direction {
        Direction::In => writeln!(
            writer,
            "Checked in {name} at {}",
            format_clock_in(record.check_in_ms, now.offset())
        )?,
        Direction::Out => writeln!(
            writer,
            "Checked out {name} at {} ({})",
            format_clock_in(record.check_out_ms, now.offset()),
            format_duration(record.total_minutes)
        )?,
    }
    Ok(())
}

/// Joins repeated `--note` fragments, dropping duplicates.
fn combine_notes(notes: &[String]) -> String {
    notes
        .iter()
        .fold(String::new(), |acc, note| merge_note(&acc, note))
}
