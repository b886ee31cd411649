//! Status command: the daily attendance board.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use att_core::time::{format_clock_in, format_duration};
use att_core::{AttendanceStatus, BoardRow, Clock, DayKey, Engine, IdGenerator, load_or_seed};
use att_db::Database;
use chrono::FixedOffset;

use super::util::short_id;

pub fn run<W: Write, C: Clock, I: IdGenerator>(
    writer: &mut W,
    db: &Database,
    engine: &Engine<C, I>,
    date: Option<DayKey>,
) -> Result<()> {
    let snapshot = load_or_seed(db);
    let day = date.unwrap_or_else(|| engine.today());
    let board = engine.day_board(&snapshot, Some(day));

    write!(writer, "{}", format_board(day, &board, engine.now().offset()))?;
    Ok(())
}

/// Formats the board, rendering clock times in `tz`.
pub fn format_board(day: DayKey, rows: &[BoardRow], tz: &FixedOffset) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "ATTENDANCE: {}",
        day.date().format("%A, %b %-d, %Y")
    )
    .unwrap();
    writeln!(output).unwrap();

    if rows.is_empty() {
        writeln!(output, "No active children on the roster.").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Hint: Run 'att roster add' to add one.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<8}  {:<24}  {:<7}  {:>8}  {:>8}  {:>7}",
        "ID", "Name", "Status", "In", "Out", "Time"
    )
    .unwrap();
    writeln!(
        output,
        "────────  ────────────────────────  ───────  ────────  ────────  ───────"
    )
    .unwrap();

    for row in rows {
        writeln!(
            output,
            "{:<8}  {:<24}  {:<7}  {:>8}  {:>8}  {:>7}",
            short_id(&row.child_id),
            row.name,
            row.status.as_str(),
            format_clock_in(row.check_in_ms, tz),
            format_clock_in(row.check_out_ms, tz),
            format_duration(row.minutes)
        )
        .unwrap();
        if let Some(allergies) = &row.allergies {
            writeln!(output, "{:10}allergies: {allergies}", "").unwrap();
        }
        if !row.check_in_note.is_empty() {
            writeln!(output, "{:10}in: {}", "", row.check_in_note).unwrap();
        }
        if !row.check_out_note.is_empty() {
            writeln!(output, "{:10}out: {}", "", row.check_out_note).unwrap();
        }
    }

    let present = rows
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    writeln!(output).unwrap();
    writeln!(output, "Present: {present} of {}", rows.len()).unwrap();

    output
}
