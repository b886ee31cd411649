//! Report command: attendance totals per child.
//!
//! This module implements `att report` over the whole history or a
//! `--from`/`--to` day range, in human-readable or JSON form.

use std::fmt::Write;

use anyhow::{Result, ensure};
use att_core::time::format_duration;
use att_core::{Clock, DayKey, Engine, IdGenerator, ReportRow, ReportTotals, load_or_seed};
use att_db::Database;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::util::short_id;

/// Computed report data.
#[derive(Debug)]
pub struct ReportData {
    pub generated_at: DateTime<FixedOffset>,
    pub from: Option<DayKey>,
    pub to: Option<DayKey>,
    pub timezone: String,
    pub rows: Vec<ReportRow>,
}

// ========== Report Generation ==========

/// Aggregates the stored snapshot over the requested range.
pub fn generate_report_data<C: Clock, I: IdGenerator>(
    db: &Database,
    engine: &Engine<C, I>,
    from: Option<DayKey>,
    to: Option<DayKey>,
) -> Result<ReportData> {
    if let (Some(from), Some(to)) = (from, to) {
        ensure!(from <= to, "--from {from} is after --to {to}");
    }

    let snapshot = load_or_seed(db);
    let timezone = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string());

    Ok(ReportData {
        generated_at: engine.now(),
        from,
        to,
        timezone,
        rows: engine.aggregate_between(&snapshot, from, to),
    })
}

/// Formats the period description for the report header.
fn format_period_description(from: Option<DayKey>, to: Option<DayKey>) -> String {
    let date = |day: DayKey| day.date().format("%b %-d, %Y").to_string();
    match (from, to) {
        (None, None) => "all days".to_string(),
        (Some(from), None) => format!("since {}", date(from)),
        (None, Some(to)) => format!("through {}", date(to)),
        (Some(from), Some(to)) if from == to => from.date().format("%A, %b %-d, %Y").to_string(),
        (Some(from), Some(to)) => format!("{} to {}", date(from), date(to)),
    }
}

/// Formats the human-readable report output.
pub fn format_report(data: &ReportData) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "ATTENDANCE REPORT: {}",
        format_period_description(data.from, data.to)
    )
    .unwrap();
    writeln!(output).unwrap();

    if data.rows.is_empty() {
        writeln!(output, "No children on the roster.").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Hint: Run 'att roster add' to add one.").unwrap();
        return output;
    }

    writeln!(output, "{:<8}  {:<26}  {:>4}  {:>8}", "ID", "Name", "Days", "Time").unwrap();
    writeln!(
        output,
        "────────  ──────────────────────────  ────  ────────"
    )
    .unwrap();

    for row in &data.rows {
        let mut name = row.name.clone();
        if !row.is_active {
            name.push_str(" (archived)");
        }
        writeln!(
            output,
            "{:<8}  {name:<26}  {:>4}  {:>8}",
            short_id(&row.child_id),
            row.days,
            format_duration(Some(row.minutes))
        )
        .unwrap();
    }

    let totals = ReportTotals::from_rows(&data.rows);
    writeln!(
        output,
        "────────  ──────────────────────────  ────  ────────"
    )
    .unwrap();
    writeln!(
        output,
        "{:<36}  {:>4}  {:>8}",
        "TOTAL",
        totals.days,
        format_duration(Some(totals.minutes))
    )
    .unwrap();

    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: String,
    pub timezone: &'a str,
    pub period: JsonPeriod,
    pub rows: &'a [ReportRow],
    pub totals: ReportTotals,
}

#[derive(Debug, Serialize)]
pub struct JsonPeriod {
    pub from: Option<DayKey>,
    pub to: Option<DayKey>,
}

/// Formats report data as JSON.
pub fn format_report_json(data: &ReportData) -> Result<String> {
    let report = JsonReport {
        generated_at: data.generated_at.to_rfc3339(),
        timezone: &data.timezone,
        period: JsonPeriod {
            from: data.from,
            to: data.to,
        },
        rows: &data.rows,
        totals: ReportTotals::from_rows(&data.rows),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: std::io::Write, C: Clock, I: IdGenerator>(
    writer: &mut W,
    db: &Database,
    engine: &Engine<C, I>,
    from: Option<DayKey>,
    to: Option<DayKey>,
    json: bool,
) -> Result<()> {
    let data = generate_report_data(db, engine, from, to)?;

    if json {
        writeln!(writer, "{}", format_report_json(&data)?)?;
    } else {
        write!(writer, "{}", format_report(&data))?;
    }
    Ok(())
}
