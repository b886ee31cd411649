//! Init command: creates the database and stores an empty roster.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use att_core::Snapshot;
use att_db::{Database, SNAPSHOT_KEY};

/// Runs the init command.
///
/// Existing data is left alone.
pub fn run<W: Write>(writer: &mut W, db: &mut Database, db_path: &Path) -> Result<()> {
    let existing = db
        .read_snapshot()
        .context("stored attendance data is unreadable")?;

    match existing {
        Some(snapshot) => {
            let saved_at = db.updated_at(SNAPSHOT_KEY)?;
            writeln!(writer, "Database: {}", db_path.display())?;
            writeln!(
                writer,
                "Already initialized: {} children, {} days recorded",
                snapshot.children.len(),
                snapshot.history.days().count()
            )?;
            if let Some(saved_at) = saved_at {
                writeln!(writer, "Last saved: {saved_at}")?;
            }
        }
        None => {
            db.write_snapshot(&Snapshot::seed())
                .context("failed to write initial data")?;
            tracing::info!(path = %db_path.display(), "initialized database");
            writeln!(writer, "Database: {}", db_path.display())?;
            writeln!(writer, "Initialized with an empty roster.")?;
        }
    }

    Ok(())
}
