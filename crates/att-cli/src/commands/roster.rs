//! Roster commands: list, add, update, archive, restore.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use att_core::time::PLACEHOLDER;
use att_core::{Child, ChildFields, Clock, Engine, IdGenerator, Snapshot, load_or_seed};
use att_db::Database;
use serde::Serialize;

use super::util::{resolve_child, short_id};
use crate::cli::{AddArgs, RosterAction, UpdateArgs};

/// Dispatches a roster subcommand.
pub fn run<W: Write, C: Clock, I: IdGenerator>(
    writer: &mut W,
    db: &mut Database,
    engine: &Engine<C, I>,
    action: &RosterAction,
) -> Result<()> {
    match action {
        RosterAction::List { all, json } => list(writer, db, *all, *json),
        RosterAction::Add(args) => add(writer, db, engine, args),
        RosterAction::Update(args) => update(writer, db, engine, args),
        RosterAction::Archive { child } => set_active(writer, db, engine, child, false),
        RosterAction::Restore { child } => set_active(writer, db, engine, child, true),
    }
}

// ========== List ==========

#[derive(Debug, Serialize)]
struct JsonChild<'a> {
    #[serde(flatten)]
    child: &'a Child,
    name: String,
}

fn list<W: Write>(writer: &mut W, db: &Database, all: bool, json: bool) -> Result<()> {
    let snapshot = load_or_seed(db);
    let children: Vec<&Child> = snapshot
        .children
        .iter()
        .filter(|c| all || c.is_active)
        .collect();

    if json {
        let entries: Vec<JsonChild<'_>> = children
            .iter()
            .map(|child| JsonChild {
                child,
                name: child.display_name(),
            })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        write!(writer, "{}", format_roster(&children))?;
    }
    Ok(())
}

/// Formats the roster table.
pub fn format_roster(children: &[&Child]) -> String {
    let mut output = String::new();

    if children.is_empty() {
        writeln!(output, "No children on the roster.").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "Hint: Run 'att roster add --first <name> --last <name> --guardian <name>'."
        )
        .unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<8}  {:<24}  {:<18}  Allergies",
        "ID", "Name", "Guardian"
    )
    .unwrap();
    writeln!(
        output,
        "────────  ────────────────────────  ──────────────────  ──────────"
    )
    .unwrap();

    for child in children {
        let mut name = child.display_name();
        if !child.is_active {
            name.push_str(" (archived)");
        }
        writeln!(
            output,
            "{:<8}  {name:<24}  {:<18}  {}",
            short_id(&child.id),
            child.guardian,
            child.allergies.as_deref().unwrap_or(PLACEHOLDER)
        )
        .unwrap();
    }

    output
}

// ========== Edits ==========

fn add<W: Write, C: Clock, I: IdGenerator>(
    writer: &mut W,
    db: &mut Database,
    engine: &Engine<C, I>,
    args: &AddArgs,
) -> Result<()> {
    let mut fields = ChildFields::new(&args.first, &args.last, &args.guardian);
    fields.allergies.clone_from(&args.allergies);
    // The engine declines invalid input silently; report it here instead
    fields.validate().context("cannot add child")?;

    let snapshot = load_or_seed(&*db);
    let next = engine.add_child(&snapshot, &fields);
    let child = next
        .children
        .last()
        .filter(|_| next.children.len() > snapshot.children.len())
        .context("child was not added")?;

    save(db, &next)?;
    writeln!(writer, "Added {} ({})", child.display_name(), child.id)?;
    Ok(())
}

fn update<W: Write, C: Clock, I: IdGenerator>(
    writer: &mut W,
    db: &mut Database,
    engine: &Engine<C, I>,
    args: &UpdateArgs,
) -> Result<()> {
    let snapshot = load_or_seed(&*db);
    let child = resolve_child(&snapshot, &args.child)?;

    let mut fields = ChildFields::from(child);
    if let Some(first) = &args.first {
        fields.first_name.clone_from(first);
    }
    if let Some(last) = &args.last {
        fields.last_name.clone_from(last);
    }
    if let Some(guardian) = &args.guardian {
        fields.guardian.clone_from(guardian);
    }
    if let Some(allergies) = &args.allergies {
        fields.allergies = Some(allergies.clone());
    }
    fields.validate().context("cannot update child")?;

    let next = engine.update_child(&snapshot, &child.id, &fields);
    save(db, &next)?;
    let updated = next.child(&child.id).context("child disappeared")?;
    writeln!(writer, "Updated {} ({})", updated.display_name(), updated.id)?;
    Ok(())
}

fn set_active<W: Write, C: Clock, I: IdGenerator>(
    writer: &mut W,
    db: &mut Database,
    engine: &Engine<C, I>,
    query: &str,
    active: bool,
) -> Result<()> {
    let snapshot = load_or_seed(&*db);
    let child = resolve_child(&snapshot, query)?;

    let next = if active {
        engine.restore_child(&snapshot, &child.id)
    } else {
        engine.archive_child(&snapshot, &child.id)
    };
    save(db, &next)?;

    let verb = if active { "Restored" } else { "Archived" };
    writeln!(writer, "{verb} {} ({})", child.display_name(), child.id)?;
    Ok(())
}

fn save(db: &mut Database, snapshot: &Snapshot) -> Result<()> {
    db.write_snapshot(snapshot).context("failed to save roster")
}

#[cfg(test)]
mod tests {
    use super::*;

    use att_core::{ChildId, FixedClock, SequentialIds, StateStore};
    use chrono::DateTime;
    use insta::assert_snapshot;

    fn engine() -> Engine<FixedClock, SequentialIds> {
        let now = DateTime::parse_from_rfc3339("2025-01-29T08:00:00-05:00").unwrap();
        Engine::new(FixedClock(now), SequentialIds::new("k"))
    }

    fn add_args(first: &str, guardian: &str, allergies: Option<&str>) -> RosterAction {
        RosterAction::Add(AddArgs {
            first: first.to_string(),
            last: "Doe".to_string(),
            guardian: guardian.to_string(),
            allergies: allergies.map(String::from),
        })
    }

    fn run_ok(db: &mut Database, engine: &Engine<FixedClock, SequentialIds>, action: &RosterAction) -> String {
        let mut output = Vec::new();
        run(&mut output, db, engine, action).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn add_list_archive_restore() {
        let mut db = Database::open_in_memory().unwrap();
        let e = engine();

        assert_eq!(run_ok(&mut db, &e, &add_args("Ann", "Pat", None)), "Added Ann Doe (k1)\n");
        run_ok(&mut db, &e, &add_args("Bo", "Sam", Some("peanuts")));
        assert_eq!(
            run_ok(&mut db, &e, &RosterAction::Archive { child: "k1".into() }),
            "Archived Ann Doe (k1)\n"
        );

        let active = run_ok(&mut db, &e, &RosterAction::List { all: false, json: false });
        assert_snapshot!(active, @r"
        ID        Name                      Guardian            Allergies
        ────────  ────────────────────────  ──────────────────  ──────────
        k2        Bo Doe                    Sam                 peanuts
        ");

        let all = run_ok(&mut db, &e, &RosterAction::List { all: true, json: false });
        assert_snapshot!(all, @r"
        ID        Name                      Guardian            Allergies
        ────────  ────────────────────────  ──────────────────  ──────────
        k1        Ann Doe (archived)        Pat                 —
        k2        Bo Doe                    Sam                 peanuts
        ");

        run_ok(&mut db, &e, &RosterAction::Restore { child: "k1".into() });
        let snapshot = db.load().unwrap();
        assert!(snapshot.children.iter().all(|c| c.is_active));
    }

    #[test]
    fn add_rejects_blank_fields_without_saving() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        let result = run(&mut output, &mut db, &engine(), &add_args("Ann", "  ", None));

        assert!(result.is_err());
        assert!(db.load().is_none());
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut db = Database::open_in_memory().unwrap();
        let e = engine();
        run_ok(&mut db, &e, &add_args("Ann", "Pat", Some("eggs")));

        let output = run_ok(
            &mut db,
            &e,
            &RosterAction::Update(UpdateArgs {
                child: "k1".into(),
                first: Some("Anne".into()),
                last: None,
                guardian: None,
                allergies: Some(String::new()),
            }),
        );
        assert_eq!(output, "Updated Anne Doe (k1)\n");

        let snapshot = db.load().unwrap();
        let child = snapshot.child(&ChildId::new("k1").unwrap()).unwrap();
        assert_eq!(child.first_name, "Anne");
        assert_eq!(child.guardian, "Pat");
        assert_eq!(child.allergies, None);
    }

    #[test]
    fn list_json_includes_display_name() {
        let mut db = Database::open_in_memory().unwrap();
        let e = engine();
        run_ok(&mut db, &e, &add_args("Ann", "Pat", None));

        let output = run_ok(&mut db, &e, &RosterAction::List { all: true, json: true });
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["id"], "k1");
        assert_eq!(value[0]["name"], "Ann Doe");
        assert_eq!(value[0]["is_active"], true);
    }

    #[test]
    fn empty_roster_shows_hint() {
        let output = format_roster(&[]);
        assert!(output.starts_with("No children on the roster."));
    }
}
