use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use att_core::{Engine, UuidIds};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use att_cli::commands::{check, init, report, roster, status};
use att_cli::{Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(att_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = att_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command output stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Init) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            init::run(&mut out, &mut db, &config.database_path)?;
        }
        Some(Commands::CheckIn(args)) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            check::run_cli(&mut out, &mut db, config.clock()?, check::Direction::In, args)?;
        }
        Some(Commands::CheckOut(args)) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            check::run_cli(&mut out, &mut db, config.clock()?, check::Direction::Out, args)?;
        }
        Some(Commands::Status { date }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let engine = Engine::new(config.clock()?, UuidIds);
            status::run(&mut out, &db, &engine, *date)?;
        }
        Some(Commands::Report { from, to, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let engine = Engine::new(config.clock()?, UuidIds);
            report::run(&mut out, &db, &engine, *from, *to, *json)?;
        }
        Some(Commands::Roster(action)) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            let engine = Engine::new(config.clock()?, UuidIds);
            roster::run(&mut out, &mut db, &engine, action)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(out)?;
        }
    }

    Ok(())
}
