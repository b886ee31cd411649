//! Command-line argument definitions.

use std::path::PathBuf;

use att_core::DayKey;
use clap::{Args, Parser, Subcommand};

/// Child-care attendance tracker.
///
/// Records daily check-ins and check-outs with notes and totals attendance
/// per child across days.
#[derive(Debug, Parser)]
#[command(name = "att", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the database if it does not exist yet.
    Init,

    /// Check a child in, starting a new session for today.
    CheckIn(CheckArgs),

    /// Check a child out, closing today's session.
    CheckOut(CheckArgs),

    /// Show today's attendance board.
    Status {
        /// Show this day instead of today (YYYY-MM-DD).
        #[arg(long)]
        date: Option<DayKey>,
    },

    /// Show attendance totals per child.
    Report {
        /// First day to include (YYYY-MM-DD).
        #[arg(long)]
        from: Option<DayKey>,

        /// Last day to include (YYYY-MM-DD).
        #[arg(long)]
        to: Option<DayKey>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Manage the roster.
    #[command(subcommand)]
    Roster(RosterAction),
}

/// Arguments shared by check-in and check-out.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Child ID (or a unique prefix of it).
    pub child: String,

    /// Note to attach; repeat to combine several.
    #[arg(short, long = "note")]
    pub notes: Vec<String>,

    /// When it happened, if not now (e.g., "09:15", "20 minutes ago").
    #[arg(long)]
    pub at: Option<String>,
}

/// Roster subcommands.
#[derive(Debug, Subcommand)]
pub enum RosterAction {
    /// List children on the roster.
    List {
        /// Include archived children.
        #[arg(long)]
        all: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add a child to the roster.
    Add(AddArgs),

    /// Edit a child's details.
    Update(UpdateArgs),

    /// Archive a child; history is kept.
    Archive {
        /// Child ID (or a unique prefix of it).
        child: String,
    },

    /// Bring an archived child back onto the daily board.
    Restore {
        /// Child ID (or a unique prefix of it).
        child: String,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub first: String,

    #[arg(long)]
    pub last: String,

    /// Guardian responsible for drop-off and pickup.
    #[arg(long)]
    pub guardian: String,

    #[arg(long)]
    pub allergies: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Child ID (or a unique prefix of it).
    pub child: String,

    #[arg(long)]
    pub first: Option<String>,

    #[arg(long)]
    pub last: Option<String>,

    #[arg(long)]
    pub guardian: Option<String>,

    /// New allergies; an empty value clears them.
    #[arg(long)]
    pub allergies: Option<String>,
}
