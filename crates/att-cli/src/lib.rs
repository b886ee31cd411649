//! Attendance CLI library.
//!
//! This crate provides the CLI interface for the attendance tracker.

mod cli;
pub mod commands;
mod config;

pub use cli::{AddArgs, CheckArgs, Cli, Commands, RosterAction, UpdateArgs};
pub use config::Config;
