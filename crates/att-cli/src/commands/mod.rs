//! CLI subcommand implementations.

pub mod check;
pub mod init;
pub mod report;
pub mod roster;
pub mod status;
pub mod util;
