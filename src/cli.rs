//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::commands::Command;
use crate::db::list_supported;
use crate::output::OutputFormat;

pub const APP_NAME: &str = "Database migration utility";

#[derive(Parser, Debug)]
#[command(name = "mig", author, version, about = APP_NAME, long_about = None)]
pub struct Args {
    /// Display available drivers
    #[arg(long)]
    pub drivers: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// JSON file with connection defaults (default: ./.mig.json if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Shown on stderr when the tool is run without arguments.
pub fn usage_banner() -> String {
    format!(
        "{}\nv{}\n\nUse -h to display help information.\n\nAvailable drivers: {}",
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        list_supported(false)
    )
}
