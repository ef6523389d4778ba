//! Output formatting for command results.
//!
//! Supports two output formats: table (human-readable) and JSON.

use std::time::Duration;

use clap::ValueEnum;
use serde::{Serialize, Serializer};

use crate::db::{list_supported, DbError, ResultSet};

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Trait for types that can be formatted for output
pub trait Outputable: Serialize {
    /// Format as a human-readable table
    fn to_table(&self) -> String;

    /// Format according to the specified output format
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }
}

/// Serialize an elapsed time as fractional milliseconds.
pub fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_nanos() as f64 / 1_000_000.0)
}

/// Rows as numbered blocks with sorted columns, then a count line.
///
/// ```text
/// { 1/2
///   id: 1
///   name: a
/// },
/// { 2/2
///   id: 2
///   name: b
/// }
///
/// Fetched 2 result(s).
/// ```
impl Outputable for ResultSet {
    fn to_table(&self) -> String {
        let total = self.len();
        let mut lines = Vec::new();

        for (i, row) in self.iter().enumerate() {
            lines.push(format!("{{ {}/{}", i + 1, total));
            for (column, value) in row.iter() {
                lines.push(format!("  {}: {}", column, value));
            }
            lines.push(if i + 1 == total { "}" } else { "}," }.to_string());
        }

        if total > 0 {
            lines.push(String::new());
        }
        lines.push(format!("Fetched {} result(s).", total));
        lines.join("\n")
    }
}

/// Operator-facing report of a failed operation.
///
/// An unknown driver is followed by the list of drivers that would work.
pub fn render_error(err: &DbError) -> String {
    match err {
        DbError::UnsupportedDriver { .. } => {
            format!("{}\n\nAvailable drivers: {}", err, list_supported(false))
        }
        _ => err.to_string(),
    }
}
