mod execute;
mod output;

use clap::Args;

use super::ConnectionArgs;
use crate::output::OutputFormat;

pub use execute::{run_loop, LoopStats, SqlResult};

/// Input lines that end the statement loop.
pub const SENTINELS: [&str; 5] = ["q", "exit", "\\q", "/q", ".exit"];

/// Whether `line` (after trimming) asks to leave the loop.
pub fn is_sentinel(line: &str) -> bool {
    SENTINELS.contains(&line.trim())
}

/// Read SQL statements from stdin and run them one by one
#[derive(Args, Debug)]
#[command(after_help = "\
Each input line is sent to the database as one statement. Rows are printed
after every statement; a failing statement is reported and the loop goes on.
Leave with q, exit, \\q, /q, .exit or end of input.

Examples:
  mig sql --driver sqlite3 --dbname app
  echo 'SELECT 1' | mig sql --driver postgres --dbname shop -u admin")]
pub struct SqlCmd {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Table name [default: scheme_info]
    #[arg(long, visible_alias = "tbl")]
    pub table: Option<String>,

    /// Format of the per-statement results; set from the global --format flag
    #[arg(skip)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("q")]
    #[case("exit")]
    #[case("\\q")]
    #[case("/q")]
    #[case(".exit")]
    #[case("  q  ")]
    #[case("exit\n")]
    fn test_sentinels(#[case] line: &str) {
        assert!(is_sentinel(line));
    }

    #[rstest]
    #[case("")]
    #[case("quit")]
    #[case("Q")]
    #[case("SELECT 'q'")]
    #[case("q;")]
    fn test_not_sentinels(#[case] line: &str) {
        assert!(!is_sentinel(line));
    }
}
