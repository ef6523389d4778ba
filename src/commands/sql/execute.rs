use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use super::{is_sentinel, SqlCmd};
use crate::commands::Execute;
use crate::db::{build_descriptor, redacted_descriptor, Backend, ConnectionParameters, Session};
use crate::error::MigError;
use crate::output::{render_error, OutputFormat, Outputable};

/// Statement counts of one loop run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoopStats {
    /// Statements sent to the database, failed ones included
    pub executed: usize,
    pub failed: usize,
}

/// Summary of an interactive session
#[derive(Debug, Clone, Serialize)]
pub struct SqlResult {
    pub driver: Backend,
    pub descriptor: String,
    #[serde(flatten)]
    pub stats: LoopStats,
    #[serde(rename = "elapsed_ms", serialize_with = "crate::output::serialize_millis")]
    pub elapsed: Duration,
}

/// Prompt, read a line, run it, print the rows; until a sentinel or EOF.
///
/// Blank lines are skipped. A failing statement is reported on `output` and
/// counted; it does not end the loop. Only I/O errors on `input` or `output`
/// abort it.
///
/// In JSON format there is no prompt and every statement writes exactly one
/// line: the compact result set, or an object with `statement` and `error`.
pub fn run_loop<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    output: &mut W,
    format: OutputFormat,
) -> io::Result<LoopStats> {
    let interactive = format == OutputFormat::Table;
    let mut stats = LoopStats::default();
    let mut line = String::new();

    loop {
        if interactive {
            write!(output, "{}> ", session.backend())?;
            output.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            if interactive {
                writeln!(output)?;
            }
            break;
        }
        let statement = line.trim();
        if is_sentinel(statement) {
            break;
        }
        if statement.is_empty() {
            continue;
        }

        stats.executed += 1;
        let start = Instant::now();
        match (session.query(statement), format) {
            (Ok(result), OutputFormat::Table) => {
                writeln!(output, "\n{}\n\nDONE ({:?})", result.to_table(), start.elapsed())?;
            }
            (Ok(result), OutputFormat::Json) => {
                writeln!(output, "{}", serde_json::to_string(&result).unwrap_or_default())?;
            }
            (Err(err), format) => {
                stats.failed += 1;
                debug!(error = %err, "statement failed");
                match format {
                    OutputFormat::Table => writeln!(output, "\n{}\n", render_error(&err))?,
                    OutputFormat::Json => {
                        let report = json!({ "statement": statement, "error": render_error(&err) });
                        writeln!(output, "{}", report)?
                    }
                }
            }
        }
    }

    Ok(stats)
}

impl SqlCmd {
    /// Open a session and run the statement loop over `input`.
    pub fn execute_with<R: BufRead, W: Write>(
        self,
        params: &ConnectionParameters,
        input: R,
        output: &mut W,
    ) -> Result<SqlResult, MigError> {
        let descriptor = build_descriptor(params, true)?;
        let shown = redacted_descriptor(params, true)?;

        let mut session = Session::open_existing(params.backend, &descriptor)?;
        if self.format == OutputFormat::Table {
            writeln!(output, "Connection query:\n{}\n", shown)?;
        }

        let start = Instant::now();
        let stats = run_loop(&mut session, input, output, self.format)?;
        let elapsed = start.elapsed();
        session.close()?;

        info!(executed = stats.executed, failed = stats.failed, "statement loop finished");
        Ok(SqlResult {
            driver: params.backend,
            descriptor: shown,
            stats,
            elapsed,
        })
    }
}

impl Execute for SqlCmd {
    type Output = SqlResult;

    fn execute(self, params: &ConnectionParameters) -> Result<Self::Output, MigError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut output = stdout.lock();
        self.execute_with(params, stdin.lock(), &mut output)
    }
}
