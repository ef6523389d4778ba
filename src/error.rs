//! Top-level error type for command runs.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DbError;

/// Anything a command run can fail with.
///
/// `Db` failures are operation outcomes and get reported to the operator;
/// the other variants mean the run never got that far.
#[derive(Error, Debug)]
pub enum MigError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
