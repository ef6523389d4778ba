use std::fs;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use super::DropCmd;
use crate::commands::Execute;
use crate::db::{
    build_descriptor, redacted_descriptor, Backend, ConnectionParameters, DbError, DropAction,
    Session,
};
use crate::error::MigError;

/// Result of dropping a database
#[derive(Debug, Clone, Serialize)]
pub struct DropResult {
    pub driver: Backend,
    pub dbname: String,
    pub descriptor: String,
    pub statements: Vec<String>,
    /// Set when the database was a file that got deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_file: Option<String>,
    #[serde(rename = "elapsed_ms", serialize_with = "crate::output::serialize_millis")]
    pub elapsed: Duration,
}

impl Execute for DropCmd {
    type Output = DropResult;

    fn execute(self, params: &ConnectionParameters) -> Result<Self::Output, MigError> {
        let start = Instant::now();
        let descriptor = build_descriptor(params, false)?;

        let (statements, removed_file) = match params.backend.drop_action(params, &descriptor) {
            DropAction::Statements(statements) => {
                let mut session = Session::open(params.backend, &descriptor)?;
                for statement in &statements {
                    session.execute(statement)?;
                }
                session.close()?;
                (statements, None)
            }
            DropAction::RemoveFile(path) => {
                let shown = path.display().to_string();
                fs::remove_file(&path).map_err(|source| DbError::FileRemoval {
                    path: shown.clone(),
                    source,
                })?;
                (Vec::new(), Some(shown))
            }
        };

        info!(driver = %params.backend, dbname = %params.dbname, "database dropped");
        Ok(DropResult {
            driver: params.backend,
            dbname: params.dbname.clone(),
            descriptor: redacted_descriptor(params, false)?,
            statements,
            removed_file,
            elapsed: start.elapsed(),
        })
    }
}
