use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use super::CreateCmd;
use crate::commands::Execute;
use crate::db::{build_descriptor, redacted_descriptor, Backend, ConnectionParameters, Session};
use crate::error::MigError;

/// Result of creating a database
#[derive(Debug, Clone, Serialize)]
pub struct CreateResult {
    pub driver: Backend,
    pub dbname: String,
    /// Descriptor with the password masked
    pub descriptor: String,
    pub statements: Vec<String>,
    #[serde(rename = "elapsed_ms", serialize_with = "crate::output::serialize_millis")]
    pub elapsed: Duration,
}

impl Execute for CreateCmd {
    type Output = CreateResult;

    fn execute(self, params: &ConnectionParameters) -> Result<Self::Output, MigError> {
        let start = Instant::now();
        // The database may not exist yet, so the descriptor must not name it.
        let descriptor = build_descriptor(params, false)?;
        let statements = params.backend.create_statements(params);

        let mut session = Session::open(params.backend, &descriptor)?;
        for statement in &statements {
            session.execute(statement)?;
        }
        session.close()?;

        info!(driver = %params.backend, dbname = %params.dbname, "database created");
        Ok(CreateResult {
            driver: params.backend,
            dbname: params.dbname.clone(),
            descriptor: redacted_descriptor(params, false)?,
            statements,
            elapsed: start.elapsed(),
        })
    }
}
