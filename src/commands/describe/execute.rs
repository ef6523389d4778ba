use std::time::{Duration, Instant};

use serde::Serialize;

use super::DescribeCmd;
use crate::commands::Execute;
use crate::db::{
    build_descriptor, redacted_descriptor, Backend, ConnectionParameters, ResultSet, Session,
};
use crate::error::MigError;

/// Result of describing a table
#[derive(Debug, Clone, Serialize)]
pub struct DescribeResult {
    pub driver: Backend,
    pub descriptor: String,
    pub table: String,
    pub statement: String,
    pub result: ResultSet,
    #[serde(rename = "elapsed_ms", serialize_with = "crate::output::serialize_millis")]
    pub elapsed: Duration,
}

impl Execute for DescribeCmd {
    type Output = DescribeResult;

    fn execute(self, params: &ConnectionParameters) -> Result<Self::Output, MigError> {
        let descriptor = build_descriptor(params, true)?;
        let statement = params.backend.describe_statement(&params.table);

        let mut session = Session::open_existing(params.backend, &descriptor)?;
        let start = Instant::now();
        let result = session.query(&statement)?;
        let elapsed = start.elapsed();
        session.close()?;

        Ok(DescribeResult {
            driver: params.backend,
            descriptor: redacted_descriptor(params, true)?,
            table: params.table.clone(),
            statement,
            result,
            elapsed,
        })
    }
}
