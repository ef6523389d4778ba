//! Database access layer.
//!
//! - [`driver`]: the registry of supported backends
//! - [`params`] and [`descriptor`]: resolved connection settings and the
//!   per-backend connection string built from them
//! - [`dialect`]: statement text for create, drop and describe
//! - [`session`]: one live native connection
//! - [`materialize`]: turning any cursor into a [`ResultSet`]
//!
//! Each backend module (`sqlite`, `mysql`, `postgres`) adapts one native
//! driver to the session's handle trait. Nothing outside this module knows
//! which driver crate backs which engine.

mod descriptor;
mod dialect;
mod driver;
mod materialize;
mod mysql;
mod params;
mod postgres;
mod session;
mod sqlite;

use std::fmt::Display;
use std::io;

use thiserror::Error;

pub use descriptor::{build_descriptor, redacted_descriptor, SQLITE_EXTENSION};
pub use dialect::DropAction;
pub use driver::{check_driver, is_supported, list_supported, Backend};
pub use materialize::{materialize, BufferedRows, RawValue, ResultRow, ResultSet, RowCursor};
pub use params::{
    ConnectionParameters, DEFAULT_CHARSET, DEFAULT_DBPATH, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_PROTOCOL, DEFAULT_SSLMODE, DEFAULT_TABLE, REDACTED_PASSWORD,
};
pub use session::Session;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("driver: {driver} is not available")]
    UnsupportedDriver { driver: String },

    #[error("Cannot build connection descriptor: {message}")]
    DescriptorBuild { message: String },

    #[error("Failed to connect to {backend}: {message}")]
    Connection { backend: Backend, message: String },

    #[error("Statement failed: {message}\n  statement: {statement}")]
    Statement { statement: String, message: String },

    #[error("Failed to remove database file '{path}': {source}")]
    FileRemoval {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl DbError {
    pub(crate) fn connection(backend: Backend, err: impl Display) -> Self {
        DbError::Connection {
            backend,
            message: err.to_string(),
        }
    }

    pub(crate) fn statement(statement: &str, err: impl Display) -> Self {
        DbError::Statement {
            statement: statement.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_unsupported_driver_message() {
        let err = DbError::UnsupportedDriver {
            driver: "oracle".to_string(),
        };
        assert_eq!(err.to_string(), "driver: oracle is not available");
    }

    #[rstest]
    fn test_statement_error_names_statement() {
        let err = DbError::statement("DROP DATABASE shop", "database doesn't exist");
        let message = err.to_string();
        assert!(message.contains("database doesn't exist"));
        assert!(message.contains("DROP DATABASE shop"));
    }

    #[rstest]
    fn test_connection_error_names_backend() {
        let err = DbError::connection(Backend::Postgres, "connection refused");
        assert_eq!(err.to_string(), "Failed to connect to postgres: connection refused");
    }
}
