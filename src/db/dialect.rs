//! Per-backend statement text for the administrative commands.

use std::path::PathBuf;

use super::{Backend, ConnectionParameters};

/// What dropping a database means for a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    /// Run these statements over a session.
    Statements(Vec<String>),
    /// Delete the database file; no session is opened.
    RemoveFile(PathBuf),
}

impl Backend {
    /// Statements that create `params.dbname`, in execution order.
    ///
    /// Empty for SQLite, where opening the file is the creation.
    pub fn create_statements(self, params: &ConnectionParameters) -> Vec<String> {
        match self {
            Backend::Sqlite => Vec::new(),
            Backend::Mysql => vec![
                format!(
                    "CREATE DATABASE {} CHARACTER SET {}",
                    params.dbname, params.charset
                ),
                format!("USE {}", params.dbname),
            ],
            Backend::Postgres => vec![format!(
                "CREATE DATABASE {} OWNER {} ENCODING '{}'",
                params.dbname,
                params.user,
                params.charset.to_uppercase()
            )],
        }
    }

    /// How to drop `params.dbname`. `descriptor` is the SQLite file path.
    pub fn drop_action(self, params: &ConnectionParameters, descriptor: &str) -> DropAction {
        match self {
            Backend::Sqlite => DropAction::RemoveFile(PathBuf::from(descriptor)),
            Backend::Mysql | Backend::Postgres => {
                DropAction::Statements(vec![format!("DROP DATABASE {}", params.dbname)])
            }
        }
    }

    /// Statement listing the columns of `table`.
    pub fn describe_statement(self, table: &str) -> String {
        match self {
            Backend::Sqlite => format!("PRAGMA table_info({})", table),
            Backend::Mysql => format!("DESCRIBE {}", table),
            // No DESCRIBE shorthand; read the catalog. attstattarget is NULL
            // (default target) on newer servers, so coalesce before comparing.
            Backend::Postgres => format!(
                "SELECT attname FROM pg_attribute, pg_class \
                 WHERE attrelid = pg_class.oid AND relname = '{}' \
                 AND attnum > 0 AND COALESCE(attstattarget, -1) <> 0",
                table
            ),
        }
    }
}
