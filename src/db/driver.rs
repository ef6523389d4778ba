//! Driver registry: the fixed set of backends the tool can talk to.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::DbError;

/// A supported database engine family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Backend {
    /// Embedded, file-based SQLite
    #[serde(rename = "sqlite3")]
    Sqlite,
    /// MySQL / MariaDB server
    #[serde(rename = "mysql")]
    Mysql,
    /// PostgreSQL server
    #[serde(rename = "postgres")]
    Postgres,
}

impl Backend {
    /// Every registered backend, in display order.
    pub const ALL: [Backend; 3] = [Backend::Sqlite, Backend::Mysql, Backend::Postgres];

    /// The identifier operators pass to `--driver`.
    pub fn id(self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite3",
            Backend::Mysql => "mysql",
            Backend::Postgres => "postgres",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Backend {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_driver(s)
    }
}

/// Whether `id` names a registered backend.
pub fn is_supported(id: &str) -> bool {
    Backend::ALL.iter().any(|backend| backend.id() == id)
}

/// Render the registered identifiers, one per line or comma-separated.
pub fn list_supported(multiline: bool) -> String {
    let sep = if multiline { "\n" } else { ", " };
    Backend::ALL
        .iter()
        .map(|backend| backend.id())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Resolve a driver identifier, failing with [`DbError::UnsupportedDriver`].
pub fn check_driver(id: &str) -> Result<Backend, DbError> {
    Backend::ALL
        .into_iter()
        .find(|backend| backend.id() == id)
        .ok_or_else(|| DbError::UnsupportedDriver {
            driver: id.to_string(),
        })
}
