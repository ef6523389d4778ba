//! Configuration file handling for connection settings.
//!
//! An optional `.mig.json` in the current directory (or any file passed via
//! `--config`) supplies defaults for the connection flags:
//!
//! ```json
//! {
//!   "connection": {
//!     "driver": "mysql",
//!     "dbname": "shop",
//!     "user": "root",
//!     "host": "db.internal",
//!     "port": 3306
//!   }
//! }
//! ```
//!
//! Every field is optional. Flags given on the command line win.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".mig.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing required setting '{field}' (pass --{field} or set connection.{field} in .mig.json)")]
    MissingField { field: &'static str },
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub connection: ConnectionProfile,
}

/// Connection settings; any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionProfile {
    pub driver: Option<String>,
    pub dbname: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub protocol: Option<String>,
    pub charset: Option<String>,
    pub dbpath: Option<String>,
    pub table: Option<String>,
    pub sslmode: Option<String>,
}

impl ConfigFile {
    /// Load and parse the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Resolve the configuration for this run.
    ///
    /// An explicit path must exist. Without one, `.mig.json` in the current
    /// directory is used when present and an empty configuration otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
