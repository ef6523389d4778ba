//! Resolved connection parameters.

use serde::Serialize;

use super::Backend;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PROTOCOL: &str = "tcp";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_CHARSET: &str = "utf8";
pub const DEFAULT_DBPATH: &str = "./";
pub const DEFAULT_TABLE: &str = "scheme_info";
pub const DEFAULT_SSLMODE: &str = "disable";

/// Placeholder shown instead of the real password in reports.
pub const REDACTED_PASSWORD: &str = "***";

/// Everything needed to reach one database on one backend.
///
/// Built once per invocation from CLI flags and the optional config file,
/// then only read. The backend is already validated against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionParameters {
    pub backend: Backend,
    pub host: String,
    pub protocol: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    #[serde(skip)]
    pub password: String,
    pub charset: String,
    pub dbpath: String,
    pub table: String,
    pub sslmode: String,
}

impl ConnectionParameters {
    /// Parameters for `dbname` on `backend` with every other field defaulted.
    pub fn new(backend: Backend, dbname: impl Into<String>) -> Self {
        Self {
            backend,
            host: DEFAULT_HOST.to_string(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            port: DEFAULT_PORT,
            dbname: dbname.into(),
            user: String::new(),
            password: String::new(),
            charset: DEFAULT_CHARSET.to_string(),
            dbpath: DEFAULT_DBPATH.to_string(),
            table: DEFAULT_TABLE.to_string(),
            sslmode: DEFAULT_SSLMODE.to_string(),
        }
    }

    /// Copy with the password masked, for anything that ends up on screen.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.password.is_empty() {
            copy.password = REDACTED_PASSWORD.to_string();
        }
        copy
    }
}
