//! Shared test utilities for execute and integration tests.
//!
//! Command tests run against real sqlite3 files in a temporary directory.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::db::{Backend, ConnectionParameters, ResultSet, Session, SQLITE_EXTENSION};

/// A temporary directory used as `--dbpath`.
pub struct SqliteDir {
    dir: TempDir,
}

impl SqliteDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the database file for `dbname`.
    pub fn db_file(&self, dbname: &str) -> PathBuf {
        self.path().join(format!("{}.{}", dbname, SQLITE_EXTENSION))
    }

    /// Create (or extend) `dbname` by running a batch of statements.
    pub fn seed(&self, dbname: &str, batch: &str) {
        let conn = rusqlite::Connection::open(self.db_file(dbname)).expect("Failed to open sqlite file");
        conn.execute_batch(batch).expect("Seed statements should succeed");
    }

    /// Run `statement` against `dbname` in a fresh session.
    pub fn query(&self, dbname: &str, statement: &str) -> ResultSet {
        let path = self.db_file(dbname);
        let mut session = Session::open(Backend::Sqlite, path.to_str().expect("utf-8 temp path"))
            .expect("Failed to open session");
        session.query(statement).expect("Query should succeed")
    }
}

impl Default for SqliteDir {
    fn default() -> Self {
        Self::new()
    }
}

/// sqlite3 parameters for `dbname` stored under `dir`.
pub fn sqlite_params(dir: &SqliteDir, dbname: &str) -> ConnectionParameters {
    ConnectionParameters {
        dbpath: format!("{}/", dir.path().display()),
        ..ConnectionParameters::new(Backend::Sqlite, dbname)
    }
}
