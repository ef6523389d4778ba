//! Database sessions.
//!
//! A [`Session`] owns exactly one native connection for one backend. It is a
//! plain value owned by the command that opened it; dropping it closes the
//! connection, so every early return releases the handle.

use enum_dispatch::enum_dispatch;
use tracing::{debug, warn};

use super::mysql::MysqlHandle;
use super::postgres::PostgresHandle;
use super::sqlite::SqliteHandle;
use super::{Backend, DbError, ResultSet};

/// Operations every native connection supports.
#[enum_dispatch]
pub(crate) trait NativeHandle {
    /// Run a statement, returning the affected row count.
    fn execute(&mut self, statement: &str) -> Result<u64, DbError>;

    /// Run a statement and materialize whatever rows it yields.
    fn query(&mut self, statement: &str) -> Result<ResultSet, DbError>;

    /// Release the connection.
    fn close(self) -> Result<(), DbError>;
}

#[enum_dispatch(NativeHandle)]
pub(crate) enum Handle {
    SqliteHandle,
    MysqlHandle,
    PostgresHandle,
}

/// A live connection to one backend.
pub struct Session {
    backend: Backend,
    handle: Option<Handle>,
}

impl Session {
    /// Open `descriptor` with the backend's native driver.
    ///
    /// A sqlite3 file that does not exist yet is created. Failures are
    /// reported as [`DbError::Connection`] and never retried.
    pub fn open(backend: Backend, descriptor: &str) -> Result<Self, DbError> {
        Self::connect(backend, descriptor, true)
    }

    /// Like [`open`](Self::open), but a missing sqlite3 file is an error
    /// instead of being created empty.
    pub fn open_existing(backend: Backend, descriptor: &str) -> Result<Self, DbError> {
        Self::connect(backend, descriptor, false)
    }

    fn connect(backend: Backend, descriptor: &str, create: bool) -> Result<Self, DbError> {
        debug!(%backend, create, "opening session");
        let handle: Handle = match backend {
            Backend::Sqlite => SqliteHandle::open(descriptor, create)?.into(),
            Backend::Mysql => MysqlHandle::open(descriptor)?.into(),
            Backend::Postgres => PostgresHandle::open(descriptor)?.into(),
        };
        Ok(Self {
            backend,
            handle: Some(handle),
        })
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Run `statement` verbatim and return the affected row count.
    pub fn execute(&mut self, statement: &str) -> Result<u64, DbError> {
        debug!(backend = %self.backend, statement, "execute");
        self.handle_for(statement)?.execute(statement)
    }

    /// Run `statement` verbatim and materialize its rows.
    pub fn query(&mut self, statement: &str) -> Result<ResultSet, DbError> {
        debug!(backend = %self.backend, statement, "query");
        self.handle_for(statement)?.query(statement)
    }

    /// Close the connection. Calling it again is a no-op.
    pub fn close(&mut self) -> Result<(), DbError> {
        match self.handle.take() {
            Some(handle) => {
                debug!(backend = %self.backend, "closing session");
                handle.close()
            }
            None => Ok(()),
        }
    }

    fn handle_for(&mut self, statement: &str) -> Result<&mut Handle, DbError> {
        self.handle.as_mut().ok_or_else(|| DbError::Statement {
            statement: statement.to_string(),
            message: "session is closed".to_string(),
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!(backend = %self.backend, error = %err, "failed to close session");
        }
    }
}
