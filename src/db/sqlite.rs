//! Embedded SQLite backend (rusqlite).

use rusqlite::types::ValueRef;
use rusqlite::{Batch, Connection, OpenFlags, Rows};

use super::materialize::{materialize, RawValue, RowCursor};
use super::session::NativeHandle;
use super::{Backend, DbError, ResultSet};

pub(crate) struct SqliteHandle {
    conn: Connection,
}

impl SqliteHandle {
    /// Open the database file at `path`, creating it when `create` is set.
    ///
    /// Without `create` a missing file is a connection error.
    pub(crate) fn open(path: &str, create: bool) -> Result<Self, DbError> {
        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if create {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }
        Connection::open_with_flags(path, flags)
            .map(|conn| Self { conn })
            .map_err(|e| DbError::connection(Backend::Sqlite, e))
    }
}

impl NativeHandle for SqliteHandle {
    fn execute(&mut self, statement: &str) -> Result<u64, DbError> {
        let mut batch = Batch::new(&self.conn, statement);
        let mut affected = 0;
        while let Some(mut stmt) = batch.next().map_err(|e| DbError::statement(statement, e))? {
            affected += stmt.execute([]).map_err(|e| DbError::statement(statement, e))? as u64;
        }
        Ok(affected)
    }

    /// Every statement in `statement` runs, in order; the rows of the first
    /// one make up the result.
    fn query(&mut self, statement: &str) -> Result<ResultSet, DbError> {
        let mut batch = Batch::new(&self.conn, statement);
        let mut first: Option<ResultSet> = None;
        while let Some(mut stmt) = batch.next().map_err(|e| DbError::statement(statement, e))? {
            let width = stmt.column_count();
            let rows = stmt.query([]).map_err(|e| DbError::statement(statement, e))?;
            let result = materialize(SqliteRows {
                rows,
                width,
                statement,
            })?;
            first.get_or_insert(result);
        }
        Ok(first.unwrap_or_default())
    }

    fn close(self) -> Result<(), DbError> {
        self.conn
            .close()
            .map_err(|(_, e)| DbError::connection(Backend::Sqlite, e))
    }
}

/// Streaming cursor over a prepared statement.
struct SqliteRows<'stmt, 'sql> {
    rows: Rows<'stmt>,
    width: usize,
    statement: &'sql str,
}

impl RowCursor for SqliteRows<'_, '_> {
    fn column_names(&self) -> Result<Vec<String>, DbError> {
        self.rows
            .as_ref()
            .map(|stmt| stmt.column_names().into_iter().map(String::from).collect())
            .ok_or_else(|| DbError::statement(self.statement, "column metadata unavailable"))
    }

    fn next_row(&mut self) -> Result<Option<Vec<RawValue>>, DbError> {
        let statement = self.statement;
        let Some(row) = self.rows.next().map_err(|e| DbError::statement(statement, e))? else {
            return Ok(None);
        };
        (0..self.width)
            .map(|i| row.get_ref(i).map(raw_value))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
            .map_err(|e| DbError::statement(statement, e))
    }
}

fn raw_value(value: ValueRef<'_>) -> RawValue {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string().into_bytes()),
        ValueRef::Real(f) => Some(f.to_string().into_bytes()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Some(bytes.to_vec()),
    }
}
