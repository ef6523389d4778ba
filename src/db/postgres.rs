//! PostgreSQL backend.
//!
//! Statements go over the simple query protocol, which returns every value
//! in text form. That is exactly the representation the materializer wants,
//! so no type-aware decoding happens here.

use postgres::{Client, NoTls, SimpleQueryMessage};

use super::materialize::{materialize, BufferedRows, ResponsePart};
use super::session::NativeHandle;
use super::{Backend, DbError, ResultSet};

pub(crate) struct PostgresHandle {
    client: Client,
}

impl PostgresHandle {
    /// Connect using a key/value descriptor (`host=... user=... ...`).
    pub(crate) fn open(descriptor: &str) -> Result<Self, DbError> {
        Client::connect(descriptor, NoTls)
            .map(|client| Self { client })
            .map_err(|e| DbError::connection(Backend::Postgres, e))
    }
}

impl NativeHandle for PostgresHandle {
    fn execute(&mut self, statement: &str) -> Result<u64, DbError> {
        let messages = self
            .client
            .simple_query(statement)
            .map_err(|e| DbError::statement(statement, e))?;
        Ok(messages
            .iter()
            .filter_map(|message| match message {
                SimpleQueryMessage::CommandComplete(n) => Some(*n),
                _ => None,
            })
            .sum())
    }

    fn query(&mut self, statement: &str) -> Result<ResultSet, DbError> {
        let messages = self
            .client
            .simple_query(statement)
            .map_err(|e| DbError::statement(statement, e))?;
        materialize(first_result(messages))
    }

    fn close(self) -> Result<(), DbError> {
        self.client
            .close()
            .map_err(|e| DbError::connection(Backend::Postgres, e))
    }
}

/// Rows of the first result in a simple-query response.
///
/// A multi-statement string yields one result per statement; only the first
/// is kept so every row shares one column list. Column names come from the
/// row description, so a query without rows still reports them.
fn first_result(messages: Vec<SimpleQueryMessage>) -> BufferedRows {
    BufferedRows::first_result(messages.into_iter().filter_map(|message| match message {
        SimpleQueryMessage::RowDescription(columns) => Some(ResponsePart::Columns(
            columns.iter().map(|c| c.name().to_string()).collect(),
        )),
        SimpleQueryMessage::Row(row) => Some(ResponsePart::Row(
            (0..row.len())
                .map(|i| row.get(i).map(|v| v.as_bytes().to_vec()))
                .collect(),
        )),
        SimpleQueryMessage::CommandComplete(_) => Some(ResponsePart::Complete),
        _ => None,
    }))
}
