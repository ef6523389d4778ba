//! MySQL backend (sqlx).
//!
//! sqlx is async, so each handle owns a current-thread tokio runtime and
//! blocks on it. Statements go through `raw_sql`, which uses the text
//! protocol: every value arrives as bytes ready for the materializer.

use futures::TryStreamExt;
use sqlx::mysql::{
    MySql, MySqlConnectOptions, MySqlConnection, MySqlQueryResult, MySqlRow, MySqlSslMode,
};
use sqlx::{Column, Connection, Decode, Either, Row, ValueRef};
use tokio::runtime::{Builder, Runtime};

use super::materialize::{materialize, BufferedRows, RawValue, ResponsePart};
use super::session::NativeHandle;
use super::{Backend, DbError, ResultSet};

/// Parsed form of `user:password@protocol(address)/dbname?charset=...`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Dsn {
    user: String,
    password: String,
    protocol: String,
    address: String,
    dbname: String,
    charset: Option<String>,
}

impl Dsn {
    fn parse(descriptor: &str) -> Result<Self, String> {
        let (head, tail) = descriptor
            .rsplit_once('/')
            .ok_or_else(|| format!("missing '/' before the database name in {:?}", descriptor))?;
        let (credentials, endpoint) = head
            .rsplit_once('@')
            .ok_or_else(|| format!("missing '@' after the credentials in {:?}", descriptor))?;
        let (user, password) = credentials.split_once(':').unwrap_or((credentials, ""));

        let (protocol, address) = endpoint
            .split_once('(')
            .and_then(|(protocol, rest)| rest.strip_suffix(')').map(|address| (protocol, address)))
            .ok_or_else(|| format!("expected protocol(address), got {:?}", endpoint))?;

        let (dbname, query) = tail.split_once('?').unwrap_or((tail, ""));
        let charset = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "charset")
            .map(|(_, value)| value.to_string());

        Ok(Self {
            user: user.to_string(),
            password: password.to_string(),
            protocol: protocol.to_string(),
            address: address.to_string(),
            dbname: dbname.to_string(),
            charset,
        })
    }

    fn connect_options(&self) -> Result<MySqlConnectOptions, String> {
        let mut options = MySqlConnectOptions::new()
            .username(&self.user)
            .ssl_mode(MySqlSslMode::Disabled);

        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        if !self.dbname.is_empty() {
            options = options.database(&self.dbname);
        }
        if let Some(charset) = &self.charset {
            options = options.charset(charset);
        }

        match self.protocol.as_str() {
            "tcp" => {
                let (host, port) = self
                    .address
                    .rsplit_once(':')
                    .ok_or_else(|| format!("tcp address {:?} has no port", self.address))?;
                let port: u16 = port
                    .parse()
                    .map_err(|_| format!("invalid port {:?}", port))?;
                Ok(options.host(host).port(port))
            }
            "unix" => Ok(options.socket(&self.address)),
            other => Err(format!("unsupported protocol {:?}", other)),
        }
    }
}

pub(crate) struct MysqlHandle {
    runtime: Runtime,
    conn: MySqlConnection,
}

impl MysqlHandle {
    pub(crate) fn open(descriptor: &str) -> Result<Self, DbError> {
        let options = Dsn::parse(descriptor)
            .and_then(|dsn| dsn.connect_options())
            .map_err(|message| DbError::connection(Backend::Mysql, message))?;

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DbError::connection(Backend::Mysql, e))?;
        let conn = runtime
            .block_on(MySqlConnection::connect_with(&options))
            .map_err(|e| DbError::connection(Backend::Mysql, e))?;

        Ok(Self { runtime, conn })
    }
}

impl NativeHandle for MysqlHandle {
    fn execute(&mut self, statement: &str) -> Result<u64, DbError> {
        self.runtime
            .block_on(sqlx::raw_sql(statement).execute(&mut self.conn))
            .map(|done| done.rows_affected())
            .map_err(|e| DbError::statement(statement, e))
    }

    /// Every statement runs; the rows of the first result set are kept.
    fn query(&mut self, statement: &str) -> Result<ResultSet, DbError> {
        let responses = self
            .runtime
            .block_on(sqlx::raw_sql(statement).fetch_many(&mut self.conn).try_collect::<Vec<_>>())
            .map_err(|e| DbError::statement(statement, e))?;

        let parts = response_parts(responses).map_err(|e| DbError::statement(statement, e))?;
        materialize(BufferedRows::first_result(parts))
    }

    fn close(self) -> Result<(), DbError> {
        let Self { runtime, conn } = self;
        runtime
            .block_on(conn.close())
            .map_err(|e| DbError::connection(Backend::Mysql, e))
    }
}

/// Map the first result of a response onto [`ResponsePart`]s.
///
/// Later result sets are not decoded. sqlx exposes column names only through
/// rows, so a result without rows has no columns.
fn response_parts(
    responses: Vec<Either<MySqlQueryResult, MySqlRow>>,
) -> Result<Vec<ResponsePart>, sqlx::Error> {
    let mut parts = Vec::new();
    for response in responses {
        match response {
            Either::Left(_) => {
                parts.push(ResponsePart::Complete);
                break;
            }
            Either::Right(row) => {
                if parts.is_empty() {
                    let columns = row.columns().iter().map(|c| c.name().to_string()).collect();
                    parts.push(ResponsePart::Columns(columns));
                }
                parts.push(ResponsePart::Row(raw_values(&row)?));
            }
        }
    }
    Ok(parts)
}

fn raw_values(row: &MySqlRow) -> Result<Vec<RawValue>, sqlx::Error> {
    (0..row.len())
        .map(|i| {
            let value = row.try_get_raw(i)?;
            if value.is_null() {
                return Ok(None);
            }
            <&[u8] as Decode<MySql>>::decode(value)
                .map(|bytes| Some(bytes.to_vec()))
                .map_err(sqlx::Error::Decode)
        })
        .collect()
}
