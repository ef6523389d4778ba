//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - `execute.rs` running it against resolved connection parameters
//! - `output.rs` rendering its result

mod create;
mod describe;
mod drop;
mod sql;

pub use create::{CreateCmd, CreateResult};
pub use describe::{DescribeCmd, DescribeResult};
pub use drop::{DropCmd, DropResult};
pub use sql::{is_sentinel, run_loop, LoopStats, SqlCmd, SqlResult, SENTINELS};

use clap::{Args, Subcommand};

use crate::config::{ConfigError, ConnectionProfile};
use crate::db::{check_driver, ConnectionParameters};
use crate::error::MigError;
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, params: &ConnectionParameters) -> Result<Self::Output, MigError>;
}

/// Connection flags shared by every command.
///
/// All optional here; anything not given falls back to the config file and
/// then to the built-in default.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionArgs {
    /// Database driver (sqlite3, mysql, postgres)
    #[arg(long, visible_alias = "drv")]
    pub driver: Option<String>,

    /// Name of the database
    #[arg(long, visible_alias = "db")]
    pub dbname: Option<String>,

    /// Username
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Hostname or IP (socket path with --protocol unix) [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// Database port [default: 3306]
    #[arg(long)]
    pub port: Option<u16>,

    /// Communication protocol, tcp or unix [default: tcp]
    #[arg(long)]
    pub protocol: Option<String>,

    /// Character set [default: utf8]
    #[arg(long)]
    pub charset: Option<String>,

    /// Directory holding sqlite3 database files [default: ./]
    #[arg(long)]
    pub dbpath: Option<String>,

    /// SSL mode for postgres [default: disable]
    #[arg(long)]
    pub sslmode: Option<String>,
}

impl ConnectionArgs {
    /// Layer these flags over `profile` and the defaults.
    ///
    /// The driver is checked against the registry before anything else runs.
    pub fn resolve(
        &self,
        profile: &ConnectionProfile,
        table: Option<&str>,
    ) -> Result<ConnectionParameters, MigError> {
        let driver = pick(&self.driver, &profile.driver)
            .ok_or(ConfigError::MissingField { field: "driver" })?;
        let backend = check_driver(&driver)?;
        let dbname = pick(&self.dbname, &profile.dbname)
            .ok_or(ConfigError::MissingField { field: "dbname" })?;

        let mut params = ConnectionParameters::new(backend, dbname);
        if let Some(user) = pick(&self.user, &profile.user) {
            params.user = user;
        }
        if let Some(password) = pick(&self.password, &profile.password) {
            params.password = password;
        }
        if let Some(host) = pick(&self.host, &profile.host) {
            params.host = host;
        }
        if let Some(port) = self.port.or(profile.port) {
            params.port = port;
        }
        if let Some(protocol) = pick(&self.protocol, &profile.protocol) {
            params.protocol = protocol;
        }
        if let Some(charset) = pick(&self.charset, &profile.charset) {
            params.charset = charset;
        }
        if let Some(dbpath) = pick(&self.dbpath, &profile.dbpath) {
            params.dbpath = dbpath;
        }
        if let Some(sslmode) = pick(&self.sslmode, &profile.sslmode) {
            params.sslmode = sslmode;
        }
        if let Some(table) = table.map(str::to_string).or_else(|| profile.table.clone()) {
            params.table = table;
        }
        Ok(params)
    }
}

fn pick(flag: &Option<String>, file: &Option<String>) -> Option<String> {
    flag.as_ref().or(file.as_ref()).cloned()
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a database
    Create(CreateCmd),

    /// Drop a database
    Drop(DropCmd),

    /// Describe the columns of a table
    Describe(DescribeCmd),

    /// Read SQL statements from stdin and run them one by one
    Sql(SqlCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, profile: &ConnectionProfile, format: OutputFormat) -> Result<String, MigError> {
        match self {
            Command::Create(cmd) => {
                let params = cmd.connection.resolve(profile, None)?;
                let result = cmd.execute(&params)?;
                Ok(result.format(format))
            }
            Command::Drop(cmd) => {
                let params = cmd.connection.resolve(profile, None)?;
                let result = cmd.execute(&params)?;
                Ok(result.format(format))
            }
            Command::Describe(cmd) => {
                let params = cmd.connection.resolve(profile, cmd.table.as_deref())?;
                let result = cmd.execute(&params)?;
                Ok(result.format(format))
            }
            Command::Sql(mut cmd) => {
                let params = cmd.connection.resolve(profile, cmd.table.as_deref())?;
                cmd.format = format;
                let result = cmd.execute(&params)?;
                Ok(result.format(format))
            }
        }
    }
}
