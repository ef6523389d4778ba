//! Connection descriptor builder.
//!
//! Turns [`ConnectionParameters`] into the string each native driver expects.
//! Pure string formatting; nothing here touches the network or the disk.
//!
//! | backend  | descriptor                                              |
//! |----------|---------------------------------------------------------|
//! | sqlite3  | `{dbpath}{dbname}.db`                                   |
//! | mysql    | `{user}:{password}@{protocol}({host}:{port})/{dbname}?charset={charset}` |
//! | postgres | `host={host} user={user} password={password} sslmode={sslmode}` |
//!
//! For `--protocol unix` the MySQL address is the socket path in `host`.
//!
//! The PostgreSQL descriptor never names a database: the server picks the
//! user's default one and the statements do the targeting.

use std::borrow::Cow;

use super::{Backend, ConnectionParameters, DbError};

/// File extension of embedded database files.
pub const SQLITE_EXTENSION: &str = "db";

/// Build the descriptor for `params`.
///
/// `include_database_name` is false for operations that create or drop the
/// database (it may not exist yet) and true for operations that use it.
pub fn build_descriptor(
    params: &ConnectionParameters,
    include_database_name: bool,
) -> Result<String, DbError> {
    params.backend.descriptor(params, include_database_name)
}

/// Same as [`build_descriptor`] with the password masked.
pub fn redacted_descriptor(
    params: &ConnectionParameters,
    include_database_name: bool,
) -> Result<String, DbError> {
    build_descriptor(&params.redacted(), include_database_name)
}

impl Backend {
    pub fn descriptor(
        self,
        params: &ConnectionParameters,
        include_database_name: bool,
    ) -> Result<String, DbError> {
        if params.dbname.is_empty() {
            return Err(DbError::DescriptorBuild {
                message: format!("{} requires a database name", self),
            });
        }

        let descriptor = match self {
            Backend::Sqlite => format!("{}{}.{}", params.dbpath, params.dbname, SQLITE_EXTENSION),
            Backend::Mysql => {
                let dbname = if include_database_name {
                    params.dbname.as_str()
                } else {
                    ""
                };
                // A unix socket address is a path; the port only applies to tcp.
                let address = if params.protocol == "unix" {
                    params.host.clone()
                } else {
                    format!("{}:{}", params.host, params.port)
                };
                format!(
                    "{}:{}@{}({})/{}?charset={}",
                    params.user, params.password, params.protocol, address, dbname, params.charset
                )
            }
            Backend::Postgres => format!(
                "host={} user={} password={} sslmode={}",
                pg_value(&params.host),
                pg_value(&params.user),
                pg_value(&params.password),
                pg_value(&params.sslmode)
            ),
        };
        Ok(descriptor)
    }
}

/// Quote a key/value connection string value when it would not survive bare.
fn pg_value(value: &str) -> Cow<'_, str> {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if !needs_quotes {
        return Cow::Borrowed(value);
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    Cow::Owned(quoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn mysql_params() -> ConnectionParameters {
        ConnectionParameters {
            user: "root".to_string(),
            password: "123".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3306,
            protocol: "tcp".to_string(),
            charset: "utf8".to_string(),
            ..ConnectionParameters::new(Backend::Mysql, "db_new")
        }
    }

    #[rstest]
    fn test_mysql_with_database_name(mysql_params: ConnectionParameters) {
        assert_eq!(
            build_descriptor(&mysql_params, true).unwrap(),
            "root:123@tcp(127.0.0.1:3306)/db_new?charset=utf8"
        );
    }

    #[rstest]
    fn test_mysql_without_database_name(mysql_params: ConnectionParameters) {
        assert_eq!(
            build_descriptor(&mysql_params, false).unwrap(),
            "root:123@tcp(127.0.0.1:3306)/?charset=utf8"
        );
    }

    #[rstest]
    fn test_mysql_unix_socket() {
        let params = ConnectionParameters {
            user: "admin".to_string(),
            protocol: "unix".to_string(),
            host: "/var/run/mysqld/mysqld.sock".to_string(),
            ..ConnectionParameters::new(Backend::Mysql, "shop")
        };
        assert_eq!(
            build_descriptor(&params, true).unwrap(),
            "admin:@unix(/var/run/mysqld/mysqld.sock)/shop?charset=utf8"
        );
    }

    #[rstest]
    fn test_sqlite_descriptor() {
        let params = ConnectionParameters::new(Backend::Sqlite, "test");
        assert_eq!(build_descriptor(&params, true).unwrap(), "./test.db");
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_sqlite_ignores_database_name_flag(#[case] include: bool) {
        let params = ConnectionParameters {
            dbpath: "/tmp/data/".to_string(),
            ..ConnectionParameters::new(Backend::Sqlite, "app")
        };
        assert_eq!(build_descriptor(&params, include).unwrap(), "/tmp/data/app.db");
    }

    #[rstest]
    fn test_postgres_descriptor() {
        let params = ConnectionParameters {
            user: "postgres".to_string(),
            password: "secret".to_string(),
            host: "db.internal".to_string(),
            ..ConnectionParameters::new(Backend::Postgres, "shop")
        };
        assert_eq!(
            build_descriptor(&params, true).unwrap(),
            "host=db.internal user=postgres password=secret sslmode=disable"
        );
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_postgres_never_embeds_database_name(#[case] include: bool) {
        let params = ConnectionParameters {
            user: "postgres".to_string(),
            password: "secret".to_string(),
            ..ConnectionParameters::new(Backend::Postgres, "shop")
        };
        assert!(!build_descriptor(&params, include).unwrap().contains("shop"));
    }

    #[rstest]
    fn test_postgres_quotes_awkward_values() {
        let params = ConnectionParameters {
            user: "postgres".to_string(),
            password: "it's a secret".to_string(),
            ..ConnectionParameters::new(Backend::Postgres, "shop")
        };
        assert_eq!(
            build_descriptor(&params, false).unwrap(),
            r"host=127.0.0.1 user=postgres password='it\'s a secret' sslmode=disable"
        );
    }

    #[rstest]
    fn test_postgres_quotes_empty_password() {
        let params = ConnectionParameters {
            user: "postgres".to_string(),
            ..ConnectionParameters::new(Backend::Postgres, "shop")
        };
        assert_eq!(
            build_descriptor(&params, false).unwrap(),
            "host=127.0.0.1 user=postgres password='' sslmode=disable"
        );
    }

    #[rstest]
    fn test_descriptor_is_deterministic(mysql_params: ConnectionParameters) {
        for include in [true, false] {
            let first = build_descriptor(&mysql_params, include).unwrap();
            let second = build_descriptor(&mysql_params.clone(), include).unwrap();
            assert_eq!(first, second);
        }
    }

    #[rstest]
    #[case(Backend::Sqlite)]
    #[case(Backend::Mysql)]
    #[case(Backend::Postgres)]
    fn test_empty_database_name_rejected(#[case] backend: Backend) {
        let params = ConnectionParameters::new(backend, "");
        let err = build_descriptor(&params, true).unwrap_err();
        assert!(matches!(err, DbError::DescriptorBuild { .. }));
    }

    #[rstest]
    fn test_redacted_descriptor_masks_password(mysql_params: ConnectionParameters) {
        assert_eq!(
            redacted_descriptor(&mysql_params, true).unwrap(),
            "root:***@tcp(127.0.0.1:3306)/db_new?charset=utf8"
        );
    }
}
