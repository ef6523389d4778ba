//! Output formatting tests for create command.

#[cfg(test)]
mod tests {
    use super::super::execute::CreateResult;
    use crate::db::Backend;
    use rstest::{fixture, rstest};
    use std::time::Duration;

    // =========================================================================
    // Expected outputs
    // =========================================================================

    const MYSQL_TABLE: &str = "\
Connection query:
root:***@tcp(127.0.0.1:3306)/?charset=utf8

SQL:
CREATE DATABASE shop CHARACTER SET utf8;
USE shop;

DONE (3ms)";

    const SQLITE_TABLE: &str = "\
Connection query:
./app.db

DONE (1ms)";

    // =========================================================================
    // Fixtures
    // =========================================================================

    #[fixture]
    fn mysql_result() -> CreateResult {
        CreateResult {
            driver: Backend::Mysql,
            dbname: "shop".to_string(),
            descriptor: "root:***@tcp(127.0.0.1:3306)/?charset=utf8".to_string(),
            statements: vec![
                "CREATE DATABASE shop CHARACTER SET utf8".to_string(),
                "USE shop".to_string(),
            ],
            elapsed: Duration::from_millis(3),
        }
    }

    #[fixture]
    fn sqlite_result() -> CreateResult {
        CreateResult {
            driver: Backend::Sqlite,
            dbname: "app".to_string(),
            descriptor: "./app.db".to_string(),
            statements: vec![],
            elapsed: Duration::from_millis(1),
        }
    }

    // =========================================================================
    // Tests
    // =========================================================================

    crate::output_table_test! {
        test_name: test_to_table_mysql,
        fixture: mysql_result,
        fixture_type: CreateResult,
        expected: MYSQL_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_sqlite_has_no_sql_section,
        fixture: sqlite_result,
        fixture_type: CreateResult,
        expected: SQLITE_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: mysql_result,
        fixture_type: CreateResult,
        assertions: {
            "driver": "mysql",
            "dbname": "shop",
            "statements": serde_json::json!(["CREATE DATABASE shop CHARACTER SET utf8", "USE shop"]),
            "elapsed_ms": 3.0,
        },
    }
}
