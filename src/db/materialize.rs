//! Result materialization.
//!
//! Every backend adapts its native result into a [`RowCursor`]: column names
//! plus rows of raw, uninterpreted bytes. [`materialize`] turns any cursor into
//! a [`ResultSet`] without knowing the column count or types up front, so
//! none of the command code carries backend-specific result handling.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use super::DbError;

/// One cell as the driver handed it over. `None` is SQL NULL.
pub type RawValue = Option<Vec<u8>>;

/// A driver-level cursor of unknown shape.
pub trait RowCursor {
    /// Column names in physical order.
    fn column_names(&self) -> Result<Vec<String>, DbError>;

    /// The next row's cells, positionally matching [`column_names`](Self::column_names).
    fn next_row(&mut self) -> Result<Option<Vec<RawValue>>, DbError>;
}

/// One row: column name to text.
///
/// Keys iterate alphabetically regardless of the physical column order, which
/// keeps rendered output stable. A duplicated column name keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultRow(BTreeMap<String, String>);

impl ResultRow {
    /// Pair decoded cells with column names. NULL becomes the empty string.
    pub fn from_raw(columns: &[String], values: Vec<RawValue>) -> Self {
        let cells = columns
            .iter()
            .zip(values)
            .map(|(name, value)| (name.clone(), decode(value)))
            .collect();
        Self(cells)
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Cells in alphabetical column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResultRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Rows in cursor order. Empty is a valid result, not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    /// Column names in physical order
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Drain `cursor` into a [`ResultSet`].
///
/// A failed column lookup yields an empty result set instead of an error
/// (logged at warn level). A cursor without columns is still drained so the
/// statement behind it runs to completion, but contributes no rows. Row fetch
/// failures propagate.
pub fn materialize<C: RowCursor>(mut cursor: C) -> Result<ResultSet, DbError> {
    let columns = match cursor.column_names() {
        Ok(columns) => columns,
        Err(err) => {
            warn!(error = %err, "column lookup failed, returning an empty result set");
            return Ok(ResultSet::default());
        }
    };

    let mut rows = Vec::new();
    while let Some(values) = cursor.next_row()? {
        if columns.is_empty() {
            continue;
        }
        rows.push(ResultRow::from_raw(&columns, values));
    }

    Ok(ResultSet { columns, rows })
}

fn decode(value: RawValue) -> String {
    match value {
        Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        None => String::new(),
    }
}

/// A cursor over rows already pulled off the wire.
///
/// Used by the server backends, whose drivers return complete results.
#[derive(Debug)]
pub struct BufferedRows {
    columns: Vec<String>,
    rows: std::vec::IntoIter<Vec<RawValue>>,
}

impl BufferedRows {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<RawValue>>) -> Self {
        Self {
            columns,
            rows: rows.into_iter(),
        }
    }
}

/// One piece of a multi-statement response, in wire order.
#[derive(Debug)]
pub(crate) enum ResponsePart {
    /// Column names of the result whose rows follow.
    Columns(Vec<String>),
    Row(Vec<RawValue>),
    /// End of one statement's result.
    Complete,
}

impl BufferedRows {
    /// Rows of the first result in a multi-statement response.
    ///
    /// Every row kept shares one column list; parts after the first
    /// `Complete` are ignored.
    pub(crate) fn first_result(parts: impl IntoIterator<Item = ResponsePart>) -> Self {
        let mut columns = Vec::new();
        let mut rows = Vec::new();

        for part in parts {
            match part {
                ResponsePart::Columns(names) if columns.is_empty() => columns = names,
                ResponsePart::Columns(_) => {}
                ResponsePart::Row(values) => rows.push(values),
                ResponsePart::Complete => break,
            }
        }

        Self::new(columns, rows)
    }
}

impl RowCursor for BufferedRows {
    fn column_names(&self) -> Result<Vec<String>, DbError> {
        Ok(self.columns.clone())
    }

    fn next_row(&mut self) -> Result<Option<Vec<RawValue>>, DbError> {
        Ok(self.rows.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn text(value: &str) -> RawValue {
        Some(value.as_bytes().to_vec())
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    /// Cursor whose column lookup always fails.
    struct BrokenColumns;

    impl RowCursor for BrokenColumns {
        fn column_names(&self) -> Result<Vec<String>, DbError> {
            Err(DbError::Statement {
                statement: "SELECT 1".to_string(),
                message: "no column metadata".to_string(),
            })
        }

        fn next_row(&mut self) -> Result<Option<Vec<RawValue>>, DbError> {
            panic!("rows must not be read after a failed column lookup");
        }
    }

    /// Cursor that fails on its second row.
    struct FailsMidway {
        served: usize,
    }

    impl RowCursor for FailsMidway {
        fn column_names(&self) -> Result<Vec<String>, DbError> {
            Ok(vec!["id".to_string()])
        }

        fn next_row(&mut self) -> Result<Option<Vec<RawValue>>, DbError> {
            self.served += 1;
            if self.served == 1 {
                Ok(Some(vec![text("1")]))
            } else {
                Err(DbError::Statement {
                    statement: "SELECT id FROM t".to_string(),
                    message: "connection reset".to_string(),
                })
            }
        }
    }

    #[rstest]
    fn test_zero_rows_is_empty_result() {
        let cursor = BufferedRows::new(columns(&["id", "name"]), vec![]);
        let result = materialize(cursor).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.columns, columns(&["id", "name"]));
    }

    #[rstest]
    fn test_single_row_pairs_columns_positionally() {
        let cursor = BufferedRows::new(columns(&["id", "name"]), vec![vec![text("1"), text("a")]]);
        let result = materialize(cursor).unwrap();

        assert_eq!(result.len(), 1);
        let row = &result.rows[0];
        assert_eq!(row.get("id"), Some("1"));
        assert_eq!(row.get("name"), Some("a"));
        let keys: Vec<&str> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["id", "name"]);
    }

    #[rstest]
    fn test_display_order_is_alphabetical_not_physical() {
        let cursor = BufferedRows::new(
            columns(&["zeta", "alpha", "mid"]),
            vec![vec![text("z"), text("a"), text("m")]],
        );
        let result = materialize(cursor).unwrap();
        let keys: Vec<&str> = result.rows[0].iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
        assert_eq!(result.columns, columns(&["zeta", "alpha", "mid"]));
    }

    #[rstest]
    fn test_rows_keep_cursor_order() {
        let cursor = BufferedRows::new(
            columns(&["n"]),
            vec![vec![text("3")], vec![text("1")], vec![text("2")]],
        );
        let result = materialize(cursor).unwrap();
        let values: Vec<&str> = result.iter().map(|r| r.get("n").unwrap()).collect();
        assert_eq!(values, vec!["3", "1", "2"]);
    }

    #[rstest]
    fn test_null_becomes_empty_text() {
        let cursor = BufferedRows::new(columns(&["a"]), vec![vec![None]]);
        let result = materialize(cursor).unwrap();
        assert_eq!(result.rows[0].get("a"), Some(""));
    }

    #[rstest]
    fn test_invalid_utf8_is_decoded_lossily() {
        let cursor = BufferedRows::new(columns(&["blob"]), vec![vec![Some(vec![0x66, 0xff, 0x6f])]]);
        let result = materialize(cursor).unwrap();
        assert_eq!(result.rows[0].get("blob"), Some("f\u{fffd}o"));
    }

    #[rstest]
    fn test_duplicate_column_keeps_last_value() {
        let cursor = BufferedRows::new(columns(&["a", "a"]), vec![vec![text("first"), text("second")]]);
        let result = materialize(cursor).unwrap();
        assert_eq!(result.rows[0].len(), 1);
        assert_eq!(result.rows[0].get("a"), Some("second"));
    }

    #[rstest]
    fn test_zero_columns_yields_no_rows() {
        let cursor = BufferedRows::new(vec![], vec![vec![], vec![]]);
        let result = materialize(cursor).unwrap();
        assert!(result.is_empty());
    }

    #[rstest]
    fn test_column_lookup_failure_degrades_to_empty() {
        let result = materialize(BrokenColumns).unwrap();
        assert_eq!(result, ResultSet::default());
    }

    #[rstest]
    fn test_row_failure_propagates() {
        let err = materialize(FailsMidway { served: 0 }).unwrap_err();
        assert!(matches!(err, DbError::Statement { .. }));
    }

    #[rstest]
    fn test_first_result_ignores_later_result_sets() {
        let parts = vec![
            ResponsePart::Columns(columns(&["a"])),
            ResponsePart::Row(vec![text("1")]),
            ResponsePart::Complete,
            ResponsePart::Columns(columns(&["b", "c"])),
            ResponsePart::Row(vec![text("2"), text("3")]),
            ResponsePart::Complete,
        ];
        let result = materialize(BufferedRows::first_result(parts)).unwrap();

        assert_eq!(result.columns, columns(&["a"]));
        assert_eq!(result.len(), 1);
        assert_eq!(result.rows[0].get("a"), Some("1"));
    }

    #[rstest]
    fn test_first_result_keeps_columns_without_rows() {
        let parts = vec![
            ResponsePart::Columns(columns(&["id", "name"])),
            ResponsePart::Complete,
            ResponsePart::Row(vec![text("9")]),
        ];
        let result = materialize(BufferedRows::first_result(parts)).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.columns, columns(&["id", "name"]));
    }

    #[rstest]
    fn test_first_result_of_statement_without_rows() {
        let parts = vec![ResponsePart::Complete, ResponsePart::Columns(columns(&["x"]))];
        let result = materialize(BufferedRows::first_result(parts)).unwrap();
        assert_eq!(result, ResultSet::default());
    }

    #[rstest]
    fn test_result_row_serializes_as_sorted_object() {
        let row: ResultRow = [("name", "a"), ("id", "1")].into_iter().collect();
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"id":"1","name":"a"}"#);
    }
}
