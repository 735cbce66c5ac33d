//! Tabular data model — ordered headers plus rows of string cells.
//!
//! Column names are opaque lookup keys. In practice they are the Japanese
//! labels of the dividend workbook (`番号`, `配当/株`, `前月終値`), but nothing
//! in this module interprets header text beyond equality.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row} has {got} cells but the header has {expected}")]
    RowTooWide {
        row: usize,
        got: usize,
        expected: usize,
    },
}

/// An in-memory table: one header row and zero or more data rows.
///
/// Every row has exactly `headers.len()` cells. Rows shorter than the header
/// are padded with empty cells on construction; longer rows are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Result<Self, SchemaError> {
        let width = headers.len();
        for (i, row) in rows.iter_mut().enumerate() {
            if row.len() > width {
                return Err(SchemaError::RowTooWide {
                    row: i + 1,
                    got: row.len(),
                    expected: width,
                });
            }
            row.resize(width, String::new());
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a column by exact header match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All of `names` that are absent from the header, in the order given.
    /// Empty means every name resolved.
    pub fn missing_columns<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| self.column_index(n).is_none())
            .map(str::to_string)
            .collect()
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: String) {
        self.rows[row][col] = value;
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row[col].as_str())
    }

    /// Append a new column on the right. `values` must have one cell per row.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<String>) {
        assert_eq!(
            values.len(),
            self.rows.len(),
            "push_column: value count must match row count"
        );
        self.headers.push(name.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// Reorder rows so that row `i` of the result is row `order[i]` of the
    /// input. `order` must be a permutation of `0..row_count()`.
    pub fn reorder_rows(&mut self, order: &[usize]) {
        assert_eq!(order.len(), self.rows.len(), "reorder_rows: not a permutation");
        let old = std::mem::take(&mut self.rows);
        let mut taken: Vec<Option<Vec<String>>> = old.into_iter().map(Some).collect();
        self.rows = order
            .iter()
            .map(|&i| taken[i].take().expect("reorder_rows: duplicate index"))
            .collect();
    }
}
