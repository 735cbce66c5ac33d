//! CSV reading and writing for dividend tables.
//!
//! The workbook exports these files as UTF-8 with a BOM so the Japanese
//! headers survive spreadsheet round-trips; reads tolerate the BOM and writes
//! always emit one.

use std::path::Path;
use thiserror::Error;

use crate::table::{SchemaError, Table};

const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Read a CSV file into a `Table`. Short rows are padded to header width.
pub fn read_table(path: &Path) -> Result<Table, IoError> {
    let content = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IoError::Csv {
            path: path.display().to_string(),
            source,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IoError::Csv {
            path: path.display().to_string(),
            source,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(headers, rows)?)
}

/// Serialize a `Table` to CSV text (no BOM).
pub fn table_to_csv(table: &Table) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(table.headers())?;
    for row in table.rows() {
        wtr.write_record(row)?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(data).expect("CSV of UTF-8 cells is UTF-8"))
}

/// Write a `Table` as BOM-prefixed UTF-8 CSV.
pub fn write_table(path: &Path, table: &Table) -> Result<(), IoError> {
    let csv_text = table_to_csv(table).map_err(|source| IoError::Csv {
        path: path.display().to_string(),
        source,
    })?;
    let mut out = String::with_capacity(UTF8_BOM.len() + csv_text.len());
    out.push_str(UTF8_BOM);
    out.push_str(&csv_text);
    std::fs::write(path, out).map_err(|source| IoError::Write {
        path: path.display().to_string(),
        source,
    })
}
