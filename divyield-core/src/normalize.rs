//! Currency normalizer.
//!
//! Strips configured literal substrings (currency symbols) from the cells of
//! the configured columns, then parses them as `f64`. A cell that does not
//! parse after stripping becomes the missing-value sentinel (an empty cell),
//! never an error. Parsed cells are rewritten in canonical display form, so
//! normalizing an already-normalized table is a no-op.

use std::collections::BTreeMap;

use crate::config::YieldConfig;
use crate::table::{SchemaError, Table};

/// Strip every occurrence of each configured substring from `value`.
///
/// Plain literal replacement, applied in sorted key order — no regex.
pub fn strip_currency(value: &str, symbols: &BTreeMap<String, String>) -> String {
    let mut out = value.to_string();
    for (symbol, replacement) in symbols {
        if !symbol.is_empty() {
            out = out.replace(symbol.as_str(), replacement);
        }
    }
    out
}

/// Parse a stripped cell as a finite number. Empty, unparseable, and
/// non-finite cells are all missing.
pub fn parse_numeric(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Canonical cell text for a numeric value: shortest round-trip form for
/// defined values, the empty cell for missing ones. No rounding.
pub fn format_numeric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => String::new(),
    }
}

/// Normalize the configured columns of `table` in place.
///
/// Fails fast — before touching any cell — if any configured column is
/// absent, reporting every missing name in one error.
pub fn normalize(table: &mut Table, config: &YieldConfig) -> Result<(), SchemaError> {
    let missing = table.missing_columns(&config.columns_to_convert);
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns(missing));
    }

    for name in &config.columns_to_convert {
        let col = table
            .column_index(name)
            .expect("column presence checked above");
        for row in 0..table.row_count() {
            let stripped = strip_currency(table.cell(row, col), &config.currency_symbols);
            table.set_cell(row, col, format_numeric(parse_numeric(&stripped)));
        }
    }
    Ok(())
}
