//! Rolling annual yield calculator.
//!
//! Sorts the table by sequence number, sums the dividend column over a
//! trailing window of the 12 most recent rows (by sort order, ignoring gaps
//! in sequence numbers), divides by the previous row's close, and appends the
//! gross and after-tax yield columns.
//!
//! Missing data never raises: an unparseable dividend anywhere in the window,
//! a missing or zero prior close, or insufficient history all produce the
//! empty-cell sentinel for that row while every other row still computes.

use thiserror::Error;

use crate::config::YieldConfig;
use crate::normalize::{format_numeric, parse_numeric};
use crate::table::{SchemaError, Table};

/// Fixed sequence-number column label.
pub const SEQUENCE_COLUMN: &str = "番号";

/// Appended gross yield column label.
pub const YIELD_COLUMN: &str = "＄:利回り";

/// Appended after-tax yield column label.
pub const AFTER_TAX_YIELD_COLUMN: &str = "＄:税後利回り";

/// Trailing window length in records (one year of monthly rows).
pub const WINDOW: usize = 12;

/// Rows whose sequence number is below this never get a yield.
const MIN_SEQUENCE: f64 = 12.0;

#[derive(Debug, Error)]
pub enum YieldError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The sort key must parse; without it the row cannot be ordered.
    #[error("data row {row}: sequence cell '{value}' is not a number")]
    InvalidSequence { row: usize, value: String },
}

/// Compute and append the yield columns, in place.
///
/// On success the table's rows are in ascending sequence order with
/// `＄:利回り` and `＄:税後利回り` appended on the right, so the derived
/// cells align with their records regardless of input row order.
pub fn compute_yield(table: &mut Table, config: &YieldConfig) -> Result<(), YieldError> {
    let required = [
        SEQUENCE_COLUMN,
        config.dividend_column(),
        config.close_column(),
    ];
    let missing = table.missing_columns(&required);
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns(missing).into());
    }

    let seq_col = table
        .column_index(SEQUENCE_COLUMN)
        .expect("column presence checked above");
    let sequence: Vec<f64> = table
        .column(seq_col)
        .enumerate()
        .map(|(row, cell)| {
            parse_numeric(cell).ok_or_else(|| YieldError::InvalidSequence {
                row: row + 1,
                value: cell.to_string(),
            })
        })
        .collect::<Result<_, _>>()?;

    // Stable sort: equal sequence numbers keep their input order.
    let mut order: Vec<usize> = (0..sequence.len()).collect();
    order.sort_by(|&a, &b| sequence[a].total_cmp(&sequence[b]));
    table.reorder_rows(&order);
    let sequence: Vec<f64> = order.iter().map(|&i| sequence[i]).collect();

    let dividends = numeric_column(table, config.dividend_column());
    let closes = numeric_column(table, config.close_column());

    let annual = rolling_annual_dividend(&sequence, &dividends);
    let yields = yield_percent(&annual, &closes);
    let after_tax: Vec<Option<f64>> =
        yields.iter().map(|y| y.map(|v| v * config.tax_rate)).collect();

    table.push_column(YIELD_COLUMN, yields.into_iter().map(format_numeric).collect());
    table.push_column(
        AFTER_TAX_YIELD_COLUMN,
        after_tax.into_iter().map(format_numeric).collect(),
    );
    Ok(())
}

fn numeric_column(table: &Table, name: &str) -> Vec<Option<f64>> {
    let col = table
        .column_index(name)
        .expect("column presence checked above");
    table.column(col).map(parse_numeric).collect()
}

/// Trailing dividend sum over positions `max(0, i-11) ..= i`.
///
/// Rows below the sequence threshold stay undefined. A missing dividend
/// anywhere in the window makes the whole sum undefined for that row.
/// Direct per-row summation, not an incremental accumulator: the window is
/// 12 cells, and direct sums match the documented exact-arithmetic property.
fn rolling_annual_dividend(sequence: &[f64], dividends: &[Option<f64>]) -> Vec<Option<f64>> {
    let n = dividends.len();
    let mut result = vec![None; n];

    for i in 0..n {
        if sequence[i] < MIN_SEQUENCE {
            continue;
        }
        let start = i.saturating_sub(WINDOW - 1);
        let mut sum = 0.0;
        let mut complete = true;
        for d in &dividends[start..=i] {
            match d {
                Some(v) => sum += v,
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            result[i] = Some(sum);
        }
    }

    result
}

/// Gross yield percent: annual dividend over the previous row's close.
///
/// Undefined when the annual dividend is undefined, when there is no
/// previous row, or when the prior close is missing or exactly 0.
fn yield_percent(annual: &[Option<f64>], closes: &[Option<f64>]) -> Vec<Option<f64>> {
    (0..annual.len())
        .map(|i| {
            let dividend = annual[i]?;
            let prior = if i == 0 { None } else { closes[i - 1] }?;
            if prior == 0.0 {
                return None;
            }
            Some(dividend / prior * 100.0)
        })
        .collect()
}
