//! DivYield Core — trailing-twelve-month dividend yield over a monthly table.
//!
//! This crate provides:
//! - A tabular data model with opaque column-name lookup (`table`)
//! - Currency-symbol stripping and numeric normalization (`normalize`)
//! - The rolling annual yield calculator (`calculator`)
//! - JSON config loading with default fallback and returned warnings (`config`)
//! - BOM-aware CSV reading and writing (`io`)
//!
//! The two computational entry points are `normalize` and `compute_yield`;
//! both are pure transforms of a `Table` plus a `YieldConfig`, with no
//! interactive I/O, so batch drivers and tests call them directly.

pub mod calculator;
pub mod config;
pub mod io;
pub mod normalize;
pub mod table;

pub use calculator::{
    compute_yield, YieldError, AFTER_TAX_YIELD_COLUMN, SEQUENCE_COLUMN, WINDOW, YIELD_COLUMN,
};
pub use config::{YieldConfig, DEFAULT_CLOSE_COLUMN, DEFAULT_DIVIDEND_COLUMN, DEFAULT_TAX_RATE};
pub use io::{read_table, table_to_csv, write_table, IoError};
pub use normalize::{format_numeric, normalize, parse_numeric, strip_currency};
pub use table::{SchemaError, Table};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn table_is_send_sync() {
        assert_send::<Table>();
        assert_sync::<Table>();
    }

    #[test]
    fn config_is_send_sync() {
        assert_send::<YieldConfig>();
        assert_sync::<YieldConfig>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<SchemaError>();
        assert_sync::<SchemaError>();
        assert_send::<YieldError>();
        assert_sync::<YieldError>();
        assert_send::<IoError>();
        assert_sync::<IoError>();
    }
}
