//! Yield calculation configuration.
//!
//! Loaded from a JSON artifact (`config.json` by convention) with three
//! recognized keys: `currency_symbols`, `columns_to_convert`, `tax_rate`.
//! Unrecognized keys are ignored. Loading never fails: a missing or malformed
//! artifact falls back to the built-in defaults, and a present-but-partial
//! artifact uses the default for each absent key. Every fallback is reported
//! as a returned warning string so the caller decides where it goes — the
//! library itself never writes to stderr.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default dividend-per-share column label.
pub const DEFAULT_DIVIDEND_COLUMN: &str = "配当/株";

/// Default previous-close column label.
pub const DEFAULT_CLOSE_COLUMN: &str = "前月終値";

/// Default after-tax multiplier: 10% local withholding on top of the
/// 20.315% domestic rate (0.9 × 0.79685 ≈ 0.71717).
pub const DEFAULT_TAX_RATE: f64 = 0.9 * 0.79685;

/// Configuration for one normalize-and-compute run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldConfig {
    /// Literal substrings stripped from numeric cells before parsing,
    /// mapped to their replacements. Applied in sorted key order.
    pub currency_symbols: BTreeMap<String, String>,

    /// Columns normalized to numeric form. The first entry is the
    /// dividend-per-share column, the second the previous-close column.
    pub columns_to_convert: Vec<String>,

    /// Multiplier applied to the gross yield to produce the after-tax yield.
    pub tax_rate: f64,
}

impl Default for YieldConfig {
    fn default() -> Self {
        Self {
            currency_symbols: BTreeMap::from([
                ("$".to_string(), String::new()),
                ("¥".to_string(), String::new()),
            ]),
            columns_to_convert: vec![
                DEFAULT_DIVIDEND_COLUMN.to_string(),
                DEFAULT_CLOSE_COLUMN.to_string(),
            ],
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

/// Raw shape of the JSON artifact: every key optional, unknown keys ignored.
#[derive(Debug, Deserialize)]
struct RawConfig {
    currency_symbols: Option<BTreeMap<String, String>>,
    columns_to_convert: Option<Vec<String>>,
    tax_rate: Option<f64>,
}

impl YieldConfig {
    /// The dividend-per-share column this config points at.
    pub fn dividend_column(&self) -> &str {
        self.columns_to_convert
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_DIVIDEND_COLUMN)
    }

    /// The previous-close column this config points at.
    pub fn close_column(&self) -> &str {
        self.columns_to_convert
            .get(1)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CLOSE_COLUMN)
    }

    /// Parse a JSON artifact, merging shallowly over the defaults.
    ///
    /// Each top-level key present in the artifact replaces the default
    /// wholesale; in particular `currency_symbols` is replaced as a map, not
    /// merged entry by entry. Returns one warning per absent key.
    pub fn from_json_str(json: &str) -> Result<(Self, Vec<String>), serde_json::Error> {
        let raw: RawConfig = serde_json::from_str(json.trim_start_matches('\u{feff}'))?;
        let defaults = Self::default();
        let mut warnings = Vec::new();

        let currency_symbols = match raw.currency_symbols {
            Some(map) => map,
            None => {
                warnings.push("config key 'currency_symbols' absent; using default".to_string());
                defaults.currency_symbols
            }
        };
        let columns_to_convert = match raw.columns_to_convert {
            Some(cols) => cols,
            None => {
                warnings.push("config key 'columns_to_convert' absent; using default".to_string());
                defaults.columns_to_convert
            }
        };
        let tax_rate = match raw.tax_rate {
            Some(rate) => rate,
            None => {
                warnings.push("config key 'tax_rate' absent; using default".to_string());
                defaults.tax_rate
            }
        };

        Ok((
            Self {
                currency_symbols,
                columns_to_convert,
                tax_rate,
            },
            warnings,
        ))
    }

    /// Load a config artifact from disk. Never fails: a missing file or
    /// malformed JSON downgrades to the defaults with a warning.
    pub fn load(path: &Path) -> (Self, Vec<String>) {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                return (
                    Self::default(),
                    vec![format!(
                        "config file {} not found; using defaults",
                        path.display()
                    )],
                );
            }
        };
        match Self::from_json_str(&content) {
            Ok(parsed) => parsed,
            Err(e) => (
                Self::default(),
                vec![format!(
                    "config file {} is not valid JSON ({e}); using defaults",
                    path.display()
                )],
            ),
        }
    }
}
