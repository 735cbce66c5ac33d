//! End-to-end pipeline: CSV in → normalize → compute → CSV out.

use std::path::Path;

use divyield_core::calculator::{compute_yield, AFTER_TAX_YIELD_COLUMN, YIELD_COLUMN};
use divyield_core::normalize::{normalize, parse_numeric};
use divyield_core::{read_table, write_table, YieldConfig};

/// A 13-month series with currency-prefixed cells, rows deliberately out of
/// order so the pipeline has to sort.
fn sample_csv() -> String {
    let mut csv = String::from("番号,配当/株,前月終値\n");
    for seq in (1..=13).rev() {
        csv.push_str(&format!("{seq},$1.0,¥100\n"));
    }
    csv
}

#[test]
fn full_run_matches_the_hand_computed_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("div.csv");
    let output = dir.path().join("div_yield.csv");
    std::fs::write(&input, sample_csv()).unwrap();

    let config = YieldConfig::default();
    let mut table = read_table(&input).unwrap();
    normalize(&mut table, &config).unwrap();
    compute_yield(&mut table, &config).unwrap();
    write_table(&output, &table).unwrap();

    let result = read_table(&output).unwrap();
    assert_eq!(
        result.headers(),
        &["番号", "配当/株", "前月終値", YIELD_COLUMN, AFTER_TAX_YIELD_COLUMN]
    );
    assert_eq!(result.row_count(), 13);

    let seq_col = result.column_index("番号").unwrap();
    let yield_col = result.column_index(YIELD_COLUMN).unwrap();
    let after_col = result.column_index(AFTER_TAX_YIELD_COLUMN).unwrap();

    // Output is sorted ascending by sequence.
    let sequences: Vec<&str> = result.column(seq_col).collect();
    assert_eq!(sequences[0], "1");
    assert_eq!(sequences[12], "13");

    // Records 1..=11 undefined; 12 and 13 compute 12.0% gross.
    for row in 0..11 {
        assert_eq!(result.cell(row, yield_col), "");
        assert_eq!(result.cell(row, after_col), "");
    }
    assert_eq!(parse_numeric(result.cell(11, yield_col)), Some(12.0));
    assert_eq!(parse_numeric(result.cell(12, yield_col)), Some(12.0));
    let after = parse_numeric(result.cell(12, after_col)).unwrap();
    assert!((after - 8.606).abs() < 1e-3);
}

#[test]
fn normalized_currency_cells_are_written_numerically() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("div.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "番号,配当/株,前月終値\n1,$1.50,¥100\n").unwrap();

    let config = YieldConfig::default();
    let mut table = read_table(&input).unwrap();
    normalize(&mut table, &config).unwrap();
    compute_yield(&mut table, &config).unwrap();
    write_table(&output, &table).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("1.5"));
    assert!(!text.contains('$'));
    assert!(!text.contains('¥'));
}

#[test]
fn output_file_starts_with_a_bom() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("div.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "\u{feff}番号,配当/株,前月終値\n1,1.0,100\n").unwrap();

    let config = YieldConfig::default();
    let mut table = read_table(&input).unwrap();
    normalize(&mut table, &config).unwrap();
    compute_yield(&mut table, &config).unwrap();
    write_table(&output, &table).unwrap();

    let raw = std::fs::read(&output).unwrap();
    assert_eq!(&raw[..3], &[0xEF, 0xBB, 0xBF]);
}

#[test]
fn extra_columns_pass_through_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("div.csv");
    std::fs::write(
        &input,
        "番号,銘柄,配当/株,前月終値\n1,ABC,1.0,100\n2,ABC,1.0,100\n",
    )
    .unwrap();

    let config = YieldConfig::default();
    let mut table = read_table(&input).unwrap();
    normalize(&mut table, &config).unwrap();
    compute_yield(&mut table, &config).unwrap();

    let name_col = table.column_index("銘柄").unwrap();
    assert_eq!(table.cell(0, name_col), "ABC");
    assert_eq!(table.cell(1, name_col), "ABC");
}

#[test]
fn missing_input_column_aborts_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("div.csv");
    std::fs::write(&input, "番号,配当/株\n1,1.0\n").unwrap();

    let config = YieldConfig::default();
    let mut table = read_table(&input).unwrap();
    let err = normalize(&mut table, &config).unwrap_err();
    assert!(err.to_string().contains("前月終値"));

    assert!(!Path::new(&dir.path().join("out.csv")).exists());
}
