//! DivYield CLI — compute trailing-twelve-month dividend yield over a CSV.
//!
//! Flow: load config (warnings to stderr) → read table → normalize currency
//! columns → compute and append the yield columns → confirm overwrite if the
//! output exists → write BOM-prefixed CSV → print a run summary.

use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use divyield_core::calculator::YIELD_COLUMN;
use divyield_core::{compute_yield, normalize, read_table, write_table, Table, YieldConfig};

#[derive(Parser)]
#[command(
    name = "divyield",
    about = "Compute trailing-twelve-month dividend yield (gross and after-tax) over a monthly CSV"
)]
struct Cli {
    /// Input CSV with sequence, dividend-per-share, and previous-close columns.
    input: PathBuf,

    /// Output CSV path.
    #[arg(long, short = 'o', default_value = "div_yield.csv")]
    output: PathBuf,

    /// JSON config: currency_symbols, columns_to_convert, tax_rate.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Overwrite the output file without prompting.
    #[arg(long, default_value_t = false)]
    yes: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, warnings) = YieldConfig::load(&cli.config);
    for warn in &warnings {
        eprintln!("WARNING: {warn}");
    }

    let mut table = read_table(&cli.input)?;
    normalize(&mut table, &config)?;
    compute_yield(&mut table, &config)?;

    if cli.output.exists() && !cli.yes && !confirm_overwrite(&cli.output)? {
        println!("Aborted — {} left untouched.", cli.output.display());
        return Ok(());
    }

    write_table(&cli.output, &table)?;
    print_summary(&table, &cli.output);

    Ok(())
}

/// Ask before clobbering an existing output file. Anything but `y` aborts.
fn confirm_overwrite(path: &Path) -> Result<bool> {
    print!("Output file {} exists. Overwrite? [y/N]: ", path.display());
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn print_summary(table: &Table, output: &Path) {
    let yield_col = table
        .column_index(YIELD_COLUMN)
        .expect("yield column was just appended");
    let computed = table.column(yield_col).filter(|c| !c.is_empty()).count();

    println!();
    println!("=== Yield Calculation ===");
    println!("Rows:           {}", table.row_count());
    println!("Computed:       {computed}");
    println!("Not computable: {}", table.row_count() - computed);
    println!("Output:         {}", output.display());
}
