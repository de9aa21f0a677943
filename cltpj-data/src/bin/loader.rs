use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cltpj_data::TablesLoader;

/// Validate a candidate tax-table file set before shipping it.
///
/// Loads the three CSV files, runs the same structural validation the
/// calculators rely on, and prints a summary of the snapshot. Intended
/// for the yearly figure refresh: point it at the new files and a clean
/// exit means the set is usable.
#[derive(Parser, Debug)]
#[command(name = "cltpj-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the INSS brackets CSV (tax_year,min_pay,max_pay,rate)
    #[arg(long)]
    inss: PathBuf,

    /// Path to the IRRF brackets CSV (tax_year,max_base,rate,deduction)
    #[arg(long)]
    irrf: PathBuf,

    /// Path to the parameters CSV (tax_year,name,value)
    #[arg(long)]
    params: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let inss = File::open(&args.inss)
        .with_context(|| format!("cannot open INSS brackets file: {}", args.inss.display()))?;
    let irrf = File::open(&args.irrf)
        .with_context(|| format!("cannot open IRRF brackets file: {}", args.irrf.display()))?;
    let params = File::open(&args.params)
        .with_context(|| format!("cannot open parameters file: {}", args.params.display()))?;

    let tables = TablesLoader::from_readers(inss, irrf, params)
        .context("table set failed validation")?;

    println!("Tax year {} loaded successfully.", tables.tax_year);
    println!(
        "  INSS: {} brackets, ceiling {}, cap {}",
        tables.inss_brackets.len(),
        tables.inss_ceiling,
        tables.inss_cap,
    );
    println!(
        "  IRRF: {} brackets, dependent deduction {}",
        tables.irrf_brackets.len(),
        tables.dependent_deduction,
    );
    println!(
        "  Solver: Simples limit {}, reduction factor {}, micro threshold {}",
        tables.simples_monthly_limit, tables.reduction_factor, tables.micro_revenue_threshold,
    );

    Ok(())
}
