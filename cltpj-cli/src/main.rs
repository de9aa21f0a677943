use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cltpj_cli::report;
use cltpj_core::{CompensationInputs, TaxTables};
use cltpj_core::calculations::Comparison;
use cltpj_data::TablesLoader;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// CLT vs PJ monthly compensation comparator.
///
/// Estimates the net take-home value of a salaried (CLT) package and
/// solves for the independent-contractor (PJ) billing that breaks even
/// with it. Figures are estimates over a fixed snapshot of published
/// tax tables, not legal advice.
#[derive(Debug, Parser)]
struct Cli {
    /// Gross monthly CLT salary, in BRL.
    #[arg(long)]
    salary: Decimal,

    /// Monthly meal/food benefit.
    #[arg(long, default_value = "0")]
    meal_benefit: Decimal,

    /// Monthly employer-paid health plan.
    #[arg(long, default_value = "0")]
    health_plan: Decimal,

    /// Number of dependents for the IRRF deduction.
    #[arg(long, default_value_t = 0)]
    dependents: u32,

    /// Monthly commute cost on the CLT side.
    #[arg(long, default_value = "0")]
    commute: Decimal,

    /// Monthly accounting fee on the PJ side.
    #[arg(long, default_value = "0")]
    accounting_fee: Decimal,

    /// Monthly private-pension contribution on the PJ side.
    #[arg(long, default_value = "0")]
    pension: Decimal,

    /// Monthly commute cost on the PJ side.
    #[arg(long, default_value = "0")]
    pj_commute: Decimal,

    /// PJ revenue-tax rate, as a percentage between 0 and 30.
    #[arg(long, default_value = "10")]
    tax_rate: Decimal,

    /// INSS brackets CSV for an alternative tax year.
    /// Requires --irrf-table and --params-table.
    #[arg(long, requires = "irrf_table", requires = "params_table")]
    inss_table: Option<PathBuf>,

    /// IRRF brackets CSV for an alternative tax year.
    #[arg(long, requires = "inss_table")]
    irrf_table: Option<PathBuf>,

    /// Parameters CSV for an alternative tax year.
    #[arg(long, requires = "inss_table")]
    params_table: Option<PathBuf>,

    /// Emit the full result as JSON instead of the text summary.
    #[arg(long)]
    json: bool,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn load_tables(cli: &Cli) -> Result<TaxTables> {
    let (Some(inss), Some(irrf), Some(params)) =
        (&cli.inss_table, &cli.irrf_table, &cli.params_table)
    else {
        return Ok(TaxTables::brazil_2025());
    };

    let inss = File::open(inss)
        .with_context(|| format!("cannot open INSS brackets file: {}", inss.display()))?;
    let irrf = File::open(irrf)
        .with_context(|| format!("cannot open IRRF brackets file: {}", irrf.display()))?;
    let params = File::open(params)
        .with_context(|| format!("cannot open parameters file: {}", params.display()))?;

    TablesLoader::from_readers(inss, irrf, params).context("table set failed validation")
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.tax_rate < Decimal::ZERO || cli.tax_rate > dec!(30) {
        bail!("--tax-rate must be a percentage between 0 and 30, got {}", cli.tax_rate);
    }

    let tables = load_tables(&cli)?;
    debug!(tax_year = tables.tax_year, "tables loaded");

    let inputs = CompensationInputs {
        gross_salary: cli.salary,
        meal_benefit: cli.meal_benefit,
        health_plan: cli.health_plan,
        dependents: cli.dependents,
        commute_cost: cli.commute,
        accounting_fee: cli.accounting_fee,
        pension_contribution: cli.pension,
        contractor_commute_cost: cli.pj_commute,
        contractor_tax_rate: cli.tax_rate / dec!(100),
    };

    let result = Comparison::new(&tables).calculate(&inputs)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render(&result));
    }

    Ok(())
}
