//! Pro-forma statements CLI
//!
//! Projects the statements for a set of assumptions, prints them and
//! optionally exports CSV tables, a text report and the numeric records.

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use proforma_statements::{
    assumptions::{load_assets_csv, load_assumptions, AssumptionSet, Currency},
    export,
    presentation::balance_indicator,
    FinancialStatements, ProFormaError, ProjectionEngine,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "proforma", about = "Multi-year IFRS-style pro-forma financial statements")]
struct Cli {
    /// JSON assumptions file (flat object; missing fields use the defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV asset register (name,value,life), replaces configured assets
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Override the projection horizon in years
    #[arg(short, long)]
    years: Option<i64>,

    /// Override the currency (ISO code such as EUR, or a literal symbol)
    #[arg(long)]
    currency: Option<String>,

    /// Override the decimal places for monetary values
    #[arg(long)]
    decimals: Option<usize>,

    /// Directory for one CSV file per statement
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Write a plain-text report document
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the numeric projection records as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let assumptions = resolve_assumptions(&cli)?;
    let engine = ProjectionEngine::new(assumptions).context("Invalid assumptions")?;
    let result = engine.project();
    let assumptions = engine.assumptions();

    let statements = FinancialStatements::build(assumptions, &result)
        .context("Failed to format statements")?;

    println!("{}", assumptions.report.company_name);
    println!("{}\n", assumptions.report.reporting_period);
    for table in statements.tables() {
        println!("{}", table.kind.title());
        println!("{}", table.to_text());
    }

    let check = result.balance_check();
    println!(
        "Balance check: {}",
        balance_indicator(&check, &assumptions.currency_symbol, assumptions.decimals)?
    );

    if let Some(dir) = &cli.out_dir {
        let written = export::write_csv_tables(dir, &statements)
            .with_context(|| format!("Failed to write CSV tables to {}", dir.display()))?;
        for path in written {
            println!("Wrote {}", path.display());
        }
    }

    if let Some(path) = &cli.report {
        export::write_report(path, &assumptions.report, &statements)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    if let Some(path) = &cli.json {
        let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
        export::write_json(BufWriter::new(file), &result)?;
        println!("Wrote {}", path.display());
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Years: {}", summary.total_years);
    println!("  Total Sales: {:.2}", summary.total_sales);
    println!("  Total Net Income: {:.2}", summary.total_net_income);
    println!("  Final Cash: {:.2}", summary.final_cash);
    println!("  Final Total Assets: {:.2}", summary.final_total_assets);

    Ok(())
}

/// Defaults, then the config file, then asset CSV and flag overrides
fn resolve_assumptions(cli: &Cli) -> Result<AssumptionSet> {
    let mut assumptions = match &cli.config {
        Some(path) => load_assumptions(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => AssumptionSet::default_example(),
    };

    if let Some(path) = &cli.assets {
        let list = load_assets_csv(path)
            .with_context(|| format!("Failed to load assets from {}", path.display()))?;
        if !list.rejected.is_empty() {
            warn!("Skipped {} invalid asset rows", list.rejected.len());
        }
        assumptions.assets = list.assets;
    }

    if let Some(years) = cli.years {
        if years < 1 {
            return Err(ProFormaError::InvalidHorizon(years).into());
        }
        assumptions.years = u32::try_from(years).context("Projection horizon too large")?;
    }
    if let Some(currency) = &cli.currency {
        assumptions.currency_symbol = Currency::resolve_symbol(currency);
    }
    if let Some(decimals) = cli.decimals {
        assumptions.decimals = decimals;
    }

    Ok(assumptions)
}
