//! Sensitivity sweep over unit and price growth
//!
//! Usage: cargo run --bin scenario_sweep -- [--config assumptions.json]

use anyhow::{Context, Result};
use clap::Parser;
use proforma_statements::{
    assumptions::{load_assumptions, AssumptionSet},
    scenario::{Scenario, ScenarioRunner},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "scenario_sweep", about = "Unit growth x price growth sensitivity grid")]
struct Cli {
    /// JSON assumptions file for the base case
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Unit growth rates to test (decimals)
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.0, 0.05, 0.10, 0.15])]
    unit_growth: Vec<f64>,

    /// Price growth rates to test (decimals)
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.0, 0.02, 0.04])]
    price_growth: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => load_assumptions(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => AssumptionSet::default_example(),
    };
    let runner = ScenarioRunner::new(base);

    let scenarios: Vec<Scenario> = cli
        .unit_growth
        .iter()
        .flat_map(|&units| cli.price_growth.iter().map(move |&price| (units, price)))
        .map(|(units, price)| {
            runner.scenario(
                format!("units {:+.1}% / price {:+.1}%", units * 100.0, price * 100.0),
                |a| {
                    a.revenue.unit_growth = units;
                    a.revenue.price_growth = price;
                },
            )
        })
        .collect();

    let start = Instant::now();
    let results = runner.run_batch(&scenarios)?;
    println!("Ran {} scenarios in {:?}\n", results.len(), start.elapsed());

    let years = runner.assumptions().years;
    println!(
        "{:<32} {:>16} {:>16} {:>16} {:>10}",
        "Scenario",
        format!("Y{} Sales", years),
        format!("Y{} Net Income", years),
        "Closing Cash",
        "Balanced"
    );
    println!("{}", "-".repeat(94));

    for output in &results {
        let summary = output.result.summary();
        let last = output.result.income.last();
        println!(
            "{:<32} {:>16.2} {:>16.2} {:>16.2} {:>10}",
            output.name,
            last.map(|r| r.sales).unwrap_or(0.0),
            last.map(|r| r.net_income).unwrap_or(0.0),
            summary.final_cash,
            if output.result.balance_check().is_balanced() { "yes" } else { "no" },
        );
    }

    Ok(())
}
