//! Business assumptions driving a pro-forma projection
//!
//! An [`AssumptionSet`] is an immutable snapshot of every input the projection
//! engine reads: horizon, display settings, opening balances, revenue and cost
//! drivers, manpower and the depreciable asset register.

mod assets;
mod currency;
pub mod loader;

pub use assets::{parse_asset_text, Asset, AssetList};
pub use currency::Currency;
pub use loader::{
    load_assets_csv, load_assets_csv_from_reader, load_assumptions, load_assumptions_from_reader,
    RawAssumptions,
};

use crate::error::{ProFormaError, Result};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Balances at the start of year 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningBalances {
    pub cash: f64,
    pub accounts_receivable: f64,
    pub inventory: f64,
    /// Net book value of property, plant & equipment
    pub ppe: f64,
    pub non_current_liabilities: f64,
    pub share_capital: f64,
    pub retained_earnings: f64,
    /// Carried for completeness; year-end current liabilities are solved as a plug
    pub current_liabilities: f64,
}

/// Volume and pricing drivers for revenue and cost of sales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueDrivers {
    /// Units sold in year 1
    pub initial_units: f64,
    /// Price per unit in year 1
    pub initial_price: f64,
    /// Annual geometric growth in units (0.05 = 5%)
    pub unit_growth: f64,
    /// Annual geometric growth in price
    pub price_growth: f64,
    pub variable_cost_per_unit: f64,
}

/// Headcount and salary drivers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManpowerDrivers {
    pub employees: f64,
    /// Average annual salary in year 1
    pub average_salary: f64,
    pub salary_growth: f64,
}

/// Cover-page details for exported reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub company_name: String,
    pub reporting_period: String,
}

impl ReportMeta {
    /// Period label ending in the current calendar year
    pub fn current_period() -> String {
        format!(
            "For the Years Ended Dec 31, {}",
            chrono::Local::now().year()
        )
    }
}

impl Default for ReportMeta {
    fn default() -> Self {
        Self {
            company_name: "Example Company".to_string(),
            reporting_period: Self::current_period(),
        }
    }
}

/// Complete input snapshot for one projection run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssumptionSet {
    /// Projection horizon in years
    pub years: u32,

    /// Currency symbol prefixed to monetary values
    pub currency_symbol: String,

    /// Decimal places for monetary values
    pub decimals: usize,

    pub opening: OpeningBalances,
    pub revenue: RevenueDrivers,

    /// Fixed operating costs per year
    pub fixed_costs: f64,

    /// Corporate tax rate applied to positive pre-tax profit
    pub tax_rate: f64,

    /// Annual interest expense (constant, also the financing cash outflow)
    pub interest: f64,

    /// Capital expenditure per year
    pub capex: f64,

    pub manpower: ManpowerDrivers,

    /// Depreciable assets (already validated)
    pub assets: Vec<Asset>,

    pub report: ReportMeta,
}

impl AssumptionSet {
    /// Reference assumptions used when no configuration is supplied
    pub fn default_example() -> Self {
        Self {
            years: 5,
            currency_symbol: Currency::Usd.symbol().to_string(),
            decimals: 2,
            opening: OpeningBalances {
                cash: 100_000.0,
                accounts_receivable: 50_000.0,
                inventory: 30_000.0,
                ppe: 400_000.0,
                non_current_liabilities: 100_000.0,
                share_capital: 400_000.0,
                retained_earnings: 0.0,
                current_liabilities: 80_000.0,
            },
            revenue: RevenueDrivers {
                initial_units: 10_000.0,
                initial_price: 100.0,
                unit_growth: 0.05,
                price_growth: 0.02,
                variable_cost_per_unit: 40.0,
            },
            fixed_costs: 200_000.0,
            tax_rate: 0.20,
            interest: 20_000.0,
            capex: 50_000.0,
            manpower: ManpowerDrivers {
                employees: 10.0,
                average_salary: 30_000.0,
                salary_growth: 0.05,
            },
            assets: [
                ("Factory Building", 500_000.0, 25),
                ("Machinery", 300_000.0, 10),
                ("Vehicles", 100_000.0, 5),
            ]
            .into_iter()
            .filter_map(|(name, value, life)| Asset::new(name, value, life).ok())
            .collect(),
            report: ReportMeta::default(),
        }
    }

    /// Check the horizon before any computation runs
    pub fn validate(&self) -> Result<()> {
        if self.years < 1 {
            return Err(ProFormaError::InvalidHorizon(self.years as i64));
        }
        Ok(())
    }

    /// Straight-line depreciation charged every projection year
    pub fn annual_depreciation(&self) -> f64 {
        self.assets.iter().map(Asset::annual_depreciation).sum()
    }

    /// Replace the asset register with the valid entries parsed from free-form text
    pub fn with_asset_text(mut self, text: &str) -> Self {
        self.assets = parse_asset_text(text).assets;
        self
    }
}

impl Default for AssumptionSet {
    fn default() -> Self {
        Self::default_example()
    }
}
