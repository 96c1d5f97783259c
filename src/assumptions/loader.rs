//! JSON and CSV assumption loaders
//!
//! The JSON configuration is a flat object; every field is optional and falls
//! back to [`AssumptionSet::default_example`]. Rates are decimals (0.05 = 5%).

use super::assets::asset_from_fields;
use super::{
    parse_asset_text, Asset, AssetList, AssumptionSet, Currency, ManpowerDrivers,
    OpeningBalances, ReportMeta, RevenueDrivers,
};
use crate::error::{ProFormaError, Result};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Asset entry as it appears in the JSON configuration
///
/// `value` and `life` are kept untyped so a bad entry is dropped on its own
/// instead of failing the whole configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAsset {
    pub name: String,
    pub value: Value,
    pub life: Value,
}

impl RawAsset {
    /// Validate into an [`Asset`]; numeric strings are accepted as in the text form
    pub fn into_asset(self) -> Result<Asset> {
        let value = match &self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| {
            ProFormaError::invalid_asset(&self.name, format!("value {} is not a number", self.value))
        })?;
        let life = match &self.life {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| {
            ProFormaError::invalid_asset(&self.name, format!("life {} is not a whole number", self.life))
        })?;

        Asset::new(self.name, value, life)
    }
}

fn asset_from_json(entry: Value) -> Result<Asset> {
    let label = entry.to_string();
    let raw: RawAsset = serde_json::from_value(entry)
        .map_err(|err| ProFormaError::invalid_asset(label, err.to_string()))?;
    raw.into_asset()
}

/// Flat configuration object matching the input form fields
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RawAssumptions {
    pub years: i64,
    /// ISO code, labelled choice or literal symbol
    pub currency: String,
    pub decimals: usize,

    pub opening_cash: f64,
    pub opening_accounts_receivable: f64,
    pub opening_inventory: f64,
    pub opening_ppe: f64,
    pub opening_non_current_liabilities: f64,
    pub opening_current_liabilities: f64,
    pub opening_share_capital: f64,
    pub opening_retained_earnings: f64,

    pub units: f64,
    pub price_per_unit: f64,
    pub unit_growth: f64,
    pub price_growth: f64,
    pub variable_cost_per_unit: f64,
    pub fixed_costs: f64,
    pub tax_rate: f64,
    pub interest: f64,
    pub capex: f64,

    pub employees: f64,
    pub average_salary: f64,
    pub salary_growth: f64,

    /// Structured asset list of `{name, value, life}` objects; invalid entries are dropped
    pub assets: Option<Vec<Value>>,
    /// Free-form asset list, one `name, value, life` per line
    pub assets_text: Option<String>,

    pub company_name: String,
    pub reporting_period: String,
}

impl Default for RawAssumptions {
    fn default() -> Self {
        let d = AssumptionSet::default_example();
        Self {
            years: d.years as i64,
            currency: d.currency_symbol,
            decimals: d.decimals,
            opening_cash: d.opening.cash,
            opening_accounts_receivable: d.opening.accounts_receivable,
            opening_inventory: d.opening.inventory,
            opening_ppe: d.opening.ppe,
            opening_non_current_liabilities: d.opening.non_current_liabilities,
            opening_current_liabilities: d.opening.current_liabilities,
            opening_share_capital: d.opening.share_capital,
            opening_retained_earnings: d.opening.retained_earnings,
            units: d.revenue.initial_units,
            price_per_unit: d.revenue.initial_price,
            unit_growth: d.revenue.unit_growth,
            price_growth: d.revenue.price_growth,
            variable_cost_per_unit: d.revenue.variable_cost_per_unit,
            fixed_costs: d.fixed_costs,
            tax_rate: d.tax_rate,
            interest: d.interest,
            capex: d.capex,
            employees: d.manpower.employees,
            average_salary: d.manpower.average_salary,
            salary_growth: d.manpower.salary_growth,
            assets: None,
            assets_text: None,
            company_name: d.report.company_name,
            reporting_period: d.report.reporting_period,
        }
    }
}

impl RawAssumptions {
    /// Validate into an [`AssumptionSet`]
    ///
    /// A non-positive horizon fails the whole load. Invalid assets are dropped.
    /// With neither `assets` nor `assets_text` given, the default register is used.
    pub fn into_assumption_set(self) -> Result<AssumptionSet> {
        if self.years < 1 {
            return Err(ProFormaError::InvalidHorizon(self.years));
        }
        let years = u32::try_from(self.years).map_err(|_| ProFormaError::InvalidHorizon(self.years))?;

        let assets = match (self.assets, self.assets_text) {
            (None, None) => AssumptionSet::default_example().assets,
            (structured, text) => {
                let mut assets: Vec<Asset> = structured
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|entry| match asset_from_json(entry) {
                        Ok(asset) => Some(asset),
                        Err(err) => {
                            warn!("Dropping asset: {}", err);
                            None
                        }
                    })
                    .collect();
                if let Some(text) = text {
                    assets.extend(parse_asset_text(&text).assets);
                }
                assets
            }
        };

        Ok(AssumptionSet {
            years,
            currency_symbol: Currency::resolve_symbol(&self.currency),
            decimals: self.decimals,
            opening: OpeningBalances {
                cash: self.opening_cash,
                accounts_receivable: self.opening_accounts_receivable,
                inventory: self.opening_inventory,
                ppe: self.opening_ppe,
                non_current_liabilities: self.opening_non_current_liabilities,
                share_capital: self.opening_share_capital,
                retained_earnings: self.opening_retained_earnings,
                current_liabilities: self.opening_current_liabilities,
            },
            revenue: RevenueDrivers {
                initial_units: self.units,
                initial_price: self.price_per_unit,
                unit_growth: self.unit_growth,
                price_growth: self.price_growth,
                variable_cost_per_unit: self.variable_cost_per_unit,
            },
            fixed_costs: self.fixed_costs,
            tax_rate: self.tax_rate,
            interest: self.interest,
            capex: self.capex,
            manpower: ManpowerDrivers {
                employees: self.employees,
                average_salary: self.average_salary,
                salary_growth: self.salary_growth,
            },
            assets,
            report: ReportMeta {
                company_name: self.company_name,
                reporting_period: self.reporting_period,
            },
        })
    }
}

/// Load assumptions from a JSON configuration file
pub fn load_assumptions<P: AsRef<Path>>(path: P) -> Result<AssumptionSet> {
    let path = path.as_ref();
    info!("Loading assumptions from {}", path.display());
    load_assumptions_from_reader(File::open(path)?)
}

/// Load assumptions from any JSON reader (e.g., string buffer, stdin)
pub fn load_assumptions_from_reader<R: Read>(reader: R) -> Result<AssumptionSet> {
    let raw: RawAssumptions = serde_json::from_reader(reader)?;
    raw.into_assumption_set()
}

/// Load an asset register from a CSV file with a `name,value,life` header
///
/// Rows with the wrong field count or unparseable numbers are dropped.
pub fn load_assets_csv<P: AsRef<Path>>(path: P) -> Result<AssetList> {
    load_assets_csv_from_reader(File::open(path)?)
}

/// Load an asset register from any CSV reader
pub fn load_assets_csv_from_reader<R: Read>(reader: R) -> Result<AssetList> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut list = AssetList::default();

    // Byte records so a row with invalid UTF-8 is dropped alone
    for result in csv_reader.byte_records() {
        let record = result?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        let parsed = match record
            .iter()
            .map(std::str::from_utf8)
            .collect::<std::result::Result<Vec<&str>, _>>()
        {
            Ok(fields) => asset_from_fields(&fields.join(","), &fields),
            Err(_) => {
                let entry: Vec<_> = record.iter().map(String::from_utf8_lossy).collect();
                Err(ProFormaError::invalid_asset(entry.join(","), "row is not valid UTF-8"))
            }
        };
        match parsed {
            Ok(asset) => list.assets.push(asset),
            Err(err) => {
                warn!("Skipping asset row: {}", err);
                list.rejected.push(err);
            }
        }
    }

    Ok(list)
}
