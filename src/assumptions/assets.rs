//! Depreciable asset register and free-form asset list parsing

use crate::error::{ProFormaError, Result};
use log::warn;
use serde::Serialize;

/// A depreciable asset, straight-line over its useful life
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    name: String,
    value: f64,
    life_years: u32,
}

impl Asset {
    /// Create a validated asset
    ///
    /// Rejects non-positive useful lives (depreciation would divide by zero)
    /// and negative or non-finite values.
    pub fn new(name: impl Into<String>, value: f64, life_years: i64) -> Result<Self> {
        let name = name.into();
        if !value.is_finite() || value < 0.0 {
            return Err(ProFormaError::invalid_asset(
                name,
                format!("value {} must be a non-negative number", value),
            ));
        }
        if life_years <= 0 {
            return Err(ProFormaError::invalid_asset(
                name,
                format!("useful life {} must be positive", life_years),
            ));
        }
        let life_years = u32::try_from(life_years).map_err(|_| {
            ProFormaError::invalid_asset(name.clone(), format!("useful life {} is too long", life_years))
        })?;

        Ok(Self {
            name,
            value,
            life_years,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capitalized value
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn life_years(&self) -> u32 {
        self.life_years
    }

    /// Straight-line annual charge: value / life
    pub fn annual_depreciation(&self) -> f64 {
        self.value / self.life_years as f64
    }
}

/// Result of parsing a free-form asset list
#[derive(Debug, Default)]
pub struct AssetList {
    /// Entries that parsed and validated
    pub assets: Vec<Asset>,
    /// Entries dropped from the run, one error per offending line
    pub rejected: Vec<ProFormaError>,
}

/// Parse one asset per line in the form `name, value, life`
///
/// Lines with the wrong field count, a non-numeric value or life, or a
/// non-positive life are dropped; the remaining lines still parse.
pub fn parse_asset_text(text: &str) -> AssetList {
    let mut list = AssetList::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match parse_asset_line(line) {
            Ok(asset) => list.assets.push(asset),
            Err(err) => {
                warn!("Skipping asset line: {}", err);
                list.rejected.push(err);
            }
        }
    }

    list
}

fn parse_asset_line(line: &str) -> Result<Asset> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    asset_from_fields(line, &parts)
}

/// Build an asset from already-split `name, value, life` fields
pub(super) fn asset_from_fields(entry: &str, fields: &[&str]) -> Result<Asset> {
    let [name, value, life] = fields else {
        return Err(ProFormaError::invalid_asset(
            entry,
            format!("expected 3 fields (name, value, life), found {}", fields.len()),
        ));
    };

    let value: f64 = value
        .parse()
        .map_err(|_| ProFormaError::invalid_asset(entry, format!("value {:?} is not a number", value)))?;
    let life: i64 = life
        .parse()
        .map_err(|_| ProFormaError::invalid_asset(entry, format!("life {:?} is not a whole number", life)))?;

    Asset::new(*name, value, life)
}
