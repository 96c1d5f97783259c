//! Number formatting for statement cells

use crate::error::{ProFormaError, Result};

/// Highest supported decimal precision
pub const MAX_DECIMALS: usize = 6;

/// Magnitudes at or above this lose integer precision in `f64`
pub const MAX_MAGNITUDE: f64 = 1e15;

/// Format with thousands separators and fixed decimals: `-1,234.50`
///
/// Values that round to zero are shown unsigned.
pub fn format_number(value: f64, decimals: usize) -> Result<String> {
    check_renderable(value, decimals)?;

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let is_zero = formatted.bytes().all(|b| b == b'0' || b == b'.');
    let mut out = String::with_capacity(formatted.len() + formatted.len() / 3 + 1);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    Ok(out)
}

/// Currency cell: symbol followed by the signed amount, e.g. `$-1,234.50`
pub fn format_currency(value: f64, symbol: &str, decimals: usize) -> Result<String> {
    Ok(format!("{}{}", symbol, format_number(value, decimals)?))
}

/// Unit cell: whole number with thousands separators
pub fn format_units(value: f64) -> Result<String> {
    format_number(value, 0)
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    (value * factor).round() / factor
}

fn check_renderable(value: f64, decimals: usize) -> Result<()> {
    let reason = if decimals > MAX_DECIMALS {
        "precision exceeds 6 decimals"
    } else if value.is_nan() {
        "value is not a number"
    } else if value.is_infinite() {
        "value is infinite"
    } else if value.abs() >= MAX_MAGNITUDE {
        "magnitude too large to render exactly"
    } else {
        return Ok(());
    };
    Err(ProFormaError::Formatting {
        value,
        decimals,
        reason,
    })
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
