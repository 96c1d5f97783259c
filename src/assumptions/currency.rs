//! Currency presets for statement display

use serde::{Deserialize, Serialize};

/// Reporting currencies with a known display symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Aed,
    Sar,
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Aed,
        Currency::Sar,
        Currency::Jpy,
    ];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Aed => "AED",
            Currency::Sar => "SAR",
            Currency::Jpy => "JPY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Aed => "د.إ",
            Currency::Sar => "﷼",
            Currency::Jpy => "¥",
        }
    }

    /// Look up a preset by ISO code, case-insensitive
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Resolve a user-supplied currency to a display symbol
    ///
    /// Accepts an ISO code (`"EUR"`), a labelled choice (`"EUR (€)"`), or a
    /// literal symbol, which is returned unchanged.
    pub fn resolve_symbol(input: &str) -> String {
        let input = input.trim();
        if let Some(currency) = Self::from_code(input) {
            return currency.symbol().to_string();
        }
        if let (Some(open), Some(close)) = (input.rfind('('), input.rfind(')')) {
            if open < close {
                return input[open + 1..close].trim().to_string();
            }
        }
        input.to_string()
    }
}
