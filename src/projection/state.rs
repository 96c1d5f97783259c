//! Carry-forward state between projection years

use crate::assumptions::AssumptionSet;
use super::records::BalanceSheetRecord;

/// Closing position of one year, which opens the next
///
/// Values are never mutated in place: [`ProjectionState::advance`] returns the
/// state for the following year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    /// Last completed projection year (0 = opening balances)
    pub year: u32,

    /// Units to sell in the next year
    pub units: f64,

    /// Price per unit in the next year
    pub price: f64,

    /// Average salary in the next year
    pub salary: f64,

    pub accounts_receivable: f64,
    pub inventory: f64,

    /// PPE net book value
    pub ppe: f64,

    pub cash: f64,
    pub retained_earnings: f64,
}

impl ProjectionState {
    /// Initialize state from the opening balances and year-1 drivers
    pub fn opening(assumptions: &AssumptionSet) -> Self {
        Self {
            year: 0,
            units: assumptions.revenue.initial_units,
            price: assumptions.revenue.initial_price,
            salary: assumptions.manpower.average_salary,
            accounts_receivable: assumptions.opening.accounts_receivable,
            inventory: assumptions.opening.inventory,
            ppe: assumptions.opening.ppe,
            cash: assumptions.opening.cash,
            retained_earnings: assumptions.opening.retained_earnings,
        }
    }

    /// State opening the year after `closing`
    ///
    /// Drivers grow geometrically; balances are taken from the closing balance sheet.
    pub fn advance(&self, assumptions: &AssumptionSet, closing: &BalanceSheetRecord) -> Self {
        Self {
            year: closing.year,
            units: self.units * (1.0 + assumptions.revenue.unit_growth),
            price: self.price * (1.0 + assumptions.revenue.price_growth),
            salary: self.salary * (1.0 + assumptions.manpower.salary_growth),
            accounts_receivable: closing.accounts_receivable,
            inventory: closing.inventory,
            ppe: closing.ppe,
            cash: closing.cash,
            retained_earnings: closing.retained_earnings,
        }
    }

    /// Year that this state opens
    pub fn next_year(&self) -> u32 {
        self.year + 1
    }
}
