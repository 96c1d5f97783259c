//! Year-indexed statement records produced by a projection run

use serde::{Deserialize, Serialize};

/// Tolerance below which the balance sheet is reported as in balance
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Income statement figures for one projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// Projection year (1-indexed)
    pub year: u32,

    // Revenue build-up
    pub units: f64,
    pub price: f64,
    pub sales: f64,
    pub cost_of_sales: f64,
    pub gross_profit: f64,

    // Operating expenses
    pub manpower_cost: f64,
    pub fixed_costs: f64,
    pub depreciation: f64,
    pub operating_expenses: f64,

    // Profit
    pub ebit: f64,
    pub interest: f64,
    pub pre_tax_profit: f64,
    pub tax: f64,
    pub net_income: f64,

    /// Capital expenditure for the year (pass-through input)
    pub capex: f64,
}

/// Cash flow statement (indirect method) for one projection year
///
/// Deltas are balance movements (closing − opening); the statement shows
/// working-capital increases as cash outflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowRecord {
    pub year: u32,

    // Operating
    pub net_income: f64,
    pub depreciation: f64,
    pub delta_receivables: f64,
    pub delta_inventory: f64,
    pub delta_payables: f64,
    pub operating_cash_flow: f64,

    // Investing
    pub capex: f64,
    pub investing_cash_flow: f64,

    // Financing
    pub delta_non_current_liabilities: f64,
    pub delta_share_capital: f64,
    pub interest_paid: f64,
    pub financing_cash_flow: f64,

    pub net_change_in_cash: f64,
    pub closing_cash: f64,
}

/// Balance sheet at the end of one projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetRecord {
    pub year: u32,

    // Assets
    /// Net book value of property, plant & equipment
    pub ppe: f64,
    pub cash: f64,
    pub accounts_receivable: f64,
    pub inventory: f64,
    pub total_current_assets: f64,
    pub total_assets: f64,

    // Equity
    pub share_capital: f64,
    pub retained_earnings: f64,
    pub total_equity: f64,

    // Liabilities
    pub non_current_liabilities: f64,
    /// Balancing figure
    pub current_liabilities: f64,
    pub total_liabilities_and_equity: f64,
}

impl BalanceSheetRecord {
    /// Absolute difference between assets and liabilities + equity
    pub fn imbalance(&self) -> f64 {
        (self.total_assets - self.total_liabilities_and_equity).abs()
    }
}

/// Complete projection output, one record of each kind per year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub income: Vec<YearRecord>,
    pub cash_flows: Vec<CashFlowRecord>,
    pub balance_sheets: Vec<BalanceSheetRecord>,
}

impl ProjectionResult {
    pub fn with_capacity(years: usize) -> Self {
        Self {
            income: Vec::with_capacity(years),
            cash_flows: Vec::with_capacity(years),
            balance_sheets: Vec::with_capacity(years),
        }
    }

    /// Add one year's records
    pub fn add_year(&mut self, income: YearRecord, cash_flow: CashFlowRecord, balance_sheet: BalanceSheetRecord) {
        self.income.push(income);
        self.cash_flows.push(cash_flow);
        self.balance_sheets.push(balance_sheet);
    }

    /// Number of projected years
    pub fn years(&self) -> usize {
        self.income.len()
    }

    /// Column labels: "Year 1", "Year 2", ...
    pub fn year_labels(&self) -> Vec<String> {
        self.income.iter().map(|r| format!("Year {}", r.year)).collect()
    }

    /// Largest assets vs. liabilities + equity gap across all years
    pub fn balance_check(&self) -> BalanceCheck {
        let max_gap = self
            .balance_sheets
            .iter()
            .map(BalanceSheetRecord::imbalance)
            .fold(0.0, f64::max);
        BalanceCheck { max_gap }
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_sales: f64 = self.income.iter().map(|r| r.sales).sum();
        let total_net_income: f64 = self.income.iter().map(|r| r.net_income).sum();
        let total_tax: f64 = self.income.iter().map(|r| r.tax).sum();

        let final_cash = self.cash_flows.last().map(|r| r.closing_cash).unwrap_or(0.0);
        let final_total_assets = self.balance_sheets.last().map(|r| r.total_assets).unwrap_or(0.0);
        let final_equity = self.balance_sheets.last().map(|r| r.total_equity).unwrap_or(0.0);

        ProjectionSummary {
            total_years: self.years() as u32,
            total_sales,
            total_net_income,
            total_tax,
            final_cash,
            final_total_assets,
            final_equity,
            max_balance_gap: self.balance_check().max_gap,
        }
    }
}

/// Balance sheet reconciliation signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceCheck {
    /// Maximum absolute discrepancy across years
    pub max_gap: f64,
}

impl BalanceCheck {
    pub fn is_balanced(&self) -> bool {
        self.max_gap < BALANCE_TOLERANCE
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_sales: f64,
    pub total_net_income: f64,
    pub total_tax: f64,
    pub final_cash: f64,
    pub final_total_assets: f64,
    pub final_equity: f64,
    pub max_balance_gap: f64,
}
