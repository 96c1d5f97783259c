//! IFRS-ordered statement tables built from projection records

use super::format::{format_currency, format_units, round_to};
use super::{DisplayTable, TableKind};
use crate::assumptions::AssumptionSet;
use crate::error::Result;
use crate::projection::{BalanceCheck, BalanceSheetRecord, CashFlowRecord, ProjectionResult, YearRecord};

/// One line of a statement
enum Line {
    /// Section heading, no values
    Header(String),
    Blank,
    Currency(String, Vec<f64>),
    Units(String, Vec<f64>),
}

impl Line {
    fn header(label: &str) -> Self {
        Line::Header(label.to_string())
    }

    fn currency(label: &str, values: Vec<f64>) -> Self {
        Line::Currency(label.to_string(), values)
    }
}

/// The four formatted output tables
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialStatements {
    pub income_statement: DisplayTable,
    pub balance_sheet: DisplayTable,
    pub cash_flow: DisplayTable,
    pub depreciation_schedule: DisplayTable,
}

impl FinancialStatements {
    /// Format every statement using the assumptions' currency and precision
    pub fn build(assumptions: &AssumptionSet, result: &ProjectionResult) -> Result<Self> {
        let formatter = Formatter {
            symbol: &assumptions.currency_symbol,
            decimals: assumptions.decimals,
            year_labels: result.year_labels(),
        };

        Ok(Self {
            income_statement: formatter.table(TableKind::IncomeStatement, income_lines(result))?,
            balance_sheet: formatter.table(TableKind::BalanceSheet, balance_sheet_lines(assumptions, result))?,
            cash_flow: formatter.table(TableKind::CashFlow, cash_flow_lines(result))?,
            depreciation_schedule: depreciation_schedule(assumptions)?,
        })
    }

    /// Tables in the fixed order Income, Balance Sheet, Cash Flow, Depreciation
    pub fn tables(&self) -> [&DisplayTable; 4] {
        [
            &self.income_statement,
            &self.balance_sheet,
            &self.cash_flow,
            &self.depreciation_schedule,
        ]
    }
}

/// "In balance" or "Out of balance by <amount>" for display
pub fn balance_indicator(check: &BalanceCheck, symbol: &str, decimals: usize) -> Result<String> {
    if check.is_balanced() {
        Ok("In balance".to_string())
    } else {
        Ok(format!(
            "Out of balance by {}",
            format_currency(check.max_gap, symbol, decimals)?
        ))
    }
}

struct Formatter<'a> {
    symbol: &'a str,
    decimals: usize,
    year_labels: Vec<String>,
}

impl Formatter<'_> {
    fn table(&self, kind: TableKind, lines: Vec<Line>) -> Result<DisplayTable> {
        let header = std::iter::once("Item".to_string())
            .chain(self.year_labels.iter().cloned())
            .collect();
        let mut table = DisplayTable::new(kind, header);
        let empty_cells = || vec![String::new(); self.year_labels.len()];

        for line in lines {
            let (label, cells) = match line {
                Line::Header(label) => (label, empty_cells()),
                Line::Blank => (String::new(), empty_cells()),
                Line::Currency(label, values) => {
                    let cells = values
                        .iter()
                        .map(|&v| format_currency(v, self.symbol, self.decimals))
                        .collect::<Result<Vec<_>>>()?;
                    (label, cells)
                }
                Line::Units(label, values) => {
                    let cells = values.iter().map(|&v| format_units(v)).collect::<Result<Vec<_>>>()?;
                    (label, cells)
                }
            };
            let mut row = Vec::with_capacity(cells.len() + 1);
            row.push(label);
            row.extend(cells);
            table.push_row(row);
        }

        Ok(table)
    }
}

fn income_lines(result: &ProjectionResult) -> Vec<Line> {
    let col = |f: fn(&YearRecord) -> f64| result.income.iter().map(f).collect::<Vec<_>>();

    vec![
        Line::currency("Revenue (Units × Price per Unit)", col(|r| r.sales)),
        Line::Units("  Units".to_string(), col(|r| r.units)),
        Line::currency("  Price per Unit", col(|r| r.price)),
        Line::currency("Cost of Sales", col(|r| r.cost_of_sales)),
        Line::currency("Gross Profit", col(|r| r.gross_profit)),
        Line::header("Operating Expenses"),
        Line::currency("  Manpower Costs", col(|r| r.manpower_cost)),
        Line::currency("  Fixed Costs", col(|r| r.fixed_costs)),
        Line::currency("  Depreciation", col(|r| r.depreciation)),
        Line::currency("EBIT", col(|r| r.ebit)),
        Line::currency("Finance Costs", col(|r| r.interest)),
        Line::currency("Profit Before Tax", col(|r| r.pre_tax_profit)),
        Line::currency("Income Tax Expense", col(|r| r.tax)),
        Line::currency("Net Profit for the Year", col(|r| r.net_income)),
    ]
}

fn balance_sheet_lines(assumptions: &AssumptionSet, result: &ProjectionResult) -> Vec<Line> {
    let col = |f: fn(&BalanceSheetRecord) -> f64| {
        result.balance_sheets.iter().map(f).collect::<Vec<_>>()
    };

    let mut lines = vec![Line::header("ASSETS"), Line::header("  Non-current assets")];
    // Gross capitalized value of each registered asset
    lines.extend(assumptions.assets.iter().map(|asset| {
        Line::Currency(format!("    {}", asset.name()), vec![asset.value(); result.years()])
    }));
    lines.extend([
        Line::currency("  Property, Plant & Equipment (net)", col(|r| r.ppe)),
        Line::header("  Current assets"),
        Line::currency("    Cash", col(|r| r.cash)),
        Line::currency("    Accounts Receivable", col(|r| r.accounts_receivable)),
        Line::currency("    Inventory", col(|r| r.inventory)),
        Line::currency("  Total Current Assets", col(|r| r.total_current_assets)),
        Line::currency("Total Assets", col(|r| r.total_assets)),
        Line::Blank,
        Line::header("EQUITY AND LIABILITIES"),
        Line::header("  Equity"),
        Line::currency("    Share Capital", col(|r| r.share_capital)),
        Line::currency("    Retained Earnings", col(|r| r.retained_earnings)),
        Line::currency("  Total Equity", col(|r| r.total_equity)),
        Line::currency("  Non-current Liabilities", col(|r| r.non_current_liabilities)),
        Line::currency("  Current Liabilities", col(|r| r.current_liabilities)),
        Line::currency("Total Liabilities & Equity", col(|r| r.total_liabilities_and_equity)),
    ]);
    lines
}

/// Working-capital increases, capex and interest shown as cash outflows
fn cash_flow_lines(result: &ProjectionResult) -> Vec<Line> {
    let col = |f: fn(&CashFlowRecord) -> f64| {
        result.cash_flows.iter().map(f).collect::<Vec<_>>()
    };

    vec![
        Line::header("Cash Flows from Operating Activities"),
        Line::currency("  Net Profit for the Year", col(|r| r.net_income)),
        Line::currency("  Depreciation", col(|r| r.depreciation)),
        Line::currency("  Change in Accounts Receivable", col(|r| -r.delta_receivables)),
        Line::currency("  Change in Inventory", col(|r| -r.delta_inventory)),
        Line::currency("  Change in Accounts Payable", col(|r| r.delta_payables)),
        Line::currency("Net Cash from Operating Activities", col(|r| r.operating_cash_flow)),
        Line::header("Cash Flows from Investing Activities"),
        Line::currency("  Capital Expenditure (CapEx)", col(|r| -r.capex)),
        Line::currency("Net Cash from Investing Activities", col(|r| r.investing_cash_flow)),
        Line::header("Cash Flows from Financing Activities"),
        Line::currency("  Change in Non-current Liabilities", col(|r| r.delta_non_current_liabilities)),
        Line::currency("  Change in Share Capital", col(|r| r.delta_share_capital)),
        Line::currency("  Interest Paid", col(|r| -r.interest_paid)),
        Line::currency("Net Cash from Financing Activities", col(|r| r.financing_cash_flow)),
        Line::currency("Net Increase in Cash", col(|r| r.net_change_in_cash)),
        Line::currency("Closing Cash Balance", col(|r| r.closing_cash)),
    ]
}

fn depreciation_schedule(assumptions: &AssumptionSet) -> Result<DisplayTable> {
    let header = ["Asset", "Value", "Useful Life (Years)", "Annual Depreciation"]
        .map(String::from)
        .to_vec();
    let mut table = DisplayTable::new(TableKind::DepreciationSchedule, header);
    let symbol = assumptions.currency_symbol.as_str();
    let decimals = assumptions.decimals;

    for asset in &assumptions.assets {
        let annual = round_to(asset.annual_depreciation(), decimals);
        table.push_row(vec![
            asset.name().to_string(),
            format_currency(asset.value(), symbol, decimals)?,
            asset.life_years().to_string(),
            format_currency(annual, symbol, decimals)?,
        ]);
    }

    Ok(table)
}
