//! Core projection engine for annual pro-forma statements
//!
//! Each year is computed from the prior year's [`ProjectionState`] in three
//! steps (income, cash flow, balance sheet) and the run is a left fold over
//! years 1..=horizon.

use crate::assumptions::AssumptionSet;
use crate::error::Result;
use super::records::{BalanceSheetRecord, CashFlowRecord, ProjectionResult, YearRecord};
use super::state::ProjectionState;
use log::{debug, info};

/// Year-end accounts receivable as a share of the year's sales
pub const RECEIVABLES_PCT_OF_SALES: f64 = 0.20;

/// Year-end inventory as a share of the year's sales
pub const INVENTORY_PCT_OF_SALES: f64 = 0.10;

/// Records for one projected year plus the state opening the next
#[derive(Debug, Clone)]
pub struct YearProjection {
    pub income: YearRecord,
    pub cash_flow: CashFlowRecord,
    pub balance_sheet: BalanceSheetRecord,
    pub next: ProjectionState,
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: AssumptionSet,
    /// Straight-line charge, identical every year
    depreciation: f64,
}

impl ProjectionEngine {
    /// Create an engine, rejecting an invalid horizon before any computation
    pub fn new(assumptions: AssumptionSet) -> Result<Self> {
        assumptions.validate()?;
        let depreciation = assumptions.annual_depreciation();
        Ok(Self {
            assumptions,
            depreciation,
        })
    }

    pub fn assumptions(&self) -> &AssumptionSet {
        &self.assumptions
    }

    /// Run the projection for every year of the horizon
    pub fn project(&self) -> ProjectionResult {
        let years = self.assumptions.years;
        info!(
            "Projecting {} years ({} assets, depreciation {:.2}/yr)",
            years,
            self.assumptions.assets.len(),
            self.depreciation
        );

        let opening = ProjectionState::opening(&self.assumptions);
        let (_, result) = (1..=years).fold(
            (opening, ProjectionResult::with_capacity(years as usize)),
            |(prior, mut result), _| {
                let year = self.project_year(&prior);
                result.add_year(year.income, year.cash_flow, year.balance_sheet);
                (year.next, result)
            },
        );

        result
    }

    /// Project the year opened by `prior`
    pub fn project_year(&self, prior: &ProjectionState) -> YearProjection {
        let income = self.income_for_year(prior);
        let cash_flow = self.cash_flow_for_year(prior, &income);
        let balance_sheet = self.balance_sheet_for_year(prior, &income, &cash_flow);
        let next = prior.advance(&self.assumptions, &balance_sheet);

        debug!(
            "Year {}: sales={:.2} net_income={:.2} closing_cash={:.2} current_liabilities={:.2}",
            income.year,
            income.sales,
            income.net_income,
            cash_flow.closing_cash,
            balance_sheet.current_liabilities
        );

        YearProjection {
            income,
            cash_flow,
            balance_sheet,
            next,
        }
    }

    /// Income statement: revenue build-up through net income
    fn income_for_year(&self, prior: &ProjectionState) -> YearRecord {
        let a = &self.assumptions;

        let units = prior.units;
        let price = prior.price;
        let sales = units * price;
        let cost_of_sales = units * a.revenue.variable_cost_per_unit;
        let gross_profit = sales - cost_of_sales;

        let manpower_cost = a.manpower.employees * prior.salary;
        let operating_expenses = a.fixed_costs + manpower_cost + self.depreciation;
        let ebit = gross_profit - operating_expenses;

        let pre_tax_profit = ebit - a.interest;
        // No loss carry-forward and no refunds
        let tax = if pre_tax_profit > 0.0 {
            pre_tax_profit * a.tax_rate
        } else {
            0.0
        };
        let net_income = pre_tax_profit - tax;

        YearRecord {
            year: prior.next_year(),
            units,
            price,
            sales,
            cost_of_sales,
            gross_profit,
            manpower_cost,
            fixed_costs: a.fixed_costs,
            depreciation: self.depreciation,
            operating_expenses,
            ebit,
            interest: a.interest,
            pre_tax_profit,
            tax,
            net_income,
            capex: a.capex,
        }
    }

    /// Cash flow statement, indirect method
    fn cash_flow_for_year(&self, prior: &ProjectionState, income: &YearRecord) -> CashFlowRecord {
        let (receivables, inventory) = working_capital(income.sales);

        let delta_receivables = receivables - prior.accounts_receivable;
        let delta_inventory = inventory - prior.inventory;
        let delta_payables = 0.0;
        let operating_cash_flow =
            income.net_income + income.depreciation - delta_receivables - delta_inventory + delta_payables;

        let investing_cash_flow = -income.capex;

        // Debt and share capital are held at their opening values
        let delta_non_current_liabilities = 0.0;
        let delta_share_capital = 0.0;
        let interest_paid = income.interest;
        let financing_cash_flow = delta_non_current_liabilities + delta_share_capital - interest_paid;

        let net_change_in_cash = operating_cash_flow + investing_cash_flow + financing_cash_flow;

        CashFlowRecord {
            year: income.year,
            net_income: income.net_income,
            depreciation: income.depreciation,
            delta_receivables,
            delta_inventory,
            delta_payables,
            operating_cash_flow,
            capex: income.capex,
            investing_cash_flow,
            delta_non_current_liabilities,
            delta_share_capital,
            interest_paid,
            financing_cash_flow,
            net_change_in_cash,
            closing_cash: prior.cash + net_change_in_cash,
        }
    }

    /// Balance sheet with current liabilities solved as the balancing figure
    fn balance_sheet_for_year(
        &self,
        prior: &ProjectionState,
        income: &YearRecord,
        cash_flow: &CashFlowRecord,
    ) -> BalanceSheetRecord {
        let opening = &self.assumptions.opening;
        let (accounts_receivable, inventory) = working_capital(income.sales);

        let ppe = prior.ppe + income.capex - income.depreciation;
        let cash = cash_flow.closing_cash;
        let total_current_assets = cash + accounts_receivable + inventory;
        let total_assets = total_current_assets + ppe;

        let share_capital = opening.share_capital;
        let retained_earnings = prior.retained_earnings + income.net_income;
        let total_equity = share_capital + retained_earnings;

        let non_current_liabilities = opening.non_current_liabilities;
        let current_liabilities =
            solve_current_liabilities_plug(total_assets, non_current_liabilities, total_equity);
        let total_liabilities_and_equity = non_current_liabilities + current_liabilities + total_equity;

        BalanceSheetRecord {
            year: income.year,
            ppe,
            cash,
            accounts_receivable,
            inventory,
            total_current_assets,
            total_assets,
            share_capital,
            retained_earnings,
            total_equity,
            non_current_liabilities,
            current_liabilities,
            total_liabilities_and_equity,
        }
    }
}

/// Year-end receivables and inventory implied by the year's sales
fn working_capital(sales: f64) -> (f64, f64) {
    (sales * RECEIVABLES_PCT_OF_SALES, sales * INVENTORY_PCT_OF_SALES)
}

/// Current liabilities that make assets equal liabilities + equity
///
/// Stands in for a real liabilities schedule; replace this step to model
/// payables, accruals and short-term debt explicitly.
pub fn solve_current_liabilities_plug(
    total_assets: f64,
    non_current_liabilities: f64,
    total_equity: f64,
) -> f64 {
    total_assets - (non_current_liabilities + total_equity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{Asset, ManpowerDrivers, OpeningBalances, ReportMeta, RevenueDrivers};
    use crate::error::ProFormaError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    /// Three-year scenario with flat drivers and a single machine
    fn reference_assumptions() -> AssumptionSet {
        AssumptionSet {
            years: 3,
            currency_symbol: "$".to_string(),
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
                unit_growth: 0.0,
                price_growth: 0.0,
                variable_cost_per_unit: 40.0,
            },
            fixed_costs: 200_000.0,
            tax_rate: 0.2,
            interest: 20_000.0,
            capex: 50_000.0,
            manpower: ManpowerDrivers {
                employees: 10.0,
                average_salary: 30_000.0,
                salary_growth: 0.0,
            },
            assets: vec![Asset::new("Machinery", 300_000.0, 10).unwrap()],
            report: ReportMeta::default(),
        }
    }

    /// A spread of inputs including losses, negative prices and no assets
    fn varied_assumptions() -> Vec<AssumptionSet> {
        let base = AssumptionSet::default_example();
        let mut loss_making = reference_assumptions();
        loss_making.fixed_costs = 900_000.0;
        let mut negative_price = reference_assumptions();
        negative_price.revenue.initial_price = -5.0;
        negative_price.revenue.price_growth = 0.1;
        let mut no_assets = base.clone();
        no_assets.assets.clear();
        no_assets.years = 10;
        let mut shrinking = base.clone();
        shrinking.revenue.unit_growth = -0.3;
        shrinking.manpower.salary_growth = 0.15;
        shrinking.years = 8;

        vec![base, reference_assumptions(), loss_making, negative_price, no_assets, shrinking]
    }

    fn project(assumptions: AssumptionSet) -> ProjectionResult {
        ProjectionEngine::new(assumptions).unwrap().project()
    }

    #[test]
    fn test_reference_year_one_income() {
        let result = project(reference_assumptions());
        assert_eq!(result.years(), 3);

        let y1 = &result.income[0];
        assert_eq!(y1.year, 1);
        assert_relative_eq!(y1.sales, 1_000_000.0);
        assert_relative_eq!(y1.cost_of_sales, 400_000.0);
        assert_relative_eq!(y1.gross_profit, 600_000.0);
        assert_relative_eq!(y1.depreciation, 30_000.0);
        assert_relative_eq!(y1.manpower_cost, 300_000.0);
        assert_relative_eq!(y1.operating_expenses, 530_000.0);
        assert_relative_eq!(y1.ebit, 70_000.0);
        assert_relative_eq!(y1.pre_tax_profit, 50_000.0);
        assert_relative_eq!(y1.tax, 10_000.0);
        assert_relative_eq!(y1.net_income, 40_000.0);
    }

    #[test]
    fn test_reference_year_one_cash_flow_and_balance_sheet() {
        let result = project(reference_assumptions());
        let cf = &result.cash_flows[0];
        let bs = &result.balance_sheets[0];

        // AR 200k vs 50k opening, inventory 100k vs 30k opening
        assert_relative_eq!(cf.delta_receivables, 150_000.0);
        assert_relative_eq!(cf.delta_inventory, 70_000.0);
        assert_eq!(cf.delta_payables, 0.0);
        assert_relative_eq!(cf.operating_cash_flow, -150_000.0);
        assert_relative_eq!(cf.investing_cash_flow, -50_000.0);
        assert_relative_eq!(cf.financing_cash_flow, -20_000.0);
        assert_relative_eq!(cf.net_change_in_cash, -220_000.0);
        assert_relative_eq!(cf.closing_cash, -120_000.0);

        assert_relative_eq!(bs.ppe, 420_000.0);
        assert_relative_eq!(bs.total_current_assets, 180_000.0);
        assert_relative_eq!(bs.total_assets, 600_000.0);
        assert_relative_eq!(bs.retained_earnings, 40_000.0);
        assert_relative_eq!(bs.total_equity, 440_000.0);
        assert_relative_eq!(bs.current_liabilities, 60_000.0);
        assert_abs_diff_eq!(bs.total_assets, bs.total_liabilities_and_equity, epsilon = 1e-6);
    }

    #[test]
    fn test_flat_drivers_give_flat_income() {
        let result = project(reference_assumptions());
        for row in &result.income {
            assert_relative_eq!(row.net_income, 40_000.0);
        }
        // Working capital only moves in year 1
        assert_relative_eq!(result.cash_flows[1].delta_receivables, 0.0);
        assert_relative_eq!(result.cash_flows[1].operating_cash_flow, 70_000.0);
    }

    #[test]
    fn test_accounting_identity_holds_every_year() {
        for assumptions in varied_assumptions() {
            let result = project(assumptions);
            for bs in &result.balance_sheets {
                assert_abs_diff_eq!(bs.total_assets, bs.total_liabilities_and_equity, epsilon = 1e-6);
            }
            assert!(result.balance_check().is_balanced());
        }
    }

    #[test]
    fn test_ppe_and_retained_earnings_roll_forward() {
        for assumptions in varied_assumptions() {
            let result = project(assumptions);
            for t in 1..result.years() {
                let prev = &result.balance_sheets[t - 1];
                let curr = &result.balance_sheets[t];
                let income = &result.income[t];
                assert_abs_diff_eq!(curr.ppe, prev.ppe + income.capex - income.depreciation, epsilon = 1e-6);
                assert_abs_diff_eq!(
                    curr.retained_earnings,
                    prev.retained_earnings + income.net_income,
                    epsilon = 1e-6
                );
            }
        }
    }

    #[test]
    fn test_depreciation_constant_across_years() {
        let assumptions = AssumptionSet::default_example();
        let expected: f64 = assumptions.assets.iter().map(|a| a.value() / a.life_years() as f64).sum();
        let result = project(assumptions);
        for row in &result.income {
            assert_eq!(row.depreciation, expected);
        }
    }

    #[test]
    fn test_depreciation_continues_past_useful_life() {
        let mut assumptions = reference_assumptions();
        assumptions.assets = vec![Asset::new("Laptop", 3_000.0, 2).unwrap()];
        assumptions.years = 5;
        let result = project(assumptions);
        assert_relative_eq!(result.income[4].depreciation, 1_500.0);
    }

    #[test]
    fn test_closing_cash_matches_balance_sheet_cash() {
        for assumptions in varied_assumptions() {
            let result = project(assumptions);
            for (cf, bs) in result.cash_flows.iter().zip(&result.balance_sheets) {
                assert_eq!(cf.closing_cash, bs.cash);
            }
        }
    }

    #[test]
    fn test_zero_tax_rate_means_zero_tax() {
        for mut assumptions in varied_assumptions() {
            assumptions.tax_rate = 0.0;
            let result = project(assumptions);
            assert!(result.income.iter().all(|r| r.tax == 0.0));
        }
    }

    #[test]
    fn test_no_tax_on_losses() {
        let mut assumptions = reference_assumptions();
        assumptions.fixed_costs = 900_000.0;
        let result = project(assumptions);
        for row in &result.income {
            assert!(row.pre_tax_profit <= 0.0);
            assert_eq!(row.tax, 0.0);
            assert_eq!(row.net_income, row.pre_tax_profit);
        }
    }

    #[test]
    fn test_drivers_grow_geometrically() {
        let result = project(AssumptionSet::default_example());
        let y1 = &result.income[0];
        let y2 = &result.income[1];
        let y3 = &result.income[2];
        assert_relative_eq!(y2.units, 10_500.0);
        assert_relative_eq!(y3.units, 11_025.0);
        assert_relative_eq!(y2.price, 102.0);
        assert_relative_eq!(y2.manpower_cost, 315_000.0);
        assert_relative_eq!(y1.sales, 1_000_000.0);
        assert_relative_eq!(y2.sales, 10_500.0 * 102.0);
    }

    #[test]
    fn test_negative_price_accepted() {
        let mut assumptions = reference_assumptions();
        assumptions.revenue.initial_price = -5.0;
        let result = project(assumptions);
        assert!(result.income[0].sales < 0.0);
        assert!(result.balance_check().is_balanced());
    }

    #[test]
    fn test_projection_is_deterministic() {
        let engine = ProjectionEngine::new(AssumptionSet::default_example()).unwrap();
        assert_eq!(engine.project(), engine.project());
    }

    #[test]
    fn test_zero_horizon_rejected_before_projection() {
        let assumptions = AssumptionSet {
            years: 0,
            ..reference_assumptions()
        };
        assert!(matches!(
            ProjectionEngine::new(assumptions),
            Err(ProFormaError::InvalidHorizon(0))
        ));
    }

    #[test]
    fn test_single_year_horizon() {
        let mut assumptions = reference_assumptions();
        assumptions.years = 1;
        let result = project(assumptions);
        assert_eq!(result.years(), 1);
        assert_eq!(result.year_labels(), vec!["Year 1".to_string()]);
    }

    #[test]
    fn test_project_year_from_arbitrary_state() {
        let engine = ProjectionEngine::new(reference_assumptions()).unwrap();
        let prior = ProjectionState {
            year: 4,
            units: 2_000.0,
            price: 50.0,
            salary: 10_000.0,
            accounts_receivable: 20_000.0,
            inventory: 10_000.0,
            ppe: 100_000.0,
            cash: 5_000.0,
            retained_earnings: 1_000.0,
        };
        let year = engine.project_year(&prior);
        assert_eq!(year.income.year, 5);
        assert_relative_eq!(year.income.sales, 100_000.0);
        assert_relative_eq!(year.balance_sheet.ppe, 120_000.0);
        assert_eq!(year.next.year, 5);
        assert_relative_eq!(year.next.cash, year.cash_flow.closing_cash);
    }

    #[test]
    fn test_plug_solves_identity() {
        assert_relative_eq!(solve_current_liabilities_plug(600_000.0, 100_000.0, 440_000.0), 60_000.0);
        assert_relative_eq!(solve_current_liabilities_plug(100.0, 80.0, 50.0), -30.0);
    }
}
