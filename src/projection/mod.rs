//! Projection engine for year-by-year pro-forma statements

mod state;
mod engine;
mod records;

pub use state::ProjectionState;
pub use engine::{
    solve_current_liabilities_plug, ProjectionEngine, YearProjection, INVENTORY_PCT_OF_SALES,
    RECEIVABLES_PCT_OF_SALES,
};
pub use records::{
    BalanceCheck, BalanceSheetRecord, CashFlowRecord, ProjectionResult, ProjectionSummary,
    YearRecord, BALANCE_TOLERANCE,
};
