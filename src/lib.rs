//! Pro-forma statements - multi-year IFRS-style financial projections
//!
//! This library provides:
//! - Assumption sets loaded from JSON, free-form asset text or CSV
//! - A year-by-year projection engine (income, cash flow, balance sheet)
//! - IFRS-ordered display tables with currency formatting
//! - CSV, text report and JSON export
//! - Parallel scenario comparison

pub mod error;
pub mod assumptions;
pub mod projection;
pub mod presentation;
pub mod export;
pub mod scenario;

// Re-export commonly used types
pub use error::{ProFormaError, Result};
pub use assumptions::{Asset, AssumptionSet};
pub use projection::{ProjectionEngine, ProjectionResult, BalanceCheck};
pub use presentation::{DisplayTable, FinancialStatements, TableKind};
pub use scenario::ScenarioRunner;
