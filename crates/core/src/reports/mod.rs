//! Financial statement generation.
//!
//! This module provides pure derivation logic for:
//! - Balance Sheet (bilan)
//! - Income Statement (compte de résultat)
//! - Cash Flow Statement (tableau des flux de trésorerie)
//! - Period-over-period comparison

pub mod balance_sheet;
pub mod cash_flow;
pub mod comparison;
pub mod error;
pub mod income_statement;
pub mod types;


pub use balance_sheet::BalanceSheetBuilder;
pub use cash_flow::CashFlowEstimator;
pub use comparison::{
    attach_prior_period, compare_balance_sheets, compare_income_statements, variation,
};
pub use error::ReportError;
pub use income_statement::IncomeStatementBuilder;
pub use types::*;
