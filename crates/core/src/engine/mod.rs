//! Report orchestration and caching.
//!
//! [`StatementEngine`] fetches a tenant's data, runs every builder and
//! bundles the results into a [`FinancialReport`]. Source failures and
//! inconsistencies never abort generation; they surface as warnings next to
//! whatever could still be derived.
//!
//! [`ReportCache`] keeps generated reports per `(tenant, exercice)` until the
//! storage layer signals a change through [`LedgerChangeHook`].

pub mod cache;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use cache::{LedgerChangeHook, ReportCache};
pub use service::StatementEngine;
pub use types::FinancialReport;
