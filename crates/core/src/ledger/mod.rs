//! Posted ledger lines and their aggregation into account balances.
//!
//! The engine never validates or rebalances the ledger: lines are posted,
//! immutable facts supplied by the storage layer.

pub mod aggregate;
pub mod types;

#[cfg(test)]
mod aggregate_props;

pub use aggregate::{AccountMovement, AggregatedBalances, LedgerAggregator};
pub use types::{Account, LedgerLine};
