//! Financial statement derivation for OHADA ledgers.
//!
//! This crate contains pure derivation logic with no web or database
//! dependencies. Ledger lines, exercices and annex records are read through
//! the [`sources::StatementSources`] trait implemented by the storage layer.
//!
//! # Modules
//!
//! - `ledger` - Ledger lines and per-account aggregation
//! - `classification` - Account code to statement bucket mapping
//! - `reports` - Balance sheet, income statement and cash flow builders
//! - `annexes` - Depreciation, provisions and aging
//! - `ratios` - Financial ratios and threshold evaluation
//! - `fiscal` - Exercice resolution
//! - `engine` - Orchestration and report caching
//! - `sources` - Data source interface

pub mod annexes;
pub mod classification;
pub mod engine;
pub mod fiscal;
pub mod ledger;
pub mod ratios;
pub mod reports;
pub mod sources;

pub use engine::{FinancialReport, LedgerChangeHook, ReportCache, StatementEngine};
pub use sources::{InMemorySources, SourceKind, StatementSources};
