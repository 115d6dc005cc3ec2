//! Data sources consumed by the engine.
//!
//! The engine never talks to storage directly. The storage layer implements
//! [`StatementSources`]; [`InMemorySources`] is provided for embedding and
//! tests.

mod memory;

use std::fmt;

use chrono::NaiveDate;
use liasse_shared::SourceResult;
use liasse_shared::types::TenantId;
use serde::{Deserialize, Serialize};

use crate::annexes::{FixedAssetRecord, InvoiceRecord, ReceptionRecord};
use crate::fiscal::Exercice;
use crate::ledger::{Account, LedgerLine};
use crate::ratios::RatioThresholds;
use crate::reports::SalesRecord;

pub use memory::InMemorySources;

/// Identifies a source in warnings and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Posted ledger lines.
    Ledger,
    /// Accounting periods.
    Exercices,
    /// Chart of accounts (labels).
    Accounts,
    /// Fixed-asset register.
    FixedAssets,
    /// Customer invoices.
    Receivables,
    /// Supplier receptions.
    Payables,
    /// Sales records (additional levy).
    Sales,
    /// Regional ratio thresholds.
    Thresholds,
}

impl SourceKind {
    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ledger => "ledger",
            Self::Exercices => "exercices",
            Self::Accounts => "accounts",
            Self::FixedAssets => "fixed_assets",
            Self::Receivables => "receivables",
            Self::Payables => "payables",
            Self::Sales => "sales",
            Self::Thresholds => "thresholds",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to a tenant's accounting data.
///
/// This trait is implemented by the storage layer. Every call is scoped to
/// one tenant; implementations must not leak another tenant's records.
pub trait StatementSources: Send + Sync {
    /// Posted ledger lines dated within `[date_start, date_end]`.
    fn fetch_ledger_lines(
        &self,
        tenant: TenantId,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> SourceResult<Vec<LedgerLine>>;

    /// All exercices of the tenant.
    fn fetch_exercices(&self, tenant: TenantId) -> SourceResult<Vec<Exercice>>;

    /// Chart of accounts, for labels.
    fn fetch_accounts(&self, tenant: TenantId) -> SourceResult<Vec<Account>>;

    /// Fixed-asset register.
    fn fetch_fixed_assets(&self, tenant: TenantId) -> SourceResult<Vec<FixedAssetRecord>>;

    /// Customer invoices.
    fn fetch_receivable_invoices(&self, tenant: TenantId) -> SourceResult<Vec<InvoiceRecord>>;

    /// Supplier receptions.
    fn fetch_payable_receptions(&self, tenant: TenantId) -> SourceResult<Vec<ReceptionRecord>>;

    /// Sales records dated within `[date_start, date_end]`.
    fn fetch_sales_records(
        &self,
        tenant: TenantId,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> SourceResult<Vec<SalesRecord>>;

    /// Regional ratio thresholds, if the tenant has any.
    fn fetch_regional_thresholds(&self, tenant: TenantId) -> SourceResult<Option<RatioThresholds>>;
}
