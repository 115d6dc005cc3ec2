//! Annexes to the financial statements.
//!
//! Each annex is built from its own source: fixed-asset records for the
//! depreciation schedule, provision account movements for the provisions
//! table, open invoices and receptions for the aging reports.

pub mod aging;
pub mod service;
pub mod types;


pub use aging::{OpenItem, age_items, aging_bucket};
pub use service::AnnexesBuilder;
pub use types::{
    AgingBucket, AgingItem, AgingReport, AgingTotals, Annexes, DepreciationLine,
    DepreciationSchedule, FixedAssetRecord, InvoiceRecord, ProvisionAnnex, ProvisionLine,
    ReceptionRecord,
};
