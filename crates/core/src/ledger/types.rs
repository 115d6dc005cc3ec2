//! Ledger domain types.

use chrono::NaiveDate;
use liasse_shared::types::LedgerEntryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single posted ledger line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Journal entry this line belongs to.
    pub entry_id: LedgerEntryId,
    /// OHADA account code (e.g., "411001").
    pub account_code: String,
    /// Debit amount (non-negative).
    pub debit: Decimal,
    /// Credit amount (non-negative).
    pub credit: Decimal,
    /// Posting date.
    pub entry_date: NaiveDate,
}

impl LedgerLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: Decimal, entry_date: NaiveDate) -> Self {
        Self {
            entry_id: LedgerEntryId::new(),
            account_code: account_code.into(),
            debit: amount,
            credit: Decimal::ZERO,
            entry_date,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: Decimal, entry_date: NaiveDate) -> Self {
        Self {
            entry_id: LedgerEntryId::new(),
            account_code: account_code.into(),
            debit: Decimal::ZERO,
            credit: amount,
            entry_date,
        }
    }
}

/// Chart of accounts entry.
///
/// Only the label is read from here; placement on the statements is derived
/// from the code alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account code.
    pub code: String,
    /// Account label.
    pub label: String,
}

impl Account {
    /// Creates an account.
    #[must_use]
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}
