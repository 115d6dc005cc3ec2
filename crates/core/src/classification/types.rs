//! Classification output types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income statement layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultLayer {
    /// Ordinary operating activity.
    Operating,
    /// Financial activity.
    Financial,
    /// Non-ordinary activities (HAO).
    Extraordinary,
}

/// Statement bucket an account lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "bucket", content = "layer")]
pub enum Bucket {
    /// Capital and reserves (10-15).
    Equity,
    /// Borrowings and similar debts (16-19).
    FinancialDebt,
    /// Fixed asset at gross value (class 2).
    FixedAsset,
    /// Accumulated depreciation or impairment (28/29), netted against its heading.
    FixedAssetContra,
    /// Stocks (class 3).
    Inventory,
    /// Debit-side third-party balance (41-49).
    Receivable,
    /// Supplier (40) or credit-side third-party balance (41-49).
    Payable,
    /// Non-negative treasury balance (class 5).
    Cash,
    /// Negative treasury balance (class 5).
    Overdraft,
    /// Revenue in the given layer.
    Revenue(ResultLayer),
    /// Expense in the given layer.
    Expense(ResultLayer),
}

impl Bucket {
    /// Returns true if the bucket belongs to the balance sheet.
    #[must_use]
    pub const fn is_balance_sheet(&self) -> bool {
        !self.is_income_statement()
    }

    /// Returns true if the bucket belongs to the income statement.
    #[must_use]
    pub const fn is_income_statement(&self) -> bool {
        matches!(self, Self::Revenue(_) | Self::Expense(_))
    }

    /// Fallback label when the chart of accounts has none.
    #[must_use]
    pub const fn default_label(&self) -> &'static str {
        match self {
            Self::Equity => "Equity",
            Self::FinancialDebt => "Financial debt",
            Self::FixedAsset => "Fixed asset",
            Self::FixedAssetContra => "Accumulated depreciation",
            Self::Inventory => "Inventory",
            Self::Receivable => "Receivable",
            Self::Payable => "Payable",
            Self::Cash => "Cash",
            Self::Overdraft => "Bank overdraft",
            Self::Revenue(_) => "Revenue",
            Self::Expense(_) => "Expense",
        }
    }
}

/// An account balance placed in its statement bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedBalance {
    /// Account code.
    pub account_code: String,
    /// Display label.
    pub label: String,
    /// Signed ledger balance (debits minus credits).
    pub net_amount: Decimal,
    /// Amount as presented in the bucket, after sign rules.
    pub amount: Decimal,
    /// Bucket.
    pub bucket: Bucket,
}

/// An account no rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnclassifiedAccount {
    /// Account code.
    pub account_code: String,
    /// Signed ledger balance left out of every total.
    pub net_amount: Decimal,
}

/// Result of classifying one period's balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Classified balances, in ascending account code order.
    pub balances: Vec<ClassifiedBalance>,
    /// Accounts excluded from every statement.
    pub unclassified: Vec<UnclassifiedAccount>,
}

impl Classification {
    /// Iterates the balances of one bucket.
    pub fn in_bucket(&self, bucket: Bucket) -> impl Iterator<Item = &ClassifiedBalance> {
        self.balances.iter().filter(move |b| b.bucket == bucket)
    }

    /// Sum of presented amounts in one bucket.
    #[must_use]
    pub fn bucket_total(&self, bucket: Bucket) -> Decimal {
        self.in_bucket(bucket).map(|b| b.amount).sum()
    }

    /// Returns true if nothing was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty() && self.unclassified.is_empty()
    }
}
