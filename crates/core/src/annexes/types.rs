//! Annex data types.

use chrono::NaiveDate;
use liasse_shared::types::{FixedAssetId, InvoiceId, ReceptionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fixed asset as recorded in the asset register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAssetRecord {
    /// Unique identifier.
    pub id: FixedAssetId,
    /// Description.
    pub label: String,
    /// Class-2 account the asset is booked on.
    pub account_code: String,
    /// Date the asset entered the register.
    pub acquisition_date: NaiveDate,
    /// Acquisition cost.
    pub gross_value: Decimal,
    /// Straight-line depreciation rate, in percent per year.
    pub depreciation_rate: Decimal,
}

/// Depreciation of one asset at the exercice end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationLine {
    /// Asset.
    pub asset_id: FixedAssetId,
    /// Description.
    pub label: String,
    /// Account code.
    pub account_code: String,
    /// Acquisition date.
    pub acquisition_date: NaiveDate,
    /// Acquisition cost.
    pub gross_value: Decimal,
    /// Annual rate, in percent.
    pub depreciation_rate: Decimal,
    /// Years between acquisition and exercice end (four decimals).
    pub years_elapsed: Decimal,
    /// Annual charge.
    pub period_charge: Decimal,
    /// Accumulated depreciation, capped at the gross value.
    pub accumulated: Decimal,
    /// Gross value minus accumulated depreciation.
    pub net_value: Decimal,
}

/// Depreciation schedule of an exercice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationSchedule {
    /// One line per asset, ordered by account code then acquisition date.
    pub lines: Vec<DepreciationLine>,
    /// Sum of gross values.
    pub total_gross: Decimal,
    /// Sum of accumulated depreciation.
    pub total_accumulated: Decimal,
    /// Sum of net values.
    pub total_net: Decimal,
    /// Sum of annual charges.
    pub total_period_charge: Decimal,
}

/// Movements of one provision account over the exercice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionLine {
    /// Account code.
    pub account_code: String,
    /// Account label.
    pub label: String,
    /// Credit balance before the exercice start.
    pub opening: Decimal,
    /// Credits of the exercice.
    pub additions: Decimal,
    /// Debits of the exercice.
    pub reversals: Decimal,
    /// `opening + additions - reversals`.
    pub closing: Decimal,
}

/// Provisions table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionAnnex {
    /// One line per provision account, ordered by code.
    pub lines: Vec<ProvisionLine>,
    /// Sum of opening balances.
    pub total_opening: Decimal,
    /// Sum of additions.
    pub total_additions: Decimal,
    /// Sum of reversals.
    pub total_reversals: Decimal,
    /// Sum of closing balances.
    pub total_closing: Decimal,
}

/// A customer invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Customer name.
    pub customer: String,
    /// Invoice number.
    pub reference: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Amount including taxes.
    pub amount_total: Decimal,
    /// Amount already collected.
    pub amount_paid: Decimal,
}

/// A supplier reception (goods or services received, to be paid).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceptionRecord {
    /// Unique identifier.
    pub id: ReceptionId,
    /// Supplier name.
    pub supplier: String,
    /// Supplier document number.
    pub reference: String,
    /// Reception date.
    pub reception_date: NaiveDate,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Amount including taxes.
    pub amount_total: Decimal,
    /// Amount already paid.
    pub amount_paid: Decimal,
}

/// Overdue bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgingBucket {
    /// Due date not reached.
    #[serde(rename = "not_due")]
    NotDue,
    /// 1 to 30 days overdue.
    #[serde(rename = "0_30")]
    Days0To30,
    /// 31 to 60 days overdue.
    #[serde(rename = "30_60")]
    Days30To60,
    /// 61 to 90 days overdue.
    #[serde(rename = "60_90")]
    Days60To90,
    /// More than 90 days overdue.
    #[serde(rename = "90_plus")]
    Days90Plus,
}

/// One open receivable or payable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingItem {
    /// Customer or supplier.
    pub counterparty: String,
    /// Document number.
    pub reference: String,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Open amount (total minus paid).
    pub amount_total: Decimal,
    /// Open amount past its due date.
    pub amount_overdue: Decimal,
    /// Open amount not yet due.
    pub amount_not_due: Decimal,
    /// Days past the due date, zero when not due.
    pub days_overdue: i64,
    /// Overdue bracket.
    pub bucket: AgingBucket,
}

/// Open amounts per bracket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingTotals {
    /// Not yet due.
    pub not_due: Decimal,
    /// 1 to 30 days overdue.
    #[serde(rename = "0_30")]
    pub days_0_30: Decimal,
    /// 31 to 60 days overdue.
    #[serde(rename = "30_60")]
    pub days_30_60: Decimal,
    /// 61 to 90 days overdue.
    #[serde(rename = "60_90")]
    pub days_60_90: Decimal,
    /// More than 90 days overdue.
    #[serde(rename = "90_plus")]
    pub days_90_plus: Decimal,
}

impl AgingTotals {
    /// Mutable total of a bracket.
    pub fn bucket_mut(&mut self, bucket: AgingBucket) -> &mut Decimal {
        match bucket {
            AgingBucket::NotDue => &mut self.not_due,
            AgingBucket::Days0To30 => &mut self.days_0_30,
            AgingBucket::Days30To60 => &mut self.days_30_60,
            AgingBucket::Days60To90 => &mut self.days_60_90,
            AgingBucket::Days90Plus => &mut self.days_90_plus,
        }
    }

    /// Total of a bracket.
    #[must_use]
    pub const fn bucket(&self, bucket: AgingBucket) -> Decimal {
        match bucket {
            AgingBucket::NotDue => self.not_due,
            AgingBucket::Days0To30 => self.days_0_30,
            AgingBucket::Days30To60 => self.days_30_60,
            AgingBucket::Days60To90 => self.days_60_90,
            AgingBucket::Days90Plus => self.days_90_plus,
        }
    }
}

/// Aging of open receivables or payables at a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingReport {
    /// Reference date.
    pub as_of: NaiveDate,
    /// Open items, most overdue first.
    pub items: Vec<AgingItem>,
    /// Open amounts per bracket.
    pub totals: AgingTotals,
    /// Sum of open amounts.
    pub total: Decimal,
    /// Sum of overdue amounts.
    pub overdue: Decimal,
    /// Share of the open amount not overdue, in percent.
    pub recovery_rate: Decimal,
}

impl AgingReport {
    /// Report with no open item.
    #[must_use]
    pub fn empty(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            items: Vec::new(),
            totals: AgingTotals::default(),
            total: Decimal::ZERO,
            overdue: Decimal::ZERO,
            recovery_rate: Decimal::ONE_HUNDRED,
        }
    }
}

/// All annexes of an exercice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annexes {
    /// Fixed-asset depreciation.
    pub depreciation_schedule: DepreciationSchedule,
    /// Provision movements.
    pub provisions: ProvisionAnnex,
    /// Open customer invoices.
    pub receivables_aging: AgingReport,
    /// Open supplier receptions.
    pub payables_aging: AgingReport,
    /// False when every annex is empty.
    pub has_data: bool,
}

impl Annexes {
    /// Bundles the annexes, deriving `has_data`.
    #[must_use]
    pub fn new(
        depreciation_schedule: DepreciationSchedule,
        provisions: ProvisionAnnex,
        receivables_aging: AgingReport,
        payables_aging: AgingReport,
    ) -> Self {
        let has_data = !depreciation_schedule.lines.is_empty()
            || !provisions.lines.is_empty()
            || !receivables_aging.items.is_empty()
            || !payables_aging.items.is_empty();
        Self {
            depreciation_schedule,
            provisions,
            receivables_aging,
            payables_aging,
            has_data,
        }
    }

    /// Annexes with no data.
    #[must_use]
    pub fn empty(as_of: NaiveDate) -> Self {
        Self::new(
            DepreciationSchedule::default(),
            ProvisionAnnex::default(),
            AgingReport::empty(as_of),
            AgingReport::empty(as_of),
        )
    }
}
