//! Receivables and payables aging.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{AgingBucket, AgingItem, AgingReport, AgingTotals, InvoiceRecord, ReceptionRecord};

/// A document that leaves an amount open until paid.
pub trait OpenItem {
    /// Customer or supplier name.
    fn counterparty(&self) -> &str;
    /// Document number.
    fn reference(&self) -> &str;
    /// Date the document was issued or received.
    fn document_date(&self) -> NaiveDate;
    /// Payment due date.
    fn due_date(&self) -> NaiveDate;
    /// Amount including taxes.
    fn amount_total(&self) -> Decimal;
    /// Amount already settled.
    fn amount_paid(&self) -> Decimal;

    /// Amount still to be settled.
    fn amount_open(&self) -> Decimal {
        self.amount_total() - self.amount_paid()
    }
}

impl OpenItem for InvoiceRecord {
    fn counterparty(&self) -> &str {
        &self.customer
    }
    fn reference(&self) -> &str {
        &self.reference
    }
    fn document_date(&self) -> NaiveDate {
        self.issue_date
    }
    fn due_date(&self) -> NaiveDate {
        self.due_date
    }
    fn amount_total(&self) -> Decimal {
        self.amount_total
    }
    fn amount_paid(&self) -> Decimal {
        self.amount_paid
    }
}

impl OpenItem for ReceptionRecord {
    fn counterparty(&self) -> &str {
        &self.supplier
    }
    fn reference(&self) -> &str {
        &self.reference
    }
    fn document_date(&self) -> NaiveDate {
        self.reception_date
    }
    fn due_date(&self) -> NaiveDate {
        self.due_date
    }
    fn amount_total(&self) -> Decimal {
        self.amount_total
    }
    fn amount_paid(&self) -> Decimal {
        self.amount_paid
    }
}

/// Bracket for a number of days past due.
#[must_use]
pub const fn aging_bucket(days_overdue: i64) -> AgingBucket {
    match days_overdue {
        i64::MIN..=0 => AgingBucket::NotDue,
        1..=30 => AgingBucket::Days0To30,
        31..=60 => AgingBucket::Days30To60,
        61..=90 => AgingBucket::Days60To90,
        _ => AgingBucket::Days90Plus,
    }
}

/// Ages the open documents at `as_of`.
///
/// Settled documents and documents dated after `as_of` are left out.
/// Items are ordered most overdue first, then by reference.
#[must_use]
pub fn age_items<T: OpenItem>(documents: &[T], as_of: NaiveDate) -> AgingReport {
    let mut items: Vec<AgingItem> = documents
        .iter()
        .filter(|d| d.document_date() <= as_of && d.amount_open() > Decimal::ZERO)
        .map(|d| {
            let open = d.amount_open();
            let days_overdue = (as_of - d.due_date()).num_days().max(0);
            let overdue = days_overdue > 0;
            AgingItem {
                counterparty: d.counterparty().to_string(),
                reference: d.reference().to_string(),
                due_date: d.due_date(),
                amount_total: open,
                amount_overdue: if overdue { open } else { Decimal::ZERO },
                amount_not_due: if overdue { Decimal::ZERO } else { open },
                days_overdue,
                bucket: aging_bucket(days_overdue),
            }
        })
        .collect();

    items.sort_by(|a, b| {
        b.days_overdue
            .cmp(&a.days_overdue)
            .then_with(|| a.reference.cmp(&b.reference))
    });

    let mut totals = AgingTotals::default();
    let mut total = Decimal::ZERO;
    let mut overdue = Decimal::ZERO;
    for item in &items {
        *totals.bucket_mut(item.bucket) += item.amount_total;
        total += item.amount_total;
        overdue += item.amount_overdue;
    }

    AgingReport {
        as_of,
        items,
        totals,
        total,
        overdue,
        recovery_rate: recovery_rate(total, overdue),
    }
}

/// `(total - overdue) / total × 100`, or 100 when nothing is open.
fn recovery_rate(total: Decimal, overdue: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ONE_HUNDRED;
    }
    ((total - overdue) / total * Decimal::ONE_HUNDRED).round_dp(2)
}
