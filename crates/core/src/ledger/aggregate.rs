//! Ledger aggregation: one net balance per account for a date range.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::LedgerLine;

/// Debit and credit movements of one account over a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMovement {
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
}

impl AccountMovement {
    /// Net signed balance: debits minus credits.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.total_debit - self.total_credit
    }

    fn add(&mut self, other: &Self) {
        self.total_debit += other.total_debit;
        self.total_credit += other.total_credit;
    }
}

/// Account balances keyed by account code, in ascending code order.
///
/// Absent accounts have a zero balance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedBalances {
    accounts: BTreeMap<String, AccountMovement>,
    line_count: usize,
}

impl AggregatedBalances {
    fn from_lines<'a>(lines: impl IntoIterator<Item = &'a LedgerLine>) -> Self {
        let mut balances = Self::default();

        for line in lines {
            let code = line.account_code.trim();
            let movement = AccountMovement {
                total_debit: line.debit,
                total_credit: line.credit,
            };
            match balances.accounts.get_mut(code) {
                Some(existing) => existing.add(&movement),
                None => {
                    balances.accounts.insert(code.to_string(), movement);
                }
            }
            balances.line_count += 1;
        }

        balances
    }

    /// Net balance of an account (zero when the account has no lines).
    #[must_use]
    pub fn balance(&self, account_code: &str) -> Decimal {
        self.accounts
            .get(account_code)
            .map_or(Decimal::ZERO, AccountMovement::balance)
    }

    /// Movements of an account, if it has any lines.
    #[must_use]
    pub fn movement(&self, account_code: &str) -> Option<&AccountMovement> {
        self.accounts.get(account_code)
    }

    /// Summed movements of every account whose code starts with `prefix`.
    #[must_use]
    pub fn prefix_total(&self, prefix: &str) -> AccountMovement {
        let mut total = AccountMovement::default();
        for (_, movement) in self
            .accounts
            .range::<str, _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .take_while(|(code, _)| code.starts_with(prefix))
        {
            total.add(movement);
        }
        total
    }

    /// Iterates accounts in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AccountMovement)> {
        self.accounts.iter().map(|(code, m)| (code.as_str(), m))
    }

    /// Number of distinct accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if no line was aggregated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Number of ledger lines that were aggregated.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_count
    }
}

/// Groups ledger lines by account and nets debits against credits.
pub struct LedgerAggregator;

impl LedgerAggregator {
    /// Aggregates the lines dated within `[date_start, date_end]`.
    ///
    /// Single pass over `lines`; the lines themselves are left untouched.
    #[must_use]
    pub fn aggregate(
        lines: &[LedgerLine],
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> AggregatedBalances {
        AggregatedBalances::from_lines(
            lines
                .iter()
                .filter(|l| l.entry_date >= date_start && l.entry_date <= date_end),
        )
    }

    /// Aggregates the lines dated strictly before `date`.
    ///
    /// Used for opening balances.
    #[must_use]
    pub fn aggregate_before(lines: &[LedgerLine], date: NaiveDate) -> AggregatedBalances {
        AggregatedBalances::from_lines(lines.iter().filter(|l| l.entry_date < date))
    }
}
