//! Account classifier.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::rules::{PrefixTable, Rule};
use super::types::{Bucket, Classification, ClassifiedBalance, UnclassifiedAccount};
use crate::ledger::AggregatedBalances;

/// Places aggregated account balances into statement buckets.
#[derive(Debug, Clone, Default)]
pub struct AccountClassifier {
    table: PrefixTable,
}

impl AccountClassifier {
    /// Creates a classifier using the OHADA table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier with a custom prefix table.
    #[must_use]
    pub fn with_table(table: PrefixTable) -> Self {
        Self { table }
    }

    /// Resolves the bucket and presented amount of one account.
    ///
    /// `net` is the signed ledger balance (debits minus credits). Returns
    /// `None` when no rule matches the code.
    #[must_use]
    pub fn classify_account(&self, code: &str, net: Decimal) -> Option<(Bucket, Decimal)> {
        let (_, rule) = self.table.lookup(code)?;

        let placed = match rule {
            Rule::Equity => (Bucket::Equity, -net),
            Rule::FinancialDebt => (Bucket::FinancialDebt, -net),
            Rule::FixedAsset => (Bucket::FixedAsset, net),
            Rule::FixedAssetContra => (Bucket::FixedAssetContra, net.abs()),
            Rule::Inventory => (Bucket::Inventory, net),
            Rule::Payable => (Bucket::Payable, net.abs()),
            Rule::ThirdParty if net >= Decimal::ZERO => (Bucket::Receivable, net),
            Rule::ThirdParty => (Bucket::Payable, -net),
            Rule::Treasury if net >= Decimal::ZERO => (Bucket::Cash, net),
            Rule::Treasury => (Bucket::Overdraft, -net),
            Rule::Expense(layer) => (Bucket::Expense(layer), net),
            Rule::Revenue(layer) => (Bucket::Revenue(layer), -net),
        };

        Some(placed)
    }

    /// Classifies every account of a period.
    ///
    /// `labels` maps account codes to chart-of-accounts labels; accounts
    /// without one get their bucket's default label. Unmatched accounts are
    /// collected, never dropped silently.
    #[must_use]
    pub fn classify(
        &self,
        balances: &AggregatedBalances,
        labels: &BTreeMap<String, String>,
    ) -> Classification {
        let mut classification = Classification::default();

        for (code, movement) in balances.iter() {
            let net = movement.balance();

            let Some((bucket, amount)) = self.classify_account(code, net) else {
                warn!(account_code = code, %net, "Account matches no classification rule");
                classification.unclassified.push(UnclassifiedAccount {
                    account_code: code.to_string(),
                    net_amount: net,
                });
                continue;
            };

            let base_label = labels
                .get(code)
                .cloned()
                .unwrap_or_else(|| format!("{} {code}", bucket.default_label()));
            let label = if bucket == Bucket::Overdraft {
                format!("{base_label} (Overdraft)")
            } else {
                base_label
            };

            classification.balances.push(ClassifiedBalance {
                account_code: code.to_string(),
                label,
                net_amount: net,
                amount,
                bucket,
            });
        }

        debug!(
            classified = classification.balances.len(),
            unclassified = classification.unclassified.len(),
            "Classified account balances"
        );

        classification
    }
}
