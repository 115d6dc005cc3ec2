//! Balance sheet builder.

use std::collections::BTreeMap;

use liasse_shared::ClassificationConfig;
use rust_decimal::Decimal;
use tracing::warn;

use super::types::{AssetSide, BalanceSheet, LiabilitySide, ReportWarning, StatementItem, StatementSection};
use crate::classification::{Bucket, Classification, fixed_asset_heading, heading_label};

/// Code of the synthesized period result line.
pub const PERIOD_RESULT_CODE: &str = "13";

#[derive(Default)]
struct FixedHeading {
    gross: Decimal,
    contra: Decimal,
    has_base: bool,
    accounts: Vec<String>,
}

/// Builds the balance sheet from classified balances.
#[derive(Debug, Clone, Copy)]
pub struct BalanceSheetBuilder {
    include_period_result: bool,
}

impl BalanceSheetBuilder {
    /// Creates a builder.
    ///
    /// With `include_period_result`, the period's net result is shown in
    /// equity unless a class-13 account already carries it.
    #[must_use]
    pub const fn new(include_period_result: bool) -> Self {
        Self {
            include_period_result,
        }
    }

    /// Creates a builder from configuration.
    #[must_use]
    pub const fn from_config(config: &ClassificationConfig) -> Self {
        Self::new(config.include_period_result_in_equity)
    }

    /// Balance sheet with no data: zero totals, no items.
    #[must_use]
    pub fn empty() -> BalanceSheet {
        BalanceSheet {
            is_balanced: true,
            ..BalanceSheet::default()
        }
    }

    /// Builds the balance sheet.
    ///
    /// Totals are plain sums of their groups. A difference between assets
    /// and liabilities plus equity is reported as a warning, never corrected.
    #[must_use]
    pub fn build(&self, classification: &Classification, period_result: Option<Decimal>) -> BalanceSheet {
        if classification.balances.is_empty() {
            return Self::empty();
        }

        let mut warnings = Vec::new();
        let mut headings: BTreeMap<String, FixedHeading> = BTreeMap::new();
        let mut current = Vec::new();
        let mut treasury = Vec::new();
        let mut equity = Vec::new();
        let mut debt = Vec::new();
        let mut current_liabilities = Decimal::ZERO;

        for balance in &classification.balances {
            let item = || StatementItem::new(&balance.account_code, &balance.label, balance.amount);

            match balance.bucket {
                Bucket::FixedAsset => {
                    let heading = fixed_asset_heading(&balance.account_code)
                        .unwrap_or_else(|| balance.account_code.clone());
                    let entry = headings.entry(heading).or_default();
                    entry.gross += balance.amount;
                    entry.has_base = true;
                    entry.accounts.push(balance.account_code.clone());
                }
                Bucket::FixedAssetContra => {
                    let Some(heading) = fixed_asset_heading(&balance.account_code) else {
                        warn!(account_code = %balance.account_code, "Contra account names no heading");
                        warnings.push(ReportWarning::OrphanContraAccount {
                            account_code: balance.account_code.clone(),
                            heading: None,
                        });
                        continue;
                    };
                    let entry = headings.entry(heading).or_default();
                    entry.contra += balance.amount;
                    entry.accounts.push(balance.account_code.clone());
                }
                Bucket::Inventory | Bucket::Receivable => current.push(item()),
                Bucket::Cash => treasury.push(item()),
                Bucket::Equity => equity.push(item()),
                Bucket::Payable => {
                    current_liabilities += balance.amount;
                    debt.push(item());
                }
                Bucket::FinancialDebt | Bucket::Overdraft => debt.push(item()),
                Bucket::Revenue(_) | Bucket::Expense(_) => {}
            }
        }

        let mut immobilized = Vec::with_capacity(headings.len());
        for (heading, fixed) in headings {
            if !fixed.has_base {
                warn!(heading = %heading, "Depreciation posted on a heading without gross value");
                for account_code in &fixed.accounts {
                    warnings.push(ReportWarning::OrphanContraAccount {
                        account_code: account_code.clone(),
                        heading: Some(heading.clone()),
                    });
                }
            }
            let label = heading_label(&heading);
            let mut item = StatementItem::new(heading, label, fixed.gross - fixed.contra);
            item.gross_amount = Some(fixed.gross);
            item.contra_amount = Some(fixed.contra);
            item.accounts = fixed.accounts;
            immobilized.push(item);
        }

        if let Some(result) = period_result {
            let result_posted = equity.iter().any(|i| i.code.starts_with(PERIOD_RESULT_CODE));
            if self.include_period_result && !result_posted {
                let mut line = StatementItem::new(PERIOD_RESULT_CODE, "Net result for the period", result);
                line.accounts.clear();
                equity.push(line);
            }
        }

        let immobilized = StatementSection::from_items(immobilized);
        let current = StatementSection::from_items(current);
        let treasury = StatementSection::from_items(treasury);
        let equity = StatementSection::from_items(equity);
        let debt = StatementSection::from_items(debt);

        let assets_total = immobilized.total + current.total + treasury.total;
        let liabilities_equity_total = equity.total + debt.total;
        let imbalance = assets_total - liabilities_equity_total;

        if !imbalance.is_zero() {
            warn!(
                %assets_total,
                %liabilities_equity_total,
                %imbalance,
                "Balance sheet does not balance"
            );
            warnings.push(ReportWarning::StructuralImbalance {
                assets_total,
                liabilities_equity_total,
                difference: imbalance,
            });
        }

        BalanceSheet {
            assets: AssetSide {
                immobilized,
                current,
                treasury,
                total: assets_total,
                prior_total: None,
            },
            liabilities_equity: LiabilitySide {
                equity,
                debt,
                current_liabilities,
                total: liabilities_equity_total,
                prior_total: None,
            },
            is_balanced: imbalance.is_zero(),
            imbalance,
            has_data: true,
            warnings,
        }
    }
}

impl Default for BalanceSheetBuilder {
    fn default() -> Self {
        Self::new(true)
    }
}
