//! Cash flow estimation (indirect method).
//!
//! No cash ledger is read: flows are derived from the income statement, the
//! balance sheet and account movements. The working capital change is exact
//! only when the preceding exercice's balance sheet is available. Without
//! it, the change is estimated as a configurable share of the closing
//! working capital (by default all of it, i.e. an opening working capital of
//! zero) and the statement is flagged as approximated.
//!
//! Acquisitions are the gross debits on fixed-asset accounts. A disposal
//! credits the asset at its gross value, which is not cash; its cash effect
//! is the proceeds, reported as an investing inflow. The disposal gain
//! (proceeds minus book value) is taken out of the operating flow so the
//! proceeds are not counted twice.

use liasse_shared::CashFlowConfig;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{
    BalanceSheet, CashFlowStatement, FinancingFlows, IncomeStatement, InvestingFlows,
    OperatingFlows,
};
use crate::ledger::AggregatedBalances;

/// Derives the cash flow statement.
#[derive(Debug, Clone, Default)]
pub struct CashFlowEstimator {
    config: CashFlowConfig,
}

impl CashFlowEstimator {
    /// Creates an estimator with the given account prefixes.
    #[must_use]
    pub fn new(config: CashFlowConfig) -> Self {
        Self { config }
    }

    /// Working capital of a balance sheet: current assets minus payables.
    #[must_use]
    pub fn working_capital(balance_sheet: &BalanceSheet) -> Decimal {
        balance_sheet.assets.current.total - balance_sheet.liabilities_equity.current_liabilities
    }

    /// Estimates the period's cash flows.
    ///
    /// `balances` are the period's account movements; `prior_balance_sheet`
    /// is the preceding exercice's balance sheet, if any.
    #[must_use]
    pub fn estimate(
        &self,
        income: &IncomeStatement,
        balance_sheet: &BalanceSheet,
        prior_balance_sheet: Option<&BalanceSheet>,
        balances: &AggregatedBalances,
    ) -> CashFlowStatement {
        let closing_working_capital = Self::working_capital(balance_sheet);
        let (working_capital_change, working_capital_approximated) = match prior_balance_sheet {
            Some(prior) => (closing_working_capital - Self::working_capital(prior), false),
            None => (
                closing_working_capital * self.config.working_capital_fallback_rate,
                true,
            ),
        };

        let non_cash_addbacks = balances
            .prefix_total(&self.config.depreciation_charge_prefix)
            .balance();
        let proceeds = balances.prefix_total(&self.config.disposal_proceeds_prefix);
        let book_value = balances.prefix_total(&self.config.disposal_book_value_prefix);
        let disposal_result = -proceeds.balance() - book_value.balance();
        let operating_total =
            income.net_result + non_cash_addbacks - disposal_result - working_capital_change;

        let acquisitions: Decimal = balances
            .iter()
            .filter(|(code, _)| is_fixed_asset_base(code))
            .map(|(_, m)| m.total_debit)
            .sum();
        let disposals = proceeds.total_credit;

        let loans = balances.prefix_total(&self.config.loan_prefix);
        let dividends_paid = balances.prefix_total(&self.config.dividend_prefix).total_debit;
        let financing_total = loans.total_credit - loans.total_debit - dividends_paid;

        let investing_total = disposals - acquisitions;
        let net_change = operating_total + investing_total + financing_total;
        let closing_cash = balance_sheet.assets.treasury.total;

        debug!(
            %operating_total,
            %investing_total,
            %financing_total,
            working_capital_approximated,
            "Estimated cash flows"
        );

        CashFlowStatement {
            operating: OperatingFlows {
                net_result: income.net_result,
                non_cash_addbacks,
                disposal_result,
                working_capital_change,
                total: operating_total,
            },
            investing: InvestingFlows {
                acquisitions,
                disposals,
                total: investing_total,
            },
            financing: FinancingFlows {
                loans_obtained: loans.total_credit,
                loan_repayments: loans.total_debit,
                dividends_paid,
                total: financing_total,
            },
            net_change,
            opening_cash: closing_cash - net_change,
            closing_cash,
            working_capital_approximated,
            has_data: income.has_data || balance_sheet.has_data,
        }
    }
}

/// Class-2 account that is not a depreciation or impairment contra account.
fn is_fixed_asset_base(code: &str) -> bool {
    code.starts_with('2') && !code.starts_with("28") && !code.starts_with("29")
}
