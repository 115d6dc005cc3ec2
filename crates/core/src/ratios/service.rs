//! Ratio computation and threshold evaluation.

use liasse_shared::RatioConfig;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{
    Ratio, RatioDirection, RatioKind, RatioReport, RatioRule, RatioStatus, RatioThresholds,
    ThresholdsSource,
};
use crate::reports::{BalanceSheet, IncomeStatement};

/// Computes and evaluates financial ratios.
#[derive(Debug, Clone, Default)]
pub struct RatioAnalyzer {
    config: RatioConfig,
}

impl RatioAnalyzer {
    /// Creates an analyzer with the given sales prefix and tolerance band.
    #[must_use]
    pub fn new(config: RatioConfig) -> Self {
        Self { config }
    }

    /// Revenue booked on sales accounts.
    #[must_use]
    pub fn sales_revenue(&self, income: &IncomeStatement) -> Decimal {
        let revenue = &income.revenue;
        [&revenue.operating, &revenue.financial, &revenue.extraordinary]
            .into_iter()
            .flat_map(|section| section.items.iter())
            .filter(|item| item.code.starts_with(self.config.sales_prefix.as_str()))
            .map(|item| item.amount_current_period)
            .sum()
    }

    /// Computes one ratio's value, rounded to two decimals.
    ///
    /// Returns zero when the denominator is zero or the percentage does not
    /// fit in a `Decimal`.
    #[must_use]
    pub fn value(&self, kind: RatioKind, balance_sheet: &BalanceSheet, income: &IncomeStatement) -> Decimal {
        let liabilities = &balance_sheet.liabilities_equity;
        let (numerator, denominator, percent) = match kind {
            RatioKind::Liquidity => (
                balance_sheet.assets.current.total,
                liabilities.current_liabilities,
                false,
            ),
            RatioKind::Leverage => (liabilities.debt.total, liabilities.total, true),
            RatioKind::Autonomy => (liabilities.equity.total, liabilities.total, true),
            RatioKind::OperatingMargin => (income.result_operating, self.sales_revenue(income), true),
            RatioKind::NetMargin => (income.net_result, self.sales_revenue(income), true),
            RatioKind::ReturnOnEquity => (income.net_result, liabilities.equity.total, true),
        };

        let ratio = safe_div(numerator, denominator);
        let value = if percent {
            ratio.checked_mul(Decimal::ONE_HUNDRED).unwrap_or(Decimal::ZERO)
        } else {
            ratio
        };
        value.round_dp(2)
    }

    /// Evaluates a value against its rule.
    ///
    /// Within `normal_band_pct` percent of the threshold on the wrong side
    /// the status is `Normal`; further away it is `Attention`.
    #[must_use]
    pub fn status(&self, value: Decimal, rule: RatioRule) -> RatioStatus {
        let band = rule.threshold.abs() * self.config.normal_band_pct / Decimal::ONE_HUNDRED;
        match rule.direction {
            RatioDirection::AtLeast if value >= rule.threshold => RatioStatus::Good,
            RatioDirection::AtLeast if value >= rule.threshold - band => RatioStatus::Normal,
            RatioDirection::AtMost if value <= rule.threshold => RatioStatus::Good,
            RatioDirection::AtMost if value <= rule.threshold + band => RatioStatus::Normal,
            _ => RatioStatus::Attention,
        }
    }

    /// Computes all ratios.
    ///
    /// `thresholds` are the tenant's regional thresholds; without them the
    /// defaults apply and the report says so.
    #[must_use]
    pub fn analyze(
        &self,
        balance_sheet: &BalanceSheet,
        income: &IncomeStatement,
        thresholds: Option<RatioThresholds>,
    ) -> RatioReport {
        let thresholds_source = if thresholds.is_some() {
            ThresholdsSource::Tenant
        } else {
            ThresholdsSource::Default
        };

        if !balance_sheet.has_data && !income.has_data {
            return RatioReport {
                ratios: Vec::new(),
                thresholds_source,
                has_data: false,
            };
        }

        let thresholds = thresholds.unwrap_or_default();
        let ratios = RatioKind::ALL
            .into_iter()
            .map(|kind| {
                let rule = thresholds.rule(kind);
                let value = self.value(kind, balance_sheet, income);
                Ratio {
                    kind,
                    value,
                    threshold: rule.threshold,
                    direction: rule.direction,
                    status: self.status(value, rule),
                }
            })
            .collect::<Vec<_>>();

        debug!(count = ratios.len(), ?thresholds_source, "Computed ratios");

        RatioReport {
            ratios,
            thresholds_source,
            has_data: true,
        }
    }
}

/// Division returning zero for a zero denominator.
fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}
