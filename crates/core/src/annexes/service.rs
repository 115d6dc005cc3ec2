//! Annex builders.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use liasse_shared::AnnexConfig;
use rust_decimal::Decimal;
use tracing::debug;

use super::aging::{OpenItem, age_items};
use super::types::{
    AgingReport, DepreciationLine, DepreciationSchedule, FixedAssetRecord, ProvisionAnnex,
    ProvisionLine,
};
use crate::fiscal::Exercice;
use crate::ledger::AggregatedBalances;

/// Builds the annexes of an exercice.
#[derive(Debug, Clone, Default)]
pub struct AnnexesBuilder {
    config: AnnexConfig,
}

impl AnnexesBuilder {
    /// Creates a builder with the given provision prefix and year basis.
    #[must_use]
    pub fn new(config: AnnexConfig) -> Self {
        Self { config }
    }

    /// Fractional years from `from` to `to`, floored at zero.
    #[must_use]
    pub fn years_between(&self, from: NaiveDate, to: NaiveDate) -> Decimal {
        let days = (to - from).num_days().max(0);
        Decimal::from(days)
            .checked_div(Decimal::from(self.config.days_per_year))
            .unwrap_or(Decimal::ZERO)
    }

    /// Straight-line depreciation of each asset at the exercice end.
    ///
    /// Assets acquired after the exercice end are not in the register yet
    /// and are left out.
    #[must_use]
    pub fn depreciation_schedule(
        &self,
        assets: &[FixedAssetRecord],
        exercice: &Exercice,
    ) -> DepreciationSchedule {
        let mut lines: Vec<DepreciationLine> = assets
            .iter()
            .filter(|a| a.acquisition_date <= exercice.date_end)
            .map(|asset| self.depreciate(asset, exercice.date_end))
            .collect();
        lines.sort_by(|a, b| {
            a.account_code
                .cmp(&b.account_code)
                .then(a.acquisition_date.cmp(&b.acquisition_date))
        });

        let mut schedule = DepreciationSchedule::default();
        for line in &lines {
            schedule.total_gross += line.gross_value;
            schedule.total_accumulated += line.accumulated;
            schedule.total_net += line.net_value;
            schedule.total_period_charge += line.period_charge;
        }
        schedule.lines = lines;

        debug!(assets = schedule.lines.len(), "Built depreciation schedule");
        schedule
    }

    fn depreciate(&self, asset: &FixedAssetRecord, at: NaiveDate) -> DepreciationLine {
        let years_elapsed = self.years_between(asset.acquisition_date, at);
        let annual = asset.gross_value * asset.depreciation_rate / Decimal::ONE_HUNDRED;
        let accumulated = (annual * years_elapsed).min(asset.gross_value).round_dp(2);

        DepreciationLine {
            asset_id: asset.id,
            label: asset.label.clone(),
            account_code: asset.account_code.clone(),
            acquisition_date: asset.acquisition_date,
            gross_value: asset.gross_value,
            depreciation_rate: asset.depreciation_rate,
            years_elapsed: years_elapsed.round_dp(4),
            period_charge: annual.round_dp(2),
            accumulated,
            net_value: asset.gross_value - accumulated,
        }
    }

    /// Movements of the provision accounts.
    ///
    /// `opening` holds the movements before the exercice start, `period`
    /// those of the exercice. Provisions carry credit balances, so the
    /// opening balance is credit minus debit.
    #[must_use]
    pub fn provisions(
        &self,
        opening: &AggregatedBalances,
        period: &AggregatedBalances,
        labels: &BTreeMap<String, String>,
    ) -> ProvisionAnnex {
        let prefix = self.config.provision_prefix.as_str();
        let codes: BTreeSet<&str> = opening
            .iter()
            .chain(period.iter())
            .map(|(code, _)| code)
            .filter(|code| code.starts_with(prefix))
            .collect();

        let mut annex = ProvisionAnnex::default();
        for code in codes {
            let opening_balance = -opening.balance(code);
            let (additions, reversals) = period
                .movement(code)
                .map_or((Decimal::ZERO, Decimal::ZERO), |m| (m.total_credit, m.total_debit));
            let closing = opening_balance + additions - reversals;

            annex.total_opening += opening_balance;
            annex.total_additions += additions;
            annex.total_reversals += reversals;
            annex.total_closing += closing;
            annex.lines.push(ProvisionLine {
                account_code: code.to_string(),
                label: labels
                    .get(code)
                    .cloned()
                    .unwrap_or_else(|| format!("Provision {code}")),
                opening: opening_balance,
                additions,
                reversals,
                closing,
            });
        }

        annex
    }

    /// Aging of open documents at `as_of`.
    #[must_use]
    pub fn aging<T: OpenItem>(documents: &[T], as_of: NaiveDate) -> AgingReport {
        age_items(documents, as_of)
    }
}
