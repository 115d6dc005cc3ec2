//! Report generation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use liasse_shared::{EngineConfig, SourceError};
use liasse_shared::types::{ExerciceId, TenantId};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::types::FinancialReport;
use crate::annexes::{AgingReport, Annexes, AnnexesBuilder, DepreciationSchedule, ProvisionAnnex};
use crate::classification::AccountClassifier;
use crate::fiscal::{Exercice, resolve_exercice};
use crate::ledger::{AggregatedBalances, LedgerAggregator};
use crate::ratios::{RatioAnalyzer, RatioThresholds};
use crate::reports::{
    BalanceSheet, BalanceSheetBuilder, CashFlowEstimator, IncomeStatement, IncomeStatementBuilder,
    ReportError, ReportWarning, compare_balance_sheets, compare_income_statements,
};
use crate::sources::{SourceKind, StatementSources};

/// Statements of one exercice, before comparison.
struct PeriodStatements {
    balances: AggregatedBalances,
    balance_sheet: BalanceSheet,
    income_statement: IncomeStatement,
    warnings: Vec<ReportWarning>,
}

impl PeriodStatements {
    fn empty(warnings: Vec<ReportWarning>) -> Self {
        Self {
            balances: AggregatedBalances::default(),
            balance_sheet: BalanceSheetBuilder::empty(),
            income_statement: IncomeStatementBuilder::empty(),
            warnings,
        }
    }

    fn has_data(&self) -> bool {
        self.balance_sheet.has_data || self.income_statement.has_data
    }
}

/// Derives every statement of an exercice from a tenant's sources.
pub struct StatementEngine<S: StatementSources> {
    sources: Arc<S>,
    classifier: AccountClassifier,
    balance_sheet: BalanceSheetBuilder,
    cash_flow: CashFlowEstimator,
    ratios: RatioAnalyzer,
    annexes: AnnexesBuilder,
}

impl<S: StatementSources> StatementEngine<S> {
    /// Creates an engine over `sources`.
    #[must_use]
    pub fn new(sources: Arc<S>, config: &EngineConfig) -> Self {
        Self {
            sources,
            classifier: AccountClassifier::new(),
            balance_sheet: BalanceSheetBuilder::from_config(&config.classification),
            cash_flow: CashFlowEstimator::new(config.cash_flow.clone()),
            ratios: RatioAnalyzer::new(config.ratios.clone()),
            annexes: AnnexesBuilder::new(config.annexes.clone()),
        }
    }

    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn with_defaults(sources: Arc<S>) -> Self {
        Self::new(sources, &EngineConfig::default())
    }

    /// Replaces the account classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: AccountClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// The underlying sources.
    #[must_use]
    pub fn sources(&self) -> &S {
        &self.sources
    }

    /// Resolves the exercice to report on and its predecessor.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Source` when exercices cannot be fetched, and
    /// the errors of [`resolve_exercice`] otherwise.
    pub fn resolve(
        &self,
        tenant: TenantId,
        exercice_id: Option<ExerciceId>,
    ) -> Result<(Exercice, Option<Exercice>), ReportError> {
        let exercices = self
            .sources
            .fetch_exercices(tenant)
            .map_err(|e| ReportError::source(SourceKind::Exercices, e))?;
        let exercice = resolve_exercice(&exercices, exercice_id)?;
        let prior = exercice.predecessor(&exercices).cloned();
        Ok((exercice.clone(), prior))
    }

    /// Generates the full report of an exercice.
    ///
    /// Without `exercice_id` the tenant's open exercice is used. `as_of` is
    /// the reference date for aging. This never fails: anything that goes
    /// wrong is reported in `warnings`, with the affected sections empty.
    #[must_use]
    pub fn generate(
        &self,
        tenant: TenantId,
        exercice_id: Option<ExerciceId>,
        as_of: NaiveDate,
    ) -> FinancialReport {
        debug!(%tenant, ?exercice_id, %as_of, "Generating financial report");

        let (exercice, prior_exercice) = match self.resolve(tenant, exercice_id) {
            Ok(resolved) => resolved,
            Err(error) => {
                warn!(%tenant, error = %error, "Cannot resolve exercice");
                return FinancialReport::empty(tenant, as_of, vec![error.into()]);
            }
        };

        let mut warnings = Vec::new();
        let labels = self.labels(tenant, &mut warnings);

        let ((current, prior), (annexes, annex_warnings)) = rayon::join(
            || {
                rayon::join(
                    || self.derive_period(tenant, &exercice, &labels),
                    || {
                        prior_exercice
                            .as_ref()
                            .map(|p| self.derive_period(tenant, p, &labels))
                    },
                )
            },
            || self.build_annexes(tenant, &exercice, &labels, as_of),
        );

        let PeriodStatements {
            balances,
            mut balance_sheet,
            mut income_statement,
            warnings: period_warnings,
        } = current;
        warnings.extend(period_warnings);

        let prior = prior.and_then(|p| {
            // Only source failures of the comparison period are worth reporting.
            warnings.extend(
                p.warnings
                    .iter()
                    .filter(|w| matches!(w, ReportWarning::SourceUnavailable { .. }))
                    .cloned(),
            );
            p.has_data().then_some(p)
        });

        let cash_flow = self.cash_flow.estimate(
            &income_statement,
            &balance_sheet,
            prior.as_ref().map(|p| &p.balance_sheet),
            &balances,
        );
        if cash_flow.has_data && cash_flow.working_capital_approximated {
            warnings.push(ReportWarning::WorkingCapitalApproximated);
        }

        if let Some(prior) = &prior {
            compare_balance_sheets(&mut balance_sheet, &prior.balance_sheet);
            compare_income_statements(&mut income_statement, &prior.income_statement);
        }

        let thresholds = self.thresholds(tenant, &mut warnings);
        let ratios = self.ratios.analyze(&balance_sheet, &income_statement, thresholds);
        if ratios.has_data && thresholds.is_none() {
            warnings.push(ReportWarning::DefaultThresholds);
        }

        warnings.extend(annex_warnings);
        let has_data = balance_sheet.has_data || income_statement.has_data || annexes.has_data;

        debug!(
            %tenant,
            exercice = %exercice.label,
            has_data,
            warnings = warnings.len(),
            "Financial report generated"
        );

        FinancialReport {
            tenant_id: tenant,
            exercice: Some(exercice),
            prior_exercice,
            as_of,
            balance_sheet,
            income_statement,
            cash_flow,
            annexes,
            ratios,
            warnings: dedup(warnings),
            has_data,
            cached: false,
        }
    }

    fn labels(&self, tenant: TenantId, warnings: &mut Vec<ReportWarning>) -> BTreeMap<String, String> {
        match self.sources.fetch_accounts(tenant) {
            Ok(accounts) => accounts.into_iter().map(|a| (a.code, a.label)).collect(),
            Err(error) => {
                warnings.push(self.source_failed(tenant, SourceKind::Accounts, error));
                BTreeMap::new()
            }
        }
    }

    fn thresholds(
        &self,
        tenant: TenantId,
        warnings: &mut Vec<ReportWarning>,
    ) -> Option<RatioThresholds> {
        match self.sources.fetch_regional_thresholds(tenant) {
            Ok(thresholds) => thresholds,
            Err(error) => {
                warnings.push(self.source_failed(tenant, SourceKind::Thresholds, error));
                None
            }
        }
    }

    fn source_failed(&self, tenant: TenantId, kind: SourceKind, error: SourceError) -> ReportWarning {
        let error = ReportError::source(kind, error);
        warn!(%tenant, error = %error, "Source failed; section left empty");
        error.into()
    }

    fn derive_period(
        &self,
        tenant: TenantId,
        exercice: &Exercice,
        labels: &BTreeMap<String, String>,
    ) -> PeriodStatements {
        let (start, end) = (exercice.date_start, exercice.date_end);
        let mut warnings = Vec::new();

        let lines = match self.sources.fetch_ledger_lines(tenant, start, end) {
            Ok(lines) => lines,
            Err(error) => {
                warnings.push(self.source_failed(tenant, SourceKind::Ledger, error));
                return PeriodStatements::empty(warnings);
            }
        };
        if lines.is_empty() {
            warnings.push(ReportWarning::NoLedgerLines {
                exercice_id: exercice.id,
            });
        }

        let balances = LedgerAggregator::aggregate(&lines, start, end);
        let classification = self.classifier.classify(&balances, labels);
        warnings.extend(classification.unclassified.iter().map(|u| {
            ReportWarning::UnclassifiedAccount {
                account_code: u.account_code.clone(),
                net_amount: u.net_amount,
            }
        }));

        let levy = match self.sources.fetch_sales_records(tenant, start, end) {
            Ok(records) => IncomeStatementBuilder::additional_levy(&records, start, end),
            Err(error) => {
                warnings.push(self.source_failed(tenant, SourceKind::Sales, error));
                Decimal::ZERO
            }
        };

        let income_statement = IncomeStatementBuilder::build(&classification, levy);
        let balance_sheet = self
            .balance_sheet
            .build(&classification, Some(income_statement.net_result));
        warnings.extend(balance_sheet.warnings.iter().cloned());

        debug!(
            exercice = %exercice.label,
            lines = lines.len(),
            accounts = balances.len(),
            "Derived period statements"
        );

        PeriodStatements {
            balances,
            balance_sheet,
            income_statement,
            warnings,
        }
    }

    fn build_annexes(
        &self,
        tenant: TenantId,
        exercice: &Exercice,
        labels: &BTreeMap<String, String>,
        as_of: NaiveDate,
    ) -> (Annexes, Vec<ReportWarning>) {
        let mut warnings = Vec::new();
        let mut section = |kind: SourceKind, error: SourceError| {
            warnings.push(self.source_failed(tenant, kind, error));
        };

        let depreciation = match self.sources.fetch_fixed_assets(tenant) {
            Ok(assets) => self.annexes.depreciation_schedule(&assets, exercice),
            Err(error) => {
                section(SourceKind::FixedAssets, error);
                DepreciationSchedule::default()
            }
        };

        // Provisions need the history before the exercice for opening balances.
        let provisions = match self
            .sources
            .fetch_ledger_lines(tenant, NaiveDate::MIN, exercice.date_end)
        {
            Ok(lines) => {
                let opening = LedgerAggregator::aggregate_before(&lines, exercice.date_start);
                let period = LedgerAggregator::aggregate(&lines, exercice.date_start, exercice.date_end);
                self.annexes.provisions(&opening, &period, labels)
            }
            Err(error) => {
                section(SourceKind::Ledger, error);
                ProvisionAnnex::default()
            }
        };

        let receivables = match self.sources.fetch_receivable_invoices(tenant) {
            Ok(invoices) => AnnexesBuilder::aging(&invoices, as_of),
            Err(error) => {
                section(SourceKind::Receivables, error);
                AgingReport::empty(as_of)
            }
        };

        let payables = match self.sources.fetch_payable_receptions(tenant) {
            Ok(receptions) => AnnexesBuilder::aging(&receptions, as_of),
            Err(error) => {
                section(SourceKind::Payables, error);
                AgingReport::empty(as_of)
            }
        };

        (Annexes::new(depreciation, provisions, receivables, payables), warnings)
    }
}

/// Removes repeated warnings, keeping the first occurrence.
fn dedup(warnings: Vec<ReportWarning>) -> Vec<ReportWarning> {
    let mut unique: Vec<ReportWarning> = Vec::with_capacity(warnings.len());
    for warning in warnings {
        if !unique.contains(&warning) {
            unique.push(warning);
        }
    }
    unique
}
