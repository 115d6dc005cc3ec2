//! Report bundle.

use chrono::NaiveDate;
use liasse_shared::types::TenantId;
use serde::{Deserialize, Serialize};

use crate::annexes::Annexes;
use crate::fiscal::Exercice;
use crate::ratios::RatioReport;
use crate::reports::{
    BalanceSheet, BalanceSheetBuilder, CashFlowStatement, IncomeStatement, IncomeStatementBuilder,
    ReportWarning,
};

/// Every statement of one exercice, as handed to export collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialReport {
    /// Tenant the report belongs to.
    pub tenant_id: TenantId,
    /// Reported exercice, absent when none could be resolved.
    pub exercice: Option<Exercice>,
    /// Preceding exercice used for comparison.
    pub prior_exercice: Option<Exercice>,
    /// Reference date for aging.
    pub as_of: NaiveDate,
    /// Balance sheet.
    pub balance_sheet: BalanceSheet,
    /// Income statement.
    pub income_statement: IncomeStatement,
    /// Cash flow statement.
    pub cash_flow: CashFlowStatement,
    /// Annexes.
    pub annexes: Annexes,
    /// Financial ratios.
    pub ratios: RatioReport,
    /// Every non-fatal condition met while generating.
    pub warnings: Vec<ReportWarning>,
    /// False when no statement or annex has data.
    pub has_data: bool,
    /// True when served from the cache.
    pub cached: bool,
}

impl FinancialReport {
    /// Report with no data, carrying only its warnings.
    #[must_use]
    pub fn empty(tenant_id: TenantId, as_of: NaiveDate, warnings: Vec<ReportWarning>) -> Self {
        Self {
            tenant_id,
            exercice: None,
            prior_exercice: None,
            as_of,
            balance_sheet: BalanceSheetBuilder::empty(),
            income_statement: IncomeStatementBuilder::empty(),
            cash_flow: CashFlowStatement::default(),
            annexes: Annexes::empty(as_of),
            ratios: RatioReport::default(),
            warnings,
            has_data: false,
            cached: false,
        }
    }

    /// Returns true if a warning matches `predicate`.
    pub fn has_warning(&self, predicate: impl Fn(&ReportWarning) -> bool) -> bool {
        self.warnings.iter().any(predicate)
    }
}
