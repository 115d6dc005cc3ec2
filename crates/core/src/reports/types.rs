//! Statement data types.

use chrono::NaiveDate;
use liasse_shared::types::{ExerciceId, SalesRecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sources::SourceKind;

/// One line of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementItem {
    /// Account code, or two-digit heading for fixed assets.
    pub code: String,
    /// Display label.
    pub label: String,
    /// Amount for the selected exercice.
    pub amount_current_period: Decimal,
    /// Amount for the preceding exercice, when one exists.
    pub amount_prior_period: Option<Decimal>,
    /// Current minus prior amount.
    pub variation: Option<Decimal>,
    /// Variation in percent of the prior amount (absent when prior is zero).
    pub variation_pct: Option<Decimal>,
    /// Gross value before contra netting (fixed assets only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_amount: Option<Decimal>,
    /// Accumulated depreciation netted from the gross value (fixed assets only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contra_amount: Option<Decimal>,
    /// Ledger accounts contributing to this line.
    pub accounts: Vec<String>,
}

impl StatementItem {
    /// Creates an item with no prior-period data.
    #[must_use]
    pub fn new(code: impl Into<String>, label: impl Into<String>, amount: Decimal) -> Self {
        let code = code.into();
        Self {
            accounts: vec![code.clone()],
            code,
            label: label.into(),
            amount_current_period: amount,
            amount_prior_period: None,
            variation: None,
            variation_pct: None,
            gross_amount: None,
            contra_amount: None,
        }
    }
}

/// A group of statement items with its subtotal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSection {
    /// Items sorted by code ascending.
    pub items: Vec<StatementItem>,
    /// Sum of item amounts.
    pub total: Decimal,
    /// Total for the preceding exercice, when one exists.
    pub prior_total: Option<Decimal>,
}

impl StatementSection {
    /// Builds a section from unsorted items.
    #[must_use]
    pub fn from_items(mut items: Vec<StatementItem>) -> Self {
        items.sort_by(|a, b| a.code.cmp(&b.code));
        let total = items.iter().map(|i| i.amount_current_period).sum();
        Self {
            items,
            total,
            prior_total: None,
        }
    }

    /// Finds an item by code.
    #[must_use]
    pub fn item(&self, code: &str) -> Option<&StatementItem> {
        self.items.iter().find(|i| i.code == code)
    }

    /// Returns true if the section has no item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Asset side of the balance sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSide {
    /// Fixed assets, net of depreciation.
    pub immobilized: StatementSection,
    /// Inventory and receivables.
    pub current: StatementSection,
    /// Cash and bank balances.
    pub treasury: StatementSection,
    /// Total assets.
    pub total: Decimal,
    /// Total assets of the preceding exercice.
    pub prior_total: Option<Decimal>,
}

/// Liabilities and equity side of the balance sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilitySide {
    /// Capital, reserves and period result.
    pub equity: StatementSection,
    /// Financial debt, payables and overdrafts.
    pub debt: StatementSection,
    /// Payables within `debt` (current liabilities).
    pub current_liabilities: Decimal,
    /// Total liabilities and equity.
    pub total: Decimal,
    /// Total of the preceding exercice.
    pub prior_total: Option<Decimal>,
}

/// Balance sheet (bilan).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Assets.
    pub assets: AssetSide,
    /// Liabilities and equity.
    pub liabilities_equity: LiabilitySide,
    /// Whether total assets equal total liabilities and equity.
    pub is_balanced: bool,
    /// Assets minus liabilities and equity.
    pub imbalance: Decimal,
    /// False when no ledger data backed this statement.
    pub has_data: bool,
    /// Non-fatal conditions met while building.
    pub warnings: Vec<ReportWarning>,
}

/// Revenue or expense items split by result layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayeredSection {
    /// Operating items.
    pub operating: StatementSection,
    /// Financial items.
    pub financial: StatementSection,
    /// Non-ordinary (HAO) items.
    pub extraordinary: StatementSection,
    /// Sum of the three layers.
    pub total: Decimal,
}

/// Result layers of an income statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeResults {
    /// Operating revenue minus operating expense.
    pub result_operating: Decimal,
    /// Financial revenue minus financial expense.
    pub result_financial: Decimal,
    /// HAO revenue minus HAO expense.
    pub result_extraordinary: Decimal,
    /// Sum of the three results.
    pub net_result: Decimal,
}

/// Income statement (compte de résultat).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Revenue by layer.
    pub revenue: LayeredSection,
    /// Expenses by layer.
    pub expenses: LayeredSection,
    /// Operating result.
    pub result_operating: Decimal,
    /// Financial result.
    pub result_financial: Decimal,
    /// Extraordinary (HAO) result.
    pub result_extraordinary: Decimal,
    /// Net result.
    pub net_result: Decimal,
    /// Additional levy collected on period sales; not part of `net_result`.
    pub additional_levy: Decimal,
    /// Results of the preceding exercice, when one exists.
    pub prior_results: Option<IncomeResults>,
    /// False when no ledger data backed this statement.
    pub has_data: bool,
}

impl IncomeStatement {
    /// The four result figures of this statement.
    #[must_use]
    pub fn results(&self) -> IncomeResults {
        IncomeResults {
            result_operating: self.result_operating,
            result_financial: self.result_financial,
            result_extraordinary: self.result_extraordinary,
            net_result: self.net_result,
        }
    }
}

/// A sales record carrying the additional levy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Unique identifier.
    pub id: SalesRecordId,
    /// Sale date.
    pub date: NaiveDate,
    /// Amount excluding taxes.
    pub amount_excl_tax: Decimal,
    /// Levy collected on top of the sale.
    pub levy_amount: Decimal,
}

/// Operating section of the cash flow statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingFlows {
    /// Net result of the period.
    pub net_result: Decimal,
    /// Depreciation charges added back.
    pub non_cash_addbacks: Decimal,
    /// Gain on fixed-asset disposals (subtracted; proceeds are investing).
    pub disposal_result: Decimal,
    /// Increase in working capital (subtracted).
    pub working_capital_change: Decimal,
    /// Operating cash flow.
    pub total: Decimal,
}

/// Investing section of the cash flow statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestingFlows {
    /// Fixed-asset acquisitions (outflow).
    pub acquisitions: Decimal,
    /// Fixed-asset disposal proceeds (inflow).
    pub disposals: Decimal,
    /// Investing cash flow.
    pub total: Decimal,
}

/// Financing section of the cash flow statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingFlows {
    /// New borrowings.
    pub loans_obtained: Decimal,
    /// Borrowings repaid.
    pub loan_repayments: Decimal,
    /// Dividends paid.
    pub dividends_paid: Decimal,
    /// Financing cash flow.
    pub total: Decimal,
}

/// Cash flow statement, derived by the indirect method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    /// Operating flows.
    pub operating: OperatingFlows,
    /// Investing flows.
    pub investing: InvestingFlows,
    /// Financing flows.
    pub financing: FinancingFlows,
    /// Sum of the three flows.
    pub net_change: Decimal,
    /// Treasury at the start of the period (back-solved).
    pub opening_cash: Decimal,
    /// Treasury at the end of the period (balance sheet).
    pub closing_cash: Decimal,
    /// True when the working capital change is estimated without a prior period.
    pub working_capital_approximated: bool,
    /// False when no ledger data backed this statement.
    pub has_data: bool,
}

/// A non-fatal condition reported alongside the statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    /// No exercice could be resolved.
    NoExercice {
        /// Why resolution failed.
        reason: String,
    },
    /// The exercice has no ledger line.
    NoLedgerLines {
        /// The exercice.
        exercice_id: ExerciceId,
    },
    /// An account matched no classification rule and was left out.
    UnclassifiedAccount {
        /// Account code.
        account_code: String,
        /// Balance excluded from totals.
        net_amount: Decimal,
    },
    /// A contra account whose heading has no base account.
    OrphanContraAccount {
        /// Contra account code.
        account_code: String,
        /// Heading it was netted against.
        heading: Option<String>,
    },
    /// Assets differ from liabilities plus equity.
    StructuralImbalance {
        /// Total assets.
        assets_total: Decimal,
        /// Total liabilities and equity.
        liabilities_equity_total: Decimal,
        /// Assets minus liabilities and equity.
        difference: Decimal,
    },
    /// A source collaborator failed; the dependent section is empty.
    SourceUnavailable {
        /// Which source.
        source: SourceKind,
        /// Error message.
        message: String,
    },
    /// No tenant thresholds; defaults were used.
    DefaultThresholds,
    /// The working capital change is an estimate (no prior exercice).
    WorkingCapitalApproximated,
}
