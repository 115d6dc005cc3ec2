//! End-to-end report generation tests.

use std::sync::Arc;

use chrono::NaiveDate;
use liasse_shared::types::{ExerciceId, FixedAssetId, InvoiceId, SalesRecordId, TenantId};
use liasse_shared::{EngineConfig, SourceError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::StatementEngine;
use crate::annexes::{AgingBucket, FixedAssetRecord, InvoiceRecord};
use crate::fiscal::{Exercice, ExerciceStatus};
use crate::ledger::{Account, LedgerLine};
use crate::ratios::{RatioKind, RatioRule, RatioThresholds, ThresholdsSource};
use crate::reports::{ReportWarning, SalesRecord};
use crate::sources::{InMemorySources, SourceKind};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn exercice(year: i32, status: ExerciceStatus) -> Exercice {
    Exercice {
        id: ExerciceId::new(),
        label: format!("Exercice {year}"),
        date_start: date(year, 1, 1),
        date_end: date(year, 12, 31),
        status,
        year,
    }
}

fn engine(sources: InMemorySources) -> StatementEngine<InMemorySources> {
    StatementEngine::with_defaults(Arc::new(sources))
}

/// A single credit sale: 411001 D1000 / 701001 C1000.
fn single_sale(tenant: TenantId) -> (InMemorySources, Exercice) {
    let current = exercice(2025, ExerciceStatus::Open);
    let sources = InMemorySources::new()
        .with_exercice(tenant, current.clone())
        .with_accounts(
            tenant,
            [Account::new("411001", "Client A"), Account::new("701001", "Sales of goods")],
        )
        .with_ledger_lines(
            tenant,
            [
                LedgerLine::debit("411001", dec!(1000), date(2025, 3, 15)),
                LedgerLine::credit("701001", dec!(1000), date(2025, 3, 15)),
            ],
        );
    (sources, current)
}

#[test]
fn test_single_sale_scenario() {
    let tenant = TenantId::new();
    let (sources, current) = single_sale(tenant);

    let report = engine(sources).generate(tenant, None, date(2025, 12, 31));

    assert_eq!(report.exercice.as_ref().map(|e| e.id), Some(current.id));
    assert!(report.has_data);
    assert!(!report.cached);

    let receivable = report.balance_sheet.assets.current.item("411001").unwrap();
    assert_eq!(receivable.amount_current_period, dec!(1000));
    assert_eq!(receivable.label, "Client A");

    let income = &report.income_statement;
    assert_eq!(income.revenue.operating.item("701001").unwrap().amount_current_period, dec!(1000));
    assert_eq!(income.result_operating, dec!(1000));
    assert_eq!(income.net_result, dec!(1000));
    assert!(report.balance_sheet.is_balanced);

    let net_margin = report.ratios.ratio(RatioKind::NetMargin).unwrap();
    assert_eq!(net_margin.value, income.net_result / dec!(1000) * dec!(100));

    assert!(report.warnings.contains(&ReportWarning::DefaultThresholds));
    assert!(report.warnings.contains(&ReportWarning::WorkingCapitalApproximated));
    assert!(report.cash_flow.working_capital_approximated);
}

#[test]
fn test_generation_is_idempotent() {
    let tenant = TenantId::new();
    let (sources, current) = single_sale(tenant);
    let engine = engine(sources);

    let first = engine.generate(tenant, Some(current.id), date(2025, 12, 31));
    let second = engine.generate(tenant, Some(current.id), date(2025, 12, 31));

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_unknown_tenant_yields_empty_report() {
    let report = engine(InMemorySources::new()).generate(TenantId::new(), None, date(2025, 12, 31));

    assert!(!report.has_data);
    assert!(report.exercice.is_none());
    assert!(report.balance_sheet.is_balanced);
    assert!(report.ratios.ratios.is_empty());
    assert_eq!(
        report.warnings,
        vec![ReportWarning::NoExercice {
            reason: "No open exercice".to_string()
        }]
    );
}

#[test]
fn test_unknown_exercice_id() {
    let tenant = TenantId::new();
    let (sources, _) = single_sale(tenant);
    let missing = ExerciceId::new();

    let report = engine(sources).generate(tenant, Some(missing), date(2025, 12, 31));

    assert!(!report.has_data);
    assert!(report.has_warning(|w| matches!(w, ReportWarning::NoExercice { .. })));
}

#[test]
fn test_exercice_without_lines() {
    let tenant = TenantId::new();
    let current = exercice(2025, ExerciceStatus::Open);
    let sources = InMemorySources::new().with_exercice(tenant, current.clone());

    let report = engine(sources).generate(tenant, None, date(2025, 12, 31));

    assert!(!report.has_data);
    assert!(!report.income_statement.has_data);
    assert!(!report.cash_flow.has_data);
    assert!(!report.ratios.has_data);
    assert!(report.warnings.contains(&ReportWarning::NoLedgerLines {
        exercice_id: current.id
    }));
    assert!(!report.warnings.contains(&ReportWarning::DefaultThresholds));
}

#[test]
fn test_exercices_source_failure() {
    let tenant = TenantId::new();
    let sources = InMemorySources::new()
        .with_exercice(tenant, exercice(2025, ExerciceStatus::Open))
        .with_failure(tenant, SourceKind::Exercices, SourceError::Unavailable("db down".to_string()));

    let report = engine(sources).generate(tenant, None, date(2025, 12, 31));

    assert!(!report.has_data);
    assert!(report.has_warning(|w| matches!(
        w,
        ReportWarning::SourceUnavailable { source: SourceKind::Exercices, .. }
    )));
}

#[test]
fn test_failing_annex_source_leaves_statements_intact() {
    let tenant = TenantId::new();
    let (sources, _) = single_sale(tenant);
    let sources = sources.with_failure(
        tenant,
        SourceKind::FixedAssets,
        SourceError::Unavailable("asset register offline".to_string()),
    );

    let report = engine(sources).generate(tenant, None, date(2025, 12, 31));

    assert!(report.annexes.depreciation_schedule.lines.is_empty());
    assert_eq!(report.income_statement.net_result, dec!(1000));
    assert!(report.balance_sheet.has_data);
    assert!(report.warnings.contains(&ReportWarning::SourceUnavailable {
        source: SourceKind::FixedAssets,
        message: "Source unavailable: asset register offline".to_string(),
    }));
}

#[test]
fn test_failing_ledger_keeps_annexes() {
    let tenant = TenantId::new();
    let current = exercice(2025, ExerciceStatus::Open);
    let sources = InMemorySources::new()
        .with_exercice(tenant, current)
        .with_invoices(
            tenant,
            [InvoiceRecord {
                id: InvoiceId::new(),
                customer: "Client A".to_string(),
                reference: "INV-1".to_string(),
                issue_date: date(2025, 9, 1),
                due_date: date(2025, 11, 30),
                amount_total: dec!(1200),
                amount_paid: Decimal::ZERO,
            }],
        )
        .with_failure(tenant, SourceKind::Ledger, SourceError::Internal("corrupt page".to_string()));

    let report = engine(sources).generate(tenant, None, date(2025, 12, 31));

    assert!(!report.balance_sheet.has_data);
    assert!(report.has_data, "annexes still carry data");
    let aging = &report.annexes.receivables_aging;
    assert_eq!(aging.items[0].bucket, AgingBucket::Days30To60);
    assert_eq!(
        report
            .warnings
            .iter()
            .filter(|w| matches!(w, ReportWarning::SourceUnavailable { source: SourceKind::Ledger, .. }))
            .count(),
        1,
        "repeated failures are reported once"
    );
}

#[test]
fn test_unclassified_accounts_are_reported() {
    let tenant = TenantId::new();
    let (sources, _) = single_sale(tenant);
    sources.push_ledger_lines(
        tenant,
        [
            LedgerLine::debit("901000", dec!(250), date(2025, 4, 1)),
            LedgerLine::credit("521000", dec!(250), date(2025, 4, 1)),
        ],
    );

    let report = engine(sources).generate(tenant, None, date(2025, 12, 31));

    assert!(report.warnings.contains(&ReportWarning::UnclassifiedAccount {
        account_code: "901000".to_string(),
        net_amount: dec!(250),
    }));
    assert!(report.has_warning(|w| matches!(w, ReportWarning::StructuralImbalance { .. })));
    assert!(!report.balance_sheet.is_balanced);
}

#[test]
fn test_prior_exercice_comparison() {
    let tenant = TenantId::new();
    let prior = exercice(2024, ExerciceStatus::Closed);
    let current = exercice(2025, ExerciceStatus::Open);
    let sources = InMemorySources::new()
        .with_exercice(tenant, prior.clone())
        .with_exercice(tenant, current)
        .with_ledger_lines(
            tenant,
            [
                LedgerLine::debit("411001", dec!(800), date(2024, 5, 1)),
                LedgerLine::credit("701001", dec!(800), date(2024, 5, 1)),
                LedgerLine::debit("411001", dec!(1000), date(2025, 3, 15)),
                LedgerLine::credit("701001", dec!(1000), date(2025, 3, 15)),
            ],
        );

    let report = engine(sources).generate(tenant, None, date(2025, 12, 31));

    assert_eq!(report.prior_exercice.as_ref().map(|e| e.id), Some(prior.id));
    let sales = report.income_statement.revenue.operating.item("701001").unwrap();
    assert_eq!(sales.amount_prior_period, Some(dec!(800)));
    assert_eq!(sales.variation, Some(dec!(200)));
    assert_eq!(sales.variation_pct, Some(dec!(25)));
    assert_eq!(
        report.income_statement.prior_results.map(|r| r.net_result),
        Some(dec!(800))
    );

    assert!(!report.cash_flow.working_capital_approximated);
    assert_eq!(report.cash_flow.operating.working_capital_change, dec!(200));
    assert!(!report.warnings.contains(&ReportWarning::WorkingCapitalApproximated));
}

#[test]
fn test_tenant_thresholds_and_levy() {
    let tenant = TenantId::new();
    let (sources, _) = single_sale(tenant);
    let thresholds = RatioThresholds {
        net_margin: RatioRule::at_least(dec!(150)),
        ..RatioThresholds::default()
    };
    let sources = sources.with_thresholds(tenant, thresholds).with_sales(
        tenant,
        [SalesRecord {
            id: SalesRecordId::new(),
            date: date(2025, 3, 15),
            amount_excl_tax: dec!(1000),
            levy_amount: dec!(20),
        }],
    );

    let report = engine(sources).generate(tenant, None, date(2025, 12, 31));

    assert_eq!(report.ratios.thresholds_source, ThresholdsSource::Tenant);
    assert_eq!(report.ratios.ratio(RatioKind::NetMargin).unwrap().threshold, dec!(150));
    assert!(!report.warnings.contains(&ReportWarning::DefaultThresholds));
    assert_eq!(report.income_statement.additional_levy, dec!(20));
    assert_eq!(report.income_statement.net_result, dec!(1000));
}

#[test]
fn test_annexes_are_merged() {
    let tenant = TenantId::new();
    let (sources, current) = single_sale(tenant);
    let sources = sources
        .with_fixed_assets(
            tenant,
            [FixedAssetRecord {
                id: FixedAssetId::new(),
                label: "Delivery van".to_string(),
                account_code: "245000".to_string(),
                acquisition_date: date(2024, 1, 1),
                gross_value: dec!(12000),
                depreciation_rate: dec!(20),
            }],
        )
        .with_ledger_lines(tenant, [LedgerLine::credit("191000", dec!(400), date(2024, 6, 1))]);

    let report = engine(sources).generate(tenant, Some(current.id), date(2025, 12, 31));

    let van = &report.annexes.depreciation_schedule.lines[0];
    assert_eq!(van.accumulated, dec!(4800));
    assert_eq!(van.net_value, dec!(7200));
    let provision = &report.annexes.provisions.lines[0];
    assert_eq!(provision.opening, dec!(400));
    assert_eq!(provision.closing, dec!(400));
    assert!(report.annexes.has_data);
}

#[test]
fn test_period_result_injection_is_configurable() {
    let tenant = TenantId::new();
    let (sources, _) = single_sale(tenant);
    let mut config = EngineConfig::default();
    config.classification.include_period_result_in_equity = false;

    let report = StatementEngine::new(Arc::new(sources), &config).generate(tenant, None, date(2025, 12, 31));

    assert!(report.balance_sheet.liabilities_equity.equity.is_empty());
    assert!(!report.balance_sheet.is_balanced);
}

#[test]
fn test_report_serializes_warnings_with_kind() {
    let report = engine(InMemorySources::new()).generate(TenantId::new(), None, date(2025, 12, 31));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["warnings"][0]["kind"], "no_exercice");
    assert_eq!(json["has_data"], false);
}
