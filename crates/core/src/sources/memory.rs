//! In-memory implementation of [`StatementSources`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use chrono::NaiveDate;
use liasse_shared::types::TenantId;
use liasse_shared::{SourceError, SourceResult};

use super::{SourceKind, StatementSources};
use crate::annexes::{FixedAssetRecord, InvoiceRecord, ReceptionRecord};
use crate::fiscal::Exercice;
use crate::ledger::{Account, LedgerLine};
use crate::ratios::RatioThresholds;
use crate::reports::SalesRecord;

#[derive(Debug, Default, Clone)]
struct TenantData {
    ledger_lines: Vec<LedgerLine>,
    exercices: Vec<Exercice>,
    accounts: Vec<Account>,
    fixed_assets: Vec<FixedAssetRecord>,
    invoices: Vec<InvoiceRecord>,
    receptions: Vec<ReceptionRecord>,
    sales: Vec<SalesRecord>,
    thresholds: Option<RatioThresholds>,
    failures: HashMap<SourceKind, SourceError>,
}

/// Tenant data held in memory.
///
/// Unknown tenants have no data. Failures can be injected per source to
/// exercise degraded paths.
#[derive(Debug, Default)]
pub struct InMemorySources {
    tenants: RwLock<HashMap<TenantId, TenantData>>,
    ledger_fetches: AtomicUsize,
}

impl InMemorySources {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exercice.
    #[must_use]
    pub fn with_exercice(self, tenant: TenantId, exercice: Exercice) -> Self {
        self.update(tenant, |data| data.exercices.push(exercice));
        self
    }

    /// Adds ledger lines.
    #[must_use]
    pub fn with_ledger_lines(self, tenant: TenantId, lines: impl IntoIterator<Item = LedgerLine>) -> Self {
        self.push_ledger_lines(tenant, lines);
        self
    }

    /// Adds accounts.
    #[must_use]
    pub fn with_accounts(self, tenant: TenantId, accounts: impl IntoIterator<Item = Account>) -> Self {
        self.update(tenant, |data| data.accounts.extend(accounts));
        self
    }

    /// Adds fixed-asset records.
    #[must_use]
    pub fn with_fixed_assets(
        self,
        tenant: TenantId,
        assets: impl IntoIterator<Item = FixedAssetRecord>,
    ) -> Self {
        self.update(tenant, |data| data.fixed_assets.extend(assets));
        self
    }

    /// Adds customer invoices.
    #[must_use]
    pub fn with_invoices(self, tenant: TenantId, invoices: impl IntoIterator<Item = InvoiceRecord>) -> Self {
        self.update(tenant, |data| data.invoices.extend(invoices));
        self
    }

    /// Adds supplier receptions.
    #[must_use]
    pub fn with_receptions(
        self,
        tenant: TenantId,
        receptions: impl IntoIterator<Item = ReceptionRecord>,
    ) -> Self {
        self.update(tenant, |data| data.receptions.extend(receptions));
        self
    }

    /// Adds sales records.
    #[must_use]
    pub fn with_sales(self, tenant: TenantId, sales: impl IntoIterator<Item = SalesRecord>) -> Self {
        self.update(tenant, |data| data.sales.extend(sales));
        self
    }

    /// Sets the tenant's regional thresholds.
    #[must_use]
    pub fn with_thresholds(self, tenant: TenantId, thresholds: RatioThresholds) -> Self {
        self.update(tenant, |data| data.thresholds = Some(thresholds));
        self
    }

    /// Makes every call to `kind` fail with `error` for this tenant.
    #[must_use]
    pub fn with_failure(self, tenant: TenantId, kind: SourceKind, error: SourceError) -> Self {
        self.update(tenant, |data| {
            data.failures.insert(kind, error);
        });
        self
    }

    /// Appends ledger lines to an existing store.
    pub fn push_ledger_lines(&self, tenant: TenantId, lines: impl IntoIterator<Item = LedgerLine>) {
        self.update(tenant, |data| data.ledger_lines.extend(lines));
    }

    /// Number of ledger fetches served so far.
    #[must_use]
    pub fn ledger_fetches(&self) -> usize {
        self.ledger_fetches.load(Ordering::Relaxed)
    }

    fn update(&self, tenant: TenantId, f: impl FnOnce(&mut TenantData)) {
        let mut tenants = self.tenants.write().unwrap_or_else(PoisonError::into_inner);
        f(tenants.entry(tenant).or_default());
    }

    fn read(&self) -> SourceResult<RwLockReadGuard<'_, HashMap<TenantId, TenantData>>> {
        self.tenants
            .read()
            .map_err(|_| SourceError::Internal("in-memory store poisoned".to_string()))
    }

    /// Runs `f` on the tenant's data, honouring injected failures.
    fn query<T: Default>(
        &self,
        tenant: TenantId,
        kind: SourceKind,
        f: impl FnOnce(&TenantData) -> T,
    ) -> SourceResult<T> {
        let tenants = self.read()?;
        let Some(data) = tenants.get(&tenant) else {
            return Ok(T::default());
        };
        if let Some(error) = data.failures.get(&kind) {
            return Err(error.clone());
        }
        Ok(f(data))
    }
}

impl StatementSources for InMemorySources {
    fn fetch_ledger_lines(
        &self,
        tenant: TenantId,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> SourceResult<Vec<LedgerLine>> {
        self.ledger_fetches.fetch_add(1, Ordering::Relaxed);
        self.query(tenant, SourceKind::Ledger, |data| {
            data.ledger_lines
                .iter()
                .filter(|l| l.entry_date >= date_start && l.entry_date <= date_end)
                .cloned()
                .collect()
        })
    }

    fn fetch_exercices(&self, tenant: TenantId) -> SourceResult<Vec<Exercice>> {
        self.query(tenant, SourceKind::Exercices, |data| data.exercices.clone())
    }

    fn fetch_accounts(&self, tenant: TenantId) -> SourceResult<Vec<Account>> {
        self.query(tenant, SourceKind::Accounts, |data| data.accounts.clone())
    }

    fn fetch_fixed_assets(&self, tenant: TenantId) -> SourceResult<Vec<FixedAssetRecord>> {
        self.query(tenant, SourceKind::FixedAssets, |data| data.fixed_assets.clone())
    }

    fn fetch_receivable_invoices(&self, tenant: TenantId) -> SourceResult<Vec<InvoiceRecord>> {
        self.query(tenant, SourceKind::Receivables, |data| data.invoices.clone())
    }

    fn fetch_payable_receptions(&self, tenant: TenantId) -> SourceResult<Vec<ReceptionRecord>> {
        self.query(tenant, SourceKind::Payables, |data| data.receptions.clone())
    }

    fn fetch_sales_records(
        &self,
        tenant: TenantId,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> SourceResult<Vec<SalesRecord>> {
        self.query(tenant, SourceKind::Sales, |data| {
            data.sales
                .iter()
                .filter(|s| s.date >= date_start && s.date <= date_end)
                .cloned()
                .collect()
        })
    }

    fn fetch_regional_thresholds(&self, tenant: TenantId) -> SourceResult<Option<RatioThresholds>> {
        self.query(tenant, SourceKind::Thresholds, |data| data.thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn test_ledger_lines_filtered_by_date_and_tenant() {
        let tenant = TenantId::new();
        let other = TenantId::new();
        let sources = InMemorySources::new()
            .with_ledger_lines(
                tenant,
                [
                    LedgerLine::debit("411001", dec!(100), date(1, 1)),
                    LedgerLine::debit("411001", dec!(200), date(6, 30)),
                    LedgerLine::debit("411001", dec!(300), date(7, 1)),
                ],
            )
            .with_ledger_lines(other, [LedgerLine::debit("521000", dec!(999), date(3, 1))]);

        let lines = sources.fetch_ledger_lines(tenant, date(1, 1), date(6, 30)).unwrap();

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.account_code == "411001"));
        assert_eq!(sources.ledger_fetches(), 1);
    }

    #[test]
    fn test_unknown_tenant_has_no_data() {
        let sources = InMemorySources::new();
        let tenant = TenantId::new();

        assert!(sources.fetch_exercices(tenant).unwrap().is_empty());
        assert_eq!(sources.fetch_regional_thresholds(tenant).unwrap(), None);
    }

    #[test]
    fn test_injected_failure_affects_only_its_source() {
        let tenant = TenantId::new();
        let sources = InMemorySources::new()
            .with_accounts(tenant, [Account::new("411001", "Client A")])
            .with_failure(
                tenant,
                SourceKind::FixedAssets,
                SourceError::Unavailable("asset register offline".to_string()),
            );

        let err = sources.fetch_fixed_assets(tenant).unwrap_err();
        assert_eq!(err.error_code(), "SOURCE_UNAVAILABLE");
        assert_eq!(sources.fetch_accounts(tenant).unwrap().len(), 1);
    }

    #[test]
    fn test_source_kind_names() {
        assert_eq!(SourceKind::FixedAssets.to_string(), "fixed_assets");
        assert_eq!(
            serde_json::to_value(SourceKind::FixedAssets).unwrap(),
            serde_json::json!("fixed_assets")
        );
    }
}
