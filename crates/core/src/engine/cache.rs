//! Report caching using Moka.
//!
//! Reports are cached per `(tenant, exercice)`. Ledger writes reach the
//! cache through [`LedgerChangeHook`]; a miss always regenerates from the
//! sources. Every invalidation bumps a generation counter, and a report is
//! only stored if no invalidation touching its tenant happened while it was
//! being generated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use liasse_shared::CacheConfig;
use liasse_shared::types::{ExerciceId, TenantId};
use moka::sync::Cache;
use tracing::{debug, warn};

use super::service::StatementEngine;
use super::types::FinancialReport;
use crate::sources::StatementSources;

type CacheKey = (TenantId, ExerciceId);

/// Invalidation counters: one for `invalidate_all`, one per tenant.
#[derive(Debug, Default)]
struct Generations {
    all: u64,
    tenants: HashMap<TenantId, u64>,
}

impl Generations {
    fn stamp(&self, tenant: TenantId) -> (u64, u64) {
        (self.all, self.tenants.get(&tenant).copied().unwrap_or(0))
    }

    fn bump(&mut self, tenant: TenantId) {
        *self.tenants.entry(tenant).or_default() += 1;
    }
}

/// Notifications the storage layer sends when accounting data changes.
pub trait LedgerChangeHook: Send + Sync {
    /// A ledger line dated `date` was posted, changed or removed.
    fn ledger_changed(&self, tenant: TenantId, date: NaiveDate);

    /// Exercices, fixed assets, invoices or other non-ledger data changed.
    fn tenant_data_changed(&self, tenant: TenantId);
}

/// Cache for generated reports.
///
/// Thread-safe; clones share the same storage.
#[derive(Clone)]
pub struct ReportCache {
    cache: Cache<CacheKey, Arc<FinancialReport>>,
    generations: Arc<Mutex<Generations>>,
}

impl ReportCache {
    /// Creates a cache with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&CacheConfig::default())
    }

    /// Creates a cache from configuration.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_config(config.max_capacity, config.ttl_secs)
    }

    /// Creates a cache with custom capacity and time-to-live.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of reports to keep
    /// * `ttl_secs` - Time-to-live in seconds for each report
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .support_invalidation_closures()
            .build();

        Self {
            cache,
            generations: Arc::new(Mutex::new(Generations::default())),
        }
    }

    /// Returns the cached report, or generates and caches it.
    ///
    /// A cached report is only reused for the same `as_of` date; a hit is
    /// returned with `cached: true`. Reports whose exercice could not be
    /// resolved are never cached, nor are reports whose tenant was
    /// invalidated during generation.
    #[must_use]
    pub fn get_or_generate<S: StatementSources>(
        &self,
        engine: &StatementEngine<S>,
        tenant: TenantId,
        exercice_id: Option<ExerciceId>,
        as_of: NaiveDate,
    ) -> FinancialReport {
        let exercice_id = match exercice_id {
            Some(id) => Some(id),
            None => engine.resolve(tenant, None).ok().map(|(e, _)| e.id),
        };
        let Some(exercice_id) = exercice_id else {
            return engine.generate(tenant, None, as_of);
        };
        let key = (tenant, exercice_id);

        if let Some(cached) = self.cache.get(&key) {
            if cached.as_of == as_of {
                debug!(%tenant, %exercice_id, "Report cache hit");
                let mut report = (*cached).clone();
                report.cached = true;
                return report;
            }
        }

        let stamp = self.generations().stamp(tenant);
        let report = engine.generate(tenant, Some(exercice_id), as_of);
        if report.exercice.is_some() {
            let generations = self.generations();
            if generations.stamp(tenant) == stamp {
                self.cache.insert(key, Arc::new(report.clone()));
            } else {
                debug!(%tenant, %exercice_id, "Tenant invalidated during generation; not caching");
            }
        }
        report
    }

    /// Invalidates one exercice's report.
    pub fn invalidate(&self, tenant: TenantId, exercice_id: ExerciceId) {
        self.generations().bump(tenant);
        self.cache.invalidate(&(tenant, exercice_id));
    }

    /// Invalidates every report of a tenant.
    pub fn invalidate_tenant(&self, tenant: TenantId) {
        self.generations().bump(tenant);
        self.invalidate_matching(move |(t, _), _| *t == tenant);
    }

    /// Invalidates all cached reports.
    pub fn invalidate_all(&self) {
        self.generations().all += 1;
        self.cache.invalidate_all();
    }

    /// Returns the number of reports currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    ///
    /// Moka applies invalidations lazily; this makes them visible to
    /// `entry_count` immediately.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }

    fn generations(&self) -> MutexGuard<'_, Generations> {
        self.generations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn invalidate_matching(
        &self,
        predicate: impl Fn(&CacheKey, &Arc<FinancialReport>) -> bool + Send + Sync + 'static,
    ) {
        if let Err(error) = self.cache.invalidate_entries_if(predicate) {
            warn!(error = %error, "Selective invalidation failed; clearing report cache");
            self.cache.invalidate_all();
        }
    }
}

impl LedgerChangeHook for ReportCache {
    /// Drops the tenant's reports for every exercice ending on or after
    /// `date`: later exercices compare against the changed one.
    fn ledger_changed(&self, tenant: TenantId, date: NaiveDate) {
        debug!(%tenant, %date, "Ledger changed; invalidating reports");
        self.generations().bump(tenant);
        self.invalidate_matching(move |(t, _), report| {
            *t == tenant
                && report
                    .exercice
                    .as_ref()
                    .is_none_or(|exercice| exercice.date_end >= date)
        });
    }

    fn tenant_data_changed(&self, tenant: TenantId) {
        debug!(%tenant, "Tenant data changed; invalidating reports");
        self.invalidate_tenant(tenant);
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}
