//! Engine configuration management.
//!
//! Every setting has a default, so an empty environment yields a working
//! configuration. Tenant-specific ratio thresholds are not configured here:
//! they come from the thresholds source at computation time.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Report cache configuration.
    pub cache: CacheConfig,
    /// Balance sheet classification settings.
    pub classification: ClassificationConfig,
    /// Cash flow estimation settings.
    pub cash_flow: CashFlowConfig,
    /// Ratio analysis settings.
    pub ratios: RatioConfig,
    /// Annexes settings.
    pub annexes: AnnexConfig,
}

/// Report cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached reports.
    pub max_capacity: u64,
    /// Time-to-live of a cached report, in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 256,
            ttl_secs: 600, // 10 minutes
        }
    }
}

/// Balance sheet classification settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Adds the period's net result to equity when no class-13 account is posted.
    pub include_period_result_in_equity: bool,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            include_period_result_in_equity: true,
        }
    }
}

/// Account prefixes and heuristics used by the cash flow estimator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CashFlowConfig {
    /// Prefix of depreciation charge accounts added back to operating flow.
    pub depreciation_charge_prefix: String,
    /// Prefix of fixed-asset disposal proceeds accounts.
    pub disposal_proceeds_prefix: String,
    /// Prefix of the book value of disposed fixed assets.
    pub disposal_book_value_prefix: String,
    /// Prefix of borrowing accounts.
    pub loan_prefix: String,
    /// Prefix of dividends payable accounts.
    pub dividend_prefix: String,
    /// Share of the closing working capital treated as the period change
    /// when no prior exercice is available.
    pub working_capital_fallback_rate: Decimal,
}

impl Default for CashFlowConfig {
    fn default() -> Self {
        Self {
            depreciation_charge_prefix: "681".to_string(),
            disposal_proceeds_prefix: "82".to_string(),
            disposal_book_value_prefix: "81".to_string(),
            loan_prefix: "16".to_string(),
            dividend_prefix: "465".to_string(),
            working_capital_fallback_rate: Decimal::ONE,
        }
    }
}

/// Ratio analysis settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RatioConfig {
    /// Prefix of the revenue accounts counted as sales.
    pub sales_prefix: String,
    /// Relative band around a threshold (in percent of the threshold) rated "normal".
    pub normal_band_pct: Decimal,
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self {
            sales_prefix: "70".to_string(),
            normal_band_pct: Decimal::TEN,
        }
    }
}

/// Annexes settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnnexConfig {
    /// Prefix of provision accounts tracked in the provisions annex.
    pub provision_prefix: String,
    /// Day count of one year in depreciation schedules.
    pub days_per_year: u32,
}

impl Default for AnnexConfig {
    fn default() -> Self {
        Self {
            provision_prefix: "19".to_string(),
            days_per_year: 365,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Reads `.env` first, then `config/default`, `config/{RUN_MODE}` and
    /// finally `LIASSE__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source exists but cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LIASSE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
