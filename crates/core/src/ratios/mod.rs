//! Financial ratio analysis.
//!
//! Ratios are computed from the balance sheet and income statement and
//! compared against per-tenant thresholds. Every division is zero-guarded.

pub mod service;
pub mod types;


pub use service::RatioAnalyzer;
pub use types::{
    Ratio, RatioDirection, RatioKind, RatioReport, RatioRule, RatioStatus, RatioThresholds,
    ThresholdsSource,
};
