//! Shared types, errors, and configuration for Liasse.
//!
//! This crate provides common types used across the workspace:
//! - Typed IDs for type-safe entity references
//! - Errors reported by storage collaborators
//! - Engine configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    AnnexConfig, CacheConfig, CashFlowConfig, ClassificationConfig, EngineConfig, RatioConfig,
};
pub use error::{SourceError, SourceResult};
