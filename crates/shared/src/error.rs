//! Errors reported by the storage collaborators that feed the engine.

use thiserror::Error;

/// Result type alias using `SourceError`.
pub type SourceResult<T> = Result<T, SourceError>;

/// Failure of an external data source (ledger, exercices, fixed assets, ...).
///
/// The engine never propagates these past its orchestrator; they are turned
/// into warnings attached to the affected statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The requested resource does not exist for this tenant.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The source could not be reached (connection refused, timeout, ...).
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// The source returned records that cannot be used.
    #[error("Invalid source data: {0}")]
    InvalidData(String),

    /// The tenant is not allowed to read this source.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Any other storage failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SourceError {
    /// Returns the stable error code for logs and API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unavailable(_) => "SOURCE_UNAVAILABLE",
            Self::InvalidData(_) => "INVALID_SOURCE_DATA",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if retrying the same call later may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
