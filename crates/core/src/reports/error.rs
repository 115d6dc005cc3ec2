//! Report error types.

use chrono::NaiveDate;
use liasse_shared::{SourceError, types::ExerciceId};
use thiserror::Error;

use super::types::ReportWarning;
use crate::sources::SourceKind;

/// Errors that can occur while preparing a report.
///
/// None of these escape the engine: the orchestrator turns each into a
/// `ReportWarning` and returns empty statements where needed.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Exercice not found.
    #[error("Exercice not found: {0}")]
    ExerciceNotFound(ExerciceId),

    /// No exercice is open.
    #[error("No open exercice")]
    NoOpenExercice,

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A source collaborator failed.
    #[error("{kind} source failed: {error}")]
    Source {
        /// Which source failed.
        kind: SourceKind,
        /// The underlying error.
        #[source]
        error: SourceError,
    },
}

impl ReportError {
    /// Wraps a source failure.
    #[must_use]
    pub fn source(kind: SourceKind, error: SourceError) -> Self {
        Self::Source { kind, error }
    }
}

impl From<ReportError> for ReportWarning {
    fn from(error: ReportError) -> Self {
        match error {
            ReportError::Source { kind, error } => Self::SourceUnavailable {
                source: kind,
                message: error.to_string(),
            },
            other => Self::NoExercice {
                reason: other.to_string(),
            },
        }
    }
}
