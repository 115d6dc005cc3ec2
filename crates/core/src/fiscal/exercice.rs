//! Exercice (accounting period) types.

use chrono::NaiveDate;
use liasse_shared::types::ExerciceId;
use serde::{Deserialize, Serialize};

use crate::reports::ReportError;

/// Status of an exercice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciceStatus {
    /// Period is open; this is the tenant's current exercice.
    Open,
    /// Period is closed.
    Closed,
}

/// An accounting period (fiscal year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercice {
    /// Unique identifier.
    pub id: ExerciceId,
    /// Display label (e.g., "Exercice 2025").
    pub label: String,
    /// First day of the period (inclusive).
    pub date_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub date_end: NaiveDate,
    /// Current status.
    pub status: ExerciceStatus,
    /// Fiscal year number.
    pub year: i32,
}

impl Exercice {
    /// Returns true if this is an open exercice.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == ExerciceStatus::Open
    }

    /// Returns true if the given date falls within this exercice.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.date_start && date <= self.date_end
    }

    /// Finds the immediate predecessor (`year - 1`) among `exercices`.
    #[must_use]
    pub fn predecessor<'a>(&self, exercices: &'a [Exercice]) -> Option<&'a Exercice> {
        exercices
            .iter()
            .find(|e| e.year == self.year - 1 && e.id != self.id)
    }
}

/// Resolves the exercice to report on.
///
/// An explicit `id` must exist. Without one, the open exercice is used; if
/// several are open (inconsistent source data), the most recent year wins.
///
/// # Errors
///
/// Returns `ReportError::ExerciceNotFound` for an unknown id,
/// `ReportError::NoOpenExercice` when no exercice is open, and
/// `ReportError::InvalidDateRange` when the resolved period is inverted.
pub fn resolve_exercice(
    exercices: &[Exercice],
    id: Option<ExerciceId>,
) -> Result<&Exercice, ReportError> {
    let exercice = match id {
        Some(id) => exercices
            .iter()
            .find(|e| e.id == id)
            .ok_or(ReportError::ExerciceNotFound(id))?,
        None => exercices
            .iter()
            .filter(|e| e.is_open())
            .max_by_key(|e| e.year)
            .ok_or(ReportError::NoOpenExercice)?,
    };

    if exercice.date_start > exercice.date_end {
        return Err(ReportError::InvalidDateRange {
            start: exercice.date_start,
            end: exercice.date_end,
        });
    }

    Ok(exercice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercice(year: i32, status: ExerciceStatus) -> Exercice {
        Exercice {
            id: ExerciceId::new(),
            label: format!("Exercice {year}"),
            date_start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            date_end: NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
            status,
            year,
        }
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let e = exercice(2025, ExerciceStatus::Open);
        assert!(e.contains_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(e.contains_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
        assert!(!e.contains_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    }

    #[test]
    fn test_resolve_defaults_to_open_exercice() {
        let exercices = vec![
            exercice(2024, ExerciceStatus::Closed),
            exercice(2025, ExerciceStatus::Open),
        ];
        let resolved = resolve_exercice(&exercices, None).unwrap();
        assert_eq!(resolved.year, 2025);
    }

    #[test]
    fn test_resolve_by_id() {
        let exercices = vec![
            exercice(2024, ExerciceStatus::Closed),
            exercice(2025, ExerciceStatus::Open),
        ];
        let resolved = resolve_exercice(&exercices, Some(exercices[0].id)).unwrap();
        assert_eq!(resolved.year, 2024);
    }

    #[test]
    fn test_resolve_unknown_id() {
        let exercices = vec![exercice(2025, ExerciceStatus::Open)];
        let missing = ExerciceId::new();
        assert!(matches!(
            resolve_exercice(&exercices, Some(missing)),
            Err(ReportError::ExerciceNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_resolve_without_open_exercice() {
        let exercices = vec![exercice(2024, ExerciceStatus::Closed)];
        assert!(matches!(
            resolve_exercice(&exercices, None),
            Err(ReportError::NoOpenExercice)
        ));
        assert!(matches!(
            resolve_exercice(&[], None),
            Err(ReportError::NoOpenExercice)
        ));
    }

    #[test]
    fn test_resolve_rejects_inverted_period() {
        let mut e = exercice(2025, ExerciceStatus::Open);
        std::mem::swap(&mut e.date_start, &mut e.date_end);
        assert!(matches!(
            resolve_exercice(&[e], None),
            Err(ReportError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_predecessor() {
        let exercices = vec![
            exercice(2023, ExerciceStatus::Closed),
            exercice(2024, ExerciceStatus::Closed),
            exercice(2025, ExerciceStatus::Open),
        ];
        let prior = exercices[2].predecessor(&exercices).unwrap();
        assert_eq!(prior.year, 2024);
        assert!(exercices[0].predecessor(&exercices).is_none());
    }
}
