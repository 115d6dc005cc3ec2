//! Accounting periods (exercices) and their resolution.

pub mod exercice;

pub use exercice::{Exercice, ExerciceStatus, resolve_exercice};
