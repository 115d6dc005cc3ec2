//! OHADA account classification.
//!
//! Maps an account code and its net balance to exactly one statement
//! bucket. Placement is driven by a sorted prefix table with
//! longest-prefix match, so rule order never matters.

pub mod rules;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use rules::{PrefixTable, Rule, fixed_asset_heading, heading_label};
pub use service::AccountClassifier;
pub use types::{Bucket, Classification, ClassifiedBalance, ResultLayer, UnclassifiedAccount};
