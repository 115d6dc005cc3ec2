//! Ratio data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the threshold is healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioDirection {
    /// Values at or above the threshold are good.
    AtLeast,
    /// Values at or below the threshold are good.
    AtMost,
}

/// Threshold and direction of one ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioRule {
    /// Threshold value (a plain ratio for liquidity, a percentage otherwise).
    pub threshold: Decimal,
    /// Healthy side of the threshold.
    pub direction: RatioDirection,
}

impl RatioRule {
    /// Healthy when the value is at least `threshold`.
    #[must_use]
    pub const fn at_least(threshold: Decimal) -> Self {
        Self {
            threshold,
            direction: RatioDirection::AtLeast,
        }
    }

    /// Healthy when the value is at most `threshold`.
    #[must_use]
    pub const fn at_most(threshold: Decimal) -> Self {
        Self {
            threshold,
            direction: RatioDirection::AtMost,
        }
    }
}

/// Threshold set, one rule per ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioThresholds {
    /// Current assets / current liabilities.
    pub liquidity: RatioRule,
    /// Debt share of liabilities and equity, in percent.
    pub leverage: RatioRule,
    /// Equity share of liabilities and equity, in percent.
    pub autonomy: RatioRule,
    /// Operating result over sales, in percent.
    pub operating_margin: RatioRule,
    /// Net result over sales, in percent.
    pub net_margin: RatioRule,
    /// Net result over equity, in percent.
    pub return_on_equity: RatioRule,
}

impl RatioThresholds {
    /// Rule for a ratio.
    #[must_use]
    pub const fn rule(&self, kind: RatioKind) -> RatioRule {
        match kind {
            RatioKind::Liquidity => self.liquidity,
            RatioKind::Leverage => self.leverage,
            RatioKind::Autonomy => self.autonomy,
            RatioKind::OperatingMargin => self.operating_margin,
            RatioKind::NetMargin => self.net_margin,
            RatioKind::ReturnOnEquity => self.return_on_equity,
        }
    }
}

impl Default for RatioThresholds {
    fn default() -> Self {
        Self {
            liquidity: RatioRule::at_least(Decimal::new(15, 1)),
            leverage: RatioRule::at_most(Decimal::new(60, 0)),
            autonomy: RatioRule::at_least(Decimal::new(40, 0)),
            operating_margin: RatioRule::at_least(Decimal::new(10, 0)),
            net_margin: RatioRule::at_least(Decimal::new(5, 0)),
            return_on_equity: RatioRule::at_least(Decimal::new(15, 0)),
        }
    }
}

/// The analysed ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    /// Current assets / current liabilities.
    Liquidity,
    /// Debt / total liabilities and equity × 100.
    Leverage,
    /// Equity / total liabilities and equity × 100.
    Autonomy,
    /// Operating result / sales × 100.
    OperatingMargin,
    /// Net result / sales × 100.
    NetMargin,
    /// Net result / equity × 100.
    ReturnOnEquity,
}

impl RatioKind {
    /// All ratios, in report order.
    pub const ALL: [Self; 6] = [
        Self::Liquidity,
        Self::Leverage,
        Self::Autonomy,
        Self::OperatingMargin,
        Self::NetMargin,
        Self::ReturnOnEquity,
    ];

    /// Stable name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Liquidity => "liquidity",
            Self::Leverage => "leverage",
            Self::Autonomy => "autonomy",
            Self::OperatingMargin => "operating_margin",
            Self::NetMargin => "net_margin",
            Self::ReturnOnEquity => "return_on_equity",
        }
    }
}

/// Evaluation of a ratio against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioStatus {
    /// Threshold met.
    Good,
    /// Missed, but within the tolerance band.
    Normal,
    /// Missed by more than the tolerance band.
    Attention,
}

/// One evaluated ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    /// Which ratio.
    #[serde(rename = "name")]
    pub kind: RatioKind,
    /// Computed value, rounded to two decimals.
    pub value: Decimal,
    /// Threshold it was compared with.
    pub threshold: Decimal,
    /// Healthy side of the threshold.
    pub direction: RatioDirection,
    /// Result of the comparison.
    pub status: RatioStatus,
}

/// Where the thresholds came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdsSource {
    /// Regional thresholds configured for the tenant.
    Tenant,
    /// Built-in defaults.
    #[default]
    Default,
}

/// All ratios of an exercice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioReport {
    /// Evaluated ratios, in `RatioKind::ALL` order.
    pub ratios: Vec<Ratio>,
    /// Origin of the thresholds.
    pub thresholds_source: ThresholdsSource,
    /// False when no statement data backed the ratios.
    pub has_data: bool,
}

impl RatioReport {
    /// Finds a ratio by kind.
    #[must_use]
    pub fn ratio(&self, kind: RatioKind) -> Option<&Ratio> {
        self.ratios.iter().find(|r| r.kind == kind)
    }
}
