//! # Enterprise Size
//!
//! Size categories per Commission Recommendation 2003/361/EC, shared by the
//! EU Space Act light regime and NIS2 size-cap rules.
//!
//! | Size   | Headcount | Turnover   | or Balance sheet |
//! |--------|-----------|------------|------------------|
//! | micro  | < 10      | ≤ €2M      | ≤ €2M            |
//! | small  | < 50      | ≤ €10M     | ≤ €10M           |
//! | medium | < 250     | ≤ €50M     | ≤ €43M           |
//! | large  | otherwise |            |                  |

use std::fmt;

use serde::{Deserialize, Serialize};

use orbit_core::ValidationError;

/// Enterprise size category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitySize {
    /// Fewer than 10 staff.
    Micro,
    /// Fewer than 50 staff.
    Small,
    /// Fewer than 250 staff.
    Medium,
    /// Everything else.
    Large,
}

impl EntitySize {
    /// Classify from headcount and financial ceilings.
    ///
    /// The headcount ceiling is mandatory; of the two financial ceilings
    /// only one needs to be met.
    pub fn from_metrics(employees: u32, turnover_eur: f64, balance_sheet_eur: f64) -> Self {
        let within = |turnover_cap: f64, balance_cap: f64| {
            turnover_eur <= turnover_cap || balance_sheet_eur <= balance_cap
        };
        if employees < 10 && within(2_000_000.0, 2_000_000.0) {
            Self::Micro
        } else if employees < 50 && within(10_000_000.0, 10_000_000.0) {
            Self::Small
        } else if employees < 250 && within(50_000_000.0, 43_000_000.0) {
            Self::Medium
        } else {
            Self::Large
        }
    }

    /// Micro or small.
    pub fn is_small_or_micro(self) -> bool {
        matches!(self, Self::Micro | Self::Small)
    }
}

impl fmt::Display for EntitySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Micro => write!(f, "micro"),
            Self::Small => write!(f, "small"),
            Self::Medium => write!(f, "medium"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// Validate a monetary amount: finite and non-negative.
pub(crate) fn check_amount(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: f64::MAX,
        });
    }
    Ok(value)
}
