//! # Severity & Binding Level
//!
//! Severity drives both the scoring weight of a requirement and the fixed
//! order in which gaps are reported.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How much an unmet requirement matters.
///
/// Weights: critical = 3, high = 2, low = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocking obligation: authorization, reporting, or safety at stake.
    Critical,
    /// Substantive obligation with regulatory exposure.
    High,
    /// Hygiene or documentation obligation.
    Low,
}

impl Severity {
    /// Scoring weight of a requirement with this severity.
    pub fn weight(self) -> u32 {
        match self {
            Self::Critical => 3,
            Self::High => 2,
            Self::Low => 1,
        }
    }

    /// Position in the fixed gap ordering. Lower sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Low => 2,
        }
    }

    /// All severities, most severe first.
    pub fn all() -> &'static [Severity] {
        &[Self::Critical, Self::High, Self::Low]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Legal force of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingLevel {
    /// Legally binding obligation.
    Mandatory,
    /// Soft-law guideline that regulators expect to see followed.
    Recommended,
    /// Industry best practice with no direct legal force.
    BestPractice,
}

impl fmt::Display for BindingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mandatory => write!(f, "mandatory"),
            Self::Recommended => write!(f, "recommended"),
            Self::BestPractice => write!(f, "best_practice"),
        }
    }
}
