//! # Requirement Status
//!
//! The per-requirement answer an operator records in an assessment, with the
//! scoring credit and composition rules attached to each state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Assessment status of a single requirement.
///
/// Composition uses a worst-of ordering:
///
/// ```text
/// NonCompliant < NotAssessed < Partial < Compliant
/// ```
///
/// `NotApplicable` is the identity under [`meet`](Self::meet): it never
/// changes the other operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    /// Fully implemented with evidence.
    Compliant,
    /// Implemented in part.
    Partial,
    /// Not implemented.
    NonCompliant,
    /// No answer recorded yet.
    #[default]
    NotAssessed,
    /// Operator has marked the requirement as not relevant to them.
    NotApplicable,
}

impl RequirementStatus {
    /// Scoring credit in half-points out of a maximum of 2.
    pub fn credit_halves(self) -> u32 {
        match self {
            Self::Compliant => 2,
            Self::Partial => 1,
            Self::NonCompliant | Self::NotAssessed | Self::NotApplicable => 0,
        }
    }

    /// Whether the requirement stays in the score denominator.
    pub fn counts_toward_score(self) -> bool {
        !matches!(self, Self::NotApplicable)
    }

    /// Whether the requirement belongs in a gap analysis.
    pub fn is_gap(self) -> bool {
        matches!(self, Self::NonCompliant | Self::Partial)
    }

    fn ordering(self) -> Option<u8> {
        match self {
            Self::NonCompliant => Some(0),
            Self::NotAssessed => Some(1),
            Self::Partial => Some(2),
            Self::Compliant => Some(3),
            Self::NotApplicable => None,
        }
    }

    /// Worst-of composition, used when one control answers several
    /// requirements and the evidence differs between them.
    pub fn meet(self, other: Self) -> Self {
        match (self.ordering(), other.ordering()) {
            (None, _) => other,
            (_, None) => self,
            (Some(a), Some(b)) => {
                if a <= b {
                    self
                } else {
                    other
                }
            }
        }
    }
}

impl fmt::Display for RequirementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compliant => write!(f, "compliant"),
            Self::Partial => write!(f, "partial"),
            Self::NonCompliant => write!(f, "non_compliant"),
            Self::NotAssessed => write!(f, "not_assessed"),
            Self::NotApplicable => write!(f, "not_applicable"),
        }
    }
}
