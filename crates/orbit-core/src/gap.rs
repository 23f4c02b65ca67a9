//! # Gaps & Recommendations
//!
//! A gap is an applicable requirement the operator has not (fully) met.
//! Gaps are always reported in one fixed order (see [`sort_gaps`]). Each
//! gap yields one recommendation whose target date follows from its
//! severity.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::framework::Framework;
use crate::severity::Severity;
use crate::status::RequirementStatus;

/// An unmet applicable requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    /// Catalog identifier of the requirement.
    pub requirement_id: String,
    /// Framework the requirement belongs to.
    pub framework: Framework,
    /// Requirement title.
    pub title: String,
    /// Legal reference (article, guideline number).
    pub article: String,
    /// Catalog category.
    pub category: String,
    /// Requirement severity.
    pub severity: Severity,
    /// Recorded status: `non_compliant` or `partial`.
    pub status: RequirementStatus,
    /// Remediation guidance from the catalog template.
    pub remediation: String,
}

fn status_rank(status: RequirementStatus) -> u8 {
    match status {
        RequirementStatus::NonCompliant => 0,
        RequirementStatus::Partial => 1,
        RequirementStatus::NotAssessed => 2,
        RequirementStatus::Compliant => 3,
        RequirementStatus::NotApplicable => 4,
    }
}

fn gap_order(a: &Gap, b: &Gap) -> Ordering {
    a.severity
        .rank()
        .cmp(&b.severity.rank())
        .then_with(|| status_rank(a.status).cmp(&status_rank(b.status)))
        .then_with(|| a.requirement_id.cmp(&b.requirement_id))
}

/// Sort gaps into the fixed reporting order: severity (critical first),
/// then non-compliant before partial, then requirement id.
pub fn sort_gaps(gaps: &mut [Gap]) {
    gaps.sort_by(gap_order);
}

/// How soon a gap should be closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Within 30 days.
    Immediate,
    /// Within 90 days.
    ShortTerm,
    /// Within 180 days.
    MediumTerm,
}

impl Priority {
    /// Priority for a gap of the given severity.
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Critical => Self::Immediate,
            Severity::High => Self::ShortTerm,
            Severity::Low => Self::MediumTerm,
        }
    }

    /// Days allotted to close a gap with this priority.
    pub fn days(self) -> i64 {
        match self {
            Self::Immediate => 30,
            Self::ShortTerm => 90,
            Self::MediumTerm => 180,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::ShortTerm => write!(f, "short_term"),
            Self::MediumTerm => write!(f, "medium_term"),
        }
    }
}

/// An action item generated from a gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Urgency derived from the gap's severity.
    pub priority: Priority,
    /// Requirement the recommendation closes.
    pub requirement_id: String,
    /// Framework of the requirement.
    pub framework: Framework,
    /// Action text.
    pub text: String,
    /// Date by which the gap should be closed.
    pub target_date: NaiveDate,
}

/// Build one recommendation per gap, preserving gap order.
///
/// Partial implementations are phrased as completion work; missing ones as
/// implementation work.
pub fn build_recommendations(gaps: &[Gap], as_of: NaiveDate) -> Vec<Recommendation> {
    gaps.iter()
        .map(|gap| {
            let priority = Priority::for_severity(gap.severity);
            let verb = if gap.status == RequirementStatus::Partial {
                "Complete"
            } else {
                "Implement"
            };
            Recommendation {
                priority,
                requirement_id: gap.requirement_id.clone(),
                framework: gap.framework,
                text: format!(
                    "{verb} {} ({}): {}",
                    gap.title, gap.article, gap.remediation
                ),
                target_date: as_of + Duration::days(priority.days()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap(id: &str, severity: Severity, status: RequirementStatus) -> Gap {
        Gap {
            requirement_id: id.into(),
            framework: Framework::Nis2,
            title: format!("Requirement {id}"),
            article: "Art. 21".into(),
            category: "risk_management".into(),
            severity,
            status,
            remediation: "Document the control.".into(),
        }
    }

    #[test]
    fn sort_is_severity_then_status_then_id() {
        let mut gaps = vec![
            gap("c", Severity::Low, RequirementStatus::NonCompliant),
            gap("b", Severity::Critical, RequirementStatus::Partial),
            gap("z", Severity::Critical, RequirementStatus::NonCompliant),
            gap("a", Severity::High, RequirementStatus::Partial),
            gap("a2", Severity::Critical, RequirementStatus::NonCompliant),
        ];
        sort_gaps(&mut gaps);
        let ids: Vec<&str> = gaps.iter().map(|g| g.requirement_id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "z", "b", "a", "c"]);
    }

    #[test]
    fn priority_follows_severity() {
        assert_eq!(Priority::for_severity(Severity::Critical), Priority::Immediate);
        assert_eq!(Priority::for_severity(Severity::High), Priority::ShortTerm);
        assert_eq!(Priority::for_severity(Severity::Low), Priority::MediumTerm);
    }

    #[test]
    fn recommendations_keep_order_and_dates() {
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let gaps = vec![
            gap("x", Severity::Critical, RequirementStatus::NonCompliant),
            gap("y", Severity::Low, RequirementStatus::Partial),
        ];
        let recs = build_recommendations(&gaps, as_of);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].requirement_id, "x");
        assert_eq!(recs[0].target_date, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        assert!(recs[0].text.starts_with("Implement"));
        assert_eq!(recs[1].priority, Priority::MediumTerm);
        assert!(recs[1].text.starts_with("Complete"));
        assert_eq!(recs[1].target_date, NaiveDate::from_ymd_opt(2026, 6, 30).unwrap());
    }
}
