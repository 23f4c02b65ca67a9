//! # Weighted Compliance Scoring
//!
//! One formula for every framework:
//!
//! ```text
//! score = round_half_up(100 · Σ weight(sev) · credit(status) / Σ weight(sev) · 2)
//! ```
//!
//! where `credit` is counted in half-points (compliant = 2, partial = 1,
//! otherwise 0) and requirements marked `not_applicable` are dropped from
//! both sums. All arithmetic is integer, so the same statuses always
//! produce the same score.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::status::RequirementStatus;

/// Per-status tallies for a scored set of requirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Requirements marked compliant.
    pub compliant: usize,
    /// Requirements marked partial.
    pub partial: usize,
    /// Requirements marked non-compliant.
    pub non_compliant: usize,
    /// Requirements with no answer yet.
    pub not_assessed: usize,
    /// Requirements excluded by the operator.
    pub not_applicable: usize,
}

impl StatusCounts {
    fn record(&mut self, status: RequirementStatus) {
        match status {
            RequirementStatus::Compliant => self.compliant += 1,
            RequirementStatus::Partial => self.partial += 1,
            RequirementStatus::NonCompliant => self.non_compliant += 1,
            RequirementStatus::NotAssessed => self.not_assessed += 1,
            RequirementStatus::NotApplicable => self.not_applicable += 1,
        }
    }

    /// Number of requirements that count toward the score.
    pub fn scored(&self) -> usize {
        self.compliant + self.partial + self.non_compliant + self.not_assessed
    }

    /// Total number of requirements seen, including excluded ones.
    pub fn total(&self) -> usize {
        self.scored() + self.not_applicable
    }
}

/// Score restricted to one severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityScore {
    /// The severity band.
    pub severity: Severity,
    /// Requirements in the band that count toward the score.
    pub scored: usize,
    /// Band score, 0–100 (0 when the band is empty).
    pub score: u8,
}

/// Result of scoring a set of requirement statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceScore {
    /// Weighted score, 0–100.
    pub score: u8,
    /// Weighted credit earned, in half-points.
    pub achieved_half_points: u32,
    /// Maximum weighted credit, in half-points. Zero means nothing was scored.
    pub possible_half_points: u32,
    /// Per-status tallies.
    pub counts: StatusCounts,
    /// Per-severity breakdown, most severe first.
    pub by_severity: Vec<SeverityScore>,
}

impl ComplianceScore {
    /// Whether any requirement counted toward the score.
    pub fn has_scored_requirements(&self) -> bool {
        self.possible_half_points > 0
    }
}

/// Round-half-up percentage of `achieved / possible`. Zero when `possible` is zero.
fn percent(achieved: u32, possible: u32) -> u8 {
    if possible == 0 {
        return 0;
    }
    let achieved = u64::from(achieved.min(possible));
    let possible = u64::from(possible);
    // floor((200a + p) / 2p) == round_half_up(100a / p)
    ((200 * achieved + possible) / (2 * possible)) as u8
}

/// Compute the weighted compliance score of `(severity, status)` pairs.
///
/// Requirements whose status is `not_applicable` are excluded from the
/// denominator. An empty (or fully excluded) set scores 0, with
/// `possible_half_points == 0` so callers can tell it apart from a genuine 0.
pub fn calculate_compliance_score<I>(items: I) -> ComplianceScore
where
    I: IntoIterator<Item = (Severity, RequirementStatus)>,
{
    let mut counts = StatusCounts::default();
    let mut achieved = 0u32;
    let mut possible = 0u32;
    // (scored, achieved, possible) per severity, indexed by rank.
    let mut bands = [(0usize, 0u32, 0u32); 3];

    for (severity, status) in items {
        counts.record(status);
        if !status.counts_toward_score() {
            continue;
        }
        let weight = severity.weight();
        let earned = weight * status.credit_halves();
        let max = weight * 2;
        achieved += earned;
        possible += max;

        let band = &mut bands[usize::from(severity.rank())];
        band.0 += 1;
        band.1 += earned;
        band.2 += max;
    }

    let by_severity = Severity::all()
        .iter()
        .map(|&severity| {
            let (scored, a, p) = bands[usize::from(severity.rank())];
            SeverityScore {
                severity,
                scored,
                score: percent(a, p),
            }
        })
        .collect();

    ComplianceScore {
        score: percent(achieved, possible),
        achieved_half_points: achieved,
        possible_half_points: possible,
        counts,
        by_severity,
    }
}

/// Overall risk level derived from a score and the number of open critical gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Score ≥ 80 with no open critical gaps.
    Low,
    /// Score ≥ 60, or a single open critical gap.
    Medium,
    /// Score ≥ 40, or three or more open critical gaps.
    High,
    /// Score below 40.
    Critical,
}

impl RiskLevel {
    /// Derive the risk level.
    ///
    /// Thresholds: ≥ 80 low, ≥ 60 medium, ≥ 40 high, otherwise critical.
    /// Any open critical gap raises the level to at least medium; three or
    /// more raise it to at least high.
    pub fn from_score(score: u8, open_critical_gaps: usize) -> Self {
        let base = match score {
            80..=u8::MAX => Self::Low,
            60..=79 => Self::Medium,
            40..=59 => Self::High,
            _ => Self::Critical,
        };
        let floor = match open_critical_gaps {
            0 => Self::Low,
            1 | 2 => Self::Medium,
            _ => Self::High,
        };
        base.max(floor)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use RequirementStatus::*;
    use Severity::*;

    #[test]
    fn all_compliant_scores_100() {
        let s = calculate_compliance_score(vec![
            (Critical, Compliant),
            (High, Compliant),
            (Low, Compliant),
        ]);
        assert_eq!(s.score, 100);
        assert_eq!(s.achieved_half_points, s.possible_half_points);
    }

    #[test]
    fn all_non_compliant_scores_0() {
        let s = calculate_compliance_score(vec![
            (Critical, NonCompliant),
            (High, NonCompliant),
            (Low, NonCompliant),
        ]);
        assert_eq!(s.score, 0);
        assert!(s.has_scored_requirements());
    }

    #[test]
    fn not_applicable_leaves_denominator() {
        let base = calculate_compliance_score(vec![(Critical, Compliant), (Low, NonCompliant)]);
        let with_na = calculate_compliance_score(vec![
            (Critical, Compliant),
            (Low, NonCompliant),
            (High, NotApplicable),
        ]);
        assert_eq!(base.score, with_na.score);
        assert_eq!(base.possible_half_points, with_na.possible_half_points);
        assert_eq!(with_na.counts.not_applicable, 1);
    }

    #[test]
    fn weights_are_applied() {
        // critical compliant (3) vs low non-compliant (1): 3/4 = 75
        let s = calculate_compliance_score(vec![(Critical, Compliant), (Low, NonCompliant)]);
        assert_eq!(s.score, 75);
        // low compliant (1) vs critical non-compliant (3): 1/4 = 25
        let s = calculate_compliance_score(vec![(Low, Compliant), (Critical, NonCompliant)]);
        assert_eq!(s.score, 25);
    }

    #[test]
    fn partial_earns_half_credit() {
        let s = calculate_compliance_score(vec![(High, Partial)]);
        assert_eq!(s.score, 50);
    }

    #[test]
    fn rounding_is_half_up() {
        // high compliant (4 halves) + critical partial (3) + critical nc (0)
        // = 7 / 16 = 43.75 -> 44
        let s = calculate_compliance_score(vec![
            (High, Compliant),
            (Critical, Partial),
            (Critical, NonCompliant),
        ]);
        assert_eq!(s.score, 44);
        // 1 / 8 halves = 12.5 -> 13
        let s = calculate_compliance_score(vec![(Low, Partial), (Critical, NonCompliant)]);
        assert_eq!(s.score, 13);
    }

    #[test]
    fn empty_set_scores_zero_without_denominator() {
        let s = calculate_compliance_score(Vec::new());
        assert_eq!(s.score, 0);
        assert!(!s.has_scored_requirements());

        let s = calculate_compliance_score(vec![(Critical, NotApplicable)]);
        assert_eq!(s.score, 0);
        assert!(!s.has_scored_requirements());
    }

    #[test]
    fn not_assessed_counts_as_unmet() {
        let s = calculate_compliance_score(vec![(High, Compliant), (High, NotAssessed)]);
        assert_eq!(s.score, 50);
        assert_eq!(s.counts.not_assessed, 1);
    }

    #[test]
    fn severity_breakdown_is_most_severe_first() {
        let s = calculate_compliance_score(vec![(Low, Compliant), (Critical, NonCompliant)]);
        assert_eq!(s.by_severity[0].severity, Critical);
        assert_eq!(s.by_severity[0].score, 0);
        assert_eq!(s.by_severity[1].scored, 0);
        assert_eq!(s.by_severity[2].score, 100);
    }

    #[test]
    fn risk_thresholds() {
        assert_eq!(RiskLevel::from_score(100, 0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(80, 0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(79, 0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60, 0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59, 0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(40, 0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(39, 0), RiskLevel::Critical);
    }

    #[test]
    fn critical_gaps_raise_risk_floor() {
        assert_eq!(RiskLevel::from_score(95, 1), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(95, 3), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(10, 1), RiskLevel::Critical);
    }

    fn arb_severity() -> impl Strategy<Value = Severity> {
        prop_oneof![Just(Critical), Just(High), Just(Low)]
    }

    fn arb_status() -> impl Strategy<Value = RequirementStatus> {
        prop_oneof![
            Just(Compliant),
            Just(Partial),
            Just(NonCompliant),
            Just(NotAssessed),
            Just(NotApplicable),
        ]
    }

    proptest! {
        #[test]
        fn score_is_bounded(items in prop::collection::vec((arb_severity(), arb_status()), 0..60)) {
            let s = calculate_compliance_score(items);
            prop_assert!(s.score <= 100);
            prop_assert!(s.achieved_half_points <= s.possible_half_points);
        }

        #[test]
        fn appending_not_applicable_is_neutral(
            items in prop::collection::vec((arb_severity(), arb_status()), 0..40),
            extra in arb_severity(),
        ) {
            let base = calculate_compliance_score(items.clone());
            let mut more = items;
            more.push((extra, NotApplicable));
            let with_na = calculate_compliance_score(more);
            prop_assert_eq!(base.score, with_na.score);
        }

        #[test]
        fn upgrading_a_status_never_lowers_the_score(
            items in prop::collection::vec((arb_severity(), arb_status()), 1..40),
            idx in any::<prop::sample::Index>(),
        ) {
            let i = idx.index(items.len());
            if items[i].1 == NotApplicable {
                return Ok(());
            }
            let before = calculate_compliance_score(items.clone());
            let mut upgraded = items;
            upgraded[i].1 = Compliant;
            let after = calculate_compliance_score(upgraded);
            prop_assert!(after.score >= before.score);
        }
    }
}
