//! # The Engine Contract
//!
//! Every framework engine has the same four-step shape:
//!
//! ```text
//! Questionnaire ──validate_profile──▶ Profile ──applies──▶ applicable requirements
//!                                          │                      │
//!                                       classify          statuses ──▶ score, gaps, recommendations
//! ```
//!
//! Engines implement only the framework-specific parts (`validate_profile`,
//! `classify`, `catalog`). Scoring, gap analysis, and recommendations are
//! provided methods, so every framework scores and orders gaps identically.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use orbit_core::{
    build_recommendations, sort_gaps, ComplianceScore, Framework, Gap, Recommendation,
    RequirementStatus, RiskLevel, Severity, Timestamp, ValidationError,
};

use crate::catalog::{Requirement, RequirementSummary};
use crate::copuos::DebrisAssessment;
use crate::eu_space_act::EuSpaceActClassification;
use crate::export_control::ExportClassification;
use crate::nis2::Nis2Classification;
use crate::spectrum::SpectrumClassification;

/// Recorded statuses keyed by requirement id. Absent ids are `not_assessed`.
pub type StatusMap = BTreeMap<String, RequirementStatus>;

/// Classification result of any framework, tagged by framework on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "framework", rename_all = "snake_case")]
pub enum FrameworkClassification {
    /// EU Space Act operator classification.
    EuSpaceAct(EuSpaceActClassification),
    /// NIS2 entity classification.
    Nis2(Nis2Classification),
    /// COPUOS/IADC debris assessment.
    Copuos(DebrisAssessment),
    /// ITAR/EAR jurisdiction and licensing determination.
    ExportControl(ExportClassification),
    /// ITU filing procedure and milestones.
    Spectrum(SpectrumClassification),
}

/// Full evaluation of one profile against one framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Framework evaluated.
    pub framework: Framework,
    /// Catalog version the report was computed against.
    pub catalog_version: String,
    /// Framework-specific classification.
    pub classification: FrameworkClassification,
    /// Requirements that apply to the profile, in catalog order.
    pub applicable: Vec<RequirementSummary>,
    /// Weighted score over the applicable requirements.
    pub score: ComplianceScore,
    /// Risk level from the score and open critical gaps.
    pub risk_level: RiskLevel,
    /// Unmet requirements in the fixed gap order.
    pub gaps: Vec<Gap>,
    /// One action per gap, in gap order.
    pub recommendations: Vec<Recommendation>,
    /// Applicable requirement ids with no recorded answer.
    pub unassessed: Vec<String>,
    /// When the report was generated.
    pub generated_at: Timestamp,
}

/// A regulatory framework engine.
pub trait RegulatoryEngine {
    /// Framework this engine evaluates.
    const FRAMEWORK: Framework;

    /// Version label of the static catalog.
    const CATALOG_VERSION: &'static str;

    /// Raw questionnaire answers as supplied by the operator.
    type Questionnaire: DeserializeOwned + Serialize + Default + fmt::Debug;

    /// Validated, defaulted profile.
    type Profile: Clone + fmt::Debug + 'static;

    /// Framework-specific classification.
    type Classification: Clone + fmt::Debug + Into<FrameworkClassification>;

    /// Validate answers and fill defaults.
    fn validate_profile(
        questionnaire: &Self::Questionnaire,
    ) -> Result<Self::Profile, ValidationError>;

    /// Classify a validated profile.
    fn classify(profile: &Self::Profile) -> Self::Classification;

    /// The static requirement catalog.
    fn catalog() -> &'static [Requirement<Self::Profile>];

    /// Requirements whose applicability predicate holds, in catalog order.
    fn applicable_requirements(
        profile: &Self::Profile,
    ) -> Vec<&'static Requirement<Self::Profile>> {
        Self::catalog()
            .iter()
            .filter(|r| r.is_applicable(profile))
            .collect()
    }

    /// Applicable requirements as owned summaries.
    fn applicable_summaries(profile: &Self::Profile) -> Vec<RequirementSummary> {
        Self::applicable_requirements(profile)
            .into_iter()
            .map(|r| r.summary(Self::FRAMEWORK))
            .collect()
    }

    /// Weighted score over the applicable requirements.
    fn calculate_compliance_score(profile: &Self::Profile, statuses: &StatusMap) -> ComplianceScore {
        orbit_core::calculate_compliance_score(
            Self::applicable_requirements(profile)
                .into_iter()
                .map(|r| (r.severity, status_of(statuses, r.id))),
        )
    }

    /// Applicable requirements recorded as `non_compliant` or `partial`,
    /// sorted into the fixed gap order.
    fn generate_gap_analysis(profile: &Self::Profile, statuses: &StatusMap) -> Vec<Gap> {
        let mut gaps: Vec<Gap> = Self::applicable_requirements(profile)
            .into_iter()
            .filter_map(|r| {
                let status = status_of(statuses, r.id);
                status.is_gap().then(|| Gap {
                    requirement_id: r.id.to_string(),
                    framework: Self::FRAMEWORK,
                    title: r.title.to_string(),
                    article: r.article.to_string(),
                    category: r.category.to_string(),
                    severity: r.severity,
                    status,
                    remediation: r.remediation.to_string(),
                })
            })
            .collect();
        sort_gaps(&mut gaps);
        gaps
    }

    /// One recommendation per gap, dated from `as_of`.
    fn generate_recommendations(
        profile: &Self::Profile,
        statuses: &StatusMap,
        as_of: NaiveDate,
    ) -> Vec<Recommendation> {
        build_recommendations(&Self::generate_gap_analysis(profile, statuses), as_of)
    }

    /// Validate, classify, score, and analyse in one pass.
    fn assess(
        questionnaire: &Self::Questionnaire,
        statuses: &StatusMap,
        as_of: DateTime<Utc>,
    ) -> Result<AssessmentReport, ValidationError> {
        let profile = Self::validate_profile(questionnaire)?;
        let applicable = Self::applicable_requirements(&profile);

        for id in statuses.keys() {
            if !applicable.iter().any(|r| r.id == id.as_str()) {
                tracing::debug!(
                    framework = %Self::FRAMEWORK,
                    requirement_id = %id,
                    "ignoring status for requirement that does not apply"
                );
            }
        }

        let score = Self::calculate_compliance_score(&profile, statuses);
        let gaps = Self::generate_gap_analysis(&profile, statuses);
        let recommendations = build_recommendations(&gaps, as_of.date_naive());
        let open_critical = gaps
            .iter()
            .filter(|g| g.severity == Severity::Critical)
            .count();
        let unassessed = applicable
            .iter()
            .filter(|r| status_of(statuses, r.id) == RequirementStatus::NotAssessed)
            .map(|r| r.id.to_string())
            .collect();

        tracing::info!(
            framework = %Self::FRAMEWORK,
            applicable = applicable.len(),
            score = score.score,
            gaps = gaps.len(),
            "assessment computed"
        );

        Ok(AssessmentReport {
            framework: Self::FRAMEWORK,
            catalog_version: Self::CATALOG_VERSION.to_string(),
            classification: Self::classify(&profile).into(),
            applicable: applicable
                .into_iter()
                .map(|r| r.summary(Self::FRAMEWORK))
                .collect(),
            risk_level: RiskLevel::from_score(score.score, open_critical),
            score,
            gaps,
            recommendations,
            unassessed,
            generated_at: Timestamp::from_datetime(as_of),
        })
    }
}

/// Status recorded for `id`, defaulting to `not_assessed`.
pub fn status_of(statuses: &StatusMap, id: &str) -> RequirementStatus {
    statuses.get(id).copied().unwrap_or_default()
}
