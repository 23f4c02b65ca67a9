//! # Framework Dispatch
//!
//! JSON entry points keyed by [`Framework`]. The API and CLI receive
//! questionnaires as untyped JSON alongside a framework name; these
//! functions deserialize into the right engine's questionnaire type and run
//! the engine.
//!
//! Deserialization failures (unknown enum variants, wrong types) surface as
//! [`OrbitError::Json`]; validation failures as [`OrbitError::Validation`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use orbit_core::{content_digest, Framework, OrbitError, ValidationError};

use crate::catalog::{CatalogInfo, RequirementSummary};
use crate::copuos::CopuosEngine;
use crate::engine::{AssessmentReport, FrameworkClassification, RegulatoryEngine, StatusMap};
use crate::eu_space_act::EuSpaceActEngine;
use crate::export_control::ExportControlEngine;
use crate::nis2::Nis2Engine;
use crate::spectrum::SpectrumEngine;

macro_rules! with_engine {
    ($framework:expr, $f:ident ( $($arg:expr),* )) => {
        match $framework {
            Framework::EuSpaceAct => $f::<EuSpaceActEngine>($($arg),*),
            Framework::Nis2 => $f::<Nis2Engine>($($arg),*),
            Framework::Copuos => $f::<CopuosEngine>($($arg),*),
            Framework::ExportControl => $f::<ExportControlEngine>($($arg),*),
            Framework::Spectrum => $f::<SpectrumEngine>($($arg),*),
        }
    };
}

/// Classification together with the requirements it selects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Framework.
    pub framework: Framework,
    /// Framework-specific classification.
    pub classification: FrameworkClassification,
    /// Applicable requirements in catalog order.
    pub applicable: Vec<RequirementSummary>,
}

fn profile_of<E: RegulatoryEngine>(questionnaire: &Value) -> Result<E::Profile, OrbitError> {
    let q: E::Questionnaire = serde_json::from_value(questionnaire.clone())?;
    Ok(E::validate_profile(&q)?)
}

fn classify_with<E: RegulatoryEngine>(questionnaire: &Value) -> Result<ClassificationResult, OrbitError> {
    let profile = profile_of::<E>(questionnaire)?;
    Ok(ClassificationResult {
        framework: E::FRAMEWORK,
        classification: E::classify(&profile).into(),
        applicable: E::applicable_summaries(&profile),
    })
}

fn applicable_with<E: RegulatoryEngine>(questionnaire: &Value) -> Result<Vec<RequirementSummary>, OrbitError> {
    Ok(E::applicable_summaries(&profile_of::<E>(questionnaire)?))
}

fn assess_with<E: RegulatoryEngine>(
    questionnaire: &Value,
    statuses: &StatusMap,
    as_of: DateTime<Utc>,
) -> Result<AssessmentReport, OrbitError> {
    let q: E::Questionnaire = serde_json::from_value(questionnaire.clone())?;
    Ok(E::assess(&q, statuses, as_of)?)
}

fn summaries_of<E: RegulatoryEngine>() -> Vec<RequirementSummary> {
    E::catalog().iter().map(|r| r.summary(E::FRAMEWORK)).collect()
}

fn version_of<E: RegulatoryEngine>() -> &'static str {
    E::CATALOG_VERSION
}

/// Classify a JSON questionnaire.
pub fn classify_value(framework: Framework, questionnaire: &Value) -> Result<ClassificationResult, OrbitError> {
    with_engine!(framework, classify_with(questionnaire))
}

/// Requirements applicable to a JSON questionnaire.
pub fn applicable_summaries(
    framework: Framework,
    questionnaire: &Value,
) -> Result<Vec<RequirementSummary>, OrbitError> {
    with_engine!(framework, applicable_with(questionnaire))
}

/// Full assessment of a JSON questionnaire against recorded statuses.
pub fn assess_value(
    framework: Framework,
    questionnaire: &Value,
    statuses: &StatusMap,
    as_of: DateTime<Utc>,
) -> Result<AssessmentReport, OrbitError> {
    with_engine!(framework, assess_with(questionnaire, statuses, as_of))
}

/// Every requirement of one catalog, in catalog order.
pub fn catalog_summaries(framework: Framework) -> Vec<RequirementSummary> {
    with_engine!(framework, summaries_of())
}

/// Every requirement of every catalog, frameworks in canonical order.
pub fn all_summaries() -> Vec<RequirementSummary> {
    Framework::all()
        .iter()
        .flat_map(|f| catalog_summaries(*f))
        .collect()
}

/// Version label of a catalog.
pub fn catalog_version(framework: Framework) -> &'static str {
    with_engine!(framework, version_of())
}

/// Version, size, and content digest of a catalog.
pub fn catalog_info(framework: Framework) -> Result<CatalogInfo, OrbitError> {
    let summaries = catalog_summaries(framework);
    let digest = content_digest(&summaries)?;
    Ok(CatalogInfo {
        framework,
        title: framework.title().to_string(),
        version: catalog_version(framework).to_string(),
        requirement_count: summaries.len(),
        digest: digest.to_hex().to_string(),
    })
}

/// Look up a requirement by its globally unique id.
pub fn find_requirement(id: &str) -> Option<RequirementSummary> {
    all_summaries().into_iter().find(|r| r.id == id)
}

/// Check that a status may be recorded for `requirement_id` on an
/// assessment of `questionnaire`.
///
/// The requirement must exist in the framework's catalog and apply to the
/// questionnaire's profile.
pub fn validate_status_update(
    framework: Framework,
    questionnaire: &Value,
    requirement_id: &str,
) -> Result<RequirementSummary, OrbitError> {
    let unknown = || OrbitError::UnknownRequirement {
        framework,
        id: requirement_id.to_string(),
    };
    if !catalog_summaries(framework)
        .iter()
        .any(|r| r.id == requirement_id)
    {
        return Err(unknown());
    }
    applicable_summaries(framework, questionnaire)?
        .into_iter()
        .find(|r| r.id == requirement_id)
        .ok_or_else(|| {
            ValidationError::InvalidValue {
                field: "requirement",
                value: requirement_id.to_string(),
                expected: "a requirement applicable to the assessed profile",
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn nis2_space() -> Value {
        json!({ "sector": "space", "employees": 300, "annual_turnover_eur": 80_000_000.0 })
    }

    #[test]
    fn classify_dispatches_by_framework() {
        let r = classify_value(Framework::Nis2, &nis2_space()).unwrap();
        assert_eq!(r.framework, Framework::Nis2);
        assert!(matches!(r.classification, FrameworkClassification::Nis2(_)));
        assert!(r.applicable.iter().all(|s| s.framework == Framework::Nis2));
        assert!(r.applicable.iter().any(|s| s.id == "nis2.space.ttc"));
    }

    #[test]
    fn classification_serializes_with_framework_tag() {
        let r = classify_value(Framework::Nis2, &nis2_space()).unwrap();
        let v = serde_json::to_value(&r.classification).unwrap();
        assert_eq!(v["framework"], "nis2");
        assert_eq!(v["entity_class"], "essential");
    }

    #[test]
    fn unknown_enum_is_json_error() {
        let err = classify_value(Framework::Nis2, &json!({ "sector": "mining" })).unwrap_err();
        assert!(matches!(err, OrbitError::Json(_)));
    }

    #[test]
    fn missing_field_is_validation_error() {
        let err = classify_value(Framework::Nis2, &json!({ "sector": "space" })).unwrap_err();
        assert!(matches!(err, OrbitError::Validation(_)));
    }

    #[test]
    fn assess_value_runs_engine() {
        let mut statuses = StatusMap::new();
        statuses.insert("nis2.art23".into(), orbit_core::RequirementStatus::NonCompliant);
        let as_of = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        let report = assess_value(Framework::Nis2, &nis2_space(), &statuses, as_of).unwrap();
        assert_eq!(report.gaps[0].requirement_id, "nis2.art23");
        assert_eq!(report.catalog_version, Nis2Engine::CATALOG_VERSION);
    }

    #[test]
    fn catalog_info_is_stable() {
        let a = catalog_info(Framework::Copuos).unwrap();
        let b = catalog_info(Framework::Copuos).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.digest.len(), 64);
        assert_eq!(a.requirement_count, catalog_summaries(Framework::Copuos).len());
    }

    #[test]
    fn status_update_checks() {
        assert!(validate_status_update(Framework::Nis2, &nis2_space(), "nis2.art23").is_ok());
        assert!(matches!(
            validate_status_update(Framework::Nis2, &nis2_space(), "esa.auth.01"),
            Err(OrbitError::UnknownRequirement { .. })
        ));

        let energy = json!({ "sector": "energy", "employees": 300, "annual_turnover_eur": 1e6 });
        assert!(matches!(
            validate_status_update(Framework::Nis2, &energy, "nis2.space.ttc"),
            Err(OrbitError::Validation(_))
        ));
    }

    #[test]
    fn find_requirement_is_global() {
        assert_eq!(
            find_requirement("iadc.5.3.2").map(|r| r.framework),
            Some(Framework::Copuos)
        );
        assert!(find_requirement("nope").is_none());
    }
}
