//! # Cross-Regulation Overlap
//!
//! - `POST /v1/cross-regulation/overlap`: topic overlap across the
//!   requirements that apply to each supplied questionnaire
//! - `POST /v1/cross-regulation/evidence-reuse`: reuse suggestions along
//!   catalog cross references

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use orbit_core::Framework;
use orbit_rules::{
    analyze_overlap, applicable_summaries, suggest_evidence_reuse, EvidenceReuse, OverlapReport,
    StatusMap,
};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::frameworks::parse_framework;
use crate::state::AppState;

/// Questionnaires keyed by framework name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OverlapRequest {
    #[schema(value_type = Object)]
    pub profiles: BTreeMap<String, serde_json::Value>,
}

impl Validate for OverlapRequest {
    fn validate(&self) -> Result<(), String> {
        if self.profiles.is_empty() {
            return Err("profiles must name at least one framework".to_string());
        }
        Ok(())
    }
}

/// Recorded statuses keyed by framework name, then requirement id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvidenceReuseRequest {
    #[schema(value_type = Object)]
    pub statuses: BTreeMap<String, StatusMap>,
}

impl Validate for EvidenceReuseRequest {
    fn validate(&self) -> Result<(), String> {
        if self.statuses.is_empty() {
            return Err("statuses must name at least one framework".to_string());
        }
        Ok(())
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/cross-regulation/overlap", post(overlap))
        .route("/v1/cross-regulation/evidence-reuse", post(evidence_reuse))
}

/// Re-key a map by parsed framework. Two spellings of one framework are
/// rejected rather than silently merged.
fn by_framework<V>(raw: BTreeMap<String, V>) -> Result<BTreeMap<Framework, V>, AppError> {
    let mut out = BTreeMap::new();
    for (name, value) in raw {
        let framework = parse_framework(&name)?;
        if out.insert(framework, value).is_some() {
            return Err(AppError::Validation(format!(
                "framework {framework} is given more than once"
            )));
        }
    }
    Ok(out)
}

/// POST /v1/cross-regulation/overlap
#[utoipa::path(
    post,
    path = "/v1/cross-regulation/overlap",
    request_body = OverlapRequest,
    responses(
        (status = 200, description = "Shared control topics, effort reduction, cross references"),
        (status = 400, description = "Unknown framework or malformed questionnaire", body = crate::error::ErrorBody),
        (status = 422, description = "A questionnaire failed validation", body = crate::error::ErrorBody),
    ),
    tag = "cross-regulation"
)]
pub async fn overlap(
    body: Result<Json<OverlapRequest>, JsonRejection>,
) -> Result<Json<OverlapReport>, AppError> {
    let req = extract_validated_json(body)?;
    let mut sets = Vec::with_capacity(req.profiles.len());
    for (framework, questionnaire) in by_framework(req.profiles)? {
        sets.push((framework, applicable_summaries(framework, &questionnaire)?));
    }
    Ok(Json(analyze_overlap(&sets)))
}

/// POST /v1/cross-regulation/evidence-reuse
#[utoipa::path(
    post,
    path = "/v1/cross-regulation/evidence-reuse",
    request_body = EvidenceReuseRequest,
    responses(
        (status = 200, description = "Compliant requirements whose evidence may close unassessed ones"),
        (status = 400, description = "Unknown framework or status", body = crate::error::ErrorBody),
    ),
    tag = "cross-regulation"
)]
pub async fn evidence_reuse(
    body: Result<Json<EvidenceReuseRequest>, JsonRejection>,
) -> Result<Json<Vec<EvidenceReuse>>, AppError> {
    let req = extract_validated_json(body)?;
    let statuses = by_framework(req.statuses)?;
    Ok(Json(suggest_evidence_reuse(&statuses)))
}
