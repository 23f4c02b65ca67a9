//! # Assessments
//!
//! An assessment is a questionnaire snapshot for one framework plus the
//! statuses the operator records against its applicable requirements. It is
//! created once and patched one requirement at a time afterwards. Score,
//! gaps, and recommendations are recomputed from the record on every read.
//!
//! ## Endpoints
//!
//! - `POST /v1/assessments`: create (profile validated, statuses checked)
//! - `GET /v1/assessments`: list, optionally `?framework=`
//! - `GET /v1/assessments/:id`: stored record
//! - `DELETE /v1/assessments/:id`
//! - `PATCH /v1/assessments/:id/requirements/:requirement_id`: record a status
//! - `GET /v1/assessments/:id/report`: full evaluation
//! - `GET /v1/assessments/:id/score`, `/gaps`, `/recommendations`: slices

use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use orbit_core::{
    AssessmentId, ComplianceScore, Framework, Gap, OperatorId, Recommendation, RequirementStatus,
    RiskLevel,
};
use orbit_rules::{
    applicable_summaries, assess_value, validate_status_update, AssessmentReport, StatusMap,
};

use crate::error::AppError;
use crate::extractors::{extract_path, extract_query, extract_validated_json, Validate};
use crate::routes::frameworks::parse_framework;
use crate::state::{AppState, AssessmentRecord};

/// Request to create an assessment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAssessmentRequest {
    pub operator_id: String,
    /// Framework name, e.g. `eu_space_act`.
    pub framework: String,
    /// Questionnaire answers for the framework.
    #[schema(value_type = Object)]
    pub profile: serde_json::Value,
    /// Initial statuses keyed by requirement id.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub statuses: Option<StatusMap>,
}

impl Validate for CreateAssessmentRequest {
    fn validate(&self) -> Result<(), String> {
        OperatorId::new(self.operator_id.as_str()).map_err(|e| e.to_string())?;
        if !self.profile.is_object() {
            return Err("profile must be a JSON object".to_string());
        }
        Ok(())
    }
}

/// Request to record one requirement's status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(value_type = String, example = "compliant")]
    pub status: RequirementStatus,
    /// Replaces the note for the requirement. An empty string clears it.
    #[serde(default)]
    pub note: Option<String>,
}

impl Validate for UpdateStatusRequest {
    fn validate(&self) -> Result<(), String> {
        match &self.note {
            Some(note) if note.len() > 4096 => Err("note must be at most 4096 bytes".to_string()),
            _ => Ok(()),
        }
    }
}

/// Query parameters for listing assessments.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAssessmentsQuery {
    /// Only assessments of this framework.
    pub framework: Option<String>,
}

/// Score slice of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub assessment_id: Uuid,
    pub framework: Framework,
    pub catalog_version: String,
    pub score: ComplianceScore,
    pub risk_level: RiskLevel,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/assessments", get(list_assessments).post(create_assessment))
        .route(
            "/v1/assessments/:id",
            get(get_assessment).delete(delete_assessment),
        )
        .route(
            "/v1/assessments/:id/requirements/:requirement_id",
            patch(update_requirement_status),
        )
        .route("/v1/assessments/:id/report", get(get_report))
        .route("/v1/assessments/:id/score", get(get_score))
        .route("/v1/assessments/:id/gaps", get(get_gaps))
        .route("/v1/assessments/:id/recommendations", get(get_recommendations))
}

fn load(state: &AppState, id: Uuid) -> Result<AssessmentRecord, AppError> {
    state
        .assessments
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("assessment {id} not found")))
}

fn evaluate(record: &AssessmentRecord) -> Result<AssessmentReport, AppError> {
    Ok(assess_value(
        record.framework,
        &record.profile,
        &record.statuses,
        Utc::now(),
    )?)
}

/// POST /v1/assessments: create an assessment.
#[utoipa::path(
    post,
    path = "/v1/assessments",
    request_body = CreateAssessmentRequest,
    responses(
        (status = 201, description = "Assessment created", body = AssessmentRecord),
        (status = 400, description = "Malformed body or unknown framework", body = crate::error::ErrorBody),
        (status = 422, description = "Profile or statuses failed validation", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn create_assessment(
    State(state): State<AppState>,
    body: Result<Json<CreateAssessmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AssessmentRecord>), AppError> {
    let req = extract_validated_json(body)?;
    let operator_id = OperatorId::new(req.operator_id)?;
    let framework = parse_framework(&req.framework)?;

    applicable_summaries(framework, &req.profile)?;
    let statuses = req.statuses.unwrap_or_default();
    for requirement_id in statuses.keys() {
        validate_status_update(framework, &req.profile, requirement_id)?;
    }

    let id = *AssessmentId::new().as_uuid();
    let now = Utc::now();
    let record = AssessmentRecord {
        id,
        operator_id: operator_id.as_str().to_string(),
        framework,
        profile: req.profile,
        statuses,
        notes: BTreeMap::new(),
        created_at: now,
        updated_at: now,
    };
    state.assessments.insert(id, record.clone());

    tracing::info!(
        assessment_id = %id,
        framework = %framework,
        operator_id = %record.operator_id,
        "assessment created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/assessments: list assessments, oldest first.
#[utoipa::path(
    get,
    path = "/v1/assessments",
    params(ListAssessmentsQuery),
    responses(
        (status = 200, description = "Stored assessments", body = Vec<AssessmentRecord>),
        (status = 400, description = "Unknown framework", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn list_assessments(
    State(state): State<AppState>,
    query: Result<Query<ListAssessmentsQuery>, QueryRejection>,
) -> Result<Json<Vec<AssessmentRecord>>, AppError> {
    let query = extract_query(query)?;
    let filter = query.framework.as_deref().map(parse_framework).transpose()?;
    let mut records: Vec<AssessmentRecord> = state
        .assessments
        .list()
        .into_iter()
        .filter(|r| filter.map_or(true, |f| r.framework == f))
        .collect();
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    Ok(Json(records))
}

/// GET /v1/assessments/:id: stored record.
#[utoipa::path(
    get,
    path = "/v1/assessments/{id}",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    responses(
        (status = 200, description = "Assessment", body = AssessmentRecord),
        (status = 400, description = "Malformed assessment id", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn get_assessment(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AssessmentRecord>, AppError> {
    let id = extract_path(path)?;
    Ok(Json(load(&state, id)?))
}

/// DELETE /v1/assessments/:id
#[utoipa::path(
    delete,
    path = "/v1/assessments/{id}",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed assessment id", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn delete_assessment(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = extract_path(path)?;
    state
        .assessments
        .remove(&id)
        .ok_or_else(|| AppError::not_found(format!("assessment {id} not found")))?;
    tracing::info!(assessment_id = %id, "assessment deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /v1/assessments/:id/requirements/:requirement_id: record a status.
///
/// The requirement must belong to the assessment's framework and apply to
/// its profile.
#[utoipa::path(
    patch,
    path = "/v1/assessments/{id}/requirements/{requirement_id}",
    params(
        ("id" = Uuid, Path, description = "Assessment ID"),
        ("requirement_id" = String, Path, description = "Requirement ID, e.g. nis2.art23"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated assessment", body = AssessmentRecord),
        (status = 400, description = "Malformed assessment id or body", body = crate::error::ErrorBody),
        (status = 404, description = "Assessment not found", body = crate::error::ErrorBody),
        (status = 422, description = "Unknown or non-applicable requirement", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn update_requirement_status(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, String)>, PathRejection>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<AssessmentRecord>, AppError> {
    let (id, requirement_id) = extract_path(path)?;
    let req = extract_validated_json(body)?;

    let updated = state
        .assessments
        .try_update(&id, |record| -> Result<AssessmentRecord, AppError> {
            validate_status_update(record.framework, &record.profile, &requirement_id)?;
            record.statuses.insert(requirement_id.clone(), req.status);
            match req.note {
                Some(note) if note.is_empty() => {
                    record.notes.remove(&requirement_id);
                }
                Some(note) => {
                    record.notes.insert(requirement_id.clone(), note);
                }
                None => {}
            }
            record.updated_at = Utc::now();
            Ok(record.clone())
        })
        .ok_or_else(|| AppError::not_found(format!("assessment {id} not found")))??;

    tracing::info!(
        assessment_id = %id,
        requirement_id = %requirement_id,
        status = %req.status,
        "requirement status recorded"
    );
    Ok(Json(updated))
}

/// GET /v1/assessments/:id/report: full evaluation.
#[utoipa::path(
    get,
    path = "/v1/assessments/{id}/report",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    responses(
        (status = 200, description = "Classification, score, gaps, recommendations"),
        (status = 400, description = "Malformed assessment id", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn get_report(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AssessmentReport>, AppError> {
    let id = extract_path(path)?;
    let record = load(&state, id)?;
    Ok(Json(evaluate(&record)?))
}

/// GET /v1/assessments/:id/score
#[utoipa::path(
    get,
    path = "/v1/assessments/{id}/score",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    responses(
        (status = 200, description = "Weighted score and risk level"),
        (status = 400, description = "Malformed assessment id", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn get_score(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let id = extract_path(path)?;
    let record = load(&state, id)?;
    let report = evaluate(&record)?;
    Ok(Json(ScoreResponse {
        assessment_id: id,
        framework: report.framework,
        catalog_version: report.catalog_version,
        score: report.score,
        risk_level: report.risk_level,
    }))
}

/// GET /v1/assessments/:id/gaps
#[utoipa::path(
    get,
    path = "/v1/assessments/{id}/gaps",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    responses(
        (status = 200, description = "Unmet requirements, most severe first"),
        (status = 400, description = "Malformed assessment id", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn get_gaps(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<Gap>>, AppError> {
    let id = extract_path(path)?;
    let record = load(&state, id)?;
    Ok(Json(evaluate(&record)?.gaps))
}

/// GET /v1/assessments/:id/recommendations
#[utoipa::path(
    get,
    path = "/v1/assessments/{id}/recommendations",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    responses(
        (status = 200, description = "One action per gap, in gap order"),
        (status = 400, description = "Malformed assessment id", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn get_recommendations(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    let id = extract_path(path)?;
    let record = load(&state, id)?;
    Ok(Json(evaluate(&record)?.recommendations))
}
