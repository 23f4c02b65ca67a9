//! # Framework Catalogs and Classification
//!
//! - `GET /v1/frameworks`: version, size, and digest of every catalog
//! - `GET /v1/frameworks/:framework/requirements`: full catalog
//! - `POST /v1/frameworks/:framework/classify`: classify a questionnaire
//! - `GET /v1/requirements/:requirement_id`: one requirement and its cross-references

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use orbit_core::Framework;
use orbit_rules::cross_regulation::related_requirements;
use orbit_rules::{
    catalog_info, catalog_summaries, classify_value, find_requirement, CatalogInfo,
    ClassificationResult, RequirementSummary,
};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_path};
use crate::state::AppState;

/// Questionnaire answers for one framework, as free-form JSON.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct QuestionnaireBody(#[schema(value_type = Object)] pub serde_json::Value);

/// A requirement with the ids it is linked to in other catalogs.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementDetail {
    #[serde(flatten)]
    pub requirement: RequirementSummary,
    /// Both directions of the cross-reference graph.
    pub related: Vec<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/frameworks", get(list_frameworks))
        .route("/v1/frameworks/:framework/requirements", get(list_requirements))
        .route("/v1/frameworks/:framework/classify", post(classify))
        .route("/v1/requirements/:requirement_id", get(get_requirement))
}

/// Parse a framework path or query segment; unknown names are a 400.
pub(crate) fn parse_framework(raw: &str) -> Result<Framework, AppError> {
    Ok(raw.parse::<Framework>()?)
}

/// GET /v1/frameworks: catalog info for every framework.
#[utoipa::path(
    get,
    path = "/v1/frameworks",
    responses(
        (status = 200, description = "Catalog version, size, and digest per framework"),
    ),
    tag = "frameworks"
)]
pub async fn list_frameworks() -> Result<Json<Vec<CatalogInfo>>, AppError> {
    let infos = Framework::all()
        .iter()
        .map(|f| catalog_info(*f))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(infos))
}

/// GET /v1/frameworks/:framework/requirements: catalog summaries.
#[utoipa::path(
    get,
    path = "/v1/frameworks/{framework}/requirements",
    params(("framework" = String, Path, description = "Framework name, e.g. eu_space_act")),
    responses(
        (status = 200, description = "Every requirement of the catalog, in catalog order"),
        (status = 400, description = "Unknown framework", body = crate::error::ErrorBody),
    ),
    tag = "frameworks"
)]
pub async fn list_requirements(
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<RequirementSummary>>, AppError> {
    let framework = parse_framework(&extract_path(path)?)?;
    Ok(Json(catalog_summaries(framework)))
}

/// POST /v1/frameworks/:framework/classify: classification plus
/// applicable requirements.
#[utoipa::path(
    post,
    path = "/v1/frameworks/{framework}/classify",
    params(("framework" = String, Path, description = "Framework name, e.g. nis2")),
    request_body = QuestionnaireBody,
    responses(
        (status = 200, description = "Classification and applicable requirements"),
        (status = 400, description = "Unknown framework or malformed questionnaire", body = crate::error::ErrorBody),
        (status = 422, description = "Questionnaire failed validation", body = crate::error::ErrorBody),
    ),
    tag = "frameworks"
)]
pub async fn classify(
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<QuestionnaireBody>, JsonRejection>,
) -> Result<Json<ClassificationResult>, AppError> {
    let framework = parse_framework(&extract_path(path)?)?;
    let QuestionnaireBody(questionnaire) = extract_json(body)?;
    let result = classify_value(framework, &questionnaire)?;
    tracing::info!(
        framework = %framework,
        applicable = result.applicable.len(),
        "questionnaire classified"
    );
    Ok(Json(result))
}

/// GET /v1/requirements/:requirement_id
#[utoipa::path(
    get,
    path = "/v1/requirements/{requirement_id}",
    params(("requirement_id" = String, Path, description = "Global requirement id, e.g. nis2.art23")),
    responses(
        (status = 200, description = "Requirement summary with related requirement ids"),
        (status = 404, description = "No catalog has this id", body = crate::error::ErrorBody),
    ),
    tag = "frameworks"
)]
pub async fn get_requirement(
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<RequirementDetail>, AppError> {
    let requirement_id = extract_path(path)?;
    let requirement = find_requirement(&requirement_id)
        .ok_or_else(|| AppError::not_found(format!("requirement {requirement_id} not found")))?;
    let related = related_requirements(&requirement.id);
    Ok(Json(RequirementDetail {
        requirement,
        related,
    }))
}
