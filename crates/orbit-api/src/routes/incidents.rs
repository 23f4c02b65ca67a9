//! # Incident Classification
//!
//! `POST /v1/incidents/classify` grades an incident report and lists the
//! notifications it triggers, with each deadline's status measured against
//! the server clock and the configured due-soon window.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use orbit_rules::{classify_incident, IncidentClassification, IncidentReport};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Incident report: category, detection time, and impact figures.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct IncidentRequest(#[schema(value_type = Object)] pub IncidentReport);

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/incidents/classify", post(classify))
}

/// POST /v1/incidents/classify
#[utoipa::path(
    post,
    path = "/v1/incidents/classify",
    request_body = IncidentRequest,
    responses(
        (status = 200, description = "Severity, NIS2 significance, and notification deadlines"),
        (status = 400, description = "Malformed report", body = crate::error::ErrorBody),
        (status = 422, description = "Report failed validation", body = crate::error::ErrorBody),
    ),
    tag = "incidents"
)]
pub async fn classify(
    State(state): State<AppState>,
    body: Result<Json<IncidentRequest>, JsonRejection>,
) -> Result<Json<IncidentClassification>, AppError> {
    let IncidentRequest(report) = extract_json(body)?;
    let classification = classify_incident(&report, Utc::now(), state.config.due_soon())?;
    Ok(Json(classification))
}
