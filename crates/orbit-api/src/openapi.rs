//! # OpenAPI Document
//!
//! Assembles the utoipa-documented routes into one OpenAPI document served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Adds the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some(
                            "Shared bearer token. Set via the AUTH_TOKEN env var; unset disables auth.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orbit Compliance API",
        description = "Regulatory compliance engines for space operators.\n\nProvides:\n- **Framework catalogs** for the EU Space Act, NIS2, COPUOS/IADC, ITAR/EAR and ITU spectrum\n- **Classification** of operator questionnaires and the requirements that apply\n- **Assessments** with weighted scores, gap analyses and recommendations\n- **Incident classification** with notification deadlines\n- **Cross-regulation overlap** and evidence reuse\n\nAll `/v1/*` endpoints require `Authorization: Bearer <token>` when a token is configured. Health probes are unauthenticated.",
        license(name = "BUSL-1.1"),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    paths(
        crate::routes::frameworks::list_frameworks,
        crate::routes::frameworks::list_requirements,
        crate::routes::frameworks::classify,
        crate::routes::frameworks::get_requirement,
        crate::routes::assessments::create_assessment,
        crate::routes::assessments::list_assessments,
        crate::routes::assessments::get_assessment,
        crate::routes::assessments::delete_assessment,
        crate::routes::assessments::update_requirement_status,
        crate::routes::assessments::get_report,
        crate::routes::assessments::get_score,
        crate::routes::assessments::get_gaps,
        crate::routes::assessments::get_recommendations,
        crate::routes::incidents::classify,
        crate::routes::cross_regulation::overlap,
        crate::routes::cross_regulation::evidence_reuse,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::state::AssessmentRecord,
        crate::routes::frameworks::QuestionnaireBody,
        crate::routes::assessments::CreateAssessmentRequest,
        crate::routes::assessments::UpdateStatusRequest,
        crate::routes::incidents::IncidentRequest,
        crate::routes::cross_regulation::OverlapRequest,
        crate::routes::cross_regulation::EvidenceReuseRequest,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "frameworks", description = "Requirement catalogs and classification"),
        (name = "assessments", description = "Assessment tracking and derived reports"),
        (name = "incidents", description = "Incident severity and notification deadlines"),
        (name = "cross-regulation", description = "Overlap analysis and evidence reuse"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
