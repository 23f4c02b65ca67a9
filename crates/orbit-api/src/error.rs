//! # API Error Types
//!
//! [`AppError`] maps [`OrbitError`] from the engines to HTTP status codes and returns a
//! JSON body with a machine-readable code and a message. Internal error
//! details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use orbit_core::{OrbitError, ValidationError};

/// `{"error": {...}}` envelope returned for every failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable code such as `VALIDATION_ERROR`.
    pub code: String,
    /// Message for humans.
    pub message: String,
    /// Structured context, when a handler has any.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

/// Handler error, rendered as an [`ErrorBody`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown assessment id (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed request: unparseable JSON, unknown framework, unknown
    /// enum value in a questionnaire (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Questionnaire or status update failed validation (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or invalid bearer token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Catalog or serialization failure (500). Logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// 404 with `msg`.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if let Self::Internal(_) = &self {
            tracing::error!(error = %self, "request failed with an internal error");
            String::from("An internal error occurred")
        } else {
            self.to_string()
        };

        let detail = ErrorDetail {
            code: code.to_owned(),
            message,
            details: None,
        };
        (status, Json(ErrorBody { error: detail })).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<OrbitError> for AppError {
    fn from(err: OrbitError) -> Self {
        match err {
            OrbitError::Validation(e) => Self::Validation(e.to_string()),
            OrbitError::UnknownRequirement { .. } => Self::Validation(err.to_string()),
            OrbitError::UnknownFramework(_) | OrbitError::Json(_) => {
                Self::BadRequest(err.to_string())
            }
            OrbitError::Catalog(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_core::Framework;

    #[test]
    fn not_found_status_code() {
        let err = AppError::NotFound("missing assessment".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }

    #[test]
    fn bad_request_is_400() {
        let (status, code) = AppError::BadRequest("x".into()).status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "BAD_REQUEST");
    }

    #[test]
    fn validation_error_maps_to_422() {
        let err: AppError = ValidationError::MissingField {
            field: "orbit regime",
        }
        .into();
        let (status, _) = err.status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.to_string().contains("orbit regime is required"));
    }

    #[test]
    fn orbit_error_mapping() {
        let unknown: AppError = OrbitError::UnknownFramework("gdpr".into()).into();
        assert!(matches!(unknown, AppError::BadRequest(_)));

        let requirement: AppError = OrbitError::UnknownRequirement {
            framework: Framework::Nis2,
            id: "nis2.nope".into(),
        }
        .into();
        assert!(matches!(requirement, AppError::Validation(_)));

        let catalog: AppError = OrbitError::Catalog("dangling".into()).into();
        assert!(matches!(catalog, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn internal_message_is_not_exposed() {
        use http_body_util::BodyExt;

        let response = AppError::Internal("lock poisoned at line 42".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert!(!body.error.message.contains("line 42"));
    }
}
