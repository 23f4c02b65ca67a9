//! # Bearer Token Authentication
//!
//! A single shared bearer token guards every `/v1/*` route. When no token is
//! configured, authentication is disabled and all requests pass through.
//! Health probes and `/metrics` are mounted outside this middleware.

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use subtle::ConstantTimeEq;

use crate::error::{ErrorBody, ErrorDetail};

/// Bearer token held in memory. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretToken(String);

impl SecretToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretToken([REDACTED])")
    }
}

/// Expected token, carried as a request extension.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token: Option<SecretToken>,
}

/// Token equality in constant time. A length mismatch still performs a
/// full-length comparison.
fn constant_time_token_eq(candidate: &str, configured: &str) -> bool {
    let (candidate, configured) = (candidate.as_bytes(), configured.as_bytes());
    if candidate.len() == configured.len() {
        return candidate.ct_eq(configured).into();
    }
    let _ = configured.ct_eq(configured);
    false
}

/// Reject requests whose `Authorization: Bearer` token does not match the
/// configured one.
pub async fn auth_middleware(request: Request, next: Next) -> Response {
    let expected = request
        .extensions()
        .get::<AuthConfig>()
        .and_then(|c| c.token.clone());

    let Some(expected) = expected else {
        return next.run(request).await;
    };

    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer "));

    let reason = match presented {
        Some(Some(token)) if constant_time_token_eq(token, expected.expose()) => {
            return next.run(request).await;
        }
        Some(Some(_)) => "invalid bearer token",
        Some(None) => "authorization header must use Bearer scheme",
        None => "missing authorization header",
    };
    tracing::warn!(path = %request.uri().path(), reason, "rejected unauthenticated request");
    unauthorized_response(reason)
}

fn unauthorized_response(reason: &'static str) -> Response {
    let detail = ErrorDetail {
        code: String::from("UNAUTHORIZED"),
        message: String::from(reason),
        details: None,
    };
    (StatusCode::UNAUTHORIZED, Json(ErrorBody { error: detail })).into_response()
}
