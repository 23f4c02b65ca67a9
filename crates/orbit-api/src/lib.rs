//! # orbit-api: REST Service for the Orbit Compliance Stack
//!
//! A thin Axum layer over the `orbit-rules` engines. Questionnaires and
//! statuses come in as JSON, engine results go out as JSON. Assessments are
//! kept in memory; everything derived from them is recomputed per request.
//!
//! ## API Surface
//!
//! | Prefix                    | Module                       | Purpose                           |
//! |---------------------------|------------------------------|-----------------------------------|
//! | `/v1/frameworks/*`        | [`routes::frameworks`]       | Catalogs, classification          |
//! | `/v1/requirements/*`      | [`routes::frameworks`]       | Requirement lookup                |
//! | `/v1/assessments/*`       | [`routes::assessments`]      | Assessment CRUD, score, gaps      |
//! | `/v1/incidents/*`         | [`routes::incidents`]        | Incident notification deadlines   |
//! | `/v1/cross-regulation/*`  | [`routes::cross_regulation`] | Overlap, evidence reuse           |
//! | `/openapi.json`           | [`openapi`]                  | OpenAPI document                  |
//! | `/health/*`, `/metrics`   | this module                  | Probes and Prometheus scrape      |
//!
//! ## Middleware Stack
//!
//! ```text
//! TraceLayer → MetricsMiddleware → AuthMiddleware → Handler
//! ```
//!
//! Health probes and `/metrics` are mounted outside the auth layer.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::collections::BTreeMap;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use orbit_core::Framework;
use orbit_rules::catalog_info;

use crate::auth::AuthConfig;
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };

    let metrics = match ApiMetrics::new() {
        Ok(m) => Some(m),
        Err(e) => {
            tracing::warn!(error = %e, "metrics registry unavailable, /metrics disabled");
            None
        }
    };

    let mut api = Router::new()
        .merge(routes::frameworks::router())
        .merge(routes::assessments::router())
        .merge(routes::incidents::router())
        .merge(routes::cross_regulation::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(from_fn(auth::auth_middleware));

    if let Some(m) = &metrics {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(m.clone()));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .layer(Extension(auth_config))
        .with_state(state.clone());

    let mut unauthenticated = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if let Some(m) = metrics {
        unauthenticated = unauthenticated
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(Extension(m));
    }

    Router::new()
        .merge(unauthenticated.with_state(state))
        .merge(api)
}

async fn liveness() -> &'static str {
    "ok"
}

/// Ready once every catalog serializes and digests.
async fn readiness() -> impl IntoResponse {
    match Framework::all().iter().try_for_each(|f| catalog_info(*f).map(|_| ())) {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::error!(error = %e, "catalog failed to load");
            (StatusCode::SERVICE_UNAVAILABLE, "catalogs unavailable")
        }
    }
}

/// GET /metrics: Prometheus scrape. Assessment gauges are refreshed from
/// the store first.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    let mut assessments: BTreeMap<Framework, usize> = BTreeMap::new();
    let mut open_gaps: BTreeMap<Framework, usize> = BTreeMap::new();
    for record in state.assessments.list() {
        *assessments.entry(record.framework).or_default() += 1;
        *open_gaps.entry(record.framework).or_default() +=
            record.statuses.values().filter(|s| s.is_gap()).count();
    }

    metrics.assessments_total().reset();
    metrics.open_gaps_total().reset();
    for framework in Framework::all() {
        let label = [framework.as_str()];
        let count = assessments.get(framework).copied().unwrap_or(0);
        let gaps = open_gaps.get(framework).copied().unwrap_or(0);
        metrics.assessments_total().with_label_values(&label).set(count as f64);
        metrics.open_gaps_total().with_label_values(&label).set(gaps as f64);
    }

    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
