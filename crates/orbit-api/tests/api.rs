//! # Integration Tests for orbit-api
//!
//! Drives the full router with `tower::ServiceExt::oneshot`: health probes,
//! catalog listing, classification, the assessment lifecycle, incident
//! classification, cross-regulation endpoints, authentication, and the
//! metrics scrape.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use orbit_api::auth::SecretToken;
use orbit_api::state::{AppConfig, AppState};

fn test_app() -> axum::Router {
    orbit_api::app(AppState::new())
}

fn test_app_with_auth(token: &str) -> axum::Router {
    let config = AppConfig {
        auth_token: Some(SecretToken::new(token)),
        ..AppConfig::default()
    };
    orbit_api::app(AppState::with_config(config))
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn nis2_space() -> Value {
    json!({ "sector": "space", "employees": 300, "annual_turnover_eur": 80_000_000.0 })
}

async fn create_nis2_assessment(app: &axum::Router, statuses: Value) -> Value {
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/v1/assessments",
            &json!({
                "operator_id": "orbital-ops-gmbh",
                "framework": "nis2",
                "profile": nis2_space(),
                "statuses": statuses,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Frameworks ---------------------------------------------------------------

#[tokio::test]
async fn test_list_frameworks() {
    let response = test_app().oneshot(get("/v1/frameworks")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let frameworks = body.as_array().unwrap();
    assert_eq!(frameworks.len(), 5);
    for info in frameworks {
        assert_eq!(info["digest"].as_str().unwrap().len(), 64);
        assert!(info["requirement_count"].as_u64().unwrap() > 0);
    }
}

#[tokio::test]
async fn test_list_requirements_accepts_dashed_name() {
    let response = test_app()
        .oneshot(get("/v1/frameworks/eu-space-act/requirements"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["id"].as_str().unwrap().starts_with("esa.")));
}

#[tokio::test]
async fn test_requirement_lookup_lists_related() {
    let response = test_app()
        .oneshot(get("/v1/requirements/esa.res.02"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], "esa.res.02");
    assert_eq!(body["framework"], "eu_space_act");
    assert!(body["related"]
        .as_array()
        .unwrap()
        .iter()
        .any(|id| id == "nis2.art23"));

    let response = test_app()
        .oneshot(get("/v1/requirements/esa.nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_framework_is_400() {
    let response = test_app()
        .oneshot(get("/v1/frameworks/gdpr/requirements"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_classify_nis2() {
    let response = test_app()
        .oneshot(send_json("POST", "/v1/frameworks/nis2/classify", &nis2_space()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["framework"], "nis2");
    assert_eq!(body["classification"]["entity_class"], "essential");
    assert!(body["applicable"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["id"] == "nis2.space.ttc"));
}

#[tokio::test]
async fn test_classify_missing_field_is_422() {
    let response = test_app()
        .oneshot(send_json(
            "POST",
            "/v1/frameworks/copuos/classify",
            &json!({ "perigee_km": 500.0, "apogee_km": 520.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("is required"));
}

#[tokio::test]
async fn test_classify_unknown_enum_is_400() {
    let response = test_app()
        .oneshot(send_json(
            "POST",
            "/v1/frameworks/nis2/classify",
            &json!({ "sector": "mining" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/frameworks/nis2/classify")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Assessments --------------------------------------------------------------

#[tokio::test]
async fn test_assessment_lifecycle() {
    let app = test_app();
    let created = create_nis2_assessment(&app, json!({ "nis2.art23": "non_compliant" })).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["framework"], "nis2");
    assert_eq!(created["statuses"]["nis2.art23"], "non_compliant");

    // Fetch.
    let response = app
        .clone()
        .oneshot(get(&format!("/v1/assessments/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Gaps reflect the recorded status.
    let response = app
        .clone()
        .oneshot(get(&format!("/v1/assessments/{id}/gaps")))
        .await
        .unwrap();
    let gaps = body_json(response).await;
    assert_eq!(gaps.as_array().unwrap().len(), 1);
    assert_eq!(gaps[0]["requirement_id"], "nis2.art23");

    // Patch the status with a note.
    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            &format!("/v1/assessments/{id}/requirements/nis2.art23"),
            &json!({ "status": "compliant", "note": "24h runbook approved" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["statuses"]["nis2.art23"], "compliant");
    assert_eq!(updated["notes"]["nis2.art23"], "24h runbook approved");

    let response = app
        .clone()
        .oneshot(get(&format!("/v1/assessments/{id}/gaps")))
        .await
        .unwrap();
    assert!(body_json(response).await.as_array().unwrap().is_empty());

    // Score: one critical requirement compliant out of 19 applicable. The
    // rest are unassessed and earn nothing: 6 of 78 half-points.
    let response = app
        .clone()
        .oneshot(get(&format!("/v1/assessments/{id}/score")))
        .await
        .unwrap();
    let score = body_json(response).await;
    assert_eq!(score["score"]["achieved_half_points"], 6);
    assert_eq!(score["score"]["possible_half_points"], 78);
    assert_eq!(score["score"]["score"], 8);
    // No open critical gaps, so the band alone decides.
    assert_eq!(score["risk_level"], "critical");

    // Full report.
    let response = app
        .clone()
        .oneshot(get(&format!("/v1/assessments/{id}/report")))
        .await
        .unwrap();
    let report = body_json(response).await;
    assert_eq!(report["classification"]["framework"], "nis2");
    assert!(!report["unassessed"].as_array().unwrap().is_empty());

    // Delete, then 404.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/assessments/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/v1/assessments/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_all_compliant_scores_100() {
    let app = test_app();
    let classified = body_json(
        app.clone()
            .oneshot(send_json("POST", "/v1/frameworks/nis2/classify", &nis2_space()))
            .await
            .unwrap(),
    )
    .await;
    let statuses: serde_json::Map<String, Value> = classified["applicable"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| (r["id"].as_str().unwrap().to_string(), json!("compliant")))
        .collect();
    assert_eq!(statuses.len(), 19);

    let created = create_nis2_assessment(&app, Value::Object(statuses)).await;
    let id = created["id"].as_str().unwrap();

    let score = body_json(
        app.clone()
            .oneshot(get(&format!("/v1/assessments/{id}/score")))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(score["score"]["score"], 100);
    assert_eq!(score["risk_level"], "low");

    let report = body_json(
        app.oneshot(get(&format!("/v1/assessments/{id}/report")))
            .await
            .unwrap(),
    )
    .await;
    assert!(report["gaps"].as_array().unwrap().is_empty());
    assert!(report["unassessed"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_note_clears_stored_note() {
    let app = test_app();
    let created = create_nis2_assessment(&app, json!({})).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/v1/assessments/{id}/requirements/nis2.art23");

    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            &uri,
            &json!({ "status": "partial", "note": "tabletop exercise pending" }),
        ))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await["notes"]["nis2.art23"],
        "tabletop exercise pending"
    );

    // Omitting the note keeps it.
    let response = app
        .clone()
        .oneshot(send_json("PATCH", &uri, &json!({ "status": "partial" })))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await["notes"]["nis2.art23"],
        "tabletop exercise pending"
    );

    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            &uri,
            &json!({ "status": "compliant", "note": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["statuses"]["nis2.art23"], "compliant");
    assert!(updated["notes"].get("nis2.art23").is_none());
}

#[tokio::test]
async fn test_oversized_note_is_422() {
    let app = test_app();
    let created = create_nis2_assessment(&app, json!({})).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/v1/assessments/{id}/requirements/nis2.art23");

    let response = app
        .clone()
        .oneshot(send_json(
            "PATCH",
            &uri,
            &json!({ "status": "compliant", "note": "x".repeat(4097) }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");

    // Exactly 4096 bytes is accepted.
    let response = app
        .oneshot(send_json(
            "PATCH",
            &uri,
            &json!({ "status": "compliant", "note": "x".repeat(4096) }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_assessment_id_is_json_400() {
    let app = test_app();
    for uri in [
        "/v1/assessments/not-a-uuid",
        "/v1/assessments/not-a-uuid/score",
        "/v1/assessments/not-a-uuid/report",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            response.headers()["content-type"],
            "application/json",
            "{uri}"
        );
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST", "{uri}");
        assert!(!body["error"]["message"].as_str().unwrap().is_empty());
    }

    let response = app
        .oneshot(send_json(
            "PATCH",
            "/v1/assessments/not-a-uuid/requirements/nis2.art23",
            &json!({ "status": "compliant" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_recommendations_follow_gap_order() {
    let app = test_app();
    let created = create_nis2_assessment(
        &app,
        json!({
            "nis2.art21.2a": "partial",
            "nis2.art23": "non_compliant",
            "nis2.art21.2g": "non_compliant"
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let gaps = body_json(
        app.clone()
            .oneshot(get(&format!("/v1/assessments/{id}/gaps")))
            .await
            .unwrap(),
    )
    .await;
    let recs = body_json(
        app.oneshot(get(&format!("/v1/assessments/{id}/recommendations")))
            .await
            .unwrap(),
    )
    .await;

    let gap_ids: Vec<&str> = gaps
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["requirement_id"].as_str().unwrap())
        .collect();
    let rec_ids: Vec<&str> = recs
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["requirement_id"].as_str().unwrap())
        .collect();
    assert_eq!(gap_ids.len(), 3);
    assert_eq!(gap_ids, rec_ids);
}

#[tokio::test]
async fn test_create_rejects_foreign_requirement() {
    let response = test_app()
        .oneshot(send_json(
            "POST",
            "/v1/assessments",
            &json!({
                "operator_id": "op",
                "framework": "nis2",
                "profile": nis2_space(),
                "statuses": { "esa.auth.01": "compliant" }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_rejects_blank_operator() {
    let response = test_app()
        .oneshot(send_json(
            "POST",
            "/v1/assessments",
            &json!({ "operator_id": "  ", "framework": "nis2", "profile": nis2_space() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_patch_non_applicable_requirement_is_422() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/v1/assessments",
            &json!({
                "operator_id": "grid-co",
                "framework": "nis2",
                "profile": { "sector": "energy", "employees": 300, "annual_turnover_eur": 1e6 }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(send_json(
            "PATCH",
            &format!("/v1/assessments/{id}/requirements/nis2.space.ttc"),
            &json!({ "status": "compliant" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_patch_missing_assessment_is_404() {
    let response = test_app()
        .oneshot(send_json(
            "PATCH",
            "/v1/assessments/550e8400-e29b-41d4-a716-446655440000/requirements/nis2.art23",
            &json!({ "status": "compliant" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_by_framework() {
    let app = test_app();
    create_nis2_assessment(&app, json!({})).await;

    let response = app
        .clone()
        .oneshot(get("/v1/assessments?framework=nis2"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(get("/v1/assessments?framework=copuos"))
        .await
        .unwrap();
    assert!(body_json(response).await.as_array().unwrap().is_empty());

    let response = app
        .oneshot(get("/v1/assessments?framework=nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- Incidents ----------------------------------------------------------------

#[tokio::test]
async fn test_incident_classification() {
    let response = test_app()
        .oneshot(send_json(
            "POST",
            "/v1/incidents/classify",
            &json!({
                "category": "cyber_intrusion",
                "detected_at": "2020-03-01T08:00:00Z",
                "cross_border": true,
                "nis2_entity": "essential"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["severity"], "significant");
    assert_eq!(body["nis2_significant"], true);
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 3);
    assert!(notifications.iter().all(|n| n["status"] == "overdue"));
}

#[tokio::test]
async fn test_incident_without_category_is_422() {
    let response = test_app()
        .oneshot(send_json(
            "POST",
            "/v1/incidents/classify",
            &json!({ "detected_at": "2026-03-01T08:00:00Z" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_incident_deadline_past_calendar_end_is_422() {
    let response = test_app()
        .oneshot(send_json(
            "POST",
            "/v1/incidents/classify",
            &json!({
                "category": "cyber_intrusion",
                "detected_at": "+262142-12-31T00:00:00Z",
                "safety_impact": true,
                "personal_data_involved": true,
                "nis2_entity": "essential"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("detection time"));
}

// -- Cross-regulation ---------------------------------------------------------

#[tokio::test]
async fn test_overlap_across_frameworks() {
    let response = test_app()
        .oneshot(send_json(
            "POST",
            "/v1/cross-regulation/overlap",
            &json!({
                "profiles": {
                    "nis2": nis2_space(),
                    "eu_space_act": {
                        "operator_type": "spacecraft_operator",
                        "establishment": "eu",
                        "orbit": "leo",
                        "employees": 300,
                        "annual_turnover_eur": 80_000_000.0
                    }
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["frameworks"], json!(["eu_space_act", "nis2"]));
    assert!(!body["overlaps"].as_array().unwrap().is_empty());
    assert!(body["effort_reduction_percent"].as_u64().unwrap() > 0);
    assert!(body["cross_references"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["from"] == "esa.res.02" && e["to"] == "nis2.art23"));
}

#[tokio::test]
async fn test_overlap_requires_profiles() {
    let response = test_app()
        .oneshot(send_json(
            "POST",
            "/v1/cross-regulation/overlap",
            &json!({ "profiles": {} }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_overlap_rejects_duplicate_framework_spelling() {
    let response = test_app()
        .oneshot(send_json(
            "POST",
            "/v1/cross-regulation/overlap",
            &json!({ "profiles": { "nis2": nis2_space(), "NIS2": nis2_space() } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("more than once"));
}

#[tokio::test]
async fn test_evidence_reuse() {
    let response = test_app()
        .oneshot(send_json(
            "POST",
            "/v1/cross-regulation/evidence-reuse",
            &json!({
                "statuses": {
                    "nis2": { "nis2.art23": "compliant" },
                    "eu_space_act": {}
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.as_array().unwrap().iter().any(|s| {
        s["source_id"] == "nis2.art23" && s["target_id"] == "esa.res.02"
    }));
}

// -- Authentication -----------------------------------------------------------

#[tokio::test]
async fn test_auth_required_when_configured() {
    let app = test_app_with_auth("orbit-secret");

    let response = app.clone().oneshot(get("/v1/frameworks")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/v1/frameworks")
        .header("Authorization", "Bearer orbit-secret")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Probes stay open.
    let response = app.oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- OpenAPI and Metrics ------------------------------------------------------

#[tokio::test]
async fn test_openapi_document_served() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/v1/assessments"].is_object());
}

#[tokio::test]
async fn test_metrics_scrape_counts_assessments() {
    let app = test_app();
    create_nis2_assessment(&app, json!({ "nis2.art23": "partial" })).await;

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("orbit_assessments_total{framework=\"nis2\"} 1"));
    assert!(body.contains("orbit_open_gaps_total{framework=\"nis2\"} 1"));
    assert!(body.contains("orbit_http_requests_total"));
}
