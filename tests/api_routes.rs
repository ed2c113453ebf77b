//! Router-level tests that never touch the database: authentication,
//! authorization and request validation all reject before any query runs.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use common::{admin_token, offline_app, send, user_token};

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = offline_app();

    for uri in [
        "/api/v1/admin/articles",
        "/api/v1/admin/reports",
        "/api/v1/admin/stats",
        "/api/v1/admin/logs",
        "/api/v1/admin/notifications",
    ] {
        let (status, body) = send(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_malformed_token_rejected() {
    let app = offline_app();
    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/admin/articles",
        Some("not.a.jwt"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_non_admin_is_forbidden() {
    let app = offline_app();
    let token = user_token();
    let id = Uuid::new_v4();

    let (status, body) = send(&app, "GET", "/api/v1/admin/articles", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/admin/articles/{}/reject", id),
        Some(&token),
        Some(json!({ "reason": "spam" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_article_list_query_validation() {
    let app = offline_app();
    let token = admin_token();

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/admin/articles?status=deleted",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        "GET",
        "/api/v1/admin/articles?min_price=5000&max_price=100",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "GET",
        "/api/v1/admin/articles?created_from=last-tuesday",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown sort column never reaches SQL
    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/admin/articles?sort_by=password_hash",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_article_action_payload_validation() {
    let app = offline_app();
    let token = admin_token();
    let id = Uuid::new_v4();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/admin/articles/{}/reject", id),
        Some(&token),
        Some(json!({ "reason": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/admin/articles/{}/feature", id),
        Some(&token),
        Some(json!({ "featured": true, "duration_days": 365 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bulk_moderation_limits() {
    let app = offline_app();
    let token = admin_token();

    let too_many: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/admin/articles/bulk",
        Some(&token),
        Some(json!({ "ids": too_many, "action": "approve" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/admin/articles/bulk",
        Some(&token),
        Some(json!({ "ids": [Uuid::new_v4()], "action": "reject" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "reject without reason");
}

#[tokio::test]
async fn test_handle_report_consistency() {
    let app = offline_app();
    let token = admin_token();
    let id = Uuid::new_v4();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/admin/reports/{}/handle", id),
        Some(&token),
        Some(json!({ "resolution": "dismissed", "action": "ban_user" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "GET",
        "/api/v1/admin/reports?reason=boredom",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_input_uses_error_envelope() {
    let app = offline_app();
    let token = admin_token();
    let id = Uuid::new_v4();

    let cases = [
        ("POST", format!("/api/v1/admin/articles/{}/reject", id), Some(json!({}))),
        (
            "POST",
            format!("/api/v1/admin/reports/{}/handle", id),
            Some(json!({ "resolution": "closed" })),
        ),
        ("GET", "/api/v1/admin/articles?sort_by=bogus".to_string(), None),
        ("GET", "/api/v1/admin/reports?page=first".to_string(), None),
        ("GET", "/api/v1/admin/articles/not-a-uuid".to_string(), None),
    ];

    for (method, uri, body) in cases {
        let (status, json) = send(&app, method, &uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR", "{} {}", method, uri);
        assert!(json["error"]["message"].is_string(), "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_ban_options_require_ban_action() {
    let app = offline_app();
    let token = admin_token();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/admin/reports/{}/handle", Uuid::new_v4()),
        Some(&token),
        Some(json!({ "resolution": "resolved", "ban_duration_hours": 24 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_stats_and_log_query_validation() {
    let app = offline_app();
    let token = admin_token();

    let (status, _) = send(
        &app,
        "GET",
        "/api/v1/admin/stats/trends?days=0",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "GET",
        "/api/v1/admin/logs?target_type=listing",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_database_outage() {
    let app = offline_app();
    let (status, body) = send(&app, "GET", "/api/v1/health", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "unavailable");
    assert_eq!(body["redis"], "disabled");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = offline_app();
    let request = Request::builder()
        .uri("/api/v1/admin/articles")
        .header("x-request-id", "trace-1234")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["x-request-id"], "trace-1234");
}
