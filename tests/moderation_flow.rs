//! End-to-end moderation flows against a real PostgreSQL.
//!
//! These start a Docker container and are ignored by default:
//! `cargo test -- --ignored`

mod common;

use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::net::TcpListener;
use uuid::Uuid;

use marketmod::{
    constants::roles,
    create_router, db,
    services::AuthService,
    state::AppState,
};

const ADMIN_PASSWORD: &str = "moderator-pass";

struct TestServer {
    _container: ContainerAsync<Postgres>,
    pool: PgPool,
    base_url: String,
    client: Client,
}

impl TestServer {
    async fn start() -> Self {
        let container = Postgres::default()
            .with_user("marketmod")
            .with_password("marketmod_test")
            .with_db_name("marketmod_test")
            .with_tag("16-alpine")
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(5432).await.unwrap();
        let database_url = format!(
            "postgres://marketmod:marketmod_test@{}:{}/marketmod_test",
            host, port
        );

        let config = common::test_config(&database_url);
        let pool = db::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");
        db::run_migrations(&pool).await.expect("Failed to run migrations");

        let app = create_router(AppState::new(pool.clone(), None, config));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        Self {
            _container: container,
            pool,
            base_url: format!("http://{}/api/v1", addr),
            client: Client::new(),
        }
    }

    async fn insert_user(&self, username: &str, role: &str) -> Uuid {
        let hash = AuthService::hash_password(ADMIN_PASSWORD).unwrap();
        sqlx::query_scalar(
            "INSERT INTO users (username, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(username)
        .bind(format!("{}@example.com", username))
        .bind(hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .unwrap()
    }

    async fn insert_article(
        &self,
        author_id: Uuid,
        title: &str,
        status: &str,
        price: i64,
        ai_score: Option<f64>,
    ) -> Uuid {
        sqlx::query_scalar(
            r#"
            INSERT INTO articles (author_id, title, category, price, status, ai_score, ai_flags)
            VALUES ($1, $2, 'electronics', $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(author_id)
        .bind(title)
        .bind(price)
        .bind(status)
        .bind(ai_score)
        .bind(vec!["price_anomaly".to_string()])
        .fetch_one(&self.pool)
        .await
        .unwrap()
    }

    async fn insert_report(
        &self,
        reporter_id: Uuid,
        reported_user_id: Option<Uuid>,
        reported_article_id: Option<Uuid>,
        reason: &str,
    ) -> Uuid {
        sqlx::query_scalar(
            r#"
            INSERT INTO user_reports (reporter_id, reported_user_id, reported_article_id, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(reporter_id)
        .bind(reported_user_id)
        .bind(reported_article_id)
        .bind(reason)
        .fetch_one(&self.pool)
        .await
        .unwrap()
    }

    async fn report_status(&self, id: Uuid) -> String {
        sqlx::query_scalar("SELECT status FROM user_reports WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    async fn login(&self, identifier: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&json!({ "identifier": identifier, "password": ADMIN_PASSWORD }))
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn get(&self, token: &str, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }

    async fn post(&self, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap_or(Value::Null))
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_article_moderation_flow() {
    let server = TestServer::start().await;
    let admin_id = server.insert_user("mod_anna", roles::ADMIN).await;
    let seller = server.insert_user("seller_bob", roles::USER).await;
    let buyer = server.insert_user("buyer_cai", roles::USER).await;

    let pending = server
        .insert_article(seller, "iPhone 15 Pro", "pending", 95_000, Some(0.92))
        .await;
    let other = server
        .insert_article(seller, "Desk lamp", "pending", 1_500, None)
        .await;
    server
        .insert_report(buyer, None, Some(pending), "counterfeit")
        .await;

    // Only admins may sign in
    let (status, _) = server.login("seller_bob").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = server.login("mod_anna@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], admin_id.to_string());
    let token = body["access_token"].as_str().unwrap().to_string();

    // Filtering and sorting
    let (status, body) = server
        .get(&token, "/admin/articles?status=pending&ai_flagged=true")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["articles"][0]["id"], pending.to_string());
    assert_eq!(body["articles"][0]["open_report_count"], 1);

    let (_, body) = server
        .get(&token, "/admin/articles?sort_by=price&sort_order=asc")
        .await;
    assert_eq!(body["articles"][0]["id"], other.to_string());

    // Detail
    let (status, body) = server
        .get(&token, &format!("/admin/articles/{}", pending))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["username"], "seller_bob");
    assert_eq!(body["ai_analysis"]["flagged"], true);
    assert_eq!(body["report_total"], 1);

    // Featuring requires approval first
    let (status, _) = server
        .post(
            &token,
            &format!("/admin/articles/{}/feature", pending),
            json!({ "featured": true }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = server
        .post(&token, &format!("/admin/articles/{}/approve", pending), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["reviewed_by"], admin_id.to_string());

    let (status, _) = server
        .post(&token, &format!("/admin/articles/{}/approve", pending), json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = server
        .post(
            &token,
            &format!("/admin/articles/{}/feature", pending),
            json!({ "featured": true, "duration_days": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_featured"], true);

    // Rejection clears featuring
    let (status, body) = server
        .post(
            &token,
            &format!("/admin/articles/{}/reject", pending),
            json!({ "reason": "Suspected counterfeit" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["is_featured"], false);
    assert_eq!(body["rejection_reason"], "Suspected counterfeit");

    // Bulk: one approvable, one missing
    let missing = Uuid::new_v4();
    let (status, body) = server
        .post(
            &token,
            "/admin/articles/bulk",
            json!({ "ids": [other, missing], "action": "approve" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], json!([other]));
    assert_eq!(body["skipped"][0]["id"], missing.to_string());

    // Every change is in the audit trail, with the client address
    let (status, body) = server
        .get(
            &token,
            &format!("/admin/logs?target_type=article&target_id={}", pending),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["logs"][0]["action"], "reject_article");
    assert_eq!(body["logs"][0]["admin_username"], "mod_anna");
    assert_eq!(body["logs"][0]["ip_address"], "127.0.0.1");

    let (status, body) = server.get(&token, "/admin/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articles"]["total"], 2);
    assert_eq!(body["articles"]["rejected"], 1);
    assert_eq!(body["articles"]["approved"], 1);
    assert_eq!(body["users"]["total"], 3);

    let (status, body) = server.get(&token, "/admin/stats/trends?days=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["daily"].as_array().unwrap().len(), 7);
    assert_eq!(body["top_categories"][0]["category"], "electronics");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_report_handling_flow() {
    let server = TestServer::start().await;
    server.insert_user("mod_anna", roles::ADMIN).await;
    let other_admin = server.insert_user("mod_ben", roles::ADMIN).await;
    let scammer = server.insert_user("scammer", roles::USER).await;
    let buyer = server.insert_user("buyer_cai", roles::USER).await;

    let listing = server
        .insert_article(scammer, "Too cheap console", "approved", 2_000, Some(0.8))
        .await;
    let report = server
        .insert_report(buyer, Some(scammer), Some(listing), "fraud")
        .await;
    let admin_report = server
        .insert_report(buyer, Some(other_admin), None, "harassment")
        .await;

    sqlx::query(
        r#"
        INSERT INTO admin_notifications (kind, title, message, related_type, related_id)
        VALUES ('new_report', 'New report', 'A listing was reported', 'report', $1)
        "#,
    )
    .bind(report)
    .execute(&server.pool)
    .await
    .unwrap();

    let (_, body) = server.login("mod_anna").await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = server.get(&token, "/admin/reports?status=pending").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);

    let (status, body) = server
        .post(&token, &format!("/admin/reports/{}/investigate", report), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "investigating");

    // A failed ban rolls the whole handling back
    let (status, _) = server
        .post(
            &token,
            &format!("/admin/reports/{}/handle", admin_report),
            json!({ "resolution": "resolved", "action": "ban_user" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(server.report_status(admin_report).await, "pending");

    let (status, body) = server
        .post(
            &token,
            &format!("/admin/reports/{}/handle", report),
            json!({
                "resolution": "resolved",
                "action": "ban_user",
                "ban_duration_hours": 72,
                "ban_reason": "Fake listings",
                "admin_notes": "Confirmed with payment provider"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["status"], "resolved");
    assert_eq!(body["banned_user"]["id"], scammer.to_string());
    assert_eq!(body["notifications_cleared"], 1);

    let (status, _) = server
        .post(
            &token,
            &format!("/admin/reports/{}/handle", report),
            json!({ "resolution": "dismissed" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = server
        .get(&token, &format!("/admin/reports/{}", report))
        .await;
    assert_eq!(body["reported_user"]["is_banned"], true);
    assert_eq!(body["handler_username"], "mod_anna");
    assert_eq!(body["related_report_count"], 0);

    // The ban produced a broadcast notification
    let (status, body) = server
        .get(&token, "/admin/notifications?unread_only=true")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unread"], 1);
    assert_eq!(body["notifications"][0]["kind"], "user_banned");
    let notification_id = body["notifications"][0]["id"].as_str().unwrap().to_string();

    let response = server
        .client
        .post(format!(
            "{}/admin/notifications/{}/read",
            server.base_url, notification_id
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (_, body) = server
        .post(&token, "/admin/notifications/read-all", json!({}))
        .await;
    assert_eq!(body["updated"], 0);

    let (status, body) = server
        .get(&token, "/admin/logs?action=resolve_report")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["logs"][0]["details"]["action"], "ban_user");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_report_actions() {
    let server = TestServer::start().await;
    let admin_id = server.insert_user("mod_anna", roles::ADMIN).await;
    let seller = server.insert_user("seller_dee", roles::USER).await;
    let buyer = server.insert_user("buyer_cai", roles::USER).await;

    let fake_bag = server
        .insert_article(seller, "Designer bag", "approved", 12_000, Some(0.95))
        .await;
    let fake_watch = server
        .insert_article(seller, "Luxury watch", "approved", 30_000, None)
        .await;
    let first = server
        .insert_report(buyer, None, Some(fake_bag), "counterfeit")
        .await;
    let duplicate = server
        .insert_report(buyer, None, Some(fake_bag), "counterfeit")
        .await;
    let user_only = server
        .insert_report(seller, Some(buyer), None, "harassment")
        .await;
    let article_only = server
        .insert_report(buyer, None, Some(fake_watch), "counterfeit")
        .await;
    let against_self = server
        .insert_report(buyer, Some(admin_id), None, "other")
        .await;

    let (_, body) = server.login("mod_anna").await;
    let token = body["access_token"].as_str().unwrap().to_string();
    let handle = |id: Uuid| format!("/admin/reports/{}/handle", id);

    // Removing the article rejects it
    let (status, body) = server
        .post(
            &token,
            &handle(first),
            json!({ "resolution": "resolved", "action": "remove_article" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["article_removed"], true);
    let (_, article) = server
        .get(&token, &format!("/admin/articles/{}", fake_bag))
        .await;
    assert_eq!(article["status"], "rejected");

    // A second report on an already removed article closes without touching it
    let (status, body) = server
        .post(
            &token,
            &handle(duplicate),
            json!({ "resolution": "resolved", "action": "remove_article" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["article_removed"], false);
    assert_eq!(body["report"]["status"], "resolved");

    // No article to remove
    let (status, body) = server
        .post(
            &token,
            &handle(user_only),
            json!({ "resolution": "resolved", "action": "remove_article" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(server.report_status(user_only).await, "pending");

    // Banning from an article-only report hits the seller
    let (status, body) = server
        .post(
            &token,
            &handle(article_only),
            json!({ "resolution": "resolved", "action": "ban_user" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["banned_user"]["id"], seller.to_string());
    assert_eq!(body["banned_user"]["ban_expires_at"], Value::Null);

    // An admin cannot ban themselves
    let (status, body) = server
        .post(
            &token,
            &handle(against_self),
            json!({ "resolution": "resolved", "action": "ban_user" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(server.report_status(against_self).await, "pending");

    // Only pending reports can be taken under investigation
    let investigate = |id: Uuid| format!("/admin/reports/{}/investigate", id);
    let (status, _) = server.post(&token, &investigate(first), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = server.post(&token, &investigate(user_only), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = server.post(&token, &investigate(user_only), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_article_filters_match_literally() {
    let server = TestServer::start().await;
    server.insert_user("mod_anna", roles::ADMIN).await;
    let seller = server.insert_user("seller_eve", roles::USER).await;

    let expired = server
        .insert_article(seller, "1000 piece puzzle", "approved", 2_500, None)
        .await;
    let current = server
        .insert_article(seller, "100% cotton shirt", "approved", 1_900, None)
        .await;
    for (id, offset) in [(expired, "-1 day"), (current, "+1 day")] {
        sqlx::query(
            "UPDATE articles SET is_featured = TRUE, featured_until = NOW() + $2::interval WHERE id = $1",
        )
        .bind(id)
        .bind(offset)
        .execute(&server.pool)
        .await
        .unwrap();
    }

    let (_, body) = server.login("mod_anna").await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = server.get(&token, "/admin/articles?is_featured=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["articles"][0]["id"], current.to_string());

    let (_, body) = server.get(&token, "/admin/articles?is_featured=false").await;
    assert_eq!(body["articles"][0]["id"], expired.to_string());

    let (_, body) = server.get(&token, "/admin/stats").await;
    assert_eq!(body["articles"]["featured"], 1);

    // `%` is matched literally, not as a wildcard
    let (status, body) = server.get(&token, "/admin/articles?search=100%25").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["articles"][0]["id"], current.to_string());
}
