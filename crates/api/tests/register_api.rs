//! Integration tests for the registration intake endpoint.
//!
//! Exercises the full stack: routing, validation, persistence, duplicate
//! detection, and notification scheduling via the in-memory transport.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, post_raw, wait_for_emails};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Success path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn valid_submission_creates_record_and_schedules_both_emails(pool: PgPool) {
    let (app, transport) = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/register",
        serde_json::json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "mobile": "9876543210"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["name"], "Asha Rao");
    assert_eq!(json["email"], "asha@example.com");
    assert_eq!(json["mobile"], "9876543210");
    assert!(json["created_at"].is_string());
    assert_eq!(
        json["message"],
        "Registered successfully. Confirmation sent to your email."
    );

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // Submitter confirmation is scheduled before the admin alert.
    let sent = wait_for_emails(&transport, 2).await;
    assert_eq!(sent[0].to, vec!["asha@example.com".to_string()]);
    assert_eq!(sent[0].sender.as_deref(), Some("hello@example.com"));
    assert_eq!(sent[1].to, vec!["admin@example.com".to_string()]);
    assert_eq!(sent[1].reply_to.as_deref(), Some("noreply@example.com"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn legacy_top_level_fields_are_stored_in_columns_and_blob(pool: PgPool) {
    let (app, _transport) = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/register",
        serde_json::json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "mobile": "9876543210",
            "qualification": "B.Ed",
            "experience": "5 years"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let (mobile, qualification, extra): (Option<String>, Option<String>, Option<String>) =
        sqlx::query_as("SELECT mobile, qualification, extra FROM users WHERE email = $1")
            .bind("asha@example.com")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_eq!(mobile.as_deref(), Some("9876543210"));
    assert_eq!(qualification.as_deref(), Some("B.Ed"));

    let blob: serde_json::Value = serde_json::from_str(&extra.unwrap()).unwrap();
    assert_eq!(blob["mobile"], "9876543210");
    assert_eq!(blob["experience"], "5 years");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn nested_profile_value_wins_over_top_level(pool: PgPool) {
    let (app, _transport) = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/register",
        serde_json::json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "mobile": "1111111111",
            "extra": { "mobile": "2222222222", "city": "Bengaluru" }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let (mobile,): (Option<String>,) =
        sqlx::query_as("SELECT mobile FROM users WHERE email = $1")
            .bind("asha@example.com")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(mobile.as_deref(), Some("2222222222"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn city_from_extra_reaches_the_admin_alert(pool: PgPool) {
    let (app, transport) = common::build_test_app(pool);

    post_json(
        app,
        "/register",
        serde_json::json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "extra": { "city": "Bengaluru" }
        }),
    )
    .await;

    let sent = wait_for_emails(&transport, 2).await;
    assert!(sent[1].html.contains("Bengaluru"));
}

// ---------------------------------------------------------------------------
// Duplicate email
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_returns_conflict_and_keeps_first_record(pool: PgPool) {
    let (app, _transport) = common::build_test_app(pool.clone());

    let payload = serde_json::json!({
        "name": "Asha Rao",
        "email": "asha@example.com",
        "mobile": "9876543210"
    });

    let first = post_json(app.clone(), "/register", payload.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_id = body_json(first).await["id"].as_i64().unwrap();

    let second = post_json(app, "/register", payload).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Email already registered");

    // Exactly one record, id unchanged.
    let rows: Vec<(i64,)> = sqlx::query_as("SELECT id FROM users")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, first_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_submission_data_is_discarded(pool: PgPool) {
    let (app, _transport) = common::build_test_app(pool.clone());

    post_json(
        app.clone(),
        "/register",
        serde_json::json!({ "name": "Asha Rao", "email": "asha@example.com" }),
    )
    .await;

    // Second submission with the same email but new profile data.
    let second = post_json(
        app,
        "/register",
        serde_json::json!({
            "name": "Someone Else",
            "email": "asha@example.com",
            "mobile": "9999999999"
        }),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let (name, mobile): (String, Option<String>) =
        sqlx::query_as("SELECT name, mobile FROM users WHERE email = $1")
            .bind("asha@example.com")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(name, "Asha Rao");
    assert!(mobile.is_none());
}

// ---------------------------------------------------------------------------
// Validation failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_email_is_rejected_with_field_error(pool: PgPool) {
    let (app, transport) = common::build_test_app(pool.clone());

    let response = post_json(app, "/register", serde_json::json!({ "name": "Asha Rao" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));

    // Nothing persisted, nothing scheduled.
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
    assert!(transport.sent().await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_email_is_rejected(pool: PgPool) {
    let (app, _transport) = common::build_test_app(pool);

    let response = post_json(
        app,
        "/register",
        serde_json::json!({ "name": "Asha Rao", "email": "missing-the-at-sign" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["details"][0]["field"], "email");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_name_and_short_mobile_are_both_reported(pool: PgPool) {
    let (app, _transport) = common::build_test_app(pool);

    let response = post_json(
        app,
        "/register",
        serde_json::json!({ "name": "", "email": "asha@example.com", "mobile": "12345" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let fields: Vec<&str> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"mobile"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_json_body_is_a_bad_request(pool: PgPool) {
    let (app, _transport) = common::build_test_app(pool);

    let response = post_raw(app, "/register", "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// HTML escaping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn html_bodies_escape_submitted_markup(pool: PgPool) {
    let (app, transport) = common::build_test_app(pool);

    let response = post_json(
        app,
        "/register",
        serde_json::json!({
            "name": "<script>alert(1)</script>",
            "email": "xss@example.com"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let sent = wait_for_emails(&transport, 2).await;
    for email in &sent {
        assert!(email.html.contains("&lt;script&gt;"));
        assert!(!email.html.contains("<script>"));
    }
}
