mod common;

use common::TestApp;
use service_core::axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tutoring_service::models::Role;

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let app = TestApp::spawn().await;

    let res = app.request(Method::GET, "/api/v1/admin/me", None, None).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "Authorization token is required");
}

#[tokio::test]
async fn test_empty_bearer_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let res = app
        .send(
            Request::builder()
                .uri("/api/v1/admin/me")
                .header(header::AUTHORIZATION, "Bearer ")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "Authorization token is required");
}

#[tokio::test]
async fn test_malformed_and_refresh_tokens_are_rejected() {
    let app = TestApp::spawn().await;
    let root = app.bootstrap_admin().await;

    let garbage = app
        .request(Method::GET, "/api/v1/admin/me", Some("not.a.jwt"), None)
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let refresh = app.refresh_token(&root);
    let wrong_type = app
        .request(Method::GET, "/api/v1/admin/me", Some(&refresh), None)
        .await;
    assert_eq!(wrong_type.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_caller_profile() {
    let app = TestApp::spawn().await;
    let editor = app.seed_admin("editor", Role::Admin).await;

    let res = app
        .request(
            Method::GET,
            "/api/v1/admin/me",
            Some(&app.access_token(&editor)),
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["username"], "editor");
    assert_eq!(res.body["role"], "admin");
}

#[tokio::test]
async fn test_admin_cannot_use_superadmin_routes() {
    let app = TestApp::spawn().await;
    let editor = app.seed_admin("editor", Role::Admin).await;
    let token = app.access_token(&editor);

    let create = app
        .request(
            Method::POST,
            "/api/v1/admin",
            Some(&token),
            Some(serde_json::json!({
                "username": "newcomer",
                "password": "password123",
                "name": "New Comer",
                "role": "admin"
            })),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);

    // Bookings are superadmin-only; the gate fires before any query runs
    let bookings = app
        .request(Method::GET, "/api/v1/bookings", Some(&token), None)
        .await;
    assert_eq!(bookings.status, StatusCode::FORBIDDEN);

    let reset = app
        .request(
            Method::PUT,
            &format!("/api/v1/admin/{}/reset-password", editor.id),
            Some(&token),
            Some(serde_json::json!({ "new_password": "password456" })),
        )
        .await;
    assert_eq!(reset.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = TestApp::spawn().await;

    for (method, uri) in [
        (Method::PUT, "/api/v1/tutors/1"),
        (Method::PUT, "/api/v1/tutors/1/verify"),
        (Method::POST, "/api/v1/partners"),
        (Method::DELETE, "/api/v1/testimonials/1"),
        (Method::POST, "/api/v1/other-services/1/translations"),
        (Method::GET, "/api/v1/analytics"),
        (Method::GET, "/api/v1/bookings/1"),
    ] {
        let res = app.request(method.clone(), uri, None, None).await;
        assert_eq!(
            res.status,
            StatusCode::UNAUTHORIZED,
            "{} {} should need a token",
            method,
            uri
        );
    }
}

#[tokio::test]
async fn test_bootstrap_superadmin_cannot_be_deleted() {
    let app = TestApp::spawn().await;
    let root = app.bootstrap_admin().await;
    let other_super = app.seed_admin("deputy", Role::SuperAdmin).await;
    let token = app.access_token(&other_super);

    let res = app
        .request(
            Method::DELETE,
            &format!("/api/v1/admin/{}", root.id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let still_there = app
        .request(
            Method::GET,
            &format!("/api/v1/admin/{}", root.id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(still_there.status, StatusCode::OK);
    assert_eq!(still_there.body["username"], "superadmin");
}

#[tokio::test]
async fn test_superadmins_are_never_deletable() {
    let app = TestApp::spawn().await;
    let root = app.bootstrap_admin().await;
    let deputy = app.seed_admin("deputy", Role::SuperAdmin).await;

    let res = app
        .request(
            Method::DELETE,
            &format!("/api/v1/admin/{}", deputy.id),
            Some(&app.access_token(&root)),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_missing_admin_is_not_found() {
    let app = TestApp::spawn().await;
    let root = app.bootstrap_admin().await;

    let res = app
        .request(
            Method::DELETE,
            "/api/v1/admin/4242",
            Some(&app.access_token(&root)),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_superadmin_manages_admins() {
    let app = TestApp::spawn().await;
    let root = app.bootstrap_admin().await;
    let token = app.access_token(&root);

    let created = app
        .request(
            Method::POST,
            "/api/v1/admin",
            Some(&token),
            Some(serde_json::json!({
                "username": "editor",
                "password": "password123",
                "name": "Editor",
                "role": "admin"
            })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_i64().unwrap();

    let duplicate = app
        .request(
            Method::POST,
            "/api/v1/admin",
            Some(&token),
            Some(serde_json::json!({
                "username": "editor",
                "password": "password123",
                "name": "Editor Again",
                "role": "admin"
            })),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let updated = app
        .request(
            Method::PUT,
            &format!("/api/v1/admin/{}", id),
            Some(&token),
            Some(serde_json::json!({ "name": "Chief Editor" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Chief Editor");
    assert_eq!(updated.body["role"], "admin");

    let deleted = app
        .request(
            Method::DELETE,
            &format!("/api/v1/admin/{}", id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request(
            Method::GET,
            &format!("/api/v1/admin/{}", id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let app = TestApp::spawn().await;

    let res = app
        .send(
            Request::builder()
                .uri("/api/v1/admin/me")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(res.headers.get("x-request-id").unwrap(), "req-123");
    assert_eq!(res.headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(res.headers.get("x-frame-options").unwrap(), "DENY");
}
