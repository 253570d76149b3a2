use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::TestApp;

#[tokio::test]
async fn signup_then_login_issue_working_tokens() {
    let app = TestApp::in_memory();
    let john = app.signup("john").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "john@example.com", "password": "secret123" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);

    let token = body["access_token"].as_str().unwrap();
    assert_eq!(app.state.tokens.verify(token).unwrap(), john.id);

    let (status, users) = app.send("GET", "/api/v1/users", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users[0]["email"], "john@example.com");
    assert_eq!(users[0]["role"], "STUDENT");
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = TestApp::in_memory();
    app.signup("john").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/signup",
            None,
            Some(json!({
                "name": "John Again",
                "email": "john@example.com",
                "password": "secret123",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"]["message"],
        "Email: john@example.com already in use."
    );
    assert_eq!(body["error"]["status"], 409);
}

#[tokio::test]
async fn invalid_signup_payloads_are_bad_requests() {
    let app = TestApp::in_memory();

    for payload in [
        json!({ "name": "john", "email": "not-an-email", "password": "secret123" }),
        json!({ "name": "", "email": "john@example.com", "password": "secret123" }),
        json!({ "name": "john", "email": "john@example.com", "password": "  " }),
        json!({
            "name": "john",
            "email": "john@example.com",
            "password": "secret123",
            "photo": "robohash",
        }),
    ] {
        let (status, body) = app
            .send("POST", "/api/v1/auth/signup", None, Some(payload))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let app = TestApp::in_memory();
    app.signup("john").await;

    for (email, password) in [
        ("john@example.com", "wrong-password"),
        ("nobody@example.com", "secret123"),
    ] {
        let (status, body) = app
            .send(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn protected_routes_require_a_valid_bearer_token() {
    let app = TestApp::in_memory();

    let (status, _) = app.send("GET", "/api/v1/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send("GET", "/api/v1/videos", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["status"], 401);
}

#[tokio::test]
async fn tokens_for_unknown_accounts_are_rejected() {
    let app = TestApp::in_memory();
    let stranger = reelnest_model::AccountID::new();
    let token = app.state.tokens.issue(stranger).unwrap();

    let (status, _) = app.send("GET", "/api/v1/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_reports_the_memory_store() {
    let app = TestApp::in_memory();

    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "in-memory");

    let (status, body) = app.send("GET", "/ping", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "pong");
}
