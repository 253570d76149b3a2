use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use reelnest_core::application::unit_of_work::AppUnitOfWork;
use reelnest_model::AccountID;
use reelnest_server::{
    AppState, auth::AuthCrypto, create_app, infra::config::Config,
};
use serde_json::{Value, json};
use tower::ServiceExt;

// Code is used by test modules, but not in this scope
#[allow(unused)]
#[derive(Debug)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// A registered account: its bearer token and id.
#[allow(unused)]
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub id: AccountID,
}

#[allow(unused)]
impl TestApp {
    pub fn in_memory() -> Self {
        let config = Arc::new(Config::development());
        let crypto = Arc::new(
            AuthCrypto::insecure_for_tests(&config.auth.password_pepper)
                .expect("test argon2 parameters"),
        );
        let state = AppState::new(
            Arc::new(AppUnitOfWork::in_memory()),
            config,
            crypto,
        );

        Self {
            router: create_app(state.clone()),
            state,
        }
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder =
                builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, value)
    }

    pub async fn signup(&self, name: &str) -> Session {
        let (status, body) = self
            .send(
                "POST",
                "/api/v1/auth/signup",
                None,
                Some(json!({
                    "name": name,
                    "email": format!("{name}@example.com"),
                    "password": "secret123",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        let token = body["access_token"]
            .as_str()
            .expect("access token")
            .to_string();
        let id = self.state.tokens.verify(&token).expect("valid token");
        Session { token, id }
    }

    /// Create a draft video owned by `owner` and return its id.
    pub async fn draft_video(&self, owner: &Session) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/v1/videos",
                Some(&owner.token),
                Some(json!({
                    "title": "Funny Video",
                    "src": "https://youtu.be/-LFSpfxBcm4",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().expect("video id").to_string()
    }

    pub async fn published_video(&self, owner: &Session) -> String {
        let id = self.draft_video(owner).await;
        let (status, _) = self
            .send(
                "PATCH",
                &format!("/api/v1/videos/{id}/publish"),
                Some(&owner.token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        id
    }
}

/// Ids in an `[{id, ...}]` relation set.
#[allow(unused)]
pub fn ids(set: &Value) -> Vec<String> {
    set.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
