use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use reelnest_core::domain::validation::{require_non_empty, validate_new_account};
use reelnest_model::{AccountID, NewAccount, Role};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::auth::AuthCrypto;
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AccessToken>)> {
    let input = NewAccount {
        name: request.name,
        email: request.email,
        role: request.role,
        photo: request.photo,
    };
    // Validate before hashing.
    validate_new_account(&input)?;
    require_non_empty("password", &request.password)?;

    let password_hash =
        hash_password(state.auth_crypto.clone(), request.password).await?;
    let account = state.accounts.create(input, &password_hash).await?;

    info!("account {} signed up", account.id);
    Ok((StatusCode::CREATED, Json(issue_token(&state, account.id)?)))
}

#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<AccessToken>> {
    let invalid = || AppError::unauthorized("Invalid email or password");

    let account = state
        .accounts
        .find_by_email(&request.email)
        .await?
        .ok_or_else(invalid)?;
    let stored = state
        .accounts
        .password_hash(account.id)
        .await?
        .ok_or_else(invalid)?;

    let crypto = state.auth_crypto.clone();
    let valid = tokio::task::spawn_blocking(move || {
        crypto.verify_password(&request.password, &stored)
    })
    .await
    .map_err(|err| AppError::internal(format!("password check aborted: {err}")))??;
    if !valid {
        return Err(invalid());
    }

    Ok(Json(issue_token(&state, account.id)?))
}

/// Argon2 is CPU bound; keep it off the async workers.
pub(crate) async fn hash_password(
    crypto: Arc<AuthCrypto>,
    password: String,
) -> AppResult<String> {
    let hash = tokio::task::spawn_blocking(move || crypto.hash_password(&password))
        .await
        .map_err(|err| AppError::internal(format!("password hashing aborted: {err}")))??;
    Ok(hash)
}

fn issue_token(state: &AppState, account: AccountID) -> AppResult<AccessToken> {
    let access_token = state.tokens.issue(account).map_err(|err| {
        tracing::error!(error = %err, "failed to sign access token");
        AppError::internal("Failed to generate access token")
    })?;

    Ok(AccessToken {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.ttl_secs(),
    })
}
