use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use reelnest_core::database::ports::accounts::AccountsRepository;
use reelnest_model::AccountID;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Identity of the caller, inserted into request extensions by
/// [`auth_middleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount(pub AccountID);

impl AuthenticatedAccount {
    pub fn id(&self) -> AccountID {
        self.0
    }
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = extract_bearer_token(&request)?;
    let account = validate_and_get_account(&state, &token).await?;

    request
        .extensions_mut()
        .insert(AuthenticatedAccount(account));
    Ok(next.run(request).await)
}

fn extract_bearer_token(request: &Request) -> AppResult<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::unauthorized("Unauthorized"))
}

async fn validate_and_get_account(
    state: &AppState,
    token: &str,
) -> AppResult<AccountID> {
    let account = state.tokens.verify(token).map_err(|err| {
        tracing::debug!(error = %err, "rejected access token");
        AppError::unauthorized("Unauthorized")
    })?;

    // Tokens outlive deleted or foreign-store accounts.
    let exists = state
        .unit_of_work
        .accounts
        .get_account(account)
        .await?
        .is_some();
    if !exists {
        return Err(AppError::unauthorized("Unauthorized"));
    }

    Ok(account)
}
