use axum::{
    Extension, Json,
    extract::{Path, State},
};
use reelnest_model::{Account, AccountID, AccountWithRelations};

use crate::auth::AuthenticatedAccount;
use crate::handlers::parse_id;
use crate::infra::{app_state::AppState, errors::AppResult};

pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Account>>> {
    Ok(Json(state.accounts.list().await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AccountWithRelations>> {
    let id: AccountID = parse_id(&id)?;
    Ok(Json(state.accounts.find(id).await?))
}

pub async fn follow_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> AppResult<Json<AccountWithRelations>> {
    let target: AccountID = parse_id(&id)?;
    Ok(Json(state.social.follow(caller.id(), target).await?))
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> AppResult<Json<AccountWithRelations>> {
    let target: AccountID = parse_id(&id)?;
    Ok(Json(state.social.unfollow(caller.id(), target).await?))
}
