pub mod auth;
pub mod health;
pub mod users;
pub mod videos;

use std::str::FromStr;

use crate::infra::errors::{AppError, AppResult};

/// Parse a path id, answering 400 instead of axum's plain-text rejection.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> AppResult<T> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("Invalid id: {raw}")))
}
