//! Input checks applied before any store access.

use reelnest_model::{NewAccount, NewVideo, VideoPatch};
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    #[error("{field} must be an absolute http(s) URL, got: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("update must change at least one field")]
    EmptyPatch,
}

pub fn require_non_empty(
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Accepts `local@domain.tld` with no whitespace and a single `@`.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidEmail(email.to_string());

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_http_url(
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
    };

    let url = Url::parse(value).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_new_account(input: &NewAccount) -> Result<(), ValidationError> {
    require_non_empty("name", &input.name)?;
    validate_email(&input.email)?;
    if let Some(photo) = &input.photo {
        validate_http_url("photo", photo)?;
    }
    Ok(())
}

pub fn validate_new_video(input: &NewVideo) -> Result<(), ValidationError> {
    require_non_empty("title", &input.title)?;
    validate_http_url("src", &input.src)
}

pub fn validate_video_patch(patch: &VideoPatch) -> Result<(), ValidationError> {
    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch);
    }
    if let Some(title) = &patch.title {
        require_non_empty("title", title)?;
    }
    if let Some(src) = &patch.src {
        validate_http_url("src", src)?;
    }
    Ok(())
}
