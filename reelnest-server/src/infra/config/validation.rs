use axum::http::HeaderValue;
use thiserror::Error;

use super::models::{AuthConfig, Config, CorsConfig};

const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("authentication secret {field} {reason}")]
    WeakSecret { field: &'static str, reason: String },
    #[error("CORS wildcard origins are not allowed when DEV_MODE is false")]
    DangerousCorsWildcard,
    #[error("invalid CORS origin: {origin}")]
    InvalidCorsOrigin { origin: String },
    #[error("AUTH_TOKEN_TTL_SECS must be greater than zero")]
    ZeroTokenTtl,
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.auth.token_ttl_secs == 0 {
        return Err(ConfigGuardRailError::ZeroTokenTtl);
    }

    if config.dev_mode {
        warn_default_secrets(&config.auth, &mut warnings);
    } else {
        enforce_secrets(&config.auth)?;
        if config.cors.is_wildcard_included() {
            return Err(ConfigGuardRailError::DangerousCorsWildcard);
        }
    }

    validate_cors(&config.cors)?;

    if config.database.url.is_none() {
        warnings.push_with_hint(
            "DATABASE_URL not configured; only the in-memory store is available",
            "Set DATABASE_URL or pass --memory to run without PostgreSQL",
        );
    }

    Ok(warnings)
}

fn warn_default_secrets(auth: &AuthConfig, warnings: &mut ConfigWarnings) {
    if auth.is_default_pepper() {
        warnings.push_with_hint(
            "AUTH_PASSWORD_PEPPER uses the default placeholder value",
            "Generate a random pepper of at least 32 characters before deploying",
        );
    }
    if auth.is_default_token_secret() {
        warnings.push_with_hint(
            "AUTH_TOKEN_SECRET uses the default placeholder value",
            "Generate a random signing secret of at least 32 characters before deploying",
        );
    }
}

fn enforce_secrets(auth: &AuthConfig) -> Result<(), ConfigGuardRailError> {
    enforce_secret(
        "AUTH_PASSWORD_PEPPER",
        &auth.password_pepper,
        auth.is_default_pepper(),
    )?;
    enforce_secret(
        "AUTH_TOKEN_SECRET",
        &auth.token_secret,
        auth.is_default_token_secret(),
    )
}

fn enforce_secret(
    field: &'static str,
    value: &str,
    is_default: bool,
) -> Result<(), ConfigGuardRailError> {
    if is_default {
        return Err(ConfigGuardRailError::WeakSecret {
            field,
            reason: "uses the default placeholder value".into(),
        });
    }

    if value.len() < MIN_SECRET_LENGTH {
        return Err(ConfigGuardRailError::WeakSecret {
            field,
            reason: format!("must be at least {MIN_SECRET_LENGTH} characters"),
        });
    }

    Ok(())
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigGuardRailError> {
    for origin in &cors.allowed_origins {
        if origin.trim() == "*" {
            continue;
        }
        if HeaderValue::from_str(origin).is_err() {
            return Err(ConfigGuardRailError::InvalidCorsOrigin {
                origin: origin.clone(),
            });
        }
    }
    Ok(())
}
