use thiserror::Error;

/// Failures reported by entity store adapters.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected a create or update.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
