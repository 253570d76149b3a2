use thiserror::Error;

use crate::domain::validation::ValidationError;
use crate::error::StoreError;

/// Failure of a relationship, engagement or publication operation.
///
/// Every rule violation is detected before the store is written to.
#[derive(Debug, Error)]
pub enum RelationError {
    /// The referenced account or video does not exist, or is not visible to
    /// the caller.
    #[error("{0}")]
    NotFound(String),

    /// The caller may never perform this action on the target.
    #[error("{0}")]
    Forbidden(String),

    /// The action contradicts the current relation or publication state.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Internal(#[from] StoreError),
}

impl RelationError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RelationError::NotFound(_))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, RelationError::Forbidden(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, RelationError::Conflict(_))
    }
}

pub type RelationResult<T> = Result<T, RelationError>;
