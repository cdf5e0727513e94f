//! Engine error types.

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl EngineError {
    /// Whether retrying the same call may succeed. Version conflicts are
    /// retryable only after the caller re-checks its dedupe key: replaying a
    /// processed answer would move the state again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(err) => err.is_retryable(),
            Self::InvalidInput(_) => false,
        }
    }
}
