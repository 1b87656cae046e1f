use stackwise_auth::AuthError;
use stackwise_core::error::CoreError;
use stackwise_core::validation::ValidationError;
use stackwise_scoring::ScoringError;
use stackwise_storage::StorageError;
use thiserror::Error;

/// Error returned by store operations. The same message is recorded in the
/// store's `error` field.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("no authenticated user")]
    NotAuthenticated,
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Core(CoreError::Serialization(e))
    }
}
