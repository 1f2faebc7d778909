use discover_core::PersistenceError;
use thiserror::Error;

use crate::mutation::MutationKind;

pub type QueryListResult<T> = Result<T, QueryListError>;

/// Query list errors with user-friendly messages
#[derive(Debug, Error)]
pub enum QueryListError {
    #[error("Saved query operation failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Cannot {action} {name:?}: the query has not been saved")]
    InvalidMutationTarget { action: MutationKind, name: String },
}
