//! Store error types.

use thiserror::Error;

/// Document store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored row is missing data or has an unknown value
    #[error("Corrupt document for tournament {tournament_id}: {reason}")]
    Corrupt {
        tournament_id: String,
        reason: String,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
