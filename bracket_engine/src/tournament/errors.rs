//! Tournament service error types.

use super::models::TournamentId;
use crate::{bracket::BracketError, store::StoreError};
use thiserror::Error;

/// Tournament service errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// No document or actor exists for the tournament
    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),

    /// Tournament exists but has no bracket yet
    #[error("Bracket not generated for tournament {0}")]
    NotGenerated(TournamentId),

    #[error("Insufficient participants: need {needed}, have {current}")]
    InsufficientParticipants { needed: usize, current: usize },

    /// Engine rejected the operation
    #[error(transparent)]
    Bracket(#[from] BracketError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The tournament's actor stopped before answering
    #[error("Tournament {0} is unavailable")]
    ActorUnavailable(TournamentId),
}

impl TournamentError {
    /// Get a client-safe error message that doesn't leak storage details
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Store(_) => "Internal server error".to_string(),
            TournamentError::ActorUnavailable(_) => "Tournament temporarily unavailable".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;
