//! Bracket error types.

use thiserror::Error;

/// Bracket engine errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BracketError {
    /// Empty or malformed participant list, or a non-finite score
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Round/match coordinates do not exist in the current bracket
    #[error("Match not found: round {round_index}, match {match_index}")]
    IndexOutOfRange {
        round_index: usize,
        match_index: usize,
    },
}

impl BracketError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        BracketError::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BracketError::IndexOutOfRange {
            round_index: 5,
            match_index: 0,
        };
        assert_eq!(err.to_string(), "Match not found: round 5, match 0");

        let err = BracketError::invalid_input("no participants");
        assert_eq!(err.to_string(), "Invalid input: no participants");
    }
}
