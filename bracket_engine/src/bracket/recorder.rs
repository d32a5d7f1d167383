//! Recording match results and advancing winners.

use super::{
    errors::{BracketError, BracketResult},
    models::{Bracket, ParticipantId, SlotPosition},
};
use serde::{Deserialize, Serialize};

/// Where a winner of `match_index` lands in the following round.
///
/// Matches `2k` and `2k + 1` feed match `k`; the even match fills `player1`,
/// the odd one `player2`.
pub fn advance_target(match_index: usize) -> (usize, SlotPosition) {
    let position = if match_index % 2 == 0 {
        SlotPosition::Player1
    } else {
        SlotPosition::Player2
    };
    (match_index / 2, position)
}

/// Slot in the next round that received a propagated result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advancement {
    pub round_index: usize,
    pub match_index: usize,
    pub position: SlotPosition,
}

/// What a single result report changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub round_index: usize,
    pub match_index: usize,
    pub score1: f64,
    pub score2: f64,
    /// `None` on a tie
    pub winner_id: Option<ParticipantId>,
    /// `None` when the match was in the final round
    pub advanced_to: Option<Advancement>,
}

impl MatchOutcome {
    pub fn is_tie(&self) -> bool {
        self.winner_id.is_none()
    }
}

/// Record a result for one match and move its winner one round forward.
///
/// Both scores are written, the match is marked completed, and the winner
/// (higher score) is placed into the next round's slot chosen by
/// [`advance_target`]. Propagation is one round per call; nothing cascades.
///
/// Tied scores still complete the match, with no winner, and the tie is
/// propagated: the next round's slot is emptied. A replay is not requested
/// and the branch stays stalled until the slot is filled by a later report.
///
/// Every check runs before the bracket is touched, so an error leaves it
/// unchanged.
///
/// # Errors
///
/// - `IndexOutOfRange` if no match exists at the coordinates
/// - `InvalidInput` if either score is NaN or infinite
pub fn update_match(
    bracket: &mut Bracket,
    round_index: usize,
    match_index: usize,
    score1: f64,
    score2: f64,
) -> BracketResult<MatchOutcome> {
    let current = bracket
        .get_match(round_index, match_index)
        .ok_or(BracketError::IndexOutOfRange {
            round_index,
            match_index,
        })?;

    if !score1.is_finite() || !score2.is_finite() {
        return Err(BracketError::invalid_input(format!(
            "scores must be finite numbers, got {score1} and {score2}"
        )));
    }

    let winner_id = if score1 > score2 {
        current.player1.participant_id().map(str::to_string)
    } else if score2 > score1 {
        current.player2.participant_id().map(str::to_string)
    } else {
        None
    };

    let advanced_to = if round_index + 1 < bracket.round_count() {
        let (next_match, position) = advance_target(match_index);
        if bracket.get_match(round_index + 1, next_match).is_none() {
            return Err(BracketError::IndexOutOfRange {
                round_index: round_index + 1,
                match_index: next_match,
            });
        }
        Some(Advancement {
            round_index: round_index + 1,
            match_index: next_match,
            position,
        })
    } else {
        None
    };

    if let Some(m) = bracket.get_match_mut(round_index, match_index) {
        m.player1.set_score(score1);
        m.player2.set_score(score2);
        m.winner_id = winner_id.clone();
        m.completed = true;
    }

    if let Some(target) = advanced_to {
        if let Some(next) = bracket.get_match_mut(target.round_index, target.match_index) {
            next.slot_mut(target.position)
                .set_participant(winner_id.clone());
        }
    }

    if winner_id.is_none() {
        log::warn!(
            "Round {} match {} tied at {}-{}, no winner advanced",
            round_index,
            match_index,
            score1,
            score2
        );
    }

    Ok(MatchOutcome {
        round_index,
        match_index,
        score1,
        score2,
        winner_id,
        advanced_to,
    })
}
