//! Round and bracket completion tracking.

use super::models::{Bracket, Match, ParticipantId};
use serde::{Deserialize, Serialize};

/// Percentage of completed matches in a round, in `[0, 100]`.
///
/// Returns `0.0` for an unknown round index instead of failing, since this is
/// a reporting accessor.
pub fn round_progress(bracket: &Bracket, round_index: usize) -> f64 {
    let Some(round) = bracket.round(round_index) else {
        return 0.0;
    };
    if round.matches.is_empty() {
        return 0.0;
    }

    let completed = round.matches.iter().filter(|m| m.completed).count();
    100.0 * completed as f64 / round.matches.len() as f64
}

fn is_settled(m: &Match) -> bool {
    m.completed || m.is_pure_bye()
}

/// Whether every match is completed or is a pure bye.
///
/// A match holding one participant against a bye still needs a reported
/// result; it is not resolved automatically.
pub fn is_complete(bracket: &Bracket) -> bool {
    bracket
        .rounds
        .iter()
        .all(|round| round.matches.iter().all(is_settled))
}

/// Snapshot of bracket progress for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Completion percentage per round, in round order
    pub rounds: Vec<f64>,
    pub completed_matches: usize,
    pub total_matches: usize,
    pub complete: bool,
    /// Winner of the final match once the bracket is complete
    pub champion: Option<ParticipantId>,
}

/// Build a [`ProgressSummary`] for the whole bracket
pub fn progress_summary(bracket: &Bracket) -> ProgressSummary {
    let complete = is_complete(bracket);
    let champion = if complete {
        bracket.final_match().and_then(|m| m.winner_id.clone())
    } else {
        None
    };

    ProgressSummary {
        rounds: (0..bracket.round_count())
            .map(|r| round_progress(bracket, r))
            .collect(),
        completed_matches: bracket
            .rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .filter(|m| m.completed)
            .count(),
        total_matches: bracket.match_count(),
        complete,
        champion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::{builder::build, models::Participant, recorder::update_match};

    fn players(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant::new(format!("p{i}"), format!("P{i}"), i as i64))
            .collect()
    }

    #[test]
    fn test_round_progress() {
        let mut bracket = build(players(8)).unwrap();
        assert_eq!(round_progress(&bracket, 0), 0.0);

        update_match(&mut bracket, 0, 0, 1.0, 0.0).unwrap();
        assert_eq!(round_progress(&bracket, 0), 25.0);

        update_match(&mut bracket, 0, 1, 1.0, 0.0).unwrap();
        update_match(&mut bracket, 0, 2, 1.0, 0.0).unwrap();
        update_match(&mut bracket, 0, 3, 1.0, 0.0).unwrap();
        assert_eq!(round_progress(&bracket, 0), 100.0);
        assert_eq!(round_progress(&bracket, 1), 0.0);
    }

    #[test]
    fn test_round_progress_invalid_index_is_zero() {
        let bracket = build(players(4)).unwrap();
        assert_eq!(round_progress(&bracket, 2), 0.0);
        assert_eq!(round_progress(&bracket, usize::MAX), 0.0);
    }

    #[test]
    fn test_bye_against_player_blocks_completion() {
        let mut bracket = build(players(3)).unwrap();
        update_match(&mut bracket, 0, 0, 2.0, 1.0).unwrap();
        assert!(!is_complete(&bracket));

        update_match(&mut bracket, 0, 1, 1.0, 0.0).unwrap();
        update_match(&mut bracket, 1, 0, 3.0, 0.0).unwrap();
        assert!(is_complete(&bracket));
    }

    #[test]
    fn test_summary_reports_champion_only_when_complete() {
        let mut bracket = build(players(2)).unwrap();
        let summary = progress_summary(&bracket);
        assert_eq!(summary.total_matches, 1);
        assert!(!summary.complete);
        assert!(summary.champion.is_none());

        update_match(&mut bracket, 0, 0, 0.0, 1.0).unwrap();
        let summary = progress_summary(&bracket);
        assert_eq!(summary.rounds, vec![100.0]);
        assert_eq!(summary.completed_matches, 1);
        assert!(summary.complete);
        assert_eq!(summary.champion.as_deref(), Some("p1"));
    }

    #[test]
    fn test_empty_bracket_is_complete() {
        let bracket = build(players(1)).unwrap();
        assert!(is_complete(&bracket));
        let summary = progress_summary(&bracket);
        assert!(summary.rounds.is_empty());
        assert!(summary.champion.is_none());
    }
}
