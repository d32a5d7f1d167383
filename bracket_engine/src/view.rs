//! Display projection of a bracket.
//!
//! Groups matches by round and resolves participant ids to names so a
//! renderer never has to touch the live [`Bracket`].

use crate::bracket::{Bracket, Participant, Roster, Slot};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;

/// Name shown for an empty or unknown slot
pub const TBD: &str = "TBD";

/// One side of a rendered match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: Option<String>,
    pub name: String,
    /// Recorded score, `0` until reported
    pub score: f64,
    pub is_winner: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchView {
    pub index: usize,
    pub player1: PlayerView,
    pub player2: PlayerView,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundView {
    pub number: u32,
    pub matches: Vec<MatchView>,
}

/// Rendered bracket, rounds in play order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketView {
    pub rounds: Vec<RoundView>,
}

impl BracketView {
    /// Build the view, indexing the roster once for repeated lookups
    pub fn new(bracket: &Bracket, roster: &Roster) -> Self {
        let index: HashMap<&str, &Participant> =
            roster.iter().map(|p| (p.id.as_str(), p)).collect();

        let player = |slot: &Slot, winner: Option<&str>| {
            let id = slot.participant_id();
            PlayerView {
                id: id.map(str::to_string),
                name: id
                    .and_then(|id| index.get(id))
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| TBD.to_string()),
                score: slot.score().unwrap_or(0.0),
                is_winner: id.is_some() && id == winner,
            }
        };

        let rounds = bracket
            .rounds
            .iter()
            .map(|round| RoundView {
                number: round.number,
                matches: round
                    .matches
                    .iter()
                    .enumerate()
                    .map(|(i, m)| {
                        let winner = m.winner_id.as_deref();
                        MatchView {
                            index: i,
                            player1: player(&m.player1, winner),
                            player2: player(&m.player2, winner),
                            completed: m.completed,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { rounds }
    }

    /// Plain-text listing, one line per match
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for round in &self.rounds {
            let _ = writeln!(out, "Round {}", round.number);
            for m in &round.matches {
                let _ = writeln!(
                    out,
                    "  [{}] {}{} {} - {} {}{}{}",
                    m.index,
                    marker(&m.player1),
                    m.player1.name,
                    m.player1.score,
                    m.player2.score,
                    m.player2.name,
                    marker(&m.player2),
                    if m.completed { "" } else { " (pending)" }
                );
            }
        }
        out
    }
}

fn marker(player: &PlayerView) -> &'static str {
    if player.is_winner { "*" } else { "" }
}
