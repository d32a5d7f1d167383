//! Bracket data models: participants, slots, matches and rounds.

use serde::{Deserialize, Serialize};

/// Participant ID type (stable id supplied by the identity provider)
pub type ParticipantId = String;

/// A participant entering the bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable participant ID
    pub id: ParticipantId,
    /// Display name
    pub name: String,
    /// Seed (lower is higher priority, `None` sorts last)
    #[serde(default)]
    pub seed: Option<i64>,
}

impl Participant {
    /// Create a seeded participant
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>, seed: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            seed: Some(seed),
        }
    }

    /// Create a participant without a seed
    pub fn unseeded(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            seed: None,
        }
    }
}

/// Which of the two positions in a match a slot occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPosition {
    Player1,
    Player2,
}

/// One participant position within a match.
///
/// An `Empty` slot is a bye. Both variants carry a score because a result
/// reported against a bye still records both numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SlotRecord", into = "SlotRecord")]
pub enum Slot {
    Empty {
        score: Option<f64>,
    },
    Occupied {
        participant_id: ParticipantId,
        score: Option<f64>,
    },
}

impl Default for Slot {
    fn default() -> Self {
        Slot::Empty { score: None }
    }
}

impl Slot {
    /// Create a slot holding a participant with no score yet
    pub fn occupied(participant_id: impl Into<ParticipantId>) -> Self {
        Slot::Occupied {
            participant_id: participant_id.into(),
            score: None,
        }
    }

    /// Participant in this slot, `None` for a bye
    pub fn participant_id(&self) -> Option<&str> {
        match self {
            Slot::Empty { .. } => None,
            Slot::Occupied { participant_id, .. } => Some(participant_id),
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Slot::Empty { score } | Slot::Occupied { score, .. } => *score,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Empty { .. })
    }

    pub(crate) fn set_score(&mut self, value: f64) {
        match self {
            Slot::Empty { score } | Slot::Occupied { score, .. } => *score = Some(value),
        }
    }

    /// Replace the occupant, keeping any recorded score
    pub(crate) fn set_participant(&mut self, participant: Option<ParticipantId>) {
        let score = self.score();
        *self = match participant {
            Some(participant_id) => Slot::Occupied {
                participant_id,
                score,
            },
            None => Slot::Empty { score },
        };
    }
}

/// Flat wire form of a slot
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotRecord {
    participant_id: Option<ParticipantId>,
    score: Option<f64>,
}

impl From<SlotRecord> for Slot {
    fn from(record: SlotRecord) -> Self {
        match record.participant_id {
            Some(participant_id) => Slot::Occupied {
                participant_id,
                score: record.score,
            },
            None => Slot::Empty {
                score: record.score,
            },
        }
    }
}

impl From<Slot> for SlotRecord {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Empty { score } => SlotRecord {
                participant_id: None,
                score,
            },
            Slot::Occupied {
                participant_id,
                score,
            } => SlotRecord {
                participant_id: Some(participant_id),
                score,
            },
        }
    }
}

/// A single match between two slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub player1: Slot,
    pub player2: Slot,
    /// Winner, `None` while pending or after a tie
    pub winner_id: Option<ParticipantId>,
    /// Set once both scores were recorded by a single result report
    pub completed: bool,
}

impl Match {
    /// Get a slot by position
    pub fn slot(&self, position: SlotPosition) -> &Slot {
        match position {
            SlotPosition::Player1 => &self.player1,
            SlotPosition::Player2 => &self.player2,
        }
    }

    pub(crate) fn slot_mut(&mut self, position: SlotPosition) -> &mut Slot {
        match position {
            SlotPosition::Player1 => &mut self.player1,
            SlotPosition::Player2 => &mut self.player2,
        }
    }

    /// Both slots are byes, so the match never needs to be played
    pub fn is_pure_bye(&self) -> bool {
        self.player1.is_bye() && self.player2.is_bye()
    }
}

/// A round of matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// Round number (1-indexed)
    pub number: u32,
    pub matches: Vec<Match>,
}

impl Round {
    /// Create a round of `match_count` unplayed matches
    pub fn new(number: u32, match_count: usize) -> Self {
        Self {
            number,
            matches: vec![Match::default(); match_count],
        }
    }
}

/// Full round/match tree for one tournament
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub rounds: Vec<Round>,
}

impl Bracket {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Number of first-round positions (`2^round_count`)
    pub fn total_slots(&self) -> usize {
        1usize << self.rounds.len()
    }

    pub fn match_count(&self) -> usize {
        self.rounds.iter().map(|r| r.matches.len()).sum()
    }

    pub fn round(&self, round_index: usize) -> Option<&Round> {
        self.rounds.get(round_index)
    }

    /// Get a match by 0-indexed round and match position
    pub fn get_match(&self, round_index: usize, match_index: usize) -> Option<&Match> {
        self.rounds.get(round_index)?.matches.get(match_index)
    }

    pub(crate) fn get_match_mut(
        &mut self,
        round_index: usize,
        match_index: usize,
    ) -> Option<&mut Match> {
        self.rounds.get_mut(round_index)?.matches.get_mut(match_index)
    }

    /// The last round's only match, if the bracket has any rounds
    pub fn final_match(&self) -> Option<&Match> {
        self.rounds.last()?.matches.first()
    }

    /// Participant ids currently placed anywhere in the bracket
    pub fn participant_ids(&self) -> impl Iterator<Item = &str> {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .flat_map(|m| [m.player1.participant_id(), m.player2.participant_id()])
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_set_participant_keeps_score() {
        let mut slot = Slot::occupied("a");
        slot.set_score(3.0);
        slot.set_participant(None);
        assert_eq!(slot, Slot::Empty { score: Some(3.0) });

        slot.set_participant(Some("b".to_string()));
        assert_eq!(slot.participant_id(), Some("b"));
        assert_eq!(slot.score(), Some(3.0));
    }

    #[test]
    fn test_slot_serializes_flat() {
        let json = serde_json::to_value(Slot::occupied("p1")).unwrap();
        assert_eq!(json, serde_json::json!({"participant_id": "p1", "score": null}));

        let bye: Slot =
            serde_json::from_value(serde_json::json!({"participant_id": null, "score": 2.0}))
                .unwrap();
        assert_eq!(bye, Slot::Empty { score: Some(2.0) });
    }

    #[test]
    fn test_participant_seed_defaults_to_none() {
        let p: Participant = serde_json::from_str(r#"{"id":"x","name":"X"}"#).unwrap();
        assert_eq!(p.seed, None);
    }

    #[test]
    fn test_bracket_accessors_out_of_range() {
        let bracket = Bracket {
            rounds: vec![Round::new(1, 1)],
        };
        assert!(bracket.get_match(0, 0).is_some());
        assert!(bracket.get_match(0, 1).is_none());
        assert!(bracket.get_match(1, 0).is_none());
        assert_eq!(bracket.total_slots(), 2);
    }

    #[test]
    fn test_empty_bracket_has_one_slot() {
        let bracket = Bracket::default();
        assert_eq!(bracket.round_count(), 0);
        assert_eq!(bracket.total_slots(), 1);
        assert!(bracket.final_match().is_none());
    }
}
