//! Events emitted after each bracket mutation.

use super::{models::ParticipantId, recorder::MatchOutcome};
use serde::{Deserialize, Serialize};

/// Notification sent to subscribers when a bracket changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BracketEvent {
    /// A new bracket replaced any previous one
    Generated {
        participant_count: usize,
        round_count: usize,
    },
    /// A result was recorded
    MatchRecorded(MatchOutcome),
    /// The last outstanding match was recorded
    Completed { champion: Option<ParticipantId> },
    /// The bracket was discarded
    Reset,
}
