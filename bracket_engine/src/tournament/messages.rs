//! Messages handled by tournament actors.

use super::{errors::TournamentResult, models::TournamentState};
use crate::{
    bracket::{BracketEvent, MatchOutcome, Participant},
    view::BracketView,
};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

/// Subscriber ID for event notifications
pub type SubscriberId = u64;

/// Result of a reported match, with the tournament state after it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultReport {
    pub outcome: MatchOutcome,
    pub state: TournamentState,
    /// This result settled the last outstanding match
    pub completed_tournament: bool,
}

/// Messages sent to a tournament actor
#[derive(Debug)]
pub enum TournamentMessage {
    /// Build a new bracket, discarding any previous one
    Generate {
        participants: Vec<Participant>,
        response: oneshot::Sender<TournamentResult<TournamentState>>,
    },

    /// Record a match result
    ReportResult {
        round_index: usize,
        match_index: usize,
        score1: f64,
        score2: f64,
        response: oneshot::Sender<TournamentResult<ResultReport>>,
    },

    /// Read the current document and progress
    GetState {
        response: oneshot::Sender<TournamentState>,
    },

    /// Read the display projection
    GetView {
        response: oneshot::Sender<TournamentResult<BracketView>>,
    },

    /// Discard the bracket and return to pending
    Reset {
        response: oneshot::Sender<TournamentResult<()>>,
    },

    /// Subscribe to bracket events
    Subscribe {
        subscriber_id: SubscriberId,
        sender: mpsc::Sender<BracketEvent>,
    },

    /// Unsubscribe from bracket events
    Unsubscribe { subscriber_id: SubscriberId },

    /// Stop the actor
    Close { response: oneshot::Sender<()> },
}
