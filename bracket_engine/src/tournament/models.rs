//! Tournament data models for bracket documents.

use crate::bracket::{Bracket, ProgressSummary, Roster, progress_summary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tournament ID type (assigned by the surrounding system)
pub type TournamentId = String;

/// Tournament lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// No bracket generated yet, or reset
    Pending,
    /// Bracket generated, results being reported
    Active,
    /// Every match settled
    Completed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Pending => "pending",
            TournamentStatus::Active => "active",
            TournamentStatus::Completed => "completed",
        }
    }
}

impl FromStr for TournamentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TournamentStatus::Pending),
            "active" => Ok(TournamentStatus::Active),
            "completed" => Ok(TournamentStatus::Completed),
            other => Err(format!("unknown tournament status: {other}")),
        }
    }
}

/// Persisted bracket document, one per tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketDocument {
    pub tournament_id: TournamentId,
    /// Seed-ordered participants the bracket was built from
    #[serde(rename = "participants")]
    pub roster: Roster,
    pub bracket: Bracket,
    pub status: TournamentStatus,
    pub updated_at: DateTime<Utc>,
}

impl BracketDocument {
    /// Empty pending document for a tournament with no bracket
    pub fn pending(tournament_id: TournamentId) -> Self {
        Self {
            tournament_id,
            roster: Roster::default(),
            bracket: Bracket::default(),
            status: TournamentStatus::Pending,
            updated_at: Utc::now(),
        }
    }
}

/// Read result: the current document plus its progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentState {
    #[serde(flatten)]
    pub document: BracketDocument,
    pub progress: ProgressSummary,
}

impl From<BracketDocument> for TournamentState {
    fn from(document: BracketDocument) -> Self {
        let progress = progress_summary(&document.bracket);
        Self { document, progress }
    }
}
