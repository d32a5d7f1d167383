//! Participant lookup by id.

use super::{models::Participant, roster::Roster};

/// Find a participant by id.
///
/// Linear scan, fine for rosters of tens to low hundreds of entrants. Callers
/// resolving many ids should build their own index (see `view::BracketView`).
pub fn find_participant<'a>(roster: &'a Roster, participant_id: &str) -> Option<&'a Participant> {
    roster.iter().find(|p| p.id == participant_id)
}
