//! Bracket construction from a seeded roster.

use super::{
    errors::BracketResult,
    models::{Bracket, Participant, Round, Slot},
    roster::Roster,
};

/// Number of rounds needed for `participant_count` entrants (`ceil(log2(n))`).
///
/// Zero and one participant both yield zero rounds.
pub fn round_count_for(participant_count: usize) -> usize {
    participant_count.next_power_of_two().trailing_zeros() as usize
}

/// Build a fresh bracket from participants in input order.
///
/// Participants are seed-sorted first (see [`Roster`]). Any previous bracket
/// is simply replaced by the return value: rebuilding is a hard reset and
/// carries no scores or winners over.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty list or duplicate ids
pub fn build(participants: Vec<Participant>) -> BracketResult<Bracket> {
    let roster = Roster::new(participants)?;
    Ok(build_from_roster(&roster))
}

/// Build a fresh bracket from an already seed-sorted roster
pub fn build_from_roster(roster: &Roster) -> Bracket {
    let n = roster.len();
    let round_count = round_count_for(n);
    let total_slots = 1usize << round_count;

    let mut rounds: Vec<Round> = (0..round_count)
        .map(|r| Round::new(r as u32 + 1, total_slots >> (r + 1)))
        .collect();

    if let Some(first) = rounds.first_mut() {
        for (i, participant) in roster.iter().take(total_slots).enumerate() {
            let m = &mut first.matches[i / 2];
            let slot = if i % 2 == 0 {
                &mut m.player1
            } else {
                &mut m.player2
            };
            *slot = Slot::occupied(participant.id.clone());
        }
    }

    log::debug!(
        "Built bracket: {} participants, {} rounds, {} slots",
        n,
        round_count,
        total_slots
    );

    Bracket { rounds }
}
