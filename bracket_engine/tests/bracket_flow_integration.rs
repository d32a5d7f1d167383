//! Integration tests for bracket generation and progression.
//!
//! These tests walk complete brackets through generation, result reporting,
//! ties, invalid coordinates and rebuilds.

use bracket_engine::bracket::{
    self, Bracket, BracketError, Participant, Roster, SlotPosition, find_participant,
};

fn seeded(ids: &[&str]) -> Vec<Participant> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| Participant::new(*id, id.to_uppercase(), i as i64 + 1))
        .collect()
}

fn pairing(bracket: &Bracket, round: usize, m: usize) -> (Option<&str>, Option<&str>) {
    let m = bracket.get_match(round, m).unwrap();
    (m.player1.participant_id(), m.player2.participant_id())
}

#[test]
fn test_five_participants_layout() {
    let bracket = bracket::build(seeded(&["a", "b", "c", "d", "e"])).unwrap();

    assert_eq!(bracket.round_count(), 3);
    assert_eq!(bracket.total_slots(), 8);
    assert_eq!(bracket.rounds[0].matches.len(), 4);
    assert_eq!(bracket.rounds[1].matches.len(), 2);
    assert_eq!(bracket.rounds[2].matches.len(), 1);

    assert_eq!(pairing(&bracket, 0, 0), (Some("a"), Some("b")));
    assert_eq!(pairing(&bracket, 0, 1), (Some("c"), Some("d")));
    assert_eq!(pairing(&bracket, 0, 2), (Some("e"), None));
    assert_eq!(pairing(&bracket, 0, 3), (None, None));

    for round in &bracket.rounds[1..] {
        assert!(round.matches.iter().all(|m| m.is_pure_bye()));
    }
}

#[test]
fn test_four_participants_full_run() {
    let mut bracket = bracket::build(seeded(&["a", "b", "c", "d"])).unwrap();
    assert_eq!(pairing(&bracket, 0, 0), (Some("a"), Some("b")));
    assert_eq!(pairing(&bracket, 0, 1), (Some("c"), Some("d")));

    let first = bracket::update_match(&mut bracket, 0, 0, 3.0, 1.0).unwrap();
    assert_eq!(first.winner_id.as_deref(), Some("a"));
    assert_eq!(pairing(&bracket, 1, 0), (Some("a"), None));
    assert!(!bracket::is_complete(&bracket));

    let second = bracket::update_match(&mut bracket, 0, 1, 2.0, 5.0).unwrap();
    assert_eq!(second.winner_id.as_deref(), Some("d"));
    assert_eq!(pairing(&bracket, 1, 0), (Some("a"), Some("d")));
    assert_eq!(bracket::round_progress(&bracket, 0), 100.0);

    let last = bracket::update_match(&mut bracket, 1, 0, 10.0, 2.0).unwrap();
    assert_eq!(last.winner_id.as_deref(), Some("a"));
    assert!(last.advanced_to.is_none());
    assert!(bracket::is_complete(&bracket));
    assert_eq!(
        bracket::progress_summary(&bracket).champion.as_deref(),
        Some("a")
    );
}

#[test]
fn test_round_index_out_of_range() {
    let mut bracket = bracket::build(seeded(&["a", "b", "c", "d"])).unwrap();
    assert_eq!(bracket.round_count(), 2);

    let err = bracket::update_match(&mut bracket, 5, 0, 1.0, 0.0).unwrap_err();
    assert_eq!(
        err,
        BracketError::IndexOutOfRange {
            round_index: 5,
            match_index: 0
        }
    );
}

#[test]
fn test_tie_completes_and_propagates_no_participant() {
    let mut bracket = bracket::build(seeded(&["a", "b", "c", "d"])).unwrap();

    let outcome = bracket::update_match(&mut bracket, 0, 0, 4.0, 4.0).unwrap();
    assert!(outcome.is_tie());
    let advanced = outcome.advanced_to.unwrap();
    assert_eq!(
        (advanced.round_index, advanced.match_index, advanced.position),
        (1, 0, SlotPosition::Player1)
    );

    let m = bracket.get_match(0, 0).unwrap();
    assert!(m.completed);
    assert!(m.winner_id.is_none());
    assert!(bracket.get_match(1, 0).unwrap().player1.is_bye());

    // The stalled branch leaves the final unplayable until a new report
    bracket::update_match(&mut bracket, 0, 1, 1.0, 0.0).unwrap();
    assert!(!bracket::is_complete(&bracket));
}

#[test]
fn test_single_participant_has_no_rounds() {
    let bracket = bracket::build(seeded(&["solo"])).unwrap();
    assert_eq!(bracket.round_count(), 0);
    assert_eq!(bracket.match_count(), 0);
    assert_eq!(bracket.total_slots(), 1);
    assert!(bracket::is_complete(&bracket));
    assert_eq!(bracket::round_progress(&bracket, 0), 0.0);
}

#[test]
fn test_rebuild_discards_progress() {
    let participants = seeded(&["a", "b", "c", "d", "e", "f"]);
    let pristine = bracket::build(participants.clone()).unwrap();

    let mut played = bracket::build(participants.clone()).unwrap();
    bracket::update_match(&mut played, 0, 0, 1.0, 0.0).unwrap();
    bracket::update_match(&mut played, 0, 1, 0.0, 1.0).unwrap();
    assert_ne!(played, pristine);

    let rebuilt = bracket::build(participants).unwrap();
    assert_eq!(rebuilt, pristine);
    assert!(
        rebuilt
            .rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .all(|m| !m.completed
                && m.winner_id.is_none()
                && m.player1.score().is_none()
                && m.player2.score().is_none())
    );
}

#[test]
fn test_unseeded_participants_fill_last_slots() {
    let bracket = bracket::build(vec![
        Participant::unseeded("late1", "Late One"),
        Participant::new("top", "Top", 1),
        Participant::unseeded("late2", "Late Two"),
        Participant::new("second", "Second", 2),
    ])
    .unwrap();

    assert_eq!(pairing(&bracket, 0, 0), (Some("top"), Some("second")));
    assert_eq!(pairing(&bracket, 0, 1), (Some("late1"), Some("late2")));
}

#[test]
fn test_lookup_resolves_bracket_ids() {
    let roster = Roster::new(seeded(&["a", "b", "c"])).unwrap();
    let bracket = bracket::build_from_roster(&roster);

    for id in bracket.participant_ids() {
        let participant = find_participant(&roster, id).unwrap();
        assert_eq!(participant.name, id.to_uppercase());
    }
    assert!(find_participant(&roster, "missing").is_none());
}

#[test]
fn test_bracket_json_shape() {
    let mut bracket = bracket::build(seeded(&["a", "b"])).unwrap();
    bracket::update_match(&mut bracket, 0, 0, 2.5, 1.0).unwrap();

    let json = serde_json::to_value(&bracket).unwrap();
    let m = &json["rounds"][0]["matches"][0];
    assert_eq!(json["rounds"][0]["number"], 1);
    assert_eq!(m["player1"]["participant_id"], "a");
    assert_eq!(m["player1"]["score"], 2.5);
    assert_eq!(m["player2"]["score"], 1.0);
    assert_eq!(m["winner_id"], "a");
    assert_eq!(m["completed"], true);

    let back: Bracket = serde_json::from_value(json).unwrap();
    assert_eq!(back, bracket);
}
