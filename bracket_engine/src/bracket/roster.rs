//! Seed-ordered participant roster.

use super::{
    errors::{BracketError, BracketResult},
    models::Participant,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Participants sorted by seed ascending.
///
/// The sort is stable: participants sharing a seed, and all unseeded
/// participants, keep their input order. Unseeded participants sort after
/// every seeded one.
///
/// Deserialization accepts an empty list (the roster of a pending
/// tournament) and otherwise requires unique ids already in seed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Participant>", into = "Vec<Participant>")]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Build a roster from participants in input order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the list is empty or contains a duplicate id
    pub fn new(mut participants: Vec<Participant>) -> BracketResult<Self> {
        if participants.is_empty() {
            return Err(BracketError::invalid_input(
                "at least one participant is required",
            ));
        }

        check_unique_ids(&participants)?;
        participants.sort_by_key(placement_key);

        Ok(Self { participants })
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Participants in placement order
    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.participants.iter()
    }

    pub fn into_inner(self) -> Vec<Participant> {
        self.participants
    }
}

fn placement_key(p: &Participant) -> (bool, Option<i64>) {
    (p.seed.is_none(), p.seed)
}

fn check_unique_ids(participants: &[Participant]) -> BracketResult<()> {
    let mut seen = HashSet::with_capacity(participants.len());
    for p in participants {
        if !seen.insert(p.id.as_str()) {
            return Err(BracketError::invalid_input(format!(
                "duplicate participant id: {}",
                p.id
            )));
        }
    }
    Ok(())
}

impl TryFrom<Vec<Participant>> for Roster {
    type Error = BracketError;

    /// Restore a stored roster without re-sorting it
    fn try_from(participants: Vec<Participant>) -> BracketResult<Self> {
        check_unique_ids(&participants)?;
        if !participants.is_sorted_by_key(placement_key) {
            return Err(BracketError::invalid_input(
                "stored roster is not in seed order",
            ));
        }

        Ok(Self { participants })
    }
}

impl From<Roster> for Vec<Participant> {
    fn from(roster: Roster) -> Self {
        roster.participants
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(roster: &Roster) -> Vec<&str> {
        roster.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_sorts_by_seed() {
        let roster = Roster::new(vec![
            Participant::new("c", "C", 3),
            Participant::new("a", "A", 1),
            Participant::new("b", "B", 2),
        ])
        .unwrap();
        assert_eq!(ids(&roster), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unseeded_sort_last_in_input_order() {
        let roster = Roster::new(vec![
            Participant::unseeded("x", "X"),
            Participant::new("b", "B", 2),
            Participant::unseeded("y", "Y"),
            Participant::new("a", "A", 1),
        ])
        .unwrap();
        assert_eq!(ids(&roster), vec!["a", "b", "x", "y"]);
    }

    #[test]
    fn test_equal_seeds_keep_input_order() {
        let roster = Roster::new(vec![
            Participant::new("second", "S", 1),
            Participant::new("first", "F", 0),
            Participant::new("third", "T", 1),
        ])
        .unwrap();
        assert_eq!(ids(&roster), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_rejected() {
        let err = Roster::new(Vec::new()).unwrap_err();
        assert!(matches!(err, BracketError::InvalidInput { .. }));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Roster::new(vec![
            Participant::new("a", "A", 1),
            Participant::new("a", "A again", 2),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate participant id: a"));
    }

    #[test]
    fn test_deserialize_keeps_stored_order() {
        let roster = Roster::new(vec![
            Participant::new("b", "B", 2),
            Participant::new("a", "A", 1),
            Participant::unseeded("z", "Z"),
        ])
        .unwrap();

        let json = serde_json::to_value(&roster).unwrap();
        assert_eq!(json[0]["id"], "a");

        let restored: Roster = serde_json::from_value(json).unwrap();
        assert_eq!(restored, roster);
    }

    #[test]
    fn test_deserialize_empty_roster() {
        let roster: Roster = serde_json::from_str("[]").unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[{"id":"a","name":"A","seed":1},{"id":"a","name":"B","seed":2}]"#;
        let err = serde_json::from_str::<Roster>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate participant id: a"));
    }

    #[test]
    fn test_deserialize_rejects_unsorted() {
        let json = r#"[{"id":"b","name":"B","seed":2},{"id":"a","name":"A","seed":1}]"#;
        let err = serde_json::from_str::<Roster>(json).unwrap_err();
        assert!(err.to_string().contains("not in seed order"));
    }
}
