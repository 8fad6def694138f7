//! Candidate filtering
//!
//! Determines which remaining participants a pivot may be paired with

use types::ids::ParticipantId;
use types::matching::Matching;
use types::pair::{History, PairKey};

/// Collect the eligible partners for `pivot` among `pending`
///
/// A participant is eligible when it is not the pivot itself and the pair
/// appears neither in the history nor among the pairs already assigned in
/// the current attempt. Orientation is irrelevant for both checks.
///
/// Returns the index into `pending` of each eligible partner, together with
/// the pair it would form (pivot first), in `pending` order.
pub fn eligible_partners(
    pivot: &ParticipantId,
    pending: &[ParticipantId],
    history: &History,
    assigned: &Matching,
) -> Vec<(usize, PairKey)> {
    pending
        .iter()
        .enumerate()
        .filter_map(|(idx, other)| {
            // Self-pairs are rejected by the constructor
            let pair = PairKey::new(pivot.clone(), other.clone()).ok()?;
            if history.contains_pair(&pair) || assigned.pairs().contains(&pair) {
                None
            } else {
                Some((idx, pair))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ParticipantId> {
        names.iter().map(|n| ParticipantId::from(*n)).collect()
    }

    fn pair(a: &str, b: &str) -> PairKey {
        PairKey::new(a, b).unwrap()
    }

    #[test]
    fn test_pivot_is_never_its_own_candidate() {
        let pending = ids(&["A", "B", "C"]);
        let found = eligible_partners(&"A".into(), &pending, &History::new(), &Matching::new());
        let indices: Vec<usize> = found.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn test_history_excludes_both_orientations() {
        let pending = ids(&["A", "B", "C", "D"]);
        let history: History = vec![pair("B", "A"), pair("A", "D")].into_iter().collect();
        let found = eligible_partners(&"A".into(), &pending, &history, &Matching::new());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1.second().as_str(), "C");
    }

    #[test]
    fn test_assigned_pairs_are_excluded() {
        let pending = ids(&["A", "B", "C"]);
        let assigned = Matching::from_pairs(vec![pair("C", "A")]);
        let found = eligible_partners(&"A".into(), &pending, &History::new(), &assigned);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, 1);
    }

    #[test]
    fn test_candidate_pair_is_pivot_first() {
        let pending = ids(&["B", "A"]);
        let found = eligible_partners(&"B".into(), &pending, &History::new(), &Matching::new());
        assert_eq!(found[0].1.first().as_str(), "B");
        assert_eq!(found[0].1.second().as_str(), "A");
    }

    #[test]
    fn test_unknown_history_entries_are_harmless() {
        let pending = ids(&["A", "B"]);
        let history: History = vec![pair("X", "Y"), pair("A", "Z")].into_iter().collect();
        let found = eligible_partners(&"A".into(), &pending, &history, &Matching::new());
        assert_eq!(found.len(), 1);
    }
}
