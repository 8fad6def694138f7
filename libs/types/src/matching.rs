//! Result of one pairing round

use crate::ids::ParticipantId;
use crate::pair::PairKey;
use serde::{Deserialize, Serialize};

/// Ordered sequence of pairs produced by one matcher call
///
/// Each participant appears in at most one pair. A matching is complete
/// for a roster of N participants when it holds floor(N/2) pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matching {
    pairs: Vec<PairKey>,
}

impl Matching {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: Vec<PairKey>) -> Self {
        Self { pairs }
    }

    pub fn push(&mut self, pair: PairKey) {
        self.pairs.push(pair);
    }

    pub fn pairs(&self) -> &[PairKey] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<PairKey> {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Whether this matching covers floor(roster_len / 2) pairs
    pub fn is_complete_for(&self, roster_len: usize) -> bool {
        self.pairs.len() == roster_len / 2
    }

    /// Every participant appearing in the matching, in pair order
    pub fn participants(&self) -> impl Iterator<Item = &ParticipantId> {
        self.pairs.iter().flat_map(|p| [p.first(), p.second()])
    }

    /// Roster members not placed in any pair
    pub fn unmatched<'a>(&self, roster: &'a [ParticipantId]) -> Vec<&'a ParticipantId> {
        roster
            .iter()
            .filter(|id| !self.pairs.iter().any(|p| p.contains(id)))
            .collect()
    }
}
