//! Unordered participant pairs and pairing history
//!
//! A `PairKey` compares and hashes without regard to orientation, so
//! `(a, b)` and `(b, a)` are the same meeting. The orientation it was built
//! with is kept for display and for the persisted history list.

use crate::errors::TypesError;
use crate::ids::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Unordered pair of two distinct participants
///
/// Serialized as a two-element array, `["U1", "U2"]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    try_from = "(ParticipantId, ParticipantId)",
    into = "(ParticipantId, ParticipantId)"
)]
pub struct PairKey {
    first: ParticipantId,
    second: ParticipantId,
}

impl PairKey {
    /// Create a pair, rejecting a participant paired with themselves
    pub fn new(
        first: impl Into<ParticipantId>,
        second: impl Into<ParticipantId>,
    ) -> Result<Self, TypesError> {
        let first = first.into();
        let second = second.into();
        if first == second {
            return Err(TypesError::SelfPair {
                id: first.to_string(),
            });
        }
        Ok(Self { first, second })
    }

    pub fn first(&self) -> &ParticipantId {
        &self.first
    }

    pub fn second(&self) -> &ParticipantId {
        &self.second
    }

    /// Check whether the participant is one side of this pair
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.first == *id || self.second == *id
    }

    /// Orientation-free view used for equality and hashing
    fn normalized(&self) -> (&ParticipantId, &ParticipantId) {
        if self.first <= self.second {
            (&self.first, &self.second)
        } else {
            (&self.second, &self.first)
        }
    }
}

impl PartialEq for PairKey {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for PairKey {}

impl Hash for PairKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl TryFrom<(ParticipantId, ParticipantId)> for PairKey {
    type Error = TypesError;

    fn try_from((first, second): (ParticipantId, ParticipantId)) -> Result<Self, Self::Error> {
        Self::new(first, second)
    }
}

impl From<PairKey> for (ParticipantId, ParticipantId) {
    fn from(pair: PairKey) -> Self {
        (pair.first, pair.second)
    }
}

/// Set of pairs formed in previous rounds
///
/// Read-only to the matcher. Callers fold a successful round back in
/// before the next call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    pairs: HashSet<PairKey>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether two participants have already met, in either orientation
    pub fn contains(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        if a == b {
            return false;
        }
        self.pairs.contains(&PairKey {
            first: a.clone(),
            second: b.clone(),
        })
    }

    pub fn contains_pair(&self, pair: &PairKey) -> bool {
        self.pairs.contains(pair)
    }

    /// Record a pair. Returns false if it was already present.
    pub fn insert(&mut self, pair: PairKey) -> bool {
        self.pairs.insert(pair)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<PairKey> for History {
    fn from_iter<I: IntoIterator<Item = PairKey>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl Extend<PairKey> for History {
    fn extend<I: IntoIterator<Item = PairKey>>(&mut self, iter: I) {
        self.pairs.extend(iter);
    }
}
