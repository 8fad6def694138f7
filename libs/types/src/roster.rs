//! Roster of participants eligible for a round

use crate::errors::TypesError;
use crate::ids::{Participant, ParticipantId};
use std::collections::HashSet;

/// Ordered list of unique participant ids
///
/// Order carries no meaning beyond being the input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster(Vec<ParticipantId>);

impl Roster {
    /// Build a roster, rejecting duplicate ids
    pub fn new(ids: Vec<ParticipantId>) -> Result<Self, TypesError> {
        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id) {
                return Err(TypesError::DuplicateParticipant { id: id.to_string() });
            }
        }
        Ok(Self(ids))
    }

    /// Build a roster from participant records, in record order
    pub fn from_participants(participants: &[Participant]) -> Result<Self, TypesError> {
        Self::new(participants.iter().map(|p| p.id.clone()).collect())
    }

    pub fn as_slice(&self) -> &[ParticipantId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of pairs in a complete matching: floor(N/2)
    pub fn required_pairs(&self) -> usize {
        self.0.len() / 2
    }
}
