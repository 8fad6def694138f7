//! Participant identity types
//!
//! Participants are identified by the opaque user id of the messaging
//! platform (a Slack member id such as `U024BE7LH`). No internal structure
//! is assumed; ids are only compared, hashed and displayed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a participant
///
/// Ordered so that pairs can be normalized and participant lists sorted
/// for stable output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a new ParticipantId from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A participant record as stored in the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Display name used in announcements
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
