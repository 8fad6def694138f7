//! Error types for the pairing domain
//!
//! Validation errors raised when building rosters and pairs from
//! externally supplied data. The matcher itself never fails.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("Participant cannot be paired with themselves: {id}")]
    SelfPair { id: String },

    #[error("Duplicate participant in roster: {id}")]
    DuplicateParticipant { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_pair_display() {
        let err = TypesError::SelfPair { id: "U1".to_string() };
        assert_eq!(err.to_string(), "Participant cannot be paired with themselves: U1");
    }

    #[test]
    fn test_duplicate_participant_display() {
        let err = TypesError::DuplicateParticipant { id: "U7".to_string() };
        assert!(err.to_string().contains("U7"));
    }
}
