//! Matching logic module
//!
//! Implements one randomized shuffle-and-greedy-assign attempt

pub mod candidates;
pub mod attempt;

pub use attempt::{run_attempt, AttemptResult};
pub use candidates::eligible_partners;
