//! Pair Matching Engine
//!
//! Partitions a roster of participants into disjoint pairs for 1:1
//! meetings, never repeating a pair from the history.
//!
//! Uses randomized greedy assignment with full restart on dead ends rather
//! than backtracking: each attempt shuffles the roster and pairs the first
//! remaining participant with a random eligible partner. Completeness is
//! probabilistic and bounded by the attempt budget.
//!
//! **Key Invariants:**
//! - No participant is paired with themselves
//! - No participant appears in two pairs of one matching
//! - No returned pair repeats a history pair, in either orientation
//! - Deterministic output for a fixed seed

pub mod matching;
pub mod engine;

pub use engine::{generate_matching, MatchOutcome, MatchingEngine, DEFAULT_MAX_ATTEMPTS};
