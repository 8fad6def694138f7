//! Matching engine core
//!
//! Retry loop around single attempts, and a seeded engine wrapper

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};
use types::ids::ParticipantId;
use types::matching::Matching;
use types::pair::History;

use crate::matching::attempt::{run_attempt, AttemptResult};

/// Attempt budget used when the caller does not pick one
pub const DEFAULT_MAX_ATTEMPTS: usize = 50;

/// Result of a `generate_matching` call
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Pairs of the successful attempt, or of the last attempt on failure
    pub matching: Matching,
    /// Number of attempts that ran
    pub attempts: usize,
    /// Whether the matching holds floor(N/2) pairs
    pub complete: bool,
}

/// Partition `roster` into pairs that do not repeat any pair in `history`
///
/// Runs up to `max_attempts` randomized attempts and stops at the first
/// complete one. When the budget runs out, the last attempt's pairs are
/// returned as a best effort with `complete == false`. An incomplete
/// outcome is a normal result, not an error.
///
/// A budget of zero is treated as one attempt. Duplicate ids in `roster`
/// are not checked here; build it through `types::roster::Roster` to
/// reject them.
pub fn generate_matching<R: Rng + ?Sized>(
    roster: &[ParticipantId],
    history: &History,
    max_attempts: usize,
    rng: &mut R,
) -> MatchOutcome {
    let budget = max_attempts.max(1);
    let mut last = Matching::new();

    for attempt in 1..=budget {
        match run_attempt(roster, history, rng) {
            AttemptResult::Complete(matching) => {
                debug!(attempt, pairs = matching.len(), "Complete matching found");
                let complete = matching.is_complete_for(roster.len());
                return MatchOutcome {
                    matching,
                    attempts: attempt,
                    complete,
                };
            }
            AttemptResult::DeadEnd { partial, pivot } => {
                debug!(
                    attempt,
                    pivot = %pivot,
                    paired = partial.len(),
                    "No candidates, starting over"
                );
                last = partial;
            }
        }
    }

    warn!(
        attempts = budget,
        roster_size = roster.len(),
        history_size = history.len(),
        "Attempt budget exhausted without a complete matching"
    );

    let complete = last.is_complete_for(roster.len());
    MatchOutcome {
        matching: last,
        attempts: budget,
        complete,
    }
}

/// Matcher with its own seeded random source
///
/// Two engines built from the same seed produce identical matchings for
/// identical inputs.
pub struct MatchingEngine {
    rng: ChaCha8Rng,
    max_attempts: usize,
}

impl MatchingEngine {
    /// Create an engine with a deterministic seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Create an engine seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the attempt budget
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Generate the next matching, advancing the engine's random stream
    pub fn generate(&mut self, roster: &[ParticipantId], history: &History) -> MatchOutcome {
        generate_matching(roster, history, self.max_attempts, &mut self.rng)
    }
}
