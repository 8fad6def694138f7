//! Single pairing attempt
//!
//! Shuffles the roster, then repeatedly pairs the first remaining
//! participant with a uniformly chosen eligible partner. A pivot with no
//! eligible partner abandons the whole attempt; there is no backtracking.

use rand::seq::SliceRandom;
use rand::Rng;
use types::ids::ParticipantId;
use types::matching::Matching;
use types::pair::History;

use crate::matching::candidates::eligible_partners;

/// Result of one attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptResult {
    /// Every participant but at most one was paired
    Complete(Matching),
    /// A pivot ran out of eligible partners
    DeadEnd {
        /// Pairs assigned before the dead end
        partial: Matching,
        pivot: ParticipantId,
    },
}

/// Run one shuffle-and-greedy-assign pass
///
/// Draws from `rng` for the shuffle and for every partner choice, so two
/// consecutive attempts on the same generator explore different orders.
pub fn run_attempt<R: Rng + ?Sized>(
    roster: &[ParticipantId],
    history: &History,
    rng: &mut R,
) -> AttemptResult {
    let mut pending = roster.to_vec();
    pending.shuffle(rng);

    let mut matching = Matching::new();

    while pending.len() >= 2 {
        let pivot = pending[0].clone();
        let candidates = eligible_partners(&pivot, &pending, history, &matching);

        let Some((idx, pair)) = candidates.choose(rng).cloned() else {
            return AttemptResult::DeadEnd {
                partial: matching,
                pivot,
            };
        };

        // idx > 0: the pivot at index 0 is never its own candidate
        pending.remove(idx);
        pending.remove(0);
        matching.push(pair);
    }

    AttemptResult::Complete(matching)
}
