// Next-word strategies and the per-emission strategy pair.
//
// A strategy names one way of hopping from a word to a related word. The
// set is closed: strategy exclusion ("don't repeat the pair that produced
// the previous word") is plain variant equality, never function identity.
// Rhyme is deliberately not a member — rhyming is a constraint layered on
// by the final-word policy, not a next-word hop.

use lyrebird_lex::Relation;
use serde::{Deserialize, Serialize};

/// One way of mapping a word to a related next-word candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Phonetic neighbor.
    SimilarSound,
    /// Synonym or near-synonym.
    SimilarMeaning,
    /// Co-occurrence neighbor.
    ContextLink,
    /// Statistically following word.
    FrequentFollower,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 4] = [
        Strategy::SimilarSound,
        Strategy::SimilarMeaning,
        Strategy::ContextLink,
        Strategy::FrequentFollower,
    ];

    /// The lexical relation this strategy asks a `WordSource` for.
    pub fn relation(self) -> Relation {
        match self {
            Strategy::SimilarSound => Relation::SimilarSound,
            Strategy::SimilarMeaning => Relation::SimilarMeaning,
            Strategy::ContextLink => Relation::ContextLink,
            Strategy::FrequentFollower => Relation::FrequentFollower,
        }
    }

    /// The draw pool for one proposal: every strategy once, with
    /// `FrequentFollower` doubled so it wins the uniform draw twice as
    /// often as the others.
    pub fn weighted_pool() -> Vec<Strategy> {
        vec![
            Strategy::SimilarSound,
            Strategy::SimilarMeaning,
            Strategy::ContextLink,
            Strategy::FrequentFollower,
            Strategy::FrequentFollower,
        ]
    }
}

/// The strategies that produced the most recent emitted word.
///
/// Held by the line generator and committed exactly once per successful
/// emission; the next proposal excludes `primary` (and `secondary`, when
/// chaining) from its draw pools so no two consecutive words are reached
/// the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyPair {
    /// The strategy applied first.
    pub primary: Strategy,
    /// The chained second strategy, if one was used.
    pub secondary: Option<Strategy>,
}

/// Remove one occurrence of `strategy` from a draw pool. A doubled entry
/// (FrequentFollower) therefore stays drawable once after exclusion.
pub(crate) fn remove_one(pool: &mut Vec<Strategy>, strategy: Strategy) {
    if let Some(pos) = pool.iter().position(|&s| s == strategy) {
        pool.remove(pos);
    }
}
