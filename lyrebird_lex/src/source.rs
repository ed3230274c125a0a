// The collaborator contract the chain core selects words through.
//
// A `WordSource` maps one word to one related candidate, or to nothing.
// "Nothing" covers every upstream outcome the core does not care to
// distinguish: the word is unknown, the relation list is empty, or a
// network-backed implementation failed or timed out. The core reacts to
// all of these the same way — try a different strategy or input word.

use serde::{Deserialize, Serialize};

/// The closed set of lexical relations a `WordSource` can be asked for.
///
/// The first four are the next-word strategies; `Rhyme` is consulted
/// separately for line endings and rhymability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Phonetically close word (assonance/consonance neighbor).
    SimilarSound,
    /// Synonym or near-synonym.
    SimilarMeaning,
    /// Word that co-occurs with the input in running text.
    ContextLink,
    /// Word that statistically follows the input.
    FrequentFollower,
    /// Word with a matching rhyme sound.
    Rhyme,
}

/// One word in, one candidate (or nothing) out.
///
/// `&mut self` allows implementations to own their randomness or cache;
/// the table-backed `Lexicon` draws uniformly from its neighbor lists.
pub trait WordSource {
    /// A word related to `word` under `relation`, if the source has one.
    fn related(&mut self, relation: Relation, word: &str) -> Option<String>;

    /// Whether `word` has at least one rhyme available.
    fn has_rhyme(&mut self, word: &str) -> bool {
        self.related(Relation::Rhyme, word).is_some()
    }
}
