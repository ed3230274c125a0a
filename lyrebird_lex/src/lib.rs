// Lexical collaborators for the lyrebird word-chain generator.
//
// The chain core (`lyrebird_chain`) decides *how* to pick the next word;
// this crate supplies everything it consults along the way:
//
// - `source.rs`: `Relation` and the `WordSource` trait — the contract any
//   lexical backend satisfies (one word in, one candidate or nothing out)
// - `similarity.rs`: `too_similar` / `has_invalid_characters` predicates
// - `words.rs`: the common-word stoplist and connector pool
// - `lib.rs` (this file): `Lexicon` — an offline relation table loaded
//   from JSON, following the same pattern as the sim crate's config (JSON
//   string in, typed struct out). `default_lexicon()` embeds
//   `data/lexicon.json` at compile time via `include_str!`.
//
// The table lexicon stands in for a network lexical-relations API;
// transport and response parsing live outside this workspace, and a
// backend failure is simply `None` at the `WordSource` seam.
//
// Determinism constraint: draws from neighbor lists go through
// `lyrebird_rng::ChainRng`, and entry order from the JSON file is
// preserved, so the same seed and file give the same candidate stream.

pub mod similarity;
pub mod source;
pub mod words;

// Re-export the items the chain core uses at every call site.
pub use similarity::{has_invalid_characters, too_similar};
pub use source::{Relation, WordSource};
pub use words::{CONNECTORS, COMMON_WORDS, is_common_word};

use lyrebird_rng::{ChainRng, RngSource};
use serde::Deserialize;

/// The top-level JSON structure for a lexicon file.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    entries: Vec<LexEntry>,
}

/// One word's neighbor lists, as stored in JSON. Absent lists default to
/// empty, which the table reports as "no candidate".
#[derive(Debug, Clone, Deserialize)]
struct LexEntry {
    word: String,
    #[serde(default)]
    similar_sound: Vec<String>,
    #[serde(default)]
    similar_meaning: Vec<String>,
    #[serde(default)]
    context_link: Vec<String>,
    #[serde(default)]
    frequent_follower: Vec<String>,
    #[serde(default)]
    rhyme: Vec<String>,
}

impl LexEntry {
    fn list(&self, relation: Relation) -> &[String] {
        match relation {
            Relation::SimilarSound => &self.similar_sound,
            Relation::SimilarMeaning => &self.similar_meaning,
            Relation::ContextLink => &self.context_link,
            Relation::FrequentFollower => &self.frequent_follower,
            Relation::Rhyme => &self.rhyme,
        }
    }
}

/// An offline relation table implementing `WordSource`.
///
/// Lookup is ASCII case-insensitive over the entry words; a hit draws
/// uniformly from the requested neighbor list with the table's own
/// generator, so one word can yield different neighbors across calls
/// while the whole stream stays reproducible per seed.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexEntry>,
    rng: ChainRng,
}

impl Lexicon {
    /// Parse a lexicon from a JSON string. Draws are seeded with 0;
    /// use `with_seed` to change that.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: LexiconFile = serde_json::from_str(json)?;
        Ok(Lexicon {
            entries: file.entries,
            rng: ChainRng::new(0),
        })
    }

    /// Replace the draw seed (builder style).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChainRng::new(seed);
        self
    }

    /// Number of entry words in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entry words, in file order.
    pub fn entry_words(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.word.as_str()).collect()
    }

    fn entry(&self, word: &str) -> Option<&LexEntry> {
        self.entries
            .iter()
            .find(|e| e.word.eq_ignore_ascii_case(word))
    }
}

impl WordSource for Lexicon {
    fn related(&mut self, relation: Relation, word: &str) -> Option<String> {
        let list = self.entry(word)?.list(relation).to_vec();
        if list.is_empty() {
            return None;
        }
        let idx = self.rng.range_usize(0, list.len());
        Some(list[idx].clone())
    }
}

/// Load the default lexicon embedded at compile time.
///
/// Panics if the embedded JSON is malformed (cannot happen in a released
/// build; the load is covered by tests).
pub fn default_lexicon() -> Lexicon {
    let json = include_str!("../data/lexicon.json");
    Lexicon::from_json(json).expect("embedded lexicon.json is malformed")
}
