// Fixed word sets used by the selection policies.
//
// `COMMON_WORDS` is the stoplist of function words too weak to end a line
// on (and treated specially as interior context). `CONNECTORS` is the
// small pool of glue words the interior-word policy can inject directly.
// Hardcoded rather than derived: the policies need them before any
// lexicon exists.

/// Function words considered weak or awkward as a line-ending word.
pub const COMMON_WORDS: &[&str] = &[
    "the", "with", "in", "that", "not", "a", "an", "of", "for", "as", "like", "on", "his",
    "your", "my", "their",
];

/// Glue words the interior-word policy may inject between content words.
pub const CONNECTORS: &[&str] = &["and", "or", "as", "like", "with"];

/// Whether `word` is in the common-word stoplist (ASCII case-insensitive).
pub fn is_common_word(word: &str) -> bool {
    COMMON_WORDS.iter().any(|w| w.eq_ignore_ascii_case(word))
}
