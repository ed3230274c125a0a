// Stochastic word-chain selection core for poem lines.
//
// The caller builds a line word-by-word against a `LineGenerator`:
// `interior_word` for each non-final slot, `line_ending_word` once
// (optionally rhyming against the previous line's ending), `push_line` to
// commit the finished line. The generator varies *how* each word is
// reached — alternating relation strategies, weighted randomness, chained
// fallbacks — while filtering out candidates that repeat or echo nearby
// words.
//
// Architecture:
// - `strategy.rs`: the closed `Strategy` set and per-emission `StrategyPair`
// - `config.rs`: `ChainConfig` — all probabilities and the attempt budget
// - `error.rs`: `SelectionError` — the typed exhaustion outcome
// - `generator.rs`: `LineGenerator` and the three selection policies
//
// Collaborators come from `lyrebird_lex` (the `WordSource` seam, the
// similarity and validity predicates, the stoplist) and randomness from
// `lyrebird_rng`. Single-threaded by contract: every operation is
// `&mut self`, and with equal seeds, lexicon, and call sequence the
// output is identical on every platform.

pub mod config;
pub mod error;
pub mod generator;
pub mod strategy;

pub use config::ChainConfig;
pub use error::SelectionError;
pub use generator::LineGenerator;
pub use strategy::{Strategy, StrategyPair};
