// Data-driven tunables for the selection policies.
//
// Every probability and bound the policies consult lives in `ChainConfig`,
// loaded from JSON or taken from `Default` — the policy code itself never
// hardcodes a magic number. The defaults reproduce the reference tuning of
// the word-chain algorithm.

use serde::{Deserialize, Serialize};

/// Tunable parameters for the word-selection policies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Probability the strategy input is the line's last word rather than
    /// a uniform pick over all previous words.
    pub last_word_bias: f64,
    /// Probability of chaining a second strategy onto the primary one
    /// (never applied when the primary is FrequentFollower).
    pub chain_chance: f64,
    /// When the line ends in a common word: probability the interior-word
    /// policy skips that word as context and uses the strategies instead
    /// of the sampling pool. Only applies to lines of more than one word.
    pub skip_common_context_chance: f64,
    /// Interior-word injection threshold when a sampling pool is present.
    /// A uniform draw above this triggers connector/pool injection; with
    /// no pool the threshold is forced to 1.0 and injection is disabled.
    pub pool_threshold: f64,
    /// Given an injection, probability of a connector word over a pool
    /// draw.
    pub connector_chance: f64,
    /// Proposal budget for each selection call. When spent without an
    /// acceptable candidate, the policy returns
    /// `SelectionError::Exhausted` instead of retrying forever.
    pub max_attempts: u32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            last_word_bias: 0.75,
            chain_chance: 0.25,
            skip_common_context_chance: 0.85,
            pool_threshold: 0.6,
            connector_chance: 0.5,
            max_attempts: 64,
        }
    }
}

impl ChainConfig {
    /// Parse a config from a JSON string. Missing fields fall back to
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
