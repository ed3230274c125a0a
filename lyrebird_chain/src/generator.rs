// Per-line word selection: the strategy selector and the two line
// policies.
//
// A `LineGenerator` is created once per poem. The caller assembles each
// line word-by-word: `interior_word` for every non-final slot, then
// `line_ending_word` once, then `push_line` to commit the finished line to
// history. The generator owns its `WordSource` and `RngSource`, the
// strategy pair behind the previously emitted word, and the finalized-line
// history — nothing is shared between instances.
//
// Every selection loop is bounded by `ChainConfig::max_attempts`; when the
// budget runs out the policy returns `SelectionError::Exhausted` and the
// caller picks a fallback. A collaborator returning `None` or a candidate
// failing a filter just consumes an attempt.
//
// Draw order within one proposal is part of the crate's determinism
// contract (the scripted tests rely on it): primary-strategy pick,
// input-word bias draw, optional input-word pick, optional chain draw,
// optional secondary pick.

use lyrebird_lex::{
    CONNECTORS, Relation, WordSource, has_invalid_characters, is_common_word, too_similar,
};
use lyrebird_rng::RngSource;
use tracing::{debug, warn};

use crate::config::ChainConfig;
use crate::error::SelectionError;
use crate::strategy::{Strategy, StrategyPair, remove_one};

/// Stateful word selector for building poem lines.
pub struct LineGenerator<S, R> {
    source: S,
    rng: R,
    config: ChainConfig,
    /// The pair that produced the previously emitted word, if any.
    /// Committed only on acceptance, never on a rejected proposal.
    last_pair: Option<StrategyPair>,
    /// Finalized lines, append-only. Only the last one is consulted.
    previous_lines: Vec<String>,
}

impl<S: WordSource, R: RngSource> LineGenerator<S, R> {
    /// Create a generator with the default tuning.
    pub fn new(source: S, rng: R) -> Self {
        Self::with_config(source, rng, ChainConfig::default())
    }

    /// Create a generator with explicit tuning.
    pub fn with_config(source: S, rng: R, config: ChainConfig) -> Self {
        Self {
            source,
            rng,
            config,
            last_pair: None,
            previous_lines: Vec::new(),
        }
    }

    /// The active tuning.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Borrow the word source, e.g. to inspect a caller-owned backend.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the word source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The strategy pair behind the most recently emitted word.
    pub fn last_strategy_pair(&self) -> Option<StrategyPair> {
        self.last_pair
    }

    /// Finalized lines committed so far, oldest first.
    pub fn previous_lines(&self) -> &[String] {
        &self.previous_lines
    }

    /// Commit a finished line to history.
    pub fn push_line(&mut self, line: &str) {
        self.previous_lines.push(line.to_string());
    }

    /// Clear history and strategy memory so the instance can start a new
    /// poem.
    pub fn reset_history(&mut self) {
        self.previous_lines.clear();
        self.last_pair = None;
    }

    /// Pick a next word related to the line so far, without enforcing any
    /// rhyme against other words.
    ///
    /// Each attempt draws a primary strategy (minus the one behind the
    /// previous word), feeds it the last word of the line or, less often,
    /// a random earlier word, and sometimes chains a second strategy onto
    /// the result. With `rhymable` the accepted word must itself have at
    /// least one rhyme, so a later line can rhyme against it.
    ///
    /// `previous_words` must be non-empty: the line always has its first
    /// word before the generator is consulted.
    pub fn next_word(
        &mut self,
        previous_words: &[String],
        rhymable: bool,
    ) -> Result<String, SelectionError> {
        assert!(
            !previous_words.is_empty(),
            "next_word: previous_words must not be empty"
        );
        for _ in 0..self.config.max_attempts {
            let (candidate, pair) = self.propose(previous_words);
            let Some(word) = candidate else {
                continue;
            };
            if self.acceptable(&word, previous_words, rhymable) {
                self.last_pair = Some(pair);
                return Ok(word);
            }
            debug!(%word, "candidate rejected");
        }
        warn!(
            attempts = self.config.max_attempts,
            "next_word: attempt budget exhausted"
        );
        Err(SelectionError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// One proposal: draw strategies and an input word, consult the
    /// source, and report the pair that would be committed on acceptance.
    fn propose(&mut self, previous_words: &[String]) -> (Option<String>, StrategyPair) {
        let mut pool = Strategy::weighted_pool();
        if let Some(last) = self.last_pair {
            // Never reach two consecutive words by the same primary.
            remove_one(&mut pool, last.primary);
        }
        let primary = *self.rng.choose(&pool);

        let input_word: &str = if self.rng.chance(self.config.last_word_bias) {
            &previous_words[previous_words.len() - 1]
        } else {
            self.rng.choose(previous_words).as_str()
        };

        // FrequentFollower only makes sense fed with the word it should
        // follow, so it is never chained into a second hop.
        if primary != Strategy::FrequentFollower && self.rng.chance(self.config.chain_chance) {
            let mut secondary_pool = Strategy::weighted_pool();
            if let Some(last) = self.last_pair
                && let Some(last_secondary) = last.secondary
            {
                remove_one(&mut secondary_pool, last_secondary);
            }
            let secondary = *self.rng.choose(&secondary_pool);
            let first_hop = self.source.related(primary.relation(), input_word);
            let candidate = match &first_hop {
                Some(via) => self.source.related(secondary.relation(), via),
                None => self.source.related(secondary.relation(), input_word),
            };
            (
                candidate,
                StrategyPair {
                    primary,
                    secondary: Some(secondary),
                },
            )
        } else {
            let candidate = self.source.related(primary.relation(), input_word);
            (
                candidate,
                StrategyPair {
                    primary,
                    secondary: None,
                },
            )
        }
    }

    /// The acceptance filter for strategy-selected candidates.
    fn acceptable(&mut self, word: &str, previous_words: &[String], rhymable: bool) -> bool {
        if word.is_empty() || too_similar(word, previous_words) {
            return false;
        }
        if let Some(last_line) = self.previous_lines.last() {
            let last_line_words: Vec<String> =
                last_line.split_whitespace().map(str::to_string).collect();
            // Similarity to the previous line only rejects a candidate
            // whose characters are clean; a candidate carrying invalid
            // characters slips past this check. Preserved as-is from the
            // reference behavior — see DESIGN.md before "fixing" it.
            if too_similar(word, &last_line_words) && !has_invalid_characters(word) {
                return false;
            }
        }
        !(rhymable && !self.source.has_rhyme(word))
    }

    /// Pick the last word of a line, optionally rhyming with `rhyme_with`
    /// and capped at `max_length` characters.
    ///
    /// With a rhyme target, the source is polled for rhymes until one
    /// passes the stoplist and length filters. A `None` from the source
    /// means it has no rhymes (or none left) for the target and routes to
    /// the non-rhyme fallback; spending the whole budget on rejectable
    /// rhymes is `Exhausted` instead.
    pub fn line_ending_word(
        &mut self,
        previous_words: &[String],
        rhyme_with: Option<&str>,
        max_length: Option<usize>,
    ) -> Result<String, SelectionError> {
        assert!(
            !previous_words.is_empty(),
            "line_ending_word: previous_words must not be empty"
        );
        let Some(target) = rhyme_with else {
            // No rhyme target: any accepted word must itself be rhymable
            // so the next line can rhyme against it.
            return self.ending_from_strategies(previous_words, max_length, true);
        };

        for _ in 0..self.config.max_attempts {
            match self.source.related(Relation::Rhyme, target) {
                None => return self.ending_from_strategies(previous_words, max_length, false),
                Some(word) => {
                    if word.is_empty() || is_common_word(&word) || exceeds(&word, max_length) {
                        debug!(%word, "rhyme rejected");
                        continue;
                    }
                    return Ok(word);
                }
            }
        }
        warn!(
            attempts = self.config.max_attempts,
            rhyme_target = target,
            "line_ending_word: rhyme budget exhausted"
        );
        Err(SelectionError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// Non-rhyming line ending: strategy-selected words filtered for
    /// length, commonness, and similarity to the line.
    fn ending_from_strategies(
        &mut self,
        previous_words: &[String],
        max_length: Option<usize>,
        rhymable: bool,
    ) -> Result<String, SelectionError> {
        for _ in 0..self.config.max_attempts {
            let word = self.next_word(previous_words, rhymable)?;
            if is_common_word(&word) || exceeds(&word, max_length) {
                debug!(%word, "line ending rejected");
                continue;
            }
            // next_word already filtered similarity against the line.
            return Ok(word);
        }
        Err(SelectionError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// Pick an interior (non-final) word of a line, optionally sampling
    /// from `pool` to inject outside vocabulary.
    ///
    /// A line currently ending in a common word mostly skips that word as
    /// context and re-runs the strategies on the rest; otherwise the
    /// policy occasionally injects a connector or a pool draw, and runs
    /// the strategies the rest of the time.
    pub fn interior_word(
        &mut self,
        previous_words: &[String],
        pool: &[String],
    ) -> Result<String, SelectionError> {
        assert!(
            !previous_words.is_empty(),
            "interior_word: previous_words must not be empty"
        );
        let last = &previous_words[previous_words.len() - 1];

        if is_common_word(last) {
            if previous_words.len() > 1
                && self.rng.chance(self.config.skip_common_context_chance)
            {
                // Skip the weak word as context.
                return self.next_word(&previous_words[..previous_words.len() - 1], false);
            }
            if pool.is_empty() {
                // Nothing to sample; the strategies are the only option.
                return self.next_word(previous_words, false);
            }
            for _ in 0..self.config.max_attempts {
                let word = self.rng.choose(pool).clone();
                if !too_similar(&word, previous_words) {
                    return Ok(word);
                }
                debug!(%word, "pool draw rejected");
            }
            warn!(
                attempts = self.config.max_attempts,
                "interior_word: pool budget exhausted"
            );
            return Err(SelectionError::Exhausted {
                attempts: self.config.max_attempts,
            });
        }

        // Injection is disabled outright when there is no pool.
        let threshold = if pool.is_empty() {
            1.0
        } else {
            self.config.pool_threshold
        };
        for _ in 0..self.config.max_attempts {
            let word = if self.rng.next_f64() > threshold {
                if self.rng.chance(self.config.connector_chance) {
                    (*self.rng.choose(CONNECTORS)).to_string()
                } else {
                    self.rng.choose(pool).clone()
                }
            } else {
                self.next_word(previous_words, false)?
            };
            if !too_similar(&word, previous_words) {
                return Ok(word);
            }
            debug!(%word, "interior candidate rejected");
        }
        Err(SelectionError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }
}

/// Whether `word` exceeds an optional character cap.
fn exceeds(word: &str, max_length: Option<usize>) -> bool {
    max_length.is_some_and(|max| word.chars().count() > max)
}
