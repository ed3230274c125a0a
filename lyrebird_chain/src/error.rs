// Typed outcomes for the selection policies.
//
// A collaborator returning nothing or a candidate failing a filter is not
// an error — the policies silently retry those within their attempt
// budget. The only failure callers see is the budget running out.

use thiserror::Error;

/// Failure of a selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The proposal budget was spent without any candidate passing the
    /// acceptance filters. Callers decide the fallback: relax a
    /// constraint, widen the lexicon, or end the line early.
    #[error("no acceptable word found within {attempts} attempts")]
    Exhausted {
        /// The budget that was exhausted (`ChainConfig::max_attempts`).
        attempts: u32,
    },
}
