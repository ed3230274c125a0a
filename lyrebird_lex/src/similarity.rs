// Word-closeness and character-validity predicates.
//
// `too_similar` is the repetition filter the chain core runs every
// candidate through: a word that repeats, contains, or trivially inflects
// a word already in the line reads as redundant, so it is rejected and
// another candidate is drawn. `has_invalid_characters` catches the rare
// junk token an upstream source can emit (digits, embedded spaces).
//
// Both predicates are pure and case-insensitive over ASCII; the metric is
// intentionally cheap — this runs inside retry loops.

/// Substring containment only counts when the shorter word is at least
/// this long, so "a" in "apart" does not trip the filter.
const MIN_CONTAINMENT_LEN: usize = 4;

/// Whether `candidate` is too close to any word in `words`.
///
/// Close means: equal ignoring case, a containment pair where the shorter
/// side has at least [`MIN_CONTAINMENT_LEN`] characters, or a trivial
/// plural of the other word.
pub fn too_similar(candidate: &str, words: &[String]) -> bool {
    if candidate.is_empty() {
        return false;
    }
    let cand = candidate.to_ascii_lowercase();
    words.iter().any(|w| close_pair(&cand, &w.to_ascii_lowercase()))
}

/// Closeness over a single pre-lowercased pair.
fn close_pair(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if shorter.len() >= MIN_CONTAINMENT_LEN && longer.contains(shorter) {
        return true;
    }
    // "stone"/"stones" without paying for containment length rules.
    longer.len() == shorter.len() + 1 && longer.ends_with('s') && longer.starts_with(shorter)
}

/// Whether `word` contains characters that disqualify it as a poem token:
/// digits, whitespace, or underscores.
pub fn has_invalid_characters(word: &str) -> bool {
    word.chars()
        .any(|c| c.is_ascii_digit() || c.is_whitespace() || c == '_')
}
