// Deterministic, portable randomness for the lyrebird workspace.
//
// Every random decision in the word-chain generator — which strategy to
// try, which context word to feed it, whether to chain a second strategy,
// connector vs. pool injection — goes through the `RngSource` trait defined
// here. The chain core never names a concrete generator, so tests can swap
// in `ScriptedRng` and force any branch of the selection logic.
//
// The production implementation is `ChainRng`: xoshiro256++ (Blackman &
// Vigna, 2019) seeded through SplitMix64. Hand-rolled rather than pulled
// from an RNG crate so that the same seed, lexicon, and call sequence
// produce the same poem line on every platform and compiler version.
//
// **Critical constraint: determinism.** `ChainRng` must produce identical
// output given the same prior state everywhere. No floating-point
// arithmetic in the core generator and no other source of non-determinism
// belong in this module.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Source of random draws for word selection.
///
/// Three required methods cover everything the chain core needs; `chance`
/// and `choose` are derived conveniences. Implemented by `ChainRng` for
/// production and `ScriptedRng` for branch-forcing in tests.
pub trait RngSource {
    /// Next raw 64-bit value in the sequence.
    fn next_u64(&mut self) -> u64;

    /// Uniform `f64` in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[low, high)`. Panics if `low >= high`.
    fn range_usize(&mut self, low: usize, high: usize) -> usize;

    /// Return `true` with probability `p` (clamped to [0, 1]).
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform pick from a slice. Panics on an empty slice — callers
    /// guard emptiness themselves because the right fallback differs
    /// per policy.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T
    where
        Self: Sized,
    {
        assert!(!items.is_empty(), "choose: empty slice");
        &items[self.range_usize(0, items.len())]
    }
}

/// Xoshiro256++ generator — the production `RngSource`.
///
/// State is serde-serializable so a generator mid-poem can be snapshotted
/// and resumed with an identical continuation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainRng {
    s: [u64; 4],
}

impl ChainRng {
    /// Seed from a single `u64`, expanded to 256 bits via SplitMix64.
    /// Equal seeds give equal output sequences.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }
}

impl RngSource for ChainRng {
    fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Upper 53 bits fill the f64 mantissa (52 explicit + 1 implicit bit).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Rejection sampling to avoid modulo bias.
    fn range_usize(&mut self, low: usize, high: usize) -> usize {
        assert!(low < high, "range_usize: low must be less than high");
        let range = (high - low) as u64;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1)) as usize;
        }
        let threshold = range.wrapping_neg() % range; // = (2^64 - range) % range
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range) as usize;
            }
        }
    }
}

/// SplitMix64, used only to expand a small seed into xoshiro state.
/// Standard recommendation from the xoshiro authors.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Test double that replays queued draws, then falls through to a seeded
/// `ChainRng` once its script runs dry.
///
/// `next_f64` pops from the float script and `range_usize` pops from the
/// index script (taken modulo the requested range, so a scripted `0`
/// always means "first item"). Scripting only the draws a test cares
/// about keeps the remaining decisions deterministic without making the
/// test brittle to unrelated draw-order changes.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    floats: VecDeque<f64>,
    indices: VecDeque<usize>,
    fallback: ChainRng,
}

impl ScriptedRng {
    /// Create a double with the given float and index scripts.
    pub fn new(floats: &[f64], indices: &[usize]) -> Self {
        Self {
            floats: floats.iter().copied().collect(),
            indices: indices.iter().copied().collect(),
            fallback: ChainRng::new(0),
        }
    }

    /// Replace the fallback generator's seed.
    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback = ChainRng::new(seed);
        self
    }

    /// Append further float draws to the script.
    pub fn push_floats(&mut self, floats: &[f64]) {
        self.floats.extend(floats.iter().copied());
    }

    /// Append further index draws to the script.
    pub fn push_indices(&mut self, indices: &[usize]) {
        self.indices.extend(indices.iter().copied());
    }
}

impl RngSource for ScriptedRng {
    fn next_u64(&mut self) -> u64 {
        self.fallback.next_u64()
    }

    fn next_f64(&mut self) -> f64 {
        match self.floats.pop_front() {
            Some(v) => v,
            None => self.fallback.next_f64(),
        }
    }

    fn range_usize(&mut self, low: usize, high: usize) -> usize {
        assert!(low < high, "range_usize: low must be less than high");
        match self.indices.pop_front() {
            Some(i) => low + i % (high - low),
            None => self.fallback.range_usize(low, high),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ChainRng::new(42);
        let mut b = ChainRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = ChainRng::new(42);
        let mut b = ChainRng::new(43);
        // Extremely unlikely to collide on the first value.
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn f64_in_unit_range() {
        let mut rng = ChainRng::new(12345);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "f64 out of range: {v}");
        }
    }

    #[test]
    fn range_usize_within_bounds() {
        let mut rng = ChainRng::new(999);
        for _ in 0..10_000 {
            let v = rng.range_usize(5, 15);
            assert!((5..15).contains(&v), "range_usize out of range: {v}");
        }
    }

    #[test]
    fn range_usize_reaches_both_ends() {
        let mut rng = ChainRng::new(7);
        let mut saw = [false; 3];
        for _ in 0..10_000 {
            saw[rng.range_usize(0, 3)] = true;
        }
        assert!(saw.iter().all(|&s| s), "all values in [0,3) should appear");
    }

    #[test]
    fn chance_distribution() {
        let mut rng = ChainRng::new(42);
        let n = 10_000;
        let hits = (0..n).filter(|_| rng.chance(0.25)).count();
        let pct = hits as f64 / n as f64;
        assert!(
            (0.22..0.28).contains(&pct),
            "chance(0.25) should be ~25%, got {:.1}%",
            pct * 100.0
        );
    }

    #[test]
    fn chance_extremes() {
        let mut rng = ChainRng::new(42);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn choose_covers_slice() {
        let items = ["a", "b", "c", "d"];
        let mut rng = ChainRng::new(11);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..1_000 {
            seen.insert(*rng.choose(&items));
        }
        assert_eq!(seen.len(), items.len());
    }

    #[test]
    fn serialization_roundtrip_resumes_sequence() {
        let mut rng = ChainRng::new(42);
        for _ in 0..100 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: ChainRng = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }

    #[test]
    fn scripted_floats_replay_then_fall_back() {
        let mut rng = ScriptedRng::new(&[0.1, 0.9], &[]);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.9);
        // Script exhausted: falls through to the seeded generator.
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }

    #[test]
    fn scripted_indices_wrap_into_range() {
        let mut rng = ScriptedRng::new(&[], &[0, 2, 7]);
        assert_eq!(rng.range_usize(0, 3), 0);
        assert_eq!(rng.range_usize(0, 3), 2);
        // 7 % 3 == 1
        assert_eq!(rng.range_usize(0, 3), 1);
    }

    #[test]
    fn scripted_chance_uses_float_script() {
        let mut rng = ScriptedRng::new(&[0.2, 0.8], &[]);
        assert!(rng.chance(0.5));
        assert!(!rng.chance(0.5));
    }
}
