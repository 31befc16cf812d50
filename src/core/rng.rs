//! Deterministic Random Number Generator
//!
//! Xoroshiro-style 128-bit generator seeded through SplitMix64.
//! Given the same seed, produces an identical sequence on all platforms,
//! which is what makes fixture pairings and scores reproducible in tests.

use serde::{Serialize, Deserialize};
use sha2::{Sha256, Digest};

/// Deterministic PRNG with 128 bits of state.
///
/// # Example
///
/// ```
/// use auto_football::core::rng::DeterministicRng;
///
/// let mut a = DeterministicRng::new(12345);
/// let mut b = DeterministicRng::new(12345);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to expand the seed so that sequential seeds
    /// (fixture ids, counters) still land on well-separated states.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // All-zero state is a fixed point
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range [0, max).
    ///
    /// Plain modulo reduction. The bias is negligible for the tiny ranges
    /// used here (goal counts, roster sizes).
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % max as u64) as u32
    }

    /// Generate a random integer in range [min, max].
    #[inline]
    pub fn next_int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.next_int(max - min + 1)
    }

    /// Pick two distinct indices in [0, len).
    ///
    /// Returns `None` when fewer than two items are available.
    pub fn pick_distinct_pair(&mut self, len: usize) -> Option<(usize, usize)> {
        if len < 2 {
            return None;
        }
        let first = self.next_int(len as u32) as usize;
        let mut second = self.next_int(len as u32 - 1) as usize;
        if second >= first {
            second += 1;
        }
        Some((first, second))
    }
}

/// SplitMix64 for seed initialization.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a per-call outcome seed from environment entropy.
///
/// Inputs are block height, block timestamp, the fixture id and a
/// ledger-wide nonce that separates several draws inside the same block.
///
/// # Weakness
///
/// Every input is publicly observable. Whoever can choose the block (or the
/// ordering of calls inside it) can grind these inputs and steer the
/// outcome. Production deployments should inject a verifiable randomness
/// source through [`crate::ledger::simulator::EntropySource`] instead.
pub fn derive_outcome_seed(
    block_height: u64,
    timestamp: u64,
    match_id: u64,
    nonce: u64,
) -> u64 {
    let mut hasher = Sha256::new();

    // Domain separator
    hasher.update(b"AUTO_FOOTBALL_SEED_V1");

    hasher.update(block_height.to_le_bytes());
    hasher.update(timestamp.to_le_bytes());
    hasher.update(match_id.to_le_bytes());
    hasher.update(nonce.to_le_bytes());

    let hash = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&hash[0..8]);
    u64::from_le_bytes(seed)
}

// =============================================================================
// TESTS
// =============================================================================
