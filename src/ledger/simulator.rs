//! Outcome Simulator
//!
//! Turns a 64-bit seed into a bounded score or a fixture pairing.
//! Seeds come from an injected [`EntropySource`]; nothing here collects
//! entropy on its own, so every draw is reproducible from its seed.

use crate::core::hash::hash_with_domain;
use crate::core::rng::{DeterministicRng, derive_outcome_seed};
use super::roster;
use super::types::{League, MatchId, Score};

/// Inputs available to an entropy source for one draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntropyInput {
    /// Height of the block executing the call
    pub block_height: u64,
    /// Timestamp of the block executing the call
    pub timestamp: u64,
    /// Fixture the draw is for
    pub match_id: MatchId,
    /// Ledger-wide draw counter, separates draws in the same block
    pub nonce: u64,
}

/// Narrow seam for randomness.
///
/// The ledger asks for one seed per draw and never looks at where it
/// came from. Swap in a verifiable randomness source here.
pub trait EntropySource {
    /// Produce the seed for one draw.
    fn seed_for(&mut self, input: &EntropyInput) -> u64;
}

impl<E: EntropySource + ?Sized> EntropySource for Box<E> {
    fn seed_for(&mut self, input: &EntropyInput) -> u64 {
        (**self).seed_for(input)
    }
}

/// Seeds derived from public chain state (block height, timestamp,
/// fixture id, nonce).
///
/// Matches how on-chain deployments draw outcomes. A party that can
/// pick the block or order calls within it can predict and steer results;
/// see [`derive_outcome_seed`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ChainEntropy;

impl EntropySource for ChainEntropy {
    fn seed_for(&mut self, input: &EntropyInput) -> u64 {
        derive_outcome_seed(input.block_height, input.timestamp, input.match_id, input.nonce)
    }
}

/// Seeds from a private base seed, keyed by the draw nonce.
///
/// Each draw depends only on the base seed and `input.nonce`, so a ledger
/// restored from a snapshot picks up exactly where the saved nonce left off.
#[derive(Clone, Copy, Debug)]
pub struct SeededEntropy {
    seed: u64,
}

impl SeededEntropy {
    /// Create from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl EntropySource for SeededEntropy {
    fn seed_for(&mut self, input: &EntropyInput) -> u64 {
        let mut data = [0u8; 16];
        data[..8].copy_from_slice(&self.seed.to_le_bytes());
        data[8..].copy_from_slice(&input.nonce.to_le_bytes());
        let hash = hash_with_domain(b"AUTO_FOOTBALL_SEEDED_V1", &data);

        let mut seed = [0u8; 8];
        seed.copy_from_slice(&hash[0..8]);
        u64::from_le_bytes(seed)
    }
}

/// Simulate a final score with both sides in `0..=max_goals`.
pub fn simulate_score(seed: u64, max_goals: u8) -> Score {
    let mut rng = DeterministicRng::new(seed);
    let goals_a = rng.next_int_inclusive(0, max_goals as u32) as u8;
    let goals_b = rng.next_int_inclusive(0, max_goals as u32) as u8;
    Score { goals_a, goals_b }
}

/// Pick two distinct teams from a league roster.
///
/// Returns `None` only if the roster has fewer than two teams.
pub fn select_pairing(seed: u64, league: League) -> Option<(&'static str, &'static str)> {
    let teams = roster::teams(league);
    let mut rng = DeterministicRng::new(seed);
    let (a, b) = rng.pick_distinct_pair(teams.len())?;
    Some((teams[a], teams[b]))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(match_id: MatchId, nonce: u64) -> EntropyInput {
        EntropyInput {
            block_height: 10,
            timestamp: 1_700_000_000,
            match_id,
            nonce,
        }
    }

    #[test]
    fn test_simulate_score_reproducible() {
        assert_eq!(simulate_score(777, 5), simulate_score(777, 5));
    }

    #[test]
    fn test_simulate_score_zero_bound() {
        let score = simulate_score(123, 0);
        assert_eq!(score, Score { goals_a: 0, goals_b: 0 });
    }

    #[test]
    fn test_select_pairing_distinct() {
        for seed in 0..500 {
            for league in League::ALL {
                let (a, b) = select_pairing(seed, league).unwrap();
                assert_ne!(a, b);
                assert!(roster::teams(league).contains(&a));
                assert!(roster::teams(league).contains(&b));
            }
        }
    }

    #[test]
    fn test_chain_entropy_follows_inputs() {
        let mut entropy = ChainEntropy;
        let s1 = entropy.seed_for(&input(1, 0));
        let s2 = entropy.seed_for(&input(1, 0));
        let s3 = entropy.seed_for(&input(1, 1));
        assert_eq!(s1, s2);
        assert_ne!(s1, s3);
    }

    #[test]
    fn test_seeded_entropy_reproducible() {
        let mut a = SeededEntropy::new(42);
        let mut b = SeededEntropy::new(42);
        for i in 0..20 {
            assert_eq!(a.seed_for(&input(i, i)), b.seed_for(&input(i, i)));
        }
    }

    #[test]
    fn test_seeded_entropy_keyed_by_nonce() {
        let mut used = SeededEntropy::new(42);
        for i in 0..10 {
            used.seed_for(&input(i, i));
        }
        // A fresh source agrees with one that has already drawn
        let mut fresh = SeededEntropy::new(42);
        assert_eq!(used.seed_for(&input(3, 10)), fresh.seed_for(&input(3, 10)));
        assert_ne!(fresh.seed_for(&input(3, 10)), fresh.seed_for(&input(3, 11)));
        assert_ne!(fresh.seed_for(&input(3, 10)), SeededEntropy::new(43).seed_for(&input(3, 10)));
    }

    #[test]
    fn test_boxed_source() {
        let mut boxed: Box<dyn EntropySource> = Box::new(SeededEntropy::new(9));
        let mut plain = SeededEntropy::new(9);
        assert_eq!(boxed.seed_for(&input(1, 0)), plain.seed_for(&input(1, 0)));
    }

    proptest! {
        #[test]
        fn prop_score_within_bound(seed in any::<u64>(), max_goals in 0u8..=12) {
            let score = simulate_score(seed, max_goals);
            prop_assert!(score.goals_a <= max_goals);
            prop_assert!(score.goals_b <= max_goals);
            prop_assert!(score.outcome().is_set());
        }

        #[test]
        fn prop_pairing_distinct(seed in any::<u64>(), league_idx in 0u8..3) {
            let league = League::from_index(league_idx).unwrap();
            let (a, b) = select_pairing(seed, league).unwrap();
            prop_assert_ne!(a, b);
        }
    }
}
