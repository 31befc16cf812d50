//! Core deterministic primitives.
//!
//! Seeded randomness, state hashing, value amounts and account identities.
//! Nothing in here reads the clock or the environment.

pub mod rng;
pub mod hash;
pub mod amount;
pub mod identity;

// Re-export core types
pub use rng::DeterministicRng;
pub use hash::{StateHash, compute_ledger_hash};
pub use amount::{Amount, UNIT};
pub use identity::Identity;
