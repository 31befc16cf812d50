//! # Auto Football Ledger
//!
//! Fixture, wagering and settlement ledger for simulated football rounds.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    AUTO FOOTBALL LEDGER                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Seeded PRNG and outcome seed derivation   │
//! │  ├── hash.rs     - State hashing for verification            │
//! │  ├── amount.rs   - Integer value amounts                     │
//! │  └── identity.rs - Account identities                        │
//! │                                                              │
//! │  ledger/         - State machine (deterministic)             │
//! │  ├── registry.rs - Fixture generation and resolution         │
//! │  ├── simulator.rs- Entropy sources and score simulation      │
//! │  ├── wagering.rs - Accumulator bet placement                 │
//! │  ├── settlement.rs- Claims and payouts                       │
//! │  ├── treasury.rs - Pool funding and authority withdrawal     │
//! │  ├── events.rs   - Append-only notification log              │
//! │  ├── views.rs    - Read-only queries                         │
//! │  └── snapshot.rs - Persist and restore                       │
//! │                                                              │
//! │  service.rs      - Async shared access (non-deterministic)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `ledger/` modules are deterministic:
//! - No floating-point arithmetic in settlement
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - Time comes only from the caller's block info
//! - All randomness flows through an injected entropy source
//!
//! Given the same entropy seed and the same sequence of calls, two
//! ledgers end in the same state hash.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod ledger;
pub mod service;

// Re-export commonly used types
pub use core::amount::{Amount, UNIT};
pub use core::identity::Identity;
pub use core::rng::DeterministicRng;
pub use ledger::{
    AccountBook, Bet, BlockInfo, CallContext, Ledger, LedgerConfig, LedgerError, League, Match,
    Outcome,
};
pub use service::LedgerService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
