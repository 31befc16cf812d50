//! Ledger state machine.
//!
//! Everything here is deterministic given the entropy source: fixtures,
//! bets and balances live in one owned [`Ledger`] and change only through
//! its operations.
//!
//! ```text
//! generate_fixtures ─▶ resolve_fixtures ─▶ (place_bet before resolve)
//!        │                    │                     │
//!   cooldown gate        simulator              stake ─▶ balance
//!                                                   │
//!                           claim ◀─────────────────┘
//!                             │
//!                    balance ─▶ ValueTransfer ◀── withdraw (authority)
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod registry;
pub mod roster;
pub mod settlement;
pub mod simulator;
pub mod snapshot;
pub mod state;
pub mod treasury;
pub mod types;
pub mod views;
pub mod wagering;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::LedgerConfig;
pub use context::{BlockInfo, CallContext};
pub use error::{ErrorKind, LedgerError, LedgerResult, TransferError};
pub use events::{EventLog, LedgerEvent, LedgerEventData};
pub use settlement::evaluate_bet;
pub use simulator::{ChainEntropy, EntropyInput, EntropySource, SeededEntropy};
pub use snapshot::{LedgerSnapshot, SnapshotError};
pub use state::{Ledger, LedgerState};
pub use treasury::{AccountBook, ValueTransfer};
pub use types::{Bet, BetId, League, Leg, Match, MatchId, Outcome, Score};
