//! Ledger Snapshots
//!
//! Serializes the full ledger state and notification log so a ledger can
//! be persisted and restored bit-for-bit. The state hash is recorded at
//! capture time and re-checked on restore.

use serde::{Serialize, Deserialize};
use tracing::info;

use crate::core::hash::StateHash;
use super::config::LedgerConfig;
use super::events::{EventLog, LedgerEvent};
use super::simulator::EntropySource;
use super::state::{Ledger, LedgerState};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u8 = 1;

/// Captured ledger state plus its notification log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Format version.
    pub version: u8,
    /// Full persistent state.
    pub state: LedgerState,
    /// Every notification emitted so far.
    pub events: Vec<LedgerEvent>,
    /// Hash of `state` at capture time.
    pub state_hash: StateHash,
}

/// Errors loading or restoring a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Encoding failed.
    #[error("snapshot encoding failed: {0}")]
    Encode(String),

    /// Bytes are not a snapshot.
    #[error("snapshot decoding failed: {0}")]
    Decode(String),

    /// Written by an incompatible version.
    #[error("snapshot version mismatch: expected {expected}, got {got}")]
    VersionMismatch {
        /// Supported version
        expected: u8,
        /// Version found
        got: u8,
    },

    /// State does not hash to the recorded value.
    #[error("snapshot state hash mismatch")]
    HashMismatch,

    /// Counters, indexes or the event log disagree with the tables.
    #[error("snapshot state is inconsistent")]
    Inconsistent,
}

impl LedgerSnapshot {
    /// Serialize to bytes using bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Deserialize from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(data).map_err(|e| SnapshotError::Decode(e.to_string()))
    }

    /// Check version, hash and internal consistency.
    pub fn verify(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                got: self.version,
            });
        }
        if self.state.compute_hash() != self.state_hash {
            return Err(SnapshotError::HashMismatch);
        }
        if !self.state.is_consistent() {
            return Err(SnapshotError::Inconsistent);
        }
        Ok(())
    }
}

impl<E: EntropySource> Ledger<E> {
    /// Capture the current state and log.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            version: SNAPSHOT_VERSION,
            state: self.state.clone(),
            events: self.events.all().to_vec(),
            state_hash: self.state.compute_hash(),
        }
    }

    /// Rebuild a ledger from a verified snapshot.
    ///
    /// The entropy source is supplied fresh; the nonce it is fed continues
    /// from the snapshot, so a source keyed by the nonce (such as
    /// [`SeededEntropy`](super::simulator::SeededEntropy) with the same
    /// seed) resumes its draws instead of repeating them.
    pub fn restore(snapshot: LedgerSnapshot, config: LedgerConfig, entropy: E) -> Result<Self, SnapshotError> {
        snapshot.verify()?;
        let events = EventLog::from_events(snapshot.events).ok_or(SnapshotError::Inconsistent)?;

        info!(
            "Ledger restored: {} fixtures, {} bets, {} events",
            snapshot.state.match_counter,
            snapshot.state.bet_counter,
            events.len()
        );

        Ok(Self {
            state: snapshot.state,
            config,
            entropy,
            events,
        })
    }
}
