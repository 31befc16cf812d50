//! Ledger Notifications
//!
//! Append-only log of everything the ledger commits. Consumers rebuild
//! their view of the world by replaying it alongside the read-only views.

use serde::{Serialize, Deserialize};

use crate::core::amount::Amount;
use crate::core::identity::Identity;
use super::context::BlockInfo;
use super::types::{BetId, League, MatchId, Outcome};

/// Notification payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEventData {
    /// Fixture created
    MatchCreated {
        id: MatchId,
        league: League,
        team_a: String,
        team_b: String,
    },

    /// Fixture resolved
    MatchPlayed {
        id: MatchId,
        goals_a: u8,
        goals_b: u8,
        result: Outcome,
    },

    /// Bet recorded
    BetPlaced {
        id: BetId,
        bettor: Identity,
        match_ids: Vec<MatchId>,
        stake: Amount,
    },

    /// Bet settled (payout 0 for a loss)
    BetClaimed {
        id: BetId,
        bettor: Identity,
        payout: Amount,
    },

    /// Value added to the shared balance
    PoolFunded {
        from: Identity,
        amount: Amount,
    },

    /// Treasury withdrawal
    Withdrawal {
        authority: Identity,
        amount: Amount,
    },
}

/// A notification with its position in the log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Log position, strictly increasing from 1
    pub seq: u64,
    /// Height of the block that committed it
    pub block_height: u64,
    /// Timestamp of the block that committed it
    pub timestamp: u64,
    /// Payload
    pub data: LedgerEventData,
}

impl LedgerEventData {
    /// Create match created event data.
    pub fn match_created(id: MatchId, league: League, team_a: &str, team_b: &str) -> Self {
        LedgerEventData::MatchCreated {
            id,
            league,
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
        }
    }

    /// Create match played event data.
    pub fn match_played(id: MatchId, goals_a: u8, goals_b: u8, result: Outcome) -> Self {
        LedgerEventData::MatchPlayed { id, goals_a, goals_b, result }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEventData::MatchCreated { .. } => "MatchCreated",
            LedgerEventData::MatchPlayed { .. } => "MatchPlayed",
            LedgerEventData::BetPlaced { .. } => "BetPlaced",
            LedgerEventData::BetClaimed { .. } => "BetClaimed",
            LedgerEventData::PoolFunded { .. } => "PoolFunded",
            LedgerEventData::Withdrawal { .. } => "Withdrawal",
        }
    }
}

/// Append-only notification log.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<LedgerEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch committed by one operation. Returns the sequence
    /// number of the last appended event.
    pub(crate) fn append_all(&mut self, block: &BlockInfo, batch: Vec<LedgerEventData>) -> u64 {
        for data in batch {
            let seq = self.events.len() as u64 + 1;
            self.events.push(LedgerEvent {
                seq,
                block_height: block.height,
                timestamp: block.timestamp,
                data,
            });
        }
        self.last_seq()
    }

    /// Sequence number of the newest event (0 when empty).
    pub fn last_seq(&self) -> u64 {
        self.events.len() as u64
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Is the log empty?
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in order.
    pub fn all(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Events with `seq > after`, for incremental replay.
    pub fn since(&self, after: u64) -> &[LedgerEvent] {
        let start = (after as usize).min(self.events.len());
        &self.events[start..]
    }

    /// Rebuild from stored events. Sequence numbers must run 1..=n.
    pub(crate) fn from_events(events: Vec<LedgerEvent>) -> Option<Self> {
        let contiguous = events
            .iter()
            .enumerate()
            .all(|(i, e)| e.seq == i as u64 + 1);
        contiguous.then_some(Self { events })
    }
}
