//! Ledger State
//!
//! One owned state object holds every fixture, bet, counter and the shared
//! balance. Operations live in the sibling modules as `impl Ledger` blocks;
//! each validates everything before it writes anything.
//!
//! Uses BTreeMap for deterministic iteration order.

use std::collections::{BTreeMap, BTreeSet};
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::core::amount::Amount;
use crate::core::hash::{StateHash, compute_ledger_hash};
use crate::core::identity::Identity;
use super::config::LedgerConfig;
use super::context::BlockInfo;
use super::events::{EventLog, LedgerEventData};
use super::simulator::{ChainEntropy, EntropyInput, EntropySource};
use super::types::{Bet, BetId, Match, MatchId};

/// Persistent ledger data.
///
/// Fields are crate-private: only ledger operations mutate them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Id of the newest fixture (0 before the first)
    pub(crate) match_counter: u64,
    /// Id of the newest bet (0 before the first)
    pub(crate) bet_counter: u64,
    /// Timestamp of the last successful generation (deploy time initially)
    pub(crate) last_generation_time: u64,
    /// Account allowed to withdraw
    pub(crate) authority: Identity,
    /// Stakes received minus payouts and withdrawals
    pub(crate) balance: Amount,
    /// Sum of stakes of bets not yet claimed
    pub(crate) open_stake: Amount,
    /// Draw counter fed to the entropy source
    pub(crate) entropy_nonce: u64,
    /// All fixtures by id
    pub(crate) matches: BTreeMap<MatchId, Match>,
    /// Fixtures not yet played
    pub(crate) open_matches: BTreeSet<MatchId>,
    /// All bets by id
    pub(crate) bets: BTreeMap<BetId, Bet>,
    /// Bet ids per bettor, in placement order
    pub(crate) bets_by_bettor: BTreeMap<Identity, Vec<BetId>>,
}

impl LedgerState {
    /// Empty state deployed at `deployed_at`.
    pub fn new(authority: Identity, deployed_at: u64) -> Self {
        Self {
            match_counter: 0,
            bet_counter: 0,
            last_generation_time: deployed_at,
            authority,
            balance: 0,
            open_stake: 0,
            entropy_nonce: 0,
            matches: BTreeMap::new(),
            open_matches: BTreeSet::new(),
            bets: BTreeMap::new(),
            bets_by_bettor: BTreeMap::new(),
        }
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_ledger_hash(self.match_counter, self.bet_counter, |hasher| {
            hasher.update_u64(self.last_generation_time);
            hasher.update_bytes(self.authority.as_bytes());
            hasher.update_u128(self.balance);
            hasher.update_u128(self.open_stake);
            hasher.update_u64(self.entropy_nonce);

            for m in self.matches.values() {
                m.hash_into(hasher);
            }
            for bet in self.bets.values() {
                bet.hash_into(hasher);
            }
        })
    }

    /// Check the derived indexes and counters against the tables.
    ///
    /// Used when restoring snapshots.
    pub(crate) fn is_consistent(&self) -> bool {
        let counters_ok = self.matches.keys().next_back().copied().unwrap_or(0) == self.match_counter
            && self.matches.len() as u64 == self.match_counter
            && self.bets.keys().next_back().copied().unwrap_or(0) == self.bet_counter
            && self.bets.len() as u64 == self.bet_counter;

        let matches_ok = self.matches.values().all(|m| {
            let shape_ok = if m.played {
                m.result.is_set()
            } else {
                !m.result.is_set() && m.goals_a == 0 && m.goals_b == 0
            };
            shape_ok && self.open_matches.contains(&m.id) != m.played
        }) && self.open_matches.iter().all(|id| self.matches.contains_key(id));

        let open_stake: Option<Amount> = self
            .bets
            .values()
            .filter(|b| !b.claimed)
            .try_fold(0, |acc: Amount, b| acc.checked_add(b.stake));

        let index_count: usize = self.bets_by_bettor.values().map(Vec::len).sum();
        let index_ok = index_count == self.bets.len()
            && self.bets_by_bettor.iter().all(|(bettor, ids)| {
                ids.iter().all(|id| self.bets.get(id).is_some_and(|b| b.bettor == *bettor))
            });

        counters_ok && matches_ok && open_stake == Some(self.open_stake) && index_ok
    }
}

/// The fixture, wagering and settlement ledger.
///
/// Generic over the entropy source so tests can inject a seeded one.
pub struct Ledger<E = ChainEntropy> {
    pub(crate) state: LedgerState,
    pub(crate) config: LedgerConfig,
    pub(crate) entropy: E,
    pub(crate) events: EventLog,
}

impl<E: EntropySource> Ledger<E> {
    /// Deploy a new ledger.
    ///
    /// The generation clock starts at `block.timestamp`, so the first
    /// generation also waits a full cooldown.
    pub fn new(authority: Identity, config: LedgerConfig, entropy: E, block: BlockInfo) -> Self {
        info!(
            "Ledger deployed at height {} (authority {}, cooldown {}s)",
            block.height,
            authority,
            config.cooldown_secs
        );
        Self {
            state: LedgerState::new(authority, block.timestamp),
            config,
            entropy,
            events: EventLog::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Read-only state.
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Notification log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        self.state.compute_hash()
    }

    /// Draw a seed for `match_id`.
    ///
    /// Takes the nonce explicitly; callers write the advanced nonce back
    /// only once the whole operation has passed validation.
    pub(crate) fn draw_seed(&mut self, block: &BlockInfo, match_id: MatchId, nonce: u64) -> u64 {
        self.entropy.seed_for(&EntropyInput {
            block_height: block.height,
            timestamp: block.timestamp,
            match_id,
            nonce,
        })
    }

    /// Append the notifications of a committed operation.
    pub(crate) fn emit(&mut self, block: &BlockInfo, batch: Vec<LedgerEventData>) -> u64 {
        self.events.append_all(block, batch)
    }
}
