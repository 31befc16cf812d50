//! Read-only queries over ledger state.

use crate::core::amount::Amount;
use crate::core::identity::Identity;
use super::config::PAYOUT_MULTIPLIER;
use super::roster;
use super::simulator::EntropySource;
use super::state::Ledger;
use super::types::{Bet, BetId, League, Match, MatchId};

impl<E: EntropySource> Ledger<E> {
    /// Id of the newest fixture (0 before the first generation).
    pub fn match_counter(&self) -> u64 {
        self.state.match_counter
    }

    /// Id of the newest bet (0 before the first bet).
    pub fn bet_counter(&self) -> u64 {
        self.state.bet_counter
    }

    /// Timestamp of the last successful generation, or of deployment.
    pub fn last_generation_time(&self) -> u64 {
        self.state.last_generation_time
    }

    /// Account allowed to withdraw.
    pub fn authority(&self) -> Identity {
        self.state.authority
    }

    /// Current shared balance.
    pub fn balance(&self) -> Amount {
        self.state.balance
    }

    /// Fixture by id.
    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.state.matches.get(&id)
    }

    /// Bet by id.
    pub fn get_bet(&self, id: BetId) -> Option<&Bet> {
        self.state.bets.get(&id)
    }

    /// Team name at `index` in the league roster.
    pub fn team(&self, league: League, index: usize) -> Option<&'static str> {
        roster::team(league, index)
    }

    /// The `count` most recent fixtures, oldest first.
    ///
    /// Returns fewer when fewer exist.
    pub fn latest_matches(&self, count: usize) -> Vec<&Match> {
        let first = self.state.match_counter.saturating_sub(count as u64) + 1;
        self.state.matches.range(first..).map(|(_, m)| m).collect()
    }

    /// Bets placed by `bettor`, in placement order.
    pub fn bets_by(&self, bettor: &Identity) -> Vec<&Bet> {
        self.state
            .bets_by_bettor
            .get(bettor)
            .map(|ids| ids.iter().filter_map(|id| self.state.bets.get(id)).collect())
            .unwrap_or_default()
    }

    /// Unplayed fixtures, lowest id first, at most `limit`.
    pub fn unresolved_matches(&self, limit: usize) -> Vec<MatchId> {
        self.state.open_matches.iter().take(limit).copied().collect()
    }

    /// Earliest timestamp at which generation opens again.
    pub fn next_generation_at(&self) -> u64 {
        self.state.last_generation_time.saturating_add(self.config.cooldown_secs)
    }

    /// Seconds until generation opens, as seen at `now` (0 when open).
    pub fn cooldown_remaining(&self, now: u64) -> u64 {
        self.next_generation_at().saturating_sub(now)
    }

    /// What paying every unclaimed bet as a winner would cost.
    ///
    /// Informational only; the balance is never reserved against it.
    pub fn outstanding_liability(&self) -> Amount {
        self.state
            .open_stake
            .saturating_mul(PAYOUT_MULTIPLIER as Amount)
    }
}
