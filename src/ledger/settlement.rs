//! Settlement
//!
//! Evaluates a bet once every leg's fixture has been played and pays the
//! winner `stake * PAYOUT_MULTIPLIER` from the shared balance.
//!
//! ```text
//! claim(bet)
//!   ├── checks:  exists, caller is bettor, not claimed, all legs played
//!   ├── effects: claimed = true, balance -= payout, open_stake -= stake
//!   └── transfer(bettor, payout)  ── on failure: undo effects, Err(Transfer)
//! ```
//!
//! A losing bet is still marked claimed, with a payout of zero.

use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::core::amount::{Amount, scale};
use super::config::PAYOUT_MULTIPLIER;
use super::context::CallContext;
use super::error::{LedgerError, LedgerResult};
use super::events::LedgerEventData;
use super::simulator::EntropySource;
use super::state::Ledger;
use super::treasury::ValueTransfer;
use super::types::{Bet, BetId, Match, MatchId};

/// Did every leg of `bet` come in?
///
/// Fails with [`LedgerError::NotYetResolved`] naming the first leg whose
/// fixture has not been played.
pub fn evaluate_bet(bet: &Bet, matches: &BTreeMap<MatchId, Match>) -> LedgerResult<bool> {
    let mut won = true;
    for leg in &bet.legs {
        let fixture = matches
            .get(&leg.match_id)
            .ok_or(LedgerError::MatchNotFound(leg.match_id))?;
        if !fixture.played {
            return Err(LedgerError::NotYetResolved(leg.match_id));
        }

        #[cfg(feature = "debug-tracing")]
        tracing::trace!(
            "bet {} leg {}: predicted {:?}, actual {:?}",
            bet.id,
            leg.match_id,
            leg.prediction,
            fixture.result
        );

        if fixture.result != leg.prediction {
            won = false;
        }
    }
    Ok(won)
}

impl<E: EntropySource> Ledger<E> {
    /// Settle bet `bet_id` for its bettor.
    ///
    /// Returns the amount paid (0 for a losing bet). A winning bet that the
    /// shared balance cannot cover fails with
    /// [`LedgerError::InsufficientFunds`] and stays unclaimed.
    pub fn claim<T>(&mut self, ctx: &CallContext, bet_id: BetId, transfer: &mut T) -> LedgerResult<Amount>
    where
        T: ValueTransfer + ?Sized,
    {
        ctx.reject_value()?;

        let bet = self.state.bets.get(&bet_id).ok_or(LedgerError::BetNotFound(bet_id))?;
        if bet.bettor != ctx.caller {
            warn!("Claim on bet {} refused for {}", bet_id, ctx.caller);
            return Err(LedgerError::NotBettor(bet_id));
        }
        if bet.claimed {
            return Err(LedgerError::AlreadyClaimed(bet_id));
        }

        let won = evaluate_bet(bet, &self.state.matches)?;
        let stake = bet.stake;
        let bettor = bet.bettor;

        let payout = if won {
            scale(stake, PAYOUT_MULTIPLIER).ok_or(LedgerError::Overflow)?
        } else {
            0
        };

        let balance = self.state.balance;
        if payout > balance {
            return Err(LedgerError::InsufficientFunds { needed: payout, available: balance });
        }
        let open_stake = self.state.open_stake;

        // Effects
        self.set_claimed(bet_id, true);
        self.state.balance = balance - payout;
        self.state.open_stake = open_stake.saturating_sub(stake);

        // Interaction
        if payout > 0 {
            if let Err(e) = transfer.transfer(&bettor, payout) {
                self.set_claimed(bet_id, false);
                self.state.balance = balance;
                self.state.open_stake = open_stake;
                warn!("Payout for bet {} failed, rolled back: {}", bet_id, e);
                return Err(e.into());
            }
        }

        self.emit(&ctx.block, vec![LedgerEventData::BetClaimed { id: bet_id, bettor, payout }]);

        if won {
            info!("Bet {} won, paid {} to {}", bet_id, payout, bettor.short());
        } else {
            info!("Bet {} lost, settled for {}", bet_id, bettor.short());
        }

        Ok(payout)
    }

    fn set_claimed(&mut self, bet_id: BetId, claimed: bool) {
        if let Some(bet) = self.state.bets.get_mut(&bet_id) {
            bet.claimed = claimed;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
