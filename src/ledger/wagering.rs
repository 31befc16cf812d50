//! Wagering Ledger
//!
//! Records multi-leg accumulator bets against unresolved fixtures.
//! No pricing happens here; the fixed multiplier is applied at claim time.

use std::collections::BTreeSet;
use tracing::{debug, info};

use super::context::CallContext;
use super::error::{LedgerError, LedgerResult};
use super::events::LedgerEventData;
use super::simulator::EntropySource;
use super::state::Ledger;
use super::types::{Bet, BetId, Leg, MatchId, Outcome};

impl<E: EntropySource> Ledger<E> {
    /// Record a bet from parallel match id and prediction lists.
    ///
    /// The attached value is the stake. Every referenced fixture must exist
    /// and still be unplayed, each fixture may appear once, and no
    /// prediction may be `Unset`. Returns the new bet id.
    pub fn place_bet(
        &mut self,
        ctx: &CallContext,
        match_ids: &[MatchId],
        predictions: &[Outcome],
    ) -> LedgerResult<BetId> {
        if match_ids.len() != predictions.len() {
            return Err(LedgerError::LegCountMismatch {
                matches: match_ids.len(),
                predictions: predictions.len(),
            });
        }

        let legs: Vec<Leg> = match_ids
            .iter()
            .zip(predictions)
            .map(|(&match_id, &prediction)| Leg::new(match_id, prediction))
            .collect();

        self.place_legs(ctx, legs)
    }

    /// Record a bet from already-paired legs.
    pub fn place_legs(&mut self, ctx: &CallContext, legs: Vec<Leg>) -> LedgerResult<BetId> {
        self.validate_legs(&legs)?;

        let stake = ctx.value;
        if stake == 0 {
            return Err(LedgerError::ZeroStake);
        }
        let balance = self.state.balance.checked_add(stake).ok_or(LedgerError::Overflow)?;
        let open_stake = self.state.open_stake.checked_add(stake).ok_or(LedgerError::Overflow)?;

        // Commit
        let id = self.state.bet_counter + 1;
        let bettor = ctx.caller;
        let bet = Bet {
            id,
            bettor,
            legs,
            stake,
            claimed: false,
            placed_at: ctx.now(),
        };
        let match_ids = bet.match_ids();

        self.state.bet_counter = id;
        self.state.balance = balance;
        self.state.open_stake = open_stake;
        self.state.bets_by_bettor.entry(bettor).or_default().push(id);
        self.state.bets.insert(id, bet);

        info!(
            "Bet {} placed by {} on {} legs, stake {}",
            id,
            bettor.short(),
            match_ids.len(),
            stake
        );
        self.emit(
            &ctx.block,
            vec![LedgerEventData::BetPlaced { id, bettor, match_ids, stake }],
        );

        Ok(id)
    }

    /// Shape and reference checks for a new bet.
    fn validate_legs(&self, legs: &[Leg]) -> LedgerResult<()> {
        if legs.is_empty() {
            return Err(LedgerError::EmptyLegs);
        }

        let max = self.config.max_legs;
        if legs.len() > max {
            return Err(LedgerError::TooManyLegs { count: legs.len(), max });
        }

        let mut seen = BTreeSet::new();
        for leg in legs {
            if !seen.insert(leg.match_id) {
                return Err(LedgerError::DuplicateLeg(leg.match_id));
            }
            if !leg.prediction.is_set() {
                return Err(LedgerError::UnsetPrediction(leg.match_id));
            }
            match self.state.matches.get(&leg.match_id) {
                None => return Err(LedgerError::MatchNotFound(leg.match_id)),
                Some(m) if m.played => {
                    debug!("Bet rejected: match {} already resolved", leg.match_id);
                    return Err(LedgerError::MatchAlreadyPlayed(leg.match_id));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
