//! Match Registry
//!
//! Creates fixtures behind the cooldown gate and resolves them through the
//! simulator. Both operations are all-or-nothing.

use std::collections::BTreeSet;
use tracing::{debug, info};

use super::context::CallContext;
use super::error::{LedgerError, LedgerResult};
use super::events::LedgerEventData;
use super::simulator::{EntropySource, select_pairing, simulate_score};
use super::state::Ledger;
use super::types::{League, Match, MatchId, Score};

impl<E: EntropySource> Ledger<E> {
    /// Create a batch of new fixtures.
    ///
    /// Fails with [`LedgerError::CooldownActive`] unless at least
    /// `cooldown_secs` have passed since the last successful generation
    /// (or deployment). Leagues are assigned round-robin; teams are drawn
    /// from the league roster. Returns the new fixture ids.
    pub fn generate_fixtures(&mut self, ctx: &CallContext) -> LedgerResult<Vec<MatchId>> {
        ctx.reject_value()?;

        let now = ctx.now();
        let remaining = self.cooldown_remaining(now);
        if remaining > 0 {
            debug!("Generation rejected: {}s of cooldown left", remaining);
            return Err(LedgerError::CooldownActive { remaining_secs: remaining });
        }

        // Draw everything before touching state
        let batch_size = self.config.fixtures_per_batch;
        let first_id = self.state.match_counter + 1;
        let mut nonce = self.state.entropy_nonce;
        let mut created = Vec::with_capacity(batch_size);

        for offset in 0..batch_size {
            let id = first_id + offset as u64;
            let league = League::ALL[offset % League::ALL.len()];
            let seed = self.draw_seed(&ctx.block, id, nonce);
            nonce += 1;

            let (team_a, team_b) =
                select_pairing(seed, league).ok_or(LedgerError::RosterTooSmall(league))?;
            created.push(Match::new(id, league, team_a.to_string(), team_b.to_string(), now));
        }

        // Commit
        let mut ids = Vec::with_capacity(created.len());
        let mut events = Vec::with_capacity(created.len());
        for fixture in created {
            debug!(
                "Fixture {}: {} vs {} ({})",
                fixture.id,
                fixture.team_a,
                fixture.team_b,
                fixture.league.name()
            );
            ids.push(fixture.id);
            events.push(LedgerEventData::match_created(
                fixture.id,
                fixture.league,
                &fixture.team_a,
                &fixture.team_b,
            ));
            self.state.open_matches.insert(fixture.id);
            self.state.matches.insert(fixture.id, fixture);
        }
        self.state.match_counter += batch_size as u64;
        self.state.last_generation_time = now;
        self.state.entropy_nonce = nonce;
        self.emit(&ctx.block, events);

        info!(
            "Generated {} fixtures (ids {}..={}) at {}",
            ids.len(),
            first_id,
            self.state.match_counter,
            now
        );

        Ok(ids)
    }

    /// Play the listed fixtures.
    ///
    /// Every id must exist, be unplayed and appear once; otherwise nothing
    /// is resolved. An empty list is a no-op. Returns the final scores in
    /// input order.
    pub fn resolve_fixtures(
        &mut self,
        ctx: &CallContext,
        ids: &[MatchId],
    ) -> LedgerResult<Vec<(MatchId, Score)>> {
        ctx.reject_value()?;

        let max = self.config.max_resolve_batch;
        if ids.len() > max {
            return Err(LedgerError::BatchTooLarge { count: ids.len(), max });
        }

        let mut seen = BTreeSet::new();
        for &id in ids {
            if !seen.insert(id) {
                return Err(LedgerError::DuplicateMatchId(id));
            }
            match self.state.matches.get(&id) {
                None => return Err(LedgerError::MatchNotFound(id)),
                Some(m) if m.played => return Err(LedgerError::MatchAlreadyPlayed(id)),
                Some(_) => {}
            }
        }

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let max_goals = self.config.max_goals;
        let mut nonce = self.state.entropy_nonce;
        let mut scores = Vec::with_capacity(ids.len());
        for &id in ids {
            let seed = self.draw_seed(&ctx.block, id, nonce);
            nonce += 1;
            scores.push((id, simulate_score(seed, max_goals)));
        }

        // Commit
        let mut events = Vec::with_capacity(scores.len());
        for (id, score) in &scores {
            if let Some(fixture) = self.state.matches.get_mut(id) {
                fixture.finish(*score);
                debug!(
                    "Fixture {} final: {} {}-{} {} ({:?})",
                    id,
                    fixture.team_a,
                    score.goals_a,
                    score.goals_b,
                    fixture.team_b,
                    fixture.result
                );
            }
            self.state.open_matches.remove(id);
            events.push(LedgerEventData::match_played(
                *id,
                score.goals_a,
                score.goals_b,
                score.outcome(),
            ));
        }
        self.state.entropy_nonce = nonce;
        self.emit(&ctx.block, events);

        info!("Resolved {} fixtures at height {}", scores.len(), ctx.block.height);

        Ok(scores)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::config::DEFAULT_COOLDOWN_SECS;
    use crate::ledger::events::LedgerEventData;
    use crate::ledger::roster;
    use crate::ledger::test_support::*;
    use crate::ledger::types::Outcome;

    #[test]
    fn test_generation_blocked_right_after_deploy() {
        let (mut ledger, block) = deploy();
        let err = ledger.generate_fixtures(&call(keeper(), block.advance(1))).unwrap_err();
        assert!(matches!(err, LedgerError::CooldownActive { .. }));
        assert_eq!(ledger.match_counter(), 0);
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_generate_creates_batch() {
        let (mut ledger, block) = deploy();
        let block = block.advance(DEFAULT_COOLDOWN_SECS);
        let ids = ledger.generate_fixtures(&call(keeper(), block)).unwrap();

        let batch = ledger.config().fixtures_per_batch;
        assert_eq!(ids, (1..=batch as u64).collect::<Vec<_>>());
        assert_eq!(ledger.match_counter(), batch as u64);
        assert_eq!(ledger.last_generation_time(), block.timestamp);

        for id in &ids {
            let m = ledger.get_match(*id).unwrap();
            assert!(!m.played);
            assert_eq!(m.result, Outcome::Unset);
            assert_eq!((m.goals_a, m.goals_b), (0, 0));
            assert_eq!(m.created_at, block.timestamp);
            assert_ne!(m.team_a, m.team_b);
            assert!(roster::teams(m.league).contains(&m.team_a.as_str()));
            assert!(roster::teams(m.league).contains(&m.team_b.as_str()));
        }

        // One creation notification per fixture
        let created: Vec<_> = ledger
            .events()
            .all()
            .iter()
            .filter(|e| matches!(e.data, LedgerEventData::MatchCreated { .. }))
            .collect();
        assert_eq!(created.len(), batch);
    }

    #[test]
    fn test_every_league_gets_fixtures() {
        let (ledger, _, ids) = generated();
        for league in League::ALL {
            assert!(ids.iter().any(|id| ledger.get_match(*id).unwrap().league == league));
        }
    }

    #[test]
    fn test_second_generation_within_cooldown_fails() {
        let (mut ledger, block, _) = generated();
        let before = ledger.compute_hash();

        let err = ledger
            .generate_fixtures(&call(keeper(), block.advance(DEFAULT_COOLDOWN_SECS - 1)))
            .unwrap_err();
        assert_eq!(err, LedgerError::CooldownActive { remaining_secs: 1 });
        assert_eq!(ledger.compute_hash(), before);

        // Exactly at the boundary is allowed
        let ids = ledger
            .generate_fixtures(&call(keeper(), block.advance(DEFAULT_COOLDOWN_SECS)))
            .unwrap();
        assert_eq!(ids[0], ledger.config().fixtures_per_batch as u64 + 1);
    }

    #[test]
    fn test_generate_rejects_value() {
        let (mut ledger, block) = deploy();
        let ctx = call(keeper(), block.advance(DEFAULT_COOLDOWN_SECS)).with_value(1);
        assert_eq!(ledger.generate_fixtures(&ctx), Err(LedgerError::UnexpectedValue(1)));
    }

    #[test]
    fn test_resolve_all() {
        let (mut ledger, block, ids) = generated();
        let scores = ledger.resolve_fixtures(&call(keeper(), block.advance(12)), &ids).unwrap();
        assert_eq!(scores.len(), ids.len());

        let max_goals = ledger.config().max_goals;
        for (id, score) in scores {
            let m = ledger.get_match(id).unwrap();
            assert!(m.played);
            assert!(m.result.is_set());
            assert!(m.goals_a <= max_goals && m.goals_b <= max_goals);
            assert_eq!(m.result, Outcome::from_goals(m.goals_a, m.goals_b));
            assert_eq!(m.score(), Some(score));
        }
        assert!(ledger.unresolved_matches(100).is_empty());
    }

    #[test]
    fn test_resolve_is_all_or_nothing() {
        let (mut ledger, block, ids) = generated();
        let before = ledger.compute_hash();
        let events_before = ledger.events().len();

        // Unknown id at the end
        let mut bad = ids.clone();
        bad.push(999);
        let err = ledger.resolve_fixtures(&call(keeper(), block), &bad).unwrap_err();
        assert_eq!(err, LedgerError::MatchNotFound(999));
        assert_eq!(ledger.compute_hash(), before);
        assert_eq!(ledger.events().len(), events_before);

        // Duplicate id
        let err = ledger.resolve_fixtures(&call(keeper(), block), &[1, 2, 1]).unwrap_err();
        assert_eq!(err, LedgerError::DuplicateMatchId(1));
        assert_eq!(ledger.compute_hash(), before);
    }

    #[test]
    fn test_resolve_already_played_fails() {
        let (mut ledger, block, _) = generated();
        ledger.resolve_fixtures(&call(keeper(), block), &[1]).unwrap();
        let before = ledger.compute_hash();

        let err = ledger.resolve_fixtures(&call(keeper(), block), &[2, 1]).unwrap_err();
        assert_eq!(err, LedgerError::MatchAlreadyPlayed(1));
        assert!(!ledger.get_match(2).unwrap().played);
        assert_eq!(ledger.compute_hash(), before);
    }

    #[test]
    fn test_resolve_batch_cap() {
        let (mut ledger, block, _) = generated();
        let too_many: Vec<MatchId> = (1..=ledger.config().max_resolve_batch as u64 + 1).collect();
        let err = ledger.resolve_fixtures(&call(keeper(), block), &too_many).unwrap_err();
        assert!(matches!(err, LedgerError::BatchTooLarge { .. }));
    }

    #[test]
    fn test_resolve_empty_is_noop() {
        let (mut ledger, block, _) = generated();
        let before = ledger.compute_hash();
        assert!(ledger.resolve_fixtures(&call(keeper(), block), &[]).unwrap().is_empty());
        assert_eq!(ledger.compute_hash(), before);
    }

    #[test]
    fn test_resolution_notifications_carry_score() {
        let (mut ledger, block, _) = generated();
        let seq = ledger.events().last_seq();
        let scores = ledger.resolve_fixtures(&call(keeper(), block), &[3, 1]).unwrap();

        let new_events = ledger.events().since(seq);
        assert_eq!(new_events.len(), 2);
        for (event, (id, score)) in new_events.iter().zip(scores) {
            assert_eq!(
                event.data,
                LedgerEventData::match_played(id, score.goals_a, score.goals_b, score.outcome())
            );
        }
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let run = || {
            let (mut ledger, block, ids) = generated();
            ledger.resolve_fixtures(&call(keeper(), block), &ids).unwrap();
            ledger.compute_hash()
        };
        assert_eq!(run(), run());
    }
}
