//! Ledger Record Definitions
//!
//! Fixture and bet records plus the closed enumerations they use.

use serde::{Serialize, Deserialize};

use crate::core::amount::Amount;
use crate::core::hash::StateHasher;
use crate::core::identity::Identity;

/// Sequential fixture identifier (first fixture is 1).
pub type MatchId = u64;

/// Sequential bet identifier (first bet is 1).
pub type BetId = u64;

// =============================================================================
// LEAGUE
// =============================================================================

/// Fixture pool. Each league backs a fixed team roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum League {
    /// Spanish first division
    LaLiga = 0,
    /// English first division
    PremierLeague = 1,
    /// Italian first division
    SerieA = 2,
}

impl League {
    /// Every league, in index order.
    pub const ALL: [League; 3] = [League::LaLiga, League::PremierLeague, League::SerieA];

    /// Get league from index (0-2).
    pub fn from_index(index: u8) -> Option<League> {
        match index {
            0 => Some(League::LaLiga),
            1 => Some(League::PremierLeague),
            2 => Some(League::SerieA),
            _ => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            League::LaLiga => "La Liga",
            League::PremierLeague => "Premier League",
            League::SerieA => "Serie A",
        }
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// Fixture result.
///
/// `Unset` is only valid before a fixture is played and is never a legal
/// prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
pub enum Outcome {
    /// Not played yet
    #[default]
    Unset = 0,
    /// Team A (home) scored more
    HomeWin = 1,
    /// Team B (away) scored more
    AwayWin = 2,
    /// Level score
    Draw = 3,
}

impl Outcome {
    /// Derive the result from a final score.
    pub fn from_goals(goals_a: u8, goals_b: u8) -> Outcome {
        use std::cmp::Ordering;
        match goals_a.cmp(&goals_b) {
            Ordering::Greater => Outcome::HomeWin,
            Ordering::Less => Outcome::AwayWin,
            Ordering::Equal => Outcome::Draw,
        }
    }

    /// Get outcome from wire index (0-3).
    pub fn from_index(index: u8) -> Option<Outcome> {
        match index {
            0 => Some(Outcome::Unset),
            1 => Some(Outcome::HomeWin),
            2 => Some(Outcome::AwayWin),
            3 => Some(Outcome::Draw),
            _ => None,
        }
    }

    /// True for every variant except `Unset`.
    #[inline]
    pub fn is_set(self) -> bool {
        self != Outcome::Unset
    }
}

// =============================================================================
// MATCH
// =============================================================================

/// Final score of a played fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Goals for team A
    pub goals_a: u8,
    /// Goals for team B
    pub goals_b: u8,
}

impl Score {
    /// Result implied by this score.
    pub fn outcome(self) -> Outcome {
        Outcome::from_goals(self.goals_a, self.goals_b)
    }
}

/// A simulated fixture.
///
/// While `played` is false, `result` is `Unset` and both goal counts are 0.
/// Once played it never goes back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Fixture id
    pub id: MatchId,
    /// League the teams come from
    pub league: League,
    /// Home side
    pub team_a: String,
    /// Away side
    pub team_b: String,
    /// Home goals (0 until played)
    pub goals_a: u8,
    /// Away goals (0 until played)
    pub goals_b: u8,
    /// Final result (`Unset` until played)
    pub result: Outcome,
    /// Block timestamp of the generating call
    pub created_at: u64,
    /// Has the fixture been resolved?
    pub played: bool,
}

impl Match {
    /// Create an unplayed fixture.
    pub fn new(id: MatchId, league: League, team_a: String, team_b: String, created_at: u64) -> Self {
        Self {
            id,
            league,
            team_a,
            team_b,
            goals_a: 0,
            goals_b: 0,
            result: Outcome::Unset,
            created_at,
            played: false,
        }
    }

    /// Record the final score. Caller checks `played` first.
    pub(crate) fn finish(&mut self, score: Score) {
        self.goals_a = score.goals_a;
        self.goals_b = score.goals_b;
        self.result = score.outcome();
        self.played = true;
    }

    /// Final score, if played.
    pub fn score(&self) -> Option<Score> {
        self.played.then_some(Score {
            goals_a: self.goals_a,
            goals_b: self.goals_b,
        })
    }

    /// Hash this fixture for state verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u64(self.id);
        hasher.update_u8(self.league as u8);
        hasher.update_str(&self.team_a);
        hasher.update_str(&self.team_b);
        hasher.update_u8(self.goals_a);
        hasher.update_u8(self.goals_b);
        hasher.update_u8(self.result as u8);
        hasher.update_u64(self.created_at);
        hasher.update_bool(self.played);
    }
}

// =============================================================================
// BET
// =============================================================================

/// One (fixture, predicted result) pair of a bet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Referenced fixture
    pub match_id: MatchId,
    /// Predicted result
    pub prediction: Outcome,
}

impl Leg {
    /// Create a leg.
    pub const fn new(match_id: MatchId, prediction: Outcome) -> Self {
        Self { match_id, prediction }
    }
}

/// A multi-leg accumulator bet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    /// Bet id
    pub id: BetId,
    /// Account that placed the bet and may claim it
    pub bettor: Identity,
    /// Legs, in the order they were submitted
    pub legs: Vec<Leg>,
    /// Attached value
    pub stake: Amount,
    /// Has the bet been settled?
    pub claimed: bool,
    /// Block timestamp of placement
    pub placed_at: u64,
}

impl Bet {
    /// Fixture ids referenced by this bet.
    pub fn match_ids(&self) -> Vec<MatchId> {
        self.legs.iter().map(|leg| leg.match_id).collect()
    }

    /// Hash this bet for state verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u64(self.id);
        hasher.update_bytes(self.bettor.as_bytes());
        hasher.update_u32(self.legs.len() as u32);
        for leg in &self.legs {
            hasher.update_u64(leg.match_id);
            hasher.update_u8(leg.prediction as u8);
        }
        hasher.update_u128(self.stake);
        hasher.update_bool(self.claimed);
        hasher.update_u64(self.placed_at);
    }
}

// =============================================================================
// TESTS
// =============================================================================
