//! Ledger Configuration

use std::str::FromStr;

/// Default cooldown between fixture generations (5 minutes).
pub const DEFAULT_COOLDOWN_SECS: u64 = 5 * 60;

/// Default fixtures created per generation call.
pub const DEFAULT_FIXTURES_PER_BATCH: usize = 6;

/// Upper bound for any count read from the environment.
pub const MAX_CONFIGURED_COUNT: usize = 256;

/// Winning bets pay `stake * PAYOUT_MULTIPLIER`.
pub const PAYOUT_MULTIPLIER: u32 = 2;

/// Configuration for a ledger instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Minimum seconds between successful generation calls.
    pub cooldown_secs: u64,
    /// Fixtures created per generation call.
    pub fixtures_per_batch: usize,
    /// Maximum ids accepted by one resolution call.
    pub max_resolve_batch: usize,
    /// Maximum legs per bet.
    pub max_legs: usize,
    /// Highest goal count a side can score.
    pub max_goals: u8,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            fixtures_per_batch: DEFAULT_FIXTURES_PER_BATCH,
            max_resolve_batch: 64,
            max_legs: 10,
            max_goals: 5,
        }
    }
}

impl LedgerConfig {
    /// Create config from environment variables.
    ///
    /// Unset or unparseable variables keep their default. Counts are
    /// clamped to `1..=MAX_CONFIGURED_COUNT`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cooldown_secs: env_or("FOOTBALL_COOLDOWN_SECS", defaults.cooldown_secs),
            fixtures_per_batch: env_count("FOOTBALL_FIXTURES_PER_BATCH", defaults.fixtures_per_batch),
            max_resolve_batch: env_count("FOOTBALL_MAX_RESOLVE_BATCH", defaults.max_resolve_batch),
            max_legs: env_count("FOOTBALL_MAX_LEGS", defaults.max_legs),
            max_goals: env_or("FOOTBALL_MAX_GOALS", defaults.max_goals),
        }
    }
}

fn env_count(key: &str, default: usize) -> usize {
    env_or(key, default).clamp(1, MAX_CONFIGURED_COUNT)
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
