//! Auto Football Demo
//!
//! Runs one full round against an in-memory ledger: deploy, seed the pool,
//! generate and resolve a batch of fixtures, place and settle bets, then
//! withdraw. Notifications are printed as JSON lines.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use auto_football::{
    core::amount::{units, UNIT},
    core::identity::Identity,
    ledger::{
        AccountBook, BlockInfo, CallContext, Ledger, LedgerConfig, LedgerSnapshot, Outcome,
        SeededEntropy,
    },
    service::LedgerService,
    VERSION,
};

/// Seed for the demo's entropy source (override with FOOTBALL_DEMO_SEED).
const DEFAULT_DEMO_SEED: u64 = 12345;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Auto Football v{}", VERSION);

    let config = LedgerConfig::from_env();
    let seed = std::env::var("FOOTBALL_DEMO_SEED")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DEMO_SEED);
    info!("Config: {:?}, seed {}", config, seed);

    demo_round(config, seed).await
}

async fn demo_round(config: LedgerConfig, seed: u64) -> Result<()> {
    let owner = Identity::from_label("owner");
    let alice = Identity::from_label("alice");
    let bob = Identity::from_label("bob");

    let genesis = BlockInfo::now(1);
    let cooldown = config.cooldown_secs;
    let ledger = Ledger::new(owner, config.clone(), SeededEntropy::new(seed), genesis);
    let service = LedgerService::new(ledger, AccountBook::new());
    let mut events = service.subscribe();

    service
        .fund(CallContext::new(owner, genesis).with_value(10 * UNIT))
        .await
        .context("seeding the pool")?;

    // Too early: deployment starts the cooldown clock
    if let Err(e) = service.generate_fixtures(CallContext::new(owner, genesis)).await {
        info!("Generation right after deploy refused: {}", e);
    }

    let block = genesis.advance(cooldown);
    let ids = service
        .generate_fixtures(CallContext::new(owner, block))
        .await
        .context("generating fixtures")?;

    for m in service.read(|l| l.latest_matches(ids.len()).into_iter().cloned().collect::<Vec<_>>()).await {
        info!("  #{} [{}] {} vs {}", m.id, m.league.name(), m.team_a, m.team_b);
    }

    // Alice backs home wins on the first three, Bob backs draws
    let block = block.advance(15);
    let legs = ids.iter().take(3).copied().collect::<Vec<_>>();
    let alice_bet = service
        .place_bet(
            CallContext::new(alice, block).with_value(UNIT),
            legs.clone(),
            vec![Outcome::HomeWin; legs.len()],
        )
        .await
        .context("alice's bet")?;
    let bob_bet = service
        .place_bet(
            CallContext::new(bob, block).with_value(units(0, 500).unwrap_or(UNIT)),
            legs.clone(),
            vec![Outcome::Draw; legs.len()],
        )
        .await
        .context("bob's bet")?;

    let block = block.advance(15);
    let scores = service
        .resolve_fixtures(CallContext::new(owner, block), ids.clone())
        .await
        .context("resolving fixtures")?;
    for (id, score) in &scores {
        info!("  #{} final {}-{} ({:?})", id, score.goals_a, score.goals_b, score.outcome());
    }

    for (who, bet) in [(alice, alice_bet), (bob, bob_bet)] {
        match service.claim(CallContext::new(who, block), bet).await {
            Ok(0) => info!("Bet {} lost", bet),
            Ok(paid) => info!("Bet {} paid {}", bet, paid),
            Err(e) => info!("Bet {} not settled: {}", bet, e),
        }
    }

    let balance = service.read(|l| l.balance()).await;
    let liability = service.read(|l| l.outstanding_liability()).await;
    let withdrawable = balance.saturating_sub(liability);
    service
        .withdraw(CallContext::new(owner, block), withdrawable)
        .await
        .context("authority withdrawal")?;

    while let Ok(event) = events.try_recv() {
        println!("{}", serde_json::to_string(&event)?);
    }

    // Snapshot must restore to the same state
    let snapshot = service.snapshot().await;
    let bytes = snapshot.to_bytes()?;
    let expected = snapshot.state_hash;
    let restored = Ledger::restore(
        LedgerSnapshot::from_bytes(&bytes)?,
        config,
        SeededEntropy::new(seed),
    )?;
    if restored.compute_hash() != expected {
        bail!("restored ledger hash differs from snapshot");
    }

    info!(
        "Round complete: balance {}, {} bytes snapshot, state hash {}",
        restored.balance(),
        bytes.len(),
        hex::encode(&expected[..8])
    );

    Ok(())
}
