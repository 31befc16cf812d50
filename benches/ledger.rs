//! Ledger benchmarks.
//!
//! Run: cargo bench --bench ledger
//!
//! Measures fixture generation and resolution, bet placement, the
//! "latest N" query on a large fixture table, and state hashing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

use auto_football::core::amount::UNIT;
use auto_football::core::identity::Identity;
use auto_football::ledger::{BlockInfo, CallContext, Ledger, LedgerConfig, Outcome, SeededEntropy};

fn owner() -> Identity {
    Identity::from_label("owner")
}

/// Ledger with `rounds` generated batches, none resolved.
fn ledger_with_rounds(rounds: usize) -> (Ledger<SeededEntropy>, BlockInfo) {
    let config = LedgerConfig::default();
    let cooldown = config.cooldown_secs;
    let mut block = BlockInfo::new(1, 1_700_000_000);
    let mut ledger = Ledger::new(owner(), config, SeededEntropy::new(42), block);
    for _ in 0..rounds {
        block = block.advance(cooldown);
        ledger
            .generate_fixtures(&CallContext::new(owner(), block))
            .expect("generation after cooldown");
    }
    (ledger, block)
}

fn random_outcome(rng: &mut StdRng) -> Outcome {
    match rng.gen_range(0..3) {
        0 => Outcome::HomeWin,
        1 => Outcome::AwayWin,
        _ => Outcome::Draw,
    }
}

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    group.bench_function("generate_batch", |b| {
        b.iter_batched(
            || ledger_with_rounds(0),
            |(mut ledger, block)| {
                let ctx = CallContext::new(owner(), block.advance(ledger.config().cooldown_secs));
                black_box(ledger.generate_fixtures(&ctx).expect("generate"))
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("resolve_batch", |b| {
        b.iter_batched(
            || ledger_with_rounds(1),
            |(mut ledger, block)| {
                let ids = ledger.unresolved_matches(usize::MAX);
                black_box(
                    ledger
                        .resolve_fixtures(&CallContext::new(owner(), block), &ids)
                        .expect("resolve"),
                )
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_place_bet(c: &mut Criterion) {
    let mut group = c.benchmark_group("wagering");
    let (ledger, block) = ledger_with_rounds(2);
    let ids = ledger.unresolved_matches(10);
    let mut rng = StdRng::seed_from_u64(7);

    for legs in [1usize, 3, 10] {
        let match_ids = ids[..legs].to_vec();
        let predictions: Vec<Outcome> = (0..legs).map(|_| random_outcome(&mut rng)).collect();
        group.throughput(Throughput::Elements(legs as u64));
        group.bench_with_input(BenchmarkId::new("place_bet", legs), &legs, |b, _| {
            let (mut ledger, _) = ledger_with_rounds(2);
            let ctx = CallContext::new(Identity::from_label("alice"), block).with_value(UNIT);
            b.iter(|| black_box(ledger.place_bet(&ctx, &match_ids, &predictions).expect("bet")));
        });
    }

    group.finish();
}

fn bench_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("views");
    let (ledger, _) = ledger_with_rounds(500);

    for n in [10usize, 100] {
        group.bench_with_input(BenchmarkId::new("latest_matches", n), &n, |b, &n| {
            b.iter(|| black_box(ledger.latest_matches(n).len()));
        });
    }

    group.bench_function("state_hash", |b| {
        b.iter(|| black_box(ledger.compute_hash()));
    });

    group.finish();
}

criterion_group!(benches, bench_registry, bench_place_bet, bench_views);
criterion_main!(benches);
