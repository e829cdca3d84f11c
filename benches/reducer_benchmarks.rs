use std::path::PathBuf;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use match_scanner::{
    reduce,
    reduce_parallel,
    scan_recordings,
    types::{MatchOutcome, PlayerMatchRecord, ScanConfig},
};
use tokio::runtime::Runtime;

/// `matches` outcomes of ten players each, drawn from a pool of `pool` identities
fn synthetic_outcomes(matches: usize, pool: u64) -> Vec<MatchOutcome> {
    (0..matches)
        .map(|m| {
            let records = (0..10u64)
                .map(|slot| {
                    let id = (m as u64 * 7 + slot * 13) % pool;
                    PlayerMatchRecord::new(id, format!("player_{}", id), 24, 20, 15, 2500)
                })
                .collect();
            MatchOutcome::valid(format!("match_{:05}.rec", m), Duration::ZERO, records)
        })
        .collect()
}

fn reduce_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer");

    for matches in [100usize, 1_000, 10_000] {
        let outcomes = synthetic_outcomes(matches, 500);

        group.bench_with_input(BenchmarkId::new("sequential", matches), &outcomes, |b, outcomes| {
            b.iter(|| black_box(reduce(outcomes).into_sorted()));
        });
        group.bench_with_input(BenchmarkId::new("parallel", matches), &outcomes, |b, outcomes| {
            b.iter(|| black_box(reduce_parallel(outcomes).into_sorted()));
        });
    }

    group.finish();
}

fn scan_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let config = ScanConfig {
        input_dir: PathBuf::from("tests/fixtures/season"),
        show_progress: false,
        ..Default::default()
    };

    let mut group = c.benchmark_group("scanner");
    group.sample_size(10);

    group.bench_function("season_fixtures", |b| {
        b.iter(|| rt.block_on(async { black_box(scan_recordings(&config).await.unwrap()) }));
    });

    group.finish();
}

criterion_group!(benches, reduce_benchmark, scan_benchmark);
criterion_main!(benches);
