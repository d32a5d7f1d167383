use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use bracket_engine::{
    bracket::{self, Bracket, Participant, Roster},
    view::BracketView,
};
use std::hint::black_box;

/// Helper to create N participants, every third one unseeded
fn participants(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| {
            if i % 3 == 2 {
                Participant::unseeded(format!("p{}", i), format!("Player {}", i))
            } else {
                Participant::new(format!("p{}", i), format!("Player {}", i), i as i64)
            }
        })
        .collect()
}

/// Play every match, player 1 winning whenever it holds a participant
fn play_out(bracket: &mut Bracket) {
    for r in 0..bracket.round_count() {
        for m in 0..bracket.rounds[r].matches.len() {
            let Some(current) = bracket.get_match(r, m) else {
                continue;
            };
            if current.is_pure_bye() {
                continue;
            }
            let (s1, s2) = if current.player1.is_bye() { (0.0, 1.0) } else { (1.0, 0.0) };
            let _ = bracket::update_match(bracket, r, m, s1, s2);
        }
    }
}

/// Benchmark bracket generation for different roster sizes
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for n in [8, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_participants", n)),
            n,
            |b, &n| {
                b.iter_batched(
                    || participants(n),
                    |p| bracket::build(p),
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark a single result report in the first round
fn bench_update_match(c: &mut Criterion) {
    let pristine = bracket::build(participants(64)).unwrap();

    c.bench_function("update_match", |b| {
        b.iter_batched(
            || pristine.clone(),
            |mut bracket| {
                let _ = bracket::update_match(&mut bracket, 0, 5, 3.0, 1.0);
                bracket
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark playing a whole tournament to its champion
fn bench_full_tournament(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_tournament");

    for n in [16, 256].iter() {
        let pristine = bracket::build(participants(*n)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_participants", n)),
            &pristine,
            |b, pristine| {
                b.iter_batched(
                    || pristine.clone(),
                    |mut bracket| {
                        play_out(&mut bracket);
                        bracket
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark progress queries on a finished bracket
fn bench_progress(c: &mut Criterion) {
    let mut finished = bracket::build(participants(256)).unwrap();
    play_out(&mut finished);

    c.bench_function("progress_summary", |b| {
        b.iter(|| bracket::progress_summary(black_box(&finished)));
    });

    c.bench_function("is_complete", |b| {
        b.iter(|| bracket::is_complete(black_box(&finished)));
    });
}

/// Benchmark view projection with name resolution
fn bench_view(c: &mut Criterion) {
    let roster = Roster::new(participants(256)).unwrap();
    let mut played = bracket::build_from_roster(&roster);
    play_out(&mut played);

    c.bench_function("view_projection", |b| {
        b.iter(|| BracketView::new(black_box(&played), &roster));
    });
}

criterion_group!(
    bracket_operations,
    bench_build,
    bench_update_match,
    bench_full_tournament,
);

criterion_group!(bracket_queries, bench_progress, bench_view);

criterion_main!(bracket_operations, bracket_queries);
