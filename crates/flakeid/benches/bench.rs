use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use flakeid::{LockIdGenerator, WallClock};
use std::{
    sync::Barrier,
    thread::scope,
    time::{Duration, Instant},
};

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Benchmarks the uncontended hot path: a single caller draining the
/// generator as fast as the clock allows.
fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("lock_generator");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = LockIdGenerator::with_node_id(0, WallClock::default());
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id().expect("clock went backward"));
                }
            }

            start.elapsed()
        })
    });
    group.finish();
}

/// Benchmarks the generator under lock contention, one caller per core.
fn bench_generator_contended(c: &mut Criterion) {
    let threads = num_cpus::get();
    let mut group = c.benchmark_group("lock_generator_contended");
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("threads/{threads}"), |b| {
        b.iter_custom(|iters| {
            let mut total = Duration::ZERO;

            for _ in 0..iters {
                let generator = LockIdGenerator::with_node_id(0, WallClock::default());
                let barrier = Barrier::new(threads);

                let start = Instant::now();
                scope(|s| {
                    for _ in 0..threads {
                        s.spawn(|| {
                            barrier.wait();
                            for _ in 0..TOTAL_IDS {
                                black_box(generator.next_id().expect("clock went backward"));
                            }
                        });
                    }
                });
                total += start.elapsed();
            }

            total
        })
    });
    group.finish();
}

criterion_group!(benches, bench_generator, bench_generator_contended);
criterion_main!(benches);
