use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::thread;
use trinity_core::prelude::*;

fn bench_acquire_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool acquire/release");
    group.throughput(Throughput::Elements(1));
    group.bench_function("acquire + drop, warm idle queue", |b| {
        let pool: Pool<Vec<u8>> = Pool::default();
        drop(pool.acquire());
        b.iter(|| {
            drop(black_box(pool.acquire()));
        });
    });
    group.finish();
}

fn bench_cold_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool cold materialize");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("acquire 1000 handles held open", |b| {
        b.iter(|| {
            let pool: Pool<Vec<u8>> = Pool::default();
            let handles: Vec<_> = (0..1000).map(|_| pool.acquire()).collect();
            black_box(&handles);
        });
    });
    group.finish();
}

fn bench_concurrent_acquire(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool concurrent acquire");
    group.throughput(Throughput::Elements(8_000));
    group.bench_function("8 threads x 1000 acquire/drop", |b| {
        let pool: Pool<Vec<u8>> = Pool::default();
        b.iter(|| {
            thread::scope(|scope| {
                for _ in 0..8 {
                    let pool = &pool;
                    scope.spawn(move || {
                        for _ in 0..1000 {
                            drop(black_box(pool.acquire()));
                        }
                    });
                }
            });
        });
    });
    group.finish();
}

criterion_group!(benches, bench_acquire_release, bench_cold_materialize, bench_concurrent_acquire);
criterion_main!(benches);
