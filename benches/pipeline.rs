use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linq_rs::compare::natural;
use linq_rs::prelude::*;

/// Deterministic pseudo-random values in `0..modulus`
fn generate_values(size: usize, modulus: u64) -> Vec<u64> {
    let mut seed = 12345u64;
    (0..size)
        .map(|_| {
            // Simple LCG random
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            (seed >> 16) % modulus
        })
        .collect()
}

fn bench_streaming(c: &mut Criterion) {
    let sizes = [1_000, 10_000, 100_000];
    let mut group = c.benchmark_group("streaming");

    for size in sizes.iter() {
        let data = generate_values(*size, 1_000);

        group.bench_with_input(BenchmarkId::new("linq", size), &data, |b, data| {
            let seq = from_vec(data.clone())
                .filter(|x| x % 3 == 0)
                .select(|x| x * 2)
                .take_while(|x| *x < 10_000);
            b.iter(|| black_box(seq.sum()));
        });

        group.bench_with_input(BenchmarkId::new("std_iter", size), &data, |b, data| {
            b.iter(|| {
                let total: u64 = data
                    .iter()
                    .filter(|x| *x % 3 == 0)
                    .map(|x| x * 2)
                    .take_while(|x| *x < 10_000)
                    .sum();
                black_box(total)
            });
        });
    }

    group.finish();
}

fn bench_ordering(c: &mut Criterion) {
    let sizes = [1_000, 10_000, 100_000];
    let mut group = c.benchmark_group("ordering");

    for size in sizes.iter() {
        let data = generate_values(*size, 100);

        group.bench_with_input(BenchmarkId::new("order_by_then_by", size), &data, |b, data| {
            let seq = from_vec(data.clone())
                .order_by(|x| x % 10, natural)
                .then_by(|x| *x, natural);
            b.iter(|| black_box(seq.first()));
        });

        group.bench_with_input(BenchmarkId::new("sort", size), &data, |b, data| {
            let seq = from_vec(data.clone()).sort(|a, b| (a % 10, *a) < (b % 10, *b));
            b.iter(|| black_box(seq.first()));
        });
    }

    group.finish();
}

fn bench_hashing(c: &mut Criterion) {
    let sizes = [1_000, 10_000, 100_000];
    let mut group = c.benchmark_group("hashing");

    for size in sizes.iter() {
        let outer = generate_values(*size, 1_000);
        let inner = generate_values(*size / 10, 1_000);

        group.bench_with_input(BenchmarkId::new("distinct", size), &outer, |b, data| {
            let seq = from_vec(data.clone()).distinct();
            b.iter(|| black_box(seq.count()));
        });

        group.bench_with_input(BenchmarkId::new("group_by", size), &outer, |b, data| {
            let seq = from_vec(data.clone()).group_by(|x| x % 64, |x| x);
            b.iter(|| black_box(seq.count()));
        });

        group.bench_with_input(
            BenchmarkId::new("join", size),
            &(outer.clone(), inner),
            |b, (outer, inner)| {
                let seq = from_vec(outer.clone()).join(
                    from_vec(inner.clone()),
                    |x| *x,
                    |y| *y,
                    |x, y| x + y,
                );
                b.iter(|| black_box(seq.count()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_streaming, bench_ordering, bench_hashing);
criterion_main!(benches);
