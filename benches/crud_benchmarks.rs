use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rank_map::RankMap;
use std::collections::BTreeMap;

const N: usize = 10_000;

// ─── Helper functions to generate key/value sequences ───────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn random_ranks(n: usize, len: usize) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(n);
    let mut x: u64 = 54321;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        ranks.push(1 + (x >> 33) as usize % len);
    }
    ranks
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("RankMap", N), |b| {
        b.iter(|| {
            let mut map = RankMap::new();
            for i in 0..N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("RankMap", N), |b| {
        b.iter(|| {
            let mut map = RankMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

/// Re-ranking a live key: overwrite every key with a new value so each
/// insert pays the detach-and-rehome path.
fn bench_insert_rerank(c: &mut Criterion) {
    let keys = ordered_keys(N);

    let mut group = c.benchmark_group("insert_rerank");

    group.bench_function(BenchmarkId::new("RankMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<RankMap<i64, i64>>(),
            |mut map| {
                for &k in &keys {
                    map.insert(k, -k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Rank Query Benchmarks ──────────────────────────────────────────────────

fn bench_get_by_rank(c: &mut Criterion) {
    let keys = random_keys(N);
    let map: RankMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let ranks = random_ranks(N, map.len());

    let mut group = c.benchmark_group("get_by_rank");

    group.bench_function(BenchmarkId::new("RankMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &r in &ranks {
                if let Some((_, &v)) = map.get_by_rank(r) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    // The only in-order selection a BTreeMap offers is a linear walk.
    group.bench_function(BenchmarkId::new("BTreeMap_nth", N / 100), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &r in ranks.iter().take(N / 100) {
                if let Some((_, &v)) = bt_map.iter().nth(r - 1) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_rank_of(c: &mut Criterion) {
    let keys = random_keys(N);
    let map: RankMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("rank_of");

    group.bench_function(BenchmarkId::new("RankMap", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for &k in &keys {
                if let Some(r) = map.rank_of(&k) {
                    sum = sum.wrapping_add(r);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_range_by_rank(c: &mut Criterion) {
    let keys = random_keys(N);
    let map: RankMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let len = map.len();

    let mut group = c.benchmark_group("range_by_rank");

    // Pages of 100 across the whole map.
    group.bench_function(BenchmarkId::new("RankMap_pages", N), |b| {
        b.iter(|| {
            let mut total = 0usize;
            let mut start = 0;
            while start < len {
                total += map.range_by_rank(start, start + 100).len();
                start += 100;
            }
            total
        });
    });

    group.finish();
}

// ─── Remove Benchmarks ──────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("RankMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<RankMap<i64, i64>>(),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert_ordered, bench_insert_random, bench_insert_rerank,);

criterion_group!(rank_benches, bench_get_by_rank, bench_rank_of, bench_range_by_rank,);

criterion_group!(remove_benches, bench_remove_random,);

criterion_main!(insert_benches, rank_benches, remove_benches,);
