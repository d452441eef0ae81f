//! Multi-threaded throughput: single-lock `LruCache` vs `ShardedLruCache`.
//!
//! Run with: `cargo bench --bench contention`

use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lrukit::policy::lru::LruCache;
use lrukit::policy::sharded::ShardedLruCache;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 16_384;
const UNIVERSE: u64 = 65_536;
const OPS_PER_THREAD: u64 = 20_000;

/// Shared get/put surface so one driver can time both caches.
trait SharedLru: Clone + Send + 'static {
    fn get(&self, key: u64) -> Option<u64>;
    fn put(&self, key: u64, value: u64);
}

impl SharedLru for LruCache<u64, u64> {
    fn get(&self, key: u64) -> Option<u64> {
        LruCache::get(self, &key)
    }

    fn put(&self, key: u64, value: u64) {
        LruCache::put(self, key, value);
    }
}

impl SharedLru for ShardedLruCache<u64, u64> {
    fn get(&self, key: u64) -> Option<u64> {
        ShardedLruCache::get(self, &key)
    }

    fn put(&self, key: u64, value: u64) {
        ShardedLruCache::put(self, key, value);
    }
}

/// 80% gets / 20% puts, read-through on miss. Returns wall time for all threads.
fn run_mixed<C: SharedLru>(cache: &C, threads: usize) -> Duration {
    let barrier = Arc::new(Barrier::new(threads + 1));
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let cache = cache.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut rng = SmallRng::seed_from_u64(t as u64 + 1);
                barrier.wait();
                for i in 0..OPS_PER_THREAD {
                    let key = rng.gen_range(0..UNIVERSE);
                    if rng.gen_bool(0.8) {
                        if black_box(cache.get(key)).is_none() {
                            cache.put(key, i);
                        }
                    } else {
                        cache.put(key, i);
                    }
                }
            })
        })
        .collect();

    barrier.wait();
    let start = Instant::now();
    for handle in handles {
        let _ = handle.join();
    }
    start.elapsed()
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention_mixed");
    group.sample_size(20);

    for threads in [1usize, 2, 4, 8] {
        group.throughput(Throughput::Elements(OPS_PER_THREAD * threads as u64));

        group.bench_with_input(BenchmarkId::new("single_lock", threads), &threads, |b, &n| {
            b.iter_custom(|iters| {
                let cache: LruCache<u64, u64> = LruCache::new(CAPACITY);
                (0..iters).map(|_| run_mixed(&cache, n)).sum()
            })
        });

        group.bench_with_input(BenchmarkId::new("sharded_16", threads), &threads, |b, &n| {
            b.iter_custom(|iters| {
                let cache: ShardedLruCache<u64, u64> = ShardedLruCache::new(CAPACITY, 16);
                (0..iters).map(|_| run_mixed(&cache, n)).sum()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_contention);
criterion_main!(benches);
