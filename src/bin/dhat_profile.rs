//! DHAT heap profiler for lrukit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::thread;

use lrukit::policy::lru::{LruCache, LruCore};
use lrukit::policy::sharded::ShardedLruCache;
use lrukit::traits::{CoreCache, MutableCache};

const CAPACITY: usize = 4096;
const OPERATIONS: usize = 100_000;
const UNIVERSE: u64 = 16_384;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }

    /// 90% of draws land in the first tenth of the universe.
    fn hotset_key(&mut self, universe: u64) -> u64 {
        let hot_size = universe / 10;
        if self.next_f64() < 0.9 {
            self.next_u64() % hot_size
        } else {
            hot_size + (self.next_u64() % (universe - hot_size))
        }
    }
}

fn hotset_workload<C: CoreCache<u64, Vec<u8>>>(cache: &mut C, operations: usize, seed: u64) {
    let mut rng = XorShift64::new(seed);
    for _ in 0..operations {
        let key = rng.hotset_key(UNIVERSE);
        if cache.get(&key).is_none() {
            let _ = cache.insert(key, vec![0u8; 64]);
        }
    }
}

fn scan_workload<C: CoreCache<u64, Vec<u8>>>(cache: &mut C, operations: usize) {
    for i in 0..operations {
        let key = (i as u64) % UNIVERSE;
        if cache.get(&key).is_none() {
            let _ = cache.insert(key, vec![0u8; 64]);
        }
    }
}

/// Insert far more distinct keys than capacity, with some removals mixed in
/// so freed arena slots get reused.
fn eviction_churn<C: MutableCache<u64, Vec<u8>>>(cache: &mut C, operations: usize) {
    for i in 0..operations as u64 {
        let _ = cache.insert(i, vec![0u8; 64]);
        if i % 7 == 0 {
            let _ = cache.remove(&(i / 2));
        }
    }
}

fn profile_core() {
    println!("=== Profiling LruCore ===");
    let mut cache = LruCore::new(CAPACITY);

    for i in 0..CAPACITY as u64 {
        cache.insert(i, vec![0u8; 64]);
    }

    hotset_workload(&mut cache, OPERATIONS, 42);
    scan_workload(&mut cache, OPERATIONS / 2);
    eviction_churn(&mut cache, OPERATIONS / 4);

    println!("  Final size: {}", cache.len());
}

fn profile_shared() {
    println!("=== Profiling LruCache (4 threads) ===");
    let cache = LruCache::new(CAPACITY);
    run_threads(4, |seed| {
        let cache = cache.clone();
        move || {
            let mut rng = XorShift64::new(seed);
            for _ in 0..OPERATIONS / 4 {
                let key = rng.hotset_key(UNIVERSE);
                if cache.get_with(&key, |v: &Vec<u8>| v.len()).is_none() {
                    cache.put(key, vec![0u8; 64]);
                }
            }
        }
    });
    println!("  Final size: {}", cache.len());
}

fn profile_sharded() {
    println!("=== Profiling ShardedLruCache (4 threads, 8 shards) ===");
    let cache = ShardedLruCache::new(CAPACITY, 8);
    run_threads(4, |seed| {
        let cache = cache.clone();
        move || {
            let mut rng = XorShift64::new(seed);
            for _ in 0..OPERATIONS / 4 {
                let key = rng.hotset_key(UNIVERSE);
                if cache.get_with(&key, |v: &Vec<u8>| v.len()).is_none() {
                    cache.put(key, vec![0u8; 64]);
                }
            }
        }
    });
    println!("  Final size: {}", cache.len());
}

fn run_threads<F, W>(threads: u64, mut make: F)
where
    F: FnMut(u64) -> W,
    W: FnOnce() + Send + 'static,
{
    let handles: Vec<_> = (0..threads)
        .map(|t| thread::spawn(make(t * 31 + 1)))
        .collect();
    for handle in handles {
        if handle.join().is_err() {
            eprintln!("worker thread panicked");
        }
    }
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("lrukit DHAT Heap Profiling");
    println!("==========================\n");

    profile_core();
    profile_shared();
    profile_sharded();

    println!("\n==========================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
