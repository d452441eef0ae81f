//! Performance regression tests
//!
//! These tests verify complexity guarantees and catch major performance regressions.
//! They are NOT micro-benchmarks - use `cargo bench` for detailed performance analysis.
//!
//! ## Purpose
//!
//! - Verify O(1) complexity for get, put, eviction and removal
//! - Cover both the bare core and the locked cache
//! - Loose thresholds only, to avoid flakiness

use std::time::{Duration, Instant};

use lrukit::policy::lru::{LruCache, LruCore};
use lrukit::traits::{CoreCache, LruCacheTrait, MutableCache};

const SIZES: [usize; 4] = [1000, 2000, 4000, 8000];

/// Helper to measure operation duration
fn measure_time<F, R>(operation: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = operation();
    (result, start.elapsed())
}

fn filled_core(size: usize) -> LruCore<u64, u64> {
    let mut cache = LruCore::new(size);
    for i in 0..size as u64 {
        cache.insert(i, i);
    }
    cache
}

/// Runs `op` `iterations` times against a cache of each size and checks that
/// the per-op time stays roughly flat as the size doubles.
fn verify_flat<C, S, F>(label: &str, iterations: u64, mut setup: S, mut op: F)
where
    S: FnMut(usize) -> C,
    F: FnMut(&mut C, usize, u64),
{
    let mut times = Vec::new();

    for &size in &SIZES {
        let mut cache = setup(size);
        let (_, duration) = measure_time(|| {
            for i in 0..iterations {
                op(&mut cache, size, i);
            }
        });
        let avg = duration.as_nanos() as f64 / iterations as f64;
        println!("[{label}] Size: {size}, Avg time: {avg:.2} ns");
        times.push(avg);
    }

    // Doubling the size of an O(n) operation doubles its time; allow a wide
    // margin for cache effects, allocator behavior and debug builds.
    for i in 1..times.len() {
        let size_ratio = SIZES[i] as f64 / SIZES[i - 1] as f64;
        let time_ratio = times[i] / times[i - 1];

        println!(
            "[{label}] Size {}→{} ({size_ratio:.2}x): time {:.1}ns→{:.1}ns ({time_ratio:.2}x)",
            SIZES[i - 1],
            SIZES[i],
            times[i - 1],
            times[i],
        );

        assert!(
            time_ratio < 15.0,
            "[{label}] operation appears to be O(n), not O(1):\n\
             Size increased by {size_ratio:.2}x but time increased by {time_ratio:.2}x"
        );
    }
}

// =============================================================================
// Complexity Tests - Verify O(1) behavior
// =============================================================================

mod complexity_core {
    use super::*;

    #[test]
    fn test_get_is_o1() {
        verify_flat("core get", 10_000, filled_core, |cache, size, i| {
            let _ = cache.get(&(i % size as u64));
        });
    }

    #[test]
    fn test_insert_is_o1() {
        verify_flat("core insert", 1_000, LruCore::<u64, u64>::new, |cache, _, i| {
            cache.insert(i, i);
        });
    }

    #[test]
    fn test_eviction_is_o1() {
        verify_flat("core evict", 1_000, filled_core, |cache, size, i| {
            cache.insert(size as u64 + i, i);
        });
    }

    #[test]
    fn test_remove_and_reinsert_is_o1() {
        verify_flat("core remove", 1_000, filled_core, |cache, size, i| {
            let key = (i * 7) % size as u64;
            let _ = cache.remove(&key);
            cache.insert(key, i);
        });
    }

    #[test]
    fn test_pop_lru_is_o1() {
        verify_flat("core pop_lru", 500, filled_core, |cache, _, _| {
            let _ = cache.pop_lru();
        });
    }
}

mod complexity_shared {
    use super::*;

    #[test]
    fn test_locked_get_is_o1() {
        verify_flat(
            "cache get",
            10_000,
            |size| LruCache::from(filled_core(size)),
            |cache, size, i| {
                let _ = cache.get(&(i % size as u64));
            },
        );
    }

    #[test]
    fn test_locked_put_with_eviction_is_o1() {
        verify_flat(
            "cache put",
            1_000,
            |size| LruCache::from(filled_core(size)),
            |cache, size, i| {
                cache.put(size as u64 + i, i);
            },
        );
    }
}

// =============================================================================
// Absolute bounds - catch catastrophic regressions only
// =============================================================================

mod latency_bounds {
    use super::*;

    #[test]
    fn test_get_latency_is_reasonable() {
        let mut cache = filled_core(1000);
        let iterations = 10_000u32;
        let (_, duration) = measure_time(|| {
            for i in 0..iterations as u64 {
                cache.get(&(i % 1000));
            }
        });
        let avg = duration / iterations;
        println!("Average get latency: {avg:?}");
        assert!(avg < Duration::from_micros(10), "Get operation too slow: {avg:?}");
    }

    #[test]
    fn test_put_latency_is_reasonable() {
        let cache = LruCache::new(1000);
        let iterations = 10_000u32;
        let (_, duration) = measure_time(|| {
            for i in 0..iterations as u64 {
                cache.put(i, i);
            }
        });
        let avg = duration / iterations;
        println!("Average put latency: {avg:?}");
        assert!(avg < Duration::from_micros(20), "Put operation too slow: {avg:?}");
    }
}
