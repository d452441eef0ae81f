//! Several threads hammering one sharded cache.
//!
//! Run with: cargo run --example basic_sharded

use std::thread;

use lrukit::policy::sharded::ShardedLruCache;

fn main() {
    let cache: ShardedLruCache<u64, u64> = ShardedLruCache::new(1_000, 8);

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                let mut hits = 0u64;
                for i in 0..10_000u64 {
                    let key = (i * 7 + t) % 1_500;
                    if cache.get(&key).is_some() {
                        hits += 1;
                    } else {
                        cache.put(key, i);
                    }
                }
                hits
            })
        })
        .collect();

    let hits: u64 = handles.into_iter().filter_map(|h| h.join().ok()).sum();

    println!("hits: {hits}");
    println!("len: {} / {}", cache.len(), cache.capacity());
    for (i, (cap, len)) in cache.shard_stats().into_iter().enumerate() {
        println!("  shard {i}: {len}/{cap}");
    }
}

// Each shard evicts on its own, so len stays <= 1000 and each shard stays
// within its own share (125 here).
