//! Example demonstrating the CacheBuilder API.
//!
//! Run with: cargo run --example basic_builder

use lrukit::builder::CacheBuilder;

fn main() {
    println!("=== CacheBuilder Examples ===\n");

    // Example 1: single-lock LRU
    println!("1. LRU Cache");
    let lru = CacheBuilder::new(3).build::<u64, String>();

    lru.put(1, "one".to_string());
    lru.put(2, "two".to_string());
    lru.put(3, "three".to_string());

    // Access key 1 to make it MRU
    lru.get(&1);

    // Insert key 4, evicts LRU (key 2)
    lru.put(4, "four".to_string());

    println!("   contains 1? {} (was accessed)", lru.contains(&1));
    println!("   contains 2? {} (evicted as LRU)", lru.contains(&2));
    println!("   contains 4? {} (just inserted)", lru.contains(&4));
    println!();

    // Example 2: signed capacity validation
    println!("2. Signed capacities");
    match CacheBuilder::try_from_signed(-1) {
        Ok(_) => println!("   -1 accepted"),
        Err(err) => println!("   -1 rejected: {err}"),
    }
    let empty = CacheBuilder::try_from_signed(0)
        .map(|b| b.build::<u64, String>())
        .unwrap_or_default();
    empty.put(1, "dropped".to_string());
    println!("   zero capacity len after put: {}", empty.len());
    println!();

    // Example 3: sharded
    println!("3. Sharded Cache (4 shards)");
    let sharded = CacheBuilder::new(8).shards(4).seed(1).build_sharded::<u64, u64>();
    for k in 0..8 {
        sharded.put(k, k * k);
    }
    println!("   shards: {}", sharded.shard_count());
    println!("   capacity: {}", sharded.capacity());
    println!("   get(&3): {:?}", sharded.get(&3));
    println!();

    // Example 4: invalid shard count
    println!("4. Validation");
    if let Err(err) = CacheBuilder::new(8).shards(0).try_build_sharded::<u64, u64>() {
        println!("   shards(0): {err}");
    }
    println!();

    // Example 5: common operations
    println!("5. Common Operations");
    let cache = CacheBuilder::new(10).build::<u64, String>();

    cache.put(1, "original".to_string());
    let old = cache.put(1, "updated".to_string());
    println!("   put returned previous: {:?}", old);

    if let Some(value) = cache.get(&1) {
        println!("   get(&1): {}", value);
    }

    // contains doesn't update access order
    println!("   contains(&1): {}", cache.contains(&1));
    println!("   contains(&99): {}", cache.contains(&99));

    println!(
        "   len: {}, capacity: {}, is_empty: {}",
        cache.len(),
        cache.capacity(),
        cache.is_empty()
    );

    cache.clear();
    println!("   after clear - is_empty: {}", cache.is_empty());
}

// Expected output:
// === CacheBuilder Examples ===
//
// 1. LRU Cache
//    contains 1? true (was accessed)
//    contains 2? false (evicted as LRU)
//    contains 4? true (just inserted)
//
// 2. Signed capacities
//    -1 rejected: invalid capacity -1: capacity must be zero or a positive integer
//    zero capacity len after put: 0
//
// 3. Sharded Cache (4 shards)
//    shards: 4
//    capacity: 8
//    get(&3): Some(9)   (or None if key 3's shard evicted it)
//
// 4. Validation
//    shards(0): shard count must be at least 1
//
// 5. Common Operations
//    put returned previous: Some("original")
//    get(&1): updated
//    contains(&1): true
//    contains(&99): false
//    len: 1, capacity: 10, is_empty: false
//    after clear - is_empty: true
