use lrukit::policy::lru::LruCache;

fn show(value: Option<u32>) -> String {
    value.map_or_else(|| "miss".to_string(), |v| v.to_string())
}

fn main() {
    let cache = LruCache::new(3);

    cache.put(1, 10);
    cache.put(2, 20);
    cache.put(3, 30);

    println!("get(1) = {}", show(cache.get(&1)));

    cache.put(4, 40);

    println!("get(2) = {}", show(cache.get(&2)));
    println!("get(3) = {}", show(cache.get(&3)));
    println!("get(4) = {}", show(cache.get(&4)));
    println!("recency: {:?}", cache.keys_by_recency());
}

// Expected output:
// get(1) = 10
// get(2) = miss
// get(3) = 30
// get(4) = 40
// recency: [4, 3, 1]
//
// Explanation: capacity=3; after get(&1), key 1 is MRU and key 2 is LRU.
// Inserting key 4 evicts key 2.
