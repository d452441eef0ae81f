#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCache;

// Fuzz LruCache against a straightforward reference LRU
//
// First byte picks the capacity (0..=8); each following pair is (op, key).
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 9);
    let cache: LruCache<u8, u32> = LruCache::new(capacity);
    // most recent first
    let mut model: VecDeque<(u8, u32)> = VecDeque::new();

    for (step, pair) in rest.chunks_exact(2).enumerate() {
        let key = pair[1] % 16;
        let value = step as u32;

        match pair[0] % 4 {
            0 => {
                let expected = model.iter().position(|&(k, _)| k == key).map(|at| {
                    let entry = model.remove(at).unwrap();
                    model.push_front(entry);
                    entry.1
                });
                assert_eq!(cache.get(&key), expected);
            },
            1 | 2 => {
                let expected = match model.iter().position(|&(k, _)| k == key) {
                    Some(at) => {
                        let (_, old) = model.remove(at).unwrap();
                        model.push_front((key, value));
                        Some(old)
                    },
                    None => {
                        if capacity > 0 {
                            if model.len() == capacity {
                                model.pop_back();
                            }
                            model.push_front((key, value));
                        }
                        None
                    },
                };
                assert_eq!(cache.put(key, value), expected);
            },
            _ => {
                let expected = model
                    .iter()
                    .position(|&(k, _)| k == key)
                    .and_then(|at| model.remove(at))
                    .map(|(_, v)| v);
                assert_eq!(cache.remove(&key), expected);
            },
        }

        assert!(cache.len() <= capacity);
        assert_eq!(cache.len(), model.len());
    }

    let keys: Vec<u8> = model.iter().map(|&(k, _)| k).collect();
    assert_eq!(cache.keys_by_recency(), keys);
    assert!(cache.check_invariants().is_ok());
});
