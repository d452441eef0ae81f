#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use lrukit::ds::{OrderedEntryList, SlotId};

// Fuzz arbitrary operation sequences on OrderedEntryList
//
// Mirrors every operation on a VecDeque of (id, value), most recent first,
// and checks order plus anchor invariants after each step.
fuzz_target!(|data: &[u8]| {
    let mut list: OrderedEntryList<u32> = OrderedEntryList::new();
    let mut model: VecDeque<(SlotId, u32)> = VecDeque::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 6;
        let arg = u32::from(pair[1]);

        match op {
            0 | 1 => {
                // push, weighted so lists actually grow
                let id = list.push_most_recent(arg);
                assert_eq!(list.get(id), Some(&arg));
                model.push_front((id, arg));
            },
            2 => {
                // remove a live entry
                if !model.is_empty() {
                    let at = arg as usize % model.len();
                    let (id, value) = model.remove(at).unwrap();
                    assert_eq!(list.remove(id), Some(value));
                    assert!(!list.contains(id));
                }
            },
            3 => {
                // move to most recent
                if !model.is_empty() {
                    let at = arg as usize % model.len();
                    let entry = model.remove(at).unwrap();
                    assert!(list.move_to_most_recent(entry.0));
                    model.push_front(entry);
                }
            },
            4 => {
                // evict
                let expected = model.pop_back().map(|(_, value)| value);
                assert_eq!(list.evict_least_recent(), expected);
            },
            _ => {
                if arg % 16 == 0 {
                    list.clear();
                    model.clear();
                } else {
                    let lru = list.peek_least_recent().map(|(id, v)| (id, *v));
                    assert_eq!(lru, model.back().copied());
                }
            },
        }

        assert_eq!(list.len(), model.len());
        assert!(list.check_invariants().is_ok());
    }

    let order: Vec<u32> = list.iter().copied().collect();
    let expected: Vec<u32> = model.iter().map(|&(_, v)| v).collect();
    assert_eq!(order, expected);
});
