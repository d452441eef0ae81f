//! Sentinel-anchored doubly linked recency list backed by `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and link to each other by [`SlotId`]. Two
//! anchor nodes occupy the first two slots for the lifetime of the list: the
//! most-recent anchor and the least-recent anchor. Every live node always has
//! a real `prev` and `next`, so linking and unlinking never special-case the
//! ends of the list.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ SlotId │ Node { prev, next, value }                   │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ 0  MRU │ { prev: 0,    next: id_2, value: None }      │
//!   │ 1  LRU │ { prev: id_3, next: 1,    value: None }      │
//!   │ id_2   │ { prev: 0,    next: id_3, value: Some(A) }   │
//!   │ id_3   │ { prev: id_2, next: 1,    value: Some(B) }   │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   [MRU anchor] ◄──► [A] ◄──► [B] ◄──► [LRU anchor]
//!    most recent ───────────────────► least recent
//! ```
//!
//! ## Operations
//! - `push_most_recent(value)`: allocate + link after the MRU anchor
//! - `move_to_most_recent(id)`: unlink + relink after the MRU anchor
//! - `remove(id)`: unlink + free the slot
//! - `evict_least_recent()`: remove the node before the LRU anchor
//!
//! ## Performance
//! - every operation above: O(1), independent of length
//! - `iter`: O(n)
//!
//! Anchors are never counted by `len()`, never yielded by iterators and
//! never accepted as ids by the public methods.

use std::fmt;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

const MOST_RECENT: SlotId = SlotId(0);
const LEAST_RECENT: SlotId = SlotId(1);
const ANCHORS: usize = 2;

#[derive(Debug, Clone)]
struct Node<T> {
    prev: SlotId,
    next: SlotId,
    value: Option<T>,
}

/// Recency-ordered list with O(1) insert, move, remove and eviction.
#[derive(Clone)]
pub struct OrderedEntryList<T> {
    arena: SlotArena<Node<T>>,
}

impl<T> OrderedEntryList<T> {
    /// Creates an empty list holding only its two anchors.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` entries before reallocating.
    ///
    /// # Panics
    ///
    /// Panics if the reservation overflows, as `Vec::with_capacity` does.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut list = Self {
            arena: SlotArena::with_capacity(capacity.saturating_add(ANCHORS)),
        };
        list.install_anchors();
        list
    }

    fn install_anchors(&mut self) {
        let head = self.arena.insert(Node {
            prev: MOST_RECENT,
            next: LEAST_RECENT,
            value: None,
        });
        let tail = self.arena.insert(Node {
            prev: MOST_RECENT,
            next: LEAST_RECENT,
            value: None,
        });
        debug_assert_eq!((head, tail), (MOST_RECENT, LEAST_RECENT));
    }

    #[inline]
    fn is_anchor(id: SlotId) -> bool {
        id == MOST_RECENT || id == LEAST_RECENT
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.arena.len() - ANCHORS
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `id` names a live entry of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id)?.value.as_ref()
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id)?.value.as_mut()
    }

    /// Links `value` right after the most-recent anchor and returns its handle.
    pub fn push_most_recent(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            prev: MOST_RECENT,
            next: LEAST_RECENT,
            value: Some(value),
        });
        self.link_most_recent(id);
        id
    }

    /// Unlinks `id` and returns its value; `None` for unknown ids.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id);
        self.arena.remove(id).and_then(|node| node.value)
    }

    /// Makes `id` the most recently used entry; `false` for unknown ids.
    pub fn move_to_most_recent(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.arena[MOST_RECENT].next != id {
            self.unlink(id);
            self.link_most_recent(id);
        }
        true
    }

    /// Removes and returns the least recently used entry.
    pub fn evict_least_recent(&mut self) -> Option<T> {
        let last = self.arena[LEAST_RECENT].prev;
        if last == MOST_RECENT {
            return None;
        }
        self.remove(last)
    }

    /// Returns the least recently used entry without unlinking it.
    pub fn peek_least_recent(&self) -> Option<(SlotId, &T)> {
        let last = self.arena[LEAST_RECENT].prev;
        self.get(last).map(|value| (last, value))
    }

    /// Returns the most recently used entry.
    pub fn peek_most_recent(&self) -> Option<(SlotId, &T)> {
        let first = self.arena[MOST_RECENT].next;
        self.get(first).map(|value| (first, value))
    }

    /// Iterates values from most recent to least recent.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.arena[MOST_RECENT].next,
            remaining: self.len(),
        }
    }

    /// Drops every entry; the anchors are reinstated.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.install_anchors();
    }

    #[inline]
    fn link_most_recent(&mut self, id: SlotId) {
        let first = self.arena[MOST_RECENT].next;
        let node = &mut self.arena[id];
        node.prev = MOST_RECENT;
        node.next = first;
        self.arena[first].prev = id;
        self.arena[MOST_RECENT].next = id;
    }

    #[inline]
    fn unlink(&mut self, id: SlotId) {
        let Node { prev, next, .. } = self.arena[id];
        self.arena[prev].next = next;
        self.arena[next].prev = prev;
    }

    /// Walks the list from the most-recent anchor and reports the first broken link.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        for anchor in [MOST_RECENT, LEAST_RECENT] {
            match self.arena.get(anchor) {
                Some(node) if node.value.is_none() => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "anchor {} carries a value",
                        anchor.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "anchor {} missing",
                        anchor.index()
                    )));
                },
            }
        }

        let mut prev = MOST_RECENT;
        let mut current = self.arena[MOST_RECENT].next;
        let mut count = 0usize;
        while current != LEAST_RECENT {
            let Some(node) = self.arena.get(current) else {
                return Err(InvariantError::new(format!(
                    "link to vacant slot {}",
                    current.index()
                )));
            };
            if Self::is_anchor(current) || node.value.is_none() {
                return Err(InvariantError::new(format!(
                    "slot {} reached mid-list without a value",
                    current.index()
                )));
            }
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has prev {} but was reached from {}",
                    current.index(),
                    node.prev.index(),
                    prev.index()
                )));
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            prev = current;
            current = node.next;
        }

        if self.arena[LEAST_RECENT].prev != prev {
            return Err(InvariantError::new("least-recent anchor points at wrong tail"));
        }
        if count != self.len() {
            return Err(InvariantError::new(format!(
                "walked {count} entries but arena holds {}",
                self.len()
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("recency list corrupt: {err}");
        }
    }
}

impl<T> Default for OrderedEntryList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedEntryList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over list values, most recent first.
pub struct Iter<'a, T> {
    list: &'a OrderedEntryList<T>,
    current: SlotId,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.current)?;
        let value = node.value.as_ref()?;
        self.current = node.next;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a OrderedEntryList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
