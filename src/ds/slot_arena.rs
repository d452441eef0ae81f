//! Vector-backed arena with stable `SlotId` handles.
//!
//! Vacated slots are recycled LIFO, so a `SlotId` stays valid until the value
//! behind it is removed. A live value never changes slot, which is what lets
//! the entry list store `prev`/`next` as plain ids.
//!
//! ```text
//!   slots:  [ Some(a) | None | Some(c) | Some(d) ]
//!   vacant: [ 1 ]
//!   len = slots - vacant = 3
//! ```

use std::ops::{Index, IndexMut};

/// Stable handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Slots that are either occupied or listed in `vacant`, never both.
#[derive(Debug, Clone)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    vacant: Vec<usize>,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
        }
    }

    /// Stores `value`, preferring the most recently vacated slot.
    pub fn insert(&mut self, value: T) -> SlotId {
        if let Some(idx) = self.vacant.pop() {
            debug_assert!(self.slots[idx].is_none(), "vacant slot {idx} is occupied");
            self.slots[idx] = Some(value);
            return SlotId(idx);
        }
        self.slots.push(Some(value));
        SlotId(self.slots.len() - 1)
    }

    /// Vacates `id` and returns its value; `None` if the slot was already empty.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.vacant.push(id.0);
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every value; the next insert starts again at slot 0.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Panics if `id` is vacant: a dangling handle means the owner's links are corrupt.
impl<T> Index<SlotId> for SlotArena<T> {
    type Output = T;

    fn index(&self, id: SlotId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("dangling slot id {}", id.0),
        }
    }
}

impl<T> IndexMut<SlotId> for SlotArena<T> {
    fn index_mut(&mut self, id: SlotId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("dangling slot id {}", id.0),
        }
    }
}
