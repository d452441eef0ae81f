pub mod entry_list;
pub mod shard;
pub mod slot_arena;

pub use entry_list::OrderedEntryList;
pub use shard::ShardSelector;
pub use slot_arena::{SlotArena, SlotId};
