mod note_store;
mod reorder;
mod storage;

pub use note_store::{ClearToken, LoadOutcome, NoteStore};
pub use reorder::{reorder, reorder_in_place};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
#[cfg(test)]
pub(crate) use storage::FailingStorage;
