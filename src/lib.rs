pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod note;
pub mod store;

pub use board::Board;
pub use config::{Config, PersistPolicy};
pub use error::{PinError, Result};
pub use note::Note;
pub use store::{FileStorage, KeyValueStorage, MemoryStorage, NoteStore};
