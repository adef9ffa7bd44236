use thiserror::Error;

#[derive(Error, Debug)]
pub enum PinError {
    #[error("Not in a pinitup project. Run 'pinitup init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .pinitup/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Ambiguous note id '{0}': matches more than one note")]
    AmbiguousId(String),

    #[error("Refusing to clear without confirmation. Use --force in non-interactive mode.")]
    ConfirmationRequired,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PinError>;
