use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JotterError {
    #[error("Note not found: {0}")]
    NoteNotFound(Uuid),

    #[error("A deletion is pending; mutations are blocked until it completes")]
    DeletePending,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, JotterError>;
