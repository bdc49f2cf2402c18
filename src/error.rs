// File: src/error.rs
use thiserror::Error;

/// Root error type for wordlist generation.
///
/// Per-word rejections are NOT errors; they are recorded as
/// `ValidationOutcome`s. Only configuration and I/O failures end up here.
#[derive(Error, Debug)]
pub enum WordlistError {
    /// Invalid configuration, including `target_size` below the foundation size.
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Atomic rename of a temp file onto its destination failed.
    #[error("persist error: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type WordlistResult<T> = Result<T, WordlistError>;
