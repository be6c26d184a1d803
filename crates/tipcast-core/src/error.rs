//! Error taxonomy. Config and Store errors are fatal for a run; Transport
//! errors are recoverable per recipient and never abort the delivery loop.

use thiserror::Error;

/// All errors Tipcast can surface.
#[derive(Debug, Error)]
pub enum TipcastError {
    /// Missing/invalid process configuration — fatal, exit before touching state.
    #[error("Config error: {0}")]
    Config(String),

    /// Required data store unreadable or corrupt — fatal.
    #[error("Store error: {0}")]
    Store(String),

    /// Transport-level fault. Callers treat this as a failed send for one
    /// recipient, not as a run failure.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TipcastError>;
