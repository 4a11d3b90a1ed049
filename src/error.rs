// File: src/error.rs
use std::path::PathBuf;

/// Errors raised while driving a review session.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// The operator stream ended while a prompt was waiting for an answer.
    /// `ReviewSession::run` turns this into an early stop.
    #[error("Operator input closed before the review finished")]
    OperatorInputClosed,
    #[error("Operator I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while building a spelling dictionary.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Failed to load dictionary {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },
    /// No `<lang>.txt` or `<lang>.json` could be found
    #[error("No dictionary found for language '{language}' in {dir:?}")]
    MissingLanguage { language: String, dir: PathBuf },
}

/// Errors raised while saving or restoring session state.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("State file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode state: {0}")]
    Encode(String),
    #[error("Failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },
}
