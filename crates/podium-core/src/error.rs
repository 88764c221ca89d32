//! Error types for podium-core.
//!
//! Timer operations themselves never fail; errors live at the catalog
//! boundary (unknown event names are a hard error, not a silent empty
//! state) and the persistence surface.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Selecting an event name the catalog does not know.
    #[error("unknown event: '{0}'")]
    UnknownEvent(String),

    /// Settings file could not be loaded or saved.
    #[error("settings error at {path}: {message}")]
    Settings { path: PathBuf, message: String },

    /// Dot-path settings access with a key that does not exist.
    #[error("unknown settings key: {0}")]
    UnknownKey(String),

    /// Settings value that does not parse as the field's type.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
