//! Error types for the scene model and its collaborators.
//!
//! Structural errors come back from the [`Board`](crate::board::Board) API;
//! commands swallow them. I/O errors stop at the collaborator boundary where
//! they are logged and turned into status toasts.

use thiserror::Error;

/// Errors from scene model operations on a board
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// No pin with this id on the board
    #[error("pin not found: {0}")]
    ItemNotFound(String),

    /// No group with this id on the board
    #[error("group not found: {0}")]
    GroupNotFound(String),

    /// An object with this id already exists on the board
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// No board with this id in the document
    #[error("board not found: {0}")]
    BoardNotFound(String),
}

/// Result type alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while reading or writing the document store
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error from serde_json
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Temp file could not be moved over the target
    #[error("could not replace {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No usable location for the store
    #[error("no data directory available")]
    NoDataDir,
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from handing a path or URL to the OS shell
#[derive(Error, Debug)]
pub enum LaunchError {
    /// Empty target
    #[error("nothing to open")]
    EmptyTarget,

    /// The shell refused or failed to open the target
    #[error("failed to open {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from loading, saving or watching settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("no config directory available")]
    NoConfigDir,
}

impl From<tempfile::PersistError> for StoreError {
    fn from(e: tempfile::PersistError) -> Self {
        StoreError::Persist {
            path: e.file.path().display().to_string(),
            source: e.error,
        }
    }
}
