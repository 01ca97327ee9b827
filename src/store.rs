//! Document persistence.
//!
//! The whole [`AppData`] document is written at once. [`JsonStore`] writes
//! pretty JSON into a temp file next to the target and renames it over the
//! old file, so a crash mid-save never leaves a truncated document behind.

use crate::constants::{APP_DIR_NAME, DATA_FILE_NAME};
use crate::document::AppData;
use crate::error::{StoreError, StoreResult};
use crate::perf::measure_and_log;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Saves slower than this get a warning in the log
const SLOW_SAVE_MS: f64 = 50.0;

/// Load/save boundary for the document.
pub trait DocumentStore {
    /// Load the document. Never fails: missing or unreadable data yields a
    /// default document.
    fn load(&self) -> AppData;

    fn save(&self, data: &AppData) -> StoreResult<()>;

    /// Write a backup copy of the document to an arbitrary path.
    fn export(&self, data: &AppData, path: &Path) -> StoreResult<()> {
        write_document(data, path)
    }

    /// Read a document from an arbitrary path.
    fn import(&self, path: &Path) -> StoreResult<AppData> {
        read_document(path)
    }
}

/// Default location of the document: `<data dir>/pinboard/pins.json`
pub fn default_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR_NAME).join(DATA_FILE_NAME))
}

/// Parse a document file. The document type repairs its own invariants.
pub fn read_document(path: &Path) -> StoreResult<AppData> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Atomically write a document as pretty JSON.
pub fn write_document(data: &AppData, path: &Path) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let json = serde_json::to_string_pretty(data)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform data directory.
    pub fn at_default_location() -> StoreResult<Self> {
        default_data_path().map(Self::new).ok_or(StoreError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonStore {
    fn load(&self) -> AppData {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No document yet, starting fresh");
            return AppData::default();
        }
        match read_document(&self.path) {
            Ok(data) => {
                info!(
                    path = %self.path.display(),
                    boards = data.boards().len(),
                    pins = data.item_count(),
                    "Loaded document"
                );
                data
            }
            Err(e) => {
                warn!(path = %self.path.display(), "Failed to load document, using default: {}", e);
                AppData::default()
            }
        }
    }

    fn save(&self, data: &AppData) -> StoreResult<()> {
        measure_and_log("save_document", SLOW_SAVE_MS, || {
            write_document(data, &self.path)
        })?;
        debug!(path = %self.path.display(), "Saved document");
        Ok(())
    }

    fn export(&self, data: &AppData, path: &Path) -> StoreResult<()> {
        write_document(data, path)?;
        info!(path = %path.display(), "Exported document");
        Ok(())
    }

    fn import(&self, path: &Path) -> StoreResult<AppData> {
        let data = read_document(path)?;
        info!(path = %path.display(), boards = data.boards().len(), "Imported document");
        Ok(data)
    }
}
