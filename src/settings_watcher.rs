//! Settings hot-reload.
//!
//! Watches the directory containing the settings file (editors often replace
//! files instead of writing in place) and reports changes to that one file
//! through a channel polled from the main loop.

use crate::error::SettingsError;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    rx: Receiver<SettingsEvent>,
    // Dropping the watcher stops the notifications
    _watcher: RecommendedWatcher,
}

/// Settings location the application watches by default
pub fn default_settings_path() -> Option<PathBuf> {
    crate::settings::settings_path()
}

// The watch is non-recursive on the parent, so the file name is enough.
fn same_file(event_path: &Path, target: &Path) -> bool {
    event_path.file_name() == target.file_name()
}

impl SettingsWatcher {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or(SettingsError::NoConfigDir)?;
        std::fs::create_dir_all(&dir)?;

        let (tx, rx) = mpsc::channel();
        let target = path.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let event = match res {
                Ok(event) => {
                    if !event.paths.iter().any(|p| same_file(p, &target)) {
                        return;
                    }
                    match event.kind {
                        EventKind::Create(_) => SettingsEvent::Created,
                        EventKind::Modify(_) => SettingsEvent::Modified,
                        EventKind::Remove(_) => SettingsEvent::Deleted,
                        _ => return,
                    }
                }
                Err(e) => SettingsEvent::Error(e.to_string()),
            };
            let _ = tx.send(event);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "Watching settings file");

        Ok(Self {
            path,
            rx,
            _watcher: watcher,
        })
    }

    /// Next pending event. Bursts of events collapse into the most recent one.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        let mut latest = None;
        while let Ok(event) = self.rx.try_recv() {
            latest = Some(event);
        }
        latest
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
