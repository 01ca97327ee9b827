//! Application lifecycle - construction, the commit pipeline, saving and the
//! periodic tick.

use super::Pinboard;
use crate::app::state::{CanvasState, SystemState, UiState};
use crate::board::Board;
use crate::history::{Command, History};
use crate::icons::FaviconService;
use crate::notifications::Toast;
use crate::settings::Settings;
use crate::settings_watcher::{SettingsEvent, SettingsWatcher, default_settings_path};
use crate::store::{DocumentStore, JsonStore};
use crate::types::PinKind;
use std::time::Instant;
use tracing::{debug, error, info, warn};

impl Pinboard {
    /// Open a session on a store. Loading never fails.
    pub fn new(store: Box<dyn DocumentStore>, settings: Settings) -> Self {
        let document = store.load();
        Self {
            document,
            history: History::default(),
            canvas: CanvasState::default(),
            ui: UiState::default(),
            settings,
            system: SystemState {
                store,
                favicons: None,
                settings_watcher: None,
                last_save: Instant::now(),
                dirty: false,
            },
        }
    }

    /// Session wired to the user's settings, the JSON store, the favicon
    /// service and the settings watcher.
    pub fn with_defaults() -> Self {
        let settings = Settings::load();
        let store = match settings.data_file.clone() {
            Some(path) => JsonStore::new(path),
            None => match JsonStore::at_default_location() {
                Ok(store) => store,
                Err(e) => {
                    warn!("{}, storing the document in the working directory", e);
                    JsonStore::new(crate::constants::DATA_FILE_NAME)
                }
            },
        };
        info!(path = %store.path().display(), "Using document store");

        let favicons = if settings.fetch_favicons {
            FaviconService::with_http()
                .map_err(|e| warn!("Favicons disabled: {:#}", e))
                .ok()
        } else {
            None
        };
        let watcher = default_settings_path().and_then(|p| {
            SettingsWatcher::new(p)
                .map_err(|e| warn!("Settings hot-reload disabled: {}", e))
                .ok()
        });

        let mut pinboard = Self::new(Box::new(store), settings);
        if let Some(favicons) = favicons {
            pinboard = pinboard.with_favicons(favicons);
        }
        if let Some(watcher) = watcher {
            pinboard = pinboard.with_settings_watcher(watcher);
        }
        pinboard
    }

    /// Attach a favicon service and queue fetches for every URL pin.
    pub fn with_favicons(mut self, favicons: FaviconService) -> Self {
        self.system.favicons = Some(favicons);
        self.request_board_favicons();
        self
    }

    pub fn with_settings_watcher(mut self, watcher: SettingsWatcher) -> Self {
        self.system.settings_watcher = Some(watcher);
        self
    }

    pub fn active_board(&self) -> &Board {
        self.document.active_board()
    }

    // ==================== Commit pipeline ====================

    /// Execute a command against the active board, then prune UI state and
    /// save. A gesture still in progress is cancelled first; gesture commits
    /// take the gesture out of `input_state` before they get here.
    pub fn execute(&mut self, cmd: Command) {
        crate::profile_scope!("execute_command");
        self.cancel_gesture();
        let board = self.document.active_board_mut();
        self.history.execute(cmd, board);
        self.after_mutation();
    }

    /// Undo on the active board. Any gesture in progress is cancelled first.
    pub fn undo(&mut self) -> Option<String> {
        self.cancel_gesture();
        let description = self.history.undo(self.document.active_board_mut())?;
        debug!(%description, "Undo");
        self.after_mutation();
        Some(description)
    }

    pub fn redo(&mut self) -> Option<String> {
        self.cancel_gesture();
        let description = self.history.redo(self.document.active_board_mut())?;
        debug!(%description, "Redo");
        self.after_mutation();
        Some(description)
    }

    pub(crate) fn after_mutation(&mut self) {
        let board = self.document.active_board_mut();
        board.touch();
        self.canvas.selection.retain_existing(board);
        self.ui.search.refresh(board);
        if let Some(id) = &self.canvas.editing_note {
            if !board.contains_item(id) {
                self.canvas.editing_note = None;
            }
        }
        self.save();
    }

    /// Drop everything tied to the active board's object ids. Gestures must
    /// be cancelled before the active board changes.
    pub(crate) fn reset_board_session(&mut self) {
        self.canvas.selection.clear();
        self.canvas.editing_note = None;
        self.ui.search.clear();
        self.history.clear();
    }

    // ==================== Persistence ====================

    /// Save the whole document. Failures are logged and toasted, never fatal.
    pub fn save(&mut self) -> bool {
        self.system.last_save = Instant::now();
        match self.system.store.save(&self.document) {
            Ok(()) => {
                self.system.dirty = false;
                true
            }
            Err(e) => {
                error!("Save failed: {}", e);
                self.ui.toasts.push(Toast::error(format!("Save failed: {}", e)));
                false
            }
        }
    }

    /// Explicit save requested by the user
    pub fn save_now(&mut self) -> bool {
        let saved = self.save();
        if saved {
            self.ui.toasts.push(Toast::success("Saved"));
        }
        saved
    }

    pub fn is_dirty(&self) -> bool {
        self.system.dirty
    }

    /// Periodic work driven by the main loop: autosave, favicon results,
    /// settings reload and toast expiry.
    pub fn tick(&mut self, now: Instant) {
        if let Some(interval) = self.settings.autosave_interval() {
            let due = now.saturating_duration_since(self.system.last_save) >= interval;
            // Live drag positions are not part of the document yet
            if due && self.canvas.input_state.is_idle() {
                debug!("Autosave");
                self.save();
            }
        }
        if let Some(favicons) = self.system.favicons.as_mut() {
            let resolved = favicons.poll();
            if resolved > 0 {
                debug!(resolved, "Favicons resolved");
            }
        }
        self.check_settings_reload();
        self.ui.toasts.remove_expired();
    }

    /// Final save before the process exits.
    pub fn shutdown(&mut self) {
        self.cancel_gesture();
        if self.save() {
            info!("Document saved on shutdown");
        }
    }

    // ==================== Settings & icons ====================

    /// Apply a pending settings file change, if any.
    pub fn check_settings_reload(&mut self) -> bool {
        let Some(watcher) = self.system.settings_watcher.as_mut() else {
            return false;
        };
        let Some(event) = watcher.poll() else {
            return false;
        };
        match event {
            SettingsEvent::Modified | SettingsEvent::Created => {
                info!("Settings file changed, reloading");
                let path = watcher.path().to_path_buf();
                self.settings = Settings::load_from(&path);
                self.ui.toasts.push(Toast::info("Settings reloaded"));
                true
            }
            SettingsEvent::Deleted => {
                warn!("Settings file deleted");
                self.ui.toasts.push(Toast::warning("Settings file deleted"));
                false
            }
            SettingsEvent::Error(e) => {
                error!("Settings watch error: {}", e);
                false
            }
        }
    }

    /// Queue favicon fetches for the URL pins of the active board.
    pub(crate) fn request_board_favicons(&mut self) {
        let Some(favicons) = self.system.favicons.as_mut() else {
            return;
        };
        for item in self.document.active_board().items() {
            if item.kind == PinKind::Url {
                favicons.request(&item.path);
            }
        }
    }
}
