//! Application state - the Pinboard struct definition and sub-structs.

use crate::document::AppData;
use crate::history::History;
use crate::icons::FaviconService;
use crate::input::GestureState;
use crate::notifications::ToastManager;
use crate::search::SearchState;
use crate::selection::SelectionManager;
use crate::settings::Settings;
use crate::settings_watcher::SettingsWatcher;
use crate::store::DocumentStore;
use crate::types::PinId;
use std::time::Instant;

/// Canvas interaction state - selection, gesture, in-place editing
#[derive(Debug, Default)]
pub struct CanvasState {
    pub selection: SelectionManager,
    /// Gesture state machine
    pub input_state: GestureState,
    /// Note whose in-place editor is open
    pub editing_note: Option<PinId>,
}

/// UI state - search and status toasts
#[derive(Debug, Default)]
pub struct UiState {
    pub search: SearchState,
    pub toasts: ToastManager,
}

/// Collaborators and bookkeeping for saving
pub struct SystemState {
    pub store: Box<dyn DocumentStore>,
    pub favicons: Option<FaviconService>,
    /// Settings file watcher for hot-reload
    pub settings_watcher: Option<SettingsWatcher>,
    /// Last successful or attempted save, drives autosave
    pub last_save: Instant,
    /// Unsaved viewport changes (pan/zoom are not commands)
    pub dirty: bool,
}

/// The editing session: the document plus everything needed to manipulate
/// it interactively.
pub struct Pinboard {
    pub document: AppData,
    /// Undo/redo for the active board
    pub history: History,
    pub canvas: CanvasState,
    pub ui: UiState,
    pub settings: Settings,
    pub system: SystemState,
}
