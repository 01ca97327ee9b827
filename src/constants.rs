//! Application-wide constants.
//!
//! Centralizes magic numbers for the canvas, gestures and history so the
//! interaction code reads in terms of named limits.

// ============================================================================
// Pin Defaults
// ============================================================================

/// Smallest size a pin can be resized to (width, height)
pub const MIN_ITEM_SIZE: (f32, f32) = (100.0, 80.0);

/// Smallest size a group can be resized to (width, height)
pub const MIN_GROUP_SIZE: (f32, f32) = (150.0, 100.0);

/// Size used for a freshly added group
pub const DEFAULT_GROUP_SIZE: (f32, f32) = (300.0, 200.0);

/// Default pin color (opaque dark slate)
pub const DEFAULT_ITEM_COLOR: &str = "#FF2D2D30";

/// Default note color (opaque warm yellow)
pub const DEFAULT_NOTE_COLOR: &str = "#FFFFF3B0";

/// Default group fill (translucent blue)
pub const DEFAULT_GROUP_COLOR: &str = "#333A7BD5";

/// Label shown for notes without a name or text
pub const NOTE_LABEL: &str = "Note";

/// Name given to a new group
pub const DEFAULT_GROUP_NAME: &str = "Group";

/// Name given to a synthesized or new board
pub const DEFAULT_BOARD_NAME: &str = "My Board";

// ============================================================================
// Gestures
// ============================================================================

/// Pointer travel (screen units) before a press becomes a drag
pub const DRAG_THRESHOLD: f32 = 3.0;

/// Net displacement below which a finished drag records nothing
pub const MOVE_NOISE_FLOOR: f32 = 0.1;

/// A marquee must exceed this extent (screen units) on both axes to select
pub const MIN_MARQUEE_SIZE: f32 = 5.0;

/// Grid spacing used by snapping
pub const GRID_SIZE: f32 = 20.0;

/// Side of the square resize handle at an object's bottom-right corner (screen units)
pub const RESIZE_HANDLE_SIZE: f32 = 16.0;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f32 = 0.25;

/// Maximum zoom level
pub const MAX_ZOOM: f32 = 3.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Zoom change per wheel tick
pub const ZOOM_STEP: f32 = 0.1;

// ============================================================================
// History & Persistence
// ============================================================================

/// Maximum entries kept on each of the undo and redo stacks
pub const MAX_HISTORY_STATES: usize = 50;

/// Autosave period in seconds
pub const AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// File name of the primary document store
pub const DATA_FILE_NAME: &str = "pins.json";

/// Directory name used under the platform config/data dirs
pub const APP_DIR_NAME: &str = "pinboard";

// ============================================================================
// Background Work
// ============================================================================

/// Worker threads used for favicon fetching
pub const DEFAULT_BACKGROUND_WORKERS: usize = 2;

/// Timeout for a single favicon request in seconds
pub const FAVICON_TIMEOUT_SECS: u64 = 5;
