//! Pointer input for the canvas.
//!
//! Raw pointer events become gestures through an explicit state machine
//! ([`GestureState`]). A gesture begins on press, updates on move, and on
//! release becomes at most one command in the history. Cancelling restores
//! the press-time state and records nothing.
//!
//! ## Modules
//!
//! - `state` - Gesture enum and pointer event types
//! - `mouse_down` - Press handling (hit testing, selection, gesture start)
//! - `drag` - Move handling (live drag, resize, marquee, pan)
//! - `mouse_up` - Release handling (commit as a command)
//! - `transform` - Wheel zoom and gesture cancellation
//! - `coords` - Screen/board coordinate conversion

pub mod coords;
mod drag;
mod mouse_down;
mod mouse_up;
mod state;
mod transform;

pub use coords::CoordinateContext;
pub use state::{GestureState, Modifiers, PointerButton, PointerEvent, PointerOutcome};
pub use transform::{step_zoom, zoom_viewport_at};
