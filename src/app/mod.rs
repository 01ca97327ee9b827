//! Application module - the Pinboard editing session.
//!
//! This module is organized into several submodules:
//! - `state` - The Pinboard struct definition and sub-structs
//! - `lifecycle` - Construction, the commit pipeline, saving and ticking
//! - `board_management` - Board create/rename/delete/switch
//! - `editing` - Add/delete, property edits, open, search, backup
//!
//! Pointer handling lives in [`crate::input`] as further `impl Pinboard`
//! blocks.

mod board_management;
mod editing;
mod lifecycle;
mod state;

pub use state::{CanvasState, Pinboard, SystemState, UiState};
