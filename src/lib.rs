//! Pinboard - scene-editing core for an infinite canvas of pinned files,
//! folders, URLs and notes.
//!
//! The crate owns the document (boards of pins and groups), the reversible
//! command history, pointer gesture handling and selection. Rendering, the
//! window and the OS shell stay with the embedder, which drives a
//! [`app::Pinboard`] with pointer events and a periodic `tick`.

pub mod app;
pub mod background;
pub mod board;
pub mod constants;
pub mod document;
pub mod error;
pub mod history;
pub mod icons;
pub mod input;
pub mod launcher;
pub mod logging;
pub mod notifications;
pub mod perf;
pub mod prompt;
pub mod search;
pub mod selection;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod store;
pub mod types;

pub use app::Pinboard;
pub use board::Board;
pub use document::AppData;
pub use history::{Command, History};
