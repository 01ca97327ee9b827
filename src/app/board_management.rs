//! Board management - create, rename, delete and switch boards.
//!
//! Board operations are not undoable. Commands address objects by id on one
//! board, so every change of the active board resets the history together
//! with selection, search and any gesture.

use super::Pinboard;
use crate::constants::DEFAULT_BOARD_NAME;
use crate::error::{SceneError, SceneResult};
use crate::notifications::Toast;
use crate::prompt::PropertyPrompt;
use crate::types::BoardId;
use tracing::{info, warn};

fn board_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_BOARD_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

impl Pinboard {
    /// Create a board and make it active.
    pub fn create_board(&mut self, name: &str) -> BoardId {
        let id = self.document.add_board(board_name(name));
        info!(board = %id, "Created board");
        if let Err(e) = self.switch_board(&id) {
            warn!("New board could not be activated: {}", e);
        }
        id
    }

    /// Make another board active. Switching to the active board is a no-op.
    pub fn switch_board(&mut self, id: &BoardId) -> SceneResult<()> {
        if self.document.active_board_id() == id {
            return Ok(());
        }
        if self.document.board(id).is_none() {
            return Err(SceneError::BoardNotFound(id.to_string()));
        }
        self.cancel_gesture();
        self.document.set_active(id)?;
        self.reset_board_session();
        info!(board = %id, "Switched board");
        self.request_board_favicons();
        self.save();
        Ok(())
    }

    pub fn rename_board(&mut self, id: &BoardId, name: &str) -> SceneResult<()> {
        self.document.rename_board(id, board_name(name))?;
        self.save();
        Ok(())
    }

    /// Rename the active board through a prompt.
    pub fn rename_active_board_with(&mut self, prompt: &mut dyn PropertyPrompt) -> bool {
        let board = self.document.active_board();
        let id = board.id.clone();
        let Some(name) = prompt.prompt("Rename Board", "Name", &board.name, false) else {
            return false;
        };
        self.rename_board(&id, &name).is_ok()
    }

    /// Delete a board. Deleting the last board leaves a fresh default one.
    pub fn delete_board(&mut self, id: &BoardId) -> SceneResult<()> {
        let was_active = self.document.active_board_id() == id;
        if was_active {
            self.cancel_gesture();
        }
        let removed = self.document.remove_board(id)?;
        if was_active {
            self.reset_board_session();
            self.request_board_favicons();
        }
        info!(board = %id, "Deleted board");
        self.ui
            .toasts
            .push(Toast::info(format!("Deleted board \"{}\"", removed.name)));
        self.save();
        Ok(())
    }
}
