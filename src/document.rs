//! The persisted document: an ordered list of boards plus the active one.
//!
//! [`AppData`] keeps two invariants at all times: the board list is never
//! empty, and `active_board_id` always names a member of it.

use crate::board::Board;
use crate::constants::DEFAULT_BOARD_NAME;
use crate::error::{SceneError, SceneResult};
use crate::types::BoardId;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Raw serialized document, before invariants are restored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppDataState {
    boards: Vec<Board>,
    active_board_id: BoardId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "AppDataState")]
pub struct AppData {
    boards: Vec<Board>,
    active_board_id: BoardId,
}

impl From<AppDataState> for AppData {
    fn from(state: AppDataState) -> Self {
        let mut data = Self {
            boards: state.boards,
            active_board_id: state.active_board_id,
        };
        data.ensure_valid();
        data
    }
}

impl Default for AppData {
    fn default() -> Self {
        Self::with_board(Board::new(DEFAULT_BOARD_NAME))
    }
}

impl AppData {
    pub fn with_board(board: Board) -> Self {
        Self {
            active_board_id: board.id.clone(),
            boards: vec![board],
        }
    }

    /// Restore the document invariants after loading or removal.
    pub fn ensure_valid(&mut self) {
        if self.boards.is_empty() {
            warn!("Document has no boards, synthesizing a default board");
            self.boards.push(Board::new(DEFAULT_BOARD_NAME));
        }
        if !self.boards.iter().any(|b| b.id == self.active_board_id) {
            debug!(active = %self.active_board_id, "Active board missing, falling back to first board");
            self.active_board_id = self.boards[0].id.clone();
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| &b.id == id)
    }

    pub fn board_mut(&mut self, id: &BoardId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|b| &b.id == id)
    }

    pub fn active_board_id(&self) -> &BoardId {
        &self.active_board_id
    }

    fn active_index(&self) -> usize {
        self.boards
            .iter()
            .position(|b| b.id == self.active_board_id)
            .unwrap_or(0)
    }

    pub fn active_board(&self) -> &Board {
        &self.boards[self.active_index()]
    }

    pub fn active_board_mut(&mut self) -> &mut Board {
        let index = self.active_index();
        &mut self.boards[index]
    }

    pub fn set_active(&mut self, id: &BoardId) -> SceneResult<()> {
        if self.board(id).is_none() {
            return Err(SceneError::BoardNotFound(id.to_string()));
        }
        self.active_board_id = id.clone();
        Ok(())
    }

    /// Append a new, empty board and return its id. The active board is
    /// unchanged.
    pub fn add_board(&mut self, name: impl Into<String>) -> BoardId {
        let board = Board::new(name);
        let id = board.id.clone();
        self.boards.push(board);
        id
    }

    pub fn rename_board(&mut self, id: &BoardId, name: impl Into<String>) -> SceneResult<()> {
        let board = self
            .board_mut(id)
            .ok_or_else(|| SceneError::BoardNotFound(id.to_string()))?;
        board.name = name.into();
        board.touch();
        Ok(())
    }

    /// Remove a board. Removing the active board activates its neighbour;
    /// removing the last board leaves a fresh default board behind.
    pub fn remove_board(&mut self, id: &BoardId) -> SceneResult<Board> {
        let index = self
            .boards
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| SceneError::BoardNotFound(id.to_string()))?;
        let removed = self.boards.remove(index);
        if &self.active_board_id == id {
            if let Some(next) = self.boards.get(index.min(self.boards.len().saturating_sub(1))) {
                self.active_board_id = next.id.clone();
            }
        }
        self.ensure_valid();
        Ok(removed)
    }

    /// Total number of pins across all boards
    pub fn item_count(&self) -> usize {
        self.boards.iter().map(|b| b.items().len()).sum()
    }
}
