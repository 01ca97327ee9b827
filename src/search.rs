//! Search and filter over the pins of a board.
//!
//! Matching is a case-insensitive substring test over the display name,
//! path, comment and note text. A blank query matches everything when
//! filtering, but produces no navigation results.

use crate::board::Board;
use crate::types::{PinId, PinItem};

/// Whether a pin matches a query. Blank queries match every pin.
pub fn matches(item: &PinItem, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        item.display_name().as_str(),
        item.path.as_str(),
        item.comment.as_str(),
        item.note_text.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Pins visible under a filter, in board order.
pub fn filter<'a>(board: &'a Board, query: &str) -> Vec<&'a PinItem> {
    board.items().iter().filter(|i| matches(i, query)).collect()
}

/// Query text plus the ordered list of matches and a cursor into it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    results: Vec<PinId>,
    index: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query and recompute results. The cursor resets to the
    /// first match.
    pub fn set_query(&mut self, query: impl Into<String>, board: &Board) {
        self.query = query.into();
        self.index = 0;
        self.refresh(board);
    }

    /// Recompute results against the current board, keeping the cursor when
    /// it is still in range.
    pub fn refresh(&mut self, board: &Board) {
        self.results = if self.query.trim().is_empty() {
            Vec::new()
        } else {
            board
                .items()
                .iter()
                .filter(|i| matches(i, &self.query))
                .map(|i| i.id.clone())
                .collect()
        };
        if self.index >= self.results.len() {
            self.index = 0;
        }
    }

    /// Advance to the next match, wrapping at the end. Returns the match now
    /// under the cursor.
    pub fn next(&mut self) -> Option<&PinId> {
        if self.results.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.results.len();
        self.results.get(self.index)
    }

    pub fn current(&self) -> Option<&PinId> {
        self.results.get(self.index)
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.index = 0;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[PinId] {
        &self.results
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }
}
