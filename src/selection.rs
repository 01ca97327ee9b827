//! Selection Manager - which pins and groups are currently selected.
//!
//! Selection is UI state, never persisted and never recorded in history.
//! It may only reference objects present on the active board; callers prune
//! it with [`SelectionManager::retain_existing`] after structural changes.

use crate::board::Board;
use crate::types::{GroupId, ObjectRef, PinId};
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionManager {
    items: HashSet<PinId>,
    groups: HashSet<GroupId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Click semantics ====================

    /// Pointer press on a pin.
    ///
    /// Additive: toggle membership. Otherwise an unselected pin becomes the
    /// only selection, while a selected pin leaves everything untouched so a
    /// multi-selection can be dragged.
    pub fn click_item(&mut self, id: &PinId, additive: bool) {
        if additive {
            self.toggle_item(id);
        } else if !self.items.contains(id) {
            self.select_only(ObjectRef::Item(id.clone()));
        }
    }

    /// Pointer press on a group, same rules as [`Self::click_item`].
    pub fn click_group(&mut self, id: &GroupId, additive: bool) {
        if additive {
            self.toggle_group(id);
        } else if !self.groups.contains(id) {
            self.select_only(ObjectRef::Group(id.clone()));
        }
    }

    pub fn toggle_item(&mut self, id: &PinId) {
        if !self.items.remove(id) {
            self.items.insert(id.clone());
        }
    }

    pub fn toggle_group(&mut self, id: &GroupId) {
        if !self.groups.remove(id) {
            self.groups.insert(id.clone());
        }
    }

    /// Replace the whole selection with one object.
    pub fn select_only(&mut self, object: ObjectRef) {
        self.clear();
        match object {
            ObjectRef::Item(id) => {
                self.items.insert(id);
            }
            ObjectRef::Group(id) => {
                self.groups.insert(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.groups.clear();
    }

    /// Select every pin and group on the board.
    pub fn select_all(&mut self, board: &Board) {
        self.items = board.items().iter().map(|i| i.id.clone()).collect();
        self.groups = board.groups().iter().map(|g| g.id.clone()).collect();
    }

    /// Apply the result of a marquee: replace, or union when additive.
    pub fn apply_marquee(&mut self, items: Vec<PinId>, groups: Vec<GroupId>, additive: bool) {
        if !additive {
            self.clear();
        }
        self.items.extend(items);
        self.groups.extend(groups);
    }

    /// Drop ids that no longer exist on the board.
    pub fn retain_existing(&mut self, board: &Board) {
        self.items.retain(|id| board.contains_item(id));
        self.groups.retain(|id| board.contains_group(id));
    }

    // ==================== Queries ====================

    pub fn is_item_selected(&self, id: &PinId) -> bool {
        self.items.contains(id)
    }

    pub fn is_group_selected(&self, id: &GroupId) -> bool {
        self.groups.contains(id)
    }

    pub fn items(&self) -> &HashSet<PinId> {
        &self.items
    }

    pub fn groups(&self) -> &HashSet<GroupId> {
        &self.groups
    }

    /// Selected pins in board order
    pub fn ordered_items(&self, board: &Board) -> Vec<PinId> {
        board
            .items()
            .iter()
            .filter(|i| self.items.contains(&i.id))
            .map(|i| i.id.clone())
            .collect()
    }

    /// Selected groups in board order
    pub fn ordered_groups(&self, board: &Board) -> Vec<GroupId> {
        board
            .groups()
            .iter()
            .filter(|g| self.groups.contains(&g.id))
            .map(|g| g.id.clone())
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len() + self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.groups.is_empty()
    }

    /// The single selected pin, if exactly one object is selected and it is a pin
    pub fn single_item(&self) -> Option<&PinId> {
        if self.groups.is_empty() && self.items.len() == 1 {
            self.items.iter().next()
        } else {
            None
        }
    }

    pub fn single_group(&self) -> Option<&GroupId> {
        if self.items.is_empty() && self.groups.len() == 1 {
            self.groups.iter().next()
        } else {
            None
        }
    }
}
