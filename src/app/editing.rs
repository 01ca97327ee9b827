//! Editing operations on the active board - adding and deleting objects,
//! property edits, opening pins, search, and backup import/export.
//!
//! Every structural change goes through [`Pinboard::execute`] so it lands in
//! the history and is saved.

use super::Pinboard;
use crate::constants::{DEFAULT_GROUP_NAME, GRID_SIZE};
use crate::document::AppData;
use crate::history::Command;
use crate::launcher::Launcher;
use crate::notifications::Toast;
use crate::prompt::PropertyPrompt;
use crate::search;
use crate::types::{
    GroupId, ObjectRef, PinGroup, PinId, PinItem, PinKind, Point, Property, snap_to_grid,
};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

impl Pinboard {
    fn place(&self, at: Point) -> Point {
        if self.settings.grid_snap {
            Point::new(snap_to_grid(at.x), snap_to_grid(at.y))
        } else {
            at
        }
    }

    // ==================== Adding ====================

    /// Pin a file, folder or URL at a board position. The kind is detected
    /// from the target. Returns `None` for a blank target.
    pub fn add_pin(&mut self, target: &str, at: Point) -> Option<PinId> {
        let target = target.trim();
        if target.is_empty() {
            return None;
        }
        let kind = PinKind::detect(target);
        let item = PinItem::new(kind, target, self.place(at));
        let id = item.id.clone();
        debug!(pin = %id, ?kind, "Adding pin");
        self.execute(Command::AddItem { item });
        self.canvas.selection.select_only(ObjectRef::Item(id.clone()));

        if kind == PinKind::Url {
            if let Some(favicons) = self.system.favicons.as_mut() {
                favicons.request(target);
            }
        }
        Some(id)
    }

    /// Pin dropped paths, cascading them down-right from the drop point.
    pub fn drop_paths(&mut self, paths: &[PathBuf], at: Point) -> Vec<PinId> {
        let ids: Vec<PinId> = paths
            .iter()
            .enumerate()
            .filter_map(|(i, path)| {
                let offset = i as f32 * GRID_SIZE;
                self.add_pin(&path.to_string_lossy(), Point::new(at.x + offset, at.y + offset))
            })
            .collect();
        if ids.len() > 1 {
            self.canvas.selection.clear();
            for id in &ids {
                self.canvas.selection.toggle_item(id);
            }
        }
        ids
    }

    /// Add an empty note and open its editor.
    pub fn add_note(&mut self, at: Point) -> PinId {
        let item = PinItem::note("", self.place(at));
        let id = item.id.clone();
        self.execute(Command::AddItem { item });
        self.canvas.selection.select_only(ObjectRef::Item(id.clone()));
        self.canvas.editing_note = Some(id.clone());
        id
    }

    pub fn add_group(&mut self, at: Point) -> GroupId {
        let group = PinGroup::new(DEFAULT_GROUP_NAME, self.place(at));
        let id = group.id.clone();
        self.execute(Command::AddGroup { group });
        self.canvas.selection.select_only(ObjectRef::Group(id.clone()));
        id
    }

    // ==================== Selection-wide ====================

    /// Delete every selected pin and group as one undo step.
    pub fn delete_selected(&mut self) -> bool {
        self.cancel_gesture();
        let board = self.document.active_board();
        let items = self.canvas.selection.ordered_items(board);
        let groups = self.canvas.selection.ordered_groups(board);
        let Some(cmd) = Command::delete_many(board, &items, &groups) else {
            return false;
        };
        self.execute(cmd);
        self.canvas.selection.clear();
        true
    }

    pub fn select_all(&mut self) {
        self.canvas.selection.select_all(self.document.active_board());
    }

    /// Escape cancels the innermost thing in progress: a gesture, then the
    /// note editor, then the search, then the selection.
    pub fn escape(&mut self) {
        if self.cancel_gesture() {
            return;
        }
        if self.canvas.editing_note.take().is_some() {
            return;
        }
        if self.ui.search.is_active() {
            self.ui.search.clear();
        } else {
            self.canvas.selection.clear();
        }
    }

    // ==================== Opening ====================

    /// Open a pin: notes toggle their in-place editor, everything else goes
    /// to the launcher. Launch failures become toasts.
    pub fn open_item(&mut self, id: &PinId, launcher: &dyn Launcher) -> bool {
        let Some(item) = self.document.active_board().item(id) else {
            return false;
        };
        if !item.kind.is_launchable() {
            self.toggle_note_editor(id);
            return true;
        }
        let target = item.path.clone();
        match launcher.open(&target) {
            Ok(()) => true,
            Err(e) => {
                warn!("Launch failed: {}", e);
                self.ui.toasts.push(Toast::error(format!("Could not open: {}", e)));
                false
            }
        }
    }

    pub fn toggle_note_editor(&mut self, id: &PinId) {
        if self.canvas.editing_note.as_ref() == Some(id) {
            self.canvas.editing_note = None;
        } else {
            self.canvas.editing_note = Some(id.clone());
        }
    }

    // ==================== Properties ====================

    /// Change one attribute through the history. Returns false when nothing
    /// changed.
    pub fn set_property(&mut self, target: ObjectRef, property: Property, value: &str) -> bool {
        let Some(cmd) =
            Command::change_property(self.document.active_board(), target, property, value)
        else {
            return false;
        };
        self.execute(cmd);
        true
    }

    fn prompt_property(
        &mut self,
        target: ObjectRef,
        property: Property,
        prompt: &mut dyn PropertyPrompt,
        title: &str,
        multiline: bool,
    ) -> bool {
        let board = self.document.active_board();
        let current = match &target {
            ObjectRef::Item(id) => board.item_property(id, property),
            ObjectRef::Group(id) => board.group_property(id, property),
        };
        let Some(current) = current else {
            return false;
        };
        let label = property.label();
        match prompt.prompt(title, label, &current, multiline) {
            Some(value) => self.set_property(target, property, &value),
            None => false,
        }
    }

    pub fn rename_item(&mut self, id: &PinId, prompt: &mut dyn PropertyPrompt) -> bool {
        self.prompt_property(ObjectRef::Item(id.clone()), Property::Name, prompt, "Rename", false)
    }

    pub fn edit_comment(&mut self, id: &PinId, prompt: &mut dyn PropertyPrompt) -> bool {
        self.prompt_property(
            ObjectRef::Item(id.clone()),
            Property::Comment,
            prompt,
            "Edit Comment",
            true,
        )
    }

    pub fn edit_note_text(&mut self, id: &PinId, prompt: &mut dyn PropertyPrompt) -> bool {
        self.prompt_property(
            ObjectRef::Item(id.clone()),
            Property::NoteText,
            prompt,
            "Edit Note",
            true,
        )
    }

    pub fn rename_group(&mut self, id: &GroupId, prompt: &mut dyn PropertyPrompt) -> bool {
        self.prompt_property(
            ObjectRef::Group(id.clone()),
            Property::Name,
            prompt,
            "Rename Group",
            false,
        )
    }

    /// Recolor a pin or group (`#AARRGGBB`).
    pub fn set_color(&mut self, target: ObjectRef, color: &str) -> bool {
        self.set_property(target, Property::Color, color)
    }

    /// Set or clear a pin's group back-reference. Unknown groups are refused.
    pub fn assign_to_group(&mut self, id: &PinId, group: Option<&GroupId>) -> bool {
        if let Some(group) = group {
            if !self.document.active_board().contains_group(group) {
                return false;
            }
        }
        let value = group.map(GroupId::as_str).unwrap_or_default();
        self.set_property(ObjectRef::Item(id.clone()), Property::Group, value)
    }

    // ==================== Search ====================

    pub fn set_search_query(&mut self, query: &str) {
        self.ui.search.set_query(query, self.document.active_board());
        if let Some(first) = self.ui.search.current().cloned() {
            self.canvas.selection.select_only(ObjectRef::Item(first));
        }
    }

    /// Move to the next match (wrapping) and select it.
    pub fn next_match(&mut self) -> Option<PinId> {
        let id = self.ui.search.next()?.clone();
        self.canvas.selection.select_only(ObjectRef::Item(id.clone()));
        Some(id)
    }

    pub fn clear_search(&mut self) {
        self.ui.search.clear();
    }

    /// Pins passing the current search filter, in board order
    pub fn visible_items(&self) -> Vec<&PinItem> {
        search::filter(self.document.active_board(), self.ui.search.query())
    }

    // ==================== Backup ====================

    pub fn export_to(&mut self, path: &Path) -> bool {
        match self.system.store.export(&self.document, path) {
            Ok(()) => {
                self.ui.toasts.push(Toast::success("Exported"));
                true
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.ui.toasts.push(Toast::error(format!("Export failed: {}", e)));
                false
            }
        }
    }

    /// Replace the whole document with a backup. History, selection and
    /// search are reset.
    pub fn import_from(&mut self, path: &Path) -> bool {
        let data: AppData = match self.system.store.import(path) {
            Ok(data) => data,
            Err(e) => {
                error!("Import failed: {}", e);
                self.ui.toasts.push(Toast::error(format!("Import failed: {}", e)));
                return false;
            }
        };
        info!(boards = data.boards().len(), "Replacing document from backup");
        self.cancel_gesture();
        self.document = data;
        self.reset_board_session();
        self.request_board_favicons();
        self.save();
        self.ui.toasts.push(Toast::success("Imported"));
        true
    }
}
