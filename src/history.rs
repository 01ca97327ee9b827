//! Undo/Redo command history.
//!
//! Every committed mutation of a board is a [`Command`] value that knows how
//! to `apply` and `revert` itself. Commands carry absolute old/new values, so
//! apply -> revert -> apply always lands on the same state.
//!
//! [`History`] keeps two bounded stacks. Executing a command clears the redo
//! stack (history is linear). Commands reference objects by id on one board,
//! so the history is cleared whenever the active board changes.

use crate::board::Board;
use crate::constants::MAX_HISTORY_STATES;
use crate::error::SceneResult;
use crate::types::{
    GroupId, ObjectRef, PinGroup, PinId, PinItem, Point, Property, clamp_group_size,
    clamp_item_size, now_secs,
};
use std::collections::VecDeque;
use tracing::trace;

/// One pin's displacement inside a multi-move.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemMove {
    pub id: PinId,
    pub from: Point,
    pub to: Point,
}

/// A reversible mutation of a board.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    MoveItem {
        id: PinId,
        from: Point,
        to: Point,
    },
    /// Moves several pins as one undo step
    MoveItems { moves: Vec<ItemMove> },
    MoveGroup {
        id: GroupId,
        from: Point,
        to: Point,
    },
    /// Pin or group resize; `from` is the stored size, which may be the
    /// (0, 0) "use default" state for pins
    Resize {
        target: ObjectRef,
        from: (f32, f32),
        to: (f32, f32),
    },
    AddItem { item: PinItem },
    DeleteItem { index: usize, item: PinItem },
    AddGroup { group: PinGroup },
    /// `members` are the pins whose back-reference is cleared with the group
    DeleteGroup {
        index: usize,
        group: PinGroup,
        members: Vec<PinId>,
    },
    /// Heterogeneous batch delete as one undo step
    DeleteMultiple {
        items: Vec<(usize, PinItem)>,
        groups: Vec<(usize, PinGroup)>,
        members: Vec<(PinId, GroupId)>,
    },
    ChangeProperty {
        target: ObjectRef,
        property: Property,
        old: String,
        new: String,
        /// Pin `updated_at` before and after the edit
        stamps: (u64, u64),
    },
}

/// Commands never fail; a missing target turns the step into a no-op.
fn guarded<T>(result: SceneResult<T>) {
    if let Err(e) = result {
        trace!("Skipping command step: {}", e);
    }
}

impl Command {
    // ==================== Constructors ====================

    /// Delete one pin, capturing everything needed to restore it.
    pub fn delete_item(board: &Board, id: &PinId) -> Option<Self> {
        let index = board.item_index_of(id)?;
        Some(Command::DeleteItem {
            index,
            item: board.items()[index].clone(),
        })
    }

    /// Delete one group. Member pins stay put but lose their back-reference.
    pub fn delete_group(board: &Board, id: &GroupId) -> Option<Self> {
        let index = board.group_index_of(id)?;
        Some(Command::DeleteGroup {
            index,
            group: board.groups()[index].clone(),
            members: board.members_of(id),
        })
    }

    /// Delete a mixed set of pins and groups. Returns the single-object
    /// variant when only one object is involved, `None` when nothing exists.
    pub fn delete_many(board: &Board, items: &[PinId], groups: &[GroupId]) -> Option<Self> {
        let mut item_entries: Vec<(usize, PinItem)> = items
            .iter()
            .filter_map(|id| board.item_index_of(id).map(|i| (i, board.items()[i].clone())))
            .collect();
        let mut group_entries: Vec<(usize, PinGroup)> = groups
            .iter()
            .filter_map(|id| board.group_index_of(id).map(|i| (i, board.groups()[i].clone())))
            .collect();
        item_entries.sort_by_key(|(i, _)| *i);
        item_entries.dedup_by(|a, b| a.0 == b.0);
        group_entries.sort_by_key(|(i, _)| *i);
        group_entries.dedup_by(|a, b| a.0 == b.0);

        match (item_entries.len(), group_entries.len()) {
            (0, 0) => None,
            (1, 0) => {
                let (index, item) = item_entries.remove(0);
                Some(Command::DeleteItem { index, item })
            }
            (0, 1) => Command::delete_group(board, &group_entries[0].1.id),
            _ => {
                let members = group_entries
                    .iter()
                    .flat_map(|(_, g)| {
                        board
                            .members_of(&g.id)
                            .into_iter()
                            .filter(|m| !item_entries.iter().any(|(_, i)| &i.id == m))
                            .map(|m| (m, g.id.clone()))
                            .collect::<Vec<_>>()
                    })
                    .collect();
                Some(Command::DeleteMultiple {
                    items: item_entries,
                    groups: group_entries,
                    members,
                })
            }
        }
    }

    /// Change an editable attribute. `None` when the target is missing or
    /// the value would not change.
    pub fn change_property(
        board: &Board,
        target: ObjectRef,
        property: Property,
        new: impl Into<String>,
    ) -> Option<Self> {
        let new = new.into();
        let (old, old_stamp) = match &target {
            ObjectRef::Item(id) => (
                board.item_property(id, property)?,
                board.item(id)?.updated_at,
            ),
            ObjectRef::Group(id) => (board.group_property(id, property)?, 0),
        };
        if old == new {
            return None;
        }
        let new_stamp = match target {
            ObjectRef::Item(_) => now_secs().max(old_stamp),
            ObjectRef::Group(_) => 0,
        };
        Some(Command::ChangeProperty {
            target,
            property,
            old,
            new,
            stamps: (old_stamp, new_stamp),
        })
    }

    /// Resize to a requested size, clamped to the target's floor.
    pub fn resize(board: &Board, target: ObjectRef, to: (f32, f32)) -> Option<Self> {
        let (from, to) = match &target {
            ObjectRef::Item(id) => {
                let item = board.item(id)?;
                ((item.width, item.height), clamp_item_size(to))
            }
            ObjectRef::Group(id) => {
                let group = board.group(id)?;
                ((group.width, group.height), clamp_group_size(to))
            }
        };
        if from == to {
            return None;
        }
        Some(Command::Resize { target, from, to })
    }

    // ==================== Replay ====================

    pub fn apply(&self, board: &mut Board) {
        match self {
            Command::MoveItem { id, to, .. } => guarded(board.move_item(id, *to)),
            Command::MoveItems { moves } => {
                for m in moves {
                    guarded(board.move_item(&m.id, m.to));
                }
            }
            Command::MoveGroup { id, to, .. } => guarded(board.move_group(id, *to)),
            Command::Resize { target, to, .. } => match target {
                ObjectRef::Item(id) => guarded(board.resize_item(id, *to)),
                ObjectRef::Group(id) => guarded(board.resize_group(id, *to)),
            },
            Command::AddItem { item } => guarded(board.add_item(item.clone())),
            Command::DeleteItem { item, .. } => guarded(board.remove_item(&item.id)),
            Command::AddGroup { group } => guarded(board.add_group(group.clone())),
            Command::DeleteGroup { group, members, .. } => {
                guarded(board.remove_group(&group.id));
                for member in members {
                    guarded(board.set_item_property(member, Property::Group, None));
                }
            }
            Command::DeleteMultiple {
                items,
                groups,
                members,
            } => {
                for (_, group) in groups {
                    guarded(board.remove_group(&group.id));
                }
                for (member, _) in members {
                    guarded(board.set_item_property(member, Property::Group, None));
                }
                for (_, item) in items {
                    guarded(board.remove_item(&item.id));
                }
            }
            Command::ChangeProperty {
                target,
                property,
                new,
                stamps,
                ..
            } => set_property(board, target, *property, new, stamps.1),
        }
    }

    pub fn revert(&self, board: &mut Board) {
        match self {
            Command::MoveItem { id, from, .. } => guarded(board.move_item(id, *from)),
            Command::MoveItems { moves } => {
                for m in moves {
                    guarded(board.move_item(&m.id, m.from));
                }
            }
            Command::MoveGroup { id, from, .. } => guarded(board.move_group(id, *from)),
            Command::Resize { target, from, .. } => match target {
                ObjectRef::Item(id) => guarded(board.set_item_size(id, *from)),
                ObjectRef::Group(id) => guarded(board.set_group_size(id, *from)),
            },
            Command::AddItem { item } => guarded(board.remove_item(&item.id)),
            Command::DeleteItem { index, item } => guarded(board.insert_item(*index, item.clone())),
            Command::AddGroup { group } => guarded(board.remove_group(&group.id)),
            Command::DeleteGroup {
                index,
                group,
                members,
            } => {
                guarded(board.insert_group(*index, group.clone()));
                for member in members {
                    guarded(board.set_item_property(member, Property::Group, Some(group.id.as_str())));
                }
            }
            Command::DeleteMultiple {
                items,
                groups,
                members,
            } => {
                // Ascending indexes put every object back at its old slot
                for (index, item) in items {
                    guarded(board.insert_item(*index, item.clone()));
                }
                for (index, group) in groups {
                    guarded(board.insert_group(*index, group.clone()));
                }
                for (member, group_id) in members {
                    guarded(board.set_item_property(member, Property::Group, Some(group_id.as_str())));
                }
            }
            Command::ChangeProperty {
                target,
                property,
                old,
                stamps,
                ..
            } => set_property(board, target, *property, old, stamps.0),
        }
    }

    /// Human-readable label for menus and tooltips
    pub fn description(&self) -> String {
        match self {
            Command::MoveItem { .. } => "Move pin".to_string(),
            Command::MoveItems { moves } => format!("Move {} pins", moves.len()),
            Command::MoveGroup { .. } => "Move group".to_string(),
            Command::Resize {
                target: ObjectRef::Item(_),
                ..
            } => "Resize pin".to_string(),
            Command::Resize {
                target: ObjectRef::Group(_),
                ..
            } => "Resize group".to_string(),
            Command::AddItem { item } => format!("Add {}", item.display_name()),
            Command::DeleteItem { item, .. } => format!("Delete {}", item.display_name()),
            Command::AddGroup { group } => format!("Add group {}", group.name),
            Command::DeleteGroup { group, .. } => format!("Delete group {}", group.name),
            Command::DeleteMultiple { items, groups, .. } => {
                format!("Delete {} objects", items.len() + groups.len())
            }
            Command::ChangeProperty {
                target, property, ..
            } => match target {
                ObjectRef::Item(_) => format!("Change pin {}", property.label()),
                ObjectRef::Group(_) => format!("Change group {}", property.label()),
            },
        }
    }
}

fn set_property(board: &mut Board, target: &ObjectRef, property: Property, value: &str, stamp: u64) {
    match target {
        ObjectRef::Item(id) => {
            guarded(board.set_item_property(id, property, Some(value)));
            guarded(board.set_item_updated_at(id, stamp));
        }
        ObjectRef::Group(id) => guarded(board.set_group_property(id, property, Some(value))),
    }
}

/// Snapshot handed to history listeners after every effective change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_description: Option<String>,
    pub redo_description: Option<String>,
}

type Listener = Box<dyn FnMut(&HistoryStatus)>;

/// Bounded, linear undo/redo history.
pub struct History {
    undo_stack: VecDeque<Command>,
    redo_stack: VecDeque<Command>,
    max_depth: usize,
    listener: Option<Listener>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY_STATES)
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth),
            redo_stack: VecDeque::new(),
            max_depth,
            listener: None,
        }
    }

    /// Register the callback fired after execute/undo/redo/clear.
    pub fn on_change(&mut self, listener: impl FnMut(&HistoryStatus) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    fn push_bounded(stack: &mut VecDeque<Command>, cmd: Command, max_depth: usize) {
        stack.push_back(cmd);
        while stack.len() > max_depth {
            stack.pop_front();
        }
    }

    fn notify(&mut self) {
        let status = self.status();
        if let Some(listener) = self.listener.as_mut() {
            listener(&status);
        }
    }

    /// Apply a command and record it. Clears the redo stack.
    pub fn execute(&mut self, cmd: Command, board: &mut Board) {
        trace!(command = %cmd.description(), "Execute");
        cmd.apply(board);
        Self::push_bounded(&mut self.undo_stack, cmd, self.max_depth);
        self.redo_stack.clear();
        self.notify();
    }

    /// Revert the newest command. Returns its description, or `None` when
    /// there was nothing to undo.
    pub fn undo(&mut self, board: &mut Board) -> Option<String> {
        let cmd = self.undo_stack.pop_back()?;
        cmd.revert(board);
        let description = cmd.description();
        Self::push_bounded(&mut self.redo_stack, cmd, self.max_depth);
        self.notify();
        Some(description)
    }

    /// Re-apply the newest undone command.
    pub fn redo(&mut self, board: &mut Board) -> Option<String> {
        let cmd = self.redo_stack.pop_back()?;
        cmd.apply(board);
        let description = cmd.description();
        Self::push_bounded(&mut self.undo_stack, cmd, self.max_depth);
        self.notify();
        Some(description)
    }

    /// Drop both stacks (board switch, document reload).
    pub fn clear(&mut self) {
        if self.undo_stack.is_empty() && self.redo_stack.is_empty() {
            return;
        }
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.notify();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_description: self.undo_stack.back().map(Command::description),
            redo_description: self.redo_stack.back().map(Command::description),
        }
    }
}
