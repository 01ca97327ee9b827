//! Board - one independent canvas holding pins, groups and its viewport.
//!
//! All mutation goes through methods on [`Board`] so the R-tree indexes used
//! for hit testing stay in sync with the entity lists. The board knows
//! nothing about undo; commands in [`crate::history`] replay against it.

use crate::constants::{DEFAULT_BOARD_NAME, DEFAULT_ZOOM};
use crate::error::{SceneError, SceneResult};
use crate::spatial_index::SpatialIndex;
use crate::types::{
    BoardId, GroupId, PinGroup, PinId, PinItem, Point, Property, Rect, clamp_group_size,
    clamp_item_size, now_secs,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Zoom and pan of a board, persisted with it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.pan_x = pan.x;
        self.pan_y = pan.y;
    }
}

/// Serialized form of a board. Every field defaults so older or partial
/// documents still load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardState {
    pub id: BoardId,
    pub name: String,
    pub items: Vec<PinItem>,
    pub groups: Vec<PinGroup>,
    pub viewport: Viewport,
    pub created_at: u64,
    pub updated_at: u64,
}

/// A canvas of pins and groups.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "BoardState")]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    items: Vec<PinItem>,
    groups: Vec<PinGroup>,
    pub viewport: Viewport,
    pub created_at: u64,
    pub updated_at: u64,
    #[serde(skip)]
    item_index: SpatialIndex<PinId>,
    #[serde(skip)]
    group_index: SpatialIndex<GroupId>,
}

impl From<BoardState> for Board {
    fn from(state: BoardState) -> Self {
        let id = if state.id.is_empty() { BoardId::new() } else { state.id };

        // Drop objects whose id is missing or repeated; the first one wins.
        let mut seen = HashSet::new();
        let items: Vec<PinItem> = state
            .items
            .into_iter()
            .filter(|item| {
                let keep = !item.id.is_empty() && seen.insert(item.id.clone());
                if !keep {
                    warn!(board = %id, item = %item.id, "Dropping pin with missing or duplicate id");
                }
                keep
            })
            .collect();
        let mut seen = HashSet::new();
        let groups: Vec<PinGroup> = state
            .groups
            .into_iter()
            .filter(|group| {
                let keep = !group.id.is_empty() && seen.insert(group.id.clone());
                if !keep {
                    warn!(board = %id, group = %group.id, "Dropping group with missing or duplicate id");
                }
                keep
            })
            .collect();

        let mut board = Self {
            id,
            name: if state.name.trim().is_empty() {
                DEFAULT_BOARD_NAME.to_string()
            } else {
                state.name
            },
            items,
            groups,
            viewport: state.viewport,
            created_at: state.created_at,
            updated_at: state.updated_at,
            item_index: SpatialIndex::new(),
            group_index: SpatialIndex::new(),
        };
        board.rebuild_indexes();
        board
    }
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        let now = now_secs();
        Self {
            id: BoardId::new(),
            name: name.into(),
            items: Vec::new(),
            groups: Vec::new(),
            viewport: Viewport::default(),
            created_at: now,
            updated_at: now,
            item_index: SpatialIndex::new(),
            group_index: SpatialIndex::new(),
        }
    }

    /// Snapshot of the persisted fields
    pub fn to_state(&self) -> BoardState {
        BoardState {
            id: self.id.clone(),
            name: self.name.clone(),
            items: self.items.clone(),
            groups: self.groups.clone(),
            viewport: self.viewport,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = now_secs();
    }

    fn rebuild_indexes(&mut self) {
        self.item_index
            .rebuild(self.items.iter().map(|i| (i.id.clone(), i.bounds())));
        self.group_index
            .rebuild(self.groups.iter().map(|g| (g.id.clone(), g.bounds())));
    }

    fn reindex_item(&mut self, id: &PinId) {
        if let Some(bounds) = self.item(id).map(PinItem::bounds) {
            self.item_index.insert(id.clone(), bounds);
        }
    }

    fn reindex_group(&mut self, id: &GroupId) {
        if let Some(bounds) = self.group(id).map(PinGroup::bounds) {
            self.group_index.insert(id.clone(), bounds);
        }
    }

    // ==================== Pins ====================

    /// Pins in insertion order (back to front)
    pub fn items(&self) -> &[PinItem] {
        &self.items
    }

    pub fn item(&self, id: &PinId) -> Option<&PinItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn item_index_of(&self, id: &PinId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    pub fn contains_item(&self, id: &PinId) -> bool {
        self.item_index_of(id).is_some()
    }

    /// Append a pin on top of the stack.
    pub fn add_item(&mut self, item: PinItem) -> SceneResult<()> {
        let index = self.items.len();
        self.insert_item(index, item)
    }

    /// Insert a pin at a stacking position (clamped to the list length).
    pub fn insert_item(&mut self, index: usize, item: PinItem) -> SceneResult<()> {
        if self.contains_item(&item.id) {
            return Err(SceneError::DuplicateId(item.id.to_string()));
        }
        self.item_index.insert(item.id.clone(), item.bounds());
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        Ok(())
    }

    /// Remove a pin, returning its former stacking position and value.
    pub fn remove_item(&mut self, id: &PinId) -> SceneResult<(usize, PinItem)> {
        let index = self
            .item_index_of(id)
            .ok_or_else(|| SceneError::ItemNotFound(id.to_string()))?;
        self.item_index.remove(id);
        Ok((index, self.items.remove(index)))
    }

    fn item_mut(&mut self, id: &PinId) -> SceneResult<&mut PinItem> {
        self.items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| SceneError::ItemNotFound(id.to_string()))
    }

    pub fn move_item(&mut self, id: &PinId, position: Point) -> SceneResult<()> {
        let item = self.item_mut(id)?;
        item.x = position.x;
        item.y = position.y;
        self.reindex_item(id);
        Ok(())
    }

    /// Resize a pin, clamping to the minimum floor. Returns the applied size.
    pub fn resize_item(&mut self, id: &PinId, size: (f32, f32)) -> SceneResult<(f32, f32)> {
        let size = clamp_item_size(size);
        self.set_item_size(id, size)?;
        Ok(size)
    }

    /// Store a pin size verbatim, including the (0, 0) "use default" state.
    pub fn set_item_size(&mut self, id: &PinId, size: (f32, f32)) -> SceneResult<()> {
        let item = self.item_mut(id)?;
        item.width = size.0;
        item.height = size.1;
        self.reindex_item(id);
        Ok(())
    }

    pub fn set_item_updated_at(&mut self, id: &PinId, stamp: u64) -> SceneResult<()> {
        self.item_mut(id)?.updated_at = stamp;
        Ok(())
    }

    /// Current value of an editable pin attribute
    pub fn item_property(&self, id: &PinId, property: Property) -> Option<String> {
        let item = self.item(id)?;
        Some(match property {
            Property::Name => item.name.clone(),
            Property::Comment => item.comment.clone(),
            Property::Color => item.color.clone(),
            Property::NoteText => item.note_text.clone(),
            Property::Group => item
                .group_id
                .as_ref()
                .map(|g| g.to_string())
                .unwrap_or_default(),
        })
    }

    /// Set an editable pin attribute. `None` is stored as an empty string.
    pub fn set_item_property(
        &mut self,
        id: &PinId,
        property: Property,
        value: Option<&str>,
    ) -> SceneResult<()> {
        let value = value.unwrap_or_default().to_string();
        let item = self.item_mut(id)?;
        match property {
            Property::Name => item.name = value,
            Property::Comment => item.comment = value,
            Property::Color => item.color = value,
            Property::NoteText => item.note_text = value,
            Property::Group => {
                item.group_id = if value.is_empty() {
                    None
                } else {
                    Some(GroupId::from(value))
                }
            }
        }
        Ok(())
    }

    /// Topmost pin under a board-space point.
    pub fn item_at(&self, p: Point) -> Option<PinId> {
        let candidates: HashSet<PinId> = self.item_index.query_point(p).into_iter().collect();
        self.items
            .iter()
            .rev()
            .find(|i| candidates.contains(&i.id))
            .map(|i| i.id.clone())
    }

    /// Pins intersecting a board-space rectangle, in board order.
    pub fn items_in_rect(&self, rect: &Rect) -> Vec<PinId> {
        let hits: HashSet<PinId> = self.item_index.query_rect(rect).into_iter().collect();
        self.items
            .iter()
            .filter(|i| hits.contains(&i.id))
            .map(|i| i.id.clone())
            .collect()
    }

    /// Pins whose back-reference points at `group_id`
    pub fn members_of(&self, group_id: &GroupId) -> Vec<PinId> {
        self.items
            .iter()
            .filter(|i| i.group_id.as_ref() == Some(group_id))
            .map(|i| i.id.clone())
            .collect()
    }

    // ==================== Groups ====================

    pub fn groups(&self) -> &[PinGroup] {
        &self.groups
    }

    pub fn group(&self, id: &GroupId) -> Option<&PinGroup> {
        self.groups.iter().find(|g| &g.id == id)
    }

    pub fn group_index_of(&self, id: &GroupId) -> Option<usize> {
        self.groups.iter().position(|g| &g.id == id)
    }

    pub fn contains_group(&self, id: &GroupId) -> bool {
        self.group_index_of(id).is_some()
    }

    pub fn add_group(&mut self, group: PinGroup) -> SceneResult<()> {
        let index = self.groups.len();
        self.insert_group(index, group)
    }

    pub fn insert_group(&mut self, index: usize, group: PinGroup) -> SceneResult<()> {
        if self.contains_group(&group.id) {
            return Err(SceneError::DuplicateId(group.id.to_string()));
        }
        self.group_index.insert(group.id.clone(), group.bounds());
        let index = index.min(self.groups.len());
        self.groups.insert(index, group);
        Ok(())
    }

    /// Remove a group. Member pins are left in place; their back-references
    /// are the caller's concern.
    pub fn remove_group(&mut self, id: &GroupId) -> SceneResult<(usize, PinGroup)> {
        let index = self
            .group_index_of(id)
            .ok_or_else(|| SceneError::GroupNotFound(id.to_string()))?;
        self.group_index.remove(id);
        Ok((index, self.groups.remove(index)))
    }

    fn group_mut(&mut self, id: &GroupId) -> SceneResult<&mut PinGroup> {
        self.groups
            .iter_mut()
            .find(|g| &g.id == id)
            .ok_or_else(|| SceneError::GroupNotFound(id.to_string()))
    }

    /// Move a group. Members do not follow.
    pub fn move_group(&mut self, id: &GroupId, position: Point) -> SceneResult<()> {
        let group = self.group_mut(id)?;
        group.x = position.x;
        group.y = position.y;
        self.reindex_group(id);
        Ok(())
    }

    pub fn resize_group(&mut self, id: &GroupId, size: (f32, f32)) -> SceneResult<(f32, f32)> {
        let size = clamp_group_size(size);
        self.set_group_size(id, size)?;
        Ok(size)
    }

    pub fn set_group_size(&mut self, id: &GroupId, size: (f32, f32)) -> SceneResult<()> {
        let group = self.group_mut(id)?;
        group.width = size.0;
        group.height = size.1;
        self.reindex_group(id);
        Ok(())
    }

    pub fn group_property(&self, id: &GroupId, property: Property) -> Option<String> {
        let group = self.group(id)?;
        match property {
            Property::Name => Some(group.name.clone()),
            Property::Color => Some(group.color.clone()),
            _ => None,
        }
    }

    pub fn set_group_property(
        &mut self,
        id: &GroupId,
        property: Property,
        value: Option<&str>,
    ) -> SceneResult<()> {
        let value = value.unwrap_or_default().to_string();
        let group = self.group_mut(id)?;
        match property {
            Property::Name => group.name = value,
            Property::Color => group.color = value,
            _ => {}
        }
        Ok(())
    }

    /// Topmost group under a board-space point.
    pub fn group_at(&self, p: Point) -> Option<GroupId> {
        let candidates: HashSet<GroupId> = self.group_index.query_point(p).into_iter().collect();
        self.groups
            .iter()
            .rev()
            .find(|g| candidates.contains(&g.id))
            .map(|g| g.id.clone())
    }

    pub fn groups_in_rect(&self, rect: &Rect) -> Vec<GroupId> {
        let hits: HashSet<GroupId> = self.group_index.query_rect(rect).into_iter().collect();
        self.groups
            .iter()
            .filter(|g| hits.contains(&g.id))
            .map(|g| g.id.clone())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_NAME)
    }
}
