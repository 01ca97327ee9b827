//! Core types for the pinboard canvas.
//!
//! This module defines the entities placed on a board (pins and groups),
//! their identifiers, and the small geometry helpers shared by the scene
//! model and the input state machine.

use crate::constants::{
    DEFAULT_GROUP_COLOR, DEFAULT_GROUP_NAME, DEFAULT_GROUP_SIZE, DEFAULT_ITEM_COLOR,
    DEFAULT_NOTE_COLOR, GRID_SIZE, MIN_GROUP_SIZE, MIN_ITEM_SIZE, NOTE_LABEL,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random id
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a pin, unique within its board
    PinId
);
string_id!(
    /// Identifier of a group, unique within its board
    GroupId
);
string_id!(
    /// Identifier of a board, unique within the document
    BoardId
);

/// Current wall-clock time as unix seconds.
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ============================================================================
// Geometry
// ============================================================================

/// A 2-D point, either in screen or board coordinates depending on context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned rectangle stored as min/max corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Rect {
    pub fn new(position: Point, size: (f32, f32)) -> Self {
        Self {
            min_x: position.x,
            min_y: position.y,
            max_x: position.x + size.0,
            max_y: position.y + size.1,
        }
    }

    /// Normalized rectangle spanning two arbitrary corners
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

/// Round a coordinate to the nearest grid line.
///
/// Already-aligned values come back unchanged.
pub fn snap_to_grid(value: f32) -> f32 {
    (value / GRID_SIZE).round() * GRID_SIZE
}

// ============================================================================
// Pins
// ============================================================================

/// What a pin refers to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinKind {
    #[default]
    File,
    Folder,
    Url,
    Note,
}

impl PinKind {
    /// Size used when a pin has no explicit width/height
    pub fn default_size(self) -> (f32, f32) {
        match self {
            PinKind::File | PinKind::Folder => (120.0, 100.0),
            PinKind::Url => (160.0, 100.0),
            PinKind::Note => (200.0, 150.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PinKind::File => "FILE",
            PinKind::Folder => "FOLDER",
            PinKind::Url => "URL",
            PinKind::Note => "NOTE",
        }
    }

    /// Classify a dropped path or link.
    pub fn detect(target: &str) -> Self {
        let lower = target.trim().to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.")
        {
            PinKind::Url
        } else if Path::new(target).is_dir() {
            PinKind::Folder
        } else {
            PinKind::File
        }
    }

    /// Whether pins of this kind are handed to the OS shell when opened
    pub fn is_launchable(self) -> bool {
        !matches!(self, PinKind::Note)
    }
}

/// A pin placed on a board.
///
/// `width`/`height` of zero mean "use the kind default"; they only become
/// explicit once the pin is resized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinItem {
    pub id: PinId,
    pub kind: PinKind,
    /// File system path or URL; empty for notes
    pub path: String,
    /// Display name override; empty means derived
    pub name: String,
    pub comment: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// ARGB hex color, e.g. `#FF2D2D30`
    pub color: String,
    /// Informational back-reference to a group on the same board
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    /// Body text, only meaningful for notes
    pub note_text: String,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Default for PinItem {
    fn default() -> Self {
        Self {
            id: PinId::default(),
            kind: PinKind::File,
            path: String::new(),
            name: String::new(),
            comment: String::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            color: DEFAULT_ITEM_COLOR.to_string(),
            group_id: None,
            note_text: String::new(),
            created_at: 0,
            updated_at: 0,
        }
    }
}

impl PinItem {
    /// Create a pin for a file, folder or URL at a board position
    pub fn new(kind: PinKind, path: impl Into<String>, position: Point) -> Self {
        let now = now_secs();
        Self {
            id: PinId::new(),
            kind,
            path: path.into(),
            x: position.x,
            y: position.y,
            color: match kind {
                PinKind::Note => DEFAULT_NOTE_COLOR,
                _ => DEFAULT_ITEM_COLOR,
            }
            .to_string(),
            created_at: now,
            updated_at: now,
            ..Default::default()
        }
    }

    /// Create an empty note at a board position
    pub fn note(text: impl Into<String>, position: Point) -> Self {
        Self {
            note_text: text.into(),
            ..Self::new(PinKind::Note, String::new(), position)
        }
    }

    pub fn with_id(mut self, id: impl Into<PinId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Explicit size if set, otherwise the kind default
    pub fn effective_size(&self) -> (f32, f32) {
        if self.width > 0.0 && self.height > 0.0 {
            (self.width, self.height)
        } else {
            self.kind.default_size()
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position(), self.effective_size())
    }

    /// Name shown on the canvas and matched by search
    pub fn display_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.clone();
        }
        match self.kind {
            PinKind::Note => self
                .note_text
                .lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .unwrap_or(NOTE_LABEL)
                .to_string(),
            PinKind::Url => self.path.clone(),
            PinKind::File | PinKind::Folder => {
                let trimmed = self.path.trim_end_matches(['/', '\\']);
                trimmed
                    .rsplit(['/', '\\'])
                    .next()
                    .filter(|leaf| !leaf.is_empty())
                    .unwrap_or(&self.path)
                    .to_string()
            }
        }
    }
}

/// Clamp a requested pin size to the minimum floor
pub fn clamp_item_size(size: (f32, f32)) -> (f32, f32) {
    (size.0.max(MIN_ITEM_SIZE.0), size.1.max(MIN_ITEM_SIZE.1))
}

/// Clamp a requested group size to the minimum floor
pub fn clamp_group_size(size: (f32, f32)) -> (f32, f32) {
    (size.0.max(MIN_GROUP_SIZE.0), size.1.max(MIN_GROUP_SIZE.1))
}

// ============================================================================
// Groups
// ============================================================================

/// A named, colored region used to cluster pins visually.
///
/// Groups do not own pins: moving a group leaves its members where they are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinGroup {
    pub id: GroupId,
    pub name: String,
    /// Translucent ARGB hex fill
    pub color: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PinGroup {
    fn default() -> Self {
        Self {
            id: GroupId::default(),
            name: DEFAULT_GROUP_NAME.to_string(),
            color: DEFAULT_GROUP_COLOR.to_string(),
            x: 0.0,
            y: 0.0,
            width: DEFAULT_GROUP_SIZE.0,
            height: DEFAULT_GROUP_SIZE.1,
        }
    }
}

impl PinGroup {
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            x: position.x,
            y: position.y,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<GroupId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> (f32, f32) {
        clamp_group_size((self.width, self.height))
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position(), self.size())
    }
}

/// A reference to either kind of object on a board
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectRef {
    Item(PinId),
    Group(GroupId),
}

/// Editable scalar attributes of pins and groups.
///
/// Groups only carry `Name` and `Color`; the other variants are ignored for
/// group targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Name,
    Comment,
    Color,
    NoteText,
    /// A pin's group back-reference; empty string means ungrouped
    Group,
}

impl Property {
    pub fn label(self) -> &'static str {
        match self {
            Property::Name => "name",
            Property::Comment => "comment",
            Property::Color => "color",
            Property::NoteText => "note text",
            Property::Group => "group",
        }
    }
}
