//! Gesture state machine - one explicit enum for every pointer interaction.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> DraggingItems     (primary press on a pin, outside its resize handle)
//! Idle -> DraggingGroup     (primary press on a selected group)
//! Idle -> Resizing          (primary press on a resize handle)
//! Idle -> MarqueeSelecting  (primary press on empty canvas)
//! Idle -> Panning           (secondary or middle press anywhere)
//!
//! Any -> Idle               (release commits, cancel restores)
//! ```
//!
//! Drags start "pending": they only become active once the pointer travels
//! past the drag threshold, so a press-release without travel stays a click.

use crate::types::{GroupId, ObjectRef, PinId, Point};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Modifier keys, sampled when a gesture begins
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift (or the platform's additive-selection key)
    pub additive: bool,
}

/// A pointer press in canvas-local screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    pub click_count: u32,
}

impl PointerEvent {
    pub fn primary(position: Point) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            modifiers: Modifiers::default(),
            click_count: 1,
        }
    }

    pub fn secondary(position: Point) -> Self {
        Self {
            button: PointerButton::Secondary,
            ..Self::primary(position)
        }
    }

    pub fn additive(mut self) -> Self {
        self.modifiers.additive = true;
        self
    }

    pub fn double(mut self) -> Self {
        self.click_count = 2;
        self
    }
}

/// What a press asks the embedder to do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    /// A gesture is already in progress
    Ignored,
    Handled,
    /// Double-click on a pin
    OpenItem(PinId),
    /// Double-click on a group
    RenameGroup(GroupId),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,

    /// Moving one pin, or every selected pin
    DraggingItems {
        /// Pin under the cursor at press time
        primary: PinId,
        /// Screen position of the press
        press: Point,
        /// Board positions captured at press time
        anchors: Vec<(PinId, Point)>,
        /// Set once the pointer passed the drag threshold
        active: bool,
    },

    DraggingGroup {
        id: GroupId,
        press: Point,
        anchor: Point,
        active: bool,
    },

    Resizing {
        target: ObjectRef,
        press: Point,
        /// Effective size at press time
        start_size: (f32, f32),
        /// Stored size at press time, possibly (0, 0) for pins
        original: (f32, f32),
    },

    /// Rubber-band selection, in screen coordinates
    MarqueeSelecting {
        start: Point,
        current: Point,
        additive: bool,
    },

    Panning {
        last_pos: Point,
        start_pan: Point,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True once a drag, resize or pan is moving things on screen
    pub fn is_dragging(&self) -> bool {
        match self {
            Self::DraggingItems { active, .. } | Self::DraggingGroup { active, .. } => *active,
            Self::Resizing { .. } | Self::Panning { .. } => true,
            Self::Idle | Self::MarqueeSelecting { .. } => false,
        }
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_marquee_selecting(&self) -> bool {
        matches!(self, Self::MarqueeSelecting { .. })
    }

    /// Marquee corners in screen coordinates, for drawing the rubber band
    pub fn marquee(&self) -> Option<(Point, Point)> {
        match self {
            Self::MarqueeSelecting { start, current, .. } => Some((*start, *current)),
            _ => None,
        }
    }

    pub fn dragged_item(&self) -> Option<&PinId> {
        match self {
            Self::DraggingItems { primary, .. } => Some(primary),
            _ => None,
        }
    }

}
