//! Canvas transformations - wheel zoom anchored at the cursor, and gesture
//! cancellation.

use super::coords::CoordinateContext;
use super::state::GestureState;
use crate::app::Pinboard;
use crate::board::Viewport;
use crate::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::types::{ObjectRef, Point};
use tracing::debug;

/// Step a zoom level by whole ticks, rounded to two decimals so repeated
/// steps land exactly on 0.1 multiples.
pub fn step_zoom(zoom: f32, ticks: i32) -> f32 {
    let next = zoom + ticks as f32 * ZOOM_STEP;
    ((next * 100.0).round() / 100.0).clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Change the zoom keeping the board point under `anchor` fixed on screen.
/// Returns false when the zoom did not change.
pub fn zoom_viewport_at(viewport: &mut Viewport, zoom: f32, anchor: Point) -> bool {
    let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    if (zoom - viewport.zoom).abs() < f32::EPSILON {
        return false;
    }
    let under_cursor = CoordinateContext::from_viewport(viewport).screen_to_board(anchor);
    viewport.zoom = zoom;
    viewport.set_pan(Point::new(
        anchor.x - under_cursor.x * zoom,
        anchor.y - under_cursor.y * zoom,
    ));
    true
}

impl Pinboard {
    /// One wheel tick at a screen position. Positive `delta` zooms in,
    /// negative zooms out.
    pub fn handle_wheel(&mut self, position: Point, delta: f32) -> bool {
        let ticks = if delta > 0.0 {
            1
        } else if delta < 0.0 {
            -1
        } else {
            return false;
        };
        let viewport = &mut self.document.active_board_mut().viewport;
        let zoom = step_zoom(viewport.zoom, ticks);
        let changed = zoom_viewport_at(viewport, zoom, position);
        if changed {
            self.system.dirty = true;
        }
        changed
    }

    /// Zoom to an absolute level around a screen point (keyboard shortcuts
    /// pass the canvas centre).
    pub fn zoom_to(&mut self, zoom: f32, anchor: Point) -> bool {
        let changed = zoom_viewport_at(&mut self.document.active_board_mut().viewport, zoom, anchor);
        if changed {
            self.system.dirty = true;
        }
        changed
    }

    pub fn reset_zoom(&mut self, anchor: Point) -> bool {
        self.zoom_to(DEFAULT_ZOOM, anchor)
    }

    /// Abort the gesture in progress, restoring everything it touched.
    /// Nothing is recorded. Returns false when no gesture was active.
    pub fn cancel_gesture(&mut self) -> bool {
        let gesture = std::mem::take(&mut self.canvas.input_state);
        let board = self.document.active_board_mut();
        match gesture {
            GestureState::Idle => return false,
            GestureState::DraggingItems { anchors, .. } => {
                for (id, anchor) in anchors {
                    let _ = board.move_item(&id, anchor);
                }
            }
            GestureState::DraggingGroup { id, anchor, .. } => {
                let _ = board.move_group(&id, anchor);
            }
            GestureState::Resizing {
                target, original, ..
            } => {
                let _ = match target {
                    ObjectRef::Item(id) => board.set_item_size(&id, original),
                    ObjectRef::Group(id) => board.set_group_size(&id, original),
                };
            }
            GestureState::MarqueeSelecting { .. } => {}
            GestureState::Panning { start_pan, .. } => {
                board.viewport.set_pan(start_pan);
            }
        }
        debug!("Gesture cancelled");
        true
    }
}
