//! Pointer move - live updates for drags, resizes, marquee and pan.
//!
//! Moves mutate the board directly for immediate feedback. Positions are
//! always recomputed from the anchors captured at press time, so snapping
//! never accumulates drift. Nothing is recorded until release.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use super::coords::CoordinateContext;
use super::state::GestureState;
use crate::app::Pinboard;
use crate::constants::DRAG_THRESHOLD;
use crate::profile_scope;
use crate::types::{ObjectRef, Point, snap_to_grid};

fn snapped(p: Point, snap: bool) -> Point {
    if snap {
        Point::new(snap_to_grid(p.x), snap_to_grid(p.y))
    } else {
        p
    }
}

impl Pinboard {
    pub fn handle_pointer_move(&mut self, position: Point) {
        profile_scope!("handle_pointer_move");

        let snap = self.settings.grid_snap;
        let board = self.document.active_board_mut();
        let ctx = CoordinateContext::from_viewport(&board.viewport);

        match &mut self.canvas.input_state {
            GestureState::Idle => {}

            GestureState::DraggingItems {
                press,
                anchors,
                active,
                ..
            } => {
                if !*active {
                    if position.distance_to(*press) <= DRAG_THRESHOLD {
                        return;
                    }
                    *active = true;
                }
                profile_scope!("item_drag");
                let delta = ctx.delta_to_board(position - *press);
                for (id, anchor) in anchors.iter() {
                    // Anchors come from this board; a vanished pin is skipped
                    let _ = board.move_item(id, snapped(*anchor + delta, snap));
                }
            }

            GestureState::DraggingGroup {
                id,
                press,
                anchor,
                active,
            } => {
                if !*active {
                    if position.distance_to(*press) <= DRAG_THRESHOLD {
                        return;
                    }
                    *active = true;
                }
                let delta = ctx.delta_to_board(position - *press);
                let _ = board.move_group(id, snapped(*anchor + delta, snap));
            }

            GestureState::Resizing {
                target,
                press,
                start_size,
                ..
            } => {
                profile_scope!("resize");
                let delta = ctx.delta_to_board(position - *press);
                let mut size = (start_size.0 + delta.x, start_size.1 + delta.y);
                if snap {
                    size = (snap_to_grid(size.0), snap_to_grid(size.1));
                }
                let _ = match target {
                    ObjectRef::Item(id) => board.resize_item(id, size),
                    ObjectRef::Group(id) => board.resize_group(id, size),
                };
            }

            GestureState::MarqueeSelecting { current, .. } => {
                *current = position;
            }

            GestureState::Panning { last_pos, .. } => {
                let delta = position - *last_pos;
                board.viewport.set_pan(board.viewport.pan() + delta);
                *last_pos = position;
                self.system.dirty = true;
            }
        }
    }
}
