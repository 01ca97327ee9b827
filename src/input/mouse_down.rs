//! Pointer press - hit testing, selection, and gesture start.
//!
//! Hit testing goes through the board's R-tree indexes. Pins sit above
//! groups, and within each layer the most recently added object wins.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use super::coords::CoordinateContext;
use super::state::{GestureState, PointerButton, PointerEvent, PointerOutcome};
use crate::app::Pinboard;
use crate::constants::RESIZE_HANDLE_SIZE;
use crate::profile_scope;
use crate::types::{ObjectRef, Point, Rect};

/// Whether a board point lies on the bottom-right resize handle of `bounds`.
fn on_resize_handle(bounds: &Rect, p: Point, zoom: f32) -> bool {
    let handle = RESIZE_HANDLE_SIZE / zoom;
    bounds.contains(p) && p.x >= bounds.max_x - handle && p.y >= bounds.max_y - handle
}

impl Pinboard {
    pub fn handle_pointer_down(&mut self, event: &PointerEvent) -> PointerOutcome {
        profile_scope!("handle_pointer_down");

        // Capture is exclusive until release or cancel
        if !self.canvas.input_state.is_idle() {
            return PointerOutcome::Ignored;
        }

        let board = self.document.active_board();
        let viewport = board.viewport;

        if matches!(event.button, PointerButton::Secondary | PointerButton::Middle) {
            self.canvas.input_state = GestureState::Panning {
                last_pos: event.position,
                start_pan: viewport.pan(),
            };
            return PointerOutcome::Handled;
        }

        let ctx = CoordinateContext::from_viewport(&viewport);
        let p = ctx.screen_to_board(event.position);
        let additive = event.modifiers.additive;

        profile_scope!("hit_test");

        if let Some(id) = board.item_at(p) {
            if event.click_count >= 2 {
                self.canvas.selection.select_only(ObjectRef::Item(id.clone()));
                return PointerOutcome::OpenItem(id);
            }

            self.canvas.selection.click_item(&id, additive);
            let Some(item) = board.item(&id) else {
                return PointerOutcome::Handled;
            };

            if on_resize_handle(&item.bounds(), p, viewport.zoom) {
                self.canvas.input_state = GestureState::Resizing {
                    target: ObjectRef::Item(id),
                    press: event.position,
                    start_size: item.effective_size(),
                    original: (item.width, item.height),
                };
            } else if self.canvas.selection.is_item_selected(&id) {
                // A multi-selection moves together when the pressed pin is part of it
                let anchors = if self.canvas.selection.item_count() > 1 {
                    board
                        .items()
                        .iter()
                        .filter(|i| self.canvas.selection.is_item_selected(&i.id))
                        .map(|i| (i.id.clone(), i.position()))
                        .collect()
                } else {
                    vec![(id.clone(), item.position())]
                };
                self.canvas.input_state = GestureState::DraggingItems {
                    primary: id,
                    press: event.position,
                    anchors,
                    active: false,
                };
            }
            return PointerOutcome::Handled;
        }

        if let Some(id) = board.group_at(p) {
            if event.click_count >= 2 {
                self.canvas.selection.select_only(ObjectRef::Group(id.clone()));
                return PointerOutcome::RenameGroup(id);
            }

            self.canvas.selection.click_group(&id, additive);
            let Some(group) = board.group(&id) else {
                return PointerOutcome::Handled;
            };

            if on_resize_handle(&group.bounds(), p, viewport.zoom) {
                self.canvas.input_state = GestureState::Resizing {
                    target: ObjectRef::Group(id),
                    press: event.position,
                    start_size: group.size(),
                    original: (group.width, group.height),
                };
            } else if self.canvas.selection.is_group_selected(&id) {
                self.canvas.input_state = GestureState::DraggingGroup {
                    id,
                    press: event.position,
                    anchor: group.position(),
                    active: false,
                };
            }
            return PointerOutcome::Handled;
        }

        // Empty canvas
        if !additive {
            self.canvas.selection.clear();
        }
        self.canvas.input_state = GestureState::MarqueeSelecting {
            start: event.position,
            current: event.position,
            additive,
        };
        PointerOutcome::Handled
    }
}
