//! Pointer release - commit the gesture as one command.
//!
//! Live mutations made while dragging are rewound to the press-time values
//! before the command executes, so `Command::apply` alone produces the final
//! state and undo restores exactly what was there before the press.

use super::coords::CoordinateContext;
use super::state::GestureState;
use crate::app::Pinboard;
use crate::board::Board;
use crate::constants::{MIN_MARQUEE_SIZE, MOVE_NOISE_FLOOR};
use crate::history::{Command, ItemMove};
use crate::types::{ObjectRef, Point};
use tracing::trace;

/// Effective size of the resize target right now
fn current_size(board: &Board, target: &ObjectRef) -> Option<(f32, f32)> {
    match target {
        ObjectRef::Item(id) => board.item(id).map(|i| i.effective_size()),
        ObjectRef::Group(id) => board.group(id).map(|g| g.size()),
    }
}

fn restore_size(board: &mut Board, target: &ObjectRef, size: (f32, f32)) {
    let _ = match target {
        ObjectRef::Item(id) => board.set_item_size(id, size),
        ObjectRef::Group(id) => board.set_group_size(id, size),
    };
}

impl Pinboard {
    pub fn handle_pointer_up(&mut self, position: Point) {
        let gesture = std::mem::take(&mut self.canvas.input_state);

        match gesture {
            GestureState::Idle => {}

            GestureState::DraggingItems {
                anchors, active, ..
            } => {
                if !active {
                    // Sub-threshold press and release: a plain click
                    return;
                }
                let board = self.document.active_board_mut();
                let mut moves = Vec::new();
                for (id, from) in anchors {
                    let Some(to) = board.item(&id).map(|i| i.position()) else {
                        continue;
                    };
                    let _ = board.move_item(&id, from);
                    if to.distance_to(from) > MOVE_NOISE_FLOOR {
                        moves.push(ItemMove { id, from, to });
                    }
                }
                let cmd = match moves.len() {
                    0 => return,
                    1 => {
                        let m = moves.remove(0);
                        Command::MoveItem {
                            id: m.id,
                            from: m.from,
                            to: m.to,
                        }
                    }
                    _ => Command::MoveItems { moves },
                };
                self.execute(cmd);
            }

            GestureState::DraggingGroup {
                id, anchor, active, ..
            } => {
                if !active {
                    return;
                }
                let board = self.document.active_board_mut();
                let Some(to) = board.group(&id).map(|g| g.position()) else {
                    return;
                };
                let _ = board.move_group(&id, anchor);
                if to.distance_to(anchor) > MOVE_NOISE_FLOOR {
                    self.execute(Command::MoveGroup {
                        id,
                        from: anchor,
                        to,
                    });
                }
            }

            GestureState::Resizing {
                target,
                start_size,
                original,
                ..
            } => {
                let board = self.document.active_board_mut();
                let Some(to) = current_size(board, &target) else {
                    return;
                };
                restore_size(board, &target, original);
                let changed = (to.0 - start_size.0).abs() > MOVE_NOISE_FLOOR
                    || (to.1 - start_size.1).abs() > MOVE_NOISE_FLOOR;
                if changed {
                    self.execute(Command::Resize {
                        target,
                        from: original,
                        to,
                    });
                }
            }

            GestureState::MarqueeSelecting {
                start, additive, ..
            } => {
                let width = (position.x - start.x).abs();
                let height = (position.y - start.y).abs();
                if width <= MIN_MARQUEE_SIZE || height <= MIN_MARQUEE_SIZE {
                    trace!(width, height, "Marquee below minimum size");
                    return;
                }
                let board = self.document.active_board();
                let ctx = CoordinateContext::from_viewport(&board.viewport);
                let rect = ctx.screen_rect_to_board(start, position);
                let items = board.items_in_rect(&rect);
                let groups = board.groups_in_rect(&rect);
                self.canvas.selection.apply_marquee(items, groups, additive);
            }

            GestureState::Panning { .. } => {
                self.system.dirty = true;
            }
        }
    }
}
