//! Undo/redo through the session's commit pipeline.

use crate::helpers::*;
use pinboard::board::Board;
use pinboard::history::{Command, History, HistoryStatus};
use pinboard::types::{GroupId, ObjectRef, PinItem, PinKind, Point, Property};
use std::cell::RefCell;
use std::rc::Rc;

fn snapshot(board: &Board) -> (Vec<PinItem>, Vec<pinboard::types::PinGroup>) {
    (board.items().to_vec(), board.groups().to_vec())
}

#[test]
fn test_undo_everything_restores_initial_board() {
    let (mut pb, _) = pinboard_with(
        TestBoardBuilder::new()
            .with_pin("a", "/docs/a.txt", (0.0, 0.0))
            .with_group("g", (400.0, 400.0))
            .build(),
    );
    let before = snapshot(pb.active_board());

    pb.add_pin("/docs/b.txt", Point::new(300.0, 0.0));
    assert!(pb.set_property(ObjectRef::Item(pin("a")), Property::Comment, "draft"));
    assert!(pb.assign_to_group(&pin("a"), Some(&group("g"))));
    pb.execute(Command::MoveItem {
        id: pin("a"),
        from: Point::new(0.0, 0.0),
        to: Point::new(40.0, 60.0),
    });
    pb.select_all();
    assert!(pb.delete_selected());
    assert!(pb.active_board().items().is_empty());
    assert_eq!(pb.history.undo_len(), 5);

    while pb.undo().is_some() {}

    assert_eq!(snapshot(pb.active_board()), before);
    assert!(pb.history.can_redo());
}

#[test]
fn test_redo_replays_to_latest_state() {
    let (mut pb, _) = pinboard_with(board_with_pins(&["a", "b"]));
    pb.set_property(ObjectRef::Item(pin("a")), Property::Name, "Alpha");
    pb.select_all();
    pb.delete_selected();
    let after = snapshot(pb.active_board());

    pb.undo();
    pb.undo();
    assert_eq!(pb.redo().as_deref(), Some("Change pin name"));
    assert_eq!(pb.redo().as_deref(), Some("Delete 2 objects"));
    assert_eq!(snapshot(pb.active_board()), after);
    assert_eq!(pb.redo(), None);
}

#[test]
fn test_history_is_capped_at_fifty() {
    let (mut pb, _) = pinboard_with(board_with_pins(&["a"]));
    for i in 0..60 {
        pb.execute(Command::MoveItem {
            id: pin("a"),
            from: Point::new(i as f32, 0.0),
            to: Point::new(i as f32 + 1.0, 0.0),
        });
    }
    assert_eq!(pb.history.undo_len(), 50);

    while pb.undo().is_some() {}
    // The ten oldest moves fell off the bottom of the stack
    assert_near(position_of(&pb, "a"), Point::new(10.0, 0.0));
}

#[test]
fn test_new_command_discards_redo_branch() {
    let (mut pb, _) = pinboard_with(board_with_pins(&["a"]));
    pb.set_property(ObjectRef::Item(pin("a")), Property::Comment, "one");
    pb.undo();
    assert!(pb.history.can_redo());

    pb.set_property(ObjectRef::Item(pin("a")), Property::Comment, "two");
    assert!(!pb.history.can_redo());
    assert_eq!(pb.redo(), None);
    assert_eq!(
        pb.active_board().item(&pin("a")).unwrap().comment,
        "two"
    );
}

#[test]
fn test_multi_move_is_one_step() {
    let (mut pb, _) = pinboard_with(board_with_pins(&["a", "b", "c"]));
    pb.select_all();
    drag(&mut pb, (10.0, 10.0), &[(60.0, 10.0), (110.0, 60.0)]);

    assert_eq!(pb.history.undo_len(), 1);
    assert_eq!(pb.history.status().undo_description.as_deref(), Some("Move 3 pins"));
    assert_near(position_of(&pb, "c"), Point::new(500.0, 50.0));

    pb.undo();
    assert_near(position_of(&pb, "a"), Point::new(0.0, 0.0));
    assert_near(position_of(&pb, "b"), Point::new(200.0, 0.0));
    assert_near(position_of(&pb, "c"), Point::new(400.0, 0.0));
}

#[test]
fn test_group_delete_restores_member_links() {
    let mut member = PinItem::new(PinKind::File, "/docs/m.txt", Point::new(450.0, 450.0)).with_id("m");
    member.group_id = Some(GroupId::from("g"));
    let (mut pb, _) = pinboard_with(
        TestBoardBuilder::new()
            .with_group("g", (400.0, 400.0))
            .with_item(member)
            .build(),
    );

    let cmd = Command::delete_group(pb.active_board(), &group("g")).unwrap();
    pb.execute(cmd);
    let board = pb.active_board();
    assert!(!board.contains_group(&group("g")));
    assert_eq!(board.item(&pin("m")).unwrap().group_id, None);
    assert_near(position_of(&pb, "m"), Point::new(450.0, 450.0));

    pb.undo();
    let board = pb.active_board();
    assert!(board.contains_group(&group("g")));
    assert_eq!(board.item(&pin("m")).unwrap().group_id, Some(group("g")));
}

#[test]
fn test_deleted_pins_return_at_original_index() {
    let (mut pb, _) = pinboard_with(board_with_pins(&["a", "b", "c", "d"]));
    pb.canvas.selection.toggle_item(&pin("b"));
    pb.canvas.selection.toggle_item(&pin("d"));
    pb.delete_selected();
    let ids: Vec<_> = pb.active_board().items().iter().map(|i| i.id.to_string()).collect();
    assert_eq!(ids, ["a", "c"]);

    pb.undo();
    let ids: Vec<_> = pb.active_board().items().iter().map(|i| i.id.to_string()).collect();
    assert_eq!(ids, ["a", "b", "c", "d"]);
}

#[test]
fn test_undo_prunes_selection_and_editor() {
    let (mut pb, _) = pinboard_with(Board::new("Empty"));
    let note = pb.add_note(Point::new(0.0, 0.0));
    assert_eq!(pb.canvas.editing_note.as_ref(), Some(&note));
    assert!(pb.canvas.selection.is_item_selected(&note));

    pb.undo();
    assert!(pb.active_board().items().is_empty());
    assert!(pb.canvas.selection.is_empty());
    assert_eq!(pb.canvas.editing_note, None);
}

#[test]
fn test_unchanged_property_records_nothing() {
    let (mut pb, _) = pinboard_with(board_with_pins(&["a"]));
    assert!(!pb.set_property(ObjectRef::Item(pin("a")), Property::Comment, ""));
    assert!(!pb.set_color(ObjectRef::Item(pin("missing")), "#FF000000"));
    assert!(!pb.history.can_undo());
}

#[test]
fn test_property_undo_restores_updated_at() {
    let mut item = PinItem::new(PinKind::File, "/docs/a.txt", Point::new(0.0, 0.0)).with_id("a");
    item.updated_at = 7;
    let (mut pb, _) = pinboard_with(TestBoardBuilder::new().with_item(item).build());

    pb.set_property(ObjectRef::Item(pin("a")), Property::Name, "Renamed");
    assert!(pb.active_board().item(&pin("a")).unwrap().updated_at >= 7);
    pb.undo();
    let item = pb.active_board().item(&pin("a")).unwrap();
    assert_eq!(item.updated_at, 7);
    assert_eq!(item.display_name(), "a.txt");
}

#[test]
fn test_listener_sees_each_transition() {
    let mut board = board_with_pins(&["a"]);
    let mut history = History::default();
    let seen: Rc<RefCell<Vec<HistoryStatus>>> = Rc::default();
    let sink = Rc::clone(&seen);
    history.on_change(move |status| sink.borrow_mut().push(status.clone()));

    let cmd = Command::change_property(&board, ObjectRef::Item(pin("a")), Property::Color, "#FF112233")
        .unwrap();
    history.execute(cmd, &mut board);
    history.undo(&mut board);
    history.clear();
    // Clearing an already empty history is silent
    history.clear();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0].undo_description.as_deref(), Some("Change pin color"));
    assert!(seen[1].can_redo && !seen[1].can_undo);
    assert_eq!(seen[2], HistoryStatus::default());
}

#[test]
fn test_undo_during_drag_cancels_gesture_first() {
    let (mut pb, _) = pinboard_with(board_with_pins(&["a"]));
    pb.set_property(ObjectRef::Item(pin("a")), Property::Comment, "x");

    press(&mut pb, 10.0, 10.0);
    pb.handle_pointer_move(Point::new(80.0, 80.0));
    assert!(pb.canvas.input_state.is_dragging());

    assert_eq!(pb.undo().as_deref(), Some("Change pin comment"));
    assert!(pb.canvas.input_state.is_idle());
    assert_near(position_of(&pb, "a"), Point::new(0.0, 0.0));
}

#[test]
fn test_delete_during_drag_restores_press_position() {
    let (mut pb, _) = pinboard_with(board_with_pins(&["a"]));
    press(&mut pb, 10.0, 10.0);
    pb.handle_pointer_move(Point::new(110.0, 60.0));
    assert_near(position_of(&pb, "a"), Point::new(100.0, 50.0));

    assert!(pb.delete_selected());
    pb.handle_pointer_up(Point::new(110.0, 60.0));
    assert!(pb.active_board().items().is_empty());
    assert_eq!(pb.history.undo_len(), 1);

    pb.undo();
    assert_near(position_of(&pb, "a"), Point::new(0.0, 0.0));
    assert!(!pb.history.can_undo());
}

#[test]
fn test_edit_during_drag_cancels_the_drag() {
    let (mut pb, _) = pinboard_with(board_with_pins(&["a"]));
    press(&mut pb, 10.0, 10.0);
    pb.handle_pointer_move(Point::new(110.0, 60.0));

    assert!(pb.set_property(ObjectRef::Item(pin("a")), Property::Comment, "mid-drag"));
    assert!(pb.canvas.input_state.is_idle());
    assert_near(position_of(&pb, "a"), Point::new(0.0, 0.0));

    // The release has nothing left to commit
    pb.handle_pointer_up(Point::new(110.0, 60.0));
    assert_eq!(pb.history.undo_len(), 1);

    pb.undo();
    let item = pb.active_board().item(&pin("a")).unwrap();
    assert_eq!(item.comment, "");
    assert_near(item.position(), Point::new(0.0, 0.0));
}
