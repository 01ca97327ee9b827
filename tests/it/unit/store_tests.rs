//! JSON document store and document repair on load.

use crate::helpers::*;
use pinboard::app::Pinboard;
use pinboard::document::AppData;
use pinboard::store::{DocumentStore, JsonStore, read_document, write_document};
use pinboard::types::{ObjectRef, Point, Property};

#[test]
fn test_missing_file_loads_default_document() {
    let dir = tempfile::tempdir().unwrap();
    let data = JsonStore::new(dir.path().join("pins.json")).load();
    assert_eq!(data.boards().len(), 1);
    assert_eq!(data.active_board().name, "My Board");
}

#[test]
fn test_save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("pins.json"));
    let mut data = AppData::with_board(board_with_pins(&["a", "b"]));
    let second = data.add_board("Second");
    data.set_active(&second).unwrap();

    store.save(&data).unwrap();
    let loaded = store.load();
    assert_eq!(loaded.boards().len(), 2);
    assert_eq!(loaded.active_board_id(), &second);
    assert_eq!(loaded.boards()[0].items(), data.boards()[0].items());
}

#[test]
fn test_loaded_board_rebuilds_hit_testing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pins.json");
    write_document(&AppData::with_board(board_with_pins(&["a", "b"])), &path).unwrap();

    let data = read_document(&path).unwrap();
    let board = data.active_board();
    assert_eq!(board.item_at(Point::new(210.0, 10.0)), Some(pin("b")));
    assert_eq!(board.item_at(Point::new(150.0, 10.0)), None);
}

#[test]
fn test_partial_document_is_repaired() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pins.json");
    std::fs::write(
        &path,
        r#"{
            "boards": [
                {
                    "id": "b1",
                    "name": "  ",
                    "items": [
                        { "id": "a", "path": "/docs/a.txt", "x": 5 },
                        { "id": "a", "path": "/docs/dupe.txt" },
                        { "path": "/docs/no-id.txt" }
                    ],
                    "groups": [ { "id": "g" }, { "id": "g" } ]
                }
            ],
            "active_board_id": "gone"
        }"#,
    )
    .unwrap();

    let data = JsonStore::new(&path).load();
    let board = data.active_board();
    assert_eq!(data.active_board_id().as_str(), "b1");
    assert_eq!(board.name, "My Board");
    assert_eq!(board.items().len(), 1);
    assert_eq!(board.items()[0].path, "/docs/a.txt");
    assert_eq!(board.items()[0].x, 5.0);
    assert_eq!(board.groups().len(), 1);
    assert_eq!(board.viewport.zoom, 1.0);
}

#[test]
fn test_empty_board_list_gets_default_board() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pins.json");
    std::fs::write(&path, r#"{ "boards": [], "active_board_id": "" }"#).unwrap();

    let data = read_document(&path).unwrap();
    assert_eq!(data.boards().len(), 1);
    assert_eq!(data.active_board_id(), &data.boards()[0].id);
}

#[test]
fn test_session_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pins.json");

    let mut pb = Pinboard::new(Box::new(JsonStore::new(&path)), test_settings());
    let id = pb.add_pin("/docs/report.pdf", Point::new(40.0, 40.0)).unwrap();
    pb.set_property(ObjectRef::Item(id.clone()), Property::Comment, "Q3");
    pb.handle_wheel(Point::new(0.0, 0.0), -1.0);
    pb.shutdown();

    let reopened = Pinboard::new(Box::new(JsonStore::new(&path)), test_settings());
    let item = reopened.active_board().item(&id).unwrap();
    assert_eq!(item.comment, "Q3");
    assert_eq!(reopened.active_board().viewport.zoom, 0.9);
    assert!(!reopened.history.can_undo());
}
