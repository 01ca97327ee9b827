//! Snapshot tests for the persisted formats.
//!
//! Documents are rendered with `serde_json` exactly as the store writes
//! them, so the snapshots pin the on-disk layout.

use pinboard::board::{Board, BoardState, Viewport};
use pinboard::document::AppData;
use pinboard::settings::Settings;
use pinboard::types::{GroupId, PinGroup, PinItem, PinKind, Point};

fn fixed_board() -> Board {
    let mut item = PinItem::new(PinKind::File, "/docs/a.txt", Point::new(20.0, 40.0)).with_id("a");
    item.group_id = Some(GroupId::from("g"));
    item.created_at = 0;
    item.updated_at = 0;
    let mut note = PinItem::note("remember", Point::new(-60.0, 0.0)).with_id("n");
    note.width = 240.0;
    note.height = 180.0;
    note.created_at = 0;
    note.updated_at = 0;

    Board::from(BoardState {
        id: "b1".into(),
        name: "Snapshot".to_string(),
        items: vec![item, note],
        groups: vec![PinGroup::new("Inbox", Point::new(0.0, 0.0)).with_id("g")],
        viewport: Viewport {
            zoom: 1.5,
            pan_x: -10.0,
            pan_y: 0.0,
        },
        created_at: 0,
        updated_at: 0,
    })
}

#[test]
fn test_board_json_layout() {
    let json = serde_json::to_string_pretty(&fixed_board()).unwrap();
    insta::assert_snapshot!(json, @r##"
{
  "id": "b1",
  "name": "Snapshot",
  "items": [
    {
      "id": "a",
      "kind": "File",
      "path": "/docs/a.txt",
      "name": "",
      "comment": "",
      "x": 20.0,
      "y": 40.0,
      "width": 0.0,
      "height": 0.0,
      "color": "#FF2D2D30",
      "group_id": "g",
      "note_text": "",
      "created_at": 0,
      "updated_at": 0
    },
    {
      "id": "n",
      "kind": "Note",
      "path": "",
      "name": "",
      "comment": "",
      "x": -60.0,
      "y": 0.0,
      "width": 240.0,
      "height": 180.0,
      "color": "#FFFFF3B0",
      "note_text": "remember",
      "created_at": 0,
      "updated_at": 0
    }
  ],
  "groups": [
    {
      "id": "g",
      "name": "Inbox",
      "color": "#333A7BD5",
      "x": 0.0,
      "y": 0.0,
      "width": 300.0,
      "height": 200.0
    }
  ],
  "viewport": {
    "zoom": 1.5,
    "pan_x": -10.0,
    "pan_y": 0.0
  },
  "created_at": 0,
  "updated_at": 0
}
"##);
}

#[test]
fn test_document_json_layout() {
    let board = Board::from(BoardState {
        id: "b1".into(),
        name: "Only".to_string(),
        ..Default::default()
    });
    let json = serde_json::to_string_pretty(&AppData::with_board(board)).unwrap();
    insta::assert_snapshot!(json, @r##"
{
  "boards": [
    {
      "id": "b1",
      "name": "Only",
      "items": [],
      "groups": [],
      "viewport": {
        "zoom": 1.0,
        "pan_x": 0.0,
        "pan_y": 0.0
      },
      "created_at": 0,
      "updated_at": 0
    }
  ],
  "active_board_id": "b1"
}
"##);
}

#[test]
fn test_default_settings() {
    insta::assert_json_snapshot!(Settings::default(), @r##"
{
  "grid_snap": true,
  "autosave_interval_secs": 30,
  "fetch_favicons": true
}
"##);
}

#[test]
fn test_settings_with_data_file() {
    let settings = Settings {
        data_file: Some("/home/someone/pins.json".into()),
        ..Default::default()
    };
    insta::assert_json_snapshot!(settings, { ".data_file" => "[path]" }, @r##"
{
  "grid_snap": true,
  "autosave_interval_secs": 30,
  "fetch_favicons": true,
  "data_file": "[path]"
}
"##);
}
