//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestBoardBuilder` - Builder pattern for boards with fixed ids
//! - `MemoryStore` - In-memory `DocumentStore` with a failure switch
//! - `FakeLauncher` / `ScriptedPrompt` - Recording collaborator fakes
//! - Pointer helpers for driving gestures

use pinboard::app::Pinboard;
use pinboard::board::Board;
use pinboard::document::AppData;
use pinboard::error::{LaunchError, StoreError, StoreResult};
use pinboard::input::{PointerEvent, PointerOutcome};
use pinboard::launcher::Launcher;
use pinboard::prompt::PropertyPrompt;
use pinboard::settings::Settings;
use pinboard::store::DocumentStore;
use pinboard::types::{GroupId, PinGroup, PinId, PinItem, PinKind, Point};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

// ============================================================================
// TestBoardBuilder
// ============================================================================

/// Builder for boards whose objects have predictable ids.
///
/// # Example
/// ```ignore
/// let board = TestBoardBuilder::new()
///     .with_pin("a", "/docs/a.txt", (0.0, 0.0))
///     .with_group("g", (400.0, 400.0))
///     .with_zoom(2.0)
///     .build();
/// ```
pub struct TestBoardBuilder {
    board: Board,
}

impl Default for TestBoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBoardBuilder {
    pub fn new() -> Self {
        Self {
            board: Board::new("Test Board"),
        }
    }

    /// Add a file pin.
    pub fn with_pin(self, id: &str, path: &str, pos: (f32, f32)) -> Self {
        self.with_item(PinItem::new(PinKind::File, path, Point::new(pos.0, pos.1)).with_id(id))
    }

    pub fn with_url(self, id: &str, url: &str, pos: (f32, f32)) -> Self {
        self.with_item(PinItem::new(PinKind::Url, url, Point::new(pos.0, pos.1)).with_id(id))
    }

    pub fn with_note(self, id: &str, text: &str, pos: (f32, f32)) -> Self {
        self.with_item(PinItem::note(text, Point::new(pos.0, pos.1)).with_id(id))
    }

    pub fn with_item(mut self, item: PinItem) -> Self {
        self.board.add_item(item).unwrap();
        self
    }

    pub fn with_group(mut self, id: &str, pos: (f32, f32)) -> Self {
        self.board
            .add_group(PinGroup::new("Group", Point::new(pos.0, pos.1)).with_id(id))
            .unwrap();
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.board.viewport.zoom = zoom;
        self
    }

    pub fn with_pan(mut self, x: f32, y: f32) -> Self {
        self.board.viewport.pan_x = x;
        self.board.viewport.pan_y = y;
        self
    }

    pub fn build(self) -> Board {
        self.board
    }
}

/// Board with file pins named by the given leaf names, placed 200 units apart.
pub fn board_with_pins(names: &[&str]) -> Board {
    names
        .iter()
        .enumerate()
        .fold(TestBoardBuilder::new(), |builder, (i, name)| {
            builder.with_pin(name, &format!("/docs/{name}"), (i as f32 * 200.0, 0.0))
        })
        .build()
}

pub fn pin(id: &str) -> PinId {
    PinId::from(id)
}

pub fn group(id: &str) -> GroupId {
    GroupId::from(id)
}

pub fn position_of(pb: &Pinboard, id: &str) -> Point {
    pb.active_board().item(&pin(id)).unwrap().position()
}

// ============================================================================
// MemoryStore
// ============================================================================

/// Shared view into a `MemoryStore` that outlives the boxed store.
#[derive(Clone, Default)]
pub struct StoreHandle {
    pub saved: Rc<RefCell<Option<AppData>>>,
    pub saves: Rc<Cell<usize>>,
    pub fail: Rc<Cell<bool>>,
}

impl StoreHandle {
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }

    pub fn last_saved(&self) -> Option<AppData> {
        self.saved.borrow().clone()
    }
}

/// In-memory document store
pub struct MemoryStore {
    initial: AppData,
    handle: StoreHandle,
}

impl MemoryStore {
    pub fn new(initial: AppData) -> (Self, StoreHandle) {
        let handle = StoreHandle::default();
        (
            Self {
                initial,
                handle: handle.clone(),
            },
            handle,
        )
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> AppData {
        self.handle
            .saved
            .borrow()
            .clone()
            .unwrap_or_else(|| self.initial.clone())
    }

    fn save(&self, data: &AppData) -> StoreResult<()> {
        if self.handle.fail.get() {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        self.handle.saves.set(self.handle.saves.get() + 1);
        *self.handle.saved.borrow_mut() = Some(data.clone());
        Ok(())
    }
}

/// Settings used by most tests: no snapping, so positions stay exact.
pub fn test_settings() -> Settings {
    Settings {
        grid_snap: false,
        fetch_favicons: false,
        ..Default::default()
    }
}

/// Session over a single board, backed by a `MemoryStore`.
pub fn pinboard_with(board: Board) -> (Pinboard, StoreHandle) {
    pinboard_with_settings(board, test_settings())
}

pub fn pinboard_with_settings(board: Board, settings: Settings) -> (Pinboard, StoreHandle) {
    let (store, handle) = MemoryStore::new(AppData::with_board(board));
    (Pinboard::new(Box::new(store), settings), handle)
}

// ============================================================================
// Collaborator fakes
// ============================================================================

/// Records every target it is asked to open.
#[derive(Default)]
pub struct FakeLauncher {
    pub opened: RefCell<Vec<String>>,
    pub fail: bool,
}

impl Launcher for FakeLauncher {
    fn open(&self, target: &str) -> Result<(), LaunchError> {
        if self.fail {
            return Err(LaunchError::Open {
                target: target.to_string(),
                source: std::io::Error::other("no handler"),
            });
        }
        self.opened.borrow_mut().push(target.to_string());
        Ok(())
    }
}

/// Answers prompts from a queue; an exhausted queue cancels.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    /// (title, initial value, multiline) of every prompt shown
    pub shown: Vec<(String, String, bool)>,
}

impl ScriptedPrompt {
    pub fn answering(answer: &str) -> Self {
        Self {
            answers: VecDeque::from([Some(answer.to_string())]),
            shown: Vec::new(),
        }
    }

    pub fn cancelling() -> Self {
        Self::default()
    }
}

impl PropertyPrompt for ScriptedPrompt {
    fn prompt(&mut self, title: &str, _label: &str, initial: &str, multiline: bool) -> Option<String> {
        self.shown
            .push((title.to_string(), initial.to_string(), multiline));
        self.answers.pop_front().flatten()
    }
}

// ============================================================================
// Pointer helpers
// ============================================================================

pub fn press(pb: &mut Pinboard, x: f32, y: f32) -> PointerOutcome {
    pb.handle_pointer_down(&PointerEvent::primary(Point::new(x, y)))
}

/// Press, move through `path`, release at the last point.
pub fn drag(pb: &mut Pinboard, from: (f32, f32), path: &[(f32, f32)]) {
    press(pb, from.0, from.1);
    for &(x, y) in path {
        pb.handle_pointer_move(Point::new(x, y));
    }
    let end = path.last().copied().unwrap_or(from);
    pb.handle_pointer_up(Point::new(end.0, end.1));
}

/// Assert two points are equal within float noise.
pub fn assert_near(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < 1e-3 && (actual.y - expected.y).abs() < 1e-3,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
