//! Coordinate conversion between screen and board space.
//!
//! Screen coordinates are relative to the canvas area's top-left corner;
//! the embedder strips window chrome before handing positions in.
//! `screen = board * zoom + pan`.

use crate::board::Viewport;
use crate::types::{Point, Rect};

/// Zoom and pan needed for a conversion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateContext {
    pub pan: Point,
    pub zoom: f32,
}

impl CoordinateContext {
    #[inline]
    pub fn new(pan: Point, zoom: f32) -> Self {
        Self { pan, zoom }
    }

    #[inline]
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self::new(viewport.pan(), viewport.zoom)
    }

    #[inline]
    pub fn screen_to_board(&self, p: Point) -> Point {
        Point::new((p.x - self.pan.x) / self.zoom, (p.y - self.pan.y) / self.zoom)
    }

    #[inline]
    pub fn board_to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.zoom + self.pan.x, p.y * self.zoom + self.pan.y)
    }

    /// Convert a pointer delta (drag distance) to board units
    #[inline]
    pub fn delta_to_board(&self, delta: Point) -> Point {
        Point::new(delta.x / self.zoom, delta.y / self.zoom)
    }

    /// Screen rectangle spanned by two screen points, in board space
    pub fn screen_rect_to_board(&self, a: Point, b: Point) -> Rect {
        Rect::from_corners(self.screen_to_board(a), self.screen_to_board(b))
    }
}
