/// Axis-aligned boxes and the playfield they live in.
///
/// World units are pixels of a virtual 1600×900 screen; the renderer
/// scales them down to terminal cells.

use nalgebra::Vector2;

/// The playable rectangle `[0, width] × [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

/// An axis-aligned bounding box stored by its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub center: Vector2<f32>,
    pub size: Vector2<f32>,
}

impl Rect {
    pub fn new(center: Vector2<f32>, size: Vector2<f32>) -> Self {
        Self { center, size }
    }

    pub fn from_center(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vector2::new(x, y), Vector2::new(w, h))
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    pub fn translate(&mut self, delta: Vector2<f32>) {
        self.center += delta;
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Per-axis containment test: `(horizontal, vertical)`, each true iff the
/// box lies fully inside the playfield on that axis.
pub fn in_bounds(rect: &Rect, field: &Playfield) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= field.width;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= field.height;
    (horizontal, vertical)
}

/// Convenience for callers that only care whether both axes pass.
pub fn fully_in_bounds(rect: &Rect, field: &Playfield) -> bool {
    in_bounds(rect, field) == (true, true)
}

/// Unit vector from the center of `from` to the center of `to`.
/// `None` when the centers coincide.
pub fn direction_to(from: &Rect, to: &Rect) -> Option<Vector2<f32>> {
    (to.center - from.center).try_normalize(f32::EPSILON)
}
