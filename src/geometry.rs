/// Plane geometry shared by every entity: a float vector and an
/// axis-aligned bounding box.
///
/// Screen convention: `x` grows rightward, `y` grows downward.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rectangle stored as centre + full size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub center: Vector2,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    /// Sizes are stored as absolute values so width/height are never negative.
    pub fn new(center: Vector2, width: f32, height: f32) -> Self {
        Self {
            center,
            width: width.abs(),
            height: height.abs(),
        }
    }

    pub fn from_top_left(top_left: Vector2, width: f32, height: f32) -> Self {
        let (width, height) = (width.abs(), height.abs());
        Self::new(
            Vector2::new(top_left.x + width / 2.0, top_left.y + height / 2.0),
            width,
            height,
        )
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.height / 2.0
    }

    /// Same size, new centre.
    pub fn centered_at(&self, center: Vector2) -> Self {
        Self { center, ..*self }
    }

    /// Strict overlap on both axes: boxes that only touch along an edge do
    /// not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Inclusive: a box touching `min_y` or `max_y` is still inside.
    pub fn within_vertical(&self, min_y: f32, max_y: f32) -> bool {
        self.top() >= min_y && self.bottom() <= max_y
    }
}
