//! Collision detection for axis-aligned boxes
//!
//! Hits are confirmed by an overlap ratio rather than a boolean so callers can
//! tell a graze from a full hit. The ratio is directional: it is normalized by
//! the area of the second box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (min/max corners, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// True when the box lies entirely outside `view` on at least one side
    pub fn is_outside(&self, view: &Aabb) -> bool {
        self.max.x < view.min.x
            || self.min.x > view.max.x
            || self.max.y < view.min.y
            || self.min.y > view.max.y
    }
}

/// Fraction of `b` covered by `a`, in `[0, 1]`.
///
/// Touching edges are not an overlap. A target with no area never collides.
pub fn overlap_ratio(a: &Aabb, b: &Aabb) -> f32 {
    let target_area = b.area();
    if target_area <= 0.0 {
        return 0.0;
    }

    let left = a.min.x.max(b.min.x);
    let right = a.max.x.min(b.max.x);
    if right <= left {
        return 0.0;
    }

    let top = a.min.y.max(b.min.y);
    let bottom = a.max.y.min(b.max.y);
    if bottom <= top {
        return 0.0;
    }

    ((right - left) * (bottom - top) / target_area).min(1.0)
}

/// A hit is any positive overlap
#[inline]
pub fn is_hit(a: &Aabb, b: &Aabb) -> bool {
    overlap_ratio(a, b) > 0.0
}
