use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Axis-aligned rectangle in screen space (+y points down).
///
/// `x, y` is the top-left corner. Width and height are expected to be
/// positive; use [`Rect::try_new`] where the values come from outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Like [`Rect::new`], but rejects non-positive or non-finite extents.
    pub fn try_new(x: f32, y: f32, width: f32, height: f32) -> Result<Self> {
        let rect = Self::new(x, y, width, height);
        rect.validate()?;
        Ok(rect)
    }

    pub fn validate(&self) -> Result<()> {
        let extent_ok = |v: f32| v.is_finite() && v > 0.0;
        if !extent_ok(self.width) || !extent_ok(self.height) {
            return Err(SimError::InvalidExtent {
                width: self.width,
                height: self.height,
            });
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "rectangle origin must be finite, got ({}, {})",
                self.x, self.y
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Same extent, moved so its top-left corner sits at `top_left`.
    #[inline]
    pub fn at(&self, top_left: Vec2) -> Self {
        Self::new(top_left.x, top_left.y, self.width, self.height)
    }

    /// Same extent, shifted by `delta`.
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        self.at(self.top_left() + delta)
    }

    /// Point hit test. The top and left edges are inside, the bottom and
    /// right edges are not, so adjacent rectangles never both claim a point.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// True when `a` and `b` share interior area. Rectangles whose edges only
/// touch do not overlap, unlike a closed-interval AABB test such as
/// raylib's `CheckCollisionRecs`.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// Length of the shared interval on each axis. Components are zero or
/// negative when the rectangles are apart on that axis.
pub fn overlap_depth(a: &Rect, b: &Rect) -> Vec2 {
    Vec2::new(
        a.right().min(b.right()) - a.left().max(b.left()),
        a.bottom().min(b.bottom()) - a.top().max(b.top()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right_neighbour = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right_neighbour));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn overlap_requires_both_axes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        // shares the x range but sits far below
        assert!(!overlaps(&a, &Rect::new(2.0, 50.0, 4.0, 4.0)));
        // contained
        assert!(overlaps(&a, &Rect::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn depth_of_partial_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 0.0, 10.0, 10.0);
        assert_eq!(overlap_depth(&a, &b), Vec2::new(5.0, 10.0));
    }

    #[test]
    fn contains_point_is_half_open() {
        let r = Rect::new(350.0, 200.0, 100.0, 100.0);
        assert!(r.contains_point(Vec2::new(350.0, 200.0)));
        assert!(r.contains_point(Vec2::new(400.0, 250.0)));
        assert!(!r.contains_point(Vec2::new(450.0, 250.0)));
        assert!(!r.contains_point(Vec2::new(400.0, 300.0)));
    }

    #[test]
    fn try_new_rejects_degenerate_extent() {
        assert!(Rect::try_new(0.0, 0.0, 0.0, 5.0).is_err());
        assert!(Rect::try_new(0.0, 0.0, 5.0, -1.0).is_err());
        assert!(Rect::try_new(0.0, 0.0, f32::NAN, 1.0).is_err());
        assert!(Rect::try_new(f32::INFINITY, 0.0, 1.0, 1.0).is_err());
        assert!(Rect::try_new(1.0, 2.0, 3.0, 4.0).is_ok());
    }

    #[test]
    fn at_keeps_extent() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).at(Vec2::new(10.0, 20.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 3.0, 4.0));
        assert_eq!(r.center(), Vec2::new(11.5, 22.0));
    }
}
