//! Axis-aligned integer rectangles for walls, the goal and the play area

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pixel rectangle with its top-left corner at (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// How far each side of a rectangle is pushed out for a containment test.
/// Negative values shrink the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Margins {
    pub const NONE: Margins = Margins::uniform(0);

    pub const fn uniform(m: i32) -> Self {
        Self {
            left: m,
            right: m,
            top: m,
            bottom: m,
        }
    }

    pub const fn left(m: i32) -> Self {
        Self { left: m, ..Self::NONE }
    }

    pub const fn right(m: i32) -> Self {
        Self { right: m, ..Self::NONE }
    }

    pub const fn top(m: i32) -> Self {
        Self { top: m, ..Self::NONE }
    }

    pub const fn bottom(m: i32) -> Self {
        Self { bottom: m, ..Self::NONE }
    }
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle spanned by two opposite corners, in any order
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            x: a.0.min(b.0),
            y: a.1.min(b.1),
            w: a.0.abs_diff(b.0).min(i32::MAX as u32) as i32,
            h: a.1.abs_diff(b.1).min(i32::MAX as u32) as i32,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Inclusive containment of a point, on the rectangle grown by `margins`.
    ///
    /// The point is truncated to whole pixels first, so a particle at
    /// x = 99.9 tests as x = 99.
    pub fn contains_with(&self, point: DVec2, margins: Margins) -> bool {
        let x = point.x as i32;
        let y = point.y as i32;
        x >= self.x.saturating_sub(margins.left)
            && x <= self.right().saturating_add(margins.right)
            && y >= self.y.saturating_sub(margins.top)
            && y <= self.bottom().saturating_add(margins.bottom)
    }

    /// Inclusive containment of a point
    pub fn contains(&self, point: DVec2) -> bool {
        self.contains_with(point, Margins::NONE)
    }
}
