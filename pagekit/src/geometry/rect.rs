//! Axis-aligned rectangles in PDF user space.

use serde::{Deserialize, Serialize};

/// A rectangle with its origin at the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from PDF box corners `[llx, lly, urx, ury]`.
    ///
    /// Corners may be given in any order; the result is normalised.
    pub fn from_corners(corners: [f64; 4]) -> Self {
        let [x0, y0, x1, y1] = corners;
        Self {
            x: x0.min(x1),
            y: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        }
    }

    /// PDF box corners `[llx, lly, urx, ury]`.
    pub fn corners(&self) -> [f64; 4] {
        [self.x, self.y, self.max_x(), self.max_y()]
    }

    /// Right edge.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// True when the rectangle encloses no area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Same rectangle with width and height exchanged.
    pub(crate) fn transposed(&self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            width: self.height,
            height: self.width,
        }
    }
}
