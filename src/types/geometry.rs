//! Bounding boxes in world and cell space.

use glam::{DVec2, UVec2};

/// World-axis-aligned rectangle in meters, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Bounds containing no point. Expanding it with the first point
    /// collapses it onto that point.
    pub fn empty() -> Self {
        Self {
            min: DVec2::new(f64::INFINITY, f64::INFINITY),
            max: DVec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Returns true if no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand this bounds to include the point (in place).
    pub fn expand_to_include(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// `max - min`, zero for empty bounds.
    pub fn extent(&self) -> DVec2 {
        if self.is_empty() {
            return DVec2::ZERO;
        }
        (self.max - self.min).abs()
    }
}

/// Inclusive cell window `[min.x, max.x] x [min.y, max.y]`, x = column, y = row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBounds {
    pub min: UVec2,
    pub max: UVec2,
}

impl CellBounds {
    pub fn from_cell(cell: UVec2) -> Self {
        Self {
            min: cell,
            max: cell,
        }
    }

    pub fn expand_to_include(&mut self, cell: UVec2) {
        self.min = self.min.min(cell);
        self.max = self.max.max(cell);
    }

    /// Grow by `padding` cells on every side, clamped to a `width x height` grid.
    pub fn padded(&self, padding: u32, width: u32, height: u32) -> Self {
        let limit = UVec2::new(width.saturating_sub(1), height.saturating_sub(1));
        Self {
            min: self.min.saturating_sub(UVec2::splat(padding)),
            max: self.max.saturating_add(UVec2::splat(padding)).min(limit),
        }
    }

    pub fn width(&self) -> u32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> u32 {
        self.max.y - self.min.y + 1
    }
}
