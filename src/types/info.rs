//! Map metadata.

use glam::DVec2;

/// Frame of a grid: its size in cells and how cells map to world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MapInfo {
    pub width: u32,
    pub height: u32,
    /// World units (meters) per cell edge.
    pub resolution: f64,
    /// Origin of cell (0, 0) in world coordinates (meters).
    pub origin: DVec2,
}

impl Default for MapInfo {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            resolution: 0.05,
            origin: DVec2::ZERO,
        }
    }
}

impl MapInfo {
    pub fn new(width: u32, height: u32, resolution: f64, origin: DVec2) -> Self {
        Self {
            width,
            height,
            resolution,
            origin,
        }
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of the map in world units (meters).
    #[inline]
    pub fn world_width(&self) -> f64 {
        self.width as f64 * self.resolution
    }

    /// Height of the map in world units (meters).
    #[inline]
    pub fn world_height(&self) -> f64 {
        self.height as f64 * self.resolution
    }

    /// World position of cell `(col, row)`'s reference corner.
    #[inline]
    pub fn map_to_world(&self, col: u32, row: u32) -> DVec2 {
        DVec2::new(
            col as f64 * self.resolution + self.origin.x,
            row as f64 * self.resolution + self.origin.y,
        )
    }

    /// Continuous map coordinates of a world position, `None` outside the grid.
    pub fn world_to_map(&self, pos: DVec2) -> Option<DVec2> {
        let mx = (pos.x - self.origin.x) / self.resolution;
        let my = (pos.y - self.origin.y) / self.resolution;
        if mx < 0.0 || my < 0.0 || mx >= self.width as f64 || my >= self.height as f64 {
            return None;
        }
        Some(DVec2::new(mx, my))
    }

    /// True when both origin coordinates are finite.
    #[inline]
    pub fn has_valid_origin(&self) -> bool {
        self.origin.is_finite()
    }

    /// True when the resolution is a usable cell pitch (finite and positive).
    #[inline]
    pub fn has_valid_resolution(&self) -> bool {
        self.resolution.is_finite() && self.resolution > 0.0
    }
}
