//! Reshaping flat occupancy data and trimming unscanned borders.

use log::debug;

use super::OccupancyGrid;
use crate::config::CropConfig;
use crate::types::{GridError, MapInfo};

/// Reshape `cells` into the grid described by `info`, optionally cropping it
/// to the known area plus `crop.padding` cells.
///
/// The declared shape is `info.height x info.width`; a cell count that does
/// not match fails with [`GridError::Shape`].
pub fn reshape_and_crop(
    cells: Vec<i8>,
    info: MapInfo,
    crop: &CropConfig,
) -> Result<OccupancyGrid, GridError> {
    let grid = OccupancyGrid::new(info, cells)?;
    if !crop.enabled {
        return Ok(grid);
    }
    grid.cropped(crop.padding)
}

impl OccupancyGrid {
    /// Trim the grid to its known cells plus `padding`, clamped to the grid.
    ///
    /// A grid with no known cell is returned as is. The returned grid keeps
    /// its world alignment: its origin moves to the first kept cell.
    pub fn cropped(&self, padding: u32) -> Result<OccupancyGrid, GridError> {
        let Some(known) = self.known_bounds() else {
            debug!(
                "no known cells in {}x{} grid, skipping crop",
                self.width(),
                self.height()
            );
            return Ok(self.clone());
        };

        let window = known.padded(padding, self.width(), self.height());
        debug!(
            "cropping {}x{} grid to ({}, {})..=({}, {})",
            self.width(),
            self.height(),
            window.min.x,
            window.min.y,
            window.max.x,
            window.max.y
        );
        self.sub_grid(window)
    }
}
