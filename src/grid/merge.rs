//! Merging occupancy grids that live in different frames into one grid.
//!
//! Every known cell of every source is projected to world coordinates and
//! keyed on a fine lattice (`MergeConfig::key_quantum`). Obstacles always win
//! over free observations; among free observations the first source wins.
//! The key set is then rasterized with the resolution of the last source.
//!
//! **Assumption:** sources share one resolution. Mixed resolutions still
//! produce a grid, but the last source's pitch is used for all of them.

use std::collections::HashMap;

use glam::DVec2;
use log::{debug, warn};

use super::OccupancyGrid;
use super::occupancy::check_cell_values;
use crate::config::MergeConfig;
use crate::types::{Bounds, FREE, GridError, MAX_MERGED_CELLS, MapInfo, OCCUPIED, UNKNOWN};

/// Largest lattice coordinate that still fits a `WorldCell` component.
const MAX_KEY_MAGNITUDE: f64 = i64::MAX as f64;

/// A world position snapped onto the merge lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldCell {
    pub x: i64,
    pub y: i64,
}

impl WorldCell {
    /// Snap `pos` onto a lattice of pitch `quantum`.
    ///
    /// `pos / quantum` must be finite and within `i64` range; larger values
    /// saturate. `merge` rejects frames that would reach that range.
    pub fn from_world(pos: DVec2, quantum: f64) -> Self {
        Self {
            x: (pos.x / quantum).round_ties_even() as i64,
            y: (pos.y / quantum).round_ties_even() as i64,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Observation {
    /// First exact world position seen for the key.
    position: DVec2,
    occupied: bool,
}

/// Result of [`merge`]: the merged grid plus a few counts about the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedGrid {
    grid: OccupancyGrid,
    observed_cells: usize,
    obstacle_cells: usize,
}

impl MergedGrid {
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn into_grid(self) -> OccupancyGrid {
        self.grid
    }

    pub fn info(&self) -> &MapInfo {
        self.grid.info()
    }

    pub fn origin(&self) -> DVec2 {
        self.grid.info().origin
    }

    pub fn resolution(&self) -> f64 {
        self.grid.info().resolution
    }

    /// Distinct world cells seen by at least one source.
    pub fn observed_cells(&self) -> usize {
        self.observed_cells
    }

    /// Distinct world cells marked as obstacles.
    pub fn obstacle_cells(&self) -> usize {
        self.obstacle_cells
    }
}

/// Merge flat grids `grids[k]`, each laid out as described by `frames[k]`.
///
/// Sources are processed in order. A cell above `config.threshold` marks its
/// world position as an obstacle, overwriting anything seen before; a cell at
/// or below it marks the position free only if nothing was seen there yet.
/// Unknown cells (`-1`) are ignored entirely.
///
/// The output uses the last source's resolution, has its origin at the
/// minimum observed world position and holds only `-1`, `0` and `100`.
pub fn merge(
    grids: &[&[i8]],
    frames: &[MapInfo],
    config: &MergeConfig,
) -> Result<MergedGrid, GridError> {
    validate(grids, frames, config)?;

    let mut occupied: HashMap<WorldCell, Observation> = HashMap::new();
    let mut bounds = Bounds::empty();

    for (cells, frame) in grids.iter().zip(frames) {
        let width = frame.width as usize;
        for j in 0..frame.height {
            for i in 0..frame.width {
                let value = cells[i as usize + j as usize * width];
                if value == UNKNOWN {
                    continue;
                }

                let position = frame.map_to_world(i, j);
                bounds.expand_to_include(position);

                let key = WorldCell::from_world(position, config.key_quantum);
                if value > config.threshold {
                    occupied
                        .entry(key)
                        .and_modify(|obs| obs.occupied = true)
                        .or_insert(Observation {
                            position,
                            occupied: true,
                        });
                } else {
                    occupied.entry(key).or_insert(Observation {
                        position,
                        occupied: false,
                    });
                }
            }
        }
    }

    if bounds.is_empty() {
        return Err(GridError::EmptyInput);
    }

    // validate() guarantees at least one frame
    let resolution = frames[frames.len() - 1].resolution;
    if frames.iter().any(|f| f.resolution != resolution) {
        warn!(
            "merging {} maps with differing resolutions, rasterizing at {}",
            frames.len(),
            resolution
        );
    }

    let (width, height) = grid_size(bounds.extent(), resolution)?;
    let info = MapInfo {
        width,
        height,
        resolution,
        origin: bounds.min,
    };
    let mut grid = OccupancyGrid::filled(info, UNKNOWN);

    let mut obstacle_cells = 0;
    for obs in occupied.values() {
        let offset = obs.position - bounds.min;
        let col = cell_offset(offset.x, resolution);
        let row = cell_offset(offset.y, resolution);
        if obs.occupied {
            obstacle_cells += 1;
            grid.set(col, row, OCCUPIED)?;
        } else if grid.get(col, row) != Some(OCCUPIED) {
            grid.set(col, row, FREE)?;
        }
    }

    debug!(
        "merged {} maps into {}x{} grid at ({}, {}): {} world cells, {} obstacles",
        frames.len(),
        grid.width(),
        grid.height(),
        bounds.min.x,
        bounds.min.y,
        occupied.len(),
        obstacle_cells
    );

    Ok(MergedGrid {
        grid,
        observed_cells: occupied.len(),
        obstacle_cells,
    })
}

/// Merge grids that already carry their frames.
pub fn merge_grids(
    grids: &[OccupancyGrid],
    config: &MergeConfig,
) -> Result<MergedGrid, GridError> {
    let cells: Vec<&[i8]> = grids.iter().map(OccupancyGrid::data).collect();
    let frames: Vec<MapInfo> = grids.iter().map(|g| g.info().clone()).collect();
    merge(&cells, &frames, config)
}

fn validate(grids: &[&[i8]], frames: &[MapInfo], config: &MergeConfig) -> Result<(), GridError> {
    if grids.len() != frames.len() {
        return Err(GridError::Arity {
            grids: grids.len(),
            frames: frames.len(),
        });
    }
    if grids.is_empty() {
        return Err(GridError::EmptyInput);
    }
    if !(config.key_quantum.is_finite() && config.key_quantum > 0.0) {
        return Err(GridError::InvalidMetadata(format!(
            "key_quantum must be positive, got {}",
            config.key_quantum
        )));
    }
    for (index, (cells, frame)) in grids.iter().zip(frames).enumerate() {
        if !frame.has_valid_resolution() {
            return Err(GridError::Division { index });
        }
        if !frame.has_valid_origin() {
            return Err(GridError::InvalidMetadata(format!(
                "source {index} has a non-finite origin ({}, {})",
                frame.origin.x, frame.origin.y
            )));
        }
        if cells.len() != frame.len() {
            return Err(GridError::Shape {
                expected: frame.len(),
                actual: cells.len(),
            });
        }
        check_cell_values(cells)?;

        let far_corner = frame.map_to_world(
            frame.width.saturating_sub(1),
            frame.height.saturating_sub(1),
        );
        let reach = frame.origin.abs().max(far_corner.abs()).max_element() / config.key_quantum;
        if reach >= MAX_KEY_MAGNITUDE {
            return Err(GridError::InvalidMetadata(format!(
                "source {index} reaches coordinates too large to key at quantum {}",
                config.key_quantum
            )));
        }
    }
    Ok(())
}

/// Cells needed to cover `extent` (both edges included), within `MAX_MERGED_CELLS`.
fn grid_size(extent: DVec2, resolution: f64) -> Result<(u32, u32), GridError> {
    let width = (extent.x.abs() / resolution).round_ties_even() + 1.0;
    let height = (extent.y.abs() / resolution).round_ties_even() + 1.0;
    let too_large = || GridError::Extent {
        width,
        height,
        limit: MAX_MERGED_CELLS,
    };
    if width * height > MAX_MERGED_CELLS as f64 {
        return Err(too_large());
    }
    let width = u32::try_from(width as u64).map_err(|_| too_large())?;
    let height = u32::try_from(height as u64).map_err(|_| too_large())?;
    Ok((width, height))
}

/// Whole cells covering `distance`, rounded half to even.
///
/// Only called for offsets inside a size accepted by `grid_size`.
fn cell_offset(distance: f64, resolution: f64) -> u32 {
    (distance.abs() / resolution).round_ties_even() as u32
}
