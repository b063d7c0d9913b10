use glam::UVec2;

use crate::types::{CellBounds, GridError, MapInfo, OCCUPIED, UNKNOWN};

/// Row-major occupancy grid: `-1` unknown, `0..=100` occupancy.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    info: MapInfo,
    data: Vec<i8>,
}

impl OccupancyGrid {
    pub fn new(info: MapInfo, data: Vec<i8>) -> Result<Self, GridError> {
        let expected = info.len();
        if data.len() != expected {
            return Err(GridError::Shape {
                expected,
                actual: data.len(),
            });
        }
        check_cell_values(&data)?;

        Ok(Self { info, data })
    }

    /// Grid of the given frame with every cell set to `value`.
    pub fn filled(info: MapInfo, value: i8) -> Self {
        let data = vec![value; info.len()];
        Self { info, data }
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> u32 {
        self.info.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<i8> {
        if x >= self.info.width || y >= self.info.height {
            return None;
        }
        let idx = self.index(x, y);
        Some(self.data[idx])
    }

    pub fn set(&mut self, x: u32, y: u32, value: i8) -> Result<(), GridError> {
        if x >= self.info.width || y >= self.info.height {
            return Err(GridError::OutOfBounds(format!(
                "cell ({x}, {y}) out of bounds for map {}x{}",
                self.info.width, self.info.height
            )));
        }
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Cells of row `y`, `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[i8]> {
        if y >= self.info.height {
            return None;
        }
        let start = self.index(0, y);
        Some(&self.data[start..start + self.info.width as usize])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i8]> {
        // chunks_exact panics on zero; a zero-width grid has no rows either way
        let width = (self.info.width as usize).max(1);
        self.data.chunks_exact(width).take(self.info.height as usize)
    }

    pub fn to_rows(&self) -> Vec<Vec<i8>> {
        self.rows().map(<[i8]>::to_vec).collect()
    }

    pub fn data(&self) -> &[i8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<i8> {
        self.data
    }

    /// Tightest window holding every known cell, `None` if all are unknown.
    pub fn known_bounds(&self) -> Option<CellBounds> {
        let mut bounds: Option<CellBounds> = None;
        for (y, row) in self.rows().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value == UNKNOWN {
                    continue;
                }
                let cell = UVec2::new(x as u32, y as u32);
                match bounds.as_mut() {
                    Some(b) => b.expand_to_include(cell),
                    None => bounds = Some(CellBounds::from_cell(cell)),
                }
            }
        }
        bounds
    }

    /// Copy of the inclusive `window`, with the origin moved onto its first cell.
    pub fn sub_grid(&self, window: CellBounds) -> Result<Self, GridError> {
        if window.max.x >= self.info.width || window.max.y >= self.info.height {
            return Err(GridError::OutOfBounds(format!(
                "window ({}, {})..=({}, {}) exceeds map {}x{}",
                window.min.x,
                window.min.y,
                window.max.x,
                window.max.y,
                self.info.width,
                self.info.height
            )));
        }

        let mut data = Vec::with_capacity((window.width() as usize) * (window.height() as usize));
        for y in window.min.y..=window.max.y {
            let start = self.index(window.min.x, y);
            let end = self.index(window.max.x, y) + 1;
            data.extend_from_slice(&self.data[start..end]);
        }

        let info = MapInfo {
            width: window.width(),
            height: window.height(),
            resolution: self.info.resolution,
            origin: self.info.map_to_world(window.min.x, window.min.y),
        };
        Ok(Self { info, data })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.info.width as usize) + (x as usize)
    }
}

/// Fails on the first cell outside `-1` and `0..=100`.
pub(crate) fn check_cell_values(data: &[i8]) -> Result<(), GridError> {
    match data
        .iter()
        .enumerate()
        .find(|(_, v)| **v != UNKNOWN && !(0..=OCCUPIED).contains(*v))
    {
        Some((index, &value)) => Err(GridError::CellValue { index, value }),
        None => Ok(()),
    }
}
