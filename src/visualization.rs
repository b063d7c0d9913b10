use image::{Rgb, RgbImage};

use crate::OccupancyGrid;
use crate::types::{GridError, OCCUPIED, UNKNOWN};

/// RViz map background, used for unknown cells by default.
pub const DEFAULT_UNKNOWN_COLOR: Rgb<u8> = Rgb([0x60, 0x73, 0x72]);

/// Gradient stops over the normalised occupancy `[0, 1]`.
const GRADIENT: [(f32, [f32; 3]); 6] = [
    (0.00, [0.745, 0.757, 0.741]),
    (0.33, [0.745, 0.757, 0.741]),
    (0.56, [0.580, 0.580, 0.580]),
    (0.64, [0.000, 0.000, 0.000]),
    (0.77, [0.000, 0.000, 0.000]),
    (1.00, [0.000, 0.000, 0.000]),
];

const LUT_SIZE: usize = 256;

/// Render an occupancy grid to RGB.
///
/// Values are normalised over `[0, 100]` into a 256-entry table.
///
/// - **UNKNOWN** (-1) cells take `unknown_color`.
/// - Occupancy up to 33 stays light gray, fades through mid gray at 56 and
///   is black from 64 on.
///
/// Grid row 0 is written to the **bottom** of the image, matching the map
/// frame where y grows upwards.
pub fn render(grid: &OccupancyGrid, unknown_color: Rgb<u8>) -> RgbImage {
    let lut = gradient_lut();
    let width = grid.width();
    let height = grid.height();
    let mut img = RgbImage::new(width, height);

    for y_img in 0..height {
        let y_grid = height - 1 - y_img;
        for x in 0..width {
            let value = grid.get(x, y_grid).unwrap_or(UNKNOWN);
            let px = if value == UNKNOWN {
                unknown_color
            } else {
                Rgb(lut[lut_index(value)])
            };
            img.put_pixel(x, y_img, px);
        }
    }

    img
}

/// Parse a `#rrggbb` color string.
pub fn parse_hex_color(color: &str) -> Result<Rgb<u8>, GridError> {
    let invalid = || GridError::InvalidMetadata(format!("invalid color {color:?}, expected #rrggbb"));
    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let mut channels = [0u8; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).map_err(|_| invalid())?;
    }
    Ok(Rgb(channels))
}

fn lut_index(value: i8) -> usize {
    let t = (value as f32).clamp(0.0, OCCUPIED as f32) / OCCUPIED as f32;
    ((t * LUT_SIZE as f32) as usize).min(LUT_SIZE - 1)
}

/// Sample the gradient at `LUT_SIZE` evenly spaced points; channels truncate to bytes.
fn gradient_lut() -> [[u8; 3]; LUT_SIZE] {
    let mut lut = [[0u8; 3]; LUT_SIZE];
    for (i, entry) in lut.iter_mut().enumerate() {
        let x = i as f32 / (LUT_SIZE - 1) as f32;
        let rgb = sample_gradient(x);
        for (channel, c) in entry.iter_mut().zip(rgb) {
            *channel = (c * 255.0) as u8;
        }
    }
    lut
}

fn sample_gradient(x: f32) -> [f32; 3] {
    for pair in GRADIENT.windows(2) {
        let (x0, c0) = pair[0];
        let (x1, c1) = pair[1];
        if x <= x1 {
            let t = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0);
            return [
                c0[0] + (c1[0] - c0[0]) * t,
                c0[1] + (c1[1] - c0[1]) * t,
                c0[2] + (c1[2] - c0[2]) * t,
            ];
        }
    }
    GRADIENT[GRADIENT.len() - 1].1
}
