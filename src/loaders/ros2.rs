//! Loader for ROS2 `map_server` maps: a YAML metadata file next to an image.

use std::path::{Path, PathBuf};

use glam::DVec2;
use image::GenericImageView;
use log::debug;
use serde::Deserialize;

use crate::grid::OccupancyGrid;
use crate::types::{
    DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH, FREE, GridError, MapInfo, OCCUPIED, UNKNOWN,
};

#[derive(Debug, Deserialize)]
struct RosMapMetadata {
    image: String,
    resolution: f64,
    /// x, y, yaw; the yaw is not applied.
    origin: [f64; 3],
    #[serde(
        default = "default_occupied_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    occupied_thresh: f32,
    #[serde(
        default = "default_free_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    free_thresh: f32,
    #[serde(default = "default_negate")]
    negate: Negate,
    #[serde(default = "default_map_mode")]
    mode: MapMode,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Negate {
    Bool(bool),
    Int(i32),
}

impl Negate {
    fn is_negated(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
        }
    }
}

fn default_negate() -> Negate {
    Negate::Bool(false)
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MapMode {
    Trinary,
    Scale,
    Raw,
}

fn default_map_mode() -> MapMode {
    MapMode::Trinary
}

fn default_occupied_thresh() -> f32 {
    DEFAULT_OCCUPIED_THRESH
}

fn default_free_thresh() -> f32 {
    DEFAULT_FREE_THRESH
}

fn deserialize_threshold<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "thresholds must be in the range [0.0, 1.0]",
        ))
    }
}

/// Load a map from its YAML metadata file.
///
/// Image row 0 (the top of the picture) becomes the last grid row, so grid
/// row 0 lies at the map origin.
pub fn load_occupancy_grid(yaml_path: impl AsRef<Path>) -> Result<OccupancyGrid, GridError> {
    let yaml_path = yaml_path.as_ref();
    let yaml_str = std::fs::read_to_string(yaml_path)?;
    let metadata: RosMapMetadata = serde_yaml::from_str(&yaml_str)?;

    if matches!(metadata.mode, MapMode::Trinary | MapMode::Scale)
        && metadata.occupied_thresh <= metadata.free_thresh
    {
        return Err(GridError::InvalidMetadata(
            "occupied_thresh must be greater than free_thresh".to_string(),
        ));
    }
    if !(metadata.resolution.is_finite() && metadata.resolution > 0.0) {
        return Err(GridError::InvalidMetadata(format!(
            "resolution must be positive, got {}",
            metadata.resolution
        )));
    }

    let negate = metadata.negate.is_negated();
    let image_path = resolve_image_path(yaml_path, &metadata.image);
    let image = image::open(&image_path)?;
    let (width, height) = image.dimensions();
    let rgba = image.to_rgba8();

    let mut data = vec![UNKNOWN; (width as usize) * (height as usize)];

    for y in 0..height {
        for x in 0..width {
            let value = pixel_occupancy(rgba.get_pixel(x, y).0, &metadata, negate);
            let grid_y = height - y - 1;
            let idx = (grid_y as usize) * (width as usize) + (x as usize);
            data[idx] = value;
        }
    }

    let info = MapInfo {
        width,
        height,
        resolution: metadata.resolution,
        origin: DVec2::new(metadata.origin[0], metadata.origin[1]),
    };
    debug!(
        "loaded {}x{} map from {} at resolution {}",
        width,
        height,
        image_path.display(),
        info.resolution
    );

    OccupancyGrid::new(info, data)
}

/// Occupancy of one RGBA pixel, following the ROS2 map server: dark pixels
/// are occupied unless the map is negated.
fn pixel_occupancy(pixel: [u8; 4], metadata: &RosMapMetadata, negate: bool) -> i8 {
    let [r, g, b, a] = pixel;
    let average = (r as u16 + g as u16 + b as u16) / 3;

    if let MapMode::Raw = metadata.mode {
        return if average <= OCCUPIED as u16 {
            average as i8
        } else {
            UNKNOWN
        };
    }

    let shade = average as f32 / 255.0;
    let occupancy = if negate { shade } else { 1.0 - shade };

    if matches!(metadata.mode, MapMode::Scale) && a < u8::MAX {
        return UNKNOWN;
    }

    if occupancy > metadata.occupied_thresh {
        OCCUPIED
    } else if occupancy < metadata.free_thresh {
        FREE
    } else if let MapMode::Trinary = metadata.mode {
        UNKNOWN
    } else {
        let ratio = (occupancy - metadata.free_thresh)
            / (metadata.occupied_thresh - metadata.free_thresh);
        (ratio * 100.0).round().clamp(0.0, 100.0) as i8
    }
}

fn resolve_image_path(yaml_path: &Path, image_ref: &str) -> PathBuf {
    let image_path = PathBuf::from(image_ref);
    if image_path.is_absolute() {
        return image_path;
    }

    match yaml_path.parent() {
        Some(parent) => parent.join(image_path),
        None => image_path,
    }
}
