//! Processing parameters for cropping and merging.
//!
//! Every field has a default, so an empty YAML document is a valid config:
//!
//! ```yaml
//! crop:
//!   enabled: true
//!   padding: 30
//! merge:
//!   threshold: 70
//!   key_quantum: 1.0e-6
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::types::{DEFAULT_KEY_QUANTUM, DEFAULT_PADDING, DEFAULT_THRESHOLD, GridError, OCCUPIED};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub crop: CropConfig,
    pub merge: MergeConfig,
}

impl ProcessingConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GridError> {
        // serde_yaml reads an empty document as unit, not as an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}

/// Whether and how much to crop a reshaped grid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CropConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Cells kept around the known area.
    #[serde(default = "default_padding")]
    pub padding: u32,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            padding: DEFAULT_PADDING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MergeConfig {
    /// Cells strictly above this occupancy are obstacles.
    #[serde(
        default = "default_threshold",
        deserialize_with = "deserialize_threshold"
    )]
    pub threshold: i8,
    /// Lattice pitch (world units) under which two positions are the same cell.
    #[serde(
        default = "default_key_quantum",
        deserialize_with = "deserialize_key_quantum"
    )]
    pub key_quantum: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            key_quantum: DEFAULT_KEY_QUANTUM,
        }
    }
}

fn default_padding() -> u32 {
    DEFAULT_PADDING
}

fn default_threshold() -> i8 {
    DEFAULT_THRESHOLD
}

fn default_key_quantum() -> f64 {
    DEFAULT_KEY_QUANTUM
}

fn deserialize_threshold<'de, D>(deserializer: D) -> Result<i8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = i8::deserialize(deserializer)?;
    if (0..=OCCUPIED).contains(&value) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "threshold must be in the range [0, 100]",
        ))
    }
}

fn deserialize_key_quantum<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("key_quantum must be positive"))
    }
}
