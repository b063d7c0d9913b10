use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell count {actual} does not match declared size {expected}")]
    Shape { expected: usize, actual: usize },
    #[error("merge got {grids} grids but {frames} frames")]
    Arity { grids: usize, frames: usize },
    #[error("nothing to merge: no sources or no known cells")]
    EmptyInput,
    #[error("source {index} has a zero, negative or non-finite resolution")]
    Division { index: usize },
    #[error("cell {index} has value {value}, expected -1 or 0..=100")]
    CellValue { index: usize, value: i8 },
    #[error("merged grid of {width} x {height} cells exceeds the {limit} cell limit")]
    Extent { width: f64, height: f64, limit: u64 },
    #[error("out of bounds: {0}")]
    OutOfBounds(String),
    #[error("map not found: {0}")]
    MapNotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
}
