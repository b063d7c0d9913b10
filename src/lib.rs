pub mod config;
pub mod grid;
pub mod loaders;
pub mod types;
pub mod visualization;

pub use config::{CropConfig, MergeConfig, ProcessingConfig};
pub use grid::{MergedGrid, OccupancyGrid, merge, merge_grids, reshape_and_crop};
pub use loaders::{MapStore, MemoryMapStore, Ros2MapStore, load_occupancy_grid, merge_from_store};
pub use types::{GridError, MapInfo};
pub use visualization::render;
