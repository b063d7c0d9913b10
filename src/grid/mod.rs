pub mod crop;
pub mod merge;
pub mod occupancy;

pub use crop::reshape_and_crop;
pub use merge::{MergedGrid, WorldCell, merge, merge_grids};
pub use occupancy::OccupancyGrid;
