pub mod ros2;
pub mod store;

pub use ros2::load_occupancy_grid;
pub use store::{MapStore, MemoryMapStore, Ros2MapStore, merge_from_store};
