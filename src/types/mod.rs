pub mod constants;
pub mod error;
pub mod geometry;
pub mod info;

pub use constants::*;
pub use error::GridError;
pub use geometry::{Bounds, CellBounds};
pub use info::MapInfo;
