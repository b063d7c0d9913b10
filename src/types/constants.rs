pub const UNKNOWN: i8 = -1;
pub const FREE: i8 = 0;
pub const OCCUPIED: i8 = 100;

/// Occupancy above which a merged cell counts as an obstacle.
pub const DEFAULT_THRESHOLD: i8 = 70;
/// Cells of margin kept around the known area when cropping.
pub const DEFAULT_PADDING: u32 = 30;
/// Lattice pitch (world units) used to key world coordinates while merging.
pub const DEFAULT_KEY_QUANTUM: f64 = 1e-6;
/// Largest merged grid `merge` will allocate, in cells.
pub const MAX_MERGED_CELLS: u64 = 1 << 30;

pub const DEFAULT_OCCUPIED_THRESH: f32 = 0.65;
pub const DEFAULT_FREE_THRESH: f32 = 0.196;
