//! Name-addressed map stores.
//!
//! Maps are resolved lazily: nothing is read until [`MapStore::load`] is called.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::trace;

use super::ros2::load_occupancy_grid;
use crate::config::MergeConfig;
use crate::grid::{MergedGrid, OccupancyGrid, merge_grids};
use crate::types::GridError;

/// Resolves a map name to a grid and its frame.
pub trait MapStore {
    fn load(&self, name: &str) -> Result<OccupancyGrid, GridError>;
}

/// Directory of ROS2 maps, `<root>/<name>.yaml` plus the image it references.
#[derive(Debug, Clone)]
pub struct Ros2MapStore {
    root: PathBuf,
}

impl Ros2MapStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn yaml_path(&self, name: &str) -> Option<PathBuf> {
        let valid = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        valid.then(|| self.root.join(format!("{name}.yaml")))
    }
}

impl MapStore for Ros2MapStore {
    fn load(&self, name: &str) -> Result<OccupancyGrid, GridError> {
        let path = self
            .yaml_path(name)
            .filter(|path| path.is_file())
            .ok_or_else(|| GridError::MapNotFound(name.to_string()))?;
        trace!("loading map {name} from {}", path.display());
        load_occupancy_grid(path)
    }
}

/// Maps held in memory, mostly for tests and callers that decode maps themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryMapStore {
    maps: HashMap<String, OccupancyGrid>,
}

impl MemoryMapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `grid` under `name`, returning the map it replaced.
    pub fn insert(&mut self, name: impl Into<String>, grid: OccupancyGrid) -> Option<OccupancyGrid> {
        self.maps.insert(name.into(), grid)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl MapStore for MemoryMapStore {
    fn load(&self, name: &str) -> Result<OccupancyGrid, GridError> {
        trace!("looking up map {name} in memory");
        self.maps
            .get(name)
            .cloned()
            .ok_or_else(|| GridError::MapNotFound(name.to_string()))
    }
}

/// Load `names` from `store` in order and merge them.
pub fn merge_from_store<S: MapStore + ?Sized>(
    store: &S,
    names: &[&str],
    config: &MergeConfig,
) -> Result<MergedGrid, GridError> {
    let grids = names
        .iter()
        .map(|name| store.load(name))
        .collect::<Result<Vec<_>, _>>()?;
    merge_grids(&grids, config)
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::types::{FREE, MapInfo, OCCUPIED};

    fn grid(origin_x: f64, value: i8) -> OccupancyGrid {
        let info = MapInfo::new(1, 1, 1.0, DVec2::new(origin_x, 0.0));
        OccupancyGrid::new(info, vec![value]).unwrap()
    }

    #[test]
    fn memory_store_round_trips_and_reports_missing() {
        let mut store = MemoryMapStore::new();
        assert!(store.is_empty());
        assert!(store.insert("kitchen", grid(0.0, FREE)).is_none());
        assert!(store.insert("kitchen", grid(1.0, FREE)).is_some());
        assert_eq!(store.len(), 1);

        assert_eq!(store.load("kitchen").unwrap().info().origin.x, 1.0);
        assert!(matches!(store.load("hall"), Err(GridError::MapNotFound(name)) if name == "hall"));
    }

    #[test]
    fn merge_from_store_keeps_name_order() {
        let mut store = MemoryMapStore::new();
        store.insert("a", grid(0.0, OCCUPIED));
        store.insert("b", grid(1.0, FREE));

        let merged = merge_from_store(&store, &["b", "a"], &MergeConfig::default()).unwrap();
        assert_eq!(merged.grid().data(), &[OCCUPIED, FREE]);

        let err = merge_from_store(&store, &["a", "missing"], &MergeConfig::default());
        assert!(matches!(err, Err(GridError::MapNotFound(_))));
    }

    #[test]
    fn directory_store_rejects_path_like_names() {
        let store = Ros2MapStore::new("/nonexistent");
        for name in ["", "..", "../etc/passwd", "a/b", "missing"] {
            assert!(matches!(store.load(name), Err(GridError::MapNotFound(_))));
        }
    }
}
