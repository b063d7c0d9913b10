use glam::DVec2;

use occupancy_merge::types::{FREE, OCCUPIED, UNKNOWN};
use occupancy_merge::{
    CropConfig, GridError, MapInfo, MergeConfig, OccupancyGrid, merge, merge_grids,
    reshape_and_crop,
};

fn frame(size: u32, origin: (f64, f64)) -> MapInfo {
    MapInfo::new(size, size, 1.0, DVec2::new(origin.0, origin.1))
}

#[rustfmt::skip]
fn grid_a() -> Vec<i8> {
    vec![
        -1, -1, -1,
         0, 100, 0,
        -1, -1, -1,
    ]
}

fn grid_b() -> Vec<i8> {
    vec![FREE; 9]
}

#[test]
fn overlapping_maps_keep_the_obstacle() {
    let a = grid_a();
    let b = grid_b();
    let frames = [frame(3, (0.0, 0.0)), frame(3, (1.0, 1.0))];

    let expected = vec![
        vec![FREE, OCCUPIED, FREE, FREE],
        vec![UNKNOWN, FREE, FREE, FREE],
        vec![UNKNOWN, FREE, FREE, FREE],
    ];

    let merged = merge(&[&a, &b], &frames, &MergeConfig::default()).expect("merge");
    assert_eq!(merged.origin(), DVec2::new(0.0, 1.0));
    assert_eq!(merged.resolution(), 1.0);
    assert_eq!(merged.grid().to_rows(), expected);

    let frames = [frames[1].clone(), frames[0].clone()];
    let merged = merge(&[&b, &a], &frames, &MergeConfig::default()).expect("merge");
    assert_eq!(merged.grid().to_rows(), expected);
}

#[test]
fn mismatched_inputs_are_rejected() {
    let a = grid_a();
    let err = merge(&[&a, &a], &[frame(3, (0.0, 0.0))], &MergeConfig::default()).unwrap_err();
    assert!(matches!(err, GridError::Arity { grids: 2, frames: 1 }));

    let err = reshape_and_crop(a, frame(4, (0.0, 0.0)), &CropConfig::default()).unwrap_err();
    assert!(matches!(err, GridError::Shape { expected: 16, actual: 9 }));
}

#[test]
fn crop_then_merge_stays_in_the_world_frame() {
    // Cropping moves the origin, so merging the crop lands on the same world cells.
    let info = MapInfo::new(3, 3, 1.0, DVec2::new(5.0, 5.0));
    let crop = CropConfig {
        enabled: true,
        padding: 0,
    };
    let cropped = reshape_and_crop(grid_a(), info.clone(), &crop).expect("crop");
    assert_eq!(cropped.info().origin, DVec2::new(5.0, 6.0));

    let full = OccupancyGrid::new(info, grid_a()).expect("grid");
    let from_crop = merge_grids(&[cropped], &MergeConfig::default()).expect("merge");
    let from_full = merge_grids(&[full], &MergeConfig::default()).expect("merge");
    assert_eq!(from_crop, from_full);
}
