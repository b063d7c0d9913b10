use std::path::Path;

use glam::DVec2;
use image::{Rgb, RgbImage};

use occupancy_merge::types::{FREE, OCCUPIED, UNKNOWN};
use occupancy_merge::visualization::DEFAULT_UNKNOWN_COLOR;
use occupancy_merge::{
    GridError, MapStore, MergeConfig, Ros2MapStore, load_occupancy_grid, merge_from_store, render,
};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

/// Writes `<name>.png` and `<name>.yaml`; `rows` are image rows, top first.
fn write_map(dir: &Path, name: &str, rows: &[&[Rgb<u8>]], resolution: f64, origin: (f64, f64)) {
    let height = rows.len() as u32;
    let width = rows[0].len() as u32;
    let mut img = RgbImage::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, px) in row.iter().enumerate() {
            img.put_pixel(x as u32, y as u32, *px);
        }
    }
    img.save(dir.join(format!("{name}.png"))).expect("write png");

    let yaml = format!(
        "image: {name}.png\nresolution: {resolution}\norigin: [{}, {}, 0.0]\noccupied_thresh: 0.65\nfree_thresh: 0.196\nnegate: 0\n",
        origin.0, origin.1
    );
    std::fs::write(dir.join(format!("{name}.yaml")), yaml).expect("write yaml");
}

#[test]
fn loads_trinary_ros2_map() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_map(
        dir.path(),
        "office",
        &[&[BLACK, WHITE, GRAY], &[WHITE, WHITE, BLACK]],
        0.5,
        (-1.0, 2.0),
    );

    let grid = load_occupancy_grid(dir.path().join("office.yaml")).expect("grid should load");

    assert_eq!(grid.width(), 3);
    assert_eq!(grid.height(), 2);
    assert_eq!(grid.info().resolution, 0.5);
    assert_eq!(grid.info().origin, DVec2::new(-1.0, 2.0));

    // Bottom image row is grid row 0.
    assert_eq!(grid.to_rows(), vec![vec![FREE, FREE, OCCUPIED], vec![OCCUPIED, FREE, UNKNOWN]]);
}

#[test]
fn store_loads_by_name_and_merges() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_map(dir.path(), "west", &[&[WHITE, BLACK]], 1.0, (0.0, 0.0));
    write_map(dir.path(), "east", &[&[WHITE, WHITE]], 1.0, (1.0, 0.0));

    let store = Ros2MapStore::new(dir.path());
    assert!(matches!(store.load("north"), Err(GridError::MapNotFound(_))));

    let merged = merge_from_store(&store, &["west", "east"], &MergeConfig::default())
        .expect("merge should succeed");
    assert_eq!(merged.grid().data(), &[FREE, OCCUPIED, FREE]);
    assert_eq!(merged.origin(), DVec2::ZERO);

    let img = render(merged.grid(), DEFAULT_UNKNOWN_COLOR);
    assert_eq!(img.dimensions(), (3, 1));
    assert_eq!(*img.get_pixel(1, 0), BLACK);
}

#[test]
fn rejects_inverted_thresholds() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_map(dir.path(), "bad", &[&[WHITE]], 1.0, (0.0, 0.0));
    std::fs::write(
        dir.path().join("bad.yaml"),
        "image: bad.png\nresolution: 1.0\norigin: [0, 0, 0]\noccupied_thresh: 0.1\nfree_thresh: 0.5\n",
    )
    .expect("write yaml");

    let err = load_occupancy_grid(dir.path().join("bad.yaml")).unwrap_err();
    assert!(matches!(err, GridError::InvalidMetadata(_)));
}
