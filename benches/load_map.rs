use criterion::{Criterion, criterion_group, criterion_main};
use image::{GrayImage, Luma};

fn bench_load_map(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let img = GrayImage::from_fn(512, 512, |x, y| {
        if (x / 16 + y / 16) % 2 == 0 {
            Luma([254])
        } else {
            Luma([0])
        }
    });
    img.save(dir.path().join("checker.png")).expect("write png");
    let yaml_path = dir.path().join("checker.yaml");
    std::fs::write(
        &yaml_path,
        "image: checker.png\nresolution: 0.05\norigin: [0.0, 0.0, 0.0]\n",
    )
    .expect("write yaml");

    c.bench_function("load_ros2_checker_map", |b| {
        b.iter(|| {
            let _grid = occupancy_merge::load_occupancy_grid(&yaml_path)
                .expect("checker map should load");
        });
    });
}

criterion_group!(benches, bench_load_map);
criterion_main!(benches);
