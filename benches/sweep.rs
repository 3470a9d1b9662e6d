use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use light_sweep::{LightResistor, LightSource, LightingAlgorithm, Point2, SweepLightAlgorithm, SweepOptions};

/// 以光源为中心排成网格的方块遮挡体。
fn grid_scene(per_side: usize) -> SweepLightAlgorithm {
    let mut algorithm = SweepLightAlgorithm::new();
    let spacing = 40.0;
    let offset = spacing * per_side as f64 / 2.0;
    for i in 0..per_side {
        for j in 0..per_side {
            let x = i as f64 * spacing - offset + 5.0;
            let y = j as f64 * spacing - offset + 5.0;
            let resistor = LightResistor::from_vertices([
                Point2::new(x, y),
                Point2::new(x + 12.0, y),
                Point2::new(x + 12.0, y + 12.0),
                Point2::new(x, y + 12.0),
            ]);
            algorithm
                .add_resistor(resistor)
                .expect("网格遮挡体的坐标应当都是有限值");
        }
    }
    algorithm
}

fn bench_grid(c: &mut Criterion) {
    let light = LightSource::new(1.0, 2.0, 300.0);
    let mut group = c.benchmark_group("visibility_grid");
    for per_side in [2, 4, 8] {
        let algorithm = grid_scene(per_side);
        group.bench_with_input(BenchmarkId::from_parameter(per_side), &algorithm, |b, algorithm| {
            b.iter(|| algorithm.compute_visibility_polygon(black_box(&light)))
        });
    }
    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let light = LightSource::new(1.0, 2.0, 300.0);
    let mut group = c.benchmark_group("visibility_parts");
    for parts in [32, 128, 512] {
        let mut algorithm = grid_scene(4);
        algorithm
            .set_parts_num(parts)
            .expect("采样段数应当为正");
        group.bench_with_input(BenchmarkId::from_parameter(parts), &algorithm, |b, algorithm| {
            b.iter(|| algorithm.compute_visibility_polygon(black_box(&light)))
        });
    }
    group.finish();
}

fn bench_empty(c: &mut Criterion) {
    let options = SweepOptions::default();
    let light = LightSource::new(0.0, 0.0, 100.0);
    let resistors: Vec<LightResistor> = Vec::new();
    c.bench_function("visibility_empty", |b| {
        b.iter(|| light_sweep::compute_visibility(black_box(resistors.as_slice()), &light, &options))
    });
}

criterion_group!(benches, bench_grid, bench_resolution, bench_empty);
criterion_main!(benches);
