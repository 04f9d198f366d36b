//! Criterion benchmarks for the genetic tour search.
//!
//! Uses synthetic ring instances (points on a circle) so results are
//! comparable across sizes and the optimum is known by construction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_tsp::ga::{ClosestEdgeCrossover, CutpointCrossover, Engine, GaConfig};
use u_tsp::model::{Point, PointIndex};

fn ring_points(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = (i as f64) * std::f64::consts::TAU / (n as f64);
            Point::new(100.0 * angle.cos(), 100.0 * angle.sin())
        })
        .collect()
}

fn bench_index_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_index");
    for n in [50, 200, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let points = ring_points(n);
            b.iter(|| PointIndex::new(black_box(points.clone())).expect("non-empty"));
        });
    }
    group.finish();
}

fn bench_cutpoint_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("cutpoint_run");
    for n in [25, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let index = PointIndex::new(ring_points(n)).expect("non-empty");
            let config = GaConfig::default()
                .with_max_generations(200)
                .with_seed(42);
            b.iter(|| {
                let mut engine = Engine::new(CutpointCrossover::new(), config.clone())
                    .expect("valid config");
                engine
                    .initialize_population(50, &index)
                    .expect("valid input");
                black_box(engine.run(&index).expect("initialized"))
            });
        });
    }
    group.finish();
}

fn bench_closest_edge_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_edge_run");
    for n in [25, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let index = PointIndex::new(ring_points(n)).expect("non-empty");
            let config = GaConfig::default()
                .with_max_generations(200)
                .with_seed(42);
            b.iter(|| {
                let strategy = ClosestEdgeCrossover::from_config(&config);
                let mut engine =
                    Engine::new(strategy, config.clone()).expect("valid config");
                engine
                    .initialize_population(50, &index)
                    .expect("valid input");
                black_box(engine.run(&index).expect("initialized"))
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_index_construction,
    bench_cutpoint_run,
    bench_closest_edge_run
);
criterion_main!(benches);
