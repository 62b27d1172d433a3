use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drone_coverage::coverage::compute_snapshots;
use drone_coverage::drone::Drone;
use drone_coverage::geo::Point2;
use drone_coverage::graph::TimeExpandedGraph;
use drone_coverage::terrain::Terrain;

/// Deterministic rolling terrain so runs are comparable across machines.
fn rolling_terrain(size: usize) -> Terrain {
    let rows = (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    let fx = x as f64 / 6.0;
                    let fy = y as f64 / 9.0;
                    40.0 * (fx.sin() + fy.cos()) + 80.0
                })
                .collect()
        })
        .collect();
    Terrain::new(rows).unwrap()
}

fn patrol() -> Vec<Drone> {
    vec![
        Drone::new(Point2::new(1.0, 1.0), Point2::new(28.0, 25.0), 0.0, 1.0),
        Drone::new(Point2::new(30.0, 2.0), Point2::new(3.0, 27.0), 4.0, 1.0),
    ]
}

fn coverage_benchmark(c: &mut Criterion) {
    let terrain = rolling_terrain(32);
    let drones = patrol();

    c.bench_function("compute_snapshots", |b| {
        b.iter(|| {
            compute_snapshots(black_box(&terrain), black_box(&drones), 1.0, None).unwrap()
        })
    });

    let snapshots = compute_snapshots(&terrain, &drones, 1.0, None).unwrap();
    c.bench_function("build_graph", |b| {
        b.iter(|| TimeExpandedGraph::build(black_box(&terrain), black_box(&snapshots)))
    });
}

criterion_group!(benches, coverage_benchmark);
criterion_main!(benches);
