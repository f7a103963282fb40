// engine/benches/pipeline_bench.rs
#![forbid(unsafe_code)]

/**
 * Pipeline micro-benchmarks.
 *
 * Focus:
 * - Rasterization cost on a curvy silhouette (polygon clipping per cell)
 * - Full pipeline latency including platform planning and carving
 * - Document rendering
 */
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use silhouette_engine::engine::{Point, Polygon, Structure, StructureConfig};
use silhouette_engine::policy::ChamberPolicy;

/// A 24-gon approximating a circle; curvy enough that most cells are
/// partially covered.
fn blob_polygon() -> Polygon {
    let sides = 24usize;
    let radius = 5.0f64;
    let points = (0..sides)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / sides as f64;
            Point {
                x: radius + radius * angle.cos(),
                y: radius + radius * angle.sin(),
            }
        })
        .collect();
    Polygon::from_points(points).expect("valid blob")
}

fn bench_full_pipeline(c: &mut Criterion) {
    let config = StructureConfig {
        blocks_x: 40,
        ..StructureConfig::default()
    };

    c.bench_function("pipeline.from_polygon.blocks_x_40", |b| {
        b.iter_batched(
            || (blob_polygon(), config.clone()),
            |(shape, config)| {
                black_box(
                    Structure::from_polygon(&shape, &config, &mut ChamberPolicy)
                        .expect("valid configuration"),
                );
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_document_rendering(c: &mut Criterion) {
    let config = StructureConfig {
        blocks_x: 40,
        ..StructureConfig::default()
    };
    let structure = Structure::from_polygon(&blob_polygon(), &config, &mut ChamberPolicy)
        .expect("valid configuration");

    c.bench_function("serialize.level_document.blocks_x_40", |b| {
        b.iter(|| black_box(structure.to_level_document()));
    });
}

criterion_group!(pipeline_benches, bench_full_pipeline, bench_document_rendering);
criterion_main!(pipeline_benches);
