//! Criterion microbenches for the overlay engine (group "overlay").
//!
//! - Full union/intersection of two overlapping star polygons per noding strategy.
//! - Vertex counts 16 and 128 to show the all-pairs vs. chain/sweep crossover.
//!
//! Inputs are drawn once from fixed replay tokens so runs are comparable.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use topograph::prelude::*;
use topograph::rand::{draw_star_polygon, ReplayToken, StarCfg, VertexCount};

fn pair(n: usize) -> (Geometry, Geometry) {
    let cfg = StarCfg {
        vertex_count: VertexCount::Fixed(n),
        ..StarCfg::default()
    };
    let a = draw_star_polygon(cfg, ReplayToken { seed: 11, index: 0 }).unwrap();
    let b = draw_star_polygon(
        StarCfg {
            center: (0.6, 0.3),
            ..cfg
        },
        ReplayToken { seed: 11, index: 1 },
    )
    .unwrap();
    (a, b)
}

fn bench_overlay(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay");
    for n in [16usize, 128] {
        let (a, b) = pair(n);
        group.throughput(Throughput::Elements((2 * n) as u64));
        for strategy in IntersectorKind::ALL {
            let cfg = OverlayCfg {
                strategy,
                validate_noding: false,
            };
            for op in [OpCode::Union, OpCode::Intersection] {
                let id = BenchmarkId::new(format!("{}/{}", op.name(), strategy.name()), n);
                group.bench_with_input(id, &(&a, &b), |bch, (a, b)| {
                    bch.iter(|| {
                        let _ = overlay_with(a, b, op, cfg, GeometryFactory::default());
                    })
                });
            }
        }
    }
    group.finish();
}

criterion_group!(benches, bench_overlay);
criterion_main!(benches);
