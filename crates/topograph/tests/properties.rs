//! Property tests for the overlay operations on random star polygons.
//!
//! Robustness failures (`OverlayError::Topology`) are legal outcomes of the
//! floating-point engine, so such cases are skipped rather than failed.

use proptest::prelude::*;
use topograph::prelude::*;
use topograph::rand::{draw_star_polygon, ReplayToken, StarCfg, VertexCount};

fn star(seed: u64, index: u64, center: (f64, f64)) -> Geometry {
    let cfg = StarCfg {
        vertex_count: VertexCount::Uniform { min: 5, max: 14 },
        center,
        ..StarCfg::default()
    };
    draw_star_polygon(cfg, ReplayToken { seed, index }).unwrap()
}

/// Run `op`, turning a topology failure into a rejected case.
fn run(a: &Geometry, b: &Geometry, op: OpCode) -> Result<Geometry, TestCaseError> {
    match overlay(a, b, op) {
        Ok(g) => Ok(g),
        Err(e) if e.is_topology() => Err(TestCaseError::reject(e.to_string())),
        Err(e) => Err(TestCaseError::fail(e.to_string())),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn inclusion_exclusion_holds(
        seed in any::<u64>(),
        dx in -1.5f64..1.5,
        dy in -1.5f64..1.5,
    ) {
        let a = star(seed, 0, (0.0, 0.0));
        let b = star(seed, 1, (dx, dy));
        let i = run(&a, &b, OpCode::Intersection)?;
        let u = run(&a, &b, OpCode::Union)?;
        prop_assert!(close(i.area() + u.area(), a.area() + b.area()));
        let d = run(&a, &b, OpCode::Difference)?;
        prop_assert!(close(d.area() + i.area(), a.area()));
        let s = run(&a, &b, OpCode::SymDifference)?;
        prop_assert!(close(s.area(), u.area() - i.area()));
    }

    #[test]
    fn union_and_intersection_commute(
        seed in any::<u64>(),
        dx in -1.0f64..1.0,
        dy in -1.0f64..1.0,
    ) {
        let a = star(seed, 2, (0.0, 0.0));
        let b = star(seed, 3, (dx, dy));
        for op in [OpCode::Intersection, OpCode::Union] {
            let ab = run(&a, &b, op)?;
            let ba = run(&b, &a, op)?;
            prop_assert!(close(ab.area(), ba.area()), "{} {} vs {}", op.name(), ab.area(), ba.area());
            prop_assert_eq!(ab.num_geometries(), ba.num_geometries());
        }
    }

    #[test]
    fn self_overlay_is_identity(seed in any::<u64>(), index in 0u64..1000) {
        let a = star(seed, index, (0.0, 0.0));
        let i = run(&a, &a, OpCode::Intersection)?;
        prop_assert_eq!(i.normalized(), a.normalized());
        let u = run(&a, &a, OpCode::Union)?;
        prop_assert_eq!(u.normalized(), a.normalized());
        prop_assert!(run(&a, &a, OpCode::Difference)?.is_empty());
    }

    #[test]
    fn results_stay_inside_the_union_envelope(
        seed in any::<u64>(),
        dx in -2.0f64..2.0,
    ) {
        let a = star(seed, 4, (0.0, 0.0));
        let b = star(seed, 5, (dx, 0.0));
        let mut env = a.envelope();
        env.expand_to_include_env(&b.envelope());
        for op in OpCode::ALL {
            let r = run(&a, &b, op)?;
            if !r.is_empty() {
                prop_assert!(env.contains(&r.envelope()), "{}", op.name());
            }
        }
    }
}
