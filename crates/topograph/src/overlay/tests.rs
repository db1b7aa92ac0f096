use super::*;
use crate::api::{difference, intersection, overlay, overlay_with, sym_difference, union};
use crate::geom::{Coordinate, Geometry, GeometryFactory};
use crate::noding::IntersectorKind;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry {
    Geometry::rect(x0, y0, x1, y1).unwrap()
}

fn square_a() -> Geometry {
    rect(0.0, 0.0, 2.0, 2.0)
}

fn square_b() -> Geometry {
    rect(1.0, 1.0, 3.0, 3.0)
}

fn hole_count(g: &Geometry) -> usize {
    match g {
        Geometry::Polygon(p) => p.holes().len(),
        Geometry::MultiPolygon(ps) => ps.iter().map(|p| p.holes().len()).sum(),
        _ => 0,
    }
}

#[test]
fn overlapping_squares_intersection() {
    let r = overlay(&square_a(), &square_b(), OpCode::Intersection).unwrap();
    assert_eq!(r.geometry_type(), "Polygon");
    assert!((r.area() - 1.0).abs() < 1e-12);
    assert_eq!(r.normalized(), rect(1.0, 1.0, 2.0, 2.0).normalized());
}

#[test]
fn overlapping_squares_union() {
    let r = overlay(&square_a(), &square_b(), OpCode::Union).unwrap();
    assert_eq!(r.geometry_type(), "Polygon");
    assert!((r.area() - 7.0).abs() < 1e-12);
    assert_eq!(r.num_points(), 9);
    let expected = Geometry::polygon(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 1.0),
        (3.0, 1.0),
        (3.0, 3.0),
        (1.0, 3.0),
        (1.0, 2.0),
        (0.0, 2.0),
    ])
    .unwrap();
    assert_eq!(r.normalized(), expected.normalized());
}

#[test]
fn overlapping_squares_difference_and_symdifference() {
    let d = overlay(&square_a(), &square_b(), OpCode::Difference).unwrap();
    assert_eq!(d.geometry_type(), "Polygon");
    assert!((d.area() - 3.0).abs() < 1e-12);
    assert_eq!(d.num_points(), 7);

    let s = overlay(&square_a(), &square_b(), OpCode::SymDifference).unwrap();
    assert_eq!(s.geometry_type(), "MultiPolygon");
    assert_eq!(s.num_geometries(), 2);
    assert!((s.area() - 6.0).abs() < 1e-12);
}

#[test]
fn result_shells_are_clockwise() {
    let r = overlay(&square_a(), &square_b(), OpCode::Union).unwrap();
    let Geometry::Polygon(p) = r else {
        panic!("expected a polygon, got {}", r.geometry_type());
    };
    assert!(!crate::algorithm::is_ccw(p.shell().coords()));
}

#[test]
fn all_strategies_give_the_same_result() {
    let results: Vec<Geometry> = IntersectorKind::ALL
        .iter()
        .map(|&strategy| {
            let cfg = OverlayCfg {
                strategy,
                validate_noding: true,
            };
            overlay_with(&square_a(), &square_b(), OpCode::Union, cfg, GeometryFactory::default())
                .unwrap()
                .0
                .normalized()
        })
        .collect();
    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);
}

#[test]
fn stats_count_crossings_and_components() {
    let (a, b) = (square_a(), square_b());
    let mut op = OverlayOp::new(&a, &b).unwrap();
    op.result_geometry(OpCode::Intersection).unwrap();
    let stats = op.stats();
    assert_eq!(stats.proper_intersections, 2);
    assert_eq!(stats.polygons, 1);
    assert_eq!(stats.lines + stats.points, 0);
    // Corner nodes of both rings plus the two crossings.
    assert_eq!(stats.nodes, 4);
}

#[test]
fn built_graph_keeps_node_and_sym_invariants() {
    let a = square_a();
    let b = square_b();
    let mut op = OverlayOp::new(&a, &b).unwrap();
    op.result_geometry(OpCode::Union).unwrap();
    let graph = op.graph();
    let coords: Vec<Coordinate> = graph.nodes().iter().map(|n| n.coordinate()).collect();
    for (i, c) in coords.iter().enumerate() {
        assert!(coords[i + 1..].iter().all(|d| !d.equals_2d(c)));
    }
    for (i, de) in graph.dir_edges().iter().enumerate() {
        let sym = graph.dir_edge(de.sym());
        assert_eq!(sym.sym().0, i);
        assert_eq!(sym.edge(), de.edge());
        assert_ne!(sym.is_forward(), de.is_forward());
    }
}

#[test]
fn line_crossing_polygon_is_clipped() {
    let poly = square_a();
    let line = Geometry::line(&[(1.0, 1.0), (3.0, 1.0)]).unwrap();
    let r = overlay(&line, &poly, OpCode::Intersection).unwrap();
    assert_eq!(r.dimension(), 1);
    assert_eq!(r, Geometry::line(&[(1.0, 1.0), (2.0, 1.0)]).unwrap());

    let outside = overlay(&line, &poly, OpCode::Difference).unwrap();
    assert_eq!(outside, Geometry::line(&[(2.0, 1.0), (3.0, 1.0)]).unwrap());
}

#[test]
fn line_touching_polygon_gives_a_point() {
    let line = Geometry::line(&[(2.0, 1.0), (3.0, 1.0)]).unwrap();
    let r = overlay(&line, &square_a(), OpCode::Intersection).unwrap();
    assert_eq!(r.dimension(), 0);
    assert_eq!(r, Geometry::point(2.0, 1.0));
}

#[test]
fn union_drops_covered_line_parts() {
    let line = Geometry::line(&[(1.0, 1.0), (3.0, 1.0)]).unwrap();
    let r = overlay(&line, &square_a(), OpCode::Union).unwrap();
    assert_eq!(r.geometry_type(), "GeometryCollection");
    assert_eq!(r.num_geometries(), 2);
    assert_eq!(r.geometry_n(0), Some(Geometry::line(&[(2.0, 1.0), (3.0, 1.0)]).unwrap()));
    assert!((r.area() - 4.0).abs() < 1e-12);
}

#[test]
fn crossing_lines() {
    let a = Geometry::line(&[(0.0, 0.0), (2.0, 2.0)]).unwrap();
    let b = Geometry::line(&[(0.0, 2.0), (2.0, 0.0)]).unwrap();
    assert_eq!(overlay(&a, &b, OpCode::Intersection).unwrap(), Geometry::point(1.0, 1.0));
    let u = overlay(&a, &b, OpCode::Union).unwrap();
    assert_eq!(u.geometry_type(), "MultiLineString");
    assert_eq!(u.num_geometries(), 4);
    assert!((u.length() - 4.0 * 2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn points_against_polygons() {
    let inside = Geometry::point(1.0, 1.0);
    let outside = Geometry::point(5.0, 5.0);
    assert_eq!(overlay(&inside, &square_a(), OpCode::Intersection).unwrap(), inside);
    let u = overlay(&inside, &square_a(), OpCode::Union).unwrap();
    assert_eq!(u.geometry_type(), "Polygon");
    let d = overlay(&inside, &square_a(), OpCode::Difference).unwrap();
    assert!(d.is_empty());
    assert_eq!(d.dimension(), 0);
    let u = overlay(&outside, &square_a(), OpCode::Union).unwrap();
    assert_eq!(u.geometry_type(), "GeometryCollection");
    assert_eq!(u.geometry_n(0), Some(outside));
}

#[test]
fn empty_results_follow_dimension_rule() {
    let poly = rect(0.0, 0.0, 1.0, 1.0);
    let line = Geometry::line(&[(5.0, 5.0), (6.0, 6.0)]).unwrap();
    let r = overlay(&poly, &line, OpCode::Intersection).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.dimension(), 1);
    let r = overlay(&line, &poly, OpCode::Difference).unwrap();
    assert!(!r.is_empty());
    let r = overlay(&poly, &poly, OpCode::Difference).unwrap();
    assert!(r.is_empty());
    assert_eq!(r.dimension(), 2);

    let u = overlay(&poly, &line, OpCode::Union).unwrap();
    assert_eq!(u.geometry_type(), "GeometryCollection");
    assert_eq!(u.dimension(), 2);
    assert_eq!(u.num_geometries(), 2);
}

#[test]
fn disjoint_inputs_short_circuit() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(5.0, 5.0, 6.0, 6.0);
    let i = intersection(&a, &b).unwrap();
    assert!(i.is_empty());
    assert_eq!(i.dimension(), 2);
    let u = union(&a, &b).unwrap();
    assert_eq!(u, GeometryFactory::default().build_geometry(vec![a.clone(), b.clone()]));
    assert_eq!(difference(&a, &b).unwrap(), a);
    assert_eq!(sym_difference(&a, &b).unwrap().num_geometries(), 2);

    // The full engine agrees up to ring orientation.
    let full = OverlayOp::new(&a, &b).unwrap().result_geometry(OpCode::Union).unwrap();
    assert_eq!(full.normalized(), u.normalized());
}

#[test]
fn every_entry_point_takes_the_same_short_circuit() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(5.0, 5.0, 6.0, 6.0);
    let empty = GeometryFactory::default().create_empty(2);
    let named: [fn(&Geometry, &Geometry) -> crate::error::Result<Geometry>; 4] =
        [intersection, union, difference, sym_difference];
    for (op, f) in OpCode::ALL.into_iter().zip(named) {
        for (x, y) in [(&a, &b), (&a, &empty), (&empty, &b)] {
            assert_eq!(overlay(x, y, op).unwrap(), f(x, y).unwrap(), "{}", op.name());
            let (g, stats) =
                overlay_with(x, y, op, OverlayCfg::default(), GeometryFactory::default()).unwrap();
            assert_eq!(g, f(x, y).unwrap(), "{}", op.name());
            assert_eq!(stats, OverlayStats::default());
        }
    }
    assert_eq!(overlay(&a, &b, OpCode::Difference).unwrap(), a);

    // Overlapping inputs still reach the engine.
    let cfg = OverlayCfg::default();
    let (_, stats) =
        overlay_with(&square_a(), &square_b(), OpCode::Union, cfg, GeometryFactory::default()).unwrap();
    assert_eq!(stats.proper_intersections, 2);
}

#[test]
fn empty_inputs_short_circuit() {
    let a = square_a();
    let empty = GeometryFactory::default().create_empty(1);
    assert_eq!(union(&a, &empty).unwrap(), a);
    assert_eq!(difference(&a, &empty).unwrap(), a);
    let d = difference(&empty, &a).unwrap();
    assert!(d.is_empty());
    assert_eq!(d.dimension(), 1);
    assert_eq!(intersection(&empty, &a).unwrap().dimension(), 1);
}

#[test]
fn self_overlay_identities() {
    let a = Geometry::polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (2.0, 1.0), (0.0, 3.0)]).unwrap();
    let i = overlay(&a, &a, OpCode::Intersection).unwrap();
    assert_eq!(i.normalized(), a.normalized());
    let u = overlay(&a, &a, OpCode::Union).unwrap();
    assert_eq!(u.normalized(), a.normalized());
    assert!(overlay(&a, &a, OpCode::Difference).unwrap().is_empty());
    assert!(overlay(&a, &a, OpCode::SymDifference).unwrap().is_empty());
}

#[test]
fn union_and_intersection_commute() {
    let a = square_a();
    let b = Geometry::polygon(&[(1.0, -1.0), (3.0, 1.0), (1.0, 3.0), (-1.0, 1.0)]).unwrap();
    for op in [OpCode::Union, OpCode::Intersection, OpCode::SymDifference] {
        let ab = overlay(&a, &b, op).unwrap();
        let ba = overlay(&b, &a, op).unwrap();
        assert_eq!(ab.normalized(), ba.normalized(), "{}", op.name());
    }
}

#[test]
fn sym_difference_is_union_of_differences() {
    let a = square_a();
    let b = square_b();
    let s = overlay(&a, &b, OpCode::SymDifference).unwrap();
    let ab = overlay(&a, &b, OpCode::Difference).unwrap();
    let ba = overlay(&b, &a, OpCode::Difference).unwrap();
    let u = overlay(&ab, &ba, OpCode::Union).unwrap();
    assert_eq!(s.normalized(), u.normalized());
}

#[test]
fn holes_are_placed_in_their_shells() {
    let outer = Geometry::polygon_with_holes(
        &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
        &[&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)]],
    )
    .unwrap();
    let r = overlay(&outer, &rect(1.0, 1.0, 5.0, 5.0), OpCode::Intersection).unwrap();
    assert_eq!(hole_count(&r), 1);
    assert!((r.area() - 12.0).abs() < 1e-12);

    let r = overlay(&rect(0.0, 0.0, 10.0, 10.0), &rect(2.0, 2.0, 4.0, 4.0), OpCode::Difference).unwrap();
    assert_eq!(hole_count(&r), 1);
    assert!((r.area() - 96.0).abs() < 1e-12);
}

#[test]
fn touching_holes_stay_separate() {
    let holes = Geometry::MultiPolygon(vec![
        match rect(1.0, 1.0, 3.0, 3.0) {
            Geometry::Polygon(p) => p,
            _ => unreachable!(),
        },
        match rect(3.0, 3.0, 5.0, 5.0) {
            Geometry::Polygon(p) => p,
            _ => unreachable!(),
        },
    ]);
    let r = overlay(&rect(0.0, 0.0, 6.0, 6.0), &holes, OpCode::Difference).unwrap();
    assert_eq!(r.geometry_type(), "Polygon");
    // One ring per hole, each closing on itself at the shared corner.
    assert_eq!(hole_count(&r), 2);
    assert!((r.area() - 28.0).abs() < 1e-12);
    if let Geometry::Polygon(p) = &r {
        assert!(p.holes().iter().all(|h| h.coords().len() == 5));
    }
}

#[test]
fn hole_touching_the_shell_is_split_off() {
    let notch = Geometry::polygon(&[(0.0, 2.0), (2.0, 1.0), (2.0, 3.0)]).unwrap();
    let r = overlay(&rect(0.0, 0.0, 4.0, 4.0), &notch, OpCode::Difference).unwrap();
    assert_eq!(r.geometry_type(), "Polygon");
    assert_eq!(hole_count(&r), 1);
    assert!((r.area() - 14.0).abs() < 1e-12);
    if let Geometry::Polygon(p) = &r {
        // The shell passes through the touch point at (0, 2).
        assert_eq!(p.shell().coords().len(), 6);
        assert_eq!(p.holes()[0].coords().len(), 4);
    }
}

#[test]
fn corner_touching_squares_stay_separate() {
    let r = overlay(&square_a(), &rect(2.0, 2.0, 4.0, 4.0), OpCode::Union).unwrap();
    assert_eq!(r.geometry_type(), "MultiPolygon");
    assert!((r.area() - 8.0).abs() < 1e-12);
}

#[test]
fn near_collinear_edges_do_not_break_labelling() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = Geometry::polygon(&[(3.0, -1e-10), (12.0, 1e-10), (12.0, 5.0), (3.0, 5.0)]).unwrap();
    for op in OpCode::ALL {
        assert!(overlay(&a, &b, op).is_ok(), "{}", op.name());
    }
    let i = overlay(&a, &b, OpCode::Intersection).unwrap();
    assert!((i.area() - 35.0).abs() < 1e-6);
}

#[test]
fn mixed_collections_are_rejected() {
    let gc = Geometry::GeometryCollection(vec![Geometry::point(0.0, 0.0), square_a()]);
    let err = OverlayOp::new(&gc, &square_b()).unwrap_err();
    assert!(!err.is_topology());
    assert!(union(&square_b(), &gc).is_err());
}

#[test]
fn op_codes_follow_the_location_table() {
    use crate::geom::Location::{Boundary, Exterior, Interior};
    assert!(OpCode::Intersection.is_result_of_op(Boundary, Interior));
    assert!(!OpCode::Intersection.is_result_of_op(Interior, Exterior));
    assert!(OpCode::Union.is_result_of_op(Exterior, Boundary));
    assert!(OpCode::Difference.is_result_of_op(Interior, Exterior));
    assert!(!OpCode::Difference.is_result_of_op(Interior, Boundary));
    assert!(OpCode::SymDifference.is_result_of_op(Exterior, Interior));
    assert!(!OpCode::SymDifference.is_result_of_op(Boundary, Interior));
    assert_eq!(OpCode::try_from(3).unwrap(), OpCode::Difference);
    assert!(OpCode::try_from(7).is_err());
}
