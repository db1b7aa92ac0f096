use super::*;
use crate::geom::{Coordinate, Location, PrecisionModel};
use crate::graph::{Edge, Label};

fn edge(pts: &[(f64, f64)]) -> Edge {
    Edge::new(
        pts.iter().map(|&p| Coordinate::from(p)).collect(),
        Label::line_for(0, Location::Interior),
    )
}

/// Horizontal and vertical zig-zag lines forming a grid of crossings.
fn grid() -> (Vec<Edge>, Vec<Edge>) {
    let horizontal = (0..4)
        .map(|i| {
            let y = i as f64 + 0.5;
            edge(&[(-1.0, y), (1.5, y + 0.1), (5.0, y)])
        })
        .collect();
    let vertical = (0..3)
        .map(|j| {
            let x = j as f64 + 0.25;
            edge(&[(x, -1.0), (x, 2.0), (x + 0.1, 6.0)])
        })
        .collect();
    (horizontal, vertical)
}

fn intersection_lists(edges: &[Edge]) -> Vec<Vec<(usize, Coordinate)>> {
    edges
        .iter()
        .map(|e| e.intersections().iter().map(|ei| (ei.segment_index, ei.coord)).collect())
        .collect()
}

#[test]
fn strategies_agree_on_cross_noding() {
    let mut results = Vec::new();
    for kind in IntersectorKind::ALL {
        let (mut a, mut b) = grid();
        let mut si = SegmentIntersector::new(PrecisionModel::Floating, true, true);
        let mut sets = EdgeSets::Pair(&mut a, &mut b);
        kind.build().compute_intersections(&mut sets, &mut si, false);
        assert_eq!(si.counts().proper_intersections, 12, "{}", kind.name());
        assert!(si.has_proper_interior_intersection());
        assert!(a.iter().chain(&b).all(|e| !e.is_isolated()));
        results.push((intersection_lists(&a), intersection_lists(&b)));
    }
    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);
    assert!(results[0].0.iter().all(|l| l.len() == 3));
    assert!(results[0].1.iter().all(|l| l.len() == 4));
}

#[test]
fn single_set_skips_same_edge_unless_asked() {
    for kind in IntersectorKind::ALL {
        // Self-crossing edge next to a disjoint one.
        let mut edges = vec![
            edge(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]),
            edge(&[(10.0, 0.0), (11.0, 0.0)]),
        ];
        let mut si = SegmentIntersector::new(PrecisionModel::Floating, true, false);
        kind.build()
            .compute_intersections(&mut EdgeSets::Single(&mut edges), &mut si, false);
        assert!(!si.has_intersection(), "{}", kind.name());
        kind.build()
            .compute_intersections(&mut EdgeSets::Single(&mut edges), &mut si, true);
        assert!(si.has_proper_intersection(), "{}", kind.name());
        assert_eq!(si.proper_intersection_point(), Some(Coordinate::new(1.0, 1.0)));
        // Isolation is only recorded when asked for.
        assert!(edges[0].is_isolated());
    }
}

#[test]
fn adjacent_segments_and_ring_closure_are_trivial() {
    let mut ring = vec![edge(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)])];
    let mut si = SegmentIntersector::new(PrecisionModel::Floating, true, false);
    AllPairsIntersector.compute_intersections(&mut EdgeSets::Single(&mut ring), &mut si, true);
    assert!(si.counts().intersections > 0);
    assert!(!si.has_intersection());
    assert!(ring[0].intersections().is_empty());
}

#[test]
fn crossing_at_boundary_node_is_not_proper_interior() {
    let mut a = vec![edge(&[(0.0, 0.0), (2.0, 2.0)])];
    let mut b = vec![edge(&[(0.0, 2.0), (2.0, 0.0)])];
    let mut si = SegmentIntersector::new(PrecisionModel::Floating, true, true);
    si.set_boundary_nodes(vec![Coordinate::new(1.0, 1.0)], Vec::new());
    AllPairsIntersector.compute_intersections(&mut EdgeSets::Pair(&mut a, &mut b), &mut si, false);
    assert!(si.has_proper_intersection());
    assert!(!si.has_proper_interior_intersection());
}

#[test]
fn proper_crossings_can_be_left_unrecorded() {
    let mut a = vec![edge(&[(0.0, 0.0), (2.0, 2.0)])];
    let mut b = vec![edge(&[(0.0, 2.0), (2.0, 0.0)]), edge(&[(2.0, 2.0), (3.0, 2.0)])];
    let mut si = SegmentIntersector::new(PrecisionModel::Floating, false, true);
    AllPairsIntersector.compute_intersections(&mut EdgeSets::Pair(&mut a, &mut b), &mut si, false);
    // Only the endpoint touch at (2, 2) is recorded.
    let recorded: Vec<Coordinate> = a[0].intersections().iter().map(|ei| ei.coord).collect();
    assert_eq!(recorded, vec![Coordinate::new(2.0, 2.0)]);
}

#[test]
fn validator_rejects_unnoded_edges() {
    let mut crossing = vec![edge(&[(0.0, 0.0), (2.0, 2.0)]), edge(&[(0.0, 2.0), (2.0, 0.0)])];
    let err = EdgeNodingValidator::check_valid(&mut crossing).unwrap_err();
    assert_eq!(err.location, Some(Coordinate::new(1.0, 1.0)));

    let mut noded = vec![
        edge(&[(0.0, 0.0), (1.0, 1.0)]),
        edge(&[(1.0, 1.0), (2.0, 2.0)]),
        edge(&[(0.0, 2.0), (1.0, 1.0)]),
        edge(&[(1.0, 1.0), (2.0, 0.0)]),
    ];
    assert!(EdgeNodingValidator::check_valid(&mut noded).is_ok());
}

#[test]
fn validator_sees_overlaps_within_one_edge() {
    // Adjacent segments that fold back over each other.
    let mut spike = vec![edge(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.0)])];
    let err = EdgeNodingValidator::check_valid(&mut spike).unwrap_err();
    assert!(err.location.is_some());

    let mut bent = vec![edge(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)])];
    assert!(EdgeNodingValidator::check_valid(&mut bent).is_ok());
}
