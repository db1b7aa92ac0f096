use super::*;
use crate::algorithm::{BoundaryNodeRule, LineIntersector};
use crate::geom::{Coordinate, Geometry, Location, PrecisionModel};
use crate::noding::IntersectorKind;

fn c(x: f64, y: f64) -> Coordinate {
    Coordinate::new(x, y)
}

fn line_edge(pts: &[(f64, f64)]) -> Edge {
    Edge::new(
        pts.iter().map(|&p| Coordinate::from(p)).collect(),
        Label::line_for(0, Location::Interior),
    )
}

#[test]
fn label_merge_fills_unknown_cells_and_widens_to_area() {
    let mut line = Label::line_for(0, Location::Interior);
    let area = Label::area_for(1, Location::Boundary, Location::Exterior, Location::Interior);
    line.merge(&area);
    assert_eq!(line.on(0), Location::Interior);
    assert!(line.is_area_for(1));
    assert_eq!(line.location(1, Position::Right), Location::Interior);
    assert_eq!(line.geometry_count(), 2);

    let mut flipped = area;
    flipped.flip();
    assert_eq!(flipped.location(1, Position::Left), Location::Interior);
    assert_eq!(flipped.to_string(), "A:--- B:ibe");

    let mut demoted = area;
    demoted.to_line(1);
    assert!(demoted.is_line(1));
    assert_eq!(demoted.location(1, Position::Left), Location::None);
    assert_eq!(area.to_line_label().on(1), Location::Boundary);
    assert!(area.to_line_label().is_line(1));
}

#[test]
fn intersections_on_end_vertex_move_to_next_segment() {
    let mut e = line_edge(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let mut li = LineIntersector::default();
    li.compute_intersection(&c(0.0, 0.0), &c(10.0, 0.0), &c(5.0, -5.0), &c(5.0, 5.0));
    e.add_intersections(&li, 0, 0);
    li.compute_intersection(&c(0.0, 0.0), &c(10.0, 0.0), &c(10.0, -5.0), &c(10.0, 5.0));
    e.add_intersections(&li, 0, 0);
    li.compute_intersection(&c(10.0, 0.0), &c(10.0, 10.0), &c(9.0, 0.0), &c(11.0, 0.0));
    e.add_intersections(&li, 1, 0);
    let eis: Vec<_> = e.intersections().iter().map(|ei| (ei.segment_index, ei.dist)).collect();
    assert_eq!(eis, vec![(0, 5.0), (1, 0.0)]);

    let mut pieces = Vec::new();
    e.add_split_edges(&mut pieces);
    let coords: Vec<Vec<Coordinate>> = pieces.iter().map(|p| p.coords().to_vec()).collect();
    assert_eq!(
        coords,
        vec![
            vec![c(0.0, 0.0), c(5.0, 0.0)],
            vec![c(5.0, 0.0), c(10.0, 0.0)],
            vec![c(10.0, 0.0), c(10.0, 10.0)],
        ]
    );
}

#[test]
fn edge_list_finds_reversed_duplicates() {
    let mut list = EdgeList::default();
    list.add(line_edge(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]));
    list.add(line_edge(&[(5.0, 5.0), (6.0, 6.0)]));
    let rev = line_edge(&[(2.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
    assert_eq!(list.find_equal_edge(&rev), Some(0));
    assert!(!list.get(0).is_pointwise_equal(&rev));
    assert!(list.get(0).equals_either_direction(&rev));
    assert_eq!(list.find_equal_edge(&line_edge(&[(0.0, 0.0), (1.0, 1.0)])), None);
}

#[test]
fn folded_area_edge_collapses_to_line() {
    let label = Label::area_for(0, Location::Boundary, Location::Exterior, Location::Interior);
    let e = Edge::new(vec![c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)], label);
    assert!(e.is_collapsed());
    let line = e.collapsed_edge();
    assert_eq!(line.coords(), &[c(0.0, 0.0), c(1.0, 0.0)]);
    assert!(line.label.is_line(0));
    assert_eq!(line.label.on(0), Location::Boundary);
}

#[test]
fn octants_run_counter_clockwise() {
    let dirs = [(1.0, 0.1), (0.1, 1.0), (-0.1, 1.0), (-1.0, 0.1), (-1.0, -0.1), (-0.1, -1.0), (0.1, -1.0), (1.0, -0.1)];
    let octs: Vec<u8> = dirs.iter().map(|&(dx, dy)| octant(dx, dy)).collect();
    assert_eq!(octs, vec![0, 1, 2, 3, 4, 5, 6, 7]);
}

fn spoke_graph() -> PlanarGraph {
    let mut g = PlanarGraph::new();
    let ends = [(0.0, -1.0), (-1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0)];
    g.add_edges(ends.iter().map(|&p| line_edge(&[(0.0, 0.0), p])));
    g
}

#[test]
fn star_orders_edges_counter_clockwise_from_positive_x() {
    let g = spoke_graph();
    let origin = g.nodes().find(&c(0.0, 0.0)).unwrap();
    let order: Vec<Coordinate> = g
        .node(origin)
        .star()
        .edges()
        .iter()
        .map(|id| g.dir_edge(*id).direction_pt())
        .collect();
    assert_eq!(
        order,
        vec![c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0), c(-1.0, 0.0), c(0.0, -1.0)]
    );
}

#[test]
fn nodes_are_unique_and_syms_are_mutual() {
    let g = spoke_graph();
    assert_eq!(g.nodes().len(), 6);
    let mut keys: Vec<(f64, f64)> = g.nodes().iter().map(|n| (n.coordinate().x, n.coordinate().y)).collect();
    keys.dedup();
    assert_eq!(keys.len(), 6);
    for (i, de) in g.dir_edges().iter().enumerate() {
        assert_eq!(g.dir_edge(de.sym()).sym(), DirEdgeId(i));
        assert_ne!(de.is_forward(), g.dir_edge(de.sym()).is_forward());
        assert_eq!(g.node(de.node()).coordinate(), de.coordinate());
    }
    assert_eq!(g.find_edge(&c(0.0, 0.0), &c(1.0, 1.0)), Some(EdgeId(2)));
    assert_eq!(g.find_edge(&c(1.0, 1.0), &c(0.0, 0.0)), None);
    assert_eq!(g.find_edge_in_same_direction(&c(1.0, 1.0), &c(0.0, 0.0)), Some(EdgeId(2)));
    assert_eq!(g.find_edge_end(EdgeId(2)), Some(DirEdgeId(4)));
}

#[test]
fn reversed_area_labels_are_flipped() {
    let mut g = PlanarGraph::new();
    let label = Label::area_for(0, Location::Boundary, Location::Exterior, Location::Interior);
    g.add_edges([Edge::new(vec![c(0.0, 0.0), c(1.0, 0.0)], label)]);
    let fwd = g.dir_edge(DirEdgeId(0));
    let rev = g.dir_edge(fwd.sym());
    let mut flipped = rev.label;
    flipped.flip();
    assert_eq!(flipped, fwd.label);
    assert_eq!(rev.label.location(0, Position::Left), Location::Interior);
}

#[test]
fn link_all_traces_triangle_faces() {
    let mut g = PlanarGraph::new();
    g.add_edges([
        line_edge(&[(0.0, 0.0), (1.0, 0.0)]),
        line_edge(&[(1.0, 0.0), (0.0, 1.0)]),
        line_edge(&[(0.0, 1.0), (0.0, 0.0)]),
    ]);
    g.link_all_directed_edges();
    for start in 0..g.dir_edges().len() {
        let mut cur = DirEdgeId(start);
        for _ in 0..3 {
            cur = g.dir_edge(cur).next().unwrap();
        }
        assert_eq!(cur, DirEdgeId(start));
    }
    // Forward edges circle the interior counter-clockwise.
    assert_eq!(g.dir_edge(DirEdgeId(0)).next(), Some(DirEdgeId(2)));
}

fn depth_star(delta_west: i32) -> PlanarGraph {
    let mut east = line_edge(&[(0.0, 0.0), (1.0, 0.0)]);
    east.set_depth_delta(-1);
    let mut west = line_edge(&[(0.0, 0.0), (-1.0, 0.0)]);
    west.set_depth_delta(delta_west);
    let mut g = PlanarGraph::new();
    g.add_edges([east, west]);
    g
}

#[test]
fn depths_propagate_around_a_star() {
    let mut g = depth_star(1);
    g.dir_edge_mut(DirEdgeId(0))
        .set_edge_depths(Position::Right, 1, -1)
        .unwrap();
    assert_eq!(g.dir_edge(DirEdgeId(0)).depth(Position::Left), 0);
    g.compute_depths(DirEdgeId(0)).unwrap();
    let west = g.dir_edge(DirEdgeId(2));
    assert_eq!(west.depth(Position::Right), 0);
    assert_eq!(west.depth(Position::Left), 1);
    let err = g
        .dir_edge_mut(DirEdgeId(0))
        .set_depth(Position::Left, 5)
        .unwrap_err();
    assert_eq!(err.message, "assigned depths do not match");
}

#[test]
fn inconsistent_depth_deltas_are_reported() {
    let mut g = depth_star(-1);
    g.dir_edge_mut(DirEdgeId(0))
        .set_edge_depths(Position::Right, 1, -1)
        .unwrap();
    let err = g.compute_depths(DirEdgeId(0)).unwrap_err();
    assert_eq!(err.message, "depth mismatch");
}

#[test]
fn polygon_ring_is_labelled_by_orientation() {
    let sq = Geometry::rect(0.0, 0.0, 2.0, 2.0).unwrap();
    let gg = GeometryGraph::new(0, &sq, BoundaryNodeRule::Mod2);
    let e = &gg.graph().edges()[0];
    // Counter-clockwise shell: interior on the left.
    assert_eq!(e.label.location(0, Position::Left), Location::Interior);
    assert_eq!(e.label.location(0, Position::Right), Location::Exterior);
    assert!(gg.is_boundary_node(&c(0.0, 0.0)));
    assert!(!gg.has_too_few_points());

    let sliver = Geometry::polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0)]).unwrap();
    let gg = GeometryGraph::new(1, &sliver, BoundaryNodeRule::Mod2);
    assert!(gg.has_too_few_points());
    assert!(gg.graph().edges().is_empty());
}

#[test]
fn line_ends_follow_boundary_rule() {
    let Geometry::LineString(a) = Geometry::line(&[(0.0, 0.0), (1.0, 0.0)]).unwrap() else {
        unreachable!()
    };
    let Geometry::LineString(b) = Geometry::line(&[(1.0, 0.0), (1.0, 1.0)]).unwrap() else {
        unreachable!()
    };
    let ml = Geometry::MultiLineString(vec![a, b]);
    let mod2 = GeometryGraph::new(0, &ml, BoundaryNodeRule::Mod2);
    assert!(mod2.is_boundary_node(&c(0.0, 0.0)));
    assert!(!mod2.is_boundary_node(&c(1.0, 0.0)));
    assert_eq!(mod2.boundary_nodes().len(), 2);
    let endpoint = GeometryGraph::new(0, &ml, BoundaryNodeRule::EndPoint);
    assert!(endpoint.is_boundary_node(&c(1.0, 0.0)));
}

#[test]
fn self_noding_splits_a_bow_tie_line() {
    let bow = Geometry::line(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]).unwrap();
    for kind in IntersectorKind::ALL {
        let mut gg = GeometryGraph::new(0, &bow, BoundaryNodeRule::Mod2);
        let counts = gg.compute_self_nodes(PrecisionModel::Floating, kind, false);
        assert_eq!(counts.proper_intersections, 1, "{kind:?}");
        let node = gg.graph().nodes().find(&c(1.0, 1.0)).expect("crossing node");
        assert_eq!(gg.graph().node(node).label.on(0), Location::Interior);
        let mut pieces = Vec::new();
        gg.compute_split_edges(&mut pieces);
        assert_eq!(pieces.len(), 3, "{kind:?}");
    }
}
