//! Graph of a single input geometry, before it is merged into an overlay graph.
//!
//! Polygon rings become area edges labelled with the interior on the correct
//! side; line strings become line edges whose end points are counted towards
//! the boundary under the configured rule; points become isolated nodes.

use std::collections::HashMap;

use tracing::debug;

use super::{Edge, Label, PlanarGraph};
use crate::algorithm::{is_ccw, BoundaryNodeRule};
use crate::geom::{CoordKey, Coordinate, Geometry, Location, Polygon, PrecisionModel};
use crate::noding::{EdgeSets, IntersectorKind, NodingCounts, SegmentIntersector};

fn remove_repeated_points(coords: &[Coordinate]) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(coords.len());
    for c in coords {
        if out.last().map_or(true, |last| !last.equals_2d(c)) {
            out.push(*c);
        }
    }
    out
}

#[derive(Clone, Debug)]
pub struct GeometryGraph<'a> {
    arg_index: usize,
    parent: &'a Geometry,
    pub(crate) graph: PlanarGraph,
    rule: BoundaryNodeRule,
    use_boundary_rule: bool,
    boundary_counts: HashMap<CoordKey, usize>,
    invalid_point: Option<Coordinate>,
}

impl<'a> GeometryGraph<'a> {
    pub fn new(arg_index: usize, parent: &'a Geometry, rule: BoundaryNodeRule) -> Self {
        let mut gg = Self {
            arg_index,
            parent,
            graph: PlanarGraph::new(),
            rule,
            use_boundary_rule: true,
            boundary_counts: HashMap::new(),
            invalid_point: None,
        };
        gg.add(parent);
        debug!(
            arg = arg_index,
            kind = parent.geometry_type(),
            edges = gg.graph.edges.len(),
            nodes = gg.graph.nodes.len(),
            "geometry graph built"
        );
        gg
    }

    pub fn geometry(&self) -> &'a Geometry {
        self.parent
    }

    pub fn graph(&self) -> &PlanarGraph {
        &self.graph
    }

    pub fn boundary_node_rule(&self) -> BoundaryNodeRule {
        self.rule
    }

    /// A ring or line collapsed below its minimum size after removing repeated points.
    pub fn has_too_few_points(&self) -> bool {
        self.invalid_point.is_some()
    }

    pub fn invalid_point(&self) -> Option<Coordinate> {
        self.invalid_point
    }

    pub fn boundary_nodes(&self) -> Vec<Coordinate> {
        self.graph
            .nodes
            .boundary_nodes(self.arg_index)
            .map(|n| n.coordinate())
            .collect()
    }

    pub fn is_boundary_node(&self, coord: &Coordinate) -> bool {
        self.graph.is_boundary_node(self.arg_index, coord)
    }

    fn add(&mut self, g: &Geometry) {
        if g.is_empty() {
            return;
        }
        match g {
            Geometry::Point(p) => {
                if let Some(c) = p.coord {
                    self.insert_point(c, Location::Interior);
                }
            }
            Geometry::LineString(l) => self.add_line_string(l.coords()),
            Geometry::LinearRing(r) => self.add_line_string(r.coords()),
            Geometry::Polygon(p) => self.add_polygon(p),
            Geometry::MultiPoint(pts) => {
                for c in pts.iter().filter_map(|p| p.coord) {
                    self.insert_point(c, Location::Interior);
                }
            }
            Geometry::MultiLineString(ls) => {
                for l in ls {
                    self.add_line_string(l.coords());
                }
            }
            Geometry::MultiPolygon(ps) => {
                // Touching polygons share boundary points without turning them interior.
                self.use_boundary_rule = false;
                for p in ps {
                    self.add_polygon(p);
                }
            }
            Geometry::GeometryCollection(gs) => {
                for child in gs {
                    self.add(child);
                }
            }
        }
    }

    fn add_polygon(&mut self, p: &Polygon) {
        if p.is_empty() {
            return;
        }
        self.add_polygon_ring(p.shell().coords(), Location::Exterior, Location::Interior);
        for hole in p.holes() {
            self.add_polygon_ring(hole.coords(), Location::Interior, Location::Exterior);
        }
    }

    /// `cw_left`/`cw_right` are the side locations if the ring were clockwise.
    fn add_polygon_ring(&mut self, ring: &[Coordinate], cw_left: Location, cw_right: Location) {
        if ring.is_empty() {
            return;
        }
        let coords = remove_repeated_points(ring);
        if coords.len() < 4 {
            self.invalid_point = Some(coords[0]);
            return;
        }
        let (left, right) = if is_ccw(&coords) {
            (cw_right, cw_left)
        } else {
            (cw_left, cw_right)
        };
        let start = coords[0];
        let label = Label::area_for(self.arg_index, Location::Boundary, left, right);
        self.graph.insert_edge(Edge::new(coords, label));
        self.insert_point(start, Location::Boundary);
    }

    fn add_line_string(&mut self, line: &[Coordinate]) {
        let coords = remove_repeated_points(line);
        if coords.len() < 2 {
            self.invalid_point = coords.first().copied();
            return;
        }
        let (first, last) = (coords[0], coords[coords.len() - 1]);
        self.graph
            .insert_edge(Edge::new(coords, Label::line_for(self.arg_index, Location::Interior)));
        self.insert_boundary_point(first);
        self.insert_boundary_point(last);
    }

    fn insert_point(&mut self, coord: Coordinate, loc: Location) {
        let id = self.graph.add_node(coord);
        self.graph.nodes.get_mut(id).label.set_on(self.arg_index, loc);
    }

    /// Count one more line end at `coord` and relabel it under the boundary rule.
    fn insert_boundary_point(&mut self, coord: Coordinate) {
        let id = self.graph.add_node(coord);
        let label = &mut self.graph.nodes.get_mut(id).label;
        let was_boundary = label.on(self.arg_index) == Location::Boundary;
        let count = self
            .boundary_counts
            .entry(coord.key())
            .or_insert(usize::from(was_boundary));
        *count += 1;
        let loc = if self.rule.is_in_boundary(*count) {
            Location::Boundary
        } else {
            Location::Interior
        };
        label.set_on(self.arg_index, loc);
    }

    fn add_self_intersection_nodes(&mut self) {
        let found: Vec<(Coordinate, Location)> = self
            .graph
            .edges
            .iter()
            .flat_map(|e| {
                let loc = e.label.on(self.arg_index);
                e.intersections().iter().map(move |ei| (ei.coord, loc))
            })
            .collect();
        for (coord, loc) in found {
            if self.is_boundary_node(&coord) {
                continue;
            }
            if loc == Location::Boundary && self.use_boundary_rule {
                self.insert_boundary_point(coord);
            } else {
                self.insert_point(coord, loc);
            }
        }
    }

    /// Node the geometry against itself.
    ///
    /// Rings of areal inputs are assumed simple, so only distinct edges are
    /// tested unless `compute_ring_self_nodes` is set.
    pub fn compute_self_nodes(
        &mut self,
        precision: PrecisionModel,
        kind: IntersectorKind,
        compute_ring_self_nodes: bool,
    ) -> NodingCounts {
        let mut si = SegmentIntersector::new(precision, true, false);
        let is_rings = matches!(
            self.parent,
            Geometry::LinearRing(_) | Geometry::Polygon(_) | Geometry::MultiPolygon(_)
        );
        let test_all = compute_ring_self_nodes || !is_rings;
        let mut sets = EdgeSets::Single(&mut self.graph.edges);
        kind.build().compute_intersections(&mut sets, &mut si, test_all);
        self.add_self_intersection_nodes();
        si.counts()
    }

    /// Node this geometry's edges against `other`'s.
    pub fn compute_edge_intersections(
        &mut self,
        other: &mut GeometryGraph<'_>,
        precision: PrecisionModel,
        kind: IntersectorKind,
        include_proper: bool,
    ) -> SegmentIntersector {
        let mut si = SegmentIntersector::new(precision, include_proper, true);
        si.set_boundary_nodes(self.boundary_nodes(), other.boundary_nodes());
        let mut sets = EdgeSets::Pair(&mut self.graph.edges, &mut other.graph.edges);
        kind.build().compute_intersections(&mut sets, &mut si, false);
        si
    }

    /// Split every edge at its recorded intersections.
    pub fn compute_split_edges(&mut self, out: &mut Vec<Edge>) {
        for e in &mut self.graph.edges {
            e.add_split_edges(out);
        }
    }
}
