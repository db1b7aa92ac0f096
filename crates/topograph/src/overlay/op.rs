//! The overlay driver: nodes both inputs, merges their edges into one
//! labelled graph and extracts the result of a set operation.

use tracing::debug;

use super::{LineBuilder, OpCode, OverlayCfg, OverlayStats, PointBuilder, PolygonBuilder};
use crate::algorithm::{BoundaryNodeRule, PointLocator};
use crate::error::{OverlayError, Result};
use crate::geom::{Geometry, GeometryFactory};
use crate::graph::{Edge, EdgeList, GeometryGraph, PlanarGraph, Position};
use crate::noding::EdgeNodingValidator;

/// One overlay of two geometries.
///
/// Each call to `result_geometry` rebuilds the graph from the inputs; after a
/// successful call, `graph()` and `stats()` describe that run.
#[derive(Clone, Debug)]
pub struct OverlayOp<'a> {
    args: [&'a Geometry; 2],
    factory: GeometryFactory,
    cfg: OverlayCfg,
    rule: BoundaryNodeRule,
    graph: PlanarGraph,
    stats: OverlayStats,
}

impl<'a> OverlayOp<'a> {
    /// Rejects `GeometryCollection` arguments that mix dimensions.
    pub fn new(g0: &'a Geometry, g1: &'a Geometry) -> Result<Self> {
        check_not_mixed_collection(g0)?;
        check_not_mixed_collection(g1)?;
        Ok(Self {
            args: [g0, g1],
            factory: GeometryFactory::default(),
            cfg: OverlayCfg::default(),
            rule: BoundaryNodeRule::default(),
            graph: PlanarGraph::new(),
            stats: OverlayStats::default(),
        })
    }

    pub fn with_factory(mut self, factory: GeometryFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn with_config(mut self, cfg: OverlayCfg) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn with_boundary_rule(mut self, rule: BoundaryNodeRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn arg(&self, i: usize) -> &'a Geometry {
        self.args[i]
    }

    pub fn graph(&self) -> &PlanarGraph {
        &self.graph
    }

    pub fn stats(&self) -> OverlayStats {
        self.stats
    }

    /// Run the overlay for `op`.
    pub fn result_geometry(&mut self, op: OpCode) -> Result<Geometry> {
        self.graph = PlanarGraph::new();
        self.stats = OverlayStats::default();
        let edges = self.node_and_merge_edges()?;
        self.stats.edges = edges.len();

        self.graph.add_edges(edges);
        self.graph.compute_labelling(self.args)?;
        self.label_incomplete_nodes();
        self.stats.nodes = self.graph.nodes().len();
        debug!(op = op.name(), nodes = self.stats.nodes, "graph labelled");

        self.find_result_area_edges(op);
        self.cancel_duplicate_result_edges();

        let locator = PointLocator::new(self.rule);
        let mut polygon_builder = PolygonBuilder::new(self.factory);
        polygon_builder.add(&mut self.graph)?;
        let polys = polygon_builder.polygons()?;
        let lines = LineBuilder::new(self.factory, locator).build(&mut self.graph, op, &polys)?;
        let points = PointBuilder::new(self.factory, locator).build(&self.graph, op, &lines, &polys);
        self.stats.polygons = polys.len();
        self.stats.lines = lines.len();
        self.stats.points = points.len();
        debug!(
            op = op.name(),
            polygons = polys.len(),
            lines = lines.len(),
            points = points.len(),
            "result extracted"
        );
        Ok(self.compute_geometry(points, lines, polys, op))
    }

    /// Self-node and cross-node both inputs, then merge coincident split edges.
    fn node_and_merge_edges(&mut self) -> Result<Vec<Edge>> {
        let precision = self.factory.precision;
        let strategy = self.cfg.strategy;
        let mut g0 = GeometryGraph::new(0, self.args[0], self.rule);
        let mut g1 = GeometryGraph::new(1, self.args[1], self.rule);
        self.copy_points(&g0, 0);
        self.copy_points(&g1, 1);

        let mut counts = g0.compute_self_nodes(precision, strategy, false);
        counts += g1.compute_self_nodes(precision, strategy, false);
        let si = g0.compute_edge_intersections(&mut g1, precision, strategy, true);
        counts += si.counts();
        self.stats.tests = counts.tests;
        self.stats.intersections = counts.intersections;
        self.stats.proper_intersections = counts.proper_intersections;
        debug!(
            strategy = strategy.name(),
            tests = counts.tests,
            intersections = counts.intersections,
            proper = counts.proper_intersections,
            "inputs noded"
        );

        let mut split = Vec::new();
        g0.compute_split_edges(&mut split);
        g1.compute_split_edges(&mut split);
        let mut edge_list = EdgeList::default();
        for e in split {
            insert_unique_edge(&mut edge_list, e);
        }
        compute_labels_from_depths(&mut edge_list);
        let mut edges: Vec<Edge> = edge_list
            .into_edges()
            .into_iter()
            .map(|e| if e.is_collapsed() { e.collapsed_edge() } else { e })
            .collect();
        debug!(edges = edges.len(), "split edges merged");

        if self.cfg.validate_noding {
            EdgeNodingValidator::check_valid(&mut edges)?;
        }
        Ok(edges)
    }

    /// Input nodes (points, ring starts, line ends) keep their own location.
    fn copy_points(&mut self, gg: &GeometryGraph<'_>, arg: usize) {
        for node in gg.graph().nodes().iter() {
            let id = self.graph.add_node(node.coordinate());
            self.graph.nodes.get_mut(id).label.set_on(arg, node.label.on(arg));
        }
    }

    /// Nodes known to one input only are located in the other directly.
    fn label_incomplete_nodes(&mut self) {
        let locator = PointLocator::new(self.rule);
        let graph = &mut self.graph;
        for node in &mut graph.nodes.nodes {
            if node.is_isolated() {
                let target = if node.label.is_null(0) { 0 } else { 1 };
                let loc = locator.locate(&node.coordinate(), self.args[target]);
                node.label.set_on(target, loc);
            }
            let label = node.label;
            node.star.update_labelling(&mut graph.dir_edges, &label);
        }
    }

    fn find_result_area_edges(&mut self, op: OpCode) {
        for de in &mut self.graph.dir_edges {
            let label = de.label;
            if label.is_area()
                && !de.is_interior_area_edge()
                && op.is_result_of_op(
                    label.location(0, Position::Right),
                    label.location(1, Position::Right),
                )
            {
                de.set_in_result(true);
            }
        }
    }

    /// An edge in the result in both directions bounds a zero-width sliver.
    fn cancel_duplicate_result_edges(&mut self) {
        let des = &mut self.graph.dir_edges;
        for i in 0..des.len() {
            let sym = des[i].sym().0;
            if des[i].is_in_result() && des[sym].is_in_result() {
                des[i].set_in_result(false);
                des[sym].set_in_result(false);
            }
        }
    }

    fn compute_geometry(
        &self,
        points: Vec<Geometry>,
        lines: Vec<Geometry>,
        polys: Vec<Geometry>,
        op: OpCode,
    ) -> Geometry {
        let mut parts = points;
        parts.extend(lines);
        parts.extend(polys);
        if parts.is_empty() {
            return self
                .factory
                .create_empty(op.result_dimension(self.args[0], self.args[1]));
        }
        self.factory.build_geometry(parts)
    }
}

/// Merge `e` into an equal edge already in `list`, accumulating side depths.
fn insert_unique_edge(list: &mut EdgeList, e: Edge) {
    let Some(i) = list.find_equal_edge(&e) else {
        list.add(e);
        return;
    };
    let existing = list.get_mut(i);
    let mut to_merge = e.label;
    if !existing.is_pointwise_equal(&e) {
        to_merge.flip();
    }
    let existing_label = existing.label;
    let depth = existing.depth_mut();
    if depth.is_null() {
        depth.add_label(&existing_label);
    }
    depth.add_label(&to_merge);
    existing.label.merge(&to_merge);
}

/// Merged edges whose side depths cancel become lines; the others take their
/// side locations from the depths.
fn compute_labels_from_depths(list: &mut EdgeList) {
    for e in list.iter_mut() {
        if e.depth().is_null() {
            continue;
        }
        e.depth_mut().normalize();
        let depth = *e.depth();
        for g in 0..2 {
            if e.label.is_null(g) || !e.label.is_area() || depth.is_null_geom(g) {
                continue;
            }
            if depth.delta(g) == 0 {
                e.label.to_line(g);
            } else {
                for pos in Position::SIDES {
                    e.label.set_location(g, pos, depth.location(g, pos));
                }
            }
        }
    }
}

pub(crate) fn check_not_mixed_collection(g: &Geometry) -> Result<()> {
    if let Geometry::GeometryCollection(members) = g {
        let mut dims = members.iter().filter(|m| !m.is_empty()).map(Geometry::dimension);
        if let Some(first) = dims.next() {
            if dims.any(|d| d != first) {
                return Err(OverlayError::invalid(
                    "overlay does not support mixed-dimension GeometryCollection arguments",
                ));
            }
        }
    }
    Ok(())
}
