//! Extracts result points: labelled nodes with no incident result edge that
//! no result line or polygon covers.

use super::{is_covered, OpCode};
use crate::algorithm::PointLocator;
use crate::geom::{Geometry, GeometryFactory};
use crate::graph::{Node, PlanarGraph};

#[derive(Clone, Copy, Debug)]
pub struct PointBuilder {
    factory: GeometryFactory,
    locator: PointLocator,
}

impl PointBuilder {
    pub fn new(factory: GeometryFactory, locator: PointLocator) -> Self {
        Self { factory, locator }
    }

    /// Result points in coordinate order; must run after lines and polygons.
    pub fn build(
        &self,
        graph: &PlanarGraph,
        op: OpCode,
        result_lines: &[Geometry],
        result_polys: &[Geometry],
    ) -> Vec<Geometry> {
        graph
            .nodes()
            .iter()
            .filter(|n| !is_incident_edge_in_result(graph, n))
            // Nodes with edges only yield points for intersection.
            .filter(|n| n.star().degree() == 0 || op == OpCode::Intersection)
            .filter(|n| op.is_result_of_label(&n.label))
            .map(Node::coordinate)
            .filter(|c| {
                !is_covered(&self.locator, c, result_lines) && !is_covered(&self.locator, c, result_polys)
            })
            .map(|c| self.factory.create_point(c))
            .collect()
    }
}

fn is_incident_edge_in_result(graph: &PlanarGraph, node: &Node) -> bool {
    node.star()
        .edges()
        .iter()
        .any(|de| graph.edge(graph.dir_edge(*de).edge()).is_in_result())
}
