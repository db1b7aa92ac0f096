//! Extracts result lines: line edges in the result that no result polygon
//! covers, plus area-boundary edges shared by both inputs (intersection only).

use super::{is_covered, OpCode};
use crate::algorithm::PointLocator;
use crate::error::Result;
use crate::geom::{Geometry, GeometryFactory};
use crate::graph::{DirEdgeId, EdgeId, PlanarGraph};

#[derive(Clone, Copy, Debug)]
pub struct LineBuilder {
    factory: GeometryFactory,
    locator: PointLocator,
}

impl LineBuilder {
    pub fn new(factory: GeometryFactory, locator: PointLocator) -> Self {
        Self { factory, locator }
    }

    /// Result lines; must run after the result polygons are known.
    pub fn build(&self, graph: &mut PlanarGraph, op: OpCode, result_polys: &[Geometry]) -> Result<Vec<Geometry>> {
        self.find_covered_line_edges(graph, result_polys);
        let line_edges = collect_lines(graph, op);
        line_edges
            .into_iter()
            .map(|e| {
                let edge = &mut graph.edges[e.0];
                edge.set_in_result(true);
                self.factory.create_line_string(edge.coords().to_vec())
            })
            .collect()
    }

    /// Stars decide coverage where area edges meet the line; elsewhere the
    /// line origin is located against the result polygons.
    fn find_covered_line_edges(&self, graph: &mut PlanarGraph, result_polys: &[Geometry]) {
        for node in &graph.nodes.nodes {
            node.star.find_covered_line_edges(&graph.dir_edges, &mut graph.edges);
        }
        for de in &graph.dir_edges {
            let edge = &mut graph.edges[de.edge().0];
            if de.is_line_edge() && !edge.is_covered_set() {
                edge.set_covered(is_covered(&self.locator, &de.coordinate(), result_polys));
            }
        }
    }
}

fn collect_lines(graph: &mut PlanarGraph, op: OpCode) -> Vec<EdgeId> {
    let mut out = Vec::new();
    for i in 0..graph.dir_edges.len() {
        let de = &graph.dir_edges[i];
        let edge = &graph.edges[de.edge().0];
        let take = if de.is_line_edge() {
            !de.is_visited() && op.is_result_of_label(&de.label) && !edge.is_covered()
        } else {
            // Boundary touches between the two inputs.
            op == OpCode::Intersection
                && !de.is_visited()
                && !de.is_interior_area_edge()
                && !edge.is_in_result()
                && op.is_result_of_label(&de.label)
        };
        if take {
            out.push(de.edge());
            set_visited_edge(graph, DirEdgeId(i));
        }
    }
    out
}

fn set_visited_edge(graph: &mut PlanarGraph, id: DirEdgeId) {
    let sym = graph.dir_edges[id.0].sym();
    graph.dir_edges[id.0].set_visited(true);
    graph.dir_edges[sym.0].set_visited(true);
}
