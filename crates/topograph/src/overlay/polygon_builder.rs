//! Assembles result polygons from the in-result directed edges of a graph.
//!
//! Maximal rings are traced first. A maximal ring that passes through a node
//! more than once is split into minimal rings; at most one of those is a
//! shell and the rest are its holes. Remaining holes are assigned to the
//! smallest enclosing shell.

use tracing::debug;

use super::edge_ring::{EdgeRing, RingKind};
use crate::algorithm::locate_in_ring;
use crate::error::{Result, TopologyError};
use crate::geom::{Coordinate, Geometry, GeometryFactory, Location};
use crate::graph::{DirEdgeId, PlanarGraph};

#[derive(Clone, Debug)]
pub struct PolygonBuilder {
    factory: GeometryFactory,
    rings: Vec<EdgeRing>,
    shells: Vec<usize>,
}

impl PolygonBuilder {
    pub fn new(factory: GeometryFactory) -> Self {
        Self {
            factory,
            rings: Vec::new(),
            shells: Vec::new(),
        }
    }

    pub fn rings(&self) -> &[EdgeRing] {
        &self.rings
    }

    /// Link, trace and nest the result rings of `graph`.
    pub fn add(&mut self, graph: &mut PlanarGraph) -> Result<()> {
        graph.link_result_directed_edges()?;
        let max_rings = self.build_maximal_edge_rings(graph)?;
        let mut free_holes = Vec::new();
        let simple_rings = self.build_minimal_edge_rings(max_rings, graph, &mut free_holes)?;
        for id in simple_rings {
            if self.rings[id].is_hole() {
                free_holes.push(id);
            } else {
                self.shells.push(id);
            }
        }
        self.place_free_holes(&free_holes)?;
        debug!(
            rings = self.rings.len(),
            shells = self.shells.len(),
            "result rings built"
        );
        Ok(())
    }

    fn build_maximal_edge_rings(&mut self, graph: &mut PlanarGraph) -> Result<Vec<usize>, TopologyError> {
        let mut max_rings = Vec::new();
        for i in 0..graph.dir_edges.len() {
            let de = &graph.dir_edges[i];
            if !(de.is_in_result() && de.label.is_area()) || de.edge_ring.is_some() {
                continue;
            }
            let id = self.rings.len();
            let ring = EdgeRing::build(id, RingKind::Maximal, DirEdgeId(i), &mut graph.dir_edges, &graph.edges)?;
            for de in ring.edges() {
                let edge = graph.dir_edges[de.0].edge();
                graph.edges[edge.0].set_in_result(true);
            }
            self.rings.push(ring);
            max_rings.push(id);
        }
        Ok(max_rings)
    }

    /// Ring degree of the busiest node this ring passes: twice the number of
    /// its ring edges leaving that node. Above 2 the ring touches itself.
    fn max_node_degree(&self, ring: usize, graph: &PlanarGraph) -> usize {
        let outgoing = self.rings[ring]
            .edges()
            .iter()
            .map(|de| {
                let node = graph.dir_edge(*de).node();
                graph.node(node).star().outgoing_degree_in_ring(&graph.dir_edges, ring)
            })
            .max()
            .unwrap_or(0);
        outgoing * 2
    }

    /// Split self-touching maximal rings; returns the maximal rings that are already simple.
    fn build_minimal_edge_rings(
        &mut self,
        max_rings: Vec<usize>,
        graph: &mut PlanarGraph,
        free_holes: &mut Vec<usize>,
    ) -> Result<Vec<usize>, TopologyError> {
        let mut simple = Vec::new();
        for er in max_rings {
            if self.max_node_degree(er, graph) <= 2 {
                simple.push(er);
                continue;
            }
            let ring_edges = self.rings[er].edges().to_vec();
            for de in &ring_edges {
                let node = graph.dir_edges[de.0].node();
                let n = &graph.nodes.nodes[node.0];
                n.star
                    .link_minimal_directed_edges(&mut graph.dir_edges, er, &n.coordinate())?;
            }
            let mut min_rings = Vec::new();
            for de in ring_edges {
                if graph.dir_edges[de.0].min_edge_ring.is_some() {
                    continue;
                }
                let id = self.rings.len();
                let ring = EdgeRing::build(id, RingKind::Minimal, de, &mut graph.dir_edges, &graph.edges)?;
                self.rings.push(ring);
                min_rings.push(id);
            }
            match self.find_shell(&min_rings)? {
                Some(shell) => {
                    let holes: Vec<usize> = min_rings
                        .iter()
                        .copied()
                        .filter(|&r| self.rings[r].is_hole())
                        .collect();
                    for hole in holes {
                        self.set_shell(hole, shell);
                    }
                    self.shells.push(shell);
                }
                None => free_holes.extend(min_rings),
            }
        }
        Ok(simple)
    }

    fn find_shell(&self, min_rings: &[usize]) -> Result<Option<usize>, TopologyError> {
        let mut shells = min_rings.iter().copied().filter(|&r| !self.rings[r].is_hole());
        let shell = shells.next();
        if let Some(extra) = shells.next() {
            return Err(TopologyError::at(
                "found two shells in minimal edge ring list",
                self.rings[extra].coords()[0],
            ));
        }
        Ok(shell)
    }

    fn set_shell(&mut self, hole: usize, shell: usize) {
        self.rings[hole].shell = Some(shell);
        self.rings[shell].holes.push(hole);
    }

    fn place_free_holes(&mut self, free_holes: &[usize]) -> Result<(), TopologyError> {
        for &hole in free_holes {
            if self.rings[hole].shell.is_some() {
                continue;
            }
            let Some(shell) = self.find_edge_ring_containing(hole) else {
                return Err(TopologyError::at(
                    "unable to assign hole to a shell",
                    self.rings[hole].coords()[0],
                ));
            };
            self.set_shell(hole, shell);
        }
        Ok(())
    }

    /// Smallest shell whose envelope and ring contain the ring `test`.
    fn find_edge_ring_containing(&self, test: usize) -> Option<usize> {
        let test_ring = &self.rings[test];
        let test_env = test_ring.envelope();
        let mut best: Option<usize> = None;
        for &shell in &self.shells {
            let shell_ring = &self.rings[shell];
            let shell_env = shell_ring.envelope();
            if shell_env == test_env || !shell_env.contains(test_env) {
                continue;
            }
            let Some(test_pt) = pt_not_in_list(test_ring.coords(), shell_ring.coords()) else {
                continue;
            };
            if locate_in_ring(&test_pt, shell_ring.coords()) == Location::Exterior {
                continue;
            }
            if best.map_or(true, |b| self.rings[b].envelope().contains(shell_env)) {
                best = Some(shell);
            }
        }
        best
    }

    /// One polygon per shell, holes attached.
    pub fn polygons(&self) -> Result<Vec<Geometry>> {
        self.shells
            .iter()
            .map(|&shell| {
                let ring = &self.rings[shell];
                let holes = ring
                    .holes()
                    .iter()
                    .map(|&h| self.rings[h].linear_ring(&self.factory))
                    .collect::<Result<Vec<_>>>()?;
                self.factory
                    .create_polygon(ring.linear_ring(&self.factory)?, holes)
            })
            .collect()
    }
}

/// First point of `test` that is not a vertex of `pts`.
fn pt_not_in_list(test: &[Coordinate], pts: &[Coordinate]) -> Option<Coordinate> {
    test.iter().copied().find(|p| !pts.iter().any(|q| q.equals_2d(p)))
}
