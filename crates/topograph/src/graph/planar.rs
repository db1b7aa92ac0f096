//! Arena-backed planar graph: edges, directed edges and nodes.
//!
//! Every inserted edge gets two directed edges at indices `2e` and `2e + 1`
//! (forward, reverse); each is the other's `sym`. Directed edges are inserted
//! into the star of the node at their origin.

use tracing::debug;

use super::{DirEdgeId, DirectedEdge, Edge, EdgeId, Node, NodeId, NodeMap};
use crate::error::TopologyError;
use crate::geom::{Coordinate, Geometry, Location};

#[derive(Clone, Debug, Default)]
pub struct PlanarGraph {
    pub(crate) edges: Vec<Edge>,
    pub(crate) dir_edges: Vec<DirectedEdge>,
    pub(crate) nodes: NodeMap,
}

impl PlanarGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn dir_edges(&self) -> &[DirectedEdge] {
        &self.dir_edges
    }

    #[inline]
    pub fn dir_edge(&self, id: DirEdgeId) -> &DirectedEdge {
        &self.dir_edges[id.0]
    }

    #[inline]
    pub fn dir_edge_mut(&mut self, id: DirEdgeId) -> &mut DirectedEdge {
        &mut self.dir_edges[id.0]
    }

    pub fn nodes(&self) -> &NodeMap {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        self.nodes.get(id)
    }

    pub fn add_node(&mut self, coord: Coordinate) -> NodeId {
        self.nodes.add_node(coord)
    }

    /// Append an edge without directed edges (input graphs before noding).
    pub fn insert_edge(&mut self, e: Edge) -> EdgeId {
        self.edges.push(e);
        EdgeId(self.edges.len() - 1)
    }

    /// Insert edges with their directed-edge pairs and node stars.
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = Edge>) {
        for e in edges {
            let id = EdgeId(self.edges.len());
            let fwd = DirEdgeId(self.dir_edges.len());
            let rev = DirEdgeId(fwd.0 + 1);
            let n = e.num_points();
            let start = self.nodes.add_node(e.coord(0));
            let end = self.nodes.add_node(e.coord(n - 1));
            self.dir_edges.push(DirectedEdge::new(id, &e, true, start, rev));
            self.dir_edges.push(DirectedEdge::new(id, &e, false, end, fwd));
            self.edges.push(e);
            self.nodes.get_mut(start).star.insert(fwd, &self.dir_edges);
            self.nodes.get_mut(end).star.insert(rev, &self.dir_edges);
        }
        debug!(
            edges = self.edges.len(),
            nodes = self.nodes.len(),
            "planar graph assembled"
        );
    }

    /// Is the node at `coord` on the boundary of geometry `g`?
    pub fn is_boundary_node(&self, g: usize, coord: &Coordinate) -> bool {
        self.nodes
            .find(coord)
            .is_some_and(|id| self.nodes.get(id).label.on(g) == Location::Boundary)
    }

    /// Edge whose first segment is exactly `p0 -> p1`.
    pub fn find_edge(&self, p0: &Coordinate, p1: &Coordinate) -> Option<EdgeId> {
        self.edges
            .iter()
            .position(|e| e.coord(0).equals_2d(p0) && e.coord(1).equals_2d(p1))
            .map(EdgeId)
    }

    /// Edge that starts with `p0 -> p1` or ends with `p1 <- p0` reversed.
    pub fn find_edge_in_same_direction(&self, p0: &Coordinate, p1: &Coordinate) -> Option<EdgeId> {
        self.edges
            .iter()
            .position(|e| {
                let n = e.num_points();
                (e.coord(0).equals_2d(p0) && e.coord(1).equals_2d(p1))
                    || (e.coord(n - 1).equals_2d(p0) && e.coord(n - 2).equals_2d(p1))
            })
            .map(EdgeId)
    }

    /// The forward directed edge of `edge`, if the edge has been added with `add_edges`.
    pub fn find_edge_end(&self, edge: EdgeId) -> Option<DirEdgeId> {
        self.dir_edges
            .iter()
            .position(|de| de.edge() == edge)
            .map(DirEdgeId)
    }

    pub fn link_result_directed_edges(&mut self) -> Result<(), TopologyError> {
        for node in &self.nodes.nodes {
            node.star
                .link_result_directed_edges(&mut self.dir_edges, &node.coordinate())?;
        }
        Ok(())
    }

    pub fn link_all_directed_edges(&mut self) {
        for node in &self.nodes.nodes {
            node.star.link_all_directed_edges(&mut self.dir_edges);
        }
    }

    /// Complete edge labels at every node and derive node labels from their stars.
    pub(crate) fn compute_labelling(&mut self, args: [&Geometry; 2]) -> Result<(), TopologyError> {
        for node in &mut self.nodes.nodes {
            let at = node.coordinate();
            node.star
                .compute_labelling(&mut self.dir_edges, &self.edges, args, &at)?;
        }
        for node in &self.nodes.nodes {
            node.star.merge_sym_labels(&mut self.dir_edges);
        }
        for node in &mut self.nodes.nodes {
            let star_label = node.star.label;
            node.label.merge(&star_label);
        }
        Ok(())
    }

    /// Propagate side depths around the star at the origin of `de`.
    pub fn compute_depths(&mut self, de: DirEdgeId) -> Result<(), TopologyError> {
        let node = self.dir_edges[de.0].node();
        self.nodes.nodes[node.0]
            .star
            .compute_depths(de, &mut self.dir_edges, &self.edges)
    }
}
