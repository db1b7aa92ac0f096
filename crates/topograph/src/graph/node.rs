//! Graph nodes and the coordinate-keyed node map.

use std::collections::BTreeMap;

use super::{DirectedEdgeStar, Label, NodeId};
use crate::geom::{CoordKey, Coordinate, Location};

#[derive(Clone, Debug)]
pub struct Node {
    coord: Coordinate,
    pub label: Label,
    pub(crate) star: DirectedEdgeStar,
}

impl Node {
    fn new(coord: Coordinate) -> Self {
        Self {
            coord,
            label: Label::default(),
            star: DirectedEdgeStar::default(),
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coord
    }

    pub fn star(&self) -> &DirectedEdgeStar {
        &self.star
    }

    /// Known for exactly one input geometry.
    pub fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }
}

/// Nodes keyed by 2D coordinate; at most one node per coordinate.
#[derive(Clone, Debug, Default)]
pub struct NodeMap {
    pub(crate) nodes: Vec<Node>,
    index: BTreeMap<CoordKey, NodeId>,
}

impl NodeMap {
    /// Existing node at `coord`, or a new unlabelled one.
    pub fn add_node(&mut self, coord: Coordinate) -> NodeId {
        let next = NodeId(self.nodes.len());
        let id = *self.index.entry(coord.key()).or_insert(next);
        if id == next {
            self.nodes.push(Node::new(coord));
        }
        id
    }

    pub fn find(&self, coord: &Coordinate) -> Option<NodeId> {
        self.index.get(&coord.key()).copied()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in coordinate order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.values().copied()
    }

    /// Nodes in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.index.values().map(|id| &self.nodes[id.0])
    }

    /// Nodes whose location for geometry `g` is boundary.
    pub fn boundary_nodes(&self, g: usize) -> impl Iterator<Item = &Node> {
        self.iter().filter(move |n| n.label.on(g) == Location::Boundary)
    }
}
