//! Directed edges: one per traversal direction of an `Edge`.
//!
//! Each directed edge stores its origin, the direction point (second vertex
//! in travel order), a label copied from its edge (flipped when reversed), and
//! the index links (`sym`, `next`, `next_min`) used to trace rings.

use std::cmp::Ordering;

use super::{DirEdgeId, Edge, EdgeId, Label, NodeId, Position};
use crate::algorithm::orientation_index;
use crate::error::TopologyError;
use crate::geom::{Coordinate, Location};

const UNSET_DEPTH: i32 = -999;

/// Octant (0..8, counter-clockwise from the positive x axis) of direction `(dx, dy)`.
pub fn octant(dx: f64, dy: f64) -> u8 {
    let (adx, ady) = (dx.abs(), dy.abs());
    match (dx >= 0.0, dy >= 0.0) {
        (true, true) => {
            if adx >= ady {
                0
            } else {
                1
            }
        }
        (false, true) => {
            if adx >= ady {
                3
            } else {
                2
            }
        }
        (false, false) => {
            if adx >= ady {
                4
            } else {
                5
            }
        }
        (true, false) => {
            if adx >= ady {
                7
            } else {
                6
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct DirectedEdge {
    edge: EdgeId,
    forward: bool,
    p0: Coordinate,
    p1: Coordinate,
    dx: f64,
    dy: f64,
    octant: u8,
    pub label: Label,
    pub(crate) node: NodeId,
    pub(crate) sym: DirEdgeId,
    pub(crate) next: Option<DirEdgeId>,
    pub(crate) next_min: Option<DirEdgeId>,
    pub(crate) edge_ring: Option<usize>,
    pub(crate) min_edge_ring: Option<usize>,
    in_result: bool,
    visited: bool,
    depth: [i32; 3],
}

impl DirectedEdge {
    pub(crate) fn new(id: EdgeId, edge: &Edge, forward: bool, node: NodeId, sym: DirEdgeId) -> Self {
        let n = edge.num_points();
        let (p0, p1) = if forward {
            (edge.coord(0), edge.coord(1))
        } else {
            (edge.coord(n - 1), edge.coord(n - 2))
        };
        let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
        let mut label = edge.label;
        if !forward {
            label.flip();
        }
        Self {
            edge: id,
            forward,
            p0,
            p1,
            dx,
            dy,
            octant: octant(dx, dy),
            label,
            node,
            sym,
            next: None,
            next_min: None,
            edge_ring: None,
            min_edge_ring: None,
            in_result: false,
            visited: false,
            depth: [0, UNSET_DEPTH, UNSET_DEPTH],
        }
    }

    /// Counter-clockwise angular order around a shared origin.
    ///
    /// Octants first, then the exact orientation predicate inside an octant.
    pub fn compare_direction(&self, other: &DirectedEdge) -> Ordering {
        if self.dx == other.dx && self.dy == other.dy {
            return Ordering::Equal;
        }
        self.octant.cmp(&other.octant).then_with(|| {
            orientation_index(&other.p0, &other.p1, &self.p1).cmp(&0)
        })
    }

    #[inline]
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    #[inline]
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    /// Origin of the directed edge.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.p0
    }

    #[inline]
    pub fn direction_pt(&self) -> Coordinate {
        self.p1
    }

    #[inline]
    pub fn octant(&self) -> u8 {
        self.octant
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[inline]
    pub fn sym(&self) -> DirEdgeId {
        self.sym
    }

    #[inline]
    pub fn next(&self) -> Option<DirEdgeId> {
        self.next
    }

    #[inline]
    pub fn next_min(&self) -> Option<DirEdgeId> {
        self.next_min
    }

    #[inline]
    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    pub fn set_in_result(&mut self, in_result: bool) {
        self.in_result = in_result;
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn depth(&self, pos: Position) -> i32 {
        self.depth[pos.index()]
    }

    /// Assign a side depth; a different value already present is a topology error.
    pub fn set_depth(&mut self, pos: Position, value: i32) -> Result<(), TopologyError> {
        let slot = &mut self.depth[pos.index()];
        if *slot != UNSET_DEPTH && *slot != value {
            return Err(TopologyError::at("assigned depths do not match", self.p0));
        }
        *slot = value;
        Ok(())
    }

    /// Depth change from left to right in travel direction.
    pub fn depth_delta(&self, edge_delta: i32) -> i32 {
        if self.forward {
            edge_delta
        } else {
            -edge_delta
        }
    }

    /// Set the depth on side `pos` and derive the opposite side from the edge delta.
    pub fn set_edge_depths(&mut self, pos: Position, depth: i32, edge_delta: i32) -> Result<(), TopologyError> {
        let factor = if pos == Position::Left { -1 } else { 1 };
        let opposite_depth = depth + self.depth_delta(edge_delta) * factor;
        self.set_depth(pos, depth)?;
        self.set_depth(pos.opposite(), opposite_depth)
    }

    /// Line for at least one geometry and exterior-only for any area record.
    pub fn is_line_edge(&self) -> bool {
        let is_line = self.label.is_line(0) || self.label.is_line(1);
        let exterior_if_area =
            |g: usize| !self.label.is_area_for(g) || self.label.all_positions_equal(g, Location::Exterior);
        is_line && exterior_if_area(0) && exterior_if_area(1)
    }

    /// Both sides interior for both geometries; never part of a result boundary.
    pub fn is_interior_area_edge(&self) -> bool {
        (0..2).all(|g| {
            self.label.is_area_for(g)
                && self.label.location(g, Position::Left) == Location::Interior
                && self.label.location(g, Position::Right) == Location::Interior
        })
    }
}
