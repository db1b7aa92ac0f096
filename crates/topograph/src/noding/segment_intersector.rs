//! Segment-pair intersection recording.

use super::{EdgeRef, EdgeSets, SegmentVisitor};
use crate::algorithm::LineIntersector;
use crate::geom::{Coordinate, PrecisionModel};

/// Counters gathered while noding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct NodingCounts {
    /// Segment pairs handed to the line intersector.
    pub tests: usize,
    pub intersections: usize,
    pub proper_intersections: usize,
    pub interior_intersections: usize,
}

impl std::ops::AddAssign for NodingCounts {
    fn add_assign(&mut self, o: Self) {
        self.tests += o.tests;
        self.intersections += o.intersections;
        self.proper_intersections += o.proper_intersections;
        self.interior_intersections += o.interior_intersections;
    }
}

/// Computes segment intersections and records them on both edges.
#[derive(Clone, Debug)]
pub struct SegmentIntersector {
    li: LineIntersector,
    include_proper: bool,
    record_isolated: bool,
    boundary_nodes: [Vec<Coordinate>; 2],
    has_intersection: bool,
    has_proper: bool,
    has_proper_interior: bool,
    proper_point: Option<Coordinate>,
    counts: NodingCounts,
}

impl SegmentIntersector {
    /// `include_proper`: record proper crossings too (off only for relate-style
    /// callers that compute them elsewhere). `record_isolated`: clear the
    /// isolated flag of edges that meet something.
    pub fn new(precision: PrecisionModel, include_proper: bool, record_isolated: bool) -> Self {
        Self {
            li: LineIntersector::new(precision),
            include_proper,
            record_isolated,
            boundary_nodes: [Vec::new(), Vec::new()],
            has_intersection: false,
            has_proper: false,
            has_proper_interior: false,
            proper_point: None,
            counts: NodingCounts::default(),
        }
    }

    /// Boundary nodes of both inputs; a proper crossing at one of them is not "interior".
    pub fn set_boundary_nodes(&mut self, bdy0: Vec<Coordinate>, bdy1: Vec<Coordinate>) {
        self.boundary_nodes = [bdy0, bdy1];
    }

    pub fn has_intersection(&self) -> bool {
        self.has_intersection
    }

    pub fn has_proper_intersection(&self) -> bool {
        self.has_proper
    }

    /// A proper crossing away from every registered boundary node.
    pub fn has_proper_interior_intersection(&self) -> bool {
        self.has_proper_interior
    }

    pub fn proper_intersection_point(&self) -> Option<Coordinate> {
        self.proper_point
    }

    pub fn counts(&self) -> NodingCounts {
        self.counts
    }

    /// Shared vertex of two consecutive segments of one edge (or the closing
    /// vertex of a ring). Not a real node.
    fn is_trivial_intersection(&self, sets: &EdgeSets<'_>, e0: EdgeRef, seg0: usize, e1: EdgeRef, seg1: usize) -> bool {
        if e0 != e1 || self.li.intersection_num() != 1 {
            return false;
        }
        if seg0.abs_diff(seg1) == 1 {
            return true;
        }
        let edge = sets.edge(e0);
        if edge.is_closed() {
            let max_seg = edge.num_points() - 2;
            if (seg0 == 0 && seg1 == max_seg) || (seg1 == 0 && seg0 == max_seg) {
                return true;
            }
        }
        false
    }

    fn is_boundary_point(&self) -> bool {
        self.boundary_nodes
            .iter()
            .flatten()
            .any(|c| self.li.is_intersection(c))
    }
}

impl SegmentVisitor for SegmentIntersector {
    fn visit(&mut self, sets: &mut EdgeSets<'_>, e0: EdgeRef, seg0: usize, e1: EdgeRef, seg1: usize) {
        if e0 == e1 && seg0 == seg1 {
            return;
        }
        self.counts.tests += 1;
        let (p00, p01) = {
            let c = sets.edge(e0).coords();
            (c[seg0], c[seg0 + 1])
        };
        let (p10, p11) = {
            let c = sets.edge(e1).coords();
            (c[seg1], c[seg1 + 1])
        };
        self.li.compute_intersection(&p00, &p01, &p10, &p11);
        if !self.li.has_intersection() {
            return;
        }
        if self.record_isolated {
            sets.edge_mut(e0).set_isolated(false);
            sets.edge_mut(e1).set_isolated(false);
        }
        self.counts.intersections += 1;
        if self.li.is_interior_intersection() {
            self.counts.interior_intersections += 1;
        }
        if self.is_trivial_intersection(sets, e0, seg0, e1, seg1) {
            return;
        }
        self.has_intersection = true;
        let proper = self.li.is_proper();
        if self.include_proper || !proper {
            sets.edge_mut(e0).add_intersections(&self.li, seg0, 0);
            sets.edge_mut(e1).add_intersections(&self.li, seg1, 1);
        }
        if proper {
            self.counts.proper_intersections += 1;
            self.proper_point = Some(self.li.intersection_pt(0));
            self.has_proper = true;
            if !self.is_boundary_point() {
                self.has_proper_interior = true;
            }
        }
    }
}
