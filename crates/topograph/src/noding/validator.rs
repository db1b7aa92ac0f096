//! Post-noding check: no two final edges may still cross in a segment interior.
//!
//! Always sweeps with `SweepLineIntersector`, whatever strategy noded the
//! edges, so the verdict does not depend on the noding configuration.

use tracing::debug;

use super::{EdgeRef, EdgeSetIntersector, EdgeSets, SegmentVisitor, SweepLineIntersector};
use crate::algorithm::LineIntersector;
use crate::error::TopologyError;
use crate::geom::Coordinate;
use crate::graph::Edge;

/// Stops at the first interior intersection between distinct segments.
#[derive(Default)]
struct InteriorIntersectionFinder {
    li: LineIntersector,
    found: Option<Coordinate>,
}

impl SegmentVisitor for InteriorIntersectionFinder {
    fn visit(&mut self, sets: &mut EdgeSets<'_>, e0: EdgeRef, seg0: usize, e1: EdgeRef, seg1: usize) {
        if e0 == e1 && seg0 == seg1 {
            return;
        }
        let a = sets.edge(e0).coords();
        let b = sets.edge(e1).coords();
        self.li
            .compute_intersection(&a[seg0], &a[seg0 + 1], &b[seg1], &b[seg1 + 1]);
        if self.li.has_intersection() && self.li.is_interior_intersection() {
            self.found = Some(self.li.intersection_pt(0));
        }
    }

    fn is_done(&self) -> bool {
        self.found.is_some()
    }
}

/// Verifies that a set of edges is fully noded.
pub struct EdgeNodingValidator;

impl EdgeNodingValidator {
    pub fn check_valid(edges: &mut [Edge]) -> Result<(), TopologyError> {
        let mut finder = InteriorIntersectionFinder::default();
        let mut sets = EdgeSets::Single(edges);
        SweepLineIntersector::default().compute_intersections(&mut sets, &mut finder, true);
        match finder.found {
            Some(pt) => {
                debug!(x = pt.x, y = pt.y, "noding validation failed");
                Err(TopologyError::at("found non-noded intersection", pt))
            }
            None => Ok(()),
        }
    }
}
