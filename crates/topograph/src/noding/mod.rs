//! Noding: finding every segment intersection among edge sets.
//!
//! Purpose
//! - Enumerate candidate segment pairs within one edge set (self-noding) or
//!   between two sets (cross-noding) and hand each pair to a `SegmentVisitor`,
//!   usually a `SegmentIntersector` that records intersections on both edges.
//!
//! Why this design
//! - Strategies only decide *which* pairs are tested; correctness lives in the
//!   visitor. All strategies must produce identical noding.
//! - Edges are addressed by `EdgeRef { set, index }` so a visitor can mutate
//!   two edges of different sets without aliasing borrows.

mod all_pairs;
mod mono_chain;
mod segment_intersector;
mod sweep;
mod validator;

use serde::{Deserialize, Serialize};

pub use all_pairs::AllPairsIntersector;
pub use mono_chain::MonotoneChainSweepIntersector;
pub use segment_intersector::{NodingCounts, SegmentIntersector};
pub use sweep::SweepLineIntersector;
pub use validator::EdgeNodingValidator;

use crate::graph::Edge;

/// An edge in one of the sets being noded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeRef {
    pub set: usize,
    pub index: usize,
}

/// One edge set (self-noding) or two disjoint sets (cross-noding).
pub enum EdgeSets<'a> {
    Single(&'a mut [Edge]),
    Pair(&'a mut [Edge], &'a mut [Edge]),
}

impl<'a> EdgeSets<'a> {
    pub fn num_sets(&self) -> usize {
        match self {
            EdgeSets::Single(_) => 1,
            EdgeSets::Pair(..) => 2,
        }
    }

    pub fn set(&self, s: usize) -> &[Edge] {
        match (self, s) {
            (EdgeSets::Single(e), _) => &e[..],
            (EdgeSets::Pair(a, _), 0) => &a[..],
            (EdgeSets::Pair(_, b), _) => &b[..],
        }
    }

    #[inline]
    pub fn edge(&self, r: EdgeRef) -> &Edge {
        &self.set(r.set)[r.index]
    }

    #[inline]
    pub fn edge_mut(&mut self, r: EdgeRef) -> &mut Edge {
        match (self, r.set) {
            (EdgeSets::Single(e), _) => &mut e[r.index],
            (EdgeSets::Pair(a, _), 0) => &mut a[r.index],
            (EdgeSets::Pair(_, b), _) => &mut b[r.index],
        }
    }

    /// Every edge reference, set by set.
    pub fn refs(&self) -> Vec<EdgeRef> {
        (0..self.num_sets())
            .flat_map(|set| (0..self.set(set).len()).map(move |index| EdgeRef { set, index }))
            .collect()
    }

    /// Should segments of `a` be tested against segments of `b`?
    ///
    /// Two sets: only across sets. One set: any pair, or only distinct edges
    /// when `test_all_segments` is off.
    pub(crate) fn should_test(&self, a: EdgeRef, b: EdgeRef, test_all_segments: bool) -> bool {
        match self {
            EdgeSets::Pair(..) => a.set != b.set,
            EdgeSets::Single(_) => test_all_segments || a != b,
        }
    }
}

/// Receives candidate segment pairs from an edge-set intersector.
pub trait SegmentVisitor {
    fn visit(&mut self, sets: &mut EdgeSets<'_>, e0: EdgeRef, seg0: usize, e1: EdgeRef, seg1: usize);

    /// Stop enumerating early.
    fn is_done(&self) -> bool {
        false
    }
}

/// Strategy enumerating candidate segment pairs.
pub trait EdgeSetIntersector {
    fn compute_intersections(
        &mut self,
        sets: &mut EdgeSets<'_>,
        visitor: &mut dyn SegmentVisitor,
        test_all_segments: bool,
    );
}

/// Selects an `EdgeSetIntersector`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntersectorKind {
    AllPairs,
    SweepLine,
    #[default]
    MonotoneChainSweep,
}

impl IntersectorKind {
    pub const ALL: [IntersectorKind; 3] = [
        IntersectorKind::AllPairs,
        IntersectorKind::SweepLine,
        IntersectorKind::MonotoneChainSweep,
    ];

    pub fn build(self) -> Box<dyn EdgeSetIntersector> {
        match self {
            IntersectorKind::AllPairs => Box::new(AllPairsIntersector),
            IntersectorKind::SweepLine => Box::new(SweepLineIntersector::default()),
            IntersectorKind::MonotoneChainSweep => Box::new(MonotoneChainSweepIntersector::default()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IntersectorKind::AllPairs => "all-pairs",
            IntersectorKind::SweepLine => "sweep-line",
            IntersectorKind::MonotoneChainSweep => "monotone-chain-sweep",
        }
    }
}

#[cfg(test)]
mod tests;
