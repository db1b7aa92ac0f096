//! Monotone chains with an x-sweep over chain envelopes.
//!
//! An edge is cut into maximal runs of segments whose directions share a
//! quadrant. Within a run the coordinates are monotone in x and y, so the
//! envelope of any sub-run is the box of its two end points. Overlapping
//! chains are compared by binary subdivision down to single segments.

use super::{EdgeRef, EdgeSetIntersector, EdgeSets, SegmentVisitor};
use crate::geom::{Coordinate, Envelope};

#[derive(Clone, Copy, Debug)]
struct MonotoneChain {
    edge: EdgeRef,
    /// First and last point index of the run.
    start: usize,
    end: usize,
    env: Envelope,
}

fn quadrant(p0: &Coordinate, p1: &Coordinate) -> u8 {
    let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
    match (dx >= 0.0, dy >= 0.0) {
        (true, true) => 0,
        (false, true) => 1,
        (false, false) => 2,
        (true, false) => 3,
    }
}

/// Point indices where monotone runs start, plus the final point index.
fn chain_start_indices(pts: &[Coordinate]) -> Vec<usize> {
    let mut starts = vec![0];
    let mut start = 0;
    while start < pts.len() - 1 {
        let q = quadrant(&pts[start], &pts[start + 1]);
        let mut last = start + 1;
        while last < pts.len() - 1 && quadrant(&pts[last], &pts[last + 1]) == q {
            last += 1;
        }
        starts.push(last);
        start = last;
    }
    starts
}

#[derive(Clone, Debug, Default)]
pub struct MonotoneChainSweepIntersector {
    chains: Vec<MonotoneChain>,
    /// (x, is_insert, chain)
    events: Vec<(f64, bool, usize)>,
    delete_index: Vec<usize>,
}

impl MonotoneChainSweepIntersector {
    fn build(&mut self, sets: &EdgeSets<'_>) {
        self.chains.clear();
        self.events.clear();
        for edge in sets.refs() {
            let pts = sets.edge(edge).coords();
            for w in chain_start_indices(pts).windows(2) {
                let env = Envelope::of_points(&pts[w[0]], &pts[w[1]]);
                let chain = self.chains.len();
                self.chains.push(MonotoneChain {
                    edge,
                    start: w[0],
                    end: w[1],
                    env,
                });
                self.events.push((env.min_x, true, chain));
                self.events.push((env.max_x, false, chain));
            }
        }
        self.events
            .sort_by(|a, b| a.0.total_cmp(&b.0).then(b.1.cmp(&a.1)));
        self.delete_index = vec![0; self.chains.len()];
        for (i, ev) in self.events.iter().enumerate() {
            if !ev.1 {
                self.delete_index[ev.2] = i;
            }
        }
    }
}

fn sub_envelope(sets: &EdgeSets<'_>, edge: EdgeRef, start: usize, end: usize) -> Envelope {
    let pts = sets.edge(edge).coords();
    Envelope::of_points(&pts[start], &pts[end])
}

/// Compare point ranges `[s0, e0]` of chain `a` and `[s1, e1]` of chain `b`.
#[allow(clippy::too_many_arguments)]
fn compute_overlaps(
    sets: &mut EdgeSets<'_>,
    visitor: &mut dyn SegmentVisitor,
    a: EdgeRef,
    s0: usize,
    e0: usize,
    b: EdgeRef,
    s1: usize,
    e1: usize,
) {
    if visitor.is_done() {
        return;
    }
    if e0 - s0 == 1 && e1 - s1 == 1 {
        visitor.visit(sets, a, s0, b, s1);
        return;
    }
    if !sub_envelope(sets, a, s0, e0).intersects(&sub_envelope(sets, b, s1, e1)) {
        return;
    }
    let m0 = (s0 + e0) / 2;
    let m1 = (s1 + e1) / 2;
    let halves0 = [(s0, m0), (m0, e0)];
    let halves1 = [(s1, m1), (m1, e1)];
    for &(a0, a1) in &halves0 {
        if a0 == a1 {
            continue;
        }
        for &(b0, b1) in &halves1 {
            if b0 == b1 {
                continue;
            }
            compute_overlaps(sets, visitor, a, a0, a1, b, b0, b1);
        }
    }
}

impl EdgeSetIntersector for MonotoneChainSweepIntersector {
    fn compute_intersections(
        &mut self,
        sets: &mut EdgeSets<'_>,
        visitor: &mut dyn SegmentVisitor,
        test_all_segments: bool,
    ) {
        self.build(sets);
        for i in 0..self.events.len() {
            let (_, is_insert, ci) = self.events[i];
            if !is_insert {
                continue;
            }
            let c0 = self.chains[ci];
            for &(_, other_insert, cj) in &self.events[i + 1..self.delete_index[ci]] {
                if !other_insert {
                    continue;
                }
                let c1 = self.chains[cj];
                if !sets.should_test(c0.edge, c1.edge, test_all_segments) {
                    continue;
                }
                if !c0.env.intersects(&c1.env) {
                    continue;
                }
                compute_overlaps(sets, visitor, c0.edge, c0.start, c0.end, c1.edge, c1.start, c1.end);
                if visitor.is_done() {
                    return;
                }
            }
        }
    }
}
