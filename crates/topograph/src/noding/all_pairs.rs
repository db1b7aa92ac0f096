//! Brute-force strategy: every segment of every candidate edge pair.

use super::{EdgeSetIntersector, EdgeSets, SegmentVisitor};

/// O(n²) in segments; edge envelopes prune pairs that cannot meet.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllPairsIntersector;

impl EdgeSetIntersector for AllPairsIntersector {
    fn compute_intersections(
        &mut self,
        sets: &mut EdgeSets<'_>,
        visitor: &mut dyn SegmentVisitor,
        test_all_segments: bool,
    ) {
        let refs = sets.refs();
        for (i, &e0) in refs.iter().enumerate() {
            for &e1 in &refs[i..] {
                if !sets.should_test(e0, e1, test_all_segments) {
                    continue;
                }
                if !sets.edge(e0).envelope().intersects(sets.edge(e1).envelope()) {
                    continue;
                }
                let n0 = sets.edge(e0).num_points() - 1;
                let n1 = sets.edge(e1).num_points() - 1;
                for s0 in 0..n0 {
                    // Within one edge each unordered segment pair is tested once.
                    let first = if e0 == e1 { s0 + 1 } else { 0 };
                    for s1 in first..n1 {
                        visitor.visit(sets, e0, s0, e1, s1);
                        if visitor.is_done() {
                            return;
                        }
                    }
                }
            }
        }
    }
}
