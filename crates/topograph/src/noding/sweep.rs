//! X-sweep over individual segments.
//!
//! Each segment contributes an insert event at its min x and a delete event at
//! its max x. Events are sorted by x with inserts before deletes, so segments
//! touching at a single x are still paired. While a segment is live, every
//! segment inserted after it is a candidate.

use super::{EdgeRef, EdgeSetIntersector, EdgeSets, SegmentVisitor};

#[derive(Clone, Copy, Debug)]
struct SweepItem {
    edge: EdgeRef,
    seg: usize,
}

#[derive(Clone, Copy, Debug)]
struct SweepEvent {
    x: f64,
    is_insert: bool,
    /// Index into the item list.
    item: usize,
}

#[derive(Clone, Debug, Default)]
pub struct SweepLineIntersector {
    items: Vec<SweepItem>,
    events: Vec<SweepEvent>,
    delete_index: Vec<usize>,
}

impl SweepLineIntersector {
    fn build(&mut self, sets: &EdgeSets<'_>) {
        self.items.clear();
        self.events.clear();
        for edge in sets.refs() {
            let pts = sets.edge(edge).coords();
            for seg in 0..pts.len() - 1 {
                let item = self.items.len();
                self.items.push(SweepItem { edge, seg });
                let (a, b) = (pts[seg].x, pts[seg + 1].x);
                self.events.push(SweepEvent {
                    x: a.min(b),
                    is_insert: true,
                    item,
                });
                self.events.push(SweepEvent {
                    x: a.max(b),
                    is_insert: false,
                    item,
                });
            }
        }
        self.events
            .sort_by(|a, b| a.x.total_cmp(&b.x).then(b.is_insert.cmp(&a.is_insert)));
        self.delete_index = vec![0; self.items.len()];
        for (i, ev) in self.events.iter().enumerate() {
            if !ev.is_insert {
                self.delete_index[ev.item] = i;
            }
        }
    }
}

impl EdgeSetIntersector for SweepLineIntersector {
    fn compute_intersections(
        &mut self,
        sets: &mut EdgeSets<'_>,
        visitor: &mut dyn SegmentVisitor,
        test_all_segments: bool,
    ) {
        self.build(sets);
        for i in 0..self.events.len() {
            let ev = self.events[i];
            if !ev.is_insert {
                continue;
            }
            let a = self.items[ev.item];
            let end = self.delete_index[ev.item];
            for other in &self.events[i + 1..end] {
                if !other.is_insert {
                    continue;
                }
                let b = self.items[other.item];
                if !sets.should_test(a.edge, b.edge, test_all_segments) {
                    continue;
                }
                visitor.visit(sets, a.edge, a.seg, b.edge, b.seg);
                if visitor.is_done() {
                    return;
                }
            }
        }
    }
}
