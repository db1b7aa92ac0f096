//! Edges, their intersection lists, and the de-duplicating edge list.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::{Depth, Label};
use crate::algorithm::LineIntersector;
use crate::geom::{CoordKey, Coordinate, Envelope};

/// Intersection point on an edge, addressed by segment index and distance along it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeIntersection {
    pub coord: Coordinate,
    pub segment_index: usize,
    pub dist: f64,
}

impl EdgeIntersection {
    fn compare(&self, segment_index: usize, dist: f64) -> Ordering {
        self.segment_index
            .cmp(&segment_index)
            .then_with(|| self.dist.total_cmp(&dist))
    }
}

/// Intersections of one edge, sorted along the edge and free of duplicates.
#[derive(Clone, Debug, Default)]
pub struct EdgeIntersectionList {
    list: Vec<EdgeIntersection>,
}

impl EdgeIntersectionList {
    /// Insert an intersection unless one already sits at the same place.
    pub fn add(&mut self, coord: Coordinate, segment_index: usize, dist: f64) {
        if let Err(pos) = self
            .list
            .binary_search_by(|ei| ei.compare(segment_index, dist))
        {
            self.list.insert(
                pos,
                EdgeIntersection {
                    coord,
                    segment_index,
                    dist,
                },
            );
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection> {
        self.list.iter()
    }

    pub fn is_intersection(&self, pt: &Coordinate) -> bool {
        self.list.iter().any(|ei| ei.coord.equals_2d(pt))
    }

    /// Register the first and last points of the parent edge.
    fn add_endpoints(&mut self, pts: &[Coordinate]) {
        let last = pts.len() - 1;
        self.add(pts[0], 0, 0.0);
        self.add(pts[last], last, 0.0);
    }
}

/// A noded (or to-be-noded) chain of coordinates with its topology label.
#[derive(Clone, Debug)]
pub struct Edge {
    pts: Vec<Coordinate>,
    env: Envelope,
    pub label: Label,
    pub(crate) ei_list: EdgeIntersectionList,
    pub(crate) depth: Depth,
    depth_delta: i32,
    isolated: bool,
    covered: Option<bool>,
    in_result: bool,
}

impl Edge {
    /// `pts` must hold at least two coordinates.
    pub fn new(pts: Vec<Coordinate>, label: Label) -> Self {
        let env = Envelope::of_coords(&pts);
        Self {
            pts,
            env,
            label,
            ei_list: EdgeIntersectionList::default(),
            depth: Depth::default(),
            depth_delta: 0,
            isolated: true,
            covered: None,
            in_result: false,
        }
    }

    #[inline]
    pub fn coords(&self) -> &[Coordinate] {
        &self.pts
    }

    #[inline]
    pub fn coord(&self, i: usize) -> Coordinate {
        self.pts[i]
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.pts.len()
    }

    #[inline]
    pub fn envelope(&self) -> &Envelope {
        &self.env
    }

    pub fn is_closed(&self) -> bool {
        self.pts[0].equals_2d(&self.pts[self.pts.len() - 1])
    }

    pub fn intersections(&self) -> &EdgeIntersectionList {
        &self.ei_list
    }

    pub fn depth(&self) -> &Depth {
        &self.depth
    }

    pub fn depth_mut(&mut self) -> &mut Depth {
        &mut self.depth
    }

    /// Left minus right depth in forward direction.
    pub fn depth_delta(&self) -> i32 {
        self.depth_delta
    }

    pub fn set_depth_delta(&mut self, delta: i32) {
        self.depth_delta = delta;
    }

    /// True until the edge takes part in some intersection.
    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    pub fn set_isolated(&mut self, isolated: bool) {
        self.isolated = isolated;
    }

    /// Part of a result ring or emitted as a result line.
    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    pub fn set_in_result(&mut self, in_result: bool) {
        self.in_result = in_result;
    }

    pub fn is_covered(&self) -> bool {
        self.covered == Some(true)
    }

    pub fn is_covered_set(&self) -> bool {
        self.covered.is_some()
    }

    pub fn set_covered(&mut self, covered: bool) {
        self.covered = Some(covered);
    }

    /// An area edge that folds back onto itself (A-B-A).
    pub fn is_collapsed(&self) -> bool {
        self.label.is_area() && self.pts.len() == 3 && self.pts[0].equals_2d(&self.pts[2])
    }

    /// Line edge A-B replacing a collapsed A-B-A area edge.
    pub fn collapsed_edge(&self) -> Edge {
        Edge::new(vec![self.pts[0], self.pts[1]], self.label.to_line_label())
    }

    /// Record every intersection `li` found on segment `segment_index`.
    ///
    /// `geom_index` selects which of the intersector's input segments this edge is.
    pub fn add_intersections(&mut self, li: &LineIntersector, segment_index: usize, geom_index: usize) {
        for i in 0..li.intersection_num() {
            self.add_intersection(li, segment_index, geom_index, i);
        }
    }

    fn add_intersection(
        &mut self,
        li: &LineIntersector,
        segment_index: usize,
        geom_index: usize,
        int_index: usize,
    ) {
        let int_pt = li.intersection_pt(int_index);
        let mut seg = segment_index;
        let mut dist = li.edge_distance(geom_index, int_index);
        // A point on the segment's end vertex belongs to the next segment.
        if let Some(next) = self.pts.get(seg + 1) {
            if int_pt.equals_2d(next) {
                seg += 1;
                dist = 0.0;
            }
        }
        self.ei_list.add(int_pt, seg, dist);
    }

    /// Split at every recorded intersection, appending the pieces to `out`.
    pub fn add_split_edges(&mut self, out: &mut Vec<Edge>) {
        self.ei_list.add_endpoints(&self.pts);
        for pair in self.ei_list.list.windows(2) {
            out.push(self.create_split_edge(&pair[0], &pair[1]));
        }
    }

    fn create_split_edge(&self, ei0: &EdgeIntersection, ei1: &EdgeIntersection) -> Edge {
        let last_seg_start = &self.pts[ei1.segment_index];
        // A final point equal to the last segment's start would duplicate it.
        let use_int_pt1 = ei1.dist > 0.0 || !ei1.coord.equals_2d(last_seg_start);
        let mut pts = Vec::with_capacity(ei1.segment_index - ei0.segment_index + 2);
        pts.push(ei0.coord);
        pts.extend_from_slice(&self.pts[ei0.segment_index + 1..=ei1.segment_index]);
        if use_int_pt1 {
            pts.push(ei1.coord);
        }
        Edge::new(pts, self.label)
    }

    /// Same coordinates in the same order.
    pub fn is_pointwise_equal(&self, other: &Edge) -> bool {
        self.pts.len() == other.pts.len()
            && self.pts.iter().zip(&other.pts).all(|(a, b)| a.equals_2d(b))
    }

    /// Same coordinates in either direction.
    pub fn equals_either_direction(&self, other: &Edge) -> bool {
        self.is_pointwise_equal(other)
            || (self.pts.len() == other.pts.len()
                && self.pts.iter().zip(other.pts.iter().rev()).all(|(a, b)| a.equals_2d(b)))
    }
}

/// Direction-independent key of a coordinate sequence.
fn oriented_key(pts: &[Coordinate]) -> Vec<CoordKey> {
    let n = pts.len();
    let mut forward = true;
    for i in 0..n / 2 {
        match pts[i].compare_2d(&pts[n - 1 - i]) {
            Ordering::Equal => continue,
            ord => {
                forward = ord == Ordering::Less;
                break;
            }
        }
    }
    if forward {
        pts.iter().map(Coordinate::key).collect()
    } else {
        pts.iter().rev().map(Coordinate::key).collect()
    }
}

/// Edge collection that finds an existing edge with equal coordinates.
#[derive(Clone, Debug, Default)]
pub struct EdgeList {
    edges: Vec<Edge>,
    index: HashMap<Vec<CoordKey>, usize>,
}

impl EdgeList {
    pub fn add(&mut self, e: Edge) {
        self.index.insert(oriented_key(e.coords()), self.edges.len());
        self.edges.push(e);
    }

    /// Index of an edge with the same coordinates as `e`, in either direction.
    pub fn find_equal_edge(&self, e: &Edge) -> Option<usize> {
        self.index.get(&oriented_key(e.coords())).copied()
    }

    pub fn get(&self, i: usize) -> &Edge {
        &self.edges[i]
    }

    pub fn get_mut(&mut self, i: usize) -> &mut Edge {
        &mut self.edges[i]
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Edge> {
        self.edges.iter_mut()
    }

    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}
