//! Robust segment/segment and point/segment intersection.
//!
//! Topology decisions (does it intersect, is it proper, is it collinear) come
//! from the exact orientation predicate. Only the coordinates of a proper
//! crossing are computed in floating point, then snapped by the precision model.

use nalgebra::Vector3;

use super::orientation::orientation_index;
use crate::geom::{Coordinate, Envelope, PrecisionModel};

/// Outcome of the last `compute_*` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntersectionKind {
    #[default]
    None,
    Point,
    Collinear,
}

/// Stateful intersector: holds the inputs and results of the last computation.
#[derive(Clone, Debug, Default)]
pub struct LineIntersector {
    precision: PrecisionModel,
    kind: IntersectionKind,
    input: [[Coordinate; 2]; 2],
    int_pt: [Coordinate; 2],
    proper: bool,
}

impl LineIntersector {
    pub fn new(precision: PrecisionModel) -> Self {
        Self {
            precision,
            ..Self::default()
        }
    }

    /// Does `p` lie on segment `p1 p2`?
    pub fn compute_point_intersection(&mut self, p: &Coordinate, p1: &Coordinate, p2: &Coordinate) {
        self.proper = false;
        self.kind = IntersectionKind::None;
        if Envelope::segment_intersects_point(p1, p2, p)
            && orientation_index(p1, p2, p) == 0
            && orientation_index(p2, p1, p) == 0
        {
            self.proper = !(p.equals_2d(p1) || p.equals_2d(p2));
            self.int_pt[0] = *p;
            self.kind = IntersectionKind::Point;
        }
    }

    /// Intersect segment `p1 p2` with `q1 q2`.
    pub fn compute_intersection(
        &mut self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) {
        self.input = [[*p1, *p2], [*q1, *q2]];
        self.kind = self.compute_intersect(p1, p2, q1, q2);
    }

    fn compute_intersect(
        &mut self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> IntersectionKind {
        self.proper = false;
        if !Envelope::segments_intersect(p1, p2, q1, q2) {
            return IntersectionKind::None;
        }
        let pq1 = orientation_index(p1, p2, q1);
        let pq2 = orientation_index(p1, p2, q2);
        if (pq1 > 0 && pq2 > 0) || (pq1 < 0 && pq2 < 0) {
            return IntersectionKind::None;
        }
        let qp1 = orientation_index(q1, q2, p1);
        let qp2 = orientation_index(q1, q2, p2);
        if (qp1 > 0 && qp2 > 0) || (qp1 < 0 && qp2 < 0) {
            return IntersectionKind::None;
        }
        if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
            return self.compute_collinear(p1, p2, q1, q2);
        }
        if pq1 == 0 || pq2 == 0 || qp1 == 0 || qp2 == 0 {
            // An endpoint touches the other segment. Prefer shared endpoints so
            // the reported point is an input vertex, never a computed one.
            self.int_pt[0] = if p1.equals_2d(q1) || p1.equals_2d(q2) {
                *p1
            } else if p2.equals_2d(q1) || p2.equals_2d(q2) {
                *p2
            } else if pq1 == 0 {
                *q1
            } else if pq2 == 0 {
                *q2
            } else if qp1 == 0 {
                *p1
            } else {
                *p2
            };
        } else {
            self.proper = true;
            let pt = self.intersection(p1, p2, q1, q2);
            self.int_pt[0] = pt;
        }
        IntersectionKind::Point
    }

    fn compute_collinear(
        &mut self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> IntersectionKind {
        let q1_in_p = Envelope::segment_intersects_point(p1, p2, q1);
        let q2_in_p = Envelope::segment_intersects_point(p1, p2, q2);
        let p1_in_q = Envelope::segment_intersects_point(q1, q2, p1);
        let p2_in_q = Envelope::segment_intersects_point(q1, q2, p2);
        let (a, b, single) = if q1_in_p && q2_in_p {
            (*q1, *q2, false)
        } else if p1_in_q && p2_in_q {
            (*p1, *p2, false)
        } else if q1_in_p && p1_in_q {
            (*q1, *p1, q1.equals_2d(p1) && !q2_in_p && !p2_in_q)
        } else if q1_in_p && p2_in_q {
            (*q1, *p2, q1.equals_2d(p2) && !q2_in_p && !p1_in_q)
        } else if q2_in_p && p1_in_q {
            (*q2, *p1, q2.equals_2d(p1) && !q1_in_p && !p2_in_q)
        } else if q2_in_p && p2_in_q {
            (*q2, *p2, q2.equals_2d(p2) && !q1_in_p && !p1_in_q)
        } else {
            return IntersectionKind::None;
        };
        self.int_pt = [a, b];
        if single {
            IntersectionKind::Point
        } else {
            IntersectionKind::Collinear
        }
    }

    /// Crossing point of two properly intersecting segments.
    ///
    /// Computed in homogeneous coordinates about the midpoint of the envelope
    /// overlap; a result outside both segment envelopes falls back to the
    /// endpoint nearest the other segment.
    fn intersection(
        &self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> Coordinate {
        let mid_x = (p1.x.min(p2.x).max(q1.x.min(q2.x)) + p1.x.max(p2.x).min(q1.x.max(q2.x))) / 2.0;
        let mid_y = (p1.y.min(p2.y).max(q1.y.min(q2.y)) + p1.y.max(p2.y).min(q1.y.max(q2.y))) / 2.0;
        let h = |c: &Coordinate| Vector3::new(c.x - mid_x, c.y - mid_y, 1.0);
        let line_p = h(p1).cross(&h(p2));
        let line_q = h(q1).cross(&h(q2));
        let x = line_p.cross(&line_q);
        let mut pt = Coordinate::new(x.x / x.z + mid_x, x.y / x.z + mid_y);
        if !pt.is_finite() || !self.in_segment_envelopes(&pt) {
            pt = nearest_endpoint(p1, p2, q1, q2);
        }
        self.precision.make_precise(&mut pt);
        pt
    }

    fn in_segment_envelopes(&self, pt: &Coordinate) -> bool {
        let [[p1, p2], [q1, q2]] = &self.input;
        Envelope::segment_intersects_point(p1, p2, pt) && Envelope::segment_intersects_point(q1, q2, pt)
    }

    #[inline]
    pub fn kind(&self) -> IntersectionKind {
        self.kind
    }

    #[inline]
    pub fn has_intersection(&self) -> bool {
        self.kind != IntersectionKind::None
    }

    #[inline]
    pub fn is_collinear(&self) -> bool {
        self.kind == IntersectionKind::Collinear
    }

    /// Number of intersection points (0, 1 or 2).
    #[inline]
    pub fn intersection_num(&self) -> usize {
        match self.kind {
            IntersectionKind::None => 0,
            IntersectionKind::Point => 1,
            IntersectionKind::Collinear => 2,
        }
    }

    #[inline]
    pub fn intersection_pt(&self, i: usize) -> Coordinate {
        self.int_pt[i]
    }

    /// Single intersection strictly interior to both segments.
    #[inline]
    pub fn is_proper(&self) -> bool {
        self.has_intersection() && self.proper
    }

    /// Is `pt` one of the computed intersection points?
    pub fn is_intersection(&self, pt: &Coordinate) -> bool {
        self.int_pt[..self.intersection_num()]
            .iter()
            .any(|p| p.equals_2d(pt))
    }

    /// Is some intersection point interior to at least one input segment?
    pub fn is_interior_intersection(&self) -> bool {
        self.is_interior_intersection_on(0) || self.is_interior_intersection_on(1)
    }

    /// Is some intersection point interior to input segment `input_index`?
    pub fn is_interior_intersection_on(&self, input_index: usize) -> bool {
        let [a, b] = &self.input[input_index];
        self.int_pt[..self.intersection_num()]
            .iter()
            .any(|p| !(p.equals_2d(a) || p.equals_2d(b)))
    }

    /// Distance of intersection `int_index` along input segment `seg_index`.
    pub fn edge_distance(&self, seg_index: usize, int_index: usize) -> f64 {
        let [p0, p1] = &self.input[seg_index];
        compute_edge_distance(&self.int_pt[int_index], p0, p1)
    }
}

/// Monotone (not Euclidean) distance of `p` along segment `p0 p1`.
///
/// Uses the dominant axis so that ordering points on one segment is exact.
pub fn compute_edge_distance(p: &Coordinate, p0: &Coordinate, p1: &Coordinate) -> f64 {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();
    if p.equals_2d(p0) {
        0.0
    } else if p.equals_2d(p1) {
        dx.max(dy)
    } else {
        let pdx = (p.x - p0.x).abs();
        let pdy = (p.y - p0.y).abs();
        let dist = if dx > dy { pdx } else { pdy };
        // Nonzero for any point other than p0.
        if dist == 0.0 {
            pdx.max(pdy)
        } else {
            dist
        }
    }
}

/// Euclidean distance from `p` to segment `a b`.
pub fn distance_point_segment(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    let (pv, av, bv) = (p.to_vector(), a.to_vector(), b.to_vector());
    let ab = bv - av;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (pv - av).norm();
    }
    let t = ((pv - av).dot(&ab) / len2).clamp(0.0, 1.0);
    (pv - (av + ab * t)).norm()
}

fn nearest_endpoint(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> Coordinate {
    let candidates = [
        (*p1, distance_point_segment(p1, q1, q2)),
        (*p2, distance_point_segment(p2, q1, q2)),
        (*q1, distance_point_segment(q1, p1, p2)),
        (*q2, distance_point_segment(q2, p1, p2)),
    ];
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.1 < best.1 {
            best = *c;
        }
    }
    best.0
}
