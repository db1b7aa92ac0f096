//! Orientation predicate and ring orientation.
//!
//! `orientation_index` is exact in sign for all finite inputs: a cheap
//! floating-point filter settles the clear cases, the rest are evaluated in
//! double-double arithmetic (~106 bits).

use crate::geom::Coordinate;

/// `q` lies to the right of `p1 -> p2`.
pub const CLOCKWISE: i32 = -1;
/// `q` lies on the line through `p1`, `p2`.
pub const COLLINEAR: i32 = 0;
/// `q` lies to the left of `p1 -> p2`.
pub const COUNTERCLOCKWISE: i32 = 1;

const DP_SAFE_EPSILON: f64 = 1e-15;

/// Orientation of `q` relative to the directed line `p1 -> p2`.
pub fn orientation_index(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> i32 {
    if let Some(i) = orientation_filter(p1, p2, q) {
        return i;
    }
    let dx1 = Dd::diff(p2.x, p1.x);
    let dy1 = Dd::diff(p2.y, p1.y);
    let dx2 = Dd::diff(q.x, p2.x);
    let dy2 = Dd::diff(q.y, p2.y);
    dx1.mul(dy2).sub(dy1.mul(dx2)).signum()
}

/// Fast path; `None` when the determinant is too close to zero to trust.
fn orientation_filter(pa: &Coordinate, pb: &Coordinate, pc: &Coordinate) -> Option<i32> {
    let detleft = (pa.x - pc.x) * (pb.y - pc.y);
    let detright = (pa.y - pc.y) * (pb.x - pc.x);
    let det = detleft - detright;
    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return Some(signum(det));
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return Some(signum(det));
        }
        -detleft - detright
    } else {
        return Some(signum(det));
    };
    let errbound = DP_SAFE_EPSILON * detsum;
    if det >= errbound || -det >= errbound {
        return Some(signum(det));
    }
    None
}

#[inline]
fn signum(v: f64) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Unevaluated sum `hi + lo` with `|lo| <= ulp(hi)/2`.
#[derive(Clone, Copy, Debug)]
struct Dd {
    hi: f64,
    lo: f64,
}

impl Dd {
    /// Exact `a - b`.
    fn diff(a: f64, b: f64) -> Dd {
        let (s, e) = two_sum(a, -b);
        Dd { hi: s, lo: e }
    }

    fn add(self, o: Dd) -> Dd {
        let (s, e) = two_sum(self.hi, o.hi);
        let e = e + self.lo + o.lo;
        let (hi, lo) = quick_two_sum(s, e);
        Dd { hi, lo }
    }

    fn sub(self, o: Dd) -> Dd {
        self.add(Dd {
            hi: -o.hi,
            lo: -o.lo,
        })
    }

    fn mul(self, o: Dd) -> Dd {
        let (p, e) = two_prod(self.hi, o.hi);
        let e = e + (self.hi * o.lo + self.lo * o.hi);
        let (hi, lo) = quick_two_sum(p, e);
        Dd { hi, lo }
    }

    fn signum(self) -> i32 {
        if self.hi > 0.0 {
            1
        } else if self.hi < 0.0 {
            -1
        } else {
            signum(self.lo)
        }
    }
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    (s, (a - (s - bb)) + (b - bb))
}

#[inline]
fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    (s, b - (s - a))
}

#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

/// Shoelace signed area; positive for counter-clockwise rings.
pub fn signed_area(ring: &[Coordinate]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    // Shift to the first vertex to limit cancellation.
    let x0 = ring[0].x;
    let mut sum = 0.0;
    for i in 1..ring.len() - 1 {
        let x = ring[i].x - x0;
        let y1 = ring[i + 1].y;
        let y2 = ring[i - 1].y;
        sum += x * (y2 - y1);
    }
    -sum / 2.0
}

/// Is the closed ring counter-clockwise?
///
/// Decided at the highest vertex, so it is correct for any ring that is
/// non-self-crossing at that vertex. Flat or collapsed rings report `false`.
pub fn is_ccw(ring: &[Coordinate]) -> bool {
    if ring.len() < 4 {
        return false;
    }
    let n_pts = ring.len() - 1;
    // Find the last upward segment ending at the highest point.
    let mut up_hi = ring[0];
    let mut prev_y = up_hi.y;
    let mut up_low: Option<Coordinate> = None;
    let mut i_up_hi = 0usize;
    for i in 1..=n_pts {
        let py = ring[i].y;
        if py > prev_y && py >= up_hi.y {
            up_hi = ring[i];
            i_up_hi = i;
            up_low = Some(ring[i - 1]);
        }
        prev_y = py;
    }
    let Some(up_low) = up_low else {
        return false;
    };
    // Walk forward past any flat top to the first downward segment.
    let mut i_down_low = i_up_hi;
    loop {
        i_down_low = (i_down_low + 1) % n_pts;
        if i_down_low == i_up_hi || ring[i_down_low].y != up_hi.y {
            break;
        }
    }
    let down_low = ring[i_down_low];
    let i_down_hi = if i_down_low > 0 { i_down_low - 1 } else { n_pts - 1 };
    let down_hi = ring[i_down_hi];

    if up_hi.equals_2d(&down_hi) {
        // Single high point: the turn direction decides.
        if up_low.equals_2d(&up_hi) || down_low.equals_2d(&up_hi) || up_low.equals_2d(&down_low) {
            return false;
        }
        orientation_index(&up_low, &up_hi, &down_low) == COUNTERCLOCKWISE
    } else {
        // Flat top: travel direction along it decides.
        down_hi.x - up_hi.x < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn orientation_basic() {
        assert_eq!(orientation_index(&c(0.0, 0.0), &c(1.0, 0.0), &c(0.5, 1.0)), COUNTERCLOCKWISE);
        assert_eq!(orientation_index(&c(0.0, 0.0), &c(1.0, 0.0), &c(0.5, -1.0)), CLOCKWISE);
        assert_eq!(orientation_index(&c(0.0, 0.0), &c(1.0, 1.0), &c(3.0, 3.0)), COLLINEAR);
    }

    #[test]
    fn orientation_survives_near_collinear_inputs() {
        // Classic failure case for naive double evaluation.
        let p1 = c(0.5, 0.5);
        let p2 = c(12.0, 12.0);
        let q = c(24.0, 24.0);
        assert_eq!(orientation_index(&p1, &p2, &q), COLLINEAR);
        let q_off = c(24.0, 24.0 + 1e-14);
        assert_eq!(orientation_index(&p1, &p2, &q_off), COUNTERCLOCKWISE);
        // Consistency under permutation.
        let a = c(0.1, 0.1);
        let b = c(0.3, 0.3 + 1e-17);
        let d = c(0.7, 0.7);
        let o1 = orientation_index(&a, &b, &d);
        let o2 = orientation_index(&b, &d, &a);
        let o3 = orientation_index(&d, &a, &b);
        assert_eq!(o1, o2);
        assert_eq!(o2, o3);
    }

    #[test]
    fn ring_orientation_and_area() {
        let ccw = [c(0.0, 0.0), c(2.0, 0.0), c(2.0, 2.0), c(0.0, 2.0), c(0.0, 0.0)];
        assert!(is_ccw(&ccw));
        assert!((signed_area(&ccw) - 4.0).abs() < 1e-12);
        let mut cw = ccw;
        cw.reverse();
        assert!(!is_ccw(&cw));
        assert!((signed_area(&cw) + 4.0).abs() < 1e-12);
        // Flat top with the high point at the ring start.
        let flat = [c(0.0, 2.0), c(0.0, 0.0), c(3.0, 0.0), c(3.0, 2.0), c(0.0, 2.0)];
        assert!(is_ccw(&flat));
        let collapsed = [c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0), c(0.0, 0.0)];
        assert!(!is_ccw(&collapsed));
    }
}
