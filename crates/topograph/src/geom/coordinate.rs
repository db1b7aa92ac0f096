//! Planar coordinates and axis-aligned envelopes.
//!
//! - `Coordinate`: (x, y) with optional z/m ordinates. Equality and ordering are
//!   2D only; z/m ride along and never take part in topology.
//! - `Envelope`: closed axis-aligned box, possibly null (empty).

use std::cmp::Ordering;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

fn nan() -> f64 {
    f64::NAN
}

fn is_nan(v: &f64) -> bool {
    v.is_nan()
}

/// Planar coordinate; z and m are NaN when absent.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    #[serde(default = "nan", skip_serializing_if = "is_nan")]
    pub z: f64,
    #[serde(default = "nan", skip_serializing_if = "is_nan")]
    pub m: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: f64::NAN,
            m: f64::NAN,
        }
    }

    #[inline]
    pub const fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            m: f64::NAN,
        }
    }

    #[inline]
    pub fn equals_2d(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// 2D equality within an absolute tolerance.
    #[inline]
    pub fn equals_2d_eps(&self, other: &Coordinate, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    /// Equality including z (NaN z values compare equal to each other).
    pub fn equals_3d(&self, other: &Coordinate) -> bool {
        self.equals_2d(other) && (self.z == other.z || (self.z.is_nan() && other.z.is_nan()))
    }

    /// Lexicographic (x, then y) comparison.
    #[inline]
    pub fn compare_2d(&self, other: &Coordinate) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }

    #[inline]
    pub fn distance(&self, other: &Coordinate) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn from_vector(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }

    /// Bit-exact 2D key with `-0.0` folded onto `0.0`; used for ordered maps.
    #[inline]
    pub(crate) fn key(&self) -> CoordKey {
        CoordKey(self.x + 0.0, self.y + 0.0)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Coordinate::new(0.0, 0.0)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.equals_2d(other)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from(p: (f64, f64)) -> Self {
        Coordinate::new(p.0, p.1)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(p: [f64; 2]) -> Self {
        Coordinate::new(p[0], p[1])
    }
}

/// Totally ordered 2D key for `BTreeMap`/`HashMap` lookups.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CoordKey(f64, f64);

impl PartialEq for CoordKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for CoordKey {}
impl PartialOrd for CoordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for CoordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .total_cmp(&other.0)
            .then_with(|| self.1.total_cmp(&other.1))
    }
}
impl std::hash::Hash for CoordKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
        self.1.to_bits().hash(state);
    }
}

/// Closed axis-aligned box. `Envelope::default()` is the null envelope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }
}

impl Envelope {
    pub fn of_points(a: &Coordinate, b: &Coordinate) -> Self {
        Self {
            min_x: a.x.min(b.x),
            max_x: a.x.max(b.x),
            min_y: a.y.min(b.y),
            max_y: a.y.max(b.y),
        }
    }

    pub fn of_coords(coords: &[Coordinate]) -> Self {
        let mut env = Self::default();
        for c in coords {
            env.expand_to_include(c);
        }
        env
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.min_x > self.max_x
    }

    pub fn expand_to_include(&mut self, c: &Coordinate) {
        self.min_x = self.min_x.min(c.x);
        self.max_x = self.max_x.max(c.x);
        self.min_y = self.min_y.min(c.y);
        self.max_y = self.max_y.max(c.y);
    }

    pub fn expand_to_include_env(&mut self, other: &Envelope) {
        if other.is_null() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    #[inline]
    pub fn intersects(&self, other: &Envelope) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    #[inline]
    pub fn intersects_point(&self, p: &Coordinate) -> bool {
        !(p.x > self.max_x || p.x < self.min_x || p.y > self.max_y || p.y < self.min_y)
    }

    pub fn contains(&self, other: &Envelope) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Does the segment box `(p1, p2)` contain `q`?
    #[inline]
    pub fn segment_intersects_point(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> bool {
        q.x >= p1.x.min(p2.x) && q.x <= p1.x.max(p2.x) && q.y >= p1.y.min(p2.y) && q.y <= p1.y.max(p2.y)
    }

    /// Do the boxes of segments `(p1, p2)` and `(q1, q2)` overlap?
    #[inline]
    pub fn segments_intersect(
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> bool {
        let min_q = q1.x.min(q2.x);
        let max_q = q1.x.max(q2.x);
        let min_p = p1.x.min(p2.x);
        let max_p = p1.x.max(p2.x);
        if min_p > max_q || max_p < min_q {
            return false;
        }
        let min_q = q1.y.min(q2.y);
        let max_q = q1.y.max(q2.y);
        let min_p = p1.y.min(p2.y);
        let max_p = p1.y.max(p2.y);
        !(min_p > max_q || max_p < min_q)
    }
}
