//! Closed geometry enum and its atomic parts.
//!
//! Geometries are immutable values: constructors validate eagerly and every
//! accessor hands out borrowed slices. Collections own their members.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{Coordinate, Envelope};
use crate::algorithm::orientation::{is_ccw, signed_area};
use crate::error::{OverlayError, Result};

fn check_finite(coords: &[Coordinate]) -> Result<()> {
    match coords.iter().find(|c| !c.is_finite()) {
        Some(c) => Err(OverlayError::invalid(format!(
            "non-finite ordinate in ({}, {})",
            c.x, c.y
        ))),
        None => Ok(()),
    }
}

/// A single position, or the empty point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Option<Coordinate>", into = "Option<Coordinate>")]
pub struct Point {
    pub coord: Option<Coordinate>,
}

impl Point {
    pub fn new(coord: Coordinate) -> Self {
        Self { coord: Some(coord) }
    }

    pub fn empty() -> Self {
        Self { coord: None }
    }

    pub fn is_empty(&self) -> bool {
        self.coord.is_none()
    }
}

impl TryFrom<Option<Coordinate>> for Point {
    type Error = OverlayError;
    fn try_from(coord: Option<Coordinate>) -> Result<Self> {
        if let Some(c) = &coord {
            check_finite(std::slice::from_ref(c))?;
        }
        Ok(Self { coord })
    }
}

impl From<Point> for Option<Coordinate> {
    fn from(p: Point) -> Self {
        p.coord
    }
}

/// Open or closed path with zero or at least two vertices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct LineString {
    coords: Vec<Coordinate>,
}

impl LineString {
    pub fn new(coords: Vec<Coordinate>) -> Result<Self> {
        if coords.len() == 1 {
            return Err(OverlayError::invalid(
                "line string must have zero or at least two points",
            ));
        }
        check_finite(&coords)?;
        Ok(Self { coords })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(a), Some(b)) => a.equals_2d(b),
            _ => false,
        }
    }

    pub fn length(&self) -> f64 {
        self.coords.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }
}

impl TryFrom<Vec<Coordinate>> for LineString {
    type Error = OverlayError;
    fn try_from(coords: Vec<Coordinate>) -> Result<Self> {
        Self::new(coords)
    }
}

impl From<LineString> for Vec<Coordinate> {
    fn from(l: LineString) -> Self {
        l.coords
    }
}

/// Closed simple path: empty or at least four points with first == last.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct LinearRing {
    coords: Vec<Coordinate>,
}

impl LinearRing {
    pub fn new(coords: Vec<Coordinate>) -> Result<Self> {
        if coords.is_empty() {
            return Ok(Self { coords });
        }
        if !coords[0].equals_2d(&coords[coords.len() - 1]) {
            return Err(OverlayError::invalid("points of a linear ring must form a closed line"));
        }
        if coords.len() < 4 {
            return Err(OverlayError::invalid(format!(
                "invalid number of points in linear ring (found {} - must be 0 or >= 4)",
                coords.len()
            )));
        }
        check_finite(&coords)?;
        Ok(Self { coords })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn length(&self) -> f64 {
        self.coords.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    /// Unsigned enclosed area.
    pub fn area(&self) -> f64 {
        signed_area(&self.coords).abs()
    }

    /// Rotate to start at the minimum vertex and orient clockwise (`cw`) or not.
    fn normalize(&mut self, cw: bool) {
        if self.coords.len() < 4 {
            return;
        }
        let n = self.coords.len() - 1;
        let mut ring: Vec<Coordinate> = self.coords[..n].to_vec();
        let min_idx = (0..n)
            .min_by(|&a, &b| ring[a].compare_2d(&ring[b]))
            .unwrap_or(0);
        ring.rotate_left(min_idx);
        ring.push(ring[0]);
        if is_ccw(&ring) == cw {
            ring.reverse();
        }
        self.coords = ring;
    }
}

impl TryFrom<Vec<Coordinate>> for LinearRing {
    type Error = OverlayError;
    fn try_from(coords: Vec<Coordinate>) -> Result<Self> {
        Self::new(coords)
    }
}

impl From<LinearRing> for Vec<Coordinate> {
    fn from(r: LinearRing) -> Self {
        r.coords
    }
}

/// Shell with zero or more holes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonRings", into = "PolygonRings")]
pub struct Polygon {
    shell: LinearRing,
    holes: Vec<LinearRing>,
}

/// Wire form of a polygon; checked by `Polygon::new` on the way in.
#[derive(Serialize, Deserialize)]
struct PolygonRings {
    shell: LinearRing,
    #[serde(default)]
    holes: Vec<LinearRing>,
}

impl TryFrom<PolygonRings> for Polygon {
    type Error = OverlayError;
    fn try_from(rings: PolygonRings) -> Result<Self> {
        Self::new(rings.shell, rings.holes)
    }
}

impl From<Polygon> for PolygonRings {
    fn from(p: Polygon) -> Self {
        Self {
            shell: p.shell,
            holes: p.holes,
        }
    }
}

impl Polygon {
    pub fn new(shell: LinearRing, holes: Vec<LinearRing>) -> Result<Self> {
        if shell.is_empty() && holes.iter().any(|h| !h.is_empty()) {
            return Err(OverlayError::invalid("shell is empty but holes are not"));
        }
        Ok(Self { shell, holes })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn shell(&self) -> &LinearRing {
        &self.shell
    }

    #[inline]
    pub fn holes(&self) -> &[LinearRing] {
        &self.holes
    }

    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    pub fn area(&self) -> f64 {
        self.shell.area() - self.holes.iter().map(LinearRing::area).sum::<f64>()
    }

    pub fn envelope(&self) -> Envelope {
        Envelope::of_coords(self.shell.coords())
    }

    pub fn perimeter(&self) -> f64 {
        self.shell.length() + self.holes.iter().map(LinearRing::length).sum::<f64>()
    }

    fn normalize(&mut self) {
        self.shell.normalize(true);
        for h in &mut self.holes {
            h.normalize(false);
        }
        self.holes.sort_by(|a, b| compare_coords(a.coords(), b.coords()));
    }
}

/// Planar geometry. Dispatch is by pattern matching on the variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "geometry")]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(Vec<Point>),
    MultiLineString(Vec<LineString>),
    MultiPolygon(Vec<Polygon>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::LinearRing(_) => "LinearRing",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// Topological dimension: 0 puntal, 1 lineal, 2 areal, -1 empty collection.
    pub fn dimension(&self) -> i32 {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => 0,
            Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => 1,
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => 2,
            Geometry::GeometryCollection(gs) => gs.iter().map(Geometry::dimension).max().unwrap_or(-1),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(p) => p.is_empty(),
            Geometry::LineString(l) => l.is_empty(),
            Geometry::LinearRing(r) => r.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiPoint(ps) => ps.iter().all(Point::is_empty),
            Geometry::MultiLineString(ls) => ls.iter().all(LineString::is_empty),
            Geometry::MultiPolygon(ps) => ps.iter().all(Polygon::is_empty),
            Geometry::GeometryCollection(gs) => gs.iter().all(Geometry::is_empty),
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Geometry::MultiPoint(_)
                | Geometry::MultiLineString(_)
                | Geometry::MultiPolygon(_)
                | Geometry::GeometryCollection(_)
        )
    }

    /// All vertices in traversal order.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        let mut out = Vec::new();
        self.visit_coords(&mut |c| out.push(*c));
        out
    }

    fn visit_coords(&self, f: &mut impl FnMut(&Coordinate)) {
        match self {
            Geometry::Point(p) => p.coord.iter().for_each(&mut *f),
            Geometry::LineString(l) => l.coords().iter().for_each(&mut *f),
            Geometry::LinearRing(r) => r.coords().iter().for_each(&mut *f),
            Geometry::Polygon(p) => visit_polygon(p, f),
            Geometry::MultiPoint(ps) => ps.iter().filter_map(|p| p.coord.as_ref()).for_each(&mut *f),
            Geometry::MultiLineString(ls) => {
                for l in ls {
                    l.coords().iter().for_each(&mut *f);
                }
            }
            Geometry::MultiPolygon(ps) => {
                for p in ps {
                    visit_polygon(p, f);
                }
            }
            Geometry::GeometryCollection(gs) => {
                for g in gs {
                    g.visit_coords(f);
                }
            }
        }
    }

    pub fn num_points(&self) -> usize {
        let mut n = 0;
        self.visit_coords(&mut |_| n += 1);
        n
    }

    pub fn envelope(&self) -> Envelope {
        let mut env = Envelope::default();
        self.visit_coords(&mut |c| env.expand_to_include(c));
        env
    }

    pub fn num_geometries(&self) -> usize {
        match self {
            Geometry::MultiPoint(ps) => ps.len(),
            Geometry::MultiLineString(ls) => ls.len(),
            Geometry::MultiPolygon(ps) => ps.len(),
            Geometry::GeometryCollection(gs) => gs.len(),
            _ => 1,
        }
    }

    /// The `n`-th member of a collection (an atomic geometry is its own only member).
    pub fn geometry_n(&self, n: usize) -> Option<Geometry> {
        match self {
            Geometry::MultiPoint(ps) => ps.get(n).map(|p| Geometry::Point(*p)),
            Geometry::MultiLineString(ls) => ls.get(n).cloned().map(Geometry::LineString),
            Geometry::MultiPolygon(ps) => ps.get(n).cloned().map(Geometry::Polygon),
            Geometry::GeometryCollection(gs) => gs.get(n).cloned(),
            _ if n == 0 => Some(self.clone()),
            _ => None,
        }
    }

    /// Non-empty atomic members, collections flattened recursively.
    pub fn components(&self) -> Vec<Geometry> {
        let mut out = Vec::new();
        self.collect_components(&mut out);
        out
    }

    fn collect_components(&self, out: &mut Vec<Geometry>) {
        match self {
            Geometry::GeometryCollection(gs) => {
                for g in gs {
                    g.collect_components(out);
                }
            }
            g if g.is_collection() => {
                for i in 0..g.num_geometries() {
                    if let Some(member) = g.geometry_n(i) {
                        member.collect_components(out);
                    }
                }
            }
            g if !g.is_empty() => out.push(g.clone()),
            _ => {}
        }
    }

    pub fn area(&self) -> f64 {
        match self {
            Geometry::Polygon(p) => p.area(),
            Geometry::MultiPolygon(ps) => ps.iter().map(Polygon::area).sum(),
            Geometry::GeometryCollection(gs) => gs.iter().map(Geometry::area).sum(),
            _ => 0.0,
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Geometry::LineString(l) => l.length(),
            Geometry::LinearRing(r) => r.length(),
            Geometry::Polygon(p) => p.perimeter(),
            Geometry::MultiLineString(ls) => ls.iter().map(LineString::length).sum(),
            Geometry::MultiPolygon(ps) => ps.iter().map(Polygon::perimeter).sum(),
            Geometry::GeometryCollection(gs) => gs.iter().map(Geometry::length).sum(),
            _ => 0.0,
        }
    }

    /// Rank of the variant in the total order used by `compare`.
    fn class_rank(&self) -> u8 {
        match self {
            Geometry::Point(_) => 0,
            Geometry::MultiPoint(_) => 1,
            Geometry::LineString(_) => 2,
            Geometry::LinearRing(_) => 3,
            Geometry::MultiLineString(_) => 4,
            Geometry::Polygon(_) => 5,
            Geometry::MultiPolygon(_) => 6,
            Geometry::GeometryCollection(_) => 7,
        }
    }

    /// Total order: by variant rank, then structurally.
    ///
    /// Collections (including heterogeneous `GeometryCollection`s) compare
    /// member-wise in order; a strict prefix sorts first.
    pub fn compare(&self, other: &Geometry) -> Ordering {
        let rank = self.class_rank().cmp(&other.class_rank());
        if rank != Ordering::Equal {
            return rank;
        }
        match (self, other) {
            (Geometry::Point(a), Geometry::Point(b)) => compare_points(a, b),
            (Geometry::LineString(a), Geometry::LineString(b)) => compare_coords(a.coords(), b.coords()),
            (Geometry::LinearRing(a), Geometry::LinearRing(b)) => compare_coords(a.coords(), b.coords()),
            (Geometry::Polygon(a), Geometry::Polygon(b)) => compare_polygons(a, b),
            (Geometry::MultiPoint(a), Geometry::MultiPoint(b)) => compare_seq(a, b, compare_points),
            (Geometry::MultiLineString(a), Geometry::MultiLineString(b)) => {
                compare_seq(a, b, |x, y| compare_coords(x.coords(), y.coords()))
            }
            (Geometry::MultiPolygon(a), Geometry::MultiPolygon(b)) => compare_seq(a, b, compare_polygons),
            (Geometry::GeometryCollection(a), Geometry::GeometryCollection(b)) => {
                compare_seq(a, b, Geometry::compare)
            }
            _ => Ordering::Equal,
        }
    }

    /// Canonical form: shells clockwise, holes counter-clockwise, rings start at
    /// their minimum vertex, lines run from their smaller end, members sorted.
    pub fn normalize(&mut self) {
        match self {
            Geometry::Point(_) => {}
            Geometry::LineString(l) => normalize_line(l),
            Geometry::LinearRing(r) => r.normalize(true),
            Geometry::Polygon(p) => p.normalize(),
            Geometry::MultiPoint(ps) => ps.sort_by(compare_points),
            Geometry::MultiLineString(ls) => {
                ls.iter_mut().for_each(normalize_line);
                ls.sort_by(|a, b| compare_coords(a.coords(), b.coords()));
            }
            Geometry::MultiPolygon(ps) => {
                ps.iter_mut().for_each(Polygon::normalize);
                ps.sort_by(compare_polygons);
            }
            Geometry::GeometryCollection(gs) => {
                gs.iter_mut().for_each(Geometry::normalize);
                gs.sort_by(Geometry::compare);
            }
        }
    }

    pub fn normalized(&self) -> Geometry {
        let mut g = self.clone();
        g.normalize();
        g
    }
}

fn visit_polygon(p: &Polygon, f: &mut impl FnMut(&Coordinate)) {
    p.shell().coords().iter().for_each(&mut *f);
    for h in p.holes() {
        h.coords().iter().for_each(&mut *f);
    }
}

fn normalize_line(l: &mut LineString) {
    let n = l.coords.len();
    let order = (0..n / 2)
        .map(|i| l.coords[i].compare_2d(&l.coords[n - 1 - i]))
        .find(|o| *o != Ordering::Equal);
    if order == Some(Ordering::Greater) {
        l.coords.reverse();
    }
}

fn compare_points(a: &Point, b: &Point) -> Ordering {
    match (a.coord, b.coord) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.compare_2d(&y),
    }
}

fn compare_coords(a: &[Coordinate], b: &[Coordinate]) -> Ordering {
    compare_seq(a, b, |x, y| x.compare_2d(y))
}

fn compare_polygons(a: &Polygon, b: &Polygon) -> Ordering {
    compare_coords(a.shell().coords(), b.shell().coords())
        .then_with(|| compare_seq(a.holes(), b.holes(), |x, y| compare_coords(x.coords(), y.coords())))
}

fn compare_seq<T>(a: &[T], b: &[T], mut cmp: impl FnMut(&T, &T) -> Ordering) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let o = cmp(x, y);
        if o != Ordering::Equal {
            return o;
        }
    }
    a.len().cmp(&b.len())
}
