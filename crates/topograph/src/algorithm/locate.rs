//! Point location against rings, lines and whole geometries.
//!
//! - `locate_in_ring`: ray-crossing count with exact on-segment detection.
//! - `PointLocator`: full location (points, lines, areas, collections) under a
//!   `BoundaryNodeRule`.
//! - `locate_point_in_area`: location against the areal components only.

use super::orientation::{orientation_index, COLLINEAR, COUNTERCLOCKWISE};
use super::LineIntersector;
use crate::geom::{Coordinate, Envelope, Geometry, Location, Polygon};

/// Decides whether a line endpoint shared by `count` line ends is on the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryNodeRule {
    /// Odd number of incident ends (OGC default).
    #[default]
    Mod2,
    /// Every endpoint.
    EndPoint,
    /// Endpoints shared by more than one end.
    MultiValentEndPoint,
    /// Endpoints with exactly one end.
    MonoValentEndPoint,
}

impl BoundaryNodeRule {
    #[inline]
    pub fn is_in_boundary(self, count: usize) -> bool {
        match self {
            BoundaryNodeRule::Mod2 => count % 2 == 1,
            BoundaryNodeRule::EndPoint => count > 0,
            BoundaryNodeRule::MultiValentEndPoint => count > 1,
            BoundaryNodeRule::MonoValentEndPoint => count == 1,
        }
    }
}

/// Location of `p` relative to the closed ring `ring`.
pub fn locate_in_ring(p: &Coordinate, ring: &[Coordinate]) -> Location {
    let mut crossings = 0usize;
    for i in 1..ring.len() {
        let p1 = &ring[i];
        let p2 = &ring[i - 1];
        // Segment strictly left of p.
        if p1.x < p.x && p2.x < p.x {
            continue;
        }
        if p.equals_2d(p2) {
            return Location::Boundary;
        }
        // Horizontal segment on the ray line.
        if p1.y == p.y && p2.y == p.y {
            if p.x >= p1.x.min(p2.x) && p.x <= p1.x.max(p2.x) {
                return Location::Boundary;
            }
            continue;
        }
        // Half-open rule on y avoids double counting at vertices.
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation_index(p1, p2, p);
            if orient == COLLINEAR {
                return Location::Boundary;
            }
            if p2.y < p1.y {
                orient = -orient;
            }
            if orient == COUNTERCLOCKWISE {
                crossings += 1;
            }
        }
    }
    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Does `p` lie on the path `line` (vertices or segment interiors)?
pub fn is_on_line(p: &Coordinate, line: &[Coordinate]) -> bool {
    let mut li = LineIntersector::default();
    line.windows(2).any(|w| {
        li.compute_point_intersection(p, &w[0], &w[1]);
        li.has_intersection()
    })
}

fn locate_in_polygon(p: &Coordinate, poly: &Polygon) -> Location {
    if poly.is_empty() {
        return Location::Exterior;
    }
    let shell = poly.shell().coords();
    if !Envelope::of_coords(shell).intersects_point(p) {
        return Location::Exterior;
    }
    match locate_in_ring(p, shell) {
        Location::Exterior => return Location::Exterior,
        Location::Boundary => return Location::Boundary,
        _ => {}
    }
    for hole in poly.holes() {
        match locate_in_ring(p, hole.coords()) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            _ => {}
        }
    }
    Location::Interior
}

fn locate_on_line(p: &Coordinate, coords: &[Coordinate]) -> Location {
    if coords.is_empty() || !Envelope::of_coords(coords).intersects_point(p) {
        return Location::Exterior;
    }
    let closed = coords[0].equals_2d(&coords[coords.len() - 1]);
    if !closed && (p.equals_2d(&coords[0]) || p.equals_2d(&coords[coords.len() - 1])) {
        return Location::Boundary;
    }
    if is_on_line(p, coords) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Location of `p` against the areal parts of `geom`; lines and points are ignored.
pub fn locate_point_in_area(p: &Coordinate, geom: &Geometry) -> Location {
    match geom {
        Geometry::Polygon(poly) => locate_in_polygon(p, poly),
        Geometry::MultiPolygon(polys) => polys
            .iter()
            .map(|poly| locate_in_polygon(p, poly))
            .find(|loc| *loc != Location::Exterior)
            .unwrap_or(Location::Exterior),
        Geometry::GeometryCollection(gs) => gs
            .iter()
            .map(|g| locate_point_in_area(p, g))
            .find(|loc| *loc != Location::Exterior)
            .unwrap_or(Location::Exterior),
        _ => Location::Exterior,
    }
}

/// Full point location honoring a boundary node rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointLocator {
    pub rule: BoundaryNodeRule,
}

#[derive(Default)]
struct LocationTally {
    is_in: bool,
    num_boundaries: usize,
}

impl LocationTally {
    fn update(&mut self, loc: Location) {
        match loc {
            Location::Interior => self.is_in = true,
            Location::Boundary => self.num_boundaries += 1,
            _ => {}
        }
    }
}

impl PointLocator {
    pub fn new(rule: BoundaryNodeRule) -> Self {
        Self { rule }
    }

    /// Does `p` lie in the interior or boundary of `geom`?
    pub fn intersects(&self, p: &Coordinate, geom: &Geometry) -> bool {
        self.locate(p, geom) != Location::Exterior
    }

    pub fn locate(&self, p: &Coordinate, geom: &Geometry) -> Location {
        if geom.is_empty() {
            return Location::Exterior;
        }
        match geom {
            Geometry::LineString(l) => locate_on_line(p, l.coords()),
            Geometry::Polygon(poly) => locate_in_polygon(p, poly),
            _ => {
                let mut tally = LocationTally::default();
                Self::compute_location(p, geom, &mut tally);
                if self.rule.is_in_boundary(tally.num_boundaries) {
                    Location::Boundary
                } else if tally.num_boundaries > 0 || tally.is_in {
                    Location::Interior
                } else {
                    Location::Exterior
                }
            }
        }
    }

    fn compute_location(p: &Coordinate, geom: &Geometry, tally: &mut LocationTally) {
        match geom {
            Geometry::Point(pt) => {
                if pt.coord.is_some_and(|c| c.equals_2d(p)) {
                    tally.update(Location::Interior);
                }
            }
            Geometry::LineString(l) => tally.update(locate_on_line(p, l.coords())),
            Geometry::LinearRing(r) => tally.update(locate_on_line(p, r.coords())),
            Geometry::Polygon(poly) => tally.update(locate_in_polygon(p, poly)),
            Geometry::MultiPoint(pts) => {
                if pts.iter().any(|pt| pt.coord.is_some_and(|c| c.equals_2d(p))) {
                    tally.update(Location::Interior);
                }
            }
            Geometry::MultiLineString(ls) => {
                for l in ls {
                    tally.update(locate_on_line(p, l.coords()));
                }
            }
            Geometry::MultiPolygon(polys) => {
                for poly in polys {
                    tally.update(locate_in_polygon(p, poly));
                }
            }
            Geometry::GeometryCollection(gs) => {
                for g in gs {
                    Self::compute_location(p, g, tally);
                }
            }
        }
    }
}
