//! Geometry value layer consumed by the topology core.
//!
//! Purpose
//! - Provide the immutable values the overlay engine reads (coordinates,
//!   envelopes, the closed `Geometry` enum) and the factory it writes through.
//!
//! Conventions
//! - Coordinate equality and ordering are 2D; z/m are carried, never compared.
//! - Rings are closed (`first == last`); orientation is free on input.
//! - Constructors validate eagerly and return `OverlayError::InvalidArgument`.

mod coordinate;
mod factory;
mod geometry;
mod location;
mod precision;

pub(crate) use coordinate::CoordKey;
pub use coordinate::{Coordinate, Envelope};
pub use factory::GeometryFactory;
pub use geometry::{Geometry, LineString, LinearRing, Point, Polygon};
pub use location::Location;
pub use precision::PrecisionModel;

use crate::error::Result;

impl Geometry {
    /// Point at `(x, y)`.
    pub fn point(x: f64, y: f64) -> Geometry {
        Geometry::Point(Point::new(Coordinate::new(x, y)))
    }

    /// Line string through `pts`.
    pub fn line(pts: &[(f64, f64)]) -> Result<Geometry> {
        Ok(Geometry::LineString(LineString::new(to_coords(pts))?))
    }

    /// Polygon with shell `shell` (closed automatically) and no holes.
    pub fn polygon(shell: &[(f64, f64)]) -> Result<Geometry> {
        Self::polygon_with_holes(shell, &[])
    }

    /// Polygon from a shell and hole rings (each closed automatically).
    pub fn polygon_with_holes(shell: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Result<Geometry> {
        let shell = LinearRing::new(closed(shell))?;
        let holes = holes
            .iter()
            .map(|h| LinearRing::new(closed(h)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Geometry::Polygon(Polygon::new(shell, holes)?))
    }

    /// Axis-aligned rectangle polygon.
    pub fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Geometry> {
        Self::polygon(&[(min_x, min_y), (max_x, min_y), (max_x, max_y), (min_x, max_y)])
    }
}

fn to_coords(pts: &[(f64, f64)]) -> Vec<Coordinate> {
    pts.iter().map(|&p| Coordinate::from(p)).collect()
}

fn closed(pts: &[(f64, f64)]) -> Vec<Coordinate> {
    let mut coords = to_coords(pts);
    if let (Some(first), Some(last)) = (coords.first().copied(), coords.last()) {
        if !first.equals_2d(last) {
            coords.push(first);
        }
    }
    coords
}
