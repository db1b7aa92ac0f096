//! Geometry factory: the only place overlay results are assembled.

use super::{Coordinate, Geometry, LineString, LinearRing, Point, Polygon, PrecisionModel};
use crate::error::Result;

/// Builds geometries that share one precision model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometryFactory {
    pub precision: PrecisionModel,
}

impl GeometryFactory {
    pub fn new(precision: PrecisionModel) -> Self {
        Self { precision }
    }

    pub fn create_point(&self, c: Coordinate) -> Geometry {
        Geometry::Point(Point::new(c))
    }

    pub fn create_line_string(&self, coords: Vec<Coordinate>) -> Result<Geometry> {
        Ok(Geometry::LineString(LineString::new(coords)?))
    }

    pub fn create_linear_ring(&self, coords: Vec<Coordinate>) -> Result<LinearRing> {
        LinearRing::new(coords)
    }

    pub fn create_polygon(&self, shell: LinearRing, holes: Vec<LinearRing>) -> Result<Geometry> {
        Ok(Geometry::Polygon(Polygon::new(shell, holes)?))
    }

    /// Empty atomic geometry of the given dimension (-1 gives an empty collection).
    pub fn create_empty(&self, dimension: i32) -> Geometry {
        match dimension {
            0 => Geometry::Point(Point::empty()),
            1 => Geometry::LineString(LineString::empty()),
            2 => Geometry::Polygon(Polygon::empty()),
            _ => Geometry::GeometryCollection(Vec::new()),
        }
    }

    /// Narrowest geometry holding all of `geoms`.
    ///
    /// - no members: empty `GeometryCollection`
    /// - one member: the member itself
    /// - all atomic members of one kind: the matching `Multi*`
    /// - otherwise: `GeometryCollection`
    pub fn build_geometry(&self, mut geoms: Vec<Geometry>) -> Geometry {
        if geoms.len() == 1 {
            return geoms.remove(0);
        }
        if geoms.is_empty() {
            return Geometry::GeometryCollection(geoms);
        }
        if geoms.iter().all(|g| matches!(g, Geometry::Point(_))) {
            return Geometry::MultiPoint(
                geoms
                    .into_iter()
                    .filter_map(|g| match g {
                        Geometry::Point(p) => Some(p),
                        _ => None,
                    })
                    .collect(),
            );
        }
        if geoms.iter().all(|g| matches!(g, Geometry::LineString(_))) {
            return Geometry::MultiLineString(
                geoms
                    .into_iter()
                    .filter_map(|g| match g {
                        Geometry::LineString(l) => Some(l),
                        _ => None,
                    })
                    .collect(),
            );
        }
        if geoms.iter().all(|g| matches!(g, Geometry::Polygon(_))) {
            return Geometry::MultiPolygon(
                geoms
                    .into_iter()
                    .filter_map(|g| match g {
                        Geometry::Polygon(p) => Some(p),
                        _ => None,
                    })
                    .collect(),
            );
        }
        Geometry::GeometryCollection(geoms)
    }
}
