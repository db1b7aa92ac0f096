//! Overlay engine: intersection, union, difference and symmetric difference.
//!
//! Purpose
//! - Compute set-theoretic combinations of two geometries of any dimension by
//!   noding them together, labelling the merged graph with each edge's location
//!   relative to both inputs, and reading the result off the labels.
//!
//! Why this design
//! - Phases run strictly in order and each one only reads what the previous
//!   ones produced; any inconsistency aborts the run with a `TopologyError`
//!   rather than returning a partial result.
//! - Results are extracted areas first, then lines, then points: lines and
//!   points covered by an already-built higher-dimensional part are dropped.
//! - Result area edges have the result interior on their right, so shells
//!   come out clockwise and holes counter-clockwise.
//!
//! Code cross-refs: `graph::{GeometryGraph, PlanarGraph, DirectedEdgeStar}`,
//! `noding::{SegmentIntersector, EdgeNodingValidator}`.

mod edge_ring;
mod line_builder;
mod op;
mod point_builder;
mod polygon_builder;
mod types;

pub use edge_ring::{EdgeRing, RingKind};
pub use line_builder::LineBuilder;
pub use op::OverlayOp;
pub(crate) use op::check_not_mixed_collection;
pub use point_builder::PointBuilder;
pub use polygon_builder::PolygonBuilder;
pub use types::{OpCode, OverlayCfg, OverlayStats};

use crate::algorithm::PointLocator;
use crate::geom::{Coordinate, Geometry, Location};

/// Does any of `geoms` contain `c` in its interior or boundary?
pub(crate) fn is_covered(locator: &PointLocator, c: &Coordinate, geoms: &[Geometry]) -> bool {
    geoms.iter().any(|g| locator.locate(c, g) != Location::Exterior)
}

#[cfg(test)]
mod tests;
