//! Robust planar predicates and point location.
//!
//! Purpose
//! - Supply the exact-sign primitives the topology graph is built on:
//!   orientation, segment intersection and point-in-geometry location.
//!
//! Why this design
//! - Every combinatorial decision (side of a line, intersects or not, on the
//!   boundary or not) goes through `orientation_index`, whose sign is exact.
//!   Computed coordinates only appear for proper crossings.

pub mod line_intersector;
pub mod locate;
pub mod orientation;

pub use line_intersector::{IntersectionKind, LineIntersector};
pub use locate::{locate_in_ring, locate_point_in_area, BoundaryNodeRule, PointLocator};
pub use orientation::{is_ccw, orientation_index, signed_area};
