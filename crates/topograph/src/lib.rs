//! Planar topology graph and overlay engine.
//!
//! Layers, bottom up:
//! - `geom`: coordinates, envelopes, the closed `Geometry` enum, precision
//!   models and the factory results are built through.
//! - `algorithm`: robust orientation, segment intersection, point location.
//! - `graph`: labelled edges, directed edges, node stars, planar graphs.
//! - `noding`: segment-intersection strategies and the noding validator.
//! - `overlay`: intersection, union, difference, symmetric difference.
//!
//! `api` re-exports the entry points most callers need; `rand` draws
//! reproducible random polygons for tests and benchmarks.

pub mod algorithm;
pub mod api;
pub mod error;
pub mod geom;
pub mod graph;
pub mod noding;
pub mod overlay;
pub mod rand;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{OverlayError, Result, TopologyError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{difference, intersection, overlay, overlay_with, sym_difference, union};
    pub use crate::error::{OverlayError, TopologyError};
    pub use crate::geom::{
        Coordinate, Envelope, Geometry, GeometryFactory, LineString, LinearRing, Location, Point,
        Polygon, PrecisionModel,
    };
    pub use crate::noding::IntersectorKind;
    pub use crate::overlay::{OpCode, OverlayCfg, OverlayStats};
}
