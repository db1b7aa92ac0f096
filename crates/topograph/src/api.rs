//! Curated entry points for callers.
//!
//! Important
//! - Every entry point takes the same cheap exits (empty inputs, disjoint
//!   envelopes) before falling back to the engine. A short-circuited call
//!   reports `OverlayStats::default()`.
//! - Errors: `OverlayError::Topology` when the engine reaches an inconsistent
//!   state (callers may retry on snapped input), `InvalidArgument` for
//!   mixed-dimension collections.

use tracing::debug;

use crate::error::Result;
use crate::geom::{Geometry, GeometryFactory};
use crate::overlay::{check_not_mixed_collection, OpCode, OverlayCfg, OverlayOp, OverlayStats};

pub use crate::algorithm::{BoundaryNodeRule, PointLocator};
pub use crate::noding::IntersectorKind;
pub use crate::rand::{draw_star_polygon, ReplayToken, StarCfg, VertexCount};

/// Overlay with the default configuration.
pub fn overlay(a: &Geometry, b: &Geometry, op: OpCode) -> Result<Geometry> {
    overlay_with(a, b, op, OverlayCfg::default(), GeometryFactory::default()).map(|(g, _)| g)
}

/// Overlay with an explicit configuration and result factory.
pub fn overlay_with(
    a: &Geometry,
    b: &Geometry,
    op: OpCode,
    cfg: OverlayCfg,
    factory: GeometryFactory,
) -> Result<(Geometry, OverlayStats)> {
    check_args(a, b)?;
    if let Some(g) = short_circuit(a, b, op, &factory) {
        return Ok((g, OverlayStats::default()));
    }
    let mut overlay = OverlayOp::new(a, b)?.with_config(cfg).with_factory(factory);
    let result = overlay.result_geometry(op)?;
    Ok((result, overlay.stats()))
}

/// Points common to `a` and `b`.
pub fn intersection(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(a, b, OpCode::Intersection)
}

/// Points in `a` or `b`.
pub fn union(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(a, b, OpCode::Union)
}

/// Points in `a` and not in `b`.
pub fn difference(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(a, b, OpCode::Difference)
}

/// Points in exactly one of `a` and `b`.
pub fn sym_difference(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    overlay(a, b, OpCode::SymDifference)
}

/// Result of `op` when no noding is needed, or `None` to run the engine.
fn short_circuit(a: &Geometry, b: &Geometry, op: OpCode, factory: &GeometryFactory) -> Option<Geometry> {
    let disjoint = !a.envelope().intersects(&b.envelope());
    match op {
        OpCode::Intersection => {
            if a.is_empty() || b.is_empty() || disjoint {
                debug!("intersection short-circuit: empty or disjoint inputs");
                return Some(empty_result(factory, op, a, b));
            }
            None
        }
        OpCode::Difference => {
            if a.is_empty() {
                debug!("difference short-circuit: empty first input");
                return Some(empty_result(factory, op, a, b));
            }
            if b.is_empty() || disjoint {
                debug!("difference short-circuit: nothing to remove");
                return Some(a.clone());
            }
            None
        }
        OpCode::Union | OpCode::SymDifference => combine_trivial(a, b, op, factory),
    }
}

fn check_args(a: &Geometry, b: &Geometry) -> Result<()> {
    check_not_mixed_collection(a)?;
    check_not_mixed_collection(b)
}

fn empty_result(factory: &GeometryFactory, op: OpCode, a: &Geometry, b: &Geometry) -> Geometry {
    factory.create_empty(op.result_dimension(a, b))
}

/// Union-like results that need no noding: an empty side, or disjoint envelopes.
fn combine_trivial(a: &Geometry, b: &Geometry, op: OpCode, factory: &GeometryFactory) -> Option<Geometry> {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Some(empty_result(factory, op, a, b)),
        (true, false) => return Some(b.clone()),
        (false, true) => return Some(a.clone()),
        (false, false) => {}
    }
    if a.envelope().intersects(&b.envelope()) {
        return None;
    }
    debug!(op = op.name(), "short-circuit: disjoint envelopes");
    let mut parts = a.components();
    parts.extend(b.components());
    Some(factory.build_geometry(parts))
}
