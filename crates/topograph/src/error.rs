//! Error types shared by the graph, noding and overlay layers.
//!
//! - `TopologyError`: the computation reached an inconsistent topological state
//!   (invalid input or a numerical robustness limit). Callers may retry with
//!   snapped or reduced-precision inputs.
//! - `OverlayError::InvalidArgument`: malformed input values, rejected eagerly.

use crate::geom::Coordinate;

/// Result alias used across the crate.
pub type Result<T, E = OverlayError> = std::result::Result<T, E>;

/// Inconsistent topology detected while building or walking a graph.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}{}", fmt_location(.location))]
pub struct TopologyError {
    pub message: String,
    pub location: Option<Coordinate>,
}

impl TopologyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    pub fn at(message: impl Into<String>, location: Coordinate) -> Self {
        Self {
            message: message.into(),
            location: Some(location),
        }
    }
}

fn fmt_location(location: &Option<Coordinate>) -> String {
    match location {
        Some(c) => format!(" [ ({}, {}) ]", c.x, c.y),
        None => String::new(),
    }
}

/// Top-level error for geometry construction and overlay.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OverlayError {
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl OverlayError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// True when the failure is a robustness/topology failure (retryable by snapping).
    pub fn is_topology(&self) -> bool {
        matches!(self, Self::Topology(_))
    }
}
