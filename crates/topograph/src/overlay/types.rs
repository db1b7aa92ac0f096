//! Operation codes, configuration and run statistics for the overlay engine.

use serde::{Deserialize, Serialize};

use crate::geom::{Geometry, Location};
use crate::graph::Label;
use crate::noding::IntersectorKind;

/// Set-theoretic overlay operation. Discriminants follow the usual numbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpCode {
    Intersection = 1,
    Union = 2,
    Difference = 3,
    SymDifference = 4,
}

impl OpCode {
    pub const ALL: [OpCode; 4] = [
        OpCode::Intersection,
        OpCode::Union,
        OpCode::Difference,
        OpCode::SymDifference,
    ];

    /// Is a point with locations `loc0`, `loc1` (in A, B) part of the result?
    ///
    /// Boundary counts as interior.
    pub fn is_result_of_op(self, loc0: Location, loc1: Location) -> bool {
        let in0 = matches!(loc0, Location::Interior | Location::Boundary);
        let in1 = matches!(loc1, Location::Interior | Location::Boundary);
        match self {
            OpCode::Intersection => in0 && in1,
            OpCode::Union => in0 || in1,
            OpCode::Difference => in0 && !in1,
            OpCode::SymDifference => in0 != in1,
        }
    }

    /// `is_result_of_op` on the `On` locations of a label.
    pub fn is_result_of_label(self, label: &Label) -> bool {
        self.is_result_of_op(label.on(0), label.on(1))
    }

    /// Dimension of an empty result: min for intersection, max for union and
    /// symmetric difference, the first argument's for difference.
    pub fn result_dimension(self, g0: &Geometry, g1: &Geometry) -> i32 {
        let (dim0, dim1) = (g0.dimension(), g1.dimension());
        match self {
            OpCode::Intersection => dim0.min(dim1),
            OpCode::Union | OpCode::SymDifference => dim0.max(dim1),
            OpCode::Difference => dim0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OpCode::Intersection => "intersection",
            OpCode::Union => "union",
            OpCode::Difference => "difference",
            OpCode::SymDifference => "sym-difference",
        }
    }
}

impl TryFrom<i32> for OpCode {
    type Error = crate::error::OverlayError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(OpCode::Intersection),
            2 => Ok(OpCode::Union),
            3 => Ok(OpCode::Difference),
            4 => Ok(OpCode::SymDifference),
            _ => Err(crate::error::OverlayError::invalid(format!(
                "unknown overlay op code {code}"
            ))),
        }
    }
}

/// Overlay engine configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayCfg {
    /// Edge-set intersection strategy for self- and cross-noding. Validation
    /// always sweeps.
    pub strategy: IntersectorKind,
    /// Re-check the final edges for leftover interior intersections.
    pub validate_noding: bool,
}

impl Default for OverlayCfg {
    fn default() -> Self {
        Self {
            strategy: IntersectorKind::MonotoneChainSweep,
            validate_noding: true,
        }
    }
}

/// Counters gathered during one overlay run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OverlayStats {
    /// Segment pairs tested while self- and cross-noding.
    pub tests: usize,
    pub intersections: usize,
    pub proper_intersections: usize,
    /// Edges after splitting and merging duplicates.
    pub edges: usize,
    pub nodes: usize,
    pub polygons: usize,
    pub lines: usize,
    pub points: usize,
}
