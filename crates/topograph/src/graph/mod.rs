//! Topology graph: labelled edges, directed edges, nodes and their stars.
//!
//! Purpose
//! - Represent the planar arrangement of the noded input edges with enough
//!   labelling (location relative to each input) to extract overlay results.
//!
//! Why this design
//! - Directed edges, their `sym`/`next` links and ring membership form cycles.
//!   They live in arenas (`Vec`) and refer to each other by index, so the
//!   graph is plain owned data with no reference counting.
//! - Nodes are keyed by exact 2D coordinate; there is never more than one
//!   node per coordinate.
//!
//! Code cross-refs: `noding::SegmentIntersector`, `overlay::OverlayOp`.

mod depth;
mod directed;
mod edge;
mod geometry_graph;
mod label;
mod node;
mod planar;
mod star;
mod types;

pub use depth::Depth;
pub use directed::{octant, DirectedEdge};
pub use edge::{Edge, EdgeIntersection, EdgeIntersectionList, EdgeList};
pub use geometry_graph::GeometryGraph;
pub use label::{Label, TopologyLocation};
pub use node::{Node, NodeMap};
pub use planar::PlanarGraph;
pub use star::DirectedEdgeStar;
pub use types::{DirEdgeId, EdgeId, NodeId, Position};

#[cfg(test)]
mod tests;
