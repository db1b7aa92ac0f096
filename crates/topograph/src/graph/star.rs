//! Counter-clockwise star of directed edges leaving one node.
//!
//! Labelling walks the star in angular order: the region between two
//! consecutive edges is left of the first and right of the second, so side
//! locations propagate around the node. Ring linking uses the same order.

use tracing::trace;

use super::{DirEdgeId, DirectedEdge, Edge, Label, Position};
use crate::algorithm::locate_point_in_area;
use crate::error::TopologyError;
use crate::geom::{Coordinate, Geometry, Location};

#[derive(Clone, Debug, Default)]
pub struct DirectedEdgeStar {
    edges: Vec<DirEdgeId>,
    /// Interior for a geometry if some incident edge is on it.
    pub(crate) label: Label,
    pt_in_area: [Location; 2],
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LinkState {
    ScanningForIncoming,
    LinkingToOutgoing,
}

impl DirectedEdgeStar {
    /// Outgoing edges in counter-clockwise order from the positive x axis.
    pub fn edges(&self) -> &[DirEdgeId] {
        &self.edges
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Insert in angular order; an edge with an identical direction replaces the old one.
    pub(crate) fn insert(&mut self, id: DirEdgeId, des: &[DirectedEdge]) {
        let de = &des[id.0];
        match self
            .edges
            .binary_search_by(|other| des[other.0].compare_direction(de))
        {
            Ok(pos) => self.edges[pos] = id,
            Err(pos) => self.edges.insert(pos, id),
        }
    }

    pub fn index_of(&self, id: DirEdgeId) -> Option<usize> {
        self.edges.iter().position(|e| *e == id)
    }

    /// Next edge counter-clockwise after position `i`, wrapping around.
    pub fn next_ccw(&self, i: usize) -> DirEdgeId {
        self.edges[(i + 1) % self.edges.len()]
    }

    pub fn outgoing_degree(&self, des: &[DirectedEdge]) -> usize {
        self.edges.iter().filter(|e| des[e.0].is_in_result()).count()
    }

    /// Outgoing edges that belong to ring `ring`.
    pub fn outgoing_degree_in_ring(&self, des: &[DirectedEdge], ring: usize) -> usize {
        self.edges
            .iter()
            .filter(|e| des[e.0].edge_ring == Some(ring))
            .count()
    }

    /// Complete the labels of all edges in the star.
    ///
    /// Side labels are propagated around the star first. Remaining unknown
    /// positions are set from a dimensional collapse (exterior) or by locating
    /// the node in the relevant input geometry.
    pub(crate) fn compute_labelling(
        &mut self,
        des: &mut [DirectedEdge],
        edges: &[Edge],
        args: [&Geometry; 2],
        at: &Coordinate,
    ) -> Result<(), TopologyError> {
        self.propagate_side_labels(0, des)?;
        self.propagate_side_labels(1, des)?;

        let mut has_collapse = [false; 2];
        for id in &self.edges {
            let label = &des[id.0].label;
            for (g, flag) in has_collapse.iter_mut().enumerate() {
                if label.is_line(g) && label.on(g) == Location::Boundary {
                    *flag = true;
                }
            }
        }
        for i in 0..self.edges.len() {
            let id = self.edges[i];
            for g in 0..2 {
                if !des[id.0].label.is_any_null(g) {
                    continue;
                }
                let loc = if has_collapse[g] {
                    Location::Exterior
                } else {
                    self.location_in_area(g, at, args[g])
                };
                des[id.0].label.set_all_locations_if_null(g, loc);
            }
        }

        let mut label = Label::line(Location::None);
        for id in &self.edges {
            let edge_label = &edges[des[id.0].edge().0].label;
            for g in 0..2 {
                if matches!(edge_label.on(g), Location::Interior | Location::Boundary) {
                    label.set_on(g, Location::Interior);
                }
            }
        }
        self.label = label;
        Ok(())
    }

    fn location_in_area(&mut self, g: usize, at: &Coordinate, geom: &Geometry) -> Location {
        if self.pt_in_area[g].is_none() {
            self.pt_in_area[g] = locate_point_in_area(at, geom);
        }
        self.pt_in_area[g]
    }

    pub(crate) fn propagate_side_labels(&self, g: usize, des: &mut [DirectedEdge]) -> Result<(), TopologyError> {
        // Any known left location seeds the walk.
        let mut start = Location::None;
        for id in &self.edges {
            let label = &des[id.0].label;
            if label.is_area_for(g) && !label.location(g, Position::Left).is_none() {
                start = label.location(g, Position::Left);
            }
        }
        if start.is_none() {
            return Ok(());
        }
        let mut curr = start;
        for id in &self.edges {
            let de = &mut des[id.0];
            let at = de.coordinate();
            let label = &mut de.label;
            if label.on(g).is_none() {
                label.set_on(g, curr);
            }
            if !label.is_area_for(g) {
                continue;
            }
            let left = label.location(g, Position::Left);
            let right = label.location(g, Position::Right);
            if !right.is_none() {
                if right != curr {
                    return Err(TopologyError::at("side location conflict", at));
                }
                if left.is_none() {
                    return Err(TopologyError::at("found single null side", at));
                }
                curr = left;
            } else {
                if !left.is_none() {
                    return Err(TopologyError::at("found single null side", at));
                }
                label.set_location(g, Position::Right, curr);
                label.set_location(g, Position::Left, curr);
            }
        }
        Ok(())
    }

    /// Fill unknown cells of each edge's label from its reverse.
    pub(crate) fn merge_sym_labels(&self, des: &mut [DirectedEdge]) {
        for id in &self.edges {
            let sym_label = des[des[id.0].sym().0].label;
            des[id.0].label.merge(&sym_label);
        }
    }

    /// Fill still-unknown cells of each edge's label from the node label.
    pub(crate) fn update_labelling(&self, des: &mut [DirectedEdge], node_label: &Label) {
        for id in &self.edges {
            let label = &mut des[id.0].label;
            label.set_all_locations_if_null(0, node_label.on(0));
            label.set_all_locations_if_null(1, node_label.on(1));
        }
    }

    fn result_area_edges(&self, des: &[DirectedEdge]) -> Vec<DirEdgeId> {
        self.edges
            .iter()
            .copied()
            .filter(|id| des[id.0].is_in_result() || des[des[id.0].sym().0].is_in_result())
            .collect()
    }

    /// Link each incoming result edge to the next outgoing result edge counter-clockwise.
    pub(crate) fn link_result_directed_edges(&self, des: &mut [DirectedEdge], at: &Coordinate) -> Result<(), TopologyError> {
        let result_edges = self.result_area_edges(des);
        let mut first_out: Option<DirEdgeId> = None;
        let mut incoming: Option<DirEdgeId> = None;
        let mut state = LinkState::ScanningForIncoming;
        for next_out in result_edges {
            let out = &des[next_out.0];
            let next_in = out.sym();
            if !out.label.is_area() {
                continue;
            }
            if first_out.is_none() && out.is_in_result() {
                first_out = Some(next_out);
            }
            match state {
                LinkState::ScanningForIncoming => {
                    if des[next_in.0].is_in_result() {
                        incoming = Some(next_in);
                        state = LinkState::LinkingToOutgoing;
                    }
                }
                LinkState::LinkingToOutgoing => {
                    if out.is_in_result() {
                        if let Some(inc) = incoming {
                            trace!(from = inc.0, to = next_out.0, "link result edge");
                            des[inc.0].next = Some(next_out);
                        }
                        state = LinkState::ScanningForIncoming;
                    }
                }
            }
        }
        if state == LinkState::LinkingToOutgoing {
            let Some(first) = first_out else {
                return Err(TopologyError::at("no outgoing dirEdge found", *at));
            };
            if let Some(inc) = incoming {
                des[inc.0].next = Some(first);
            }
        }
        Ok(())
    }

    /// Link the edges of maximal ring `ring` into minimal rings via `next_min`.
    pub(crate) fn link_minimal_directed_edges(
        &self,
        des: &mut [DirectedEdge],
        ring: usize,
        at: &Coordinate,
    ) -> Result<(), TopologyError> {
        let result_edges = self.result_area_edges(des);
        let mut first_out: Option<DirEdgeId> = None;
        let mut incoming: Option<DirEdgeId> = None;
        let mut state = LinkState::ScanningForIncoming;
        // Clockwise scan.
        for &next_out in result_edges.iter().rev() {
            let next_in = des[next_out.0].sym();
            let out_in_ring = des[next_out.0].edge_ring == Some(ring);
            if first_out.is_none() && out_in_ring {
                first_out = Some(next_out);
            }
            match state {
                LinkState::ScanningForIncoming => {
                    if des[next_in.0].edge_ring == Some(ring) {
                        incoming = Some(next_in);
                        state = LinkState::LinkingToOutgoing;
                    }
                }
                LinkState::LinkingToOutgoing => {
                    if out_in_ring {
                        if let Some(inc) = incoming {
                            des[inc.0].next_min = Some(next_out);
                        }
                        state = LinkState::ScanningForIncoming;
                    }
                }
            }
        }
        if state == LinkState::LinkingToOutgoing {
            let Some(first) = first_out else {
                return Err(TopologyError::at("found null for first outgoing dirEdge", *at));
            };
            if let Some(inc) = incoming {
                des[inc.0].next_min = Some(first);
            }
        }
        Ok(())
    }

    /// Link every incoming edge to the next outgoing edge clockwise.
    pub(crate) fn link_all_directed_edges(&self, des: &mut [DirectedEdge]) {
        let mut prev_out: Option<DirEdgeId> = None;
        let mut first_in: Option<DirEdgeId> = None;
        for &next_out in self.edges.iter().rev() {
            let next_in = des[next_out.0].sym();
            if first_in.is_none() {
                first_in = Some(next_in);
            }
            if let Some(prev) = prev_out {
                des[next_in.0].next = Some(prev);
            }
            prev_out = Some(next_out);
        }
        if let Some(first) = first_in {
            des[first.0].next = prev_out;
        }
    }

    /// Mark line edges in the star as covered when they lie inside the result area.
    pub(crate) fn find_covered_line_edges(&self, des: &[DirectedEdge], edges: &mut [Edge]) {
        let mut start = Location::None;
        for id in &self.edges {
            let out = &des[id.0];
            if out.is_line_edge() {
                continue;
            }
            if out.is_in_result() {
                start = Location::Interior;
                break;
            }
            if des[out.sym().0].is_in_result() {
                start = Location::Exterior;
                break;
            }
        }
        if start.is_none() {
            return;
        }
        let mut curr = start;
        for id in &self.edges {
            let out = &des[id.0];
            if out.is_line_edge() {
                edges[out.edge().0].set_covered(curr == Location::Interior);
            } else {
                if out.is_in_result() {
                    curr = Location::Exterior;
                }
                if des[out.sym().0].is_in_result() {
                    curr = Location::Interior;
                }
            }
        }
    }

    /// Propagate side depths around the star starting from `de`.
    ///
    /// Walking counter-clockwise must return to the right-side depth of `de`.
    pub fn compute_depths(&self, de: DirEdgeId, des: &mut [DirectedEdge], edges: &[Edge]) -> Result<(), TopologyError> {
        let Some(index) = self.index_of(de) else {
            return Err(TopologyError::new("directed edge is not in this star"));
        };
        let start_depth = des[de.0].depth(Position::Left);
        let target_last = des[de.0].depth(Position::Right);
        let next_depth = self.compute_depths_range(index + 1, self.edges.len(), start_depth, des, edges)?;
        let last_depth = self.compute_depths_range(0, index, next_depth, des, edges)?;
        if last_depth != target_last {
            return Err(TopologyError::at("depth mismatch", des[de.0].coordinate()));
        }
        Ok(())
    }

    fn compute_depths_range(
        &self,
        start: usize,
        end: usize,
        start_depth: i32,
        des: &mut [DirectedEdge],
        edges: &[Edge],
    ) -> Result<i32, TopologyError> {
        let mut curr = start_depth;
        for id in &self.edges[start..end] {
            let de = &mut des[id.0];
            let delta = edges[de.edge().0].depth_delta();
            de.set_edge_depths(Position::Right, curr, delta)?;
            curr = de.depth(Position::Left);
        }
        Ok(curr)
    }
}
