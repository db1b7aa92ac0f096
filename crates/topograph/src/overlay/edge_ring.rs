//! Rings traced through linked result directed edges.
//!
//! A maximal ring follows `next` links and may touch itself at nodes; a
//! minimal ring follows `next_min` links and is simple. Rings live in the
//! polygon builder's arena and are addressed by index.

use crate::algorithm::is_ccw;
use crate::error::TopologyError;
use crate::geom::{Coordinate, Envelope, GeometryFactory, LinearRing, Location};
use crate::graph::{DirEdgeId, DirectedEdge, Edge, Label, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RingKind {
    Maximal,
    Minimal,
}

impl RingKind {
    fn ring_of(self, de: &DirectedEdge) -> Option<usize> {
        match self {
            RingKind::Maximal => de.edge_ring,
            RingKind::Minimal => de.min_edge_ring,
        }
    }

    fn assign(self, de: &mut DirectedEdge, ring: usize) {
        match self {
            RingKind::Maximal => de.edge_ring = Some(ring),
            RingKind::Minimal => de.min_edge_ring = Some(ring),
        }
    }

    fn next(self, de: &DirectedEdge) -> Option<DirEdgeId> {
        match self {
            RingKind::Maximal => de.next(),
            RingKind::Minimal => de.next_min(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EdgeRing {
    kind: RingKind,
    edges: Vec<DirEdgeId>,
    pts: Vec<Coordinate>,
    env: Envelope,
    label: Label,
    is_hole: bool,
    pub(crate) shell: Option<usize>,
    pub(crate) holes: Vec<usize>,
}

impl EdgeRing {
    /// Trace the ring starting at `start` and tag every visited edge with `id`.
    pub(crate) fn build(
        id: usize,
        kind: RingKind,
        start: DirEdgeId,
        des: &mut [DirectedEdge],
        edges: &[Edge],
    ) -> Result<Self, TopologyError> {
        let mut ring = Self {
            kind,
            edges: Vec::new(),
            pts: Vec::new(),
            env: Envelope::default(),
            label: Label::line(Location::None),
            is_hole: false,
            shell: None,
            holes: Vec::new(),
        };
        let mut current = start;
        loop {
            let de = &mut des[current.0];
            if kind.ring_of(de) == Some(id) {
                return Err(TopologyError::at(
                    "Directed Edge visited twice during ring-building",
                    de.coordinate(),
                ));
            }
            if !de.label.is_area() {
                return Err(TopologyError::at("ring edge has no area label", de.coordinate()));
            }
            ring.edges.push(current);
            ring.merge_label(&de.label);
            ring.add_points(&edges[de.edge().0], de.is_forward(), current == start);
            kind.assign(de, id);
            current = match kind.next(de) {
                Some(next) => next,
                None => return Err(TopologyError::at("found null directed edge", de.coordinate())),
            };
            if current == start {
                break;
            }
        }
        ring.env = Envelope::of_coords(&ring.pts);
        ring.is_hole = is_ccw(&ring.pts);
        Ok(ring)
    }

    /// Right-side locations of the ring edges, per input geometry.
    fn merge_label(&mut self, de_label: &Label) {
        for g in 0..2 {
            let loc = de_label.location(g, Position::Right);
            if loc.is_none() {
                continue;
            }
            if self.label.on(g).is_none() {
                self.label.set_on(g, loc);
            }
        }
    }

    fn add_points(&mut self, edge: &Edge, forward: bool, first: bool) {
        let pts = edge.coords();
        let skip = usize::from(!first);
        if forward {
            self.pts.extend_from_slice(&pts[skip..]);
        } else {
            self.pts.extend(pts.iter().rev().skip(skip));
        }
    }

    pub fn kind(&self) -> RingKind {
        self.kind
    }

    pub fn edges(&self) -> &[DirEdgeId] {
        &self.edges
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.pts
    }

    pub fn envelope(&self) -> &Envelope {
        &self.env
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Counter-clockwise rings bound holes (result interiors lie to the right).
    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    /// Index of the enclosing shell, once a hole has been placed.
    pub fn shell(&self) -> Option<usize> {
        self.shell
    }

    pub fn holes(&self) -> &[usize] {
        &self.holes
    }

    pub(crate) fn linear_ring(&self, factory: &GeometryFactory) -> crate::Result<LinearRing> {
        factory.create_linear_ring(self.pts.clone())
    }
}
