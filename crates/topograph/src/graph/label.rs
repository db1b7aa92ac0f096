//! Per-geometry location records attached to edges and nodes.
//!
//! A `TopologyLocation` is either a line record (only `On` is meaningful) or an
//! area record (`On`, `Left`, `Right`). A `Label` holds one record per input
//! geometry.

use std::fmt;

use super::Position;
use crate::geom::Location;

/// Location record of one geometry at one graph component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TopologyLocation {
    locs: [Location; 3],
    area: bool,
}

impl TopologyLocation {
    pub fn line(on: Location) -> Self {
        Self {
            locs: [on, Location::None, Location::None],
            area: false,
        }
    }

    pub fn area(on: Location, left: Location, right: Location) -> Self {
        Self {
            locs: [on, left, right],
            area: true,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        if self.area {
            3
        } else {
            1
        }
    }

    /// Location at `pos`; side positions of a line record are `None`.
    #[inline]
    pub fn get(&self, pos: Position) -> Location {
        self.locs[pos.index()]
    }

    #[inline]
    pub fn is_area(&self) -> bool {
        self.area
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        !self.area
    }

    pub fn is_null(&self) -> bool {
        self.locs[..self.len()].iter().all(|l| l.is_none())
    }

    pub fn is_any_null(&self) -> bool {
        self.locs[..self.len()].iter().any(|l| l.is_none())
    }

    pub fn is_equal_on_side(&self, other: &TopologyLocation, pos: Position) -> bool {
        self.get(pos) == other.get(pos)
    }

    pub fn all_positions_equal(&self, loc: Location) -> bool {
        self.locs[..self.len()].iter().all(|l| *l == loc)
    }

    pub fn flip(&mut self) {
        if self.area {
            self.locs.swap(Position::Left.index(), Position::Right.index());
        }
    }

    /// Setting a side of a line record is ignored.
    pub fn set(&mut self, pos: Position, loc: Location) {
        if self.area || pos == Position::On {
            self.locs[pos.index()] = loc;
        }
    }

    pub fn set_all(&mut self, loc: Location) {
        let n = self.len();
        self.locs[..n].fill(loc);
    }

    pub fn set_all_if_null(&mut self, loc: Location) {
        let n = self.len();
        for l in &mut self.locs[..n] {
            if l.is_none() {
                *l = loc;
            }
        }
    }

    /// Drop the side positions, keeping `On`.
    pub fn to_line(&mut self) {
        self.area = false;
        self.locs[1] = Location::None;
        self.locs[2] = Location::None;
    }

    /// Fill unknown positions from `other`, widening to an area record if `other` is one.
    pub fn merge(&mut self, other: &TopologyLocation) {
        if other.area && !self.area {
            self.area = true;
        }
        let n = self.len();
        for i in 0..n {
            if self.locs[i].is_none() {
                self.locs[i] = other.locs[i];
            }
        }
    }
}

impl fmt::Display for TopologyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.area {
            write!(
                f,
                "{}{}{}",
                self.locs[1].symbol(),
                self.locs[0].symbol(),
                self.locs[2].symbol()
            )
        } else {
            write!(f, "{}", self.locs[0].symbol())
        }
    }
}

/// Locations of a graph component relative to both input geometries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Label {
    elt: [TopologyLocation; 2],
}

impl Label {
    /// Line label with the same `On` location for both geometries.
    pub fn line(on: Location) -> Self {
        Self {
            elt: [TopologyLocation::line(on); 2],
        }
    }

    /// Line label for geometry `geom`; the other geometry is unknown.
    pub fn line_for(geom: usize, on: Location) -> Self {
        let mut label = Self::default();
        label.elt[geom] = TopologyLocation::line(on);
        label
    }

    /// Area label for geometry `geom`; the other geometry is an unknown area record.
    pub fn area_for(geom: usize, on: Location, left: Location, right: Location) -> Self {
        let mut label = Self {
            elt: [TopologyLocation::area(Location::None, Location::None, Location::None); 2],
        };
        label.elt[geom] = TopologyLocation::area(on, left, right);
        label
    }

    /// Line label carrying only the `On` locations of `self`.
    pub fn to_line_label(&self) -> Label {
        let mut line = Label::line(Location::None);
        for i in 0..2 {
            line.elt[i].set(Position::On, self.elt[i].get(Position::On));
        }
        line
    }

    pub fn flip(&mut self) {
        self.elt[0].flip();
        self.elt[1].flip();
    }

    #[inline]
    pub fn location(&self, geom: usize, pos: Position) -> Location {
        self.elt[geom].get(pos)
    }

    #[inline]
    pub fn on(&self, geom: usize) -> Location {
        self.elt[geom].get(Position::On)
    }

    pub fn set_location(&mut self, geom: usize, pos: Position, loc: Location) {
        self.elt[geom].set(pos, loc);
    }

    pub fn set_on(&mut self, geom: usize, loc: Location) {
        self.elt[geom].set(Position::On, loc);
    }

    pub fn set_all_locations(&mut self, geom: usize, loc: Location) {
        self.elt[geom].set_all(loc);
    }

    pub fn set_all_locations_if_null(&mut self, geom: usize, loc: Location) {
        self.elt[geom].set_all_if_null(loc);
    }

    /// Merge `other` into `self`: unknown cells take `other`'s value.
    pub fn merge(&mut self, other: &Label) {
        self.elt[0].merge(&other.elt[0]);
        self.elt[1].merge(&other.elt[1]);
    }

    /// Number of geometries with at least one known location.
    pub fn geometry_count(&self) -> usize {
        self.elt.iter().filter(|t| !t.is_null()).count()
    }

    pub fn is_null(&self, geom: usize) -> bool {
        self.elt[geom].is_null()
    }

    pub fn is_any_null(&self, geom: usize) -> bool {
        self.elt[geom].is_any_null()
    }

    /// Area record for either geometry.
    pub fn is_area(&self) -> bool {
        self.elt[0].is_area() || self.elt[1].is_area()
    }

    pub fn is_area_for(&self, geom: usize) -> bool {
        self.elt[geom].is_area()
    }

    pub fn is_line(&self, geom: usize) -> bool {
        self.elt[geom].is_line()
    }

    pub fn is_equal_on_side(&self, other: &Label, pos: Position) -> bool {
        self.elt[0].is_equal_on_side(&other.elt[0], pos)
            && self.elt[1].is_equal_on_side(&other.elt[1], pos)
    }

    pub fn all_positions_equal(&self, geom: usize, loc: Location) -> bool {
        self.elt[geom].all_positions_equal(loc)
    }

    /// Demote the record of `geom` to a line record.
    pub fn to_line(&mut self, geom: usize) {
        self.elt[geom].to_line();
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A:{} B:{}", self.elt[0], self.elt[1])
    }
}
