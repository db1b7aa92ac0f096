//! Side depths of a merged edge.
//!
//! Each side of an edge records how many area interiors of each geometry cover
//! it. Coincident edges add their contributions; after normalization a side
//! with depth 0 is exterior and depth 1 is interior.

use super::{Label, Position};
use crate::geom::Location;

const NULL_DEPTH: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Depth {
    depth: [[i32; 3]; 2],
}

impl Default for Depth {
    fn default() -> Self {
        Self {
            depth: [[NULL_DEPTH; 3]; 2],
        }
    }
}

impl Depth {
    /// Depth contributed by one side location.
    pub fn depth_at_location(loc: Location) -> i32 {
        match loc {
            Location::Exterior => 0,
            Location::Interior => 1,
            _ => NULL_DEPTH,
        }
    }

    #[inline]
    pub fn depth(&self, geom: usize, pos: Position) -> i32 {
        self.depth[geom][pos.index()]
    }

    pub fn set_depth(&mut self, geom: usize, pos: Position, value: i32) {
        self.depth[geom][pos.index()] = value;
    }

    /// Location implied by a side depth.
    pub fn location(&self, geom: usize, pos: Position) -> Location {
        if self.depth(geom, pos) <= 0 {
            Location::Exterior
        } else {
            Location::Interior
        }
    }

    pub fn add(&mut self, geom: usize, pos: Position, loc: Location) {
        if loc == Location::Interior {
            self.depth[geom][pos.index()] += 1;
        }
    }

    pub fn is_null(&self) -> bool {
        self.depth
            .iter()
            .all(|d| d[Position::Left.index()] == NULL_DEPTH && d[Position::Right.index()] == NULL_DEPTH)
    }

    pub fn is_null_geom(&self, geom: usize) -> bool {
        self.depth[geom][Position::Left.index()] == NULL_DEPTH
    }

    pub fn is_null_at(&self, geom: usize, pos: Position) -> bool {
        self.depth[geom][pos.index()] == NULL_DEPTH
    }

    /// Accumulate the side locations of an area label.
    pub fn add_label(&mut self, label: &Label) {
        for geom in 0..2 {
            for pos in Position::SIDES {
                let loc = label.location(geom, pos);
                if matches!(loc, Location::Exterior | Location::Interior) {
                    let d = Self::depth_at_location(loc);
                    if self.is_null_at(geom, pos) {
                        self.depth[geom][pos.index()] = d;
                    } else {
                        self.depth[geom][pos.index()] += d;
                    }
                }
            }
        }
    }

    /// Right minus left depth of `geom`.
    pub fn delta(&self, geom: usize) -> i32 {
        self.depth[geom][Position::Right.index()] - self.depth[geom][Position::Left.index()]
    }

    /// Shift both sides so the shallower one is 0 and clamp the deeper one to 1.
    pub fn normalize(&mut self) {
        for geom in 0..2 {
            if self.is_null_geom(geom) {
                continue;
            }
            let sides = &mut self.depth[geom];
            let min = sides[1].min(sides[2]).max(0);
            for d in &mut sides[1..] {
                *d = i32::from(*d > min);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_shells_collapse_to_equal_sides() {
        // Two shells meeting along an edge from opposite sides.
        let a = Label::area_for(0, Location::Boundary, Location::Exterior, Location::Interior);
        let b = Label::area_for(0, Location::Boundary, Location::Interior, Location::Exterior);
        let mut d = Depth::default();
        assert!(d.is_null());
        d.add_label(&a);
        d.add_label(&b);
        d.normalize();
        assert_eq!(d.delta(0), 0);
        assert_eq!(d.depth(0, Position::Left), 0);
        assert_eq!(d.depth(0, Position::Right), 0);
        assert!(d.is_null_geom(1));
    }

    #[test]
    fn single_shell_keeps_its_sides() {
        let a = Label::area_for(1, Location::Boundary, Location::Exterior, Location::Interior);
        let mut d = Depth::default();
        d.add_label(&a);
        d.normalize();
        assert_eq!(d.delta(1), 1);
        assert_eq!(d.location(1, Position::Left), Location::Exterior);
        assert_eq!(d.location(1, Position::Right), Location::Interior);
    }
}
