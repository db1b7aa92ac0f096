//! Index types for the graph arenas and the side/position enum.

/// Index into `PlanarGraph::edges` (or a `GeometryGraph`'s edge list).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// Index into `PlanarGraph::dir_edges`. Directed edges of edge `e` are `2e` and `2e + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirEdgeId(pub usize);

/// Index into `NodeMap::nodes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Position relative to a directed edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    On = 0,
    Left = 1,
    Right = 2,
}

impl Position {
    pub const SIDES: [Position; 2] = [Position::Left, Position::Right];

    /// Left <-> Right; `On` maps to itself.
    #[inline]
    pub fn opposite(self) -> Position {
        match self {
            Position::Left => Position::Right,
            Position::Right => Position::Left,
            Position::On => Position::On,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
