//! Topological location of a point relative to a geometry.

use serde::{Deserialize, Serialize};

/// DE-9IM location; `None` means "not yet known".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
    #[default]
    None,
}

impl Location {
    #[inline]
    pub fn is_none(self) -> bool {
        self == Location::None
    }

    /// One-character symbol (`i`, `b`, `e`, `-`) used in label dumps.
    pub fn symbol(self) -> char {
        match self {
            Location::Interior => 'i',
            Location::Boundary => 'b',
            Location::Exterior => 'e',
            Location::None => '-',
        }
    }
}
