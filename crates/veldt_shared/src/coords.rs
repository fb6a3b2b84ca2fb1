//! Cell coordinates on the infinite grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One position on the infinite tile grid.
///
/// The grid has no bounds; memory cost is carried by the sparse stores,
/// not by the coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    /// Horizontal cell index (east positive).
    pub x: i32,
    /// Vertical cell index (north positive).
    pub y: i32,
}

impl TilePos {
    /// The world origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Creates a position from cell indices.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position offset by `(dx, dy)` cells.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
