use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, col)` cell of the grid.
///
/// Serialized as the 2-element array `[row, col]`, the form used by layout and
/// replay files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord(pub usize, pub usize);

impl Coord {
    /// Constructs a coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self(row, col)
    }

    /// Row index.
    pub fn row(&self) -> usize {
        self.0
    }

    /// Column index.
    pub fn col(&self) -> usize {
        self.1
    }

    /// Returns `true` if the cell lies inside a `rows x cols` grid.
    pub fn in_bounds(&self, rows: usize, cols: usize) -> bool {
        self.0 < rows && self.1 < cols
    }

    /// Displaces the coordinate by `(dr, dc)`, clamped to a `rows x cols` grid.
    pub fn offset(self, (dr, dc): (i64, i64), rows: usize, cols: usize) -> Self {
        let clamp = |v: usize, d: i64, n: usize| (v as i64 + d).max(0).min(n as i64 - 1) as usize;
        Self(clamp(self.0, dr, rows), clamp(self.1, dc, cols))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}
