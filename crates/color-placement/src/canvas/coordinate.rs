use std::fmt;

/// Offsets of the 8-neighborhood (Chebyshev radius 1).
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offsets of the 4-neighborhood (Manhattan radius 1).
const ORTHOGONAL_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// A grid cell, addressed as `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The up-to-8 adjacent cells inside a `width x height` grid.
    pub fn neighbors(self, width: usize, height: usize) -> impl Iterator<Item = Coordinate> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(dr, dc, width, height))
    }

    /// The up-to-4 edge-sharing cells inside a `width x height` grid.
    pub fn orthogonal_neighbors(
        self,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = Coordinate> {
        ORTHOGONAL_OFFSETS
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(dr, dc, width, height))
    }

    /// Chebyshev distance to another cell.
    #[inline]
    pub fn chebyshev(self, other: Coordinate) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Manhattan distance to another cell.
    #[inline]
    pub fn manhattan(self, other: Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    #[inline]
    fn offset(self, dr: isize, dc: isize, width: usize, height: usize) -> Option<Coordinate> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < height && col < width).then_some(Coordinate { row, col })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
