//! Grid positions.

use serde::{Deserialize, Serialize};

use crate::side::Side;

/// A cell position on the layout grid.
///
/// Coordinates are signed so that the neighbors of border cells are
/// representable; they simply fall outside every grid.
#[derive(
    Debug, Copy, Clone, Default, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct Pos {
    /// The row, growing downward.
    pub row: i64,
    /// The column, growing rightward.
    pub col: i64,
}

impl Pos {
    /// Creates a new [`Pos`] from (row, col) coordinates.
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Returns the origin, `(0, 0)`.
    #[inline]
    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Returns the position adjacent to this one across `side`.
    #[inline]
    pub const fn neighbor(&self, side: Side) -> Self {
        let (dr, dc) = side.offset();
        Self::new(self.row + dr, self.col + dc)
    }

    /// Returns this position shifted by `rows` and `cols`.
    #[inline]
    pub const fn offset(&self, rows: i64, cols: i64) -> Self {
        Self::new(self.row + rows, self.col + cols)
    }

    /// Returns the side of `self` that faces `other`,
    /// or [`None`] if the two positions are not 4-adjacent.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let a = Pos::new(1, 1);
    /// assert_eq!(a.side_to(Pos::new(1, 0)), Some(Side::Left));
    /// assert_eq!(a.side_to(Pos::new(2, 1)), Some(Side::Bottom));
    /// assert_eq!(a.side_to(Pos::new(2, 2)), None);
    /// assert_eq!(a.side_to(a), None);
    /// ```
    pub fn side_to(&self, other: Pos) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|side| self.neighbor(*side) == other)
    }

    /// Returns `true` if this position lies in a grid of the given size.
    #[inline]
    pub const fn is_within(&self, width: usize, height: usize) -> bool {
        self.row >= 0
            && self.col >= 0
            && (self.row as u64) < height as u64
            && (self.col as u64) < width as u64
    }
}

impl std::ops::Add<Pos> for Pos {
    type Output = Self;
    fn add(self, rhs: Pos) -> Self::Output {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl std::ops::Sub<Pos> for Pos {
    type Output = Self;
    fn sub(self, rhs: Pos) -> Self::Output {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl From<(i64, i64)> for Pos {
    fn from(value: (i64, i64)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
