//! Half-open rectangular regions of grid cells.

use serde::{Deserialize, Serialize};

use crate::pos::Pos;

/// The cells `from.row..to.row` by `from.col..to.col`.
///
/// The `to` corner is exclusive, so a region with `from == to` is empty.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Region {
    from: Pos,
    to: Pos,
}

impl Region {
    /// Creates a region spanning the corners `from` (inclusive) and `to` (exclusive).
    ///
    /// The corners are normalized, so either diagonal may be given.
    pub fn new(from: Pos, to: Pos) -> Self {
        Self {
            from: Pos::new(from.row.min(to.row), from.col.min(to.col)),
            to: Pos::new(from.row.max(to.row), from.col.max(to.col)),
        }
    }

    /// Creates a region from an origin and its dimensions.
    pub fn with_size(origin: Pos, width: i64, height: i64) -> Self {
        Self::new(origin, origin.offset(height, width))
    }

    /// The inclusive top-left corner.
    #[inline]
    pub const fn from(&self) -> Pos {
        self.from
    }

    /// The exclusive bottom-right corner.
    #[inline]
    pub const fn to(&self) -> Pos {
        self.to
    }

    /// The number of columns.
    #[inline]
    pub const fn width(&self) -> i64 {
        self.to.col - self.from.col
    }

    /// The number of rows.
    #[inline]
    pub const fn height(&self) -> i64 {
        self.to.row - self.from.row
    }

    /// Returns `true` if the region holds no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Returns `true` if `pos` lies inside the region.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let region = Region::new(Pos::new(1, 1), Pos::new(3, 4));
    /// assert!(region.contains(Pos::new(2, 3)));
    /// assert!(!region.contains(Pos::new(3, 3)));
    /// ```
    pub const fn contains(&self, pos: Pos) -> bool {
        pos.row >= self.from.row
            && pos.row < self.to.row
            && pos.col >= self.from.col
            && pos.col < self.to.col
    }

    /// Returns `true` if every cell of the region lies in a grid of the given size.
    pub const fn is_within(&self, width: usize, height: usize) -> bool {
        self.from.row >= 0
            && self.from.col >= 0
            && self.to.row <= height as i64
            && self.to.col <= width as i64
    }

    /// Returns the region shifted by `rows` and `cols`.
    pub const fn translated(&self, rows: i64, cols: i64) -> Self {
        Self {
            from: self.from.offset(rows, cols),
            to: self.to.offset(rows, cols),
        }
    }

    /// Iterates over the cells of the region in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Pos> {
        let Self { from, to } = *self;
        (from.row..to.row)
            .flat_map(move |row| (from.col..to.col).map(move |col| Pos::new(row, col)))
    }
}
