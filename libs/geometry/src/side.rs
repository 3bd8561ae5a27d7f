//! The four sides of a grid cell.

use crate::dir::Dir;
use array_map::{ArrayMap, Indexable};
use serde::{Deserialize, Serialize};

/// An enumeration of the sides of a grid cell.
///
/// Only [`Side::Right`] and [`Side::Bottom`] are stored by the layout matrix;
/// [`Side::Left`] and [`Side::Top`] are views of a neighbor's stored sides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[repr(u8)]
#[derive(Indexable)]
pub enum Side {
    /// The left side.
    Left,
    /// The top side.
    Top,
    /// The right side.
    Right,
    /// The bottom side.
    Bottom,
}

impl Side {
    /// All sides, in clockwise order starting from [`Side::Left`].
    pub const ALL: [Side; 4] = [Side::Left, Side::Top, Side::Right, Side::Bottom];

    /// Gets the direction travelled when crossing this side.
    ///
    /// Crossing the left or right side is a **horizontal** move;
    /// crossing the top or bottom side is a **vertical** move.
    pub const fn dir(&self) -> Dir {
        match self {
            Side::Top | Side::Bottom => Dir::Vert,
            Side::Left | Side::Right => Dir::Horiz,
        }
    }

    /// Returns `true` if crossing this side is a vertical move.
    #[inline]
    pub const fn is_vertical(&self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// Returns the opposite side.
    pub const fn other(&self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// The `(row, col)` offset of the neighbor across this side.
    pub const fn offset(&self) -> (i64, i64) {
        match self {
            Side::Left => (0, -1),
            Side::Top => (-1, 0),
            Side::Right => (0, 1),
            Side::Bottom => (1, 0),
        }
    }

    /// Returns `true` for the sides the layout matrix stores directly.
    #[inline]
    pub const fn is_stored(&self) -> bool {
        matches!(self, Side::Right | Side::Bottom)
    }

    /// Returns the sides crossed when moving along the given [`Dir`].
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// assert_eq!(Side::with_dir(Dir::Horiz), [Side::Left, Side::Right]);
    /// assert_eq!(Side::with_dir(Dir::Vert), [Side::Top, Side::Bottom]);
    /// ```
    pub const fn with_dir(dir: Dir) -> [Side; 2] {
        match dir {
            Dir::Horiz => [Side::Left, Side::Right],
            Dir::Vert => [Side::Top, Side::Bottom],
        }
    }
}

impl std::ops::Not for Side {
    type Output = Self;
    /// Exclamation Operator returns the opposite side.
    fn not(self) -> Self::Output {
        self.other()
    }
}

/// An association of a value with type `T` to each of the four [`Side`]s.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq)]
pub struct Sides<T> {
    inner: ArrayMap<Side, T, 4>,
}

impl<T> Sides<T>
where
    T: Copy,
{
    /// Creates a new [`Sides`] with `value` associated with all sides.
    pub const fn uniform(value: T) -> Self {
        Self {
            inner: ArrayMap::new([value; 4]),
        }
    }
}

impl<T> Sides<T> {
    /// Creates a new [`Sides`] with the provided values for each side.
    pub const fn new(left: T, top: T, right: T, bottom: T) -> Self {
        // IMPORTANT: the ordering of array elements here must match
        // the ordering of variants in the [`Side`] enum.
        Self {
            inner: ArrayMap::new([left, top, right, bottom]),
        }
    }

    /// Builds a [`Sides`] by evaluating `f` once per side.
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Self::new(
            f(Side::Left),
            f(Side::Top),
            f(Side::Right),
            f(Side::Bottom),
        )
    }

    /// Maps a function over the provided [`Sides`], returning a new [`Sides`].
    pub fn map<B>(self, f: impl FnMut(&Side, T) -> B) -> Sides<B> {
        Sides {
            inner: self.inner.map(f),
        }
    }

    /// Iterates over `(side, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().map(move |side| (side, &self[side]))
    }
}

impl<T> std::ops::Index<Side> for Sides<T> {
    type Output = T;
    fn index(&self, index: Side) -> &Self::Output {
        self.inner.index(index)
    }
}

impl<T> std::ops::IndexMut<Side> for Sides<T> {
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        self.inner.index_mut(index)
    }
}
