//! Axis-aligned directions: horizontal or vertical.

use std::fmt::Display;

use array_map::Indexable;
use serde::{Deserialize, Serialize};

/// An enumeration of axis-aligned directions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[repr(u8)]
#[derive(Indexable)]
pub enum Dir {
    /// The horizontal, or column-aligned, direction.
    Horiz,
    /// The vertical, or row-aligned, direction.
    Vert,
}

impl Dir {
    /// Returns the other direction.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// assert_eq!(Dir::Vert.other(), Dir::Horiz);
    /// assert_eq!(Dir::Horiz.other(), Dir::Vert);
    /// ```
    pub const fn other(&self) -> Self {
        match *self {
            Self::Horiz => Self::Vert,
            Self::Vert => Self::Horiz,
        }
    }

    /// The side reached by stepping forward along this direction.
    ///
    /// Rows grow downward, so the forward side of [`Dir::Vert`] is [`Side::Bottom`].
    ///
    /// [`Side::Bottom`]: crate::side::Side::Bottom
    pub const fn forward(&self) -> crate::side::Side {
        match *self {
            Self::Horiz => crate::side::Side::Right,
            Self::Vert => crate::side::Side::Bottom,
        }
    }

    /// The side reached by stepping backward along this direction.
    pub const fn backward(&self) -> crate::side::Side {
        self.forward().other()
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Horiz => write!(f, "horizontal"),
            Self::Vert => write!(f, "vertical"),
        }
    }
}

impl std::ops::Not for Dir {
    type Output = Self;
    /// Returns the other direction.
    fn not(self) -> Self::Output {
        self.other()
    }
}
