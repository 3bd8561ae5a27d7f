//! Integer grid primitives shared by the layout, topology and simulation crates.
//!
//! # Examples
//!
//! Walk from a position to its right-hand neighbor:
//!
//! ```
//! # use geometry::prelude::*;
//! let pos = Pos::new(2, 3);
//! assert_eq!(pos.neighbor(Side::Right), Pos::new(2, 4));
//! assert_eq!(pos.side_to(Pos::new(1, 3)), Some(Side::Top));
//! ```
#![warn(missing_docs)]

extern crate self as geometry;

pub mod dir;
pub mod pos;
pub mod prelude;
pub mod region;
pub mod side;

#[cfg(test)]
mod tests;
