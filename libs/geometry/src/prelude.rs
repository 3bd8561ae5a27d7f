//! An import prelude that re-exports commonly used items.

pub use crate::dir::Dir;
pub use crate::pos::Pos;
pub use crate::region::Region;
pub use crate::side::{Side, Sides};
