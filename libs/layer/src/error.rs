//! Layer error types.
//!
//! Edit operations never return these: a rejected edit is reported as `false`.

use arcstr::ArcStr;
use geometry::prelude::*;

/// A result type returning layer errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for layer construction, pins and snapshots.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A snapshot was taken from a layer of a different size.
    #[error("snapshot is {found_width}x{found_height}, layer is {width}x{height}")]
    SnapshotDimensions {
        /// The layer width.
        width: usize,
        /// The layer height.
        height: usize,
        /// The snapshot width.
        found_width: usize,
        /// The snapshot height.
        found_height: usize,
    },
    /// A snapshot's cell list does not match its declared size.
    #[error("snapshot holds {found} slots, expected {expected}")]
    SnapshotLength {
        /// The number of slots implied by the dimensions.
        expected: usize,
        /// The number of slots present.
        found: usize,
    },
    /// A pin region is empty or extends past the grid.
    #[error("pin `{name}` region {from}..{to} does not fit the layer")]
    PinOutOfBounds {
        /// The pin name.
        name: ArcStr,
        /// The inclusive region corner.
        from: Pos,
        /// The exclusive region corner.
        to: Pos,
    },
    /// A pin region covers a cell that already belongs to another pin.
    #[error("pin `{name}` overlaps pin `{other}` at {pos}")]
    PinOverlap {
        /// The pin being added.
        name: ArcStr,
        /// The pin already covering the cell.
        other: ArcStr,
        /// The first overlapping cell.
        pos: Pos,
    },
    /// A pin with the same name already exists.
    #[error("a pin named `{0}` already exists")]
    DuplicatePin(ArcStr),
    /// The layer configuration could not be parsed.
    #[error("invalid layer configuration: {0}")]
    Config(#[from] toml::de::Error),
}
