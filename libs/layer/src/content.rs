//! Cell and link contents.

use arcstr::ArcStr;
use geometry::dir::Dir;
use serde::{Deserialize, Serialize};

/// The doping of a silicon cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Base {
    /// P-type silicon.
    P,
    /// N-type silicon.
    N,
}

impl Base {
    /// Returns the other base.
    pub const fn other(&self) -> Self {
        match self {
            Self::P => Self::N,
            Self::N => Self::P,
        }
    }
}

/// The silicon content of a cell.
///
/// Vias and gates refine exactly one base, so a cell can never show
/// P-type and N-type silicon at the same time.
/// A gate's orientation names its base axis: a horizontal gate conducts
/// between its left and right neighbors and is switched from above and below.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Silicon {
    /// No silicon.
    #[default]
    None,
    /// Plain P-type silicon.
    P,
    /// P-type silicon with a via to the metal layer.
    PVia,
    /// Plain N-type silicon.
    N,
    /// N-type silicon with a via to the metal layer.
    NVia,
    /// An N-type gate with a horizontal base axis.
    NHGate,
    /// An N-type gate with a vertical base axis.
    NVGate,
    /// A P-type gate with a horizontal base axis.
    PHGate,
    /// A P-type gate with a vertical base axis.
    PVGate,
}

impl Silicon {
    /// Plain (no via, no gate) silicon of the given base.
    pub const fn plain(base: Base) -> Self {
        match base {
            Base::P => Self::P,
            Base::N => Self::N,
        }
    }

    /// Silicon of the given base with a via.
    pub const fn via(base: Base) -> Self {
        match base {
            Base::P => Self::PVia,
            Base::N => Self::NVia,
        }
    }

    /// A gate of the given base whose base axis runs along `axis`.
    pub const fn gate(base: Base, axis: Dir) -> Self {
        match (base, axis) {
            (Base::N, Dir::Horiz) => Self::NHGate,
            (Base::N, Dir::Vert) => Self::NVGate,
            (Base::P, Dir::Horiz) => Self::PHGate,
            (Base::P, Dir::Vert) => Self::PVGate,
        }
    }

    /// The base of this silicon, or [`None`] if there is no silicon.
    pub const fn base(&self) -> Option<Base> {
        match self {
            Self::None => None,
            Self::P | Self::PVia | Self::PHGate | Self::PVGate => Some(Base::P),
            Self::N | Self::NVia | Self::NHGate | Self::NVGate => Some(Base::N),
        }
    }

    /// Returns `true` if the cell holds any silicon.
    #[inline]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns `true` if the cell bridges silicon and metal.
    #[inline]
    pub const fn has_via(&self) -> bool {
        matches!(self, Self::PVia | Self::NVia)
    }

    /// The base axis of a gate, or [`None`] for non-gate silicon.
    pub const fn gate_axis(&self) -> Option<Dir> {
        match self {
            Self::NHGate | Self::PHGate => Some(Dir::Horiz),
            Self::NVGate | Self::PVGate => Some(Dir::Vert),
            _ => None,
        }
    }

    /// Returns `true` for gate silicon.
    #[inline]
    pub const fn is_gate(&self) -> bool {
        self.gate_axis().is_some()
    }

    /// The plain silicon of the same base, dropping any via or gate refinement.
    pub const fn to_plain(&self) -> Self {
        match self.base() {
            Some(base) => Self::plain(base),
            None => Self::None,
        }
    }
}

/// The silicon relationship across one side of a cell.
///
/// Read from the other end of the same link, the value is [inverted](SiliconLink::invert).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SiliconLink {
    /// Not connected.
    #[default]
    None,
    /// This end drives a gate on the other end.
    Master,
    /// This end is a gate driven from the other end.
    Slave,
    /// An ordinary same-base connection.
    BiDirectional,
}

impl SiliconLink {
    /// The value seen from the other end of the link.
    pub const fn invert(&self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Master => Self::Slave,
            Self::Slave => Self::Master,
            Self::BiDirectional => Self::BiDirectional,
        }
    }

    /// Returns `true` if any silicon link is present.
    #[inline]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// The contents of the link between two adjacent cells.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LinkContent {
    /// The silicon relationship, as seen from the owning end.
    pub silicon: SiliconLink,
    /// Whether the two cells' metal is connected.
    pub metal: bool,
}

impl LinkContent {
    /// An empty link.
    pub const NONE: Self = Self {
        silicon: SiliconLink::None,
        metal: false,
    };

    /// The same link, as seen from the other end.
    pub const fn inverted(&self) -> Self {
        Self {
            silicon: self.silicon.invert(),
            metal: self.metal,
        }
    }

    /// Returns `true` if neither a silicon nor a metal link is present.
    pub const fn is_empty(&self) -> bool {
        !self.silicon.is_present() && !self.metal
    }
}

/// The contents of a single grid cell.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CellContent {
    /// Silicon layer contents.
    pub silicon: Silicon,
    /// Whether the metal layer is present.
    pub metal: bool,
    /// Locked cells reject silicon and metal edits.
    pub locked: bool,
    /// A user-visible label.
    pub name: Option<ArcStr>,
    /// The pin whose region covers this cell.
    pub pin: Option<ArcStr>,
}

impl CellContent {
    /// Returns `true` if the cell holds silicon or metal.
    #[inline]
    pub const fn is_occupied(&self) -> bool {
        self.silicon.is_present() || self.metal
    }
}

/// The layer a link or edit operates on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// The silicon layer.
    Silicon,
    /// The metal layer.
    Metal,
}
