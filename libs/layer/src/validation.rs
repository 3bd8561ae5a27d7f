//! Layer validation.
//!
//! Edit operations keep the layer valid on their own. Validation exists for
//! layers assembled through [`Matrix`](crate::Matrix) writes or
//! [snapshots](crate::Snapshot), which bypass those checks.

use std::fmt::Display;

use arcstr::ArcStr;
use geometry::prelude::*;

use crate::content::SiliconLink;
use crate::Layer;

/// An invariant violation found by [`Layer::validate`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Issue {
    /// A silicon link touches a cell without silicon.
    SiliconLinkWithoutSilicon {
        /// The cell owning the link.
        pos: Pos,
        /// The side of the link.
        side: Side,
    },
    /// A metal link touches a cell without metal.
    MetalLinkWithoutMetal {
        /// The cell owning the link.
        pos: Pos,
        /// The side of the link.
        side: Side,
    },
    /// A bidirectional link joins different bases, or a master/slave link
    /// joins equal bases or drives a cell that is not a gate.
    IllegalJunction {
        /// The cell owning the link.
        pos: Pos,
        /// The side of the link.
        side: Side,
    },
    /// A gate lacks its channel or has no driving link.
    InvalidGate {
        /// The gate cell.
        pos: Pos,
    },
    /// A cell refers to a pin the layer does not have.
    UnknownPin {
        /// The cell.
        pos: Pos,
        /// The referenced pin name.
        name: ArcStr,
    },
}

impl Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SiliconLinkWithoutSilicon { pos, side } => {
                write!(f, "silicon link {:?} of {} touches a cell without silicon", side, pos)
            }
            Self::MetalLinkWithoutMetal { pos, side } => {
                write!(f, "metal link {:?} of {} touches a cell without metal", side, pos)
            }
            Self::IllegalJunction { pos, side } => {
                write!(f, "illegal silicon junction {:?} of {}", side, pos)
            }
            Self::InvalidGate { pos } => write!(f, "invalid gate at {}", pos),
            Self::UnknownPin { pos, name } => {
                write!(f, "cell {} refers to unknown pin `{}`", pos, name)
            }
        }
    }
}

impl Layer {
    /// Checks the layer invariants and returns every violation found.
    pub fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        for pos in self.positions() {
            let Some(cell) = self.matrix.cell(pos) else {
                continue;
            };
            if let Some(name) = &cell.pin {
                if self.pin(name).is_none() {
                    issues.push(Issue::UnknownPin {
                        pos,
                        name: name.clone(),
                    });
                }
            }
            if cell.silicon.is_gate() && !self.is_valid_gate(pos) {
                issues.push(Issue::InvalidGate { pos });
            }
            for side in [Side::Right, Side::Bottom] {
                let Some(link) = self.matrix.link(pos, side) else {
                    continue;
                };
                let other = self.silicon(pos.neighbor(side));
                let has_metal = |p: Pos| self.matrix.cell(p).is_some_and(|c| c.metal);
                if link.metal && !(cell.metal && has_metal(pos.neighbor(side))) {
                    issues.push(Issue::MetalLinkWithoutMetal { pos, side });
                }
                if !link.silicon.is_present() {
                    continue;
                }
                let (Some(a), Some(b)) = (cell.silicon.base(), other.base()) else {
                    issues.push(Issue::SiliconLinkWithoutSilicon { pos, side });
                    continue;
                };
                let legal = match link.silicon {
                    SiliconLink::BiDirectional => a == b,
                    SiliconLink::Master => a != b && other.is_gate(),
                    SiliconLink::Slave => a != b && cell.silicon.is_gate(),
                    SiliconLink::None => true,
                };
                if !legal {
                    issues.push(Issue::IllegalJunction { pos, side });
                }
            }
        }
        for issue in issues.iter() {
            tracing::debug!("validation: {}", issue);
        }
        issues
    }
}
