//! Invariant-preserving edit operations.
//!
//! Every operation returns `true` if it changed the layer and `false` if the
//! edit was rejected. A rejected edit leaves the layer untouched.

use arcstr::ArcStr;
use geometry::prelude::*;

use crate::content::{Base, LinkContent, LinkKind, Silicon, SiliconLink};
use crate::Layer;

fn rejected(op: &str, pos: Pos, reason: &str) -> bool {
    tracing::debug!("{} at {} rejected: {}", op, pos, reason);
    false
}

impl Layer {
    /// Places plain silicon of the given base on an empty, unlocked cell.
    pub fn add_silicon(&mut self, pos: Pos, base: Base) -> bool {
        let Some(mut cell) = self.matrix.cell(pos).cloned() else {
            return rejected("add_silicon", pos, "off the grid");
        };
        if cell.locked {
            return rejected("add_silicon", pos, "cell is locked");
        }
        if cell.silicon.is_present() {
            return rejected("add_silicon", pos, "cell already has silicon");
        }
        cell.silicon = Silicon::plain(base);
        self.matrix.update_cell(pos, cell);
        true
    }

    /// Removes the silicon of an unlocked cell along with its silicon links.
    ///
    /// Gates on neighboring cells that lose a required link decay to plain silicon.
    pub fn remove_silicon(&mut self, pos: Pos) -> bool {
        let Some(mut cell) = self.matrix.cell(pos).cloned() else {
            return rejected("remove_silicon", pos, "off the grid");
        };
        if cell.locked {
            return rejected("remove_silicon", pos, "cell is locked");
        }
        if !cell.silicon.is_present() {
            return rejected("remove_silicon", pos, "cell has no silicon");
        }
        cell.silicon = Silicon::None;
        self.matrix.update_cell(pos, cell);
        for side in Side::ALL {
            self.clear_link(pos, side, LinkKind::Silicon);
        }
        for side in Side::ALL {
            self.destroy_gate_if_broken(pos.neighbor(side));
        }
        true
    }

    /// Places metal on an unlocked cell without metal.
    pub fn add_metal(&mut self, pos: Pos) -> bool {
        let Some(mut cell) = self.matrix.cell(pos).cloned() else {
            return rejected("add_metal", pos, "off the grid");
        };
        if cell.locked {
            return rejected("add_metal", pos, "cell is locked");
        }
        if cell.metal {
            return rejected("add_metal", pos, "cell already has metal");
        }
        cell.metal = true;
        self.matrix.update_cell(pos, cell);
        true
    }

    /// Removes the metal of an unlocked cell along with its metal links.
    pub fn remove_metal(&mut self, pos: Pos) -> bool {
        let Some(mut cell) = self.matrix.cell(pos).cloned() else {
            return rejected("remove_metal", pos, "off the grid");
        };
        if cell.locked {
            return rejected("remove_metal", pos, "cell is locked");
        }
        if !cell.metal {
            return rejected("remove_metal", pos, "cell has no metal");
        }
        cell.metal = false;
        self.matrix.update_cell(pos, cell);
        for side in Side::ALL {
            self.clear_link(pos, side, LinkKind::Metal);
        }
        true
    }

    /// Links two 4-adjacent cells on the given layer.
    ///
    /// A silicon link between different bases forms a gate on `to`: it is only
    /// allowed when `to` has no via and has bidirectional links on both sides
    /// perpendicular to the new link. `to` then becomes a gate of its own base
    /// whose base axis runs perpendicular to the link, and the link reads
    /// [`SiliconLink::Master`] from `from` and [`SiliconLink::Slave`] from `to`.
    /// A silicon link between equal bases is bidirectional and is not allowed
    /// to touch an existing gate.
    pub fn add_link(&mut self, from: Pos, to: Pos, kind: LinkKind) -> bool {
        let Some(side) = from.side_to(to) else {
            return rejected("add_link", from, "cells are not adjacent");
        };
        let (Some(a), Some(b)) = (self.matrix.cell(from), self.matrix.cell(to)) else {
            return rejected("add_link", from, "off the grid");
        };
        let (a, b) = (a.clone(), b.clone());
        let mut link = self.link(from, side);

        match kind {
            LinkKind::Metal => {
                if link.metal {
                    return rejected("add_link", from, "metal link exists");
                }
                if !a.metal || !b.metal {
                    return rejected("add_link", from, "both cells need metal");
                }
                link.metal = true;
                self.matrix.update_link(from, side, link);
                true
            }
            LinkKind::Silicon => {
                if link.silicon.is_present() {
                    return rejected("add_link", from, "silicon link exists");
                }
                let (Some(from_base), Some(to_base)) = (a.silicon.base(), b.silicon.base()) else {
                    return rejected("add_link", from, "both cells need silicon");
                };
                if from_base == to_base {
                    if a.silicon.is_gate() || b.silicon.is_gate() {
                        return rejected("add_link", from, "cannot extend a gate");
                    }
                    link.silicon = SiliconLink::BiDirectional;
                    self.matrix.update_link(from, side, link);
                    return true;
                }

                if b.silicon.has_via() {
                    return rejected("add_link", to, "a gate cannot have a via");
                }
                // The new gate's base axis runs perpendicular to the link.
                let axis = side.dir().other();
                let channel = Side::with_dir(axis)
                    .into_iter()
                    .all(|s| self.link(to, s).silicon == SiliconLink::BiDirectional);
                if !channel {
                    return rejected("add_link", to, "no channel to gate");
                }
                if self.link(to, side).silicon == SiliconLink::BiDirectional {
                    return rejected("add_link", to, "input side continues the channel");
                }
                let mut target = b;
                target.silicon = Silicon::gate(to_base, axis);
                self.matrix.update_cell(to, target);
                link.silicon = SiliconLink::Master;
                self.matrix.update_link(from, side, link);
                true
            }
        }
    }

    /// Removes the link between two 4-adjacent cells on the given layer.
    ///
    /// Removing a silicon link re-checks any gate on either end; a gate that
    /// is no longer valid decays to plain silicon.
    pub fn remove_link(&mut self, from: Pos, to: Pos, kind: LinkKind) -> bool {
        let Some(side) = from.side_to(to) else {
            return rejected("remove_link", from, "cells are not adjacent");
        };
        if self.matrix.link(from, side).is_none() {
            return rejected("remove_link", from, "off the grid");
        }
        let link = self.link(from, side);
        let present = match kind {
            LinkKind::Silicon => link.silicon.is_present(),
            LinkKind::Metal => link.metal,
        };
        if !present {
            return rejected("remove_link", from, "no link to remove");
        }
        self.clear_link(from, side, kind);
        if kind == LinkKind::Silicon {
            self.destroy_gate_if_broken(from);
            self.destroy_gate_if_broken(to);
        }
        true
    }

    /// Adds a via to non-gate silicon without one.
    pub fn add_via(&mut self, pos: Pos) -> bool {
        let Some(mut cell) = self.matrix.cell(pos).cloned() else {
            return rejected("add_via", pos, "off the grid");
        };
        let Some(base) = cell.silicon.base() else {
            return rejected("add_via", pos, "cell has no silicon");
        };
        if cell.silicon.has_via() || cell.silicon.is_gate() {
            return rejected("add_via", pos, "cell has a via or gate");
        }
        cell.silicon = Silicon::via(base);
        self.matrix.update_cell(pos, cell);
        true
    }

    /// Removes the via from a cell.
    pub fn remove_via(&mut self, pos: Pos) -> bool {
        let Some(mut cell) = self.matrix.cell(pos).cloned() else {
            return rejected("remove_via", pos, "off the grid");
        };
        if !cell.silicon.has_via() {
            return rejected("remove_via", pos, "cell has no via");
        }
        cell.silicon = cell.silicon.to_plain();
        self.matrix.update_cell(pos, cell);
        true
    }

    /// Locks or unlocks a cell.
    pub fn set_lock_state(&mut self, pos: Pos, locked: bool) -> bool {
        let Some(mut cell) = self.matrix.cell(pos).cloned() else {
            return rejected("set_lock_state", pos, "off the grid");
        };
        cell.locked = locked;
        self.matrix.update_cell(pos, cell);
        true
    }

    /// Sets or clears a cell's label.
    pub fn set_name(&mut self, pos: Pos, name: Option<ArcStr>) -> bool {
        let Some(mut cell) = self.matrix.cell(pos).cloned() else {
            return rejected("set_name", pos, "off the grid");
        };
        cell.name = name;
        self.matrix.update_cell(pos, cell);
        true
    }

    /// Returns `true` if the cell at `pos` is a gate whose bidirectional
    /// links are exactly its two base-axis sides, with at least one
    /// perpendicular side driven.
    pub fn is_valid_gate(&self, pos: Pos) -> bool {
        let Some(axis) = self.silicon(pos).gate_axis() else {
            return false;
        };
        let channel = Side::with_dir(axis)
            .into_iter()
            .all(|side| self.link(pos, side).silicon == SiliconLink::BiDirectional);
        let inputs = Side::with_dir(axis.other()).map(|side| self.link(pos, side).silicon);
        let driven = inputs.contains(&SiliconLink::Slave);
        let stub = inputs.contains(&SiliconLink::BiDirectional);
        channel && driven && !stub
    }

    /// Decays every gate on the layer that is no longer valid.
    pub fn destroy_broken_gates(&mut self) {
        let gates: Vec<Pos> = self
            .positions()
            .filter(|pos| self.silicon(*pos).is_gate())
            .collect();
        for pos in gates {
            self.destroy_gate_if_broken(pos);
        }
    }

    /// Turns an invalid gate at `pos` back into plain silicon and drops the
    /// links that were driving it.
    pub(crate) fn destroy_gate_if_broken(&mut self, pos: Pos) {
        let Some(cell) = self.matrix.cell(pos) else {
            return;
        };
        if !cell.silicon.is_gate() || self.is_valid_gate(pos) {
            return;
        }
        let mut cell = cell.clone();
        cell.silicon = cell.silicon.to_plain();
        self.matrix.update_cell(pos, cell);
        for side in Side::ALL {
            if self.link(pos, side).silicon == SiliconLink::Slave {
                self.clear_link(pos, side, LinkKind::Silicon);
            }
        }
        tracing::debug!("gate at {} decayed to plain silicon", pos);
    }

    fn clear_link(&mut self, pos: Pos, side: Side, kind: LinkKind) {
        if self.matrix.link(pos, side).is_none() {
            return;
        }
        let link = self.link(pos, side);
        let cleared = match kind {
            LinkKind::Silicon => LinkContent {
                silicon: SiliconLink::None,
                ..link
            },
            LinkKind::Metal => LinkContent {
                metal: false,
                ..link
            },
        };
        if cleared != link {
            self.matrix.update_link(pos, side, cleared);
        }
    }
}

