//! Relocation of rectangular selections.

use geometry::prelude::*;

use crate::content::{CellContent, LinkContent, Silicon};
use crate::Layer;

struct MovedCell {
    source: Pos,
    content: CellContent,
}

impl Layer {
    /// Moves the cells in the half-open rectangle `[from, to)` by
    /// `offset_x` columns and `offset_y` rows.
    ///
    /// Only occupied cells (silicon or metal) travel, together with the links
    /// between them; links to cells outside the selection are cut.
    /// The move is rejected, without touching the layer, if either rectangle
    /// leaves the grid, if the selection holds an occupied locked cell, if an
    /// occupied cell would land on a locked cell, or if it would land on an
    /// occupied cell outside the selection. Labels on unoccupied cells stay
    /// where they are. Gates broken by the move decay afterwards.
    pub fn move_cells(&mut self, from: Pos, to: Pos, offset_x: i64, offset_y: i64) -> bool {
        let source = Region::new(from, to);
        let dest = source.translated(offset_y, offset_x);
        let (width, height) = (self.width(), self.height());
        if source.is_empty() || !source.is_within(width, height) || !dest.is_within(width, height)
        {
            tracing::debug!("move of {}..{} rejected: out of bounds", from, to);
            return false;
        }
        if offset_x == 0 && offset_y == 0 {
            return true;
        }

        let mut moved = Vec::new();
        for pos in source.cells() {
            let Some(cell) = self.matrix.cell(pos) else {
                continue;
            };
            if !cell.is_occupied() {
                continue;
            }
            if cell.locked {
                tracing::debug!("move rejected: {} is locked", pos);
                return false;
            }
            // Occupied cells inside the selection travel too, so only cells
            // outside it can collide. Locked cells never travel.
            let target = pos.offset(offset_y, offset_x);
            let blocked = match self.matrix.cell(target) {
                Some(existing) => {
                    existing.locked || (existing.is_occupied() && !source.contains(target))
                }
                None => true,
            };
            if blocked {
                tracing::debug!("move rejected: {} collides at {}", pos, target);
                return false;
            }
            moved.push(MovedCell {
                source: pos,
                content: cell.clone(),
            });
        }

        // Links are only carried between two cells that both travel.
        let mut links = Vec::new();
        for cell in moved.iter() {
            for side in [Side::Right, Side::Bottom] {
                let neighbor = cell.source.neighbor(side);
                if moved.iter().any(|other| other.source == neighbor) {
                    links.push((cell.source, side, self.link(cell.source, side)));
                }
            }
        }

        for cell in moved.iter() {
            self.vacate(cell.source);
        }
        for cell in moved.iter() {
            let target = cell.source.offset(offset_y, offset_x);
            self.vacate(target);
            let Some(mut content) = self.matrix.cell(target).cloned() else {
                continue;
            };
            content.silicon = cell.content.silicon;
            content.metal = cell.content.metal;
            content.name = cell.content.name.clone();
            self.matrix.update_cell(target, content);
        }
        for (pos, side, link) in links {
            self.matrix
                .update_link(pos.offset(offset_y, offset_x), side, link);
        }

        self.destroy_broken_gates();
        tracing::debug!(
            "moved {} cells from {}..{} by ({}, {})",
            moved.len(),
            from,
            to,
            offset_y,
            offset_x
        );
        true
    }

    /// Clears the silicon, metal and label of a cell together with all four of its links.
    fn vacate(&mut self, pos: Pos) {
        let Some(mut cell) = self.matrix.cell(pos).cloned() else {
            return;
        };
        cell.silicon = Silicon::None;
        cell.metal = false;
        cell.name = None;
        self.matrix.update_cell(pos, cell);
        for side in Side::ALL {
            if self.matrix.link(pos, side).is_some() && !self.link(pos, side).is_empty() {
                self.matrix.update_link(pos, side, LinkContent::NONE);
            }
        }
    }
}
