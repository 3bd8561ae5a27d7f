//! The transactional cell/link store.
//!
//! A [`Matrix`] keeps two copies of the grid: the working copy that edits
//! write to, and the baseline saved by the last [`Matrix::commit`].
//! Revertable commits record the cells that changed so that they can be
//! undone and redone.

use std::collections::VecDeque;

use geometry::prelude::*;
use grid::Grid;
use serde::{Deserialize, Serialize};

use crate::content::{CellContent, LinkContent};

/// One stored grid position: a cell and the two links it owns.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// The cell contents.
    pub cell: CellContent,
    /// The link to the right-hand neighbor, seen from this cell.
    pub right: LinkContent,
    /// The link to the neighbor below, seen from this cell.
    pub bottom: LinkContent,
}

#[derive(Debug, Clone)]
struct Change {
    index: (usize, usize),
    before: Slot,
    after: Slot,
}

#[derive(Debug, Clone, Default)]
struct Transaction {
    changes: Vec<Change>,
}

/// A fixed-size grid of cells and links with commit, reject, undo and redo.
///
/// None of the operations fail: out-of-bounds writes and history operations
/// with nothing to do are ignored.
#[derive(Debug, Clone)]
pub struct Matrix {
    width: usize,
    height: usize,
    current: Grid<Slot>,
    committed: Grid<Slot>,
    dirty: bool,
    history: VecDeque<Transaction>,
    /// The number of transactions in `history` that are currently applied.
    cursor: usize,
    max_undo_depth: Option<usize>,
}

impl Matrix {
    /// Creates an empty, committed matrix with unbounded undo history.
    pub fn new(width: usize, height: usize) -> Self {
        let grid = Grid::init(height, width, Slot::default());
        Self {
            width,
            height,
            current: grid.clone(),
            committed: grid,
            dirty: false,
            history: VecDeque::new(),
            cursor: 0,
            max_undo_depth: None,
        }
    }

    /// Limits the number of undoable transactions kept.
    ///
    /// [`None`] keeps every transaction.
    pub fn set_max_undo_depth(&mut self, depth: Option<usize>) {
        self.max_undo_depth = depth;
        self.enforce_depth();
    }

    /// The number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if `pos` lies on the grid.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.is_within(self.width, self.height)
    }

    fn index(&self, pos: Pos) -> Option<(usize, usize)> {
        self.contains(pos)
            .then_some((pos.row as usize, pos.col as usize))
    }

    /// The contents of the cell at `pos`, or [`None`] off the grid.
    pub fn cell(&self, pos: Pos) -> Option<&CellContent> {
        self.index(pos).map(|idx| &self.current[idx].cell)
    }

    /// The link leaving `pos` across `side`, as seen from `pos`.
    ///
    /// Returns [`None`] if either end of the link is off the grid.
    pub fn link(&self, pos: Pos, side: Side) -> Option<LinkContent> {
        let (owner, stored) = self.canonical(pos, side)?;
        let slot = &self.current[owner];
        let link = match stored {
            Side::Right => slot.right,
            _ => slot.bottom,
        };
        Some(if side.is_stored() {
            link
        } else {
            link.inverted()
        })
    }

    /// Maps a link to the slot that stores it and the stored side.
    fn canonical(&self, pos: Pos, side: Side) -> Option<((usize, usize), Side)> {
        let other = pos.neighbor(side);
        self.index(other)?;
        if side.is_stored() {
            Some((self.index(pos)?, side))
        } else {
            Some((self.index(other)?, !side))
        }
    }

    /// Overwrites the contents of the cell at `pos`.
    pub fn update_cell(&mut self, pos: Pos, content: CellContent) {
        let Some(idx) = self.index(pos) else {
            tracing::trace!("ignoring cell write outside the grid at {}", pos);
            return;
        };
        self.current[idx].cell = content;
        self.dirty = true;
    }

    /// Overwrites the link leaving `pos` across `side`.
    ///
    /// `content` is given as seen from `pos`; the opposite end observes its inverse.
    pub fn update_link(&mut self, pos: Pos, side: Side, content: LinkContent) {
        let Some((owner, stored)) = self.canonical(pos, side) else {
            tracing::trace!("ignoring link write outside the grid at {} {:?}", pos, side);
            return;
        };
        let content = if side.is_stored() {
            content
        } else {
            content.inverted()
        };
        let slot = &mut self.current[owner];
        match stored {
            Side::Right => slot.right = content,
            _ => slot.bottom = content,
        }
        self.dirty = true;
    }

    /// Returns `true` if there are uncommitted edits.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The id of the most recently applied transaction; `0` when none is applied.
    #[inline]
    pub fn transaction_id(&self) -> usize {
        self.cursor
    }

    /// Returns `true` if [`Matrix::undo`] would change anything.
    pub fn can_undo(&self) -> bool {
        self.dirty || self.cursor > 0
    }

    /// Returns `true` if [`Matrix::redo`] would change anything.
    pub fn can_redo(&self) -> bool {
        !self.dirty && self.cursor < self.history.len()
    }

    /// Saves the working copy as the new baseline.
    ///
    /// A revertable commit records the changed cells as a new transaction.
    /// Either kind of commit discards transactions that were undone, so they
    /// can no longer be redone.
    pub fn commit(&mut self, revertable: bool) {
        if !self.dirty {
            return;
        }
        self.history.truncate(self.cursor);
        if revertable {
            let changes = self.diff();
            if changes.is_empty() {
                tracing::trace!("commit with no effective changes");
            } else {
                self.history.push_back(Transaction { changes });
                self.cursor += 1;
                self.enforce_depth();
            }
        }
        self.committed = self.current.clone();
        self.dirty = false;
    }

    /// Restores the baseline, discarding uncommitted edits.
    pub fn reject(&mut self) {
        if !self.dirty {
            return;
        }
        self.current = self.committed.clone();
        self.dirty = false;
    }

    /// Reverts the most recent transaction, or rejects uncommitted edits if there are any.
    pub fn undo(&mut self) {
        if self.dirty {
            self.reject();
            return;
        }
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let changes = std::mem::take(&mut self.history[self.cursor].changes);
        for change in changes.iter() {
            self.restore(change.index, change.before.clone());
        }
        self.history[self.cursor].changes = changes;
        tracing::debug!("undid transaction {}", self.cursor + 1);
    }

    /// Re-applies the most recently undone transaction.
    ///
    /// Does nothing while there are uncommitted edits.
    pub fn redo(&mut self) {
        if self.dirty || self.cursor >= self.history.len() {
            return;
        }
        let changes = std::mem::take(&mut self.history[self.cursor].changes);
        for change in changes.iter() {
            self.restore(change.index, change.after.clone());
        }
        self.history[self.cursor].changes = changes;
        self.cursor += 1;
        tracing::debug!("redid transaction {}", self.cursor);
    }

    /// Drops all recorded transactions.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.cursor = 0;
    }

    fn restore(&mut self, index: (usize, usize), slot: Slot) {
        self.current[index] = slot.clone();
        self.committed[index] = slot;
    }

    fn diff(&self) -> Vec<Change> {
        let mut changes = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                let index = (row, col);
                if self.current[index] != self.committed[index] {
                    changes.push(Change {
                        index,
                        before: self.committed[index].clone(),
                        after: self.current[index].clone(),
                    });
                }
            }
        }
        changes
    }

    fn enforce_depth(&mut self) {
        let Some(depth) = self.max_undo_depth else {
            return;
        };
        while self.cursor > depth {
            self.history.pop_front();
            self.cursor -= 1;
        }
    }

    /// The stored slot at `pos`.
    pub(crate) fn slot(&self, pos: Pos) -> Option<&Slot> {
        self.index(pos).map(|idx| &self.current[idx])
    }

    /// Overwrites the stored slot at `pos`, including both owned links.
    pub(crate) fn update_slot(&mut self, pos: Pos, slot: Slot) {
        if let Some(idx) = self.index(pos) {
            self.current[idx] = slot;
            self.dirty = true;
        }
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        Region::with_size(Pos::zero(), self.width as i64, self.height as i64).cells()
    }
}
