//! The editable two-layer chip layout.
//!
//! A [`Layer`] is a fixed grid of cells. Each cell may hold silicon (P or N,
//! optionally refined into a via or a gate) and metal, and each pair of
//! adjacent cells shares one [link](LinkContent). Edits go through
//! invariant-preserving operations that return `false` when rejected;
//! the underlying [`Matrix`] records committed transactions for undo and redo.
//!
//! # Examples
//!
//! ```
//! # use layer::*;
//! # use geometry::prelude::*;
//! let mut layer = Layer::new(4, 4);
//! assert!(layer.add_metal(Pos::new(0, 0)));
//! assert!(layer.add_metal(Pos::new(0, 1)));
//! assert!(layer.add_link(Pos::new(0, 0), Pos::new(0, 1), LinkKind::Metal));
//! layer.commit(true);
//! assert!(layer.read(Pos::new(0, 1)).links[Side::Left].metal);
//! ```
#![warn(missing_docs)]

use arcstr::ArcStr;
use geometry::prelude::*;
use indexmap::IndexMap;

pub mod config;
pub mod content;
mod edit;
pub mod error;
pub mod matrix;
mod moves;
pub mod pin;
pub mod snapshot;
pub mod validation;

pub use config::{HistoryConfig, LayerConfig};
pub use content::{Base, CellContent, LinkContent, LinkKind, Silicon, SiliconLink};
pub use error::{Error, Result};
pub use matrix::Matrix;
pub use pin::Pin;
pub use snapshot::Snapshot;
pub use validation::Issue;


/// A read-only view of one cell and its four links.
///
/// Reading off the grid yields an invalid cell: locked, without silicon,
/// metal or links.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CellView {
    /// The position that was read.
    pub pos: Pos,
    /// Whether `pos` lies on the grid.
    pub valid: bool,
    /// The cell contents.
    pub content: CellContent,
    /// The links leaving the cell, as seen from the cell.
    pub links: Sides<LinkContent>,
}

impl CellView {
    fn invalid(pos: Pos) -> Self {
        Self {
            pos,
            valid: false,
            content: CellContent {
                locked: true,
                ..Default::default()
            },
            links: Sides::uniform(LinkContent::NONE),
        }
    }

    /// The silicon contents.
    #[inline]
    pub fn silicon(&self) -> Silicon {
        self.content.silicon
    }

    /// Whether the cell holds metal.
    #[inline]
    pub fn has_metal(&self) -> bool {
        self.content.metal
    }

    /// Whether the cell is locked.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.content.locked
    }
}

/// An editable layout grid with pins.
#[derive(Debug, Clone)]
pub struct Layer {
    matrix: Matrix,
    pins: IndexMap<ArcStr, Pin>,
}

impl Layer {
    /// Creates an empty `width` by `height` layer with unbounded undo history.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            matrix: Matrix::new(width, height),
            pins: IndexMap::new(),
        }
    }

    /// Creates an empty layer from a configuration.
    pub fn from_config(config: &LayerConfig) -> Self {
        let mut layer = Self::new(config.width, config.height);
        layer
            .matrix
            .set_max_undo_depth(config.history.max_undo_depth);
        layer
    }

    /// The number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.matrix.width()
    }

    /// The number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.matrix.height()
    }

    /// The underlying transactional store.
    #[inline]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Mutable access to the underlying store, bypassing edit validation.
    #[inline]
    pub fn matrix_mut(&mut self) -> &mut Matrix {
        &mut self.matrix
    }

    /// Reads the cell at `pos` together with its four links.
    pub fn read(&self, pos: Pos) -> CellView {
        let Some(content) = self.matrix.cell(pos) else {
            return CellView::invalid(pos);
        };
        CellView {
            pos,
            valid: true,
            content: content.clone(),
            links: Sides::from_fn(|side| self.link(pos, side)),
        }
    }

    /// The link leaving `pos` across `side`; empty at the grid boundary.
    #[inline]
    pub fn link(&self, pos: Pos, side: Side) -> LinkContent {
        self.matrix.link(pos, side).unwrap_or(LinkContent::NONE)
    }

    pub(crate) fn silicon(&self, pos: Pos) -> Silicon {
        self.matrix
            .cell(pos)
            .map(|cell| cell.silicon)
            .unwrap_or_default()
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        self.matrix.positions()
    }

    /// See [`Matrix::commit`].
    pub fn commit(&mut self, revertable: bool) {
        self.matrix.commit(revertable);
    }

    /// See [`Matrix::reject`].
    pub fn reject(&mut self) {
        self.matrix.reject();
    }

    /// See [`Matrix::undo`].
    pub fn undo(&mut self) {
        self.matrix.undo();
    }

    /// See [`Matrix::redo`].
    pub fn redo(&mut self) {
        self.matrix.redo();
    }

    /// Returns `true` if there are uncommitted edits.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.matrix.is_dirty()
    }

    /// Iterates over the pins in insertion order.
    pub fn pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.values()
    }

    /// The pin named `name`, if any.
    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins.get(name)
    }

    /// Places a pin on the layer.
    ///
    /// Every cell of the region receives locked metal referencing the pin,
    /// and the region's cells are metal-linked to each other.
    /// The placement is committed as part of the baseline (without an undo entry),
    /// together with any pending edits.
    pub fn add_pin(&mut self, pin: Pin) -> Result<()> {
        if self.pins.contains_key(&pin.name) {
            return Err(Error::DuplicatePin(pin.name));
        }
        if pin.region.is_empty() || !pin.region.is_within(self.width(), self.height()) {
            return Err(Error::PinOutOfBounds {
                name: pin.name,
                from: pin.region.from(),
                to: pin.region.to(),
            });
        }
        for pos in pin.region.cells() {
            if let Some(other) = self.matrix.cell(pos).and_then(|cell| cell.pin.clone()) {
                return Err(Error::PinOverlap {
                    name: pin.name,
                    other,
                    pos,
                });
            }
        }

        for pos in pin.region.cells() {
            let Some(mut cell) = self.matrix.cell(pos).cloned() else {
                continue;
            };
            cell.metal = true;
            cell.locked = true;
            cell.pin = Some(pin.name.clone());
            self.matrix.update_cell(pos, cell);
        }
        for pos in pin.region.cells() {
            for side in [Side::Right, Side::Bottom] {
                if pin.region.contains(pos.neighbor(side)) {
                    let mut link = self.link(pos, side);
                    link.metal = true;
                    self.matrix.update_link(pos, side, link);
                }
            }
        }
        tracing::debug!("placed pin `{}` at {}", pin.name, pin.region.from());
        self.pins.insert(pin.name.clone(), pin);
        self.matrix.commit(false);
        Ok(())
    }
}
