//! Whole-layer content snapshots for persistence.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matrix::Slot;
use crate::Layer;

/// The contents of every cell and stored link of a layer, in row-major order.
///
/// The byte layout of a serialized snapshot is up to the serializer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The number of columns.
    pub width: usize,
    /// The number of rows.
    pub height: usize,
    /// One slot per cell: the cell and its right and bottom links.
    pub slots: Vec<Slot>,
}

impl Layer {
    /// Captures the working contents of the layer.
    pub fn export_content(&self) -> Snapshot {
        let slots = self
            .positions()
            .filter_map(|pos| self.matrix.slot(pos).cloned())
            .collect();
        Snapshot {
            width: self.width(),
            height: self.height(),
            slots,
        }
    }

    /// Replaces the layer contents with `snapshot`.
    ///
    /// The loaded contents become the committed baseline and the undo history
    /// is cleared. Pins are not part of a snapshot.
    pub fn load_content(&mut self, snapshot: &Snapshot) -> Result<()> {
        if snapshot.width != self.width() || snapshot.height != self.height() {
            return Err(Error::SnapshotDimensions {
                width: self.width(),
                height: self.height(),
                found_width: snapshot.width,
                found_height: snapshot.height,
            });
        }
        let expected = self.width() * self.height();
        if snapshot.slots.len() != expected {
            return Err(Error::SnapshotLength {
                expected,
                found: snapshot.slots.len(),
            });
        }
        let positions: Vec<_> = self.positions().collect();
        for (pos, slot) in positions.into_iter().zip(snapshot.slots.iter()) {
            self.matrix.update_slot(pos, slot.clone());
        }
        self.matrix.commit(false);
        self.matrix.clear_history();
        tracing::debug!("loaded {}x{} snapshot", self.width(), self.height());
        Ok(())
    }
}
