//! Extracted netlists.

use arcstr::ArcStr;
use geometry::prelude::*;
use grid::Grid;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stimulus::ValuesFunction;

/// The two conducting layers of a cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PlaceLayer {
    /// The silicon layer.
    Silicon,
    /// The metal layer.
    Metal,
}

impl PlaceLayer {
    /// Returns the other layer.
    pub const fn other(&self) -> Self {
        match self {
            Self::Silicon => Self::Metal,
            Self::Metal => Self::Silicon,
        }
    }
}

/// One layer of one cell: the smallest unit of connectivity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Place {
    /// The cell.
    pub pos: Pos,
    /// The layer within the cell.
    pub layer: PlaceLayer,
}

impl Place {
    /// Creates a new [`Place`].
    pub const fn new(pos: Pos, layer: PlaceLayer) -> Self {
        Self { pos, layer }
    }

    /// The silicon place of a cell.
    pub const fn silicon(pos: Pos) -> Self {
        Self::new(pos, PlaceLayer::Silicon)
    }

    /// The metal place of a cell.
    pub const fn metal(pos: Pos) -> Self {
        Self::new(pos, PlaceLayer::Metal)
    }
}

/// An opaque node identifier, valid within the [`Netlist`] that produced it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The index of the node in [`Netlist::nodes`].
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// An electrical net: places connected to each other without crossing a gate.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchemeNode {
    pub(crate) places: Vec<Place>,
    pub(crate) pins: Vec<ArcStr>,
}

impl SchemeNode {
    /// The places of the net, in row-major order with silicon before metal.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// The names of the pins touching the net.
    pub fn pins(&self) -> &[ArcStr] {
        &self.pins
    }
}

/// A transistor, or a chain of adjacent transistors of the same type.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchemeGate {
    pub(crate) input_groups: Vec<Vec<NodeId>>,
    pub(crate) power: [NodeId; 2],
    pub(crate) inverted: bool,
    pub(crate) cells: Vec<Pos>,
}

impl SchemeGate {
    /// One group per chain position; the nodes of a group are OR'ed together.
    pub fn input_groups(&self) -> &[Vec<NodeId>] {
        &self.input_groups
    }

    /// The two nodes the gate connects when open.
    pub fn power_nodes(&self) -> [NodeId; 2] {
        self.power
    }

    /// `true` for P-type gates, which open when their inputs are low.
    pub fn is_inversion_gate(&self) -> bool {
        self.inverted
    }

    /// The gate cells, in chain order.
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }
}

/// A pin as seen by the simulator.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NetPin {
    /// The pin name.
    pub name: ArcStr,
    /// Whether the pin is an output.
    pub is_output: bool,
    /// Whether an output pin participates in scoring.
    pub is_significant: bool,
    /// The stimulus or expectation generator.
    pub function: ValuesFunction,
    /// The nets touching the pin's metal.
    pub nodes: Vec<NodeId>,
}

/// The nets a cell's two layers belong to.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CellAssignment {
    /// The net of the silicon layer.
    pub silicon: Option<NodeId>,
    /// The net of the metal layer.
    pub metal: Option<NodeId>,
}

/// The nets, gates and pins extracted from a layer.
#[derive(Debug, Clone)]
pub struct Netlist {
    pub(crate) nodes: Vec<SchemeNode>,
    pub(crate) gates: Vec<SchemeGate>,
    pub(crate) pins: IndexMap<ArcStr, NetPin>,
    pub(crate) assignments: Grid<CellAssignment>,
}

impl Netlist {
    /// The nets, indexed by [`NodeId::index`].
    pub fn nodes(&self) -> &[SchemeNode] {
        &self.nodes
    }

    /// The net with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` comes from a different netlist.
    pub fn node(&self, id: NodeId) -> &SchemeNode {
        &self.nodes[id.0]
    }

    /// The gates, in the row-major order of their first cell.
    pub fn gates(&self) -> &[SchemeGate] {
        &self.gates
    }

    /// The pins, in layer order.
    pub fn pins(&self) -> impl Iterator<Item = &NetPin> {
        self.pins.values()
    }

    /// The pin named `name`, if any.
    pub fn pin(&self, name: &str) -> Option<&NetPin> {
        self.pins.get(name)
    }

    /// The nets touching the pin named `name`; empty for unknown pins.
    pub fn pin_nodes(&self, name: &str) -> &[NodeId] {
        self.pins
            .get(name)
            .map(|pin| pin.nodes.as_slice())
            .unwrap_or_default()
    }

    /// The nets assigned to the two layers of a cell.
    ///
    /// Cells off the grid, or not reached from any gate or pin, have no nets.
    pub fn assignment(&self, pos: Pos) -> CellAssignment {
        if !pos.is_within(self.assignments.cols(), self.assignments.rows()) {
            return CellAssignment::default();
        }
        self.assignments[(pos.row as usize, pos.col as usize)]
    }

    /// The net containing the given layer of the cell at `pos`, if any.
    pub fn node_at(&self, pos: Pos, layer: PlaceLayer) -> Option<NodeId> {
        let assignment = self.assignment(pos);
        match layer {
            PlaceLayer::Silicon => assignment.silicon,
            PlaceLayer::Metal => assignment.metal,
        }
    }

    /// Returns `true` if two netlists assign every cell layer to the same nets.
    pub fn same_assignments(&self, other: &Netlist) -> bool {
        self.assignments.rows() == other.assignments.rows()
            && self.assignments.cols() == other.assignments.cols()
            && self
                .assignments
                .iter()
                .zip(other.assignments.iter())
                .all(|(a, b)| a == b)
    }
}
