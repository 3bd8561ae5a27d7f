//! Netlist extraction.
//!
//! Every (cell, layer) place owns one key in a union-find table. Flood fills
//! claim places and union them with the seed they started from, so a place
//! reached from several seeds ends up identifying those seeds with one net.

use arcstr::ArcStr;
use ena::unify::{InPlaceUnificationTable, NoError, UnifyKey, UnifyValue};
use geometry::prelude::*;
use grid::Grid;
use indexmap::IndexMap;
use layer::{Base, Layer, Silicon, SiliconLink};
use tracing::{span, Level};

use crate::error::{Error, Result};
use crate::netlist::{
    CellAssignment, NetPin, Netlist, NodeId, Place, PlaceLayer, SchemeGate, SchemeNode,
};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
struct PlaceKey(u32);

/// The order in which a net was first seeded.
///
/// Nets are numbered by their earliest seed, which keeps node IDs stable
/// across runs on the same layer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
struct SeedRank(Option<u32>);

impl UnifyKey for PlaceKey {
    type Value = SeedRank;
    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> Self {
        Self(u)
    }

    fn tag() -> &'static str {
        "PlaceKey"
    }
}

impl UnifyValue for SeedRank {
    type Error = NoError;

    fn unify_values(value1: &Self, value2: &Self) -> std::result::Result<Self, Self::Error> {
        Ok(match (value1.0, value2.0) {
            (Some(a), Some(b)) => SeedRank(Some(a.min(b))),
            (a, b) => SeedRank(a.or(b)),
        })
    }
}

type PlaceUf = InPlaceUnificationTable<PlaceKey>;

/// Maps a place key to the net numbered by its seed rank.
fn resolve(uf: &mut PlaceUf, ranks: &[u32], key: PlaceKey) -> Option<NodeId> {
    let SeedRank(rank) = uf.probe_value(key);
    rank.and_then(|rank| ranks.binary_search(&rank).ok()).map(NodeId)
}

struct PendingGate {
    input_groups: Vec<Vec<PlaceKey>>,
    power: [PlaceKey; 2],
    inverted: bool,
    cells: Vec<Pos>,
}

struct Builder<'a> {
    layer: &'a Layer,
    uf: PlaceUf,
    claimed: Vec<bool>,
    next_rank: u32,
    gates: Vec<PendingGate>,
}

/// Extracts the nets, gates and pins of a committed layer.
///
/// Returns [`Error::Uncommitted`] if the layer has pending edits.
///
/// # Examples
///
/// ```
/// # use geometry::prelude::*;
/// # use layer::{Layer, LinkKind, Pin};
/// # use stimulus::ValuesFunction;
/// let mut layer = Layer::new(3, 1);
/// layer.add_pin(Pin::input("in", Region::with_size(Pos::new(0, 0), 1, 1), ValuesFunction::Static(true))).unwrap();
/// layer.add_pin(Pin::output("out", Region::with_size(Pos::new(0, 2), 1, 1), ValuesFunction::Static(true))).unwrap();
/// layer.add_metal(Pos::new(0, 1));
/// layer.add_link(Pos::new(0, 0), Pos::new(0, 1), LinkKind::Metal);
/// layer.add_link(Pos::new(0, 1), Pos::new(0, 2), LinkKind::Metal);
/// layer.commit(true);
///
/// let netlist = topology::build_topology(&layer).unwrap();
/// assert_eq!(netlist.nodes().len(), 1);
/// assert_eq!(netlist.pin_nodes("in"), netlist.pin_nodes("out"));
/// ```
pub fn build_topology(layer: &Layer) -> Result<Netlist> {
    let _guard = span!(Level::INFO, "building topology").entered();
    if layer.is_dirty() {
        return Err(Error::Uncommitted);
    }
    let mut builder = Builder::new(layer);
    builder.detect_gates();
    builder.sweep_pins();
    let netlist = builder.finish();
    tracing::debug!(
        "extracted {} nodes, {} gates and {} pins",
        netlist.nodes.len(),
        netlist.gates.len(),
        netlist.pins.len()
    );
    Ok(netlist)
}

impl<'a> Builder<'a> {
    fn new(layer: &'a Layer) -> Self {
        let places = layer.width() * layer.height() * 2;
        let mut uf = PlaceUf::new();
        for _ in 0..places {
            uf.new_key(SeedRank::default());
        }
        Self {
            layer,
            uf,
            claimed: vec![false; places],
            next_rank: 0,
            gates: Vec::new(),
        }
    }

    fn index(&self, place: Place) -> usize {
        let cell = place.pos.row as usize * self.layer.width() + place.pos.col as usize;
        let layer = match place.layer {
            PlaceLayer::Silicon => 0,
            PlaceLayer::Metal => 1,
        };
        cell * 2 + layer
    }

    fn key(&self, place: Place) -> PlaceKey {
        PlaceKey(self.index(place) as u32)
    }

    fn silicon(&self, pos: Pos) -> Silicon {
        self.layer
            .matrix()
            .cell(pos)
            .map(|cell| cell.silicon)
            .unwrap_or_default()
    }

    /// Whether a flood may enter `place`.
    ///
    /// Gate silicon belongs to no net: it is the switch between two nets.
    fn conducts(&self, place: Place) -> bool {
        let Some(cell) = self.layer.matrix().cell(place.pos) else {
            return false;
        };
        match place.layer {
            PlaceLayer::Silicon => cell.silicon.is_present() && !cell.silicon.is_gate(),
            PlaceLayer::Metal => cell.metal,
        }
    }

    fn neighbors(&self, place: Place, out: &mut Vec<Place>) {
        let pos = place.pos;
        for side in Side::ALL {
            let link = self.layer.link(pos, side);
            let connected = match place.layer {
                PlaceLayer::Silicon => link.silicon == SiliconLink::BiDirectional,
                PlaceLayer::Metal => link.metal,
            };
            if connected {
                out.push(Place::new(pos.neighbor(side), place.layer));
            }
        }
        if self.silicon(pos).has_via() {
            out.push(Place::new(pos, place.layer.other()));
        }
    }

    /// Claims every place connected to `seed` and returns the seed's key,
    /// or [`None`] if `seed` does not conduct.
    fn flood(&mut self, seed: Place) -> Option<PlaceKey> {
        if !self.conducts(seed) {
            return None;
        }
        let root = self.key(seed);
        let index = self.index(seed);
        if self.claimed[index] {
            return Some(root);
        }
        self.claimed[index] = true;

        let mut worklist = vec![seed];
        let mut adjacent = Vec::with_capacity(5);
        while let Some(place) = worklist.pop() {
            adjacent.clear();
            self.neighbors(place, &mut adjacent);
            for &next in adjacent.iter() {
                if !self.conducts(next) {
                    continue;
                }
                let index = self.index(next);
                if self.claimed[index] {
                    continue;
                }
                self.claimed[index] = true;
                self.uf.union(root, self.key(next));
                worklist.push(next);
            }
        }
        Some(root)
    }

    /// Floods from `seed` and gives the resulting net a rank if it has none yet.
    fn seed(&mut self, seed: Place) -> Option<PlaceKey> {
        let key = self.flood(seed)?;
        self.uf.union_value(key, SeedRank(Some(self.next_rank)));
        self.next_rank += 1;
        Some(key)
    }

    fn detect_gates(&mut self) {
        let mut visited = vec![false; self.layer.width() * self.layer.height()];
        let positions: Vec<Pos> = self.layer.positions().collect();
        for pos in positions {
            let silicon = self.silicon(pos);
            let Some(axis) = silicon.gate_axis() else {
                continue;
            };
            let cell_index = pos.row as usize * self.layer.width() + pos.col as usize;
            if visited[cell_index] {
                continue;
            }

            let mut cells = vec![pos];
            let mut last = pos;
            loop {
                let next = last.neighbor(axis.forward());
                if self.silicon(next) != silicon
                    || self.layer.link(last, axis.forward()).silicon != SiliconLink::BiDirectional
                {
                    break;
                }
                cells.push(next);
                last = next;
            }
            for cell in cells.iter() {
                visited[cell.row as usize * self.layer.width() + cell.col as usize] = true;
            }

            let before = Place::silicon(pos.neighbor(axis.backward()));
            let after = Place::silicon(last.neighbor(axis.forward()));
            let (Some(source), Some(drain)) = (self.seed(before), self.seed(after)) else {
                tracing::warn!("skipping {} gate at {}: missing power silicon", axis, pos);
                continue;
            };

            let mut input_groups = Vec::with_capacity(cells.len());
            for &cell in cells.iter() {
                let mut group = Vec::new();
                for side in Side::with_dir(axis.other()) {
                    if self.layer.link(cell, side).silicon != SiliconLink::Slave {
                        continue;
                    }
                    match self.seed(Place::silicon(cell.neighbor(side))) {
                        Some(key) => group.push(key),
                        None => {
                            tracing::warn!("gate input at {} carries no net", cell.neighbor(side))
                        }
                    }
                }
                input_groups.push(group);
            }

            self.gates.push(PendingGate {
                input_groups,
                power: [source, drain],
                inverted: silicon.base() == Some(Base::P),
                cells,
            });
        }
    }

    fn sweep_pins(&mut self) {
        for pin in self.layer.pins() {
            if self.seed(Place::metal(pin.anchor())).is_none() {
                tracing::warn!("pin `{}` has no metal at {}", pin.name, pin.anchor());
            }
        }
    }

    fn finish(mut self) -> Netlist {
        let width = self.layer.width();
        let height = self.layer.height();

        let mut ranks = Vec::new();
        for (index, claimed) in self.claimed.iter().enumerate() {
            if !claimed {
                continue;
            }
            if let SeedRank(Some(rank)) = self.uf.probe_value(PlaceKey(index as u32)) {
                ranks.push(rank);
            }
        }
        ranks.sort_unstable();
        ranks.dedup();

        let mut nodes = vec![SchemeNode::default(); ranks.len()];
        let mut assignments = Grid::init(height, width, CellAssignment::default());

        let positions: Vec<Pos> = self.layer.positions().collect();
        for pos in positions {
            for layer in [PlaceLayer::Silicon, PlaceLayer::Metal] {
                let place = Place::new(pos, layer);
                if !self.claimed[self.index(place)] {
                    continue;
                }
                let key = self.key(place);
                let Some(id) = resolve(&mut self.uf, &ranks, key) else {
                    continue;
                };
                let node = &mut nodes[id.0];
                node.places.push(place);
                let assignment = &mut assignments[(pos.row as usize, pos.col as usize)];
                match layer {
                    PlaceLayer::Silicon => assignment.silicon = Some(id),
                    PlaceLayer::Metal => {
                        assignment.metal = Some(id);
                        let pin = self
                            .layer
                            .matrix()
                            .cell(pos)
                            .and_then(|cell| cell.pin.clone());
                        if let Some(pin) = pin {
                            if !node.pins.contains(&pin) {
                                node.pins.push(pin);
                            }
                        }
                    }
                }
            }
        }

        let mut gates = Vec::with_capacity(self.gates.len());
        for gate in std::mem::take(&mut self.gates) {
            let [source, drain] = gate.power;
            let (Some(source), Some(drain)) =
                (
                    resolve(&mut self.uf, &ranks, source),
                    resolve(&mut self.uf, &ranks, drain),
                )
            else {
                continue;
            };
            let input_groups = gate
                .input_groups
                .into_iter()
                .map(|group| {
                    let mut ids: Vec<NodeId> = Vec::with_capacity(group.len());
                    for key in group {
                        if let Some(id) = resolve(&mut self.uf, &ranks, key) {
                            if !ids.contains(&id) {
                                ids.push(id);
                            }
                        }
                    }
                    ids
                })
                .collect();
            gates.push(SchemeGate {
                input_groups,
                power: [source, drain],
                inverted: gate.inverted,
                cells: gate.cells,
            });
        }

        let mut pins: IndexMap<ArcStr, NetPin> = IndexMap::new();
        for pin in self.layer.pins() {
            let mut ids = Vec::new();
            for pos in pin.region.cells() {
                let id = assignments
                    .get(pos.row as usize, pos.col as usize)
                    .and_then(|assignment| assignment.metal);
                if let Some(id) = id {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
            pins.insert(
                pin.name.clone(),
                NetPin {
                    name: pin.name.clone(),
                    is_output: pin.is_output,
                    is_significant: pin.is_significant,
                    function: pin.function.clone(),
                    nodes: ids,
                },
            );
        }

        Netlist {
            nodes,
            gates,
            pins,
            assignments,
        }
    }
}
