//! Netlist extraction from committed layers.
//!
//! [`build_topology`] turns the geometry of a [`layer::Layer`] into
//! electrical nets ([`SchemeNode`]), transistor chains ([`SchemeGate`]) and
//! pin attachments ([`NetPin`]).
#![warn(missing_docs)]

mod builder;
pub mod error;
pub mod netlist;

pub use builder::build_topology;
pub use error::{Error, Result};
pub use netlist::{
    CellAssignment, NetPin, Netlist, NodeId, Place, PlaceLayer, SchemeGate, SchemeNode,
};
