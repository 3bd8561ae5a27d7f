use test_log::test;

use layer::Base;
use stimulus::ValuesFunction;
use topology::{build_topology, PlaceLayer};

use crate::shared::{npn, p, two_gate_chain, wire};

#[test]
fn extraction_is_deterministic() {
    let layer = two_gate_chain(
        Base::P,
        ValuesFunction::Static(false),
        ValuesFunction::Static(false),
        ValuesFunction::Static(true),
    );
    let first = build_topology(&layer).unwrap();
    let second = build_topology(&layer).unwrap();
    assert_eq!(first.nodes().len(), second.nodes().len());
    assert_eq!(first.gates().len(), second.gates().len());
    assert!(first.same_assignments(&second));
    for pos in layer.positions() {
        assert_eq!(first.assignment(pos), second.assignment(pos));
    }
}

#[test]
fn wire_is_one_net() {
    let layer = wire(ValuesFunction::Static(true), ValuesFunction::Static(true));
    let netlist = build_topology(&layer).unwrap();
    assert_eq!(netlist.nodes().len(), 1);
    assert!(netlist.gates().is_empty());
    assert_eq!(netlist.pin_nodes("in"), netlist.pin_nodes("out"));
}

#[test]
fn npn_power_nets_are_probed() {
    let layer = npn(
        ValuesFunction::Static(false),
        ValuesFunction::Static(true),
        ValuesFunction::Static(false),
    );
    let netlist = build_topology(&layer).unwrap();
    assert_eq!(netlist.gates().len(), 1);
    assert_eq!(netlist.nodes().len(), 3);

    let [hi, lo] = netlist.gates()[0].power_nodes();
    assert_eq!(netlist.pin_nodes("hi"), &[hi]);
    assert_eq!(netlist.pin_nodes("hi_probe"), &[hi]);
    assert_eq!(netlist.pin_nodes("lo"), &[lo]);
    assert_eq!(netlist.pin_nodes("lo_probe"), &[lo]);
    assert_eq!(
        netlist.node_at(p(0, 1), PlaceLayer::Silicon),
        netlist.pin_nodes("base").first().copied()
    );
}

#[test]
fn chain_groups_follow_the_channel() {
    let layer = two_gate_chain(
        Base::N,
        ValuesFunction::Static(true),
        ValuesFunction::Static(true),
        ValuesFunction::Static(true),
    );
    let netlist = build_topology(&layer).unwrap();
    assert_eq!(netlist.gates().len(), 1);
    let gate = &netlist.gates()[0];
    assert_eq!(gate.cells(), &[p(1, 1), p(1, 2)]);
    assert_eq!(gate.input_groups()[0], netlist.pin_nodes("a"));
    assert_eq!(gate.input_groups()[1], netlist.pin_nodes("b"));
    assert!(!gate.is_inversion_gate());
}
