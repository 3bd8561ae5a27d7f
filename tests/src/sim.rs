use approx::assert_relative_eq;
use test_log::test;

use layer::Base;
use sim::{simulate, simulate_with, SimOptions};
use stimulus::{AggregateOp, FunctionTable, ValuesFunction};
use topology::build_topology;

use crate::shared::{npn, two_gate_chain, wire};

#[test]
fn static_wire_scores_perfectly() {
    let layer = wire(ValuesFunction::Static(true), ValuesFunction::Static(true));
    let netlist = build_topology(&layer).unwrap();
    let result = simulate(&netlist, &FunctionTable::new(), 5).unwrap();

    assert_relative_eq!(result.score, 1.0);
    let out = result.pin("out").unwrap();
    assert_eq!(out.actual.len(), 5);
    assert!(out.actual.iter().all(|value| *value));
    assert!(out.expected.iter().all(|value| *value));
}

#[test]
fn npn_joins_power_nets_while_its_base_is_high() {
    // The gate opens on the step after its base goes high, so the low net
    // follows the base with a one-step delay.
    let layer = npn(
        ValuesFunction::periodic(0, 2, 2),
        ValuesFunction::Static(true),
        ValuesFunction::periodic(1, 2, 2),
    );
    let netlist = build_topology(&layer).unwrap();
    let result = simulate(&netlist, &FunctionTable::new(), 8).unwrap();

    let base = result.pin("base").unwrap();
    let hi = result.pin("hi_probe").unwrap();
    let lo = result.pin("lo_probe").unwrap();
    assert_eq!(
        base.actual,
        vec![true, false, false, true, true, false, false, true]
    );
    assert_eq!(hi.actual, vec![true; 8]);
    assert_eq!(
        lo.actual,
        vec![true, true, false, false, true, true, false, false]
    );
    for step in 0..8 {
        let previous_base = step == 0 || base.actual[step - 1];
        assert_eq!(lo.actual[step] == hi.actual[step], previous_base, "step {}", step);
    }
    assert_relative_eq!(result.score, 1.0);
}

#[test]
fn p_chain_is_a_nor() {
    // out(t) = !(a(t - 1) | b(t - 1)).
    let layer = two_gate_chain(
        Base::P,
        ValuesFunction::periodic(0, 1, 1),
        ValuesFunction::periodic(0, 2, 2),
        ValuesFunction::periodic(4, 1, 3),
    );
    let netlist = build_topology(&layer).unwrap();
    let result = simulate(&netlist, &FunctionTable::new(), 12).unwrap();
    assert!(result.pin("out").unwrap().matches());
    assert_relative_eq!(result.score, 1.0);
}

#[test]
fn n_chain_is_an_and() {
    let layer = two_gate_chain(
        Base::N,
        ValuesFunction::periodic(0, 1, 1),
        ValuesFunction::periodic(0, 2, 2),
        ValuesFunction::periodic(1, 1, 3),
    );
    let netlist = build_topology(&layer).unwrap();
    let result = simulate(&netlist, &FunctionTable::new(), 12).unwrap();
    assert!(result.pin("out").unwrap().matches());
    assert_relative_eq!(result.score, 1.0);
}

#[test]
fn expectations_can_be_shared_through_the_table() {
    let mut table = FunctionTable::new();
    table
        .insert("a", ValuesFunction::periodic(0, 1, 1))
        .unwrap();
    table
        .insert("b", ValuesFunction::periodic(0, 2, 2))
        .unwrap();
    // The AND gate lags one step, so the expectation is the AND of the inputs
    // shifted by one tick; a leading low tick covers the settle step.
    table
        .insert(
            "expected",
            ValuesFunction::aggregate(
                AggregateOp::And,
                [
                    ValuesFunction::periodic(1, 1, 1),
                    ValuesFunction::periodic(1, 2, 2),
                ],
            ),
        )
        .unwrap();

    let layer = two_gate_chain(
        Base::N,
        ValuesFunction::reference("a"),
        ValuesFunction::reference("b"),
        ValuesFunction::reference("expected"),
    );
    let netlist = build_topology(&layer).unwrap();
    let options = SimOptions {
        max_steps: 16,
        ..Default::default()
    };
    let result = simulate_with(&netlist, &table, &options).unwrap();
    assert_relative_eq!(result.score, 1.0);
}

#[test]
fn wrong_expectation_lowers_the_score() {
    let layer = two_gate_chain(
        Base::N,
        ValuesFunction::Static(true),
        ValuesFunction::Static(true),
        ValuesFunction::Static(true),
    );
    let netlist = build_topology(&layer).unwrap();
    // The settle step is the only mismatch: the chain opens one step late.
    let result = simulate(&netlist, &FunctionTable::new(), 3).unwrap();
    assert_relative_eq!(result.score, 0.75);
    assert!(result.pin("out").unwrap().matches());
}
