//! Layout fixtures shared by the end-to-end tests.

use geometry::prelude::*;
use layer::{Base, Layer, LinkKind, Pin};
use stimulus::ValuesFunction;

pub fn p(row: i64, col: i64) -> Pos {
    Pos::new(row, col)
}

/// A single-cell region at `pos`.
pub fn cell(pos: Pos) -> Region {
    Region::with_size(pos, 1, 1)
}

/// Builds a chain of `gates` transistors with uncommitted edits.
///
/// The channel runs along row `origin.row + 1` from `origin.col` through
/// `origin.col + gates + 1`. Each gate is driven from the row above by
/// silicon of the other base. Both channel ends and every driver get a via.
pub fn chain_geometry(layer: &mut Layer, origin: Pos, channel: Base, gates: i64) {
    let row = origin.row + 1;
    let last = origin.col + gates + 1;
    for col in origin.col..=last {
        assert!(layer.add_silicon(p(row, col), channel));
    }
    for col in origin.col..last {
        assert!(layer.add_link(p(row, col), p(row, col + 1), LinkKind::Silicon));
    }
    for col in origin.col + 1..last {
        let driver = p(origin.row, col);
        assert!(layer.add_silicon(driver, channel.other()));
        assert!(layer.add_link(driver, p(row, col), LinkKind::Silicon));
        assert!(layer.add_via(driver));
    }
    assert!(layer.add_via(p(row, origin.col)));
    assert!(layer.add_via(p(row, last)));
}

/// Two pins joined by a straight metal wire along row 0 of a 5x1 layer.
pub fn wire(drive: ValuesFunction, expect: ValuesFunction) -> Layer {
    let mut layer = Layer::new(5, 1);
    layer
        .add_pin(Pin::input("in", cell(p(0, 0)), drive))
        .expect("failed to place input pin");
    layer
        .add_pin(Pin::output("out", cell(p(0, 4)), expect))
        .expect("failed to place output pin");
    for col in 1..4 {
        assert!(layer.add_metal(p(0, col)));
    }
    for col in 0..4 {
        assert!(layer.add_link(p(0, col), p(0, col + 1), LinkKind::Metal));
    }
    layer.commit(true);
    layer
}

/// An NPN transistor between a high power pin `hi` and a low power pin `lo`.
///
/// Output pins `hi_probe` and `lo_probe` sit below the power cells and are
/// metal-linked to them, so they read the two power nets.
pub fn npn(
    base: ValuesFunction,
    hi_expected: ValuesFunction,
    lo_expected: ValuesFunction,
) -> Layer {
    let mut layer = Layer::new(3, 3);
    chain_geometry(&mut layer, p(0, 0), Base::N, 1);
    layer.commit(true);

    let pins = [
        Pin::input("hi", cell(p(1, 0)), ValuesFunction::Static(true)),
        Pin::input("lo", cell(p(1, 2)), ValuesFunction::Static(false)),
        Pin::input("base", cell(p(0, 1)), base),
        Pin::output("hi_probe", cell(p(2, 0)), hi_expected),
        Pin::output("lo_probe", cell(p(2, 2)), lo_expected),
    ];
    for pin in pins {
        layer.add_pin(pin).expect("failed to place pin");
    }
    assert!(layer.add_link(p(1, 0), p(2, 0), LinkKind::Metal));
    assert!(layer.add_link(p(1, 2), p(2, 2), LinkKind::Metal));
    layer.commit(true);
    layer
}

/// Two gates in series between a high `vdd` pin and an output pin `out`,
/// driven by input pins `a` and `b`.
///
/// With an N channel this is an AND of `a` and `b`; with a P channel it is a NOR.
pub fn two_gate_chain(
    channel: Base,
    a: ValuesFunction,
    b: ValuesFunction,
    expected: ValuesFunction,
) -> Layer {
    let mut layer = Layer::new(4, 2);
    chain_geometry(&mut layer, p(0, 0), channel, 2);
    layer.commit(true);

    let pins = [
        Pin::input("vdd", cell(p(1, 0)), ValuesFunction::Static(true)),
        Pin::input("a", cell(p(0, 1)), a),
        Pin::input("b", cell(p(0, 2)), b),
        Pin::output("out", cell(p(1, 3)), expected),
    ];
    for pin in pins {
        layer.add_pin(pin).expect("failed to place pin");
    }
    layer
}
