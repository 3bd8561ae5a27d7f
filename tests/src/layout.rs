use test_log::test;

use geometry::prelude::*;
use layer::{Base, Layer, LinkKind, Silicon, SiliconLink};

use crate::shared::{chain_geometry, p};

fn assert_links_symmetric(layer: &Layer) {
    for pos in layer.positions() {
        for side in Side::ALL {
            let a = layer.link(pos, side);
            let b = layer.link(pos.neighbor(side), !side);
            assert_eq!(a.silicon, b.silicon.invert(), "silicon link {} {:?}", pos, side);
            assert_eq!(a.metal, b.metal, "metal link {} {:?}", pos, side);
        }
    }
}

/// A scripted editing session touching every edit operation.
fn edit_session(layer: &mut Layer) {
    chain_geometry(layer, p(0, 0), Base::N, 2);
    assert!(layer.add_metal(p(2, 0)));
    assert!(layer.add_metal(p(2, 1)));
    assert!(layer.add_link(p(2, 0), p(2, 1), LinkKind::Metal));
    assert!(layer.set_name(p(2, 1), Some("tap".into())));
    assert!(layer.set_lock_state(p(2, 0), true));
    assert!(!layer.remove_metal(p(2, 0)));
    assert!(layer.remove_via(p(0, 2)));
    assert!(layer.move_cells(p(2, 1), p(3, 2), 2, 0));
}

#[test]
fn links_stay_symmetric_through_edits() {
    let mut layer = Layer::new(6, 4);
    edit_session(&mut layer);
    assert_links_symmetric(&layer);
    assert!(layer.validate().is_empty());

    // Cut the second driver; its gate decays and the chain shortens.
    assert!(layer.remove_link(p(0, 2), p(1, 2), LinkKind::Silicon));
    assert_eq!(layer.read(p(1, 2)).silicon(), Silicon::N);
    assert_eq!(layer.read(p(1, 1)).silicon(), Silicon::NHGate);
    assert_links_symmetric(&layer);
    assert!(layer.validate().is_empty());
}

#[test]
fn reject_restores_the_committed_state() {
    let mut layer = Layer::new(6, 4);
    chain_geometry(&mut layer, p(0, 0), Base::P, 1);
    layer.commit(true);
    let committed = layer.export_content();

    assert!(layer.remove_silicon(p(1, 0)));
    assert!(layer.add_metal(p(3, 3)));
    assert!(layer.is_dirty());
    layer.reject();
    assert!(!layer.is_dirty());
    assert_eq!(layer.export_content(), committed);
}

#[test]
fn undo_and_redo_round_trip() {
    let mut layer = Layer::new(6, 4);
    let empty = layer.export_content();
    edit_session(&mut layer);
    layer.commit(true);
    let edited = layer.export_content();

    layer.undo();
    assert_eq!(layer.export_content(), empty);
    assert!(layer.matrix().can_redo());
    layer.redo();
    assert_eq!(layer.export_content(), edited);
    assert!(!layer.matrix().can_redo());
}

#[test]
fn divergent_commit_drops_redo() {
    let mut layer = Layer::new(3, 3);
    assert!(layer.add_metal(p(0, 0)));
    layer.commit(true);
    assert!(layer.add_metal(p(0, 1)));
    layer.commit(true);
    layer.undo();
    assert!(layer.add_metal(p(2, 2)));
    layer.commit(true);

    let before = layer.export_content();
    layer.redo();
    assert_eq!(layer.export_content(), before);
    assert!(!layer.read(p(0, 1)).has_metal());
}

#[test]
fn gate_forms_and_decays() {
    let mut layer = Layer::new(3, 3);
    for row in 0..3 {
        assert!(layer.add_silicon(p(row, 1), Base::P));
    }
    assert!(layer.add_link(p(0, 1), p(1, 1), LinkKind::Silicon));
    assert!(layer.add_link(p(1, 1), p(2, 1), LinkKind::Silicon));
    assert!(layer.add_silicon(p(1, 0), Base::N));
    assert!(layer.add_silicon(p(1, 2), Base::N));

    // A horizontal driving link across a vertical channel.
    assert!(layer.add_link(p(1, 0), p(1, 1), LinkKind::Silicon));
    assert_eq!(layer.read(p(1, 1)).silicon(), Silicon::PVGate);
    assert_eq!(layer.link(p(1, 0), Side::Right).silicon, SiliconLink::Master);
    assert_eq!(layer.link(p(1, 1), Side::Left).silicon, SiliconLink::Slave);
    // A second driver from the other side.
    assert!(layer.add_link(p(1, 2), p(1, 1), LinkKind::Silicon));
    assert_eq!(layer.link(p(1, 1), Side::Right).silicon, SiliconLink::Slave);
    layer.commit(true);

    // Cutting the channel invalidates the gate; both driving links go with it.
    assert!(layer.remove_link(p(1, 1), p(2, 1), LinkKind::Silicon));
    assert_eq!(layer.read(p(1, 1)).silicon(), Silicon::P);
    assert_eq!(layer.link(p(1, 1), Side::Left).silicon, SiliconLink::None);
    assert_eq!(layer.link(p(1, 1), Side::Right).silicon, SiliconLink::None);
    assert_links_symmetric(&layer);
    assert!(layer.validate().is_empty());
}

#[test]
fn moving_a_transistor_keeps_its_gate() {
    let mut layer = Layer::new(6, 5);
    chain_geometry(&mut layer, p(0, 0), Base::N, 1);
    layer.commit(true);

    assert!(layer.move_cells(p(0, 0), p(2, 3), 3, 3));
    assert_eq!(layer.read(p(4, 4)).silicon(), Silicon::NHGate);
    assert_eq!(layer.read(p(1, 1)).silicon(), Silicon::None);
    assert!(layer.is_valid_gate(p(4, 4)));
    assert_links_symmetric(&layer);
    assert!(layer.validate().is_empty());
}
