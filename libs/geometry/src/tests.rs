use crate::prelude::*;

#[test]
fn side_offsets_are_inverse() {
    let pos = Pos::new(4, 7);
    for side in Side::ALL {
        assert_eq!(pos.neighbor(side).neighbor(!side), pos);
        assert_eq!(pos.side_to(pos.neighbor(side)), Some(side));
        assert_eq!(side.dir(), (!side).dir());
    }
}

#[test]
fn stored_sides_cover_each_link_once() {
    let stored: Vec<_> = Side::ALL.into_iter().filter(Side::is_stored).collect();
    assert_eq!(stored, vec![Side::Right, Side::Bottom]);
    assert_eq!(Dir::Horiz.forward(), Side::Right);
    assert_eq!(Dir::Vert.backward(), Side::Top);
}

#[test]
fn region_cells_are_row_major() {
    let region = Region::new(Pos::new(2, 3), Pos::new(0, 1));
    assert_eq!(region.width(), 2);
    assert_eq!(region.height(), 2);
    let cells: Vec<_> = region.cells().collect();
    assert_eq!(
        cells,
        vec![
            Pos::new(0, 1),
            Pos::new(0, 2),
            Pos::new(1, 1),
            Pos::new(1, 2)
        ]
    );
    assert!(region.is_within(3, 2));
    assert!(!region.translated(1, 0).is_within(3, 2));
    assert!(Region::with_size(Pos::new(1, 1), 0, 3).is_empty());
}

#[test]
fn positions_outside_grid() {
    assert!(Pos::new(0, 0).is_within(1, 1));
    assert!(!Pos::new(-1, 0).is_within(5, 5));
    assert!(!Pos::new(0, 5).is_within(5, 5));
}

#[test]
fn sides_map_by_side() {
    let sides = Sides::from_fn(|side| side.is_vertical());
    assert!(sides[Side::Top]);
    assert!(!sides[Side::Right]);
    let count = sides.iter().filter(|(_, v)| **v).count();
    assert_eq!(count, 2);
}
