use proptest::prelude::*;
use wanderings_core::{Facing, Position, WallId};
use wanderings_world::Map;

fn rebuilt(width: u32, height: u32) -> Map {
    let mut map = Map::new();
    map.rebuild(width, height);
    map
}

fn is_border_side(map: &Map, column: i32, row: i32, facing: Facing) -> bool {
    let last_column = map.width() as i32 - 1;
    let last_row = map.height() as i32 - 1;
    match facing {
        Facing::North => row == 0,
        Facing::East => column == last_column,
        Facing::South => row == last_row,
        Facing::West => column == 0,
    }
}

#[test]
fn placing_a_wall_on_an_interior_edge_is_mirrored() {
    let mut map = rebuilt(10, 10);
    let origin = Position::new(0, 5, Facing::East);
    let mirrored = Position::new(1, 5, Facing::West);

    map.place_wall(&origin, WallId::BRICK);

    assert_eq!(map.wall_id_at(&origin), WallId::BRICK);
    assert_eq!(map.wall_id_at(&mirrored), WallId::BRICK);
    assert!(!map.is_passable(&origin));
    assert!(!map.is_passable(&mirrored));
}

#[test]
fn removing_a_wall_restores_both_sides() {
    let mut map = rebuilt(10, 10);
    let origin = Position::new(4, 4, Facing::North);
    let mirrored = Position::new(4, 3, Facing::South);
    map.place_wall(&origin, WallId::STONE);

    map.remove_wall(&origin);

    for side in [origin, mirrored] {
        assert_eq!(map.wall_id_at(&side), WallId::NONE, "{side:?}");
        assert!(map.is_passable(&side), "{side:?}");
    }
}

#[test]
fn removing_from_the_mirrored_side_also_clears_the_origin() {
    let mut map = rebuilt(6, 6);
    map.place_wall(&Position::new(2, 2, Facing::East), WallId::WOOD);

    map.remove_wall(&Position::new(3, 2, Facing::West));

    assert_eq!(
        map.wall_id_at(&Position::new(2, 2, Facing::East)),
        WallId::NONE
    );
}

#[test]
fn rebuild_blocks_exactly_the_border_sides() {
    let map = rebuilt(7, 5);

    for row in 0..5 {
        for column in 0..7 {
            for facing in Facing::ALL {
                let position = Position::new(column, row, facing);
                assert_eq!(
                    map.is_passable(&position),
                    !is_border_side(&map, column, row, facing),
                    "{position:?}"
                );
                assert_eq!(map.wall_id_at(&position), WallId::NONE);
            }
        }
    }
}

#[test]
fn single_cell_map_is_closed_on_every_side() {
    let map = rebuilt(1, 1);

    for facing in Facing::ALL {
        assert!(!map.is_passable(&Position::new(0, 0, facing)));
    }
}

#[test]
fn starting_point_honours_only_the_first_index() {
    let mut map = rebuilt(10, 10);
    map.set_starting_point(Position::new(3, 4, Facing::South));

    assert_eq!(map.starting_point(0), Position::new(3, 4, Facing::South));
    assert_eq!(map.starting_point(1), Position::new(0, 0, Facing::North));
    assert_eq!(map.starting_point(usize::MAX), Position::ORIGIN);
}

#[test]
fn rows_outside_the_grid_return_safe_defaults() {
    let map = rebuilt(4, 3);

    for position in [
        Position::new(0, 3, Facing::South),
        Position::new(0, -1, Facing::North),
        Position::new(2, i32::MAX, Facing::East),
        Position::new(3, i32::MIN, Facing::West),
    ] {
        assert_eq!(map.wall_id_at(&position), WallId::NONE, "{position:?}");
        assert!(!map.is_passable(&position), "{position:?}");
    }
}

/// Coordinates never inside a grid narrower than 16 cells.
fn outside_coordinate() -> impl Strategy<Value = i32> {
    prop_oneof![i32::MIN..0, 16i32..=i32::MAX]
}

proptest! {
    #[test]
    fn queries_outside_the_grid_return_safe_defaults(
        width in 1u32..16,
        height in 1u32..16,
        (x, y) in prop_oneof![
            (outside_coordinate(), any::<i32>()),
            (0i32..16, outside_coordinate()),
        ],
        facing in 0i32..4,
    ) {
        let map = rebuilt(width, height);
        let position = Position::new(x, y, Facing::from_index(facing));

        prop_assert!(!map.contains(x, y));
        prop_assert_eq!(map.wall_id_at(&position), WallId::NONE);
        prop_assert!(!map.is_passable(&position));
    }

    #[test]
    fn place_then_remove_round_trips_to_a_fresh_map(
        width in 1u32..12,
        height in 1u32..12,
        x in 0i32..12,
        y in 0i32..12,
        facing in 0i32..4,
        wall in 1u16..5,
    ) {
        let fresh = rebuilt(width, height);
        let mut map = fresh.clone();
        let position = Position::new(x, y, Facing::from_index(facing));
        let inside = map.contains(x, y);

        map.place_wall(&position, WallId::new(wall));
        if inside {
            prop_assert_eq!(map.wall_id_at(&position), WallId::new(wall));
            prop_assert!(!map.is_passable(&position));

            let across = position.ahead(1).reversed();
            if map.contains(across.x, across.y) {
                prop_assert_eq!(map.wall_id_at(&across), WallId::new(wall));
                prop_assert!(!map.is_passable(&across));
            }
        }

        map.remove_wall(&position);
        if inside {
            prop_assert_eq!(map.wall_id_at(&position), WallId::NONE);
            prop_assert!(map.is_passable(&position));
        } else {
            prop_assert_eq!(map, fresh);
        }
    }
}
