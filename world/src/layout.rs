//! Compiled-in demo layouts.
//!
//! Every layout is expressed as a literal list of wall edits that a single
//! generator replays onto a freshly rebuilt [`Map`].

use wanderings_core::{Facing, MockupLayout, Position, WallId};

use crate::map::Map;

const MOCKUP_WIDTH: u32 = 10;
const MOCKUP_HEIGHT: u32 = 10;

/// Single wall edit replayed by the layout generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallEdit {
    /// Places a wall of the given type on the addressed side.
    Place(Position, WallId),
    /// Clears the addressed side.
    Remove(Position),
}

/// Complete description of a layout: size, start and wall edits in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Designated starting point.
    pub start: Position,
    /// Edits applied after the rebuild, in order.
    pub edits: Vec<WallEdit>,
}

impl LayoutPlan {
    /// Returns the plan for one of the built-in layouts.
    #[must_use]
    pub fn for_layout(layout: MockupLayout) -> Self {
        match layout {
            MockupLayout::BorderedRoom => bordered_room(),
            MockupLayout::Labyrinth => labyrinth(),
        }
    }
}

/// Rebuilds `map` and replays the plan onto it.
pub fn generate(map: &mut Map, plan: &LayoutPlan) {
    map.rebuild(plan.width, plan.height);
    map.set_starting_point(plan.start);

    for edit in &plan.edits {
        match *edit {
            WallEdit::Place(position, wall) => map.place_wall(&position, wall),
            WallEdit::Remove(position) => map.remove_wall(&position),
        }
    }
}

/// `(column, row, facing, wall)` placements of the labyrinth layout.
const LABYRINTH_WALLS: [(i32, i32, Facing, WallId); 29] = [
    (4, 9, Facing::North, WallId::BRICK),
    (6, 9, Facing::North, WallId::BRICK),
    (5, 8, Facing::East, WallId::BRICK),
    (5, 8, Facing::West, WallId::BRICK),
    (4, 8, Facing::North, WallId::BRICK),
    (6, 8, Facing::North, WallId::BRICK),
    (5, 7, Facing::North, WallId::BRICK),
    (5, 7, Facing::East, WallId::BRICK),
    (5, 7, Facing::West, WallId::BRICK),
    (4, 7, Facing::North, WallId::BRICK),
    (6, 7, Facing::North, WallId::BRICK),
    (5, 9, Facing::South, WallId::STONE),
    (4, 9, Facing::South, WallId::STONE),
    (3, 9, Facing::South, WallId::STONE),
    (6, 9, Facing::South, WallId::STONE),
    (7, 9, Facing::South, WallId::STONE),
    (2, 9, Facing::South, WallId::STONE),
    (8, 9, Facing::South, WallId::STONE),
    (4, 8, Facing::West, WallId::WOOD),
    (6, 8, Facing::East, WallId::WOOD),
    (4, 7, Facing::West, WallId::WOOD),
    (6, 7, Facing::East, WallId::WOOD),
    (3, 7, Facing::West, WallId::STONE),
    (3, 8, Facing::West, WallId::STONE),
    (3, 9, Facing::West, WallId::STONE),
    (3, 6, Facing::West, WallId::STONE),
    (3, 5, Facing::West, WallId::STONE),
    (3, 6, Facing::North, WallId::METAL),
    (4, 6, Facing::North, WallId::METAL),
];

fn labyrinth() -> LayoutPlan {
    let edits = LABYRINTH_WALLS
        .iter()
        .map(|&(x, y, facing, wall)| WallEdit::Place(Position::new(x, y, facing), wall))
        .collect();

    LayoutPlan {
        width: MOCKUP_WIDTH,
        height: MOCKUP_HEIGHT,
        start: Position::new(5, 9, Facing::North),
        edits,
    }
}

fn bordered_room() -> LayoutPlan {
    let width = MOCKUP_WIDTH as i32;
    let height = MOCKUP_HEIGHT as i32;
    let stone = |x, y, facing| WallEdit::Place(Position::new(x, y, facing), WallId::STONE);
    let mut edits = Vec::new();

    // outer ring, one cell in from the edge
    for row in 0..height {
        edits.push(stone(0, row, Facing::East));
        edits.push(stone(width - 1, row, Facing::West));
    }
    for column in 0..width {
        edits.push(stone(column, 0, Facing::South));
        edits.push(stone(column, height - 1, Facing::North));
    }

    // inner ring leaves a corridor one cell wide
    for column in 2..width - 2 {
        edits.push(stone(column, 1, Facing::South));
        edits.push(stone(column, height - 2, Facing::South));
    }
    for row in 2..height - 1 {
        edits.push(stone(1, row, Facing::East));
        edits.push(stone(width - 2, row, Facing::West));
    }

    edits.push(WallEdit::Remove(Position::new(
        2,
        height / 2,
        Facing::West,
    )));

    LayoutPlan {
        width: MOCKUP_WIDTH,
        height: MOCKUP_HEIGHT,
        start: Position::new(1, 1, Facing::East),
        edits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(layout: MockupLayout) -> Map {
        let mut map = Map::new();
        generate(&mut map, &LayoutPlan::for_layout(layout));
        map
    }

    #[test]
    fn bordered_room_starts_in_the_corridor_facing_east() {
        let map = built(MockupLayout::BorderedRoom);

        assert_eq!((map.width(), map.height()), (10, 10));
        assert_eq!(map.starting_point(0), Position::new(1, 1, Facing::East));
    }

    #[test]
    fn bordered_room_has_a_gap_half_way_down_the_west_inner_wall() {
        let map = built(MockupLayout::BorderedRoom);
        let gap = Position::new(2, 5, Facing::West);

        assert_eq!(map.wall_id_at(&gap), WallId::NONE);
        assert!(map.is_passable(&gap));
        assert!(map.is_passable(&Position::new(1, 5, Facing::East)));
        assert_eq!(
            map.wall_id_at(&Position::new(1, 4, Facing::East)),
            WallId::STONE,
            "neighbouring rows keep the inner wall"
        );
    }

    #[test]
    fn bordered_room_seals_the_outer_ring() {
        let map = built(MockupLayout::BorderedRoom);

        for row in 0..10 {
            assert_eq!(
                map.wall_id_at(&Position::new(1, row, Facing::West)),
                WallId::STONE,
                "row {row} should be sealed on the west"
            );
        }
        assert_eq!(
            map.wall_id_at(&Position::new(4, 8, Facing::South)),
            WallId::STONE
        );
    }

    #[test]
    fn labyrinth_places_every_literal_wall_with_its_type() {
        let map = built(MockupLayout::Labyrinth);

        for (x, y, facing, wall) in LABYRINTH_WALLS {
            let position = Position::new(x, y, facing);
            assert_eq!(map.wall_id_at(&position), wall, "wall at {position:?}");
            assert!(!map.is_passable(&position));
        }
        assert_eq!(map.starting_point(0), Position::new(5, 9, Facing::North));
    }

    #[test]
    fn labyrinth_start_looks_down_a_brick_corridor() {
        let map = built(MockupLayout::Labyrinth);
        let start = map.starting_point(0);

        assert!(map.is_passable(&start), "the corridor ahead must be open");
        assert_eq!(map.wall_id_at(&start.ahead(1).left_facing()), WallId::BRICK);
        assert_eq!(map.wall_id_at(&start.ahead(1).right_facing()), WallId::BRICK);
        assert_eq!(map.wall_id_at(&start.reversed()), WallId::STONE);
    }
}
