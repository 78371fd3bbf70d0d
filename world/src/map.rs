//! Dense wall and passability grid shared by the world and the view renderer.

use wanderings_core::{Facing, Position, WallGrid, WallId};

/// Number of facing slots stored per cell.
const FACINGS_PER_CELL: usize = Facing::ALL.len();

/// Number of designated starting points a map can hold.
pub const STARTING_POINT_CAPACITY: usize = 1;

/// Rectangular dungeon map storing a wall id and a passability flag on each
/// of the four sides of every cell.
///
/// Both attributes live in flat vectors indexed by
/// `(row * width + column) * 4 + facing`. A wall always belongs to the edge
/// between two cells, so placing or removing one updates the neighbouring
/// cell's opposite side as well.
///
/// Every query and mutation is total: coordinates outside the grid read as
/// "no wall" and "impassable" and writes to them are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Map {
    width: u32,
    height: u32,
    walls: Vec<WallId>,
    passable: Vec<bool>,
    starting_points: Vec<Position>,
}

impl Map {
    /// Creates an empty 0×0 map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Wall id stored on the side `position.facing` of the addressed cell.
    #[must_use]
    pub fn wall_id_at(&self, position: &Position) -> WallId {
        self.slot(position)
            .and_then(|slot| self.walls.get(slot).copied())
            .unwrap_or(WallId::NONE)
    }

    /// Whether the side `position.facing` of the addressed cell can be crossed.
    #[must_use]
    pub fn is_passable(&self, position: &Position) -> bool {
        self.slot(position)
            .and_then(|slot| self.passable.get(slot).copied())
            .unwrap_or(false)
    }

    /// Designated starting point.
    ///
    /// Only the first slot is honoured; any other index, or a map without a
    /// designated start, yields [`Position::ORIGIN`].
    #[must_use]
    pub fn starting_point(&self, index: usize) -> Position {
        if index == 0 {
            if let Some(start) = self.starting_points.first() {
                return *start;
            }
        }
        Position::ORIGIN
    }

    /// Designates `position` as the map's starting point.
    pub fn set_starting_point(&mut self, position: Position) {
        self.starting_points.truncate(STARTING_POINT_CAPACITY - 1);
        self.starting_points.push(position);
    }

    /// Resizes the map and reinitialises every cell.
    pub fn rebuild(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.clear();
    }

    /// Reinitialises storage for the current dimensions.
    ///
    /// All wall ids become zero, the starting points are discarded, and every
    /// side is passable except the outward-facing sides of the border cells.
    /// Calling this on a never-sized map, or several times in a row, is
    /// harmless.
    pub fn clear(&mut self) {
        let cells = self.cell_count();
        self.walls.clear();
        self.walls.resize(cells * FACINGS_PER_CELL, WallId::NONE);
        self.passable.clear();
        self.passable.reserve(cells * FACINGS_PER_CELL);
        self.starting_points.clear();

        let last_column = self.width.saturating_sub(1);
        let last_row = self.height.saturating_sub(1);
        for row in 0..self.height {
            for column in 0..self.width {
                for facing in Facing::ALL {
                    let open = match facing {
                        Facing::North => row != 0,
                        Facing::East => column != last_column,
                        Facing::South => row != last_row,
                        Facing::West => column != 0,
                    };
                    self.passable.push(open);
                }
            }
        }
    }

    /// Places a wall on the addressed side and mirrors it onto the cell
    /// across that side.
    pub fn place_wall(&mut self, position: &Position, wall: WallId) {
        self.write_edge(position, wall, false);
    }

    /// Removes the wall on the addressed side and from the cell across it.
    pub fn remove_wall(&mut self, position: &Position) {
        self.write_edge(position, WallId::NONE, true);
    }

    /// Returns `true` when the coordinates address a cell of the map.
    #[must_use]
    pub fn contains(&self, column: i32, row: i32) -> bool {
        self.cell_index(column, row).is_some()
    }

    fn write_edge(&mut self, position: &Position, wall: WallId, passable: bool) {
        let Some(slot) = self.slot(position) else {
            return;
        };
        self.walls[slot] = wall;
        self.passable[slot] = passable;

        let across = position.ahead(1).reversed();
        if let Some(mirror) = self.slot(&across) {
            self.walls[mirror] = wall;
            self.passable[mirror] = passable;
        }
    }

    fn cell_count(&self) -> usize {
        let width = usize::try_from(self.width).unwrap_or(0);
        let height = usize::try_from(self.height).unwrap_or(0);
        width.checked_mul(height).unwrap_or(0)
    }

    fn cell_index(&self, column: i32, row: i32) -> Option<usize> {
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        if column >= self.width || row >= self.height {
            return None;
        }
        let index = usize::try_from(row)
            .ok()?
            .checked_mul(usize::try_from(self.width).ok()?)?
            .checked_add(usize::try_from(column).ok()?)?;
        (index < self.cell_count()).then_some(index)
    }

    fn slot(&self, position: &Position) -> Option<usize> {
        let cell = self.cell_index(position.x, position.y)?;
        Some(cell * FACINGS_PER_CELL + position.facing.index())
    }
}

impl WallGrid for Map {
    fn wall_id_at(&self, position: &Position) -> WallId {
        Map::wall_id_at(self, position)
    }
}
