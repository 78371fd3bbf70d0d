#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wanderings dungeon crawler.
//!
//! This crate defines the grid vocabulary and the message surface that
//! connects adapters, the authoritative world, and pure systems. Adapters
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for systems to react to deterministically.
//!
//! [`Position`] carries the facing algebra used by both the world (movement
//! and wall mirroring) and the first-person view renderer (projection of
//! neighbouring cells). Every derivation is pure and returns a new value.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to LoFi Wanderings.";

/// Number of depth ranks the first-person view can display.
pub const VISIBLE_DEPTH: u32 = 3;

/// Cardinal heading shared by the player and by wall sides.
///
/// The discriminants double as the facing slot inside a grid cell, so a
/// value always lies in `0..4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Facing {
    /// Toward decreasing row indices.
    North = 0,
    /// Toward increasing column indices.
    East = 1,
    /// Toward increasing row indices.
    South = 2,
    /// Toward decreasing column indices.
    West = 3,
}

impl Facing {
    /// All facings in slot order.
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Resolves a facing from any integer, wrapping modulo four.
    #[must_use]
    pub const fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Facing::North,
            1 => Facing::East,
            2 => Facing::South,
            _ => Facing::West,
        }
    }

    /// Slot index of the facing in `0..4`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Facing a quarter turn counter-clockwise, `(facing + 3) mod 4`.
    #[must_use]
    pub const fn left(self) -> Self {
        Self::from_index(self as i32 + 3)
    }

    /// Facing a quarter turn clockwise, `(facing + 1) mod 4`.
    #[must_use]
    pub const fn right(self) -> Self {
        Self::from_index(self as i32 + 1)
    }

    /// Facing pointing the other way, `(facing + 2) mod 4`.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_index(self as i32 + 2)
    }

    /// Human readable compass name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Facing::North => "North",
            Facing::East => "East",
            Facing::South => "South",
            Facing::West => "West",
        }
    }

    /// Column and row delta of a single step taken in this facing.
    const fn unit_delta(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::East => (1, 0),
            Facing::South => (0, 1),
            Facing::West => (-1, 0),
        }
    }
}

/// Whether a bounds check accepts coordinates lying on the boundary itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Inclusivity {
    /// Boundary coordinates are inside (`>=` / `<=`).
    Inclusive,
    /// Boundary coordinates are outside (`>` / `<`).
    Exclusive,
}

/// Grid coordinate paired with a cardinal heading.
///
/// Coordinates are signed so that derived neighbours of edge cells can step
/// outside the grid; lookups against such positions fall back to safe
/// defaults instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Zero-based column index.
    pub x: i32,
    /// Zero-based row index.
    pub y: i32,
    /// Heading of the position.
    pub facing: Facing,
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Position {
    /// Top-left cell facing north, used wherever a safe default is required.
    pub const ORIGIN: Position = Position::new(0, 0, Facing::North);

    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32, facing: Facing) -> Self {
        Self { x, y, facing }
    }

    /// Same coordinates with the facing turned a quarter to the left.
    #[must_use]
    pub const fn left_facing(&self) -> Self {
        Self::new(self.x, self.y, self.facing.left())
    }

    /// Same coordinates with the facing turned a quarter to the right.
    #[must_use]
    pub const fn right_facing(&self) -> Self {
        Self::new(self.x, self.y, self.facing.right())
    }

    /// Same coordinates with the facing reversed.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.x, self.y, self.facing.opposite())
    }

    /// Position `steps` cells ahead, facing unchanged.
    #[must_use]
    pub const fn ahead(&self, steps: i32) -> Self {
        self.shifted(self.facing, steps)
    }

    /// Position `steps` cells behind, facing unchanged.
    #[must_use]
    pub const fn behind(&self, steps: i32) -> Self {
        self.shifted(self.facing, steps.wrapping_neg())
    }

    /// Position `steps` cells to the left, facing unchanged.
    #[must_use]
    pub const fn left_of(&self, steps: i32) -> Self {
        self.shifted(self.facing.left(), steps)
    }

    /// Position `steps` cells to the right, facing unchanged.
    #[must_use]
    pub const fn right_of(&self, steps: i32) -> Self {
        self.shifted(self.facing.right(), steps)
    }

    /// Overwrites this position with the contents of `source`.
    pub fn copy_from(&mut self, source: &Position) {
        *self = *source;
    }

    /// Checks the coordinates against a rectangle.
    #[must_use]
    pub const fn in_bounds(
        &self,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        inclusivity: Inclusivity,
    ) -> bool {
        match inclusivity {
            Inclusivity::Inclusive => {
                self.x >= left && self.y >= top && self.x <= right && self.y <= bottom
            }
            Inclusivity::Exclusive => {
                self.x > left && self.y > top && self.x < right && self.y < bottom
            }
        }
    }

    const fn shifted(&self, direction: Facing, steps: i32) -> Self {
        let (dx, dy) = direction.unit_delta();
        Self::new(
            self.x.wrapping_add(dx.wrapping_mul(steps)),
            self.y.wrapping_add(dy.wrapping_mul(steps)),
            self.facing,
        )
    }
}

/// Identifier of a wall type stored on a cell side.
///
/// Zero means "no wall"; the art catalog resolves the remaining ids
/// starting from one.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WallId(u16);

impl WallId {
    /// Absence of a wall.
    pub const NONE: WallId = WallId(0);
    /// Brick wall art.
    pub const BRICK: WallId = WallId(1);
    /// Stone wall art.
    pub const STONE: WallId = WallId(2);
    /// Wooden wall art.
    pub const WOOD: WallId = WallId(3);
    /// Metal wall art.
    pub const METAL: WallId = WallId(4);

    /// Creates a new wall identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Returns `true` when the identifier denotes an open side.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }
}

/// Read-only wall lookup consumed by renderers.
///
/// Implementations must be total: coordinates outside the grid answer
/// [`WallId::NONE`].
pub trait WallGrid {
    /// Wall id stored on the side `position.facing` of the addressed cell.
    fn wall_id_at(&self, position: &Position) -> WallId;
}

/// Which of a wall set's directional sprites is required.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewDirection {
    /// Wall seen head-on across the viewed cell.
    Front,
    /// Wall running along the left side of the viewed cell.
    Left,
    /// Wall running along the right side of the viewed cell.
    Right,
}

/// Distance, in cells, between the viewer and a projected cell.
///
/// Rank zero is the player's own cell. Values are not clamped; consumers
/// treat ranks at or beyond [`VISIBLE_DEPTH`] as invisible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepthRank(u32);

impl DepthRank {
    /// The player's own cell.
    pub const NEAR: DepthRank = DepthRank(0);
    /// One cell ahead.
    pub const MIDDLE: DepthRank = DepthRank(1);
    /// Two cells ahead, the farthest visible rank.
    pub const FAR: DepthRank = DepthRank(2);
    /// Visible ranks in back-to-front compositing order.
    pub const FAR_TO_NEAR: [DepthRank; VISIBLE_DEPTH as usize] =
        [DepthRank::FAR, DepthRank::MIDDLE, DepthRank::NEAR];

    /// Creates a depth rank.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Numeric rank.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Rank as a step count for [`Position::ahead`].
    #[must_use]
    pub const fn steps(&self) -> i32 {
        if self.0 > i32::MAX as u32 {
            i32::MAX
        } else {
            self.0 as i32
        }
    }
}

/// Hard-coded map layouts available when starting a new game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MockupLayout {
    /// Stone room with an inner corridor ring and a gap on the west side.
    #[default]
    BorderedRoom,
    /// Small labyrinth mixing every wall type.
    Labyrinth,
}

/// Single-cell player motion relative to the current facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// One cell ahead.
    Forward,
    /// One cell behind.
    Back,
    /// One cell to the left without turning.
    StrafeLeft,
    /// One cell to the right without turning.
    StrafeRight,
}

impl Step {
    /// Side of the current cell that must be passable for the step.
    #[must_use]
    pub const fn gate(self, position: &Position) -> Position {
        match self {
            Step::Forward => *position,
            Step::Back => position.reversed(),
            Step::StrafeLeft => position.left_facing(),
            Step::StrafeRight => position.right_facing(),
        }
    }

    /// Position reached once the step succeeds.
    #[must_use]
    pub const fn destination(self, position: &Position) -> Position {
        match self {
            Step::Forward => position.ahead(1),
            Step::Back => position.behind(1),
            Step::StrafeLeft => position.left_of(1),
            Step::StrafeRight => position.right_of(1),
        }
    }
}

/// Quarter turn applied in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Counter-clockwise quarter turn.
    Left,
    /// Clockwise quarter turn.
    Right,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discards the current map and builds the requested layout.
    StartNewGame {
        /// Layout to construct.
        layout: MockupLayout,
    },
    /// Requests that the player take a single step.
    MovePlayer {
        /// Motion relative to the current facing.
        step: Step,
    },
    /// Requests that the player turn in place.
    TurnPlayer {
        /// Direction of the quarter turn.
        turn: Turn,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the map storage was rebuilt.
    MapRebuilt {
        /// Number of columns in the new map.
        width: u32,
        /// Number of rows in the new map.
        height: u32,
    },
    /// Announces that the player was placed at a starting point.
    PlayerPlaced {
        /// Position assigned to the player.
        position: Position,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Motion that was performed.
        step: Step,
        /// Position before the move.
        from: Position,
        /// Position after the move.
        to: Position,
    },
    /// Reports that a step was refused because the side is impassable.
    MoveBlocked {
        /// Motion that was attempted.
        step: Step,
        /// Position of the player, unchanged.
        position: Position,
    },
    /// Confirms that the player turned in place.
    PlayerTurned {
        /// Direction of the quarter turn.
        turn: Turn,
        /// Position after turning.
        position: Position,
    },
}
