#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for LoFi Wanderings.
//!
//! The world owns the current [`Map`], the player's [`Position`] and the set
//! of cells the player has visited. It only changes in response to
//! [`Command`] values passed to [`apply`], and reports every change as an
//! [`Event`].

pub mod layout;
pub mod map;

use tracing::debug;
use wanderings_core::{Command, Event, MockupLayout, Position, Step, Turn, WELCOME_BANNER};

pub use self::layout::{LayoutPlan, WallEdit};
pub use self::map::Map;

/// Represents the authoritative world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    map: Map,
    player: Position,
    visited: Vec<bool>,
}

impl World {
    /// Creates a world with an empty map and the player at the origin.
    ///
    /// Issue [`Command::StartNewGame`] to build a playable layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            map: Map::new(),
            player: Position::ORIGIN,
            visited: Vec::new(),
        }
    }

    fn start_new_game(&mut self, layout: MockupLayout, out_events: &mut Vec<Event>) {
        let plan = LayoutPlan::for_layout(layout);
        layout::generate(&mut self.map, &plan);
        out_events.push(Event::MapRebuilt {
            width: self.map.width(),
            height: self.map.height(),
        });

        let cells = self.map.width() as usize * self.map.height() as usize;
        self.visited = vec![false; cells];
        self.player = self.map.starting_point(0);
        self.mark_visited(self.player);
        out_events.push(Event::PlayerPlaced {
            position: self.player,
        });
    }

    fn move_player(&mut self, step: Step, out_events: &mut Vec<Event>) {
        let from = self.player;
        if !self.map.is_passable(&step.gate(&from)) {
            debug!(?step, ?from, "move blocked");
            out_events.push(Event::MoveBlocked {
                step,
                position: from,
            });
            return;
        }

        let to = step.destination(&from);
        self.player = to;
        self.mark_visited(to);
        out_events.push(Event::PlayerMoved { step, from, to });
    }

    fn turn_player(&mut self, turn: Turn, out_events: &mut Vec<Event>) {
        self.player = match turn {
            Turn::Left => self.player.left_facing(),
            Turn::Right => self.player.right_facing(),
        };
        out_events.push(Event::PlayerTurned {
            turn,
            position: self.player,
        });
    }

    fn mark_visited(&mut self, position: Position) {
        if let Some(index) = self.visited_index(position.x, position.y) {
            self.visited[index] = true;
        }
    }

    fn visited_index(&self, column: i32, row: i32) -> Option<usize> {
        if !self.map.contains(column, row) {
            return None;
        }
        let index = row as usize * self.map.width() as usize + column as usize;
        (index < self.visited.len()).then_some(index)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartNewGame { layout } => world.start_new_game(layout, out_events),
        Command::MovePlayer { step } => world.move_player(step, out_events),
        Command::TurnPlayer { turn } => world.turn_player(turn, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Map, World};
    use wanderings_core::Position;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the current map.
    #[must_use]
    pub fn map(world: &World) -> &Map {
        &world.map
    }

    /// Reports the player's current position.
    #[must_use]
    pub fn player_position(world: &World) -> Position {
        world.player
    }

    /// Reports whether the player has entered the addressed cell since the
    /// current game started. Out-of-range cells were never visited.
    #[must_use]
    pub fn is_visited(world: &World, column: i32, row: i32) -> bool {
        world
            .visited_index(column, row)
            .map(|index| world.visited[index])
            .unwrap_or(false)
    }
}
