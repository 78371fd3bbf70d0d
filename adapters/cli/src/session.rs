//! Game session wiring the world, the systems and the software renderer.

use std::time::Duration;

use wanderings_core::{Command, Event, MockupLayout};
use wanderings_rendering::{
    FrameInput, HudPresentation, MiniMap, Scene, ViewConfig, ViewRenderer, WallArtCatalog,
};
use wanderings_system_hud::Hud;
use wanderings_system_movement::{MotionInput, Movement};
use wanderings_world::{self as world, query, World};

/// Owns the authoritative world together with the systems driving it.
#[derive(Debug)]
pub(crate) struct GameSession {
    world: World,
    movement: Movement,
    hud: Hud,
    catalog: WallArtCatalog,
    view: ViewConfig,
    minimap: MiniMap,
    pending_events: Vec<Event>,
}

impl GameSession {
    /// Starts a new game on the provided layout.
    pub(crate) fn new(layout: MockupLayout, catalog: WallArtCatalog, view: ViewConfig) -> Self {
        let mut session = Self {
            world: World::new(),
            movement: Movement::default(),
            hud: Hud::default(),
            catalog,
            view,
            minimap: MiniMap::default(),
            pending_events: Vec::new(),
        };
        session.execute(vec![Command::StartNewGame { layout }], Duration::ZERO);
        session
    }

    /// Welcome banner of the running world.
    pub(crate) fn banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }

    /// Advances the systems by one frame of input.
    pub(crate) fn advance(&mut self, dt: Duration, input: FrameInput) {
        let mut commands = Vec::new();
        self.movement
            .handle(&self.pending_events, dt, motion_input(input), &mut commands);
        self.execute(commands, dt);
    }

    /// Creates a scene sized for the session's view and minimap.
    pub(crate) fn blank_scene(&self) -> Scene {
        Scene::new(self.view, &self.minimap)
    }

    /// Repaints every part of `scene` from the current world state.
    pub(crate) fn populate_scene(&mut self, scene: &mut Scene) {
        let map = query::map(&self.world);
        let player = query::player_position(&self.world);

        if scene.view.width() != self.view.width || scene.view.height() != self.view.height {
            scene.view = self.view.surface();
        }
        ViewRenderer::new(&self.catalog, self.view).render_frame(&mut scene.view, map, &player);

        let world = &self.world;
        self.minimap
            .update(map.width(), map.height(), &player, |column, row| {
                query::is_visited(world, column, row)
            });
        scene.minimap.clone_from(self.minimap.surface());

        scene.hud = HudPresentation {
            action_message: self.hud.action_message().text().to_owned(),
            compass_message: self.hud.compass_message(),
            facing: self.hud.facing(),
            coordinate_lines: self.hud.coordinate_lines(),
        };
    }

    fn execute(&mut self, commands: Vec<Command>, dt: Duration) {
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        self.hud.handle(&events, dt);
        self.pending_events = events;
    }
}

fn motion_input(input: FrameInput) -> MotionInput {
    MotionInput {
        forward: input.forward,
        back: input.back,
        strafe_left: input.strafe_left,
        strafe_right: input.strafe_right,
        turn_left: input.turn_left,
        turn_right: input.turn_right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wanderings_core::{Facing, Position};

    const FRAME: Duration = Duration::from_millis(20);

    fn session(layout: MockupLayout) -> GameSession {
        GameSession::new(layout, WallArtCatalog::default(), ViewConfig::default())
    }

    #[test]
    fn new_session_places_the_player_and_greets() {
        let mut session = session(MockupLayout::BorderedRoom);
        let mut scene = session.blank_scene();

        session.populate_scene(&mut scene);

        assert_eq!(session.banner(), "Welcome to LoFi Wanderings.");
        assert_eq!(scene.hud.action_message, "Starting Out...");
        assert_eq!(scene.hud.compass_message, "You are facing East.");
        assert_eq!(scene.hud.facing, Facing::East);
        assert_eq!(
            scene.minimap.pixel(14, 14),
            Some([255, 255, 0, 255]),
            "the start cell is drawn as the player"
        );
    }

    #[test]
    fn held_forward_walks_and_updates_the_hud() {
        let mut session = session(MockupLayout::BorderedRoom);
        let input = FrameInput {
            forward: true,
            ..FrameInput::default()
        };

        session.advance(FRAME, input);
        let mut scene = session.blank_scene();
        session.populate_scene(&mut scene);

        assert_eq!(
            query::player_position(&session.world),
            Position::new(2, 1, Facing::East)
        );
        assert_eq!(scene.hud.action_message, "Moved Forward...");
        assert_eq!(scene.hud.coordinate_lines[0], "Player X:  2");
    }

    #[test]
    fn turning_rotates_the_compass() {
        let mut session = session(MockupLayout::Labyrinth);
        let input = FrameInput {
            turn_left: true,
            ..FrameInput::default()
        };

        session.advance(FRAME, input);
        let mut scene = session.blank_scene();
        session.populate_scene(&mut scene);

        assert_eq!(scene.hud.facing, Facing::West);
        assert_eq!(scene.hud.action_message, "Turned Left...");
    }

    #[test]
    fn populate_resizes_a_mismatched_view() {
        let mut session = session(MockupLayout::BorderedRoom);
        let mut scene = session.blank_scene();
        scene.view = wanderings_rendering::Surface::new(1, 1);

        session.populate_scene(&mut scene);

        assert_eq!((scene.view.width(), scene.view.height()), (300, 400));
    }
}
