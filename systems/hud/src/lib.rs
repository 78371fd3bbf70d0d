#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Heads-up display system that narrates the player's most recent action.

use std::time::Duration;

use wanderings_core::{Event, Facing, Position, Step, Turn};

/// Time an action message stays on screen before reverting to the idle text.
pub const DEFAULT_MESSAGE_LIFETIME: Duration = Duration::from_secs(1);

/// Short status line describing what the player just did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionMessage {
    /// A new game was started.
    StartingOut,
    /// Nothing happened recently.
    Waiting,
    /// The player performed the step.
    Stepped(Step),
    /// The player turned.
    Turned(Turn),
    /// A step was refused by a wall or the map edge.
    Blocked,
}

impl ActionMessage {
    /// Text shown for the message.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            ActionMessage::StartingOut => "Starting Out...",
            ActionMessage::Waiting => "Waiting...",
            ActionMessage::Stepped(Step::Forward) => "Moved Forward...",
            ActionMessage::Stepped(Step::Back) => "Moved Back...",
            ActionMessage::Stepped(Step::StrafeLeft) => "Stepped Left...",
            ActionMessage::Stepped(Step::StrafeRight) => "Stepped Right...",
            ActionMessage::Turned(Turn::Left) => "Turned Left...",
            ActionMessage::Turned(Turn::Right) => "Turned Right...",
            ActionMessage::Blocked => "That way is blocked!",
        }
    }
}

/// Pure system tracking the HUD's action message and player readout.
#[derive(Debug)]
pub struct Hud {
    message: ActionMessage,
    message_age: Duration,
    message_lifetime: Duration,
    player: Position,
}

impl Hud {
    /// Creates a HUD whose action messages expire after `message_lifetime`.
    #[must_use]
    pub fn with_message_lifetime(message_lifetime: Duration) -> Self {
        Self {
            message: ActionMessage::StartingOut,
            message_age: Duration::ZERO,
            message_lifetime,
            player: Position::ORIGIN,
        }
    }

    /// Consumes world events and the elapsed frame time.
    pub fn handle(&mut self, events: &[Event], dt: Duration) {
        self.message_age = self.message_age.saturating_add(dt);

        for event in events {
            let message = match *event {
                Event::MapRebuilt { .. } => continue,
                Event::PlayerPlaced { position } => {
                    self.player = position;
                    ActionMessage::StartingOut
                }
                Event::PlayerMoved { step, to, .. } => {
                    self.player = to;
                    ActionMessage::Stepped(step)
                }
                Event::MoveBlocked { position, .. } => {
                    self.player = position;
                    ActionMessage::Blocked
                }
                Event::PlayerTurned { turn, position } => {
                    self.player = position;
                    ActionMessage::Turned(turn)
                }
            };
            self.message = message;
            self.message_age = Duration::ZERO;
        }

        if self.message_age >= self.message_lifetime {
            self.message = ActionMessage::Waiting;
        }
    }

    /// Message describing the latest action.
    #[must_use]
    pub fn action_message(&self) -> ActionMessage {
        self.message
    }

    /// Heading the player currently faces.
    #[must_use]
    pub fn facing(&self) -> Facing {
        self.player.facing
    }

    /// Compass sentence, e.g. `You are facing North.`.
    #[must_use]
    pub fn compass_message(&self) -> String {
        format!("You are facing {}.", self.player.facing.name())
    }

    /// Coordinate readout lines in display order.
    #[must_use]
    pub fn coordinate_lines(&self) -> [String; 2] {
        [
            format!("Player X: {:2}", self.player.x),
            format!("Player Z: {:2}", self.player.y),
        ]
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::with_message_lifetime(DEFAULT_MESSAGE_LIFETIME)
    }
}
