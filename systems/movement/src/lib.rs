#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that turns held and pressed controls into player commands.

use std::time::Duration;

use wanderings_core::{Command, Event, Step, Turn};

/// Delay between repeated steps while a motion control stays held.
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(200);

/// Control snapshot gathered by adapters for a single frame.
///
/// Motion fields report whether the control is currently held; turn fields
/// report a press that happened during this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionInput {
    /// Forward control held.
    pub forward: bool,
    /// Backward control held.
    pub back: bool,
    /// Strafe-left control held.
    pub strafe_left: bool,
    /// Strafe-right control held.
    pub strafe_right: bool,
    /// Turn-left control pressed this frame.
    pub turn_left: bool,
    /// Turn-right control pressed this frame.
    pub turn_right: bool,
}

impl MotionInput {
    /// Held motion with the highest priority, if any.
    #[must_use]
    pub fn held_step(&self) -> Option<Step> {
        [
            (self.forward, Step::Forward),
            (self.back, Step::Back),
            (self.strafe_left, Step::StrafeLeft),
            (self.strafe_right, Step::StrafeRight),
        ]
        .into_iter()
        .find_map(|(held, step)| held.then_some(step))
    }
}

/// Pure system that emits movement and turn commands.
///
/// A motion control fires as soon as it is pressed and then repeats every
/// `repeat_interval` while held. When several motion controls are held at
/// once, a single step is issued per repeat in the order forward, back,
/// strafe left, strafe right.
#[derive(Debug)]
pub struct Movement {
    repeat_interval: Duration,
    held_for: Option<Duration>,
}

impl Movement {
    /// Creates a movement system with a custom repeat interval.
    #[must_use]
    pub fn with_repeat_interval(repeat_interval: Duration) -> Self {
        Self {
            repeat_interval,
            held_for: None,
        }
    }

    /// Consumes world events, elapsed time and the frame's controls, pushing
    /// the resulting commands into `out`.
    pub fn handle(
        &mut self,
        events: &[Event],
        dt: Duration,
        input: MotionInput,
        out: &mut Vec<Command>,
    ) {
        if events
            .iter()
            .any(|event| matches!(event, Event::PlayerPlaced { .. }))
        {
            self.held_for = None;
        }

        if input.turn_left {
            out.push(Command::TurnPlayer { turn: Turn::Left });
        }
        if input.turn_right {
            out.push(Command::TurnPlayer { turn: Turn::Right });
        }

        let Some(step) = input.held_step() else {
            self.held_for = None;
            return;
        };

        let fire = match self.held_for {
            None => {
                self.held_for = Some(Duration::ZERO);
                true
            }
            Some(elapsed) => {
                let elapsed = elapsed.saturating_add(dt);
                if elapsed >= self.repeat_interval {
                    self.held_for = Some(elapsed.saturating_sub(self.repeat_interval));
                    true
                } else {
                    self.held_for = Some(elapsed);
                    false
                }
            }
        };

        if fire {
            out.push(Command::MovePlayer { step });
        }
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::with_repeat_interval(DEFAULT_REPEAT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_step_prefers_forward_then_back_then_strafes() {
        let input = MotionInput {
            back: true,
            strafe_right: true,
            ..MotionInput::default()
        };
        assert_eq!(input.held_step(), Some(Step::Back));

        let input = MotionInput {
            strafe_left: true,
            strafe_right: true,
            ..MotionInput::default()
        };
        assert_eq!(input.held_step(), Some(Step::StrafeLeft));
        assert_eq!(MotionInput::default().held_step(), None);
    }
}
