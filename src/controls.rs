//! Held-key tracking.
//!
//! Terminals report presses and repeats far more reliably than releases, so
//! a key counts as held while its last event is recent.  The game only sees
//! the press/release edges of the held set.

use std::collections::HashMap;

use crossterm::event::KeyCode;

use crate::entities::{Command, Direction, Operation};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
pub const HOLD_WINDOW: u64 = 4;

/// Returns true if any of `keys` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

/// Continuous controls as seen this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl Controls {
    pub fn read(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Self {
        Controls {
            left: is_held(key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: is_held(key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            up: is_held(key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: is_held(key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
            fire: is_held(key_frame, &[KeyCode::Char(' ')], frame),
        }
    }

    /// Turn the difference between two frames into press/release commands.
    pub fn edges(&self, before: &Controls) -> Vec<Command> {
        let pairs = [
            (Direction::Left, self.left, before.left),
            (Direction::Right, self.right, before.right),
            (Direction::Up, self.up, before.up),
            (Direction::Down, self.down, before.down),
        ];
        let mut commands = Vec::new();
        for (direction, now, was) in pairs {
            if now && !was {
                commands.push(Command::Steer(direction, Operation::Start));
            } else if !now && was {
                commands.push(Command::Steer(direction, Operation::Stop));
            }
        }
        if self.fire && !before.fire {
            commands.push(Command::Fire(Operation::Start));
        } else if !self.fire && before.fire {
            commands.push(Command::Fire(Operation::Stop));
        }
        commands
    }

    /// Start commands for everything currently held.  A restarted plane is
    /// at rest, so keys held across the restart must be pressed again.
    pub fn rearm(&self) -> Vec<Command> {
        self.edges(&Controls::default())
    }
}
