//! Sound output.
//!
//! The terminal bell is the only speaker a terminal game can count on.  When
//! the output is not an interactive terminal, or sound is switched off, the
//! game runs muted.

use std::io::{IsTerminal, Write};

use crate::entities::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Explosion,
}

impl SoundEffect {
    /// The sound, if any, that goes with a game event.
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::Explosion { .. } => Some(SoundEffect::Explosion),
            _ => None,
        }
    }
}

pub struct Audio {
    enabled: bool,
}

impl Audio {
    /// Probe stdout; fall back to muted if it is not a terminal.
    pub fn detect(muted: bool) -> Self {
        if muted {
            log::info!("audio muted by configuration");
            return Self::muted();
        }
        if !std::io::stdout().is_terminal() {
            log::warn!("no terminal attached to stdout - audio disabled");
            return Self::muted();
        }
        Audio { enabled: true }
    }

    pub fn muted() -> Self {
        Audio { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Play at most one bell per frame, however many explosions happened.
    pub fn play_events<W: Write>(&self, out: &mut W, events: &[GameEvent]) -> std::io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if events.iter().any(|e| SoundEffect::for_event(e).is_some()) {
            out.write_all(b"\x07")?;
        }
        Ok(())
    }
}
