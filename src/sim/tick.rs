//! Per-frame entry point
//!
//! The host collects input into a `TickInput`, then calls `Arcade::tick` once
//! per animation frame with the elapsed time.

use serde::{Deserialize, Serialize};

use super::flight::{self, FlightGame};
use super::platformer::{self, PlatformerGame};
use super::snapshot::Snapshot;
use super::state::GamePhase;
use crate::error::Result;
use crate::tuning::{PlatformerTuning, Variant};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Click / tap / Space (one-shot)
    pub primary: bool,
    /// Jump key (held)
    pub jump: bool,
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Crouch (held)
    pub crouch: bool,
    /// Retry the current level after a game over (one-shot)
    pub retry: bool,
}

impl TickInput {
    /// Forget edge-triggered actions once a frame has consumed them
    pub fn clear_one_shots(&mut self) {
        self.primary = false;
        self.retry = false;
    }
}

/// One of the supported games
#[derive(Debug, Clone)]
pub enum Arcade {
    Flight(FlightGame),
    Platformer(PlatformerGame),
}

impl Arcade {
    pub fn flight(variant: Variant, seed: u64) -> Result<Self> {
        FlightGame::new(variant.tuning(), seed).map(Arcade::Flight)
    }

    pub fn platformer(tuning: PlatformerTuning) -> Result<Self> {
        PlatformerGame::new(tuning).map(Arcade::Platformer)
    }

    /// Build a game from its name: a flight variant or `platformer`
    pub fn from_name(name: &str, seed: u64) -> Result<Self> {
        if name == "platformer" {
            return Self::platformer(PlatformerTuning::default());
        }
        Self::flight(Variant::parse(name)?, seed)
    }

    pub fn tick(&mut self, input: &TickInput, dt_ms: f32) {
        match self {
            Arcade::Flight(game) => flight::tick(game, input, dt_ms),
            Arcade::Platformer(game) => platformer::tick(game, input, dt_ms),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Arcade::Flight(game) => game.reset(),
            Arcade::Platformer(game) => game.reset(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        match self {
            Arcade::Flight(game) => game.phase,
            Arcade::Platformer(game) => game.phase,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        match self {
            Arcade::Flight(game) => game.snapshot(),
            Arcade::Platformer(game) => game.snapshot(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Arcade::Flight(_) => "flight",
            Arcade::Platformer(_) => "platformer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_clear_one_shots_keeps_held_keys() {
        let mut input = TickInput {
            primary: true,
            retry: true,
            left: true,
            jump: true,
            ..Default::default()
        };
        input.clear_one_shots();
        assert!(!input.primary);
        assert!(!input.retry);
        assert!(input.left);
        assert!(input.jump);
    }

    #[test]
    fn test_from_name() {
        assert!(matches!(Arcade::from_name("classic", 1), Ok(Arcade::Flight(_))));
        assert!(matches!(Arcade::from_name("brisk", 1), Ok(Arcade::Flight(_))));
        assert!(matches!(
            Arcade::from_name("platformer", 1),
            Ok(Arcade::Platformer(_))
        ));
        assert!(matches!(
            Arcade::from_name("pong", 1),
            Err(ConfigError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_dispatch_starts_and_resets() {
        let mut arcade = Arcade::from_name("brisk", 5).unwrap();
        assert_eq!(arcade.phase(), GamePhase::Waiting);
        arcade.tick(
            &TickInput {
                primary: true,
                ..Default::default()
            },
            16.67,
        );
        assert_eq!(arcade.phase(), GamePhase::Playing);
        arcade.reset();
        assert_eq!(arcade.phase(), GamePhase::Waiting);
    }
}
