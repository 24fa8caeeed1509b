//! Data-driven game balance
//!
//! Every constant the simulation reads lives here so hosts can load their own
//! numbers from JSON. Defaults reproduce the shipped games.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::sim::levels::LEVEL_COUNT;

/// Playfield extent in world pixels, origin top-left, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<()> {
        // `!(x > 0)` also rejects NaN
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(ConfigError::InvalidWorld {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn fits(what: &'static str, size: f32, limit: f32) -> Result<()> {
    if size <= limit {
        Ok(())
    } else {
        Err(ConfigError::DoesNotFit { what, size, limit })
    }
}

/// Flight game presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Tall portrait board with the softened physics
    #[default]
    Classic,
    /// Same board with the earlier, stiffer gravity and flap
    Brisk,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Brisk => "brisk",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "default" => Some(Variant::Classic),
            "brisk" | "fast" => Some(Variant::Brisk),
            _ => None,
        }
    }

    /// Parse or report the unknown name
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| ConfigError::UnknownVariant(s.to_string()))
    }

    pub fn tuning(&self) -> FlightTuning {
        match self {
            Variant::Classic => FlightTuning::default(),
            Variant::Brisk => FlightTuning {
                gravity: 0.25,
                flap_force: -6.0,
                ..FlightTuning::default()
            },
        }
    }
}

/// Flight game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub world: World,

    // === Bird ===
    pub bird_width: f32,
    pub bird_height: f32,
    /// Start position as a fraction of the world size
    pub bird_start: (f32, f32),
    /// Downward acceleration per reference frame
    pub gravity: f32,
    /// Vertical velocity set by a flap (negative is up)
    pub flap_force: f32,
    pub max_fall_speed: f32,
    /// Cosmetic tilt per unit of vertical velocity
    pub rotation_gain: f32,
    pub max_tilt: f32,

    // === Pipes ===
    /// Scroll distance per reference frame
    pub pipe_speed: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    /// Minimum distance between the gap and either world edge
    pub gap_margin: f32,

    // === Spawning ===
    /// Interval before the first pipe, and the base for later ones
    pub spawn_interval_ms: f32,
    /// Later intervals are `spawn_interval_ms * U(spawn_scale_min, spawn_scale_max)`
    pub spawn_scale_min: f32,
    pub spawn_scale_max: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            world: World::new(792.0, 1828.0),

            bird_width: 40.0,
            bird_height: 30.0,
            bird_start: (0.25, 0.5),
            gravity: 0.175,
            flap_force: -4.2,
            max_fall_speed: 15.0,
            rotation_gain: 0.1,
            max_tilt: std::f32::consts::FRAC_PI_4,

            pipe_speed: 1.4,
            pipe_width: 60.0,
            pipe_gap: 250.0,
            gap_margin: 100.0,

            spawn_interval_ms: 2000.0,
            spawn_scale_min: 0.1,
            spawn_scale_max: 0.7,
        }
    }
}

impl FlightTuning {
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        positive("bird_width", self.bird_width)?;
        positive("bird_height", self.bird_height)?;
        fits("bird_width", self.bird_width, self.world.width)?;
        fits("bird_height", self.bird_height, self.world.height)?;
        positive("max_fall_speed", self.max_fall_speed)?;
        positive("pipe_speed", self.pipe_speed)?;
        positive("pipe_width", self.pipe_width)?;
        positive("pipe_gap", self.pipe_gap)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;

        if !(self.spawn_scale_min > 0.0) || !(self.spawn_scale_max >= self.spawn_scale_min) {
            return Err(ConfigError::InvalidSpawnRange {
                min: self.spawn_scale_min,
                max: self.spawn_scale_max,
            });
        }

        if !(self.gap_margin >= 0.0) || self.gap_range() < 0.0 {
            return Err(ConfigError::GapDoesNotFit {
                gap: self.pipe_gap,
                margin: self.gap_margin,
                height: self.world.height,
            });
        }
        Ok(())
    }

    /// Height of the band a gap's top edge may be sampled from
    pub fn gap_range(&self) -> f32 {
        self.world.height - self.pipe_gap - 2.0 * self.gap_margin
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }
}

/// Platformer tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerTuning {
    pub world: World,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub crouch_height: f32,
    /// Spawn point (top-left)
    pub spawn: (f32, f32),
    pub run_speed: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub max_fall_speed: f32,
    /// Vertical velocity after stomping an enemy
    pub stomp_bounce: f32,

    // === Enemies ===
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_speed: f32,
    pub enemy_gravity: f32,

    // === Levels ===
    pub max_level: u32,
}

impl Default for PlatformerTuning {
    fn default() -> Self {
        Self {
            world: World::new(800.0, 600.0),

            player_width: 30.0,
            player_height: 60.0,
            crouch_height: 30.0,
            spawn: (100.0, 500.0),
            run_speed: 3.5,
            gravity: 0.8,
            jump_force: -15.0,
            max_fall_speed: 20.0,
            stomp_bounce: -10.0,

            enemy_width: 30.0,
            enemy_height: 30.0,
            enemy_speed: 1.4,
            enemy_gravity: 0.8,

            max_level: LEVEL_COUNT,
        }
    }
}

impl PlatformerTuning {
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("crouch_height", self.crouch_height)?;
        fits("crouch_height", self.crouch_height, self.player_height)?;
        fits("player_width", self.player_width, self.world.width)?;
        fits("player_height", self.player_height, self.world.height)?;
        let (x, y) = self.spawn;
        if !(x >= 0.0 && y >= 0.0) {
            return Err(ConfigError::SpawnOutOfWorld { x, y });
        }
        fits("spawn x + player_width", x + self.player_width, self.world.width)?;
        fits("spawn y + player_height", y + self.player_height, self.world.height)?;
        positive("run_speed", self.run_speed)?;
        positive("max_fall_speed", self.max_fall_speed)?;
        positive("enemy_width", self.enemy_width)?;
        positive("enemy_height", self.enemy_height)?;
        fits("enemy_width", self.enemy_width, self.world.width)?;
        fits("enemy_height", self.enemy_height, self.world.height)?;
        positive("enemy_speed", self.enemy_speed)?;
        if self.max_level == 0 || self.max_level > LEVEL_COUNT {
            return Err(ConfigError::DoesNotFit {
                what: "max_level",
                size: self.max_level as f32,
                limit: LEVEL_COUNT as f32,
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }
}
