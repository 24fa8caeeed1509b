//! Arcade Core - physics and collision core for two arcade games
//!
//! Core modules:
//! - `sim`: Simulation (integrator, collisions, entity pipeline, game states)
//! - `tuning`: Data-driven game balance
//! - `platform`: Frame clock and update/render driver
//! - `error`: Configuration and frame errors

pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, FrameError};
pub use platform::{FrameClock, FrameDriver, Renderer};
pub use sim::{Arcade, GamePhase, Snapshot, TickInput};
pub use tuning::{FlightTuning, PlatformerTuning, Variant, World};

/// Timing constants
pub mod consts {
    /// Frame interval the tuning constants were authored against (~60 FPS)
    pub const REFERENCE_FRAME_MS: f32 = 16.67;
    /// Longest frame delta fed to the simulation (tab switches, debugger stops)
    pub const MAX_FRAME_DT_MS: f32 = 100.0;
}
