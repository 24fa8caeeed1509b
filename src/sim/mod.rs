//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM,
//! the clock, or a renderer:
//! - Time arrives as an explicit frame delta
//! - Seeded RNG only
//! - Obstacles are kept in spawn order

pub mod collision;
pub mod flight;
pub mod levels;
pub mod physics;
pub mod pipeline;
pub mod platformer;
pub mod rect;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, Contacts, EnemyContact, ResolveRule, enemy_contact, resolve};
pub use flight::FlightGame;
pub use physics::{BoundsHit, integrate, orient, time_compensation};
pub use platformer::PlatformerGame;
pub use rect::{Rect, intersects};
pub use snapshot::{ObstacleTag, ObstacleView, Pose, Snapshot};
pub use state::{Body, GamePhase, Obstacle, ObstacleKind, Patrol, Score};
pub use tick::{Arcade, TickInput};
