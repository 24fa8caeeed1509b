//! Platform layer
//!
//! Everything between the browser (or a native host) and the simulation:
//! frame timing and the per-frame update/render driver.

pub mod clock;
pub mod driver;

pub use clock::FrameClock;
pub use driver::{FrameDriver, Renderer};
