//! Frame timing
//!
//! Turns animation-frame timestamps into the `dt` passed to the simulation.

use crate::consts::MAX_FRAME_DT_MS;
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt_ms: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_ms: None,
            max_dt_ms: MAX_FRAME_DT_MS,
        }
    }

    /// Clock with a custom stall cap; the cap must be positive
    pub fn with_max_dt(max_dt_ms: f32) -> Result<Self> {
        if !(max_dt_ms > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "max_dt_ms",
                value: max_dt_ms,
            });
        }
        Ok(Self {
            last_ms: None,
            max_dt_ms,
        })
    }

    /// Milliseconds since the previous timestamp
    ///
    /// The first frame gets 0. Backward jumps give 0 and long stalls are
    /// capped at `max_dt_ms`, so a hidden tab never dumps seconds of gravity
    /// into one step.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let Some(last) = self.last_ms.replace(timestamp_ms) else {
            return 0.0;
        };
        let dt = (timestamp_ms - last) as f32;
        if !(dt >= 0.0) {
            log::warn!("Frame timestamp went backwards by {:.1} ms", -dt);
            0.0
        } else if dt > self.max_dt_ms {
            log::warn!("Frame took {:.1} ms, capping at {:.0} ms", dt, self.max_dt_ms);
            self.max_dt_ms
        } else {
            dt
        }
    }

    /// Forget the previous timestamp; the next frame gets 0 again
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
