//! Obstacle spawning
//!
//! A timer accumulates frame time and fires once it passes the current
//! interval. Intervals after the first are re-sampled from the tuning range.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::tuning::FlightTuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Time accumulated since the last spawn (ms)
    pub elapsed_ms: f32,
    /// Current interval (ms)
    pub interval_ms: f32,
}

impl SpawnTimer {
    pub fn new(interval_ms: f32) -> Self {
        Self {
            elapsed_ms: 0.0,
            interval_ms,
        }
    }

    /// Accumulate `dt_ms`; returns true (and restarts) once the interval is exceeded
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        self.elapsed_ms += dt_ms.max(0.0);
        if self.elapsed_ms > self.interval_ms {
            self.elapsed_ms = 0.0;
            true
        } else {
            false
        }
    }

    /// Draw the next interval as `base * U(min, max)`
    pub fn resample<R: Rng>(&mut self, tuning: &FlightTuning, rng: &mut R) {
        let scale = sample_between(rng, tuning.spawn_scale_min, tuning.spawn_scale_max);
        self.interval_ms = tuning.spawn_interval_ms * scale;
    }
}

/// Uniform sample in `[min, max)`; returns `min` for an empty range
fn sample_between<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// A pipe pair entering at the trailing edge of the world
pub fn spawn_gap_pair<R: Rng>(id: u32, tuning: &FlightTuning, rng: &mut R) -> Obstacle {
    let top_height = sample_between(rng, 0.0, tuning.gap_range()) + tuning.gap_margin;
    Obstacle::gap_pair(
        id,
        tuning.world.width,
        tuning.pipe_width,
        top_height,
        tuning.pipe_gap,
        tuning.world.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_timer_fires_after_interval() {
        let mut timer = SpawnTimer::new(2000.0);
        let mut fired_at = None;
        for frame in 1..=200 {
            if timer.advance(16.67) {
                fired_at = Some(frame);
                break;
            }
        }
        // 120 frames is 2000.4 ms
        assert_eq!(fired_at, Some(120));
        assert_eq!(timer.elapsed_ms, 0.0);
    }

    #[test]
    fn test_timer_needs_to_exceed_interval() {
        let mut timer = SpawnTimer::new(100.0);
        assert!(!timer.advance(100.0));
        assert!(timer.advance(0.5));
    }

    #[test]
    fn test_resample_stays_in_range() {
        let tuning = FlightTuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut timer = SpawnTimer::new(tuning.spawn_interval_ms);
        for _ in 0..500 {
            timer.resample(&tuning, &mut rng);
            assert!(timer.interval_ms >= 200.0);
            assert!(timer.interval_ms <= 1400.0);
        }
    }

    proptest! {
        #[test]
        fn prop_gap_pair_fits_world(seed in any::<u64>()) {
            let tuning = FlightTuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let pipe = spawn_gap_pair(1, &tuning, &mut rng);
            let ObstacleKind::GapPair { top_height, bottom_y } = pipe.kind else {
                panic!("expected gap pair");
            };
            let (_, bottom) = pipe.gap_rects().unwrap();
            prop_assert!((bottom_y - top_height - tuning.pipe_gap).abs() < 1e-3);
            prop_assert!((top_height + tuning.pipe_gap + bottom.h - tuning.world.height).abs() < 1e-3);
            prop_assert!(top_height >= tuning.gap_margin);
            prop_assert!(bottom.h >= tuning.gap_margin - 1e-3);
            prop_assert_eq!(pipe.body.pos.x, tuning.world.width);
        }
    }
}
