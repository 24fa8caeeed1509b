//! Flight game: one bird, scrolling pipe pairs
//!
//! `Waiting -> Playing -> GameOver -> Waiting`. The primary action starts a
//! run, flaps while playing, and resets after a crash. Touching the top or
//! bottom of the world, or any pipe, ends the run on that same tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{CollisionOutcome, ResolveRule, resolve};
use super::physics::{integrate, orient};
use super::pipeline::{award_passes, retire_offscreen, scroll};
use super::snapshot::Snapshot;
use super::spawn::{SpawnTimer, spawn_gap_pair};
use super::state::{Body, GamePhase, IdAllocator, Obstacle, Score};
use super::tick::TickInput;
use crate::error::Result;
use crate::tuning::FlightTuning;

/// Complete flight game state
#[derive(Debug, Clone)]
pub struct FlightGame {
    pub tuning: FlightTuning,
    pub phase: GamePhase,
    pub bird: Body,
    /// Live pipe pairs, oldest first
    pub pipes: Vec<Obstacle>,
    pub score: Score,
    /// Primary actions since the last reset
    pub clicks: u32,
    pub spawn: SpawnTimer,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    ids: IdAllocator,
}

impl FlightGame {
    /// Create a game in `Waiting`; rejects malformed tuning
    pub fn new(tuning: FlightTuning, seed: u64) -> Result<Self> {
        tuning.validate()?;
        Ok(Self {
            phase: GamePhase::Waiting,
            bird: spawn_bird(&tuning),
            pipes: Vec::new(),
            score: Score::default(),
            clicks: 0,
            spawn: SpawnTimer::new(tuning.spawn_interval_ms),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ids: IdAllocator::default(),
            tuning,
        })
    }

    /// Fresh bird, no pipes, score cleared (best kept), back to `Waiting`
    pub fn reset(&mut self) {
        self.phase = GamePhase::Waiting;
        self.bird = spawn_bird(&self.tuning);
        self.pipes.clear();
        self.score.clear();
        self.clicks = 0;
        self.spawn = SpawnTimer::new(self.tuning.spawn_interval_ms);
        self.ids = IdAllocator::default();
    }

    /// Tap / click / Space
    pub fn primary_action(&mut self) {
        self.clicks += 1;
        match self.phase {
            GamePhase::Waiting => {
                self.phase = GamePhase::Playing;
                log::info!("Flight run started (seed {})", self.seed);
            }
            GamePhase::Playing => self.bird.vel.y = self.tuning.flap_force,
            GamePhase::GameOver => {
                self.reset();
                log::info!("Flight game reset");
            }
            GamePhase::LevelComplete => {}
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.tuning.world,
            self.phase,
            self.score,
            None,
            &self.bird,
            self.pipes.iter(),
        )
    }

    fn game_over(&mut self, cause: &str) {
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over ({}): score {} (best {})",
            cause,
            self.score.value,
            self.score.best
        );
    }
}

fn spawn_bird(tuning: &FlightTuning) -> Body {
    let (fx, fy) = tuning.bird_start;
    Body::new(
        Vec2::new(tuning.world.width * fx, tuning.world.height * fy),
        Vec2::new(tuning.bird_width, tuning.bird_height),
    )
}

/// Advance the flight game by one frame of `dt_ms`
pub fn tick(game: &mut FlightGame, input: &TickInput, dt_ms: f32) {
    let was_playing = game.phase == GamePhase::Playing;
    if input.primary {
        game.primary_action();
    }
    // The start click itself does not advance the world
    if was_playing && game.phase == GamePhase::Playing {
        update_playing(game, dt_ms);
    }
}

fn update_playing(game: &mut FlightGame, dt_ms: f32) {
    let tuning = &game.tuning;

    let hit = integrate(
        &mut game.bird,
        tuning.gravity,
        tuning.max_fall_speed,
        dt_ms,
        &tuning.world,
    );
    orient(&mut game.bird, tuning.rotation_gain, tuning.max_tilt);
    if hit.vertical() {
        let cause = if hit.top { "ceiling" } else { "floor" };
        game.game_over(cause);
        return;
    }

    if game.spawn.advance(dt_ms) {
        let pipe = spawn_gap_pair(game.ids.next_id(), &game.tuning, &mut game.rng);
        game.spawn.resample(&game.tuning, &mut game.rng);
        log::debug!(
            "Spawned pipe {} (next in {:.0} ms)",
            pipe.id,
            game.spawn.interval_ms
        );
        game.pipes.push(pipe);
    }

    scroll(&mut game.pipes, game.tuning.pipe_speed, dt_ms);

    if resolve(&mut game.bird, &game.pipes, ResolveRule::Full) == CollisionOutcome::Lethal {
        game.game_over("pipe");
        return;
    }

    award_passes(&mut game.pipes, &game.bird, &mut game.score);
    retire_offscreen(&mut game.pipes);
}
