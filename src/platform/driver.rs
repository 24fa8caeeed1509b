//! Update/render driver
//!
//! One call per animation frame: measure `dt`, tick the game, hand a snapshot
//! to the renderer. A failing frame is logged and reported, and the next
//! frame runs normally.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::clock::FrameClock;
use crate::error::FrameError;
use crate::sim::{Arcade, Snapshot, TickInput};

/// Draws one frame
pub trait Renderer {
    fn render(&mut self, frame: &Snapshot) -> Result<(), FrameError>;
}

pub struct FrameDriver<R: Renderer> {
    arcade: Arcade,
    renderer: R,
    clock: FrameClock,
    input: TickInput,
    frames: u64,
    failures: u64,
}

impl<R: Renderer> FrameDriver<R> {
    pub fn new(arcade: Arcade, renderer: R) -> Self {
        Self {
            arcade,
            renderer,
            clock: FrameClock::new(),
            input: TickInput::default(),
            frames: 0,
            failures: 0,
        }
    }

    /// Input for the next frame; event handlers write here
    pub fn input_mut(&mut self) -> &mut TickInput {
        &mut self.input
    }

    pub fn arcade(&self) -> &Arcade {
        &self.arcade
    }

    pub fn arcade_mut(&mut self) -> &mut Arcade {
        &mut self.arcade
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Swap in a different game; the clock restarts
    pub fn replace(&mut self, arcade: Arcade) {
        log::info!("Switching to {}", arcade.name());
        self.arcade = arcade;
        self.clock.reset();
        self.input = TickInput::default();
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames that returned an error
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Run one frame at `timestamp_ms`
    pub fn frame(&mut self, timestamp_ms: f64) -> Result<(), FrameError> {
        let dt_ms = self.clock.advance(timestamp_ms);
        let input = self.input.clone();
        self.input.clear_one_shots();
        self.frames += 1;

        let arcade = &mut self.arcade;
        let renderer = &mut self.renderer;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            arcade.tick(&input, dt_ms);
            renderer.render(&arcade.snapshot())
        }))
        .unwrap_or_else(|payload| Err(FrameError::TickPanicked(panic_message(payload.as_ref()))));

        if let Err(e) = &result {
            self.failures += 1;
            log::error!("Frame {} failed: {}", self.frames, e);
        }
        result
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
