//! Variable-timestep integrator
//!
//! Tuning values are authored per reference frame (~60 FPS). Each step scales
//! them by `dt / REFERENCE_FRAME_MS` so effective gravity does not depend on
//! the display refresh rate.

use super::state::Body;
use crate::consts::REFERENCE_FRAME_MS;
use crate::tuning::World;

/// Which world edges a body touched after integration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundsHit {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl BoundsHit {
    pub fn vertical(&self) -> bool {
        self.top || self.bottom
    }
}

/// Dimensionless time-compensation factor for a frame of `dt_ms`
#[inline]
pub fn time_compensation(dt_ms: f32) -> f32 {
    dt_ms.max(0.0) / REFERENCE_FRAME_MS
}

/// Advance a body by one frame of `dt_ms`
///
/// Applies gravity, clamps the fall speed, moves the body, then clamps it to
/// the world. A clamped axis has its velocity zeroed (the body stops, it does
/// not bounce). `body.step` records the displacement actually applied.
pub fn integrate(body: &mut Body, gravity: f32, max_fall_speed: f32, dt_ms: f32, world: &World) -> BoundsHit {
    let tc = time_compensation(dt_ms);
    let start = body.pos;

    body.vel.y = (body.vel.y + gravity * tc).min(max_fall_speed);
    body.pos += body.vel * tc;

    let hit = clamp_to_world(body, world);
    body.step = body.pos - start;
    hit
}

fn clamp_to_world(body: &mut Body, world: &World) -> BoundsHit {
    let mut hit = BoundsHit::default();
    let max_x = world.width - body.size.x;
    let max_y = world.height - body.size.y;

    if body.pos.x <= 0.0 {
        body.pos.x = 0.0;
        body.vel.x = 0.0;
        hit.left = true;
    } else if body.pos.x >= max_x {
        body.pos.x = max_x;
        body.vel.x = 0.0;
        hit.right = true;
    }

    if body.pos.y <= 0.0 {
        body.pos.y = 0.0;
        body.vel.y = 0.0;
        hit.top = true;
    } else if body.pos.y >= max_y {
        body.pos.y = max_y;
        body.vel.y = 0.0;
        body.airborne = false;
        hit.bottom = true;
    }

    hit
}

/// Cosmetic tilt from vertical velocity; physics never reads it back
pub fn orient(body: &mut Body, rotation_gain: f32, max_tilt: f32) {
    body.rotation = (body.vel.y * rotation_gain).clamp(-max_tilt, max_tilt);
}
