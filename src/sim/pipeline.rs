//! Per-tick obstacle updates
//!
//! Scrolling, enemy patrols, score credit and retirement. Removal happens in a
//! single `retain` pass at the end of a tick so no element is skipped.

use super::collision::{ResolveRule, resolve};
use super::physics::{integrate, time_compensation};
use super::state::{Body, Obstacle, ObstacleKind, Score};
use crate::tuning::PlatformerTuning;

/// Move every obstacle toward the trailing edge
pub fn scroll(obstacles: &mut [Obstacle], speed: f32, dt_ms: f32) {
    let dx = speed * time_compensation(dt_ms);
    for obstacle in obstacles {
        obstacle.body.pos.x -= dx;
    }
}

/// Credit obstacles whose right edge is now behind the body's left edge
///
/// Returns how many were newly credited this call.
pub fn award_passes(obstacles: &mut [Obstacle], body: &Body, score: &mut Score) -> u32 {
    let mut credited = 0;
    for obstacle in obstacles.iter_mut() {
        if !obstacle.passed && obstacle.body.right() < body.left() && score.credit(obstacle) {
            credited += 1;
        }
    }
    credited
}

/// Drop obstacles that are fully past the trailing edge; returns how many
pub fn retire_offscreen(obstacles: &mut Vec<Obstacle>) -> usize {
    let before = obstacles.len();
    obstacles.retain(|o| !o.is_offscreen());
    let retired = before - obstacles.len();
    if retired > 0 {
        log::debug!("Retired {} obstacle(s), {} live", retired, obstacles.len());
    }
    retired
}

/// Walk an enemy along its patrol, then let it fall onto the platforms
///
/// The enemy turns around when its leading edge reaches a world edge. Only
/// vertical platform correction applies.
pub fn patrol(enemy: &mut Obstacle, platforms: &[Obstacle], tuning: &PlatformerTuning, dt_ms: f32) {
    let ObstacleKind::Enemy(patrol) = &mut enemy.kind else {
        return;
    };

    enemy.body.vel.x = patrol.direction * patrol.speed;
    let hit = integrate(
        &mut enemy.body,
        tuning.enemy_gravity,
        tuning.max_fall_speed,
        dt_ms,
        &tuning.world,
    );
    if hit.left {
        patrol.direction = 1.0;
    } else if hit.right {
        patrol.direction = -1.0;
    }

    resolve(&mut enemy.body, platforms, ResolveRule::Landing);
}
