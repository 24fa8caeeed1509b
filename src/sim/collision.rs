//! Collision detection and response for axis-aligned bodies
//!
//! Pipes are lethal on contact. Platforms push the body back out, picking the
//! side from the velocity sign and the pre-step position. Vertical resolution
//! runs before lateral, so a corner hit while falling lands instead of pushing.
//!
//! The side inference is an approximation: at very low frame rates a fast
//! diagonal hit can be classified from the wrong side. Only the landing branch
//! is tunneling-safe: it tests whether the bottom edge crossed the platform
//! top between the previous and current position. Under `ResolveRule::Landing`
//! a falling body that already overlaps a platform is also put on top of it.

use super::rect::Rect;
use super::state::{Body, Obstacle, ObstacleKind};

/// Which corrections were applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    /// Snapped onto a platform top
    pub landed: bool,
    /// Snapped under a platform bottom
    pub ceiling: bool,
    /// Pushed out of a platform side
    pub lateral: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.landed || self.ceiling || self.lateral
    }
}

/// Result of resolving a body against a set of obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Nothing touched
    Clear,
    /// Touched something that ends the run; the body was not corrected
    Lethal,
    /// Pushed out of one or more platforms
    Resolved(Contacts),
}

/// How much of the platform response applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveRule {
    /// Vertical and lateral correction (player)
    Full,
    /// Vertical correction only (enemies)
    Landing,
}

/// Result of a body touching an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    None,
    /// Came down on top of it
    Stomp,
    /// Any other overlap
    Lethal,
}

/// Resolve `body` against every pipe pair and platform in `obstacles`
///
/// Enemies are skipped; use `enemy_contact` for those. A pipe overlap returns
/// `Lethal` immediately.
pub fn resolve(body: &mut Body, obstacles: &[Obstacle], rule: ResolveRule) -> CollisionOutcome {
    let prev = body.prev_rect();
    let mut contacts = Contacts::default();

    for obstacle in obstacles {
        match obstacle.kind {
            ObstacleKind::GapPair { .. } => {
                if obstacle.intersects(&body.rect()) {
                    return CollisionOutcome::Lethal;
                }
            }
            ObstacleKind::Platform => {
                resolve_platform(body, &prev, &obstacle.rect(), rule, &mut contacts);
            }
            ObstacleKind::Enemy(_) => {}
        }
    }

    if contacts.any() {
        CollisionOutcome::Resolved(contacts)
    } else {
        CollisionOutcome::Clear
    }
}

fn resolve_platform(body: &mut Body, prev: &Rect, platform: &Rect, rule: ResolveRule, contacts: &mut Contacts) {
    let current = body.rect();

    // Landing: the bottom edge crossed the platform top this step
    if body.vel.y > 0.0
        && prev.bottom() <= platform.top()
        && current.bottom() > platform.top()
        && current.overlaps_x(platform)
    {
        land_on(body, prev, platform, contacts);
        return;
    }

    if !current.intersects(platform) {
        return;
    }

    // Enemies authored overlapping a platform top settle onto it
    if rule == ResolveRule::Landing && body.vel.y > 0.0 {
        land_on(body, prev, platform, contacts);
        return;
    }

    // Head hits the underside
    if body.vel.y < 0.0 && prev.top() >= platform.bottom() {
        body.pos.y = platform.bottom();
        body.vel.y = 0.0;
        body.step.y = body.pos.y - prev.y;
        contacts.ceiling = true;
        return;
    }

    if rule == ResolveRule::Landing {
        return;
    }

    if body.vel.x > 0.0 && prev.right() <= platform.left() {
        body.pos.x = platform.left() - body.size.x;
        body.step.x = body.pos.x - prev.x;
        contacts.lateral = true;
    } else if body.vel.x < 0.0 && prev.left() >= platform.right() {
        body.pos.x = platform.right();
        body.step.x = body.pos.x - prev.x;
        contacts.lateral = true;
    }
}

fn land_on(body: &mut Body, prev: &Rect, platform: &Rect, contacts: &mut Contacts) {
    body.pos.y = platform.top() - body.size.y;
    body.vel.y = 0.0;
    body.airborne = false;
    body.step.y = body.pos.y - prev.y;
    contacts.landed = true;
}

/// Classify a body/enemy overlap
pub fn enemy_contact(body: &Body, enemy: &Obstacle) -> EnemyContact {
    let enemy_rect = enemy.rect();
    if !body.rect().intersects(&enemy_rect) {
        return EnemyContact::None;
    }
    if body.vel.y > 0.0 && body.prev_rect().bottom() <= enemy_rect.top() {
        EnemyContact::Stomp
    } else {
        EnemyContact::Lethal
    }
}
