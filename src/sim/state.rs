//! Shared simulation types
//!
//! Every entity is a `Body` record plus a kind tag; per-kind rules dispatch on
//! the tag rather than on trait objects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for the first primary action
    Waiting,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a reset
    GameOver,
    /// Platformer only: every enemy on the level is gone
    LevelComplete,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Waiting => "waiting",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game_over",
            GamePhase::LevelComplete => "level_complete",
        }
    }
}

/// A movable axis-aligned body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Displacement applied by the most recent integration
    pub step: Vec2,
    /// Cosmetic tilt in radians, derived from velocity
    pub rotation: f32,
    pub airborne: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            step: Vec2::ZERO,
            rotation: 0.0,
            airborne: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Where the body was before the last integration step
    pub fn prev_rect(&self) -> Rect {
        Rect::from_pos_size(self.pos - self.step, self.size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Enemy patrol state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub speed: f32,
    /// Sprite selector, opaque to the simulation
    pub variant: u8,
}

/// Obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Pipe pair; the body spans the full world height, the gap is open
    GapPair { top_height: f32, bottom_y: f32 },
    /// Static platform
    Platform,
    /// Patrolling enemy
    Enemy(Patrol),
}

/// A platform, pipe pair, or enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub body: Body,
    /// Already credited to the score
    pub passed: bool,
}

impl Obstacle {
    /// A pipe pair at `x` whose gap starts `top_height` below the top edge
    pub fn gap_pair(id: u32, x: f32, width: f32, top_height: f32, gap: f32, world_height: f32) -> Self {
        Self {
            id,
            kind: ObstacleKind::GapPair {
                top_height,
                bottom_y: top_height + gap,
            },
            body: Body::new(Vec2::new(x, 0.0), Vec2::new(width, world_height)),
            passed: false,
        }
    }

    pub fn platform(id: u32, rect: Rect) -> Self {
        Self {
            id,
            kind: ObstacleKind::Platform,
            body: Body::new(Vec2::new(rect.x, rect.y), Vec2::new(rect.w, rect.h)),
            passed: false,
        }
    }

    pub fn enemy(id: u32, pos: Vec2, size: Vec2, patrol: Patrol) -> Self {
        Self {
            id,
            kind: ObstacleKind::Enemy(patrol),
            body: Body::new(pos, size),
            passed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Solid parts of a pipe pair: (top, bottom)
    pub fn gap_rects(&self) -> Option<(Rect, Rect)> {
        match self.kind {
            ObstacleKind::GapPair { top_height, bottom_y } => {
                let x = self.body.pos.x;
                let w = self.body.size.x;
                let bottom_height = self.body.size.y - bottom_y;
                Some((
                    Rect::new(x, 0.0, w, top_height),
                    Rect::new(x, bottom_y, w, bottom_height),
                ))
            }
            _ => None,
        }
    }

    /// True if any solid part overlaps `other`
    pub fn intersects(&self, other: &Rect) -> bool {
        match self.gap_rects() {
            Some((top, bottom)) => top.intersects(other) || bottom.intersects(other),
            None => self.rect().intersects(other),
        }
    }

    /// Fully past the trailing (left) edge of the world
    pub fn is_offscreen(&self) -> bool {
        self.body.right() < 0.0
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.kind, ObstacleKind::Enemy(_))
    }
}

/// Points earned this run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub value: u32,
    /// Best value seen since the game was created
    pub best: u32,
}

impl Score {
    /// Credit an obstacle once; returns false if it was already credited
    pub fn credit(&mut self, obstacle: &mut Obstacle) -> bool {
        if obstacle.passed {
            return false;
        }
        obstacle.passed = true;
        self.add(1);
        true
    }

    pub fn add(&mut self, points: u32) {
        self.value = self.value.saturating_add(points);
        self.best = self.best.max(self.value);
    }

    /// Start a new run, keeping the best score
    pub fn clear(&mut self) {
        self.value = 0;
    }
}

/// Per-game entity id allocator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next_id: u32,
}

impl IdAllocator {
    pub fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_pair_invariants() {
        let pipe = Obstacle::gap_pair(1, 700.0, 60.0, 320.0, 250.0, 1828.0);
        let ObstacleKind::GapPair { top_height, bottom_y } = pipe.kind else {
            panic!("expected gap pair");
        };
        let (top, bottom) = pipe.gap_rects().unwrap();
        assert_eq!(bottom_y - top_height, 250.0);
        assert_eq!(top.h + 250.0 + bottom.h, 1828.0);
        assert_eq!(bottom.top(), bottom_y);
    }

    #[test]
    fn test_gap_is_open() {
        let pipe = Obstacle::gap_pair(1, 100.0, 60.0, 300.0, 250.0, 1000.0);
        let in_gap = Rect::new(110.0, 350.0, 40.0, 30.0);
        assert!(!pipe.intersects(&in_gap));
        let on_top = Rect::new(110.0, 290.0, 40.0, 30.0);
        assert!(pipe.intersects(&on_top));
        let on_bottom = Rect::new(110.0, 530.0, 40.0, 30.0);
        assert!(pipe.intersects(&on_bottom));
    }

    #[test]
    fn test_score_credits_once() {
        let mut score = Score::default();
        let mut pipe = Obstacle::gap_pair(1, -10.0, 60.0, 300.0, 250.0, 1000.0);
        assert!(score.credit(&mut pipe));
        assert!(!score.credit(&mut pipe));
        assert_eq!(score.value, 1);
        assert_eq!(score.best, 1);

        score.clear();
        assert_eq!(score.value, 0);
        assert_eq!(score.best, 1);
    }

    #[test]
    fn test_offscreen_is_strict() {
        let mut pipe = Obstacle::gap_pair(1, -60.0, 60.0, 300.0, 250.0, 1000.0);
        assert!(!pipe.is_offscreen());
        pipe.body.pos.x = -60.5;
        assert!(pipe.is_offscreen());
    }
}
