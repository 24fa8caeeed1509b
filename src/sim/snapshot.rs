//! Read-only view of a game for renderers
//!
//! Serialized to JSON for the browser host; native renderers read it directly.

use serde::Serialize;

use super::rect::Rect;
use super::state::{Body, GamePhase, Obstacle, ObstacleKind, Score};
use crate::tuning::World;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pose {
    pub rect: Rect,
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleTag {
    Pipe,
    Platform,
    Enemy,
}

/// Drawable parts of one obstacle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub tag: ObstacleTag,
    /// Sprite selector for enemies, 0 otherwise
    pub variant: u8,
    /// Solid rectangles; two for a pipe pair
    pub rects: Vec<Rect>,
}

impl From<&Obstacle> for ObstacleView {
    fn from(obstacle: &Obstacle) -> Self {
        let (tag, variant, rects) = match obstacle.kind {
            ObstacleKind::GapPair { .. } => {
                let rects = obstacle
                    .gap_rects()
                    .map(|(top, bottom)| vec![top, bottom])
                    .unwrap_or_default();
                (ObstacleTag::Pipe, 0, rects)
            }
            ObstacleKind::Platform => (ObstacleTag::Platform, 0, vec![obstacle.rect()]),
            ObstacleKind::Enemy(patrol) => (ObstacleTag::Enemy, patrol.variant, vec![obstacle.rect()]),
        };
        Self {
            id: obstacle.id,
            tag,
            variant,
            rects,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub world: World,
    pub phase: GamePhase,
    pub score: u32,
    pub best: u32,
    /// Platformer only
    pub level: Option<u32>,
    pub body: Pose,
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn new<'a>(
        world: World,
        phase: GamePhase,
        score: Score,
        level: Option<u32>,
        body: &Body,
        obstacles: impl Iterator<Item = &'a Obstacle>,
    ) -> Self {
        Self {
            world,
            phase,
            score: score.value,
            best: score.best,
            level,
            body: Pose {
                rect: body.rect(),
                rotation: body.rotation,
            },
            obstacles: obstacles.map(ObstacleView::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
