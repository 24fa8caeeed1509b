//! Platformer level layouts
//!
//! Authored against an 800x600 board. The ground strip and the enemies that
//! stand on it are placed relative to the world's bottom edge.

use glam::Vec2;

use super::rect::Rect;
use super::state::{IdAllocator, Obstacle, Patrol};
use crate::tuning::PlatformerTuning;

/// Number of authored levels
pub const LEVEL_COUNT: u32 = 5;

/// Height of the ground strip
pub const GROUND_HEIGHT: f32 = 40.0;

/// Enemy spawn y measured up from the bottom edge (standing on the ground)
const ON_GROUND: f32 = -70.0;

/// Floating platforms per level: (x, y, w, h)
const PLATFORMS: [&[(f32, f32, f32, f32)]; LEVEL_COUNT as usize] = [
    &[
        (100.0, 400.0, 200.0, 20.0),
        (400.0, 300.0, 200.0, 20.0),
        (200.0, 200.0, 200.0, 20.0),
    ],
    &[
        (100.0, 450.0, 150.0, 20.0),
        (350.0, 350.0, 150.0, 20.0),
        (600.0, 250.0, 150.0, 20.0),
        (300.0, 150.0, 150.0, 20.0),
    ],
    &[
        (50.0, 450.0, 120.0, 20.0),
        (250.0, 400.0, 120.0, 20.0),
        (450.0, 350.0, 120.0, 20.0),
        (650.0, 300.0, 120.0, 20.0),
        (450.0, 200.0, 120.0, 20.0),
    ],
    &[
        (100.0, 450.0, 100.0, 20.0),
        (300.0, 400.0, 100.0, 20.0),
        (500.0, 350.0, 100.0, 20.0),
        (300.0, 250.0, 100.0, 20.0),
        (100.0, 150.0, 100.0, 20.0),
        (500.0, 150.0, 100.0, 20.0),
    ],
    &[
        (50.0, 450.0, 80.0, 20.0),
        (200.0, 400.0, 80.0, 20.0),
        (350.0, 350.0, 80.0, 20.0),
        (500.0, 300.0, 80.0, 20.0),
        (650.0, 250.0, 80.0, 20.0),
        (500.0, 150.0, 80.0, 20.0),
        (350.0, 200.0, 80.0, 20.0),
    ],
];

/// Enemies per level: (x, y, sprite variant); negative y is relative to the bottom edge
const ENEMIES: [&[(f32, f32, u8)]; LEVEL_COUNT as usize] = [
    &[(300.0, ON_GROUND, 1), (500.0, ON_GROUND, 1)],
    &[(200.0, ON_GROUND, 1), (400.0, ON_GROUND, 1), (600.0, ON_GROUND, 2)],
    &[
        (150.0, ON_GROUND, 1),
        (350.0, ON_GROUND, 2),
        (550.0, ON_GROUND, 2),
        (650.0, 280.0, 1),
    ],
    &[
        (200.0, ON_GROUND, 1),
        (400.0, ON_GROUND, 2),
        (600.0, ON_GROUND, 2),
        (300.0, 230.0, 1),
        (500.0, 130.0, 2),
    ],
    &[
        (150.0, ON_GROUND, 2),
        (350.0, ON_GROUND, 2),
        (550.0, ON_GROUND, 2),
        (650.0, 230.0, 1),
        (450.0, 180.0, 2),
        (250.0, 380.0, 1),
    ],
];

/// Platforms and enemies for one level
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub platforms: Vec<Obstacle>,
    pub enemies: Vec<Obstacle>,
}

/// Clamp a 1-based level number into the authored range
fn slot(level: u32) -> usize {
    (level.clamp(1, LEVEL_COUNT) - 1) as usize
}

/// Build a fresh copy of `level` (1-based)
pub fn layout(level: u32, tuning: &PlatformerTuning, ids: &mut IdAllocator) -> Layout {
    let world = tuning.world;
    let index = slot(level);

    let mut platforms = Vec::with_capacity(PLATFORMS[index].len() + 1);
    platforms.push(Obstacle::platform(
        ids.next_id(),
        Rect::new(0.0, world.height - GROUND_HEIGHT, world.width, GROUND_HEIGHT),
    ));
    for &(x, y, w, h) in PLATFORMS[index] {
        platforms.push(Obstacle::platform(ids.next_id(), Rect::new(x, y, w, h)));
    }

    let enemies = ENEMIES[index]
        .iter()
        .map(|&(x, y, variant)| {
            let y = if y < 0.0 { world.height + y } else { y };
            Obstacle::enemy(
                ids.next_id(),
                Vec2::new(x, y),
                Vec2::new(tuning.enemy_width, tuning.enemy_height),
                Patrol {
                    direction: 1.0,
                    speed: tuning.enemy_speed,
                    variant,
                },
            )
        })
        .collect();

    Layout { platforms, enemies }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pipeline::patrol;

    #[test]
    fn test_every_level_has_ground_and_enemies() {
        let tuning = PlatformerTuning::default();
        let mut ids = IdAllocator::default();
        for level in 1..=LEVEL_COUNT {
            let layout = layout(level, &tuning, &mut ids);
            let ground = layout.platforms[0].rect();
            assert_eq!(ground.bottom(), 600.0);
            assert_eq!(ground.w, 800.0);
            assert!(!layout.enemies.is_empty());
            assert!(layout.enemies.iter().all(Obstacle::is_enemy));
        }
    }

    #[test]
    fn test_ground_enemies_sit_just_above_ground() {
        let tuning = PlatformerTuning::default();
        let mut ids = IdAllocator::default();
        let layout = layout(1, &tuning, &mut ids);
        assert_eq!(layout.enemies.len(), 2);
        assert_eq!(layout.enemies[0].body.pos, Vec2::new(300.0, 530.0));
        assert_eq!(layout.enemies[0].body.bottom(), 560.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let tuning = PlatformerTuning::default();
        let mut ids = IdAllocator::default();
        let layout = layout(5, &tuning, &mut ids);
        let mut all: Vec<u32> = layout
            .platforms
            .iter()
            .chain(layout.enemies.iter())
            .map(|o| o.id)
            .collect();
        let count = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), count);
    }

    #[test]
    fn test_raised_enemies_stay_on_their_platforms() {
        let tuning = PlatformerTuning::default();
        let mut raised = 0;
        for level in 1..=LEVEL_COUNT {
            let mut ids = IdAllocator::default();
            let Layout {
                platforms,
                mut enemies,
            } = layout(level, &tuning, &mut ids);

            // Raised enemies start overlapping the top of the platform they stand on
            let homes: Vec<Option<Rect>> = enemies
                .iter()
                .map(|enemy| {
                    let start = enemy.rect();
                    platforms[1..]
                        .iter()
                        .map(Obstacle::rect)
                        .find(|p| start.overlaps_x(p) && start.top() < p.top() && start.bottom() >= p.top())
                })
                .collect();

            for _ in 0..10 {
                for enemy in &mut enemies {
                    patrol(enemy, &platforms, &tuning, 16.67);
                }
            }

            for (enemy, home) in enemies.iter().zip(&homes) {
                if let Some(home) = home {
                    raised += 1;
                    assert_eq!(enemy.body.bottom(), home.top(), "level {level} enemy {}", enemy.id);
                    assert_eq!(enemy.body.vel.y, 0.0);
                }
            }
        }
        assert_eq!(raised, 5);
    }

    #[test]
    fn test_out_of_range_level_is_clamped() {
        let tuning = PlatformerTuning::default();
        let mut a = IdAllocator::default();
        let mut b = IdAllocator::default();
        assert_eq!(layout(0, &tuning, &mut a), layout(1, &tuning, &mut b));
    }
}
