//! Side-view platformer: run, jump, crouch, stomp every enemy to clear a level
//!
//! Phases follow `Waiting -> Playing -> {GameOver, LevelComplete}`. Clearing
//! the last level loops back to level 1 with the score carried over.

use glam::Vec2;

use super::collision::{CollisionOutcome, EnemyContact, ResolveRule, enemy_contact, resolve};
use super::levels::layout;
use super::physics::integrate;
use super::pipeline::patrol;
use super::snapshot::Snapshot;
use super::state::{Body, GamePhase, IdAllocator, Obstacle, Score};
use super::tick::TickInput;
use crate::error::Result;
use crate::tuning::PlatformerTuning;

#[derive(Debug, Clone)]
pub struct PlatformerGame {
    pub tuning: PlatformerTuning,
    pub phase: GamePhase,
    /// 1-based level number
    pub level: u32,
    pub player: Body,
    pub crouching: bool,
    pub platforms: Vec<Obstacle>,
    pub enemies: Vec<Obstacle>,
    pub score: Score,
    /// Score when the current level was entered; restored on retry
    level_start_score: u32,
    ids: IdAllocator,
}

impl PlatformerGame {
    pub fn new(tuning: PlatformerTuning) -> Result<Self> {
        tuning.validate()?;
        let mut game = Self {
            phase: GamePhase::Waiting,
            level: 1,
            player: spawn_player(&tuning),
            crouching: false,
            platforms: Vec::new(),
            enemies: Vec::new(),
            score: Score::default(),
            level_start_score: 0,
            ids: IdAllocator::default(),
            tuning,
        };
        game.load_level(1);
        Ok(game)
    }

    /// Back to level 1 in `Waiting`; best score kept
    pub fn reset(&mut self) {
        self.score.clear();
        self.load_level(1);
        self.phase = GamePhase::Waiting;
    }

    /// Replay the current level with every enemy restored
    pub fn retry_level(&mut self) {
        self.score.value = self.level_start_score;
        self.load_level(self.level);
        self.phase = GamePhase::Waiting;
        log::info!("Retrying level {}", self.level);
    }

    /// Move on from a cleared level, looping after the last one
    pub fn next_level(&mut self) {
        let next = if self.level >= self.tuning.max_level {
            1
        } else {
            self.level + 1
        };
        self.load_level(next);
        self.phase = GamePhase::Playing;
        log::info!("Entering level {}", next);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.tuning.world,
            self.phase,
            self.score,
            Some(self.level),
            &self.player,
            self.platforms.iter().chain(self.enemies.iter()),
        )
    }

    fn load_level(&mut self, level: u32) {
        self.ids = IdAllocator::default();
        let fresh = layout(level, &self.tuning, &mut self.ids);
        self.level = level;
        self.platforms = fresh.platforms;
        self.enemies = fresh.enemies;
        self.player = spawn_player(&self.tuning);
        self.crouching = false;
        self.level_start_score = self.score.value;
    }

    /// Shrink to crouch height or stand back up, keeping the feet in place
    fn set_crouch(&mut self, crouch: bool) {
        if crouch == self.crouching {
            return;
        }
        let height = if crouch {
            self.tuning.crouch_height
        } else {
            self.tuning.player_height
        };
        self.player.pos.y += self.player.size.y - height;
        self.player.size.y = height;
        self.crouching = crouch;
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over on level {}: score {} (best {})",
            self.level,
            self.score.value,
            self.score.best
        );
    }
}

fn spawn_player(tuning: &PlatformerTuning) -> Body {
    let (x, y) = tuning.spawn;
    Body::new(
        Vec2::new(x, y),
        Vec2::new(tuning.player_width, tuning.player_height),
    )
}

/// Advance the platformer by one frame of `dt_ms`
pub fn tick(game: &mut PlatformerGame, input: &TickInput, dt_ms: f32) {
    match game.phase {
        GamePhase::Waiting => {
            if input.primary || input.jump {
                game.phase = GamePhase::Playing;
                log::info!("Level {} started", game.level);
            }
        }
        GamePhase::Playing => update_playing(game, input, dt_ms),
        GamePhase::GameOver => {
            if input.retry {
                game.retry_level();
            } else if input.primary {
                game.reset();
            }
        }
        GamePhase::LevelComplete => {
            if input.primary {
                game.next_level();
            }
        }
    }
}

fn update_playing(game: &mut PlatformerGame, input: &TickInput, dt_ms: f32) {
    let run = game.tuning.run_speed;
    game.player.vel.x = if input.left {
        -run
    } else if input.right {
        run
    } else {
        0.0
    };
    if (input.jump || input.primary) && !game.player.airborne {
        game.player.vel.y = game.tuning.jump_force;
        game.player.airborne = true;
    }
    game.set_crouch(input.crouch && !game.player.airborne);

    let tuning = &game.tuning;
    let hit = integrate(
        &mut game.player,
        tuning.gravity,
        tuning.max_fall_speed,
        dt_ms,
        &tuning.world,
    );
    let landed = match resolve(&mut game.player, &game.platforms, ResolveRule::Full) {
        CollisionOutcome::Resolved(contacts) => contacts.landed,
        _ => false,
    };
    // Walking off a ledge counts as airborne
    game.player.airborne = !(landed || hit.bottom);

    for enemy in &mut game.enemies {
        patrol(enemy, &game.platforms, &game.tuning, dt_ms);
    }

    let contacts: Vec<EnemyContact> = game
        .enemies
        .iter()
        .map(|enemy| enemy_contact(&game.player, enemy))
        .collect();
    if contacts.contains(&EnemyContact::Lethal) {
        game.game_over();
        return;
    }

    // Each stomped enemy is credited once, then removed
    let mut stomped = 0;
    for (enemy, contact) in game.enemies.iter_mut().zip(&contacts) {
        if *contact == EnemyContact::Stomp && game.score.credit(enemy) {
            stomped += 1;
        }
    }
    if stomped == 0 {
        return;
    }
    game.enemies.retain(|e| !e.passed);
    game.player.vel.y = game.tuning.stomp_bounce;
    game.player.airborne = true;
    log::debug!(
        "Stomped {} enemy(ies), {} left",
        stomped,
        game.enemies.len()
    );

    if game.enemies.is_empty() {
        game.phase = GamePhase::LevelComplete;
        log::info!("Level {} complete: score {}", game.level, game.score.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ObstacleKind, Patrol};

    const FRAME: f32 = 16.67;

    fn input() -> TickInput {
        TickInput::default()
    }

    fn started() -> PlatformerGame {
        let mut game = PlatformerGame::new(PlatformerTuning::default()).unwrap();
        tick(
            &mut game,
            &TickInput {
                primary: true,
                ..input()
            },
            FRAME,
        );
        assert_eq!(game.phase, GamePhase::Playing);
        game
    }

    fn lone_enemy(game: &mut PlatformerGame, x: f32) {
        game.enemies = vec![Obstacle::enemy(
            500,
            Vec2::new(x, 530.0),
            Vec2::new(30.0, 30.0),
            Patrol {
                direction: 1.0,
                speed: 0.0,
                variant: 1,
            },
        )];
    }

    #[test]
    fn test_new_game_waits_on_level_one() {
        let game = PlatformerGame::new(PlatformerTuning::default()).unwrap();
        assert_eq!(game.phase, GamePhase::Waiting);
        assert_eq!(game.level, 1);
        assert_eq!(game.player.pos, Vec2::new(100.0, 500.0));
        assert_eq!(game.player.bottom(), 560.0);
        assert_eq!(game.enemies.len(), 2);
    }

    #[test]
    fn test_start_does_not_jump() {
        let game = started();
        assert_eq!(game.player.pos, Vec2::new(100.0, 500.0));
        assert!(!game.player.airborne);
    }

    #[test]
    fn test_standing_on_ground_is_stable() {
        let mut game = started();
        lone_enemy(&mut game, 700.0);
        for _ in 0..60 {
            tick(&mut game, &input(), FRAME);
        }
        assert_eq!(game.player.bottom(), 560.0);
        assert!(!game.player.airborne);
        assert_eq!(game.player.vel.y, 0.0);
    }

    #[test]
    fn test_run_left_and_right() {
        let mut game = started();
        lone_enemy(&mut game, 700.0);
        let x0 = game.player.pos.x;
        tick(&mut game, &TickInput { right: true, ..input() }, FRAME);
        assert_eq!(game.player.pos.x, x0 + 3.5);
        tick(&mut game, &TickInput { left: true, ..input() }, FRAME);
        assert_eq!(game.player.pos.x, x0);
        // Left wins when both are held
        tick(
            &mut game,
            &TickInput {
                left: true,
                right: true,
                ..input()
            },
            FRAME,
        );
        assert_eq!(game.player.pos.x, x0 - 3.5);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut game = started();
        lone_enemy(&mut game, 700.0);
        tick(&mut game, &TickInput { jump: true, ..input() }, FRAME);
        assert!(game.player.airborne);
        assert_eq!(game.player.vel.y, -15.0 + 0.8);

        // Holding jump mid-air does nothing
        tick(&mut game, &TickInput { jump: true, ..input() }, FRAME);
        assert_eq!(game.player.vel.y, -15.0 + 0.8 + 0.8);

        for _ in 0..120 {
            tick(&mut game, &input(), FRAME);
        }
        assert!(!game.player.airborne);
        assert_eq!(game.player.bottom(), 560.0);
    }

    #[test]
    fn test_crouch_keeps_feet_planted() {
        let mut game = started();
        lone_enemy(&mut game, 700.0);
        tick(&mut game, &TickInput { crouch: true, ..input() }, FRAME);
        assert!(game.crouching);
        assert_eq!(game.player.size.y, 30.0);
        assert_eq!(game.player.bottom(), 560.0);

        tick(&mut game, &input(), FRAME);
        assert!(!game.crouching);
        assert_eq!(game.player.size.y, 60.0);
        assert_eq!(game.player.bottom(), 560.0);
    }

    #[test]
    fn test_walking_into_enemy_is_game_over() {
        let mut game = started();
        lone_enemy(&mut game, 131.0);
        tick(&mut game, &TickInput { right: true, ..input() }, FRAME);
        assert_eq!(game.phase, GamePhase::GameOver);

        // Inert until an action arrives
        let before = game.snapshot();
        tick(&mut game, &input(), FRAME);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_stomp_scores_bounces_and_completes_level() {
        let mut game = started();
        lone_enemy(&mut game, 100.0);
        // Just above the enemy, falling
        game.player.pos.y = 465.0;
        game.player.vel.y = 6.0;
        game.player.airborne = true;

        tick(&mut game, &input(), FRAME);
        assert_eq!(game.score.value, 1);
        assert!(game.enemies.is_empty());
        assert_eq!(game.player.vel.y, -10.0);
        assert_eq!(game.phase, GamePhase::LevelComplete);

        tick(&mut game, &TickInput { primary: true, ..input() }, FRAME);
        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.level, 2);
        assert_eq!(game.enemies.len(), 3);
        assert_eq!(game.score.value, 1);
    }

    #[test]
    fn test_double_stomp_credits_each_enemy() {
        let mut game = started();
        game.enemies = [(600, 90.0), (601, 110.0)]
            .into_iter()
            .map(|(id, x)| {
                Obstacle::enemy(
                    id,
                    Vec2::new(x, 530.0),
                    Vec2::new(30.0, 30.0),
                    Patrol {
                        direction: 1.0,
                        speed: 0.0,
                        variant: 1,
                    },
                )
            })
            .collect();
        game.player.pos.y = 465.0;
        game.player.vel.y = 6.0;
        game.player.airborne = true;

        tick(&mut game, &input(), FRAME);
        assert_eq!(game.score.value, 2);
        assert!(game.enemies.is_empty());
        assert_eq!(game.player.vel.y, -10.0);
        assert_eq!(game.phase, GamePhase::LevelComplete);
    }

    #[test]
    fn test_last_level_loops_to_first() {
        let mut game = started();
        game.level = 5;
        game.phase = GamePhase::LevelComplete;
        tick(&mut game, &TickInput { primary: true, ..input() }, FRAME);
        assert_eq!(game.level, 1);
        assert_eq!(game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_retry_restores_enemies_on_same_level() {
        let mut game = started();
        game.next_level();
        assert_eq!(game.level, 2);
        game.score.add(2);
        game.enemies.truncate(1);
        game.player.pos.x = 400.0;
        game.game_over();

        tick(&mut game, &TickInput { retry: true, ..input() }, FRAME);
        assert_eq!(game.phase, GamePhase::Waiting);
        assert_eq!(game.level, 2);
        assert_eq!(game.enemies.len(), 3);
        assert_eq!(game.player.pos, Vec2::new(100.0, 500.0));
        assert_eq!(game.score.value, 0);
        assert_eq!(game.score.best, 2);
    }

    #[test]
    fn test_primary_after_game_over_returns_to_level_one() {
        let mut game = started();
        game.next_level();
        game.game_over();
        tick(&mut game, &TickInput { primary: true, ..input() }, FRAME);
        assert_eq!(game.phase, GamePhase::Waiting);
        assert_eq!(game.level, 1);
        assert!(game.enemies.iter().all(|e| matches!(e.kind, ObstacleKind::Enemy(_))));
    }
}
