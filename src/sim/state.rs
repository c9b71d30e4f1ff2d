//! Complete simulation state for one run
//!
//! Everything the simulation reads or writes lives here, including the
//! seeded RNG. Two states built from the same seed and fed the same
//! inputs stay bit-identical.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::levels::LevelConfig;
use crate::sim::camera::Camera;
use crate::sim::enemy::Enemy;
use crate::sim::entity::{Bullet, Obstacle, Player};
use crate::sim::particles::Particle;
use crate::sim::spawn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Ready,
    Playing,
    Paused,
    LevelComplete,
    GameOver,
}

/// One-shot notifications emitted during a tick, drained by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ScreenShake { intensity: f32, duration: f32 },
    Message(String),
    LevelComplete { level: usize },
    GameOver { won: bool },
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub level_index: usize,
    pub score: u64,
    /// Accumulated simulation time in seconds
    pub time: f64,
    pub level_start_time: f64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Pre-generated enemies waiting for the player to scroll near
    pub pending_enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub obstacles: Vec<Obstacle>,
    pub pending_obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub camera: Camera,
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, viewport: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            level_index: 0,
            score: 0,
            time: 0.0,
            level_start_time: 0.0,
            player: Player::new(player_start_pos()),
            enemies: Vec::new(),
            pending_enemies: Vec::new(),
            bullets: Vec::new(),
            obstacles: Vec::new(),
            pending_obstacles: Vec::new(),
            particles: Vec::new(),
            camera: Camera::new(viewport),
            events: Vec::new(),
        }
    }

    /// Clear transient entities and pre-generate the level's spawn
    /// schedule. Score and accumulated time carry across levels.
    pub fn reset_level(&mut self, level_index: usize, config: &LevelConfig) {
        log::info!(
            "level {} '{}': {}s, {:.0}px of scrap to cross",
            level_index,
            config.name,
            config.duration_secs,
            config.total_distance()
        );
        self.level_index = level_index;
        self.level_start_time = self.time;
        self.player = Player::new(player_start_pos());
        self.bullets.clear();
        self.enemies.clear();
        self.obstacles.clear();
        self.particles.clear();
        let (enemies, obstacles) = spawn::pre_generate(config, &mut self.rng);
        self.pending_enemies = enemies;
        self.pending_obstacles = obstacles;
        let top = -config.total_distance() - self.camera.viewport.y;
        self.camera.set_vertical_bounds(top, self.camera.viewport.y);
        self.camera.follow(self.player.body.center());
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Message(config.name.clone()));
    }

    #[inline]
    pub fn level_elapsed(&self) -> f64 {
        self.time - self.level_start_time
    }

    /// Active plus not-yet-activated enemies
    pub fn remaining_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.body.active).count() + self.pending_enemies.len()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the tick's events to the caller, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Bottom-center of the lane, just above the start line
fn player_start_pos() -> Vec2 {
    Vec2::new(LANE_CENTER_X - PLAYER_WIDTH / 2.0, -PLAYER_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelSet;

    fn viewport() -> Vec2 {
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    #[test]
    fn same_seed_same_schedule() {
        let levels = LevelSet::builtin();
        let config = levels.get(0);
        let mut a = GameState::new(42, viewport());
        let mut b = GameState::new(42, viewport());
        a.reset_level(0, config);
        b.reset_level(0, config);
        assert_eq!(a.pending_enemies.len(), b.pending_enemies.len());
        for (ea, eb) in a.pending_enemies.iter().zip(&b.pending_enemies) {
            assert_eq!(ea.kind, eb.kind);
            assert_eq!(ea.body.pos, eb.body.pos);
        }
    }

    #[test]
    fn reset_level_clears_transients_but_keeps_score() {
        let levels = LevelSet::builtin();
        let mut state = GameState::new(7, viewport());
        state.reset_level(0, levels.get(0));
        state.score = 1500;
        state.bullets.push(
            state
                .player
                .try_shoot(0.0)
                .expect("fresh player can shoot"),
        );
        state.reset_level(1, levels.get(1));
        assert_eq!(state.score, 1500);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn drain_events_empties_queue() {
        let mut state = GameState::new(1, viewport());
        state.push_event(GameEvent::Message("scrap ahead".into()));
        let drained = state.drain_events();
        assert_eq!(drained.len(), 1);
        assert!(state.events.is_empty());
    }
}
