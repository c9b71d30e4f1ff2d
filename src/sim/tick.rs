//! Per-frame simulation step
//!
//! A tick runs fixed stages in a fixed order: input, movement, firing,
//! bullet flight, particles, spawn activation, collision, cleanup, and
//! finally win/loss checks. Callers own the loop and the clock; the
//! simulation only ever sees a pre-clamped `dt`.

use crate::consts::*;
use crate::levels::{LevelConfig, ScrollMode};
use crate::sim::collision;
use crate::sim::spawn;
use crate::sim::state::{GameEvent, GamePhase, GameState};

/// Player intent for one frame, sampled by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Lateral steering: -1 left, 0 neutral, 1 right
    pub steer: i8,
    /// Vertical movement in free-scroll levels: -1 forward, 1 back
    pub advance: i8,
    pub shoot: bool,
    /// Edge-triggered pause toggle
    pub pause: bool,
}

/// Advance the simulation by `dt` seconds
pub fn tick(state: &mut GameState, config: &LevelConfig, input: TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.push_event(GameEvent::Message("paused".into()));
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
            }
            _ => {}
        }
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time += dt as f64;
    let now = state.time;

    // input and movement
    state.player.steer(input.steer);
    match config.scroll_mode {
        ScrollMode::AutoForward => state.player.auto_forward(),
        ScrollMode::Free => state.player.advance(input.advance),
    }
    state.player.update(dt);
    state.camera.follow(state.player.body.center());
    state.camera.update_shake(dt);

    // firing
    if input.shoot {
        if let Some(bullet) = state.player.try_shoot(now) {
            state.bullets.push(bullet);
        }
    }

    // enemies: distance gate first, then movement and turret fire
    let mut enemy_shots = Vec::new();
    for enemy in &mut state.enemies {
        enemy.refresh_invulnerability(Some(&state.player));
        enemy.update(dt);
        if let Some(bullet) = enemy.try_shoot(&state.player, &state.camera, now) {
            enemy_shots.push(bullet);
        }
    }
    state.bullets.append(&mut enemy_shots);

    // bullet flight
    let view = state.camera.view_rect();
    for bullet in &mut state.bullets {
        bullet.update(dt, &view);
    }

    // particles
    for particle in &mut state.particles {
        particle.update(dt);
    }
    state.particles.retain(|p| p.alive());

    spawn::activate_pending(state);
    collision::resolve(state, now);

    // cleanup
    state.bullets.retain(|b| b.body.active);
    state.enemies.retain(|e| e.body.active);
    state.obstacles.retain(|o| o.body.active);

    // win/loss
    if !state.player.body.active {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver { won: false });
        log::info!("player destroyed at {:.1}s, final score {}", now, state.score);
    } else if state.level_elapsed() >= config.duration_secs {
        state.phase = GamePhase::LevelComplete;
        state.push_event(GameEvent::LevelComplete {
            level: state.level_index,
        });
        log::info!(
            "level {} complete, score {} with {} enemies left behind",
            state.level_index,
            state.score,
            state.remaining_enemies()
        );
    }
}
