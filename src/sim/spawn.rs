//! Pre-generated spawn scheduling
//!
//! The whole level's enemy and obstacle layout is rolled up front from
//! the seeded RNG, then entities sit in a pending list until the player
//! scrolls close enough. This keeps runs reproducible and makes frame
//! cost independent of level length.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::levels::{kind_index, LevelConfig};
use crate::sim::enemy::{Enemy, EnemyKind};
use crate::sim::entity::Obstacle;
use crate::sim::state::GameState;

/// Spawn density ramps up as the player pushes deeper: a four-segment
/// piecewise-linear curve over level progress
pub fn density_multiplier(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
    if p < 0.2 {
        lerp(0.3, 0.7, p / 0.2)
    } else if p < 0.5 {
        lerp(0.7, 1.5, (p - 0.2) / 0.3)
    } else if p < 0.8 {
        lerp(1.5, 2.3, (p - 0.5) / 0.3)
    } else {
        lerp(2.3, 3.0, (p - 0.8) / 0.2)
    }
}

/// Roll the complete spawn layout for a level. Entities come back
/// inactive, ordered front-to-back by world depth.
pub fn pre_generate(config: &LevelConfig, rng: &mut Pcg32) -> (Vec<Enemy>, Vec<Obstacle>) {
    let total_distance = config.total_distance();
    let mut enemies = Vec::new();
    let mut obstacles = Vec::new();
    let mut spawned_per_kind = [0usize; 3];

    let mut depth = config.row_spacing;
    while depth < total_distance {
        let progress = depth / total_distance;
        let density = density_multiplier(progress);

        let brute_available = spawned_per_kind[kind_index(EnemyKind::Brute)]
            < config.cap_for(EnemyKind::Brute);
        let heavy_row = brute_available && rng.random::<f32>() < config.heavy_row_chance;
        // heavy rows are shorter so brutes do not wall off the lane
        let max_row = if heavy_row { 2 } else { 3 };

        let base = rng.random_range(1..=3) as f32;
        let count = ((base * density).floor() as usize).clamp(1, max_row);

        let mut row_rects: Vec<(Vec2, Vec2)> = Vec::new();
        for _ in 0..count {
            let Some(kind) = pick_kind(config, rng, &spawned_per_kind, heavy_row) else {
                break;
            };
            if let Some(pos) = place_in_row(rng, kind.size(), depth, &row_rects) {
                row_rects.push((pos + kind.size() / 2.0, kind.size()));
                spawned_per_kind[kind_index(kind)] += 1;
                enemies.push(Enemy::new(kind, pos));
            } else {
                log::debug!("no room for {kind:?} at depth {depth:.0}, skipping");
            }
        }

        if rng.random::<f32>() < config.obstacle_row_chance {
            let size = Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT);
            if let Some(pos) = place_in_row(rng, size, depth, &row_rects) {
                // every fifth pile or so is welded scrap that bullets
                // cannot clear
                let mut obstacle = if rng.random::<f32>() < 0.2 {
                    Obstacle::wreck(pos)
                } else {
                    Obstacle::junk_pile(pos)
                };
                obstacle.body.active = false;
                obstacles.push(obstacle);
            }
        }

        depth += config.row_spacing;
    }

    for enemy in &mut enemies {
        enemy.body.active = false;
    }
    log::info!(
        "pre-generated {} enemies, {} obstacles over {:.0}px",
        enemies.len(),
        obstacles.len(),
        total_distance
    );
    (enemies, obstacles)
}

/// Weighted pick among kinds that still have cap headroom. Heavy kinds
/// are excluded outside heavy rows.
fn pick_kind(
    config: &LevelConfig,
    rng: &mut Pcg32,
    spawned: &[usize; 3],
    heavy_row: bool,
) -> Option<EnemyKind> {
    let candidates: Vec<EnemyKind> = EnemyKind::ALL
        .into_iter()
        .filter(|k| (heavy_row || !k.is_heavy()) && spawned[kind_index(*k)] < config.cap_for(*k))
        .collect();
    let total: f32 = candidates.iter().map(|k| config.weight_for(*k)).sum();
    if candidates.is_empty() || total <= 0.0 {
        return None;
    }
    let mut roll = rng.random_range(0.0..total);
    for kind in &candidates {
        roll -= config.weight_for(*kind);
        if roll <= 0.0 {
            return Some(*kind);
        }
    }
    candidates.last().copied()
}

/// Find a lane position at the given depth that keeps clear of every
/// rect already placed in the row. Gives up after a fixed number of
/// attempts.
fn place_in_row(
    rng: &mut Pcg32,
    size: Vec2,
    depth: f32,
    placed: &[(Vec2, Vec2)],
) -> Option<Vec2> {
    for _ in 0..SPAWN_MAX_ATTEMPTS {
        let x = (LANE_CENTER_X + (rng.random::<f32>() - 0.5) * SPAWN_X_SPREAD - size.x / 2.0)
            .clamp(LANE_LEFT, LANE_RIGHT - size.x);
        let y = -depth + rng.random::<f32>() * SPAWN_ROW_JITTER;
        let pos = Vec2::new(x, y);
        let center = pos + size / 2.0;
        let clear = placed.iter().all(|(other_center, other_size)| {
            let min_dist = (size.x + other_size.x) / 2.0 + SPAWN_MIN_PADDING;
            center.distance(*other_center) >= min_dist
        });
        if clear {
            return Some(pos);
        }
    }
    None
}

/// Move pending spawns into the live world once the player is within
/// activation range. Distance is measured along the scroll axis.
pub fn activate_pending(state: &mut GameState) {
    let threshold = state.camera.viewport.y * SPAWN_ACTIVATION_FACTOR;
    let player_y = state.player.body.center().y;

    let mut i = 0;
    while i < state.pending_enemies.len() {
        if player_y - state.pending_enemies[i].body.center().y <= threshold {
            let mut enemy = state.pending_enemies.swap_remove(i);
            enemy.body.active = true;
            state.enemies.push(enemy);
        } else {
            i += 1;
        }
    }

    let mut i = 0;
    while i < state.pending_obstacles.len() {
        if player_y - state.pending_obstacles[i].body.center().y <= threshold {
            let mut obstacle = state.pending_obstacles.swap_remove(i);
            obstacle.body.active = true;
            state.obstacles.push(obstacle);
        } else {
            i += 1;
        }
    }
}
