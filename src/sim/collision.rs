//! Per-frame collision resolution
//!
//! Runs a fixed sequence of passes so damage ordering never depends on
//! entity insertion order:
//!   1. player bullets vs enemies
//!   2. player bullets vs obstacles
//!   3. enemy bullets vs the player
//!   4. enemy bodies vs the player
//!   5. obstacle bodies vs the player
//! A bullet is consumed by its first hit in a pass.

use crate::consts::*;
use crate::sim::entity::Owner;
use crate::sim::particles::{spawn_explosion, spawn_hit_sparks};
use crate::sim::state::{GameEvent, GameState};

const ENEMY_EXPLOSION_COLOR: u32 = 0xffa030;
const OBSTACLE_EXPLOSION_COLOR: u32 = 0x9a8f7a;
const SPARK_COLOR: u32 = 0xffe080;
const PLAYER_HIT_COLOR: u32 = 0xff4040;

/// Resolve all collisions for the current frame. `now` is accumulated
/// simulation time.
pub fn resolve(state: &mut GameState, now: f64) {
    let GameState {
        player,
        enemies,
        bullets,
        obstacles,
        particles,
        camera,
        rng,
        score,
        events,
        ..
    } = state;

    // pass 1: player bullets vs enemies
    for bullet in bullets.iter_mut() {
        if !bullet.body.active || bullet.owner != Owner::Player {
            continue;
        }
        for enemy in enemies.iter_mut() {
            if !enemy.body.active || !bullet.body.overlaps(&enemy.body) {
                continue;
            }
            bullet.body.destroy();
            if enemy.take_damage(bullet.damage) {
                *score += SCORE_PER_ENEMY;
                spawn_explosion(particles, rng, enemy.body.center(), ENEMY_EXPLOSION_COLOR);
                log::debug!("{:?} destroyed, score {}", enemy.kind, score);
            } else {
                spawn_hit_sparks(particles, rng, bullet.body.center(), SPARK_COLOR);
            }
            break;
        }
    }

    // pass 2: player bullets vs obstacles
    for bullet in bullets.iter_mut() {
        if !bullet.body.active || bullet.owner != Owner::Player {
            continue;
        }
        for obstacle in obstacles.iter_mut() {
            if !obstacle.body.active || !bullet.body.overlaps(&obstacle.body) {
                continue;
            }
            bullet.body.destroy();
            if obstacle.take_damage(bullet.damage) {
                *score += SCORE_PER_OBSTACLE;
                spawn_explosion(
                    particles,
                    rng,
                    obstacle.body.center(),
                    OBSTACLE_EXPLOSION_COLOR,
                );
            } else {
                spawn_hit_sparks(particles, rng, bullet.body.center(), SPARK_COLOR);
            }
            break;
        }
    }

    // pass 3: enemy bullets vs the player
    for bullet in bullets.iter_mut() {
        if !bullet.body.active
            || bullet.owner != Owner::Enemy
            || !player.body.active
            || !bullet.body.overlaps(&player.body)
        {
            continue;
        }
        bullet.body.destroy();
        let landed = !player.is_invulnerable();
        player.take_damage(bullet.damage);
        if landed {
            spawn_hit_sparks(particles, rng, bullet.body.center(), PLAYER_HIT_COLOR);
            camera.start_shake(HIT_SHAKE_INTENSITY, HIT_SHAKE_DURATION);
            events.push(GameEvent::ScreenShake {
                intensity: HIT_SHAKE_INTENSITY,
                duration: HIT_SHAKE_DURATION,
            });
        }
    }

    // pass 4: enemy bodies vs the player
    for enemy in enemies.iter_mut() {
        if !enemy.body.active
            || !player.body.active
            || !enemy.body.overlaps(&player.body)
            || !enemy.can_attack(now)
        {
            continue;
        }
        enemy.last_attack_time = now;
        let landed = !player.is_invulnerable();
        player.take_damage(enemy.kind.damage());
        if landed {
            spawn_hit_sparks(particles, rng, player.body.center(), PLAYER_HIT_COLOR);
            camera.start_shake(HIT_SHAKE_INTENSITY, HIT_SHAKE_DURATION);
            events.push(GameEvent::ScreenShake {
                intensity: HIT_SHAKE_INTENSITY,
                duration: HIT_SHAKE_DURATION,
            });
        }
    }

    // pass 5: obstacle bodies vs the player
    for obstacle in obstacles.iter_mut() {
        if !obstacle.body.active
            || !player.body.active
            || !obstacle.body.overlaps(&player.body)
            || !obstacle.can_damage(now)
        {
            continue;
        }
        obstacle.last_contact_time = now;
        let landed = !player.is_invulnerable();
        player.take_damage(obstacle.contact_damage);
        if landed {
            spawn_hit_sparks(particles, rng, player.body.center(), PLAYER_HIT_COLOR);
            camera.start_shake(HIT_SHAKE_INTENSITY, HIT_SHAKE_DURATION);
            events.push(GameEvent::ScreenShake {
                intensity: HIT_SHAKE_INTENSITY,
                duration: HIT_SHAKE_DURATION,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use crate::sim::entity::{Bullet, Obstacle};
    use glam::Vec2;

    fn state() -> GameState {
        let mut s = GameState::new(17, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
        s.phase = crate::sim::state::GamePhase::Playing;
        s
    }

    fn player_bullet_at(center: Vec2) -> Bullet {
        let size = Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT);
        Bullet::new(
            center - size / 2.0,
            size,
            Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            Owner::Player,
            PLAYER_BULLET_DAMAGE,
        )
    }

    fn vulnerable_enemy_at(kind: EnemyKind, center: Vec2) -> Enemy {
        let mut e = Enemy::new(kind, center - kind.size() / 2.0);
        e.invulnerable = false;
        e
    }

    #[test]
    fn bullet_is_consumed_by_first_enemy() {
        let mut s = state();
        let spot = Vec2::new(700.0, -2000.0);
        s.enemies.push(vulnerable_enemy_at(EnemyKind::Raider, spot));
        s.enemies.push(vulnerable_enemy_at(EnemyKind::Raider, spot));
        s.bullets.push(player_bullet_at(spot));

        resolve(&mut s, 0.0);

        assert!(!s.bullets[0].body.active);
        let damaged: Vec<f32> = s.enemies.iter().map(|e| e.health).collect();
        assert_eq!(damaged, vec![20.0, 30.0]);
    }

    #[test]
    fn kill_awards_score_and_explosion() {
        let mut s = state();
        let spot = Vec2::new(700.0, -2000.0);
        let mut enemy = vulnerable_enemy_at(EnemyKind::Raider, spot);
        enemy.health = PLAYER_BULLET_DAMAGE;
        s.enemies.push(enemy);
        s.bullets.push(player_bullet_at(spot));

        resolve(&mut s, 0.0);

        assert_eq!(s.score, SCORE_PER_ENEMY);
        assert!(!s.enemies[0].body.active);
        assert!(!s.particles.is_empty());
    }

    #[test]
    fn invulnerable_enemy_eats_the_bullet() {
        let mut s = state();
        let spot = Vec2::new(700.0, -2000.0);
        let mut enemy = vulnerable_enemy_at(EnemyKind::Raider, spot);
        enemy.invulnerable = true;
        s.enemies.push(enemy);
        s.bullets.push(player_bullet_at(spot));

        resolve(&mut s, 0.0);

        assert!(!s.bullets[0].body.active);
        assert_eq!(s.enemies[0].health, EnemyKind::Raider.max_health());
        assert_eq!(s.score, 0);
    }

    #[test]
    fn obstacle_kill_scores_less() {
        let mut s = state();
        let spot = Vec2::new(700.0, -2000.0);
        let mut obstacle = Obstacle::junk_pile(spot - Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT) / 2.0);
        obstacle.health = PLAYER_BULLET_DAMAGE;
        s.obstacles.push(obstacle);
        s.bullets.push(player_bullet_at(spot));

        resolve(&mut s, 0.0);

        assert_eq!(s.score, SCORE_PER_OBSTACLE);
        assert!(!s.obstacles[0].body.active);
    }

    #[test]
    fn enemy_bullet_hit_shakes_the_screen() {
        let mut s = state();
        let center = s.player.body.center();
        let size = Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT);
        s.bullets.push(Bullet::new(
            center - size / 2.0,
            size,
            Vec2::new(0.0, ENEMY_BULLET_SPEED),
            Owner::Enemy,
            15.0,
        ));

        resolve(&mut s, 0.0);

        assert_eq!(s.player.health, PLAYER_MAX_HEALTH - 15.0);
        assert!(s.player.is_invulnerable());
        assert!(s.camera.current_intensity() > 0.0);
        assert!(s
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::ScreenShake { .. })));
    }

    #[test]
    fn melee_contact_respects_attack_cooldown() {
        let mut s = state();
        let center = s.player.body.center();
        s.enemies
            .push(vulnerable_enemy_at(EnemyKind::Brute, center));

        resolve(&mut s, 0.0);
        assert_eq!(s.player.health, PLAYER_MAX_HEALTH - EnemyKind::Brute.damage());

        // invuln window has passed but the brute is still on cooldown
        s.player.invuln_timer = 0.0;
        resolve(&mut s, 1.0);
        assert_eq!(s.player.health, PLAYER_MAX_HEALTH - EnemyKind::Brute.damage());

        resolve(&mut s, 1.6);
        assert_eq!(
            s.player.health,
            PLAYER_MAX_HEALTH - 2.0 * EnemyKind::Brute.damage()
        );
    }

    #[test]
    fn invuln_window_blocks_obstacle_contact() {
        let mut s = state();
        let center = s.player.body.center();
        let mut obstacle = Obstacle::junk_pile(center - Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT) / 2.0);
        obstacle.body.active = true;
        s.obstacles.push(obstacle);
        s.player.invuln_timer = PLAYER_INVULN_SECS;

        resolve(&mut s, 0.0);
        assert_eq!(s.player.health, PLAYER_MAX_HEALTH);
        // cooldown was still consumed by the contact
        assert_eq!(s.obstacles[0].last_contact_time, 0.0);
    }
}
