//! Enemy archetypes and behavior
//!
//! Three kinds roam the junkyard: raiders rush the player on contact,
//! turrets fire aimed shots from range, and brutes soak damage and hit
//! hard. All stats are per-kind constants; an enemy's kind fully
//! determines its combat profile.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::camera::Camera;
use crate::sim::entity::{Body, Bullet, Owner, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast melee attacker
    Raider,
    /// Stationary ranged attacker
    Turret,
    /// Slow heavy melee attacker
    Brute,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Raider, EnemyKind::Turret, EnemyKind::Brute];

    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Raider => Vec2::new(220.0, 250.0),
            EnemyKind::Turret => Vec2::new(400.0, 260.0),
            EnemyKind::Brute => Vec2::new(350.0, 350.0),
        }
    }

    pub fn max_health(self) -> f32 {
        match self {
            EnemyKind::Raider => 30.0,
            EnemyKind::Turret => 50.0,
            EnemyKind::Brute => 100.0,
        }
    }

    pub fn damage(self) -> f32 {
        match self {
            EnemyKind::Raider => 10.0,
            EnemyKind::Turret => 15.0,
            EnemyKind::Brute => 25.0,
        }
    }

    /// Minimum seconds between attacks
    pub fn attack_cooldown(self) -> f64 {
        match self {
            EnemyKind::Raider => 1.0,
            EnemyKind::Turret => 2.0,
            EnemyKind::Brute => 1.5,
        }
    }

    pub fn is_ranged(self) -> bool {
        matches!(self, EnemyKind::Turret)
    }

    /// Heavy enemies are capped at two per spawn row
    pub fn is_heavy(self) -> bool {
        matches!(self, EnemyKind::Brute)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub health: f32,
    pub max_health: f32,
    /// Recomputed every frame from distance to the player
    pub invulnerable: bool,
    pub last_attack_time: f64,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, kind.size()),
            kind,
            health: kind.max_health(),
            max_health: kind.max_health(),
            invulnerable: true,
            last_attack_time: f64::NEG_INFINITY,
        }
    }

    /// Distance-gated invulnerability. An enemy far from the player
    /// cannot be damaged; the flag flips back and forth freely as the
    /// distance crosses the threshold (no hysteresis).
    pub fn refresh_invulnerability(&mut self, player: Option<&Player>) {
        self.invulnerable = match player {
            Some(p) if p.body.active => {
                self.body.center().distance(p.body.center()) > ENEMY_INVULN_DISTANCE
            }
            _ => true,
        };
    }

    /// Apply damage, returning true if this hit killed the enemy.
    /// An invulnerable enemy absorbs nothing, but the bullet is still
    /// consumed by the caller.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.body.active || self.invulnerable {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.body.destroy();
            return true;
        }
        false
    }

    pub fn can_attack(&self, now: f64) -> bool {
        now - self.last_attack_time >= self.kind.attack_cooldown()
    }

    pub fn update(&mut self, dt: f32) {
        if !self.body.active {
            return;
        }
        self.body.integrate(dt);
    }

    /// Ranged attack: turrets fire an aimed bullet at the player, but
    /// only while on screen and off cooldown
    pub fn try_shoot(&mut self, target: &Player, camera: &Camera, now: f64) -> Option<Bullet> {
        if !self.body.active
            || !self.kind.is_ranged()
            || !target.body.active
            || !self.can_attack(now)
            || !camera.is_in_view(&self.body.rect())
        {
            return None;
        }
        self.last_attack_time = now;
        let size = Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT);
        let muzzle = Vec2::new(
            self.body.center().x - size.x / 2.0,
            self.body.pos.y + self.body.size.y,
        );
        let aim = (target.body.center() - self.body.center()).normalize_or_zero();
        Some(Bullet::new(
            muzzle,
            size,
            aim * ENEMY_BULLET_SPEED,
            Owner::Enemy,
            self.kind.damage(),
        ))
    }
}
