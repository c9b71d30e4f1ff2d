//! Core entity types: bodies, the player, bullets, and junk obstacles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::rect::Rect;

/// Shared kinematic state for every entity in the world
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in world space
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            active: true,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Euler integration step
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Clamp horizontal position to the playable lane, zeroing any
    /// velocity that was pushing past the edge
    pub fn clamp_to_lane(&mut self) {
        let right_limit = LANE_RIGHT - self.size.x;
        if self.pos.x < LANE_LEFT {
            self.pos.x = LANE_LEFT;
            if self.vel.x < 0.0 {
                self.vel.x = 0.0;
            }
        } else if self.pos.x > right_limit {
            self.pos.x = right_limit;
            if self.vel.x > 0.0 {
                self.vel.x = 0.0;
            }
        }
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.rect().overlaps(&other.rect())
    }

    /// Idempotent: destroying an already inactive body is a no-op
    pub fn destroy(&mut self) {
        self.active = false;
    }
}

/// Which side fired a bullet. Bullets never hit their own side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub owner: Owner,
    pub damage: f32,
    /// Fixed launch point; flight range is measured from here, not the
    /// current position, so fast frames cannot extend the range
    pub origin: Vec2,
    pub max_range: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2, owner: Owner, damage: f32) -> Self {
        let max_range = vel.length() * BULLET_MAX_FLIGHT_SECS;
        Self {
            body: Body {
                pos,
                size,
                vel,
                active: true,
            },
            owner,
            damage,
            origin: pos,
            max_range,
        }
    }

    /// Advance one frame, deactivating on range exhaustion or when far
    /// outside the camera view
    pub fn update(&mut self, dt: f32, view: &Rect) {
        if !self.body.active {
            return;
        }
        self.body.integrate(dt);
        if self.body.pos.distance(self.origin) >= self.max_range {
            self.body.destroy();
            return;
        }
        if !view
            .expand(BULLET_BOUNDS_MARGIN)
            .overlaps(&self.body.rect())
        {
            self.body.destroy();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub health: f32,
    pub max_health: f32,
    pub move_speed: f32,
    /// Seconds between shots
    pub fire_interval: f64,
    pub last_fire_time: f64,
    /// Counts down after taking a hit; damage is ignored while positive
    pub invuln_timer: f32,
    /// Unit fire direction; up the lane unless a mode changes it
    pub facing: Vec2,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            move_speed: PLAYER_MOVE_SPEED,
            fire_interval: PLAYER_FIRE_INTERVAL,
            last_fire_time: f64::NEG_INFINITY,
            invuln_timer: 0.0,
            facing: Vec2::new(0.0, -1.0),
        }
    }

    /// Set horizontal velocity from a steer direction (-1, 0, 1)
    pub fn steer(&mut self, dir: i8) {
        self.body.vel.x = dir.signum() as f32 * self.move_speed;
    }

    /// Constant upward scroll used in auto-forward levels
    pub fn auto_forward(&mut self) {
        self.body.vel.y = -PLAYER_FORWARD_SPEED;
    }

    /// Manual vertical movement for free-scroll levels: -1 moves up
    /// the lane (forward), 1 falls back
    pub fn advance(&mut self, dir: i8) {
        self.body.vel.y = dir.signum() as f32 * PLAYER_FORWARD_SPEED;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.body.active {
            return;
        }
        self.body.integrate(dt);
        self.body.clamp_to_lane();
        if self.invuln_timer > 0.0 {
            self.invuln_timer = (self.invuln_timer - dt).max(0.0);
        }
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }

    /// Fire a bullet if the cooldown has elapsed. `now` is accumulated
    /// simulation time in seconds.
    pub fn try_shoot(&mut self, now: f64) -> Option<Bullet> {
        if !self.body.active || now - self.last_fire_time < self.fire_interval {
            return None;
        }
        self.last_fire_time = now;
        let size = Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT);
        // Launch from top-center of the ship; bullets do not inherit
        // the ship's velocity
        let pos = Vec2::new(self.body.center().x - size.x / 2.0, self.body.pos.y - size.y);
        Some(Bullet::new(
            pos,
            size,
            self.facing * PLAYER_BULLET_SPEED,
            Owner::Player,
            PLAYER_BULLET_DAMAGE,
        ))
    }

    /// Apply damage, returning true if this hit was fatal. Hits during
    /// the invulnerability window are ignored entirely.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.body.active || self.is_invulnerable() {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.invuln_timer = PLAYER_INVULN_SECS;
        if self.health <= 0.0 {
            self.body.destroy();
            return true;
        }
        false
    }
}

/// Static junk pile blocking the lane
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Body,
    pub health: f32,
    pub contact_damage: f32,
    /// Indestructible obstacles shrug bullets off entirely
    pub destructible: bool,
    pub last_contact_time: f64,
}

impl Obstacle {
    pub fn junk_pile(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT)),
            health: OBSTACLE_HEALTH,
            contact_damage: OBSTACLE_CONTACT_DAMAGE,
            destructible: true,
            last_contact_time: f64::NEG_INFINITY,
        }
    }

    /// Welded hulk: blocks the lane and cannot be shot down
    pub fn wreck(pos: Vec2) -> Self {
        Self {
            destructible: false,
            ..Self::junk_pile(pos)
        }
    }

    /// Apply damage, returning true if the obstacle was destroyed
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.body.active || !self.destructible {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.body.destroy();
            return true;
        }
        false
    }

    /// Contact damage is rate limited per obstacle
    pub fn can_damage(&self, now: f64) -> bool {
        now - self.last_contact_time >= OBSTACLE_CONTACT_COOLDOWN
    }
}
