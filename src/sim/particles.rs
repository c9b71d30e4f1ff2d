//! Transient visual particles for explosions and bullet impacts

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Hard cap on live particles; the oldest is evicted when full
pub const MAX_PARTICLES: usize = 256;

const EXPLOSION_COUNT: usize = 12;
const EXPLOSION_LIFETIME: f32 = 0.8;
const SPARK_COUNT: usize = 6;
const SPARK_LIFETIME: f32 = 0.4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
    pub lifetime: f32,
    pub size: f32,
    /// Packed 0xRRGGBB
    pub color: u32,
}

impl Particle {
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.age += dt;
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.age < self.lifetime
    }

    /// Linear fade-out over the particle's lifetime
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

fn push(particles: &mut Vec<Particle>, p: Particle) {
    if particles.len() >= MAX_PARTICLES {
        // evict the oldest
        if let Some(idx) = particles
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.age.total_cmp(&b.age))
            .map(|(i, _)| i)
        {
            particles.swap_remove(idx);
        }
    }
    particles.push(p);
}

/// Radial burst for a destroyed enemy or obstacle
pub fn spawn_explosion(particles: &mut Vec<Particle>, rng: &mut Pcg32, center: Vec2, color: u32) {
    for i in 0..EXPLOSION_COUNT {
        let angle = TAU * i as f32 / EXPLOSION_COUNT as f32;
        let speed = rng.random_range(50.0..250.0);
        push(
            particles,
            Particle {
                pos: center,
                vel: Vec2::from_angle(angle) * speed,
                age: 0.0,
                lifetime: EXPLOSION_LIFETIME,
                size: rng.random_range(6.0..14.0),
                color,
            },
        );
    }
}

/// Small scatter where a bullet struck something that survived
pub fn spawn_hit_sparks(particles: &mut Vec<Particle>, rng: &mut Pcg32, at: Vec2, color: u32) {
    for _ in 0..SPARK_COUNT {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(80.0..200.0);
        push(
            particles,
            Particle {
                pos: at,
                vel: Vec2::from_angle(angle) * speed,
                age: 0.0,
                lifetime: SPARK_LIFETIME,
                size: rng.random_range(3.0..7.0),
                color,
            },
        );
    }
}
