//! Deterministic simulation module
//!
//! All gameplay logic lives here: entity state, per-frame updates,
//! collision resolution, enemy scheduling, and the viewport camera.
//! The module has no rendering or platform dependencies and is fully
//! deterministic given a seed and a sequence of tick inputs.

pub mod camera;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod particles;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use enemy::{Enemy, EnemyKind};
pub use entity::{Body, Bullet, Obstacle, Owner, Player};
pub use particles::Particle;
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{tick, TickInput};
