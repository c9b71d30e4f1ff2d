//! Scrap Runner - a vertical auto-scrolling junkyard shoot-'em-up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, game state)
//! - `engine`: Session wrapper (frame clock, level progression, HUD snapshots)
//! - `levels`: Data-driven level configuration
//! - `settings`: Session preferences

pub mod engine;
pub mod levels;
pub mod settings;
pub mod sim;

pub use engine::{Engine, EngineError, FrameClock, HudSnapshot};
pub use levels::{LevelConfig, LevelSet, ScrollMode};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Maximum frame delta fed to the simulation (guards against tab-background
    /// time jumps; anything longer is clamped to one 30 Hz frame)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Default canvas dimensions (world units are pixels, +y points down)
    pub const CANVAS_WIDTH: f32 = 1440.0;
    pub const CANVAS_HEIGHT: f32 = 1080.0;

    /// The play lane: the centered horizontal band actors may occupy
    pub const LANE_WIDTH: f32 = 720.0;
    pub const LANE_LEFT: f32 = (CANVAS_WIDTH - LANE_WIDTH) / 2.0;
    pub const LANE_RIGHT: f32 = LANE_LEFT + LANE_WIDTH;
    pub const LANE_CENTER_X: f32 = CANVAS_WIDTH / 2.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 280.0;
    pub const PLAYER_HEIGHT: f32 = 300.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_MOVE_SPEED: f32 = 600.0;
    /// Autonomous forward scroll runs at half the lateral speed
    pub const PLAYER_FORWARD_SPEED: f32 = PLAYER_MOVE_SPEED * 0.5;
    pub const PLAYER_FIRE_INTERVAL: f64 = 0.3;
    /// Post-damage invulnerability window (seconds)
    pub const PLAYER_INVULN_SECS: f32 = 1.0;

    /// Bullet defaults
    pub const PLAYER_BULLET_WIDTH: f32 = 40.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 80.0;
    pub const PLAYER_BULLET_SPEED: f32 = 2400.0;
    pub const PLAYER_BULLET_DAMAGE: f32 = 10.0;
    pub const ENEMY_BULLET_WIDTH: f32 = 30.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 50.0;
    pub const ENEMY_BULLET_SPEED: f32 = 1200.0;
    /// Range cutoff: a bullet dies once its displacement from the spawn
    /// origin reaches `speed * BULLET_MAX_FLIGHT_SECS`
    pub const BULLET_MAX_FLIGHT_SECS: f32 = 2.0;
    /// Generous margin around the viewport before off-screen bullets despawn
    pub const BULLET_BOUNDS_MARGIN: f32 = 1000.0;

    /// Enemies are invulnerable while farther than this from the player
    pub const ENEMY_INVULN_DISTANCE: f32 = 1800.0;

    /// Obstacle (junk pile) defaults
    pub const OBSTACLE_WIDTH: f32 = 200.0;
    pub const OBSTACLE_HEIGHT: f32 = 100.0;
    pub const OBSTACLE_HEALTH: f32 = 50.0;
    pub const OBSTACLE_CONTACT_DAMAGE: f32 = 20.0;
    /// Contact damage cooldown, distinct from enemy attack cooldowns
    pub const OBSTACLE_CONTACT_COOLDOWN: f64 = 0.5;

    /// Scoring
    pub const SCORE_PER_ENEMY: u64 = 100;
    pub const SCORE_PER_OBSTACLE: u64 = 50;

    /// Spawn pre-generation
    pub const SPAWN_ROW_SPACING: f32 = 300.0;
    pub const SPAWN_ROW_JITTER: f32 = 100.0;
    pub const SPAWN_X_SPREAD: f32 = 400.0;
    pub const SPAWN_MIN_PADDING: f32 = 50.0;
    pub const SPAWN_MAX_ATTEMPTS: u32 = 20;
    /// Pending spawns activate within this many viewport heights of the player
    pub const SPAWN_ACTIVATION_FACTOR: f32 = 1.5;

    /// Screen shake applied when the player takes a hit
    pub const HIT_SHAKE_INTENSITY: f32 = 16.0;
    pub const HIT_SHAKE_DURATION: f32 = 0.3;
}
