//! Session wrapper around the simulation
//!
//! The engine owns the game state, the level set, the frame clock, and
//! the player's settings. A front end drives it with wall-clock
//! timestamps and sampled input; the engine turns those into clamped
//! simulation ticks and hands back the events each frame produced.

use glam::Vec2;
use thiserror::Error;

use crate::consts::MAX_FRAME_DT;
use crate::levels::{ConfigError, LevelSet};
use crate::settings::Settings;
use crate::sim::state::{GameEvent, GamePhase, GameState};
use crate::sim::tick::{tick, TickInput};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Converts wall-clock timestamps into clamped frame deltas.
/// The first frame after a reset produces a zero delta so a long load
/// never turns into a simulation jump.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta in seconds since the previous call, clamped to one 30 Hz
    /// frame. `now` is a monotonic timestamp in seconds.
    pub fn delta(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now - last).clamp(0.0, MAX_FRAME_DT as f64),
            None => 0.0,
        };
        self.last = Some(now);
        dt as f32
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Read-only per-frame summary for HUD rendering
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub health: f32,
    pub max_health: f32,
    pub score: u64,
    pub level: usize,
    pub level_name: String,
    /// Seconds into the current level
    pub level_time: f64,
    /// 0..100, by time survived
    pub progress_pct: f32,
    pub enemies_remaining: usize,
}

#[derive(Debug)]
pub struct Engine {
    state: GameState,
    levels: LevelSet,
    settings: Settings,
    clock: FrameClock,
    viewport: Vec2,
}

impl Engine {
    pub fn new(
        viewport: Vec2,
        levels: LevelSet,
        settings: Settings,
        seed: u64,
    ) -> Result<Self, EngineError> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return Err(EngineError::InvalidViewport {
                width: viewport.x,
                height: viewport.y,
            });
        }
        if levels.is_empty() {
            return Err(ConfigError::Empty.into());
        }
        Ok(Self {
            state: GameState::new(seed, viewport),
            levels,
            settings,
            clock: FrameClock::new(),
            viewport,
        })
    }

    /// Begin the first level
    pub fn start(&mut self) {
        let config = self.levels.get(0).clone();
        self.state.reset_level(0, &config);
        self.clock.reset();
    }

    /// Advance by one frame and return the events it produced,
    /// filtered by the player's settings
    pub fn frame(&mut self, now: f64, input: TickInput) -> Vec<GameEvent> {
        let dt = self.clock.delta(now);
        let config = self.levels.get(self.state.level_index);
        tick(&mut self.state, config, input, dt);
        let mut events = self.state.drain_events();
        if !self.settings.effective_screen_shake() {
            events.retain(|e| !matches!(e, GameEvent::ScreenShake { .. }));
        }
        events
    }

    /// Move on after a `LevelComplete`. Past the last level the run is
    /// won and the session ends.
    pub fn advance_level(&mut self) {
        let next = self.state.level_index + 1;
        if next < self.levels.len() {
            let config = self.levels.get(next).clone();
            self.state.reset_level(next, &config);
            self.clock.reset();
        } else {
            self.state.phase = GamePhase::GameOver;
            self.state.push_event(GameEvent::GameOver { won: true });
            log::info!("campaign cleared, final score {}", self.state.score);
        }
    }

    /// Throw the run away and start over with a fresh seed
    pub fn restart(&mut self, seed: u64) {
        self.state = GameState::new(seed, self.viewport);
        self.start();
    }

    pub fn snapshot(&self) -> HudSnapshot {
        let config = self.levels.get(self.state.level_index);
        let elapsed = self.state.level_elapsed();
        HudSnapshot {
            health: self.state.player.health,
            max_health: self.state.player.max_health,
            score: self.state.score,
            level: self.state.level_index,
            level_name: config.name.clone(),
            level_time: elapsed,
            progress_pct: ((elapsed / config.duration_secs) as f32 * 100.0).clamp(0.0, 100.0),
            enemies_remaining: self.state.remaining_enemies(),
        }
    }

    /// Render-time camera jitter, zero when shake is disabled
    pub fn shake_offset(&mut self) -> Vec2 {
        if !self.settings.effective_screen_shake() {
            return Vec2::ZERO;
        }
        self.state.camera.shake_offset(&mut self.state.rng)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, MAX_FRAME_DT};

    fn engine() -> Engine {
        Engine::new(
            Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            LevelSet::builtin(),
            Settings::default(),
            1234,
        )
        .expect("valid construction")
    }

    #[test]
    fn rejects_degenerate_viewport() {
        let err = Engine::new(
            Vec2::new(0.0, 1080.0),
            LevelSet::builtin(),
            Settings::default(),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidViewport { .. }));
    }

    #[test]
    fn clock_seeds_on_first_frame() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(100.0), 0.0);
        let dt = clock.delta(100.016);
        assert!((dt - 0.016).abs() < 1e-4);
    }

    #[test]
    fn clock_clamps_long_gaps_and_backward_time() {
        let mut clock = FrameClock::new();
        clock.delta(0.0);
        assert_eq!(clock.delta(5.0), MAX_FRAME_DT);
        assert_eq!(clock.delta(4.0), 0.0);
    }

    #[test]
    fn frame_drives_the_simulation() {
        let mut e = engine();
        e.start();
        let y0 = e.state().player.body.pos.y;
        let mut now = 0.0;
        for _ in 0..60 {
            e.frame(now, TickInput::default());
            now += 1.0 / 60.0;
        }
        assert!(e.state().player.body.pos.y < y0);
        let hud = e.snapshot();
        assert!(hud.level_time > 0.9);
        assert_eq!(hud.level, 0);
        assert_eq!(hud.level_name, "Outer Heaps");
    }

    #[test]
    fn shake_events_filtered_when_disabled() {
        let mut e = engine();
        e.settings_mut().reduced_motion = true;
        e.start();
        e.state.push_event(GameEvent::ScreenShake {
            intensity: 16.0,
            duration: 0.3,
        });
        e.state.push_event(GameEvent::Message("ouch".into()));
        let events = e.frame(0.0, TickInput::default());
        assert!(events
            .iter()
            .all(|ev| !matches!(ev, GameEvent::ScreenShake { .. })));
        assert!(events
            .iter()
            .any(|ev| matches!(ev, GameEvent::Message(_))));
        assert_eq!(e.shake_offset(), Vec2::ZERO);
    }

    #[test]
    fn advancing_past_last_level_wins_the_run() {
        let mut e = engine();
        e.start();
        e.state.level_index = e.levels.len() - 1;
        e.advance_level();
        assert_eq!(e.state().phase, GamePhase::GameOver);
        let events = e.frame(0.0, TickInput::default());
        assert!(events
            .iter()
            .any(|ev| matches!(ev, GameEvent::GameOver { won: true })));
    }

    #[test]
    fn restart_resets_score_and_level() {
        let mut e = engine();
        e.start();
        e.state.score = 900;
        e.state.level_index = 1;
        e.restart(777);
        assert_eq!(e.state().score, 0);
        assert_eq!(e.state().level_index, 0);
        assert_eq!(e.state().phase, GamePhase::Playing);
    }
}
