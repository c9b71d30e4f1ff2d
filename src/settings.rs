//! Session settings and preferences

use serde::{Deserialize, Serialize};

/// Player-facing preferences. Gameplay ignores these; they only gate
/// the feedback effects a front end renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on impacts
    pub screen_shake: bool,
    /// Particle effects (explosions, sparks)
    pub particles: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio (prep for later) ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Reduced motion (minimize shake and flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            particles: true,
            show_fps: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_overrides_shake() {
        let mut s = Settings::default();
        assert!(s.effective_screen_shake());
        s.reduced_motion = true;
        assert!(!s.effective_screen_shake());
        s.reduced_motion = false;
        s.screen_shake = false;
        assert!(!s.effective_screen_shake());
    }

    #[test]
    fn settings_round_trip_json() {
        let s = Settings {
            show_fps: true,
            master_volume: 0.5,
            ..Default::default()
        };
        let json = serde_json::to_string(&s).expect("serializes");
        let back: Settings = serde_json::from_str(&json).expect("parses");
        assert!(back.show_fps);
        assert_eq!(back.master_volume, 0.5);
    }
}
