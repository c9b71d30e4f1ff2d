//! Scrolling viewport camera with screen shake
//!
//! The camera stays horizontally pinned to the lane center and snaps
//! vertically to its follow target, clamped against the level bounds.
//! Shake is a decaying random jitter applied at render time only; it
//! never moves the simulation-space view rectangle.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::LANE_CENTER_X;
use crate::sim::rect::Rect;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Center of the view in world space
    pub pos: Vec2,
    pub viewport: Vec2,
    /// Vertical clamp range for the view center, if any
    pub bounds: Option<(f32, f32)>,
    shake_intensity: f32,
    shake_duration: f32,
    shake_elapsed: f32,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            pos: Vec2::new(LANE_CENTER_X, 0.0),
            viewport,
            bounds: None,
            shake_intensity: 0.0,
            shake_duration: 0.0,
            shake_elapsed: 0.0,
        }
    }

    /// Restrict the view center so the level edges never scroll past
    pub fn set_vertical_bounds(&mut self, top: f32, bottom: f32) {
        let half = self.viewport.y / 2.0;
        let min = top + half;
        let max = bottom - half;
        if min <= max {
            self.bounds = Some((min, max));
        } else {
            self.bounds = None;
        }
    }

    /// Snap to the follow target. No easing: the player is the anchor
    /// of the scene and lag would read as input latency.
    pub fn follow(&mut self, target: Vec2) {
        self.pos.x = LANE_CENTER_X;
        self.pos.y = target.y;
        if let Some((min, max)) = self.bounds {
            self.pos.y = self.pos.y.clamp(min, max);
        }
    }

    /// World-space rectangle currently visible
    pub fn view_rect(&self) -> Rect {
        Rect::from_center(self.pos, self.viewport)
    }

    /// Inclusive visibility test: an entity touching the view edge
    /// still counts as visible
    pub fn is_in_view(&self, rect: &Rect) -> bool {
        let view = self.view_rect();
        rect.right() >= view.left()
            && rect.left() <= view.right()
            && rect.bottom() >= view.top()
            && rect.top() <= view.bottom()
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - (self.pos - self.viewport / 2.0)
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + (self.pos - self.viewport / 2.0)
    }

    /// Start a shake, replacing any shake in progress
    pub fn start_shake(&mut self, intensity: f32, duration: f32) {
        self.shake_intensity = intensity;
        self.shake_duration = duration;
        self.shake_elapsed = 0.0;
    }

    pub fn update_shake(&mut self, dt: f32) {
        if self.shake_duration > 0.0 {
            self.shake_elapsed += dt;
            if self.shake_elapsed >= self.shake_duration {
                self.shake_intensity = 0.0;
                self.shake_duration = 0.0;
                self.shake_elapsed = 0.0;
            }
        }
    }

    /// Linearly decayed shake amplitude
    pub fn current_intensity(&self) -> f32 {
        if self.shake_duration <= 0.0 {
            return 0.0;
        }
        self.shake_intensity * (1.0 - self.shake_elapsed / self.shake_duration)
    }

    /// Random per-frame render offset within the current amplitude
    pub fn shake_offset(&self, rng: &mut Pcg32) -> Vec2 {
        let i = self.current_intensity();
        if i <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            rng.random_range(-i / 2.0..i / 2.0),
            rng.random_range(-i / 2.0..i / 2.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn camera() -> Camera {
        Camera::new(Vec2::new(1440.0, 1080.0))
    }

    #[test]
    fn follow_pins_x_and_snaps_y() {
        let mut cam = camera();
        cam.follow(Vec2::new(999.0, -4200.0));
        assert_eq!(cam.pos.x, LANE_CENTER_X);
        assert_eq!(cam.pos.y, -4200.0);
    }

    #[test]
    fn follow_clamps_to_bounds() {
        let mut cam = camera();
        cam.set_vertical_bounds(-10_000.0, 0.0);
        cam.follow(Vec2::new(0.0, 100.0));
        assert_eq!(cam.pos.y, -540.0);
        cam.follow(Vec2::new(0.0, -20_000.0));
        assert_eq!(cam.pos.y, -9460.0);
    }

    #[test]
    fn degenerate_bounds_are_ignored() {
        let mut cam = camera();
        // level shorter than one viewport
        cam.set_vertical_bounds(-500.0, 0.0);
        assert!(cam.bounds.is_none());
    }

    #[test]
    fn edge_touch_counts_as_visible() {
        let cam = camera();
        let view = cam.view_rect();
        let on_edge = Rect::new(view.left() - 50.0, view.top(), 50.0, 50.0);
        assert!(cam.is_in_view(&on_edge));
        let past_edge = Rect::new(view.left() - 51.0, view.top(), 50.0, 50.0);
        assert!(!cam.is_in_view(&past_edge));
    }

    #[test]
    fn world_screen_round_trip() {
        let mut cam = camera();
        cam.follow(Vec2::new(0.0, -3000.0));
        let w = Vec2::new(812.0, -3120.0);
        assert_eq!(cam.screen_to_world(cam.world_to_screen(w)), w);
    }

    #[test]
    fn shake_decays_then_stops() {
        let mut cam = camera();
        cam.start_shake(16.0, 0.3);
        assert_eq!(cam.current_intensity(), 16.0);
        cam.update_shake(0.15);
        assert!((cam.current_intensity() - 8.0).abs() < 1e-4);
        cam.update_shake(0.2);
        assert_eq!(cam.current_intensity(), 0.0);
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(cam.shake_offset(&mut rng), Vec2::ZERO);
    }

    #[test]
    fn new_shake_replaces_old() {
        let mut cam = camera();
        cam.start_shake(16.0, 0.3);
        cam.update_shake(0.2);
        cam.start_shake(8.0, 0.3);
        assert_eq!(cam.current_intensity(), 8.0);
    }

    #[test]
    fn shake_offset_stays_within_amplitude() {
        let mut cam = camera();
        cam.start_shake(16.0, 0.3);
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..100 {
            let o = cam.shake_offset(&mut rng);
            assert!(o.x.abs() <= 8.0);
            assert!(o.y.abs() <= 8.0);
        }
    }
}
