//! Pointer-following distortion halo.
//!
//! A glow disc, a thin ring and full-length crosshair lines trail the
//! pointer on a low-pass filter. The filter factor applies per rendered
//! frame, so the halo tightens as the tick rate rises; the readout dims
//! to its resting opacity when the pointer stops moving.

use std::time::{Duration, Instant};

use noisefloor_types::DistortionConfig;

use crate::surface::Surface;
use crate::utils::with_opacity;

use super::{Effect, FrameInput};

const ACCENT: [u8; 4] = [34, 211, 238, 255];
const GLOW: [u8; 4] = [34, 211, 238, 46];
const RING: [u8; 4] = [34, 211, 238, 90];
const CROSSHAIR: [u8; 4] = [34, 211, 238, 26];

pub struct CursorDistortion {
    config: DistortionConfig,
    /// Low-pass filtered halo position. `None` until the pointer appears.
    smoothed: Option<(f32, f32)>,
    target: Option<(f32, f32)>,
    last_motion: Option<Instant>,
    opacity: f32,
}

impl CursorDistortion {
    pub fn new(config: DistortionConfig) -> Self {
        let opacity = config.resting_opacity;
        Self { config, smoothed: None, target: None, last_motion: None, opacity }
    }

    fn idle(&self, now: Instant) -> bool {
        match self.last_motion {
            Some(at) => now.duration_since(at) >= Duration::from_millis(self.config.idle_ms),
            None => true,
        }
    }

    #[cfg(test)]
    fn position(&self) -> Option<(f32, f32)> {
        self.smoothed
    }
}

impl Effect for CursorDistortion {
    fn update(&mut self, input: &FrameInput) {
        if let Some(pointer) = input.pointer {
            self.target = Some(pointer);
            if input.pointer_moved {
                self.last_motion = Some(input.now);
            }
        }
        let Some(target) = self.target else {
            return;
        };
        let ease = self.config.ease;
        self.smoothed = Some(match self.smoothed {
            // First sighting snaps; easing in from the origin would sweep
            // the halo across the viewport.
            None => target,
            Some((x, y)) => (x + (target.0 - x) * ease, y + (target.1 - y) * ease),
        });
        let wanted = if self.idle(input.now) {
            self.config.resting_opacity
        } else {
            self.config.active_opacity
        };
        self.opacity += (wanted - self.opacity) * ease;
    }

    fn paint(&mut self, surface: &mut Surface) {
        let Some((x, y)) = self.smoothed else {
            return;
        };
        surface.hline_gradient(y, with_opacity(CROSSHAIR, self.opacity));
        surface.vline_gradient(x, with_opacity(CROSSHAIR, self.opacity));
        surface.radial_glow(x, y, self.config.halo_radius, with_opacity(GLOW, self.opacity));
        surface.stroke_circle(x, y, self.config.ring_radius, 1.0, with_opacity(RING, self.opacity));
        surface.fill_circle(x, y, 2.0, with_opacity(ACCENT, self.opacity));
    }

    fn detach(&mut self) {
        self.smoothed = None;
        self.target = None;
        self.last_motion = None;
        self.opacity = self.config.resting_opacity;
    }
}

// ── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Viewport;

    fn input(now: Instant) -> FrameInput {
        FrameInput::new(now, Viewport { width: 960, height: 540 })
    }

    #[test]
    fn first_pointer_sighting_snaps_instead_of_easing() {
        let mut halo = CursorDistortion::new(DistortionConfig::default());
        halo.update(&input(Instant::now()).with_pointer(300.0, 200.0, true));
        assert_eq!(halo.position(), Some((300.0, 200.0)));
    }

    #[test]
    fn halo_eases_toward_the_pointer_per_frame() {
        let mut halo = CursorDistortion::new(DistortionConfig::default());
        let base = Instant::now();
        halo.update(&input(base).with_pointer(0.0, 0.0, true));
        halo.update(&input(base + Duration::from_millis(16)).with_pointer(100.0, 0.0, true));
        let (x, _) = halo.position().unwrap();
        assert!((x - 15.0).abs() < 0.001, "one step covers the ease fraction, got {x}");

        halo.update(&input(base + Duration::from_millis(32)).with_pointer(100.0, 0.0, false));
        let (x, _) = halo.position().unwrap();
        assert!((x - 27.75).abs() < 0.001, "second step compounds, got {x}");
    }

    #[test]
    fn opacity_settles_to_resting_after_the_idle_deadline() {
        let mut halo = CursorDistortion::new(DistortionConfig::default());
        let base = Instant::now();
        halo.update(&input(base).with_pointer(10.0, 10.0, true));
        for i in 1..100 {
            halo.update(&input(base + Duration::from_millis(i * 16)).with_pointer(10.0, 10.0, false));
        }
        assert!(
            (halo.opacity - 0.6).abs() < 0.01,
            "expected resting opacity, got {}",
            halo.opacity
        );
    }

    #[test]
    fn motion_restores_active_opacity() {
        let mut halo = CursorDistortion::new(DistortionConfig::default());
        let base = Instant::now();
        halo.update(&input(base).with_pointer(10.0, 10.0, true));
        for i in 1..100 {
            halo.update(&input(base + Duration::from_millis(i * 16)).with_pointer(10.0, 10.0, false));
        }
        let idle_opacity = halo.opacity;
        let resume = base + Duration::from_millis(1600);
        for i in 0..100 {
            let t = resume + Duration::from_millis(i * 16);
            halo.update(&input(t).with_pointer(10.0 + i as f32, 10.0, true));
        }
        assert!(halo.opacity > idle_opacity);
        assert!((halo.opacity - 1.0).abs() < 0.01);
    }

    #[test]
    fn halo_keeps_easing_after_the_pointer_leaves() {
        let mut halo = CursorDistortion::new(DistortionConfig::default());
        let base = Instant::now();
        halo.update(&input(base).with_pointer(0.0, 0.0, true));
        halo.update(&input(base + Duration::from_millis(16)).with_pointer(200.0, 0.0, true));
        let (before, _) = halo.position().unwrap();

        // Pointer gone; the halo still glides toward its last target.
        halo.update(&input(base + Duration::from_millis(32)));
        let (after, _) = halo.position().unwrap();
        assert!(after > before);
    }
}
