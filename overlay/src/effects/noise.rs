//! Full-viewport static noise field.
//!
//! The noise is generated into a reduced-resolution buffer and blitted
//! back up with nearest-neighbour filtering, which gives the chunky
//! CRT-static look and keeps the per-refresh cost at a sixteenth of the
//! viewport. The buffer refreshes on its own clock, independent of the
//! compositor tick rate.

use std::time::{Duration, Instant};

use noisefloor_types::NoiseConfig;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tiny_skia::{Pixmap, PremultipliedColorU8};

use crate::surface::Surface;

use super::{Effect, FrameInput};

pub struct NoiseField {
    config: NoiseConfig,
    rng: SmallRng,
    buffer: Option<Pixmap>,
    last_refresh: Option<Instant>,
}

impl NoiseField {
    pub fn new(config: NoiseConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    /// Construct with a caller-supplied generator. Tests use this to get
    /// deterministic pixels.
    pub fn with_rng(config: NoiseConfig, rng: SmallRng) -> Self {
        Self { config, rng, buffer: None, last_refresh: None }
    }

    fn refresh_period(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.config.fps.max(1.0))
    }

    fn buffer_size(&self, input: &FrameInput) -> (u32, u32) {
        let w = (input.viewport.width as f32 * self.config.scale).round() as u32;
        let h = (input.viewport.height as f32 * self.config.scale).round() as u32;
        (w.max(1), h.max(1))
    }

    fn regenerate(&mut self) {
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        let alpha = self.config.alpha;
        for pixel in buffer.pixels_mut() {
            // Greyscale static. Pixels are stored premultiplied, so each
            // channel is scaled by the (low) alpha before storage.
            let grey: u8 = self.rng.random_range(0..=255);
            let value = ((grey as u16 * alpha as u16) / 255) as u8;
            *pixel = PremultipliedColorU8::from_rgba(value, value, value, alpha)
                .unwrap_or(PremultipliedColorU8::TRANSPARENT);
        }
    }

    #[cfg(test)]
    fn buffer_bytes(&self) -> Option<Vec<u8>> {
        self.buffer.as_ref().map(|b| b.data().to_vec())
    }
}

impl Effect for NoiseField {
    fn update(&mut self, input: &FrameInput) {
        let (w, h) = self.buffer_size(input);
        let resized = match self.buffer.as_ref() {
            Some(buffer) => buffer.width() != w || buffer.height() != h,
            None => true,
        };
        if resized {
            self.buffer = Pixmap::new(w, h);
            self.regenerate();
            self.last_refresh = Some(input.now);
            return;
        }
        let due = match self.last_refresh {
            Some(at) => input.now.duration_since(at) >= self.refresh_period(),
            None => true,
        };
        if due {
            self.regenerate();
            self.last_refresh = Some(input.now);
        }
    }

    fn paint(&mut self, surface: &mut Surface) {
        if let Some(buffer) = self.buffer.as_ref() {
            surface.blit_pixelated(buffer, 1.0 / self.config.scale.max(f32::EPSILON));
        }
    }

    fn detach(&mut self) {
        self.buffer = None;
        self.last_refresh = None;
    }
}

// ── tests ───────────────────────────────────────────────────────────────
