//! Glyph trail shed by pointer motion.
//!
//! Tokens live in a fixed-size pool addressed by a monotonic spawn
//! counter, so a burst of motion recycles the oldest slot instead of
//! growing a queue. Every token fades a fixed amount per tick and
//! shrinks as it fades.

use std::time::{Duration, Instant};

use noisefloor_types::TrailConfig;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::surface::Surface;
use crate::utils::with_opacity;

use super::{Effect, FrameInput};

const TOKEN_COLOR: [u8; 4] = [34, 211, 238, 255];
const BASE_SIZE: f32 = 14.0;

#[derive(Debug, Clone, Copy)]
struct Token {
    glyph: char,
    x: f32,
    y: f32,
    opacity: f32,
}

pub struct GlitchTrail {
    config: TrailConfig,
    rng: SmallRng,
    slots: Vec<Option<Token>>,
    /// Total tokens spawned; `spawned % capacity` picks the slot.
    spawned: u64,
    last_spawn: Option<Instant>,
}

impl GlitchTrail {
    pub fn new(config: TrailConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    pub fn with_rng(config: TrailConfig, rng: SmallRng) -> Self {
        let slots = vec![None; config.capacity.max(1)];
        Self { config, rng, slots, spawned: 0, last_spawn: None }
    }

    fn spawn_allowed(&self, now: Instant) -> bool {
        match self.last_spawn {
            Some(at) => now.duration_since(at) >= Duration::from_millis(self.config.throttle_ms),
            None => true,
        }
    }

    fn spawn(&mut self, now: Instant, x: f32, y: f32) {
        let glyphs: Vec<char> = self.config.glyphs.chars().collect();
        if glyphs.is_empty() {
            return;
        }
        let jitter = self.config.jitter;
        let token = Token {
            glyph: glyphs[self.rng.random_range(0..glyphs.len())],
            x: x + self.rng.random_range(-jitter..=jitter),
            y: y + self.rng.random_range(-jitter..=jitter),
            opacity: 1.0,
        };
        let slot = (self.spawned % self.slots.len() as u64) as usize;
        self.slots[slot] = Some(token);
        self.spawned += 1;
        self.last_spawn = Some(now);
    }

    fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl Effect for GlitchTrail {
    fn update(&mut self, input: &FrameInput) {
        if input.pointer_moved
            && let Some((x, y)) = input.pointer
            && self.spawn_allowed(input.now)
        {
            self.spawn(input.now, x, y);
        }
        let fade = self.config.fade_per_tick;
        for slot in &mut self.slots {
            if let Some(token) = slot {
                token.opacity -= fade;
                if token.opacity <= 0.0 {
                    *slot = None;
                }
            }
        }
    }

    fn paint(&mut self, surface: &mut Surface) {
        for token in self.slots.iter().flatten() {
            let size = BASE_SIZE * (0.5 + token.opacity * 0.5);
            let color = with_opacity(TOKEN_COLOR, token.opacity * 0.5);
            let mut glyph = [0u8; 4];
            surface.draw_text(token.glyph.encode_utf8(&mut glyph), token.x, token.y, size, color);
        }
    }

    fn detach(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.spawned = 0;
        self.last_spawn = None;
    }
}

// ── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{FrameInput, Viewport};

    fn trail() -> GlitchTrail {
        GlitchTrail::with_rng(TrailConfig::default(), SmallRng::seed_from_u64(11))
    }

    fn moved(now: Instant, x: f32, y: f32) -> FrameInput {
        FrameInput::new(now, Viewport { width: 960, height: 540 }).with_pointer(x, y, true)
    }

    #[test]
    fn spawns_are_throttled() {
        let mut trail = trail();
        let base = Instant::now();
        trail.update(&moved(base, 100.0, 100.0));
        trail.update(&moved(base + Duration::from_millis(40), 110.0, 100.0));
        assert_eq!(trail.live_count(), 1, "second move inside the throttle window");

        trail.update(&moved(base + Duration::from_millis(90), 120.0, 100.0));
        assert_eq!(trail.live_count(), 2);
    }

    #[test]
    fn pool_never_exceeds_capacity_and_recycles_the_oldest_slot() {
        let mut trail = trail();
        let base = Instant::now();
        for i in 0..13u64 {
            let at = base + Duration::from_millis(i * 100);
            trail.update(&moved(at, 500.0, i as f32 * 10.0));
        }
        assert_eq!(trail.spawned, 13);
        assert!(trail.live_count() <= 12);

        // The thirteenth spawn lands in slot 0, near the last pointer
        // position modulo jitter.
        let recycled = trail.slots[0].expect("slot 0 recycled");
        assert!((recycled.y - 120.0).abs() <= TrailConfig::default().jitter);
        assert!((recycled.opacity - 1.0).abs() < 0.05);
    }

    #[test]
    fn tokens_fade_out_and_free_their_slot() {
        let mut trail = trail();
        let base = Instant::now();
        trail.update(&moved(base, 100.0, 100.0));
        let idle = FrameInput::new(base, Viewport { width: 960, height: 540 });
        // 1.0 opacity at 0.04 per tick dies within 25 further ticks.
        for _ in 0..25 {
            trail.update(&idle);
        }
        assert_eq!(trail.live_count(), 0);
    }

    #[test]
    fn stationary_pointer_spawns_nothing() {
        let mut trail = trail();
        let base = Instant::now();
        let still = FrameInput::new(base, Viewport { width: 960, height: 540 })
            .with_pointer(100.0, 100.0, false);
        for _ in 0..10 {
            trail.update(&still);
        }
        assert_eq!(trail.live_count(), 0);
    }

    #[test]
    fn detach_clears_the_pool_and_counter() {
        let mut trail = trail();
        trail.update(&moved(Instant::now(), 100.0, 100.0));
        trail.detach();
        assert_eq!(trail.live_count(), 0);
        assert_eq!(trail.spawned, 0);
        assert!(trail.last_spawn.is_none());
    }
}
