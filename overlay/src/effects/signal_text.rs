//! Text reveal animations.
//!
//! A [`SignalText`] owns one string and replays it either as a
//! typewriter (characters appear left to right behind a cursor) or as a
//! decode (the whole string is visible at once as scrambled glyphs that
//! resolve front-to-back over a fixed number of passes). Once settled,
//! the string occasionally flashes back into scrambled glyphs for a
//! single short pulse.
//!
//! Reveal progress is derived from elapsed time rather than tick counts,
//! so it is monotonic regardless of how unevenly the compositor ticks.

use std::time::{Duration, Instant};

use noisefloor_types::SignalTextConfig;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::surface::Surface;
use crate::utils::with_opacity;

use super::{Effect, FrameInput};

const TEXT_COLOR: [u8; 4] = [212, 212, 216, 255];
const GLITCH_COLOR: [u8; 4] = [248, 113, 113, 255];

/// How the string is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    /// One character per tick, with a trailing `_` cursor.
    Typewriter,
    /// Scrambled glyphs resolve in fixed-size chunks per pass.
    Decode,
}

pub struct SignalText {
    config: SignalTextConfig,
    rng: SmallRng,
    text: Vec<char>,
    mode: RevealMode,
    /// Hold-back before the first character shows.
    delay: Duration,
    x: f32,
    y: f32,
    size: f32,
    opacity: f32,
    epoch: Option<Instant>,
    last_step: Option<Instant>,
    revealed: usize,
    passes: usize,
    /// Scrambled stand-ins for unrevealed characters, re-rolled per pass.
    scramble: Vec<char>,
    next_glitch_roll: Option<Instant>,
    glitch_until: Option<Instant>,
}

impl SignalText {
    pub fn new(config: SignalTextConfig, text: &str, mode: RevealMode, delay: Duration) -> Self {
        Self::with_rng(config, text, mode, delay, SmallRng::from_os_rng())
    }

    pub fn with_rng(
        config: SignalTextConfig,
        text: &str,
        mode: RevealMode,
        delay: Duration,
        mut rng: SmallRng,
    ) -> Self {
        let text: Vec<char> = text.chars().collect();
        let scramble = scramble_all(&config, &text, &mut rng);
        Self {
            config,
            rng,
            text,
            mode,
            delay,
            x: 0.0,
            y: 0.0,
            size: 12.0,
            opacity: 1.0,
            epoch: None,
            last_step: None,
            revealed: 0,
            passes: 0,
            scramble,
            next_glitch_roll: None,
            glitch_until: None,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn sized(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn faded(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn is_settled(&self) -> bool {
        self.revealed >= self.text.len()
    }

    pub fn is_glitching(&self) -> bool {
        self.glitch_until.is_some()
    }

    /// Chunk of characters resolved per decode pass.
    fn chunk(&self) -> usize {
        self.text.len().div_ceil(self.config.decode_passes.max(1)).max(1)
    }

    fn step_period(&self) -> Duration {
        Duration::from_millis(match self.mode {
            RevealMode::Typewriter => self.config.type_ms,
            RevealMode::Decode => self.config.decode_ms,
        })
    }

    fn advance_step(&mut self) {
        match self.mode {
            RevealMode::Typewriter => {
                self.revealed = (self.revealed + 1).min(self.text.len());
            }
            RevealMode::Decode => {
                self.passes += 1;
                self.revealed = (self.passes * self.chunk()).min(self.text.len());
                if self.passes >= self.config.decode_passes {
                    self.revealed = self.text.len();
                }
                self.scramble = scramble_all(&self.config, &self.text, &mut self.rng);
            }
        }
    }

    fn tick_glitch(&mut self, now: Instant) {
        if let Some(until) = self.glitch_until
            && now >= until
        {
            self.glitch_until = None;
        }
        let period = Duration::from_millis(self.config.glitch_period_ms);
        let due = match self.next_glitch_roll {
            Some(at) => now >= at,
            None => {
                self.next_glitch_roll = Some(now + period);
                false
            }
        };
        if due {
            self.next_glitch_roll = Some(now + period);
            if self.glitch_until.is_none() && self.rng.random_bool(self.config.glitch_chance) {
                self.glitch_until = Some(now + Duration::from_millis(self.config.glitch_ms));
            }
        }
    }

    /// Current display string, or `None` while still inside the hold-back
    /// delay. A glitch pulse never changes this; it only shifts and tints
    /// the paint.
    pub fn rendered(&self) -> Option<String> {
        self.epoch?;
        if self.last_step.is_none() {
            return None;
        }
        if self.is_settled() {
            return Some(self.text.iter().collect());
        }
        match self.mode {
            RevealMode::Typewriter => {
                let mut out: String = self.text[..self.revealed].iter().collect();
                out.push('_');
                Some(out)
            }
            RevealMode::Decode => Some(
                self.text
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| {
                        if i < self.revealed || c == ' ' {
                            c
                        } else {
                            self.scramble[i]
                        }
                    })
                    .collect(),
            ),
        }
    }
}

fn scramble_all(config: &SignalTextConfig, text: &[char], rng: &mut SmallRng) -> Vec<char> {
    let glyphs: Vec<char> = config.decode_glyphs.chars().collect();
    text.iter()
        .map(|&c| {
            if c == ' ' || glyphs.is_empty() {
                c
            } else {
                glyphs[rng.random_range(0..glyphs.len())]
            }
        })
        .collect()
}

impl Effect for SignalText {
    fn update(&mut self, input: &FrameInput) {
        let epoch = *self.epoch.get_or_insert(input.now);
        let visible_at = epoch + self.delay;
        if input.now < visible_at {
            return;
        }
        if self.is_settled() {
            self.tick_glitch(input.now);
            return;
        }
        let period = self.step_period();
        let mut last = self.last_step.unwrap_or(visible_at);
        while input.now.duration_since(last) >= period && !self.is_settled() {
            last += period;
            self.advance_step();
        }
        self.last_step = Some(last);
        if self.is_settled() {
            // Pulses run on their own clock starting from the settle tick.
            self.next_glitch_roll =
                Some(input.now + Duration::from_millis(self.config.glitch_period_ms));
        }
    }

    fn paint(&mut self, surface: &mut Surface) {
        let Some(text) = self.rendered() else {
            return;
        };
        // A pulse shifts the settled text sideways and tints it; the
        // string itself is untouched.
        let (x, color) = if self.is_glitching() {
            (self.x + 2.0, with_opacity(GLITCH_COLOR, self.opacity))
        } else {
            (self.x, with_opacity(TEXT_COLOR, self.opacity))
        };
        surface.draw_text(&text, x, self.y, self.size, color);
    }

    fn detach(&mut self) {
        self.epoch = None;
        self.last_step = None;
        self.revealed = 0;
        self.passes = 0;
        self.next_glitch_roll = None;
        self.glitch_until = None;
    }
}

// ── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
#[path = "signal_text_tests.rs"]
mod signal_text_tests;
