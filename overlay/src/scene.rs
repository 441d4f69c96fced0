//! Scene composition.
//!
//! One [`Scene`] owns the pixel surface, the presence panel and two
//! effect stacks: a background stack painted under the panel and a
//! foreground stack painted over it. Paint order per frame is noise,
//! panel, headline text and readout, trail, then the pointer halo on
//! top.

use std::time::Duration;

use chrono::Utc;
use noisefloor_core::presence::{PresencePhase, ProfileSupplement};
use noisefloor_types::{CaptureConfig, EffectsConfig};
use tiny_skia::Color;

use crate::effects::{
    CoordinatesReadout, CursorDistortion, EffectStack, FrameInput, GlitchTrail, NoiseField,
    RevealMode, SignalText, Viewport,
};
use crate::panel::PresencePanel;
use crate::surface::Surface;

const BACKDROP: Color = Color::BLACK;
const HEADLINE: &str = "NOISEFLOOR";
const SUBLINE: &str = "PRESENCE UPLINK";
const MARGIN: f32 = 24.0;
const PANEL_WIDTH: f32 = 320.0;

pub struct Scene {
    surface: Surface,
    viewport: Viewport,
    background: EffectStack,
    panel: PresencePanel,
    foreground: EffectStack,
}

impl Scene {
    /// Build the surface, panel and both effect stacks. Returns `None`
    /// only if the surface dimensions are degenerate.
    pub fn new(effects: &EffectsConfig, capture: &CaptureConfig) -> Option<Self> {
        let surface = Surface::new(capture.width, capture.height)?;
        let viewport = Viewport { width: capture.width, height: capture.height };

        let mut background = EffectStack::new();
        background.attach(Box::new(NoiseField::new(effects.noise)));

        let panel_x = capture.width as f32 - PANEL_WIDTH - MARGIN;
        let panel = PresencePanel::new(panel_x.max(MARGIN), MARGIN, PANEL_WIDTH);

        let mut foreground = EffectStack::new();
        foreground.attach(Box::new(
            SignalText::new(
                effects.signal_text.clone(),
                HEADLINE,
                RevealMode::Typewriter,
                Duration::ZERO,
            )
            .at(MARGIN, MARGIN)
            .sized(22.0),
        ));
        foreground.attach(Box::new(
            SignalText::new(
                effects.signal_text.clone(),
                SUBLINE,
                RevealMode::Decode,
                Duration::from_millis(400),
            )
            .at(MARGIN, MARGIN + 32.0)
            .sized(11.0)
            .faded(0.7),
        ));
        foreground.attach(Box::new(
            CoordinatesReadout::new(effects.coordinates)
                .at(MARGIN, capture.height as f32 - MARGIN - 28.0),
        ));
        foreground.attach(Box::new(GlitchTrail::new(effects.trail.clone())));
        foreground.attach(Box::new(CursorDistortion::new(effects.distortion)));

        Some(Self { surface, viewport, background, panel, foreground })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn set_supplement(&mut self, supplement: Option<ProfileSupplement>) {
        self.panel.set_supplement(supplement);
    }

    /// Advance every effect for one tick.
    pub fn advance(&mut self, input: &FrameInput) {
        self.background.update(input);
        self.foreground.update(input);
    }

    /// Repaint the whole frame for the given presence phase.
    pub fn render(&mut self, phase: &PresencePhase) {
        self.surface.clear(BACKDROP);
        self.background.paint(&mut self.surface);
        let now_ms = Utc::now().timestamp_millis().max(0) as u64;
        self.panel.render(&mut self.surface, phase, now_ms);
        self.foreground.paint(&mut self.surface);
    }

    /// Detach every effect, resetting their private timers.
    pub fn teardown(&mut self) {
        self.background.detach_all();
        self.foreground.detach_all();
    }
}

// ── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn scene() -> Scene {
        Scene::new(&EffectsConfig::default(), &CaptureConfig::default())
            .expect("default capture dimensions are valid")
    }

    #[test]
    fn scene_matches_the_capture_dimensions() {
        let scene = scene();
        assert_eq!(scene.viewport(), Viewport { width: 960, height: 540 });
        assert_eq!(scene.surface().width(), 960);
    }

    #[test]
    fn full_frame_renders_without_fonts_or_pointer() {
        let mut scene = scene();
        let input = FrameInput::new(Instant::now(), scene.viewport());
        scene.advance(&input);
        scene.render(&PresencePhase::Connecting);
        let painted = scene
            .surface()
            .pixmap()
            .pixels()
            .iter()
            .filter(|p| p.alpha() != 0)
            .count();
        assert!(painted > 0);
    }

    #[test]
    fn teardown_empties_both_stacks() {
        let mut scene = scene();
        scene.teardown();
        assert!(scene.background.is_empty());
        assert!(scene.foreground.is_empty());
    }
}
