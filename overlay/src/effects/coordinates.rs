//! Drifting coordinates readout with a UTC clock.
//!
//! Purely decorative: a fixed anchor position jitters by a fraction of a
//! degree on a slow cadence, next to a live UTC wall clock. The readout
//! holds back briefly after attach so it fades in with the rest of the
//! scene rather than popping.

use std::time::{Duration, Instant};

use chrono::Utc;
use noisefloor_types::CoordinatesConfig;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::surface::Surface;
use crate::utils::{formatting::format_coordinate, with_opacity};

use super::{Effect, FrameInput};

const READOUT_COLOR: [u8; 4] = [113, 113, 122, 255];

pub struct CoordinatesReadout {
    config: CoordinatesConfig,
    rng: SmallRng,
    x: f32,
    y: f32,
    size: f32,
    epoch: Option<Instant>,
    last_drift: Option<Instant>,
    lat: f64,
    lng: f64,
    visible: bool,
}

impl CoordinatesReadout {
    pub fn new(config: CoordinatesConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    pub fn with_rng(config: CoordinatesConfig, rng: SmallRng) -> Self {
        let (lat, lng) = (config.lat, config.lng);
        Self {
            config,
            rng,
            x: 0.0,
            y: 0.0,
            size: 11.0,
            epoch: None,
            last_drift: None,
            lat,
            lng,
            visible: false,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    fn drift(&mut self) {
        let spread = self.config.drift;
        self.lat = self.config.lat + self.rng.random_range(-spread..=spread);
        self.lng = self.config.lng + self.rng.random_range(-spread..=spread);
    }

    /// The coordinate half of the readout.
    pub fn coordinate_line(&self) -> String {
        format!(
            "{} {}",
            format_coordinate(self.lat, 'N', 'S'),
            format_coordinate(self.lng, 'E', 'W')
        )
    }

    fn clock_line() -> String {
        Utc::now().format("%H:%M:%S UTC").to_string()
    }
}

impl Effect for CoordinatesReadout {
    fn update(&mut self, input: &FrameInput) {
        let epoch = *self.epoch.get_or_insert(input.now);
        self.visible = input.now.duration_since(epoch)
            >= Duration::from_millis(self.config.show_delay_ms);
        if !self.visible {
            return;
        }
        let due = match self.last_drift {
            Some(at) => input.now.duration_since(at)
                >= Duration::from_millis(self.config.drift_ms),
            None => true,
        };
        if due {
            self.drift();
            self.last_drift = Some(input.now);
        }
    }

    fn paint(&mut self, surface: &mut Surface) {
        if !self.visible {
            return;
        }
        let color = with_opacity(READOUT_COLOR, 1.0);
        surface.draw_text(&self.coordinate_line(), self.x, self.y, self.size, color);
        surface.draw_text(&Self::clock_line(), self.x, self.y + self.size * 1.4, self.size, color);
    }

    fn detach(&mut self) {
        self.epoch = None;
        self.last_drift = None;
        self.lat = self.config.lat;
        self.lng = self.config.lng;
        self.visible = false;
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

    fn readout() -> CoordinatesReadout {
        CoordinatesReadout::with_rng(CoordinatesConfig::default(), SmallRng::seed_from_u64(5))
    }

    #[test]
    fn readout_is_hidden_inside_the_show_delay() {
        let mut readout = readout();
        let base = Instant::now();
        readout.update(&input(base));
        assert!(!readout.visible);
        readout.update(&input(base + Duration::from_millis(200)));
        assert!(readout.visible);
    }

    #[test]
    fn coordinates_drift_on_their_cadence_and_stay_near_the_anchor() {
        let mut readout = readout();
        let base = Instant::now();
        readout.update(&input(base + Duration::from_millis(200)));
        let first = readout.coordinate_line();

        // Inside the cadence window nothing moves.
        readout.update(&input(base + Duration::from_millis(2200)));
        assert_eq!(readout.coordinate_line(), first);

        readout.update(&input(base + Duration::from_millis(4300)));
        assert!((readout.lat - 48.8566).abs() <= 0.0001);
        assert!((readout.lng - 2.3522).abs() <= 0.0001);
    }

    #[test]
    fn readout_formats_as_hemisphere_tagged_degrees() {
        let readout = readout();
        assert_eq!(readout.coordinate_line(), "48.8566°N 2.3522°E");
    }

    #[test]
    fn detach_returns_to_the_anchor() {
        let mut readout = readout();
        let base = Instant::now();
        readout.update(&input(base + Duration::from_millis(300)));
        readout.detach();
        assert_eq!(readout.lat, CoordinatesConfig::default().lat);
        assert!(!readout.visible);
    }
}
