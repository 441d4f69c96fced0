//! Presence card.
//!
//! Renders the current [`PresencePhase`] as a fixed-width card: skeleton
//! placeholders while the socket connects, a terminal notice if the
//! session failed, and the full identity/activity card once live.

use noisefloor_core::presence::view::PlayingView;
use noisefloor_core::presence::{PresencePhase, PresenceView, ProfileSupplement};
use noisefloor_types::formatting::{format_track_progress, truncate};

use crate::surface::Surface;
use crate::utils::color_from_rgba;
use crate::widgets::{colors, AccentBox, Header, ProgressBar, SkeletonBlock, StatusDot};

const PADDING: f32 = 14.0;
const BANNER_HEIGHT: f32 = 40.0;
const NAME_SIZE: f32 = 15.0;
const BODY_SIZE: f32 = 11.0;
const LINE: f32 = 16.0;
const TRACK_TITLE_CHARS: usize = 28;

const FAILED_NOTICE: &str = "[CONNECTION FAILED - RETRY LATER]";
const NO_ACTIVITY_NOTICE: &str = "[NO CURRENT ACTIVITY]";
const PLAYING_HEADER: &str = "▶ PLAYING";
const SPOTIFY_HEADER: &str = "♫ LISTENING TO SPOTIFY";

pub struct PresencePanel {
    x: f32,
    y: f32,
    width: f32,
    supplement: Option<ProfileSupplement>,
}

impl PresencePanel {
    pub fn new(x: f32, y: f32, width: f32) -> Self {
        Self { x, y, width, supplement: None }
    }

    /// Attach the profile supplement once the side-channel fetch lands.
    pub fn set_supplement(&mut self, supplement: Option<ProfileSupplement>) {
        self.supplement = supplement;
    }

    pub fn render(&self, surface: &mut Surface, phase: &PresencePhase, now_ms: u64) {
        match phase {
            PresencePhase::Connecting => self.render_skeleton(surface),
            PresencePhase::Failed => self.render_failed(surface),
            PresencePhase::Live(snapshot) => {
                let view = PresenceView::derive(snapshot, self.supplement.as_ref());
                self.render_live(surface, &view, now_ms);
            }
        }
    }

    fn frame(&self, surface: &mut Surface, height: f32) {
        surface.fill_rect(self.x, self.y, self.width, height, color_from_rgba(colors::BACKGROUND));
        surface.stroke_rect(self.x, self.y, self.width, height, 1.0, color_from_rgba(colors::BORDER));
    }

    fn render_skeleton(&self, surface: &mut Surface) {
        let height = BANNER_HEIGHT + PADDING * 2.0 + LINE * 4.0;
        self.frame(surface, height);
        SkeletonBlock { x: self.x, y: self.y, width: self.width, height: BANNER_HEIGHT }
            .render(surface);
        let left = self.x + PADDING;
        let mut y = self.y + BANNER_HEIGHT + PADDING;
        for width in [self.width * 0.5, self.width * 0.35, self.width * 0.7] {
            SkeletonBlock { x: left, y, width, height: 10.0 }.render(surface);
            y += LINE;
        }
    }

    fn render_failed(&self, surface: &mut Surface) {
        let height = PADDING * 2.0 + LINE;
        self.frame(surface, height);
        surface.draw_text(
            FAILED_NOTICE,
            self.x + PADDING,
            self.y + PADDING,
            BODY_SIZE,
            color_from_rgba(colors::TEXT_FAINT),
        );
    }

    fn render_live(&self, surface: &mut Surface, view: &PresenceView, now_ms: u64) {
        let mut height = BANNER_HEIGHT + PADDING * 2.0 + LINE * 3.0;
        if view.custom_status.is_some() {
            height += LINE;
        }
        if let Some(playing) = &view.playing {
            height += playing_box_height(playing) + PADDING;
        }
        if view.spotify.is_some() {
            height += LINE * 5.0 + PADDING;
        }
        if view.show_no_activity() {
            height += LINE;
        }
        self.frame(surface, height);

        self.render_banner(surface);

        let left = self.x + PADDING;
        let mut y = self.y + BANNER_HEIGHT + PADDING;

        surface.draw_text(&view.display_name, left, y, NAME_SIZE, color_from_rgba(colors::TEXT));
        if let Some(tag) = &view.clan_tag {
            let (name_width, _) = surface.measure_text(&view.display_name, NAME_SIZE);
            surface.draw_text(
                &format!("[{tag}]"),
                left + name_width + 6.0,
                y + 3.0,
                BODY_SIZE,
                color_from_rgba(colors::ACCENT),
            );
        }
        y += LINE + 4.0;

        surface.draw_text(
            &format!("@{}", view.username),
            left,
            y,
            BODY_SIZE,
            color_from_rgba(colors::TEXT_FAINT),
        );
        y += LINE;

        StatusDot { x: left + 4.0, y: y + 5.0, radius: 4.0, color: view.status.color() }
            .render(surface);
        surface.draw_text(
            view.status.label(),
            left + 14.0,
            y,
            BODY_SIZE,
            color_from_rgba(colors::TEXT_DIM),
        );
        y += LINE;

        if let Some(custom) = &view.custom_status {
            surface.draw_text(
                &custom_status_line(custom.emoji.as_ref().map(|e| e.name.as_str()), custom.text.as_deref()),
                left,
                y,
                BODY_SIZE,
                color_from_rgba(colors::TEXT_DIM),
            );
            y += LINE;
        }

        if let Some(playing) = &view.playing {
            let box_height = playing_box_height(playing);
            AccentBox {
                x: left,
                y,
                width: self.width - PADDING * 2.0,
                height: box_height,
                accent: colors::ACCENT,
            }
            .render(surface);
            let inner = left + 8.0;
            let mut row = y + 6.0;
            Header {
                label: PLAYING_HEADER.to_string(),
                x: inner,
                y: row,
                width: self.width - PADDING * 2.0 - 16.0,
                font_size: BODY_SIZE - 1.0,
            }
            .render(surface);
            row += LINE;
            surface.draw_text(&playing.name, inner, row, BODY_SIZE, color_from_rgba(colors::TEXT));
            row += LINE;
            for line in [&playing.details, &playing.state].into_iter().flatten() {
                surface.draw_text(line, inner, row, BODY_SIZE - 1.0, color_from_rgba(colors::TEXT_DIM));
                row += LINE;
            }
            y += box_height + PADDING;
        }

        if let Some(spotify) = &view.spotify {
            let box_height = LINE * 4.5;
            AccentBox {
                x: left,
                y,
                width: self.width - PADDING * 2.0,
                height: box_height,
                accent: colors::SPOTIFY,
            }
            .render(surface);
            let inner = left + 8.0;
            let inner_width = self.width - PADDING * 2.0 - 16.0;
            let mut row = y + 6.0;
            Header {
                label: SPOTIFY_HEADER.to_string(),
                x: inner,
                y: row,
                width: inner_width,
                font_size: BODY_SIZE - 1.0,
            }
            .render(surface);
            row += LINE;
            surface.draw_text(
                &truncate(&spotify.song, TRACK_TITLE_CHARS),
                inner,
                row,
                BODY_SIZE,
                color_from_rgba(colors::TEXT),
            );
            row += LINE;
            surface.draw_text(
                &format!("by {}", truncate(&spotify.artist, TRACK_TITLE_CHARS)),
                inner,
                row,
                BODY_SIZE - 1.0,
                color_from_rgba(colors::TEXT_DIM),
            );
            row += LINE;
            let (position, length) = spotify.progress_secs(now_ms);
            let ratio = if length > 0 { position as f32 / length as f32 } else { 0.0 };
            ProgressBar {
                x: inner,
                y: row + 4.0,
                width: inner_width * 0.6,
                height: 3.0,
                progress: ratio,
                color: colors::SPOTIFY,
            }
            .render(surface);
            surface.draw_text(
                &format_track_progress(position, length),
                inner + inner_width * 0.6 + 8.0,
                row - 2.0,
                BODY_SIZE - 2.0,
                color_from_rgba(colors::TEXT_FAINT),
            );
            y += box_height + PADDING;
        }

        if view.show_no_activity() {
            surface.draw_text(
                NO_ACTIVITY_NOTICE,
                left,
                y,
                BODY_SIZE,
                color_from_rgba(colors::TEXT_FAINT),
            );
        }
    }

    /// Profile banner color if the supplement carried one; otherwise a
    /// two-tone accent wash stands in for the missing banner.
    fn render_banner(&self, surface: &mut Surface) {
        let explicit = self
            .supplement
            .as_ref()
            .and_then(|s| s.banner_color.as_deref())
            .and_then(parse_hex_color);
        match explicit {
            Some(color) => {
                surface.fill_rect(self.x, self.y, self.width, BANNER_HEIGHT, color_from_rgba(color));
            }
            None => {
                surface.fill_rect(
                    self.x,
                    self.y,
                    self.width,
                    BANNER_HEIGHT,
                    color_from_rgba([24, 24, 27, 255]),
                );
                let mut wash = colors::ACCENT;
                wash[3] = 28;
                surface.fill_rect(
                    self.x,
                    self.y + BANNER_HEIGHT * 0.5,
                    self.width,
                    BANNER_HEIGHT * 0.5,
                    color_from_rgba(wash),
                );
            }
        }
    }
}

fn playing_box_height(playing: &PlayingView) -> f32 {
    let detail_rows = playing.details.is_some() as usize + playing.state.is_some() as usize;
    LINE * (2.0 + detail_rows as f32) + 12.0
}

/// Parse a `#rrggbb` banner color. The input comes straight from the
/// profile endpoint, so any malformed value yields `None` instead of
/// panicking.
fn parse_hex_color(hex: &str) -> Option<[u8; 4]> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some([r, g, b, 255])
}

/// Join an optional emoji and optional status text into one line.
fn custom_status_line(emoji: Option<&str>, text: Option<&str>) -> String {
    match (emoji, text) {
        (Some(emoji), Some(text)) => format!("{emoji} {text}"),
        (Some(emoji), None) => emoji.to_string(),
        (None, Some(text)) => text.to_string(),
        (None, None) => String::new(),
    }
}

// ── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
#[path = "panel_tests.rs"]
mod panel_tests;
