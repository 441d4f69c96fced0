//! Reusable drawing widgets for the presence panel.
//!
//! Each widget renders to a [`Surface`]. Widgets carry their own layout
//! and the panel positions them.

use tiny_skia::Color;

use crate::surface::Surface;
use crate::utils::color_from_rgba;

/// Shared palette.
pub mod colors {
    pub const BACKGROUND: [u8; 4] = [9, 9, 11, 230];
    pub const BORDER: [u8; 4] = [39, 39, 42, 255];
    pub const RULE: [u8; 4] = [39, 39, 42, 255];
    pub const ACCENT: [u8; 4] = [34, 211, 238, 255];
    pub const TEXT: [u8; 4] = [244, 244, 245, 255];
    pub const TEXT_DIM: [u8; 4] = [161, 161, 170, 255];
    pub const TEXT_FAINT: [u8; 4] = [113, 113, 122, 255];
    pub const SKELETON: [u8; 4] = [39, 39, 42, 200];
    pub const SPOTIFY: [u8; 4] = [52, 211, 153, 255];
}

/// Section title with a separator rule running to the right edge.
pub struct Header {
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
}

impl Header {
    pub fn render(&self, surface: &mut Surface) {
        let color = color_from_rgba(colors::TEXT_FAINT);
        surface.draw_text(&self.label, self.x, self.y, self.font_size, color);
        let (label_width, label_height) = surface.measure_text(&self.label, self.font_size);
        let rule_x = self.x + label_width + 8.0;
        let rule_y = self.y + label_height * 0.55;
        let rule_width = (self.x + self.width - rule_x).max(0.0);
        surface.fill_rect(rule_x, rule_y, rule_width, 1.0, color_from_rgba(colors::RULE));
    }
}

/// Placeholder bar shown while content is loading.
pub struct SkeletonBlock {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SkeletonBlock {
    pub fn render(&self, surface: &mut Surface) {
        surface.fill_rect(
            self.x,
            self.y,
            self.width,
            self.height,
            color_from_rgba(colors::SKELETON),
        );
    }
}

/// Filled dot with a thin outline, used for the online status indicator.
pub struct StatusDot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: [u8; 4],
}

impl StatusDot {
    pub fn render(&self, surface: &mut Surface) {
        surface.fill_circle(self.x, self.y, self.radius, color_from_rgba(self.color));
        let mut outline = color_from_rgba(self.color);
        outline.set_alpha(outline.alpha() * 0.35);
        surface.stroke_circle(self.x, self.y, self.radius + 2.0, 1.0, outline);
    }
}

/// Bordered content box with an accent strip down the left edge.
pub struct AccentBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub accent: [u8; 4],
}

impl AccentBox {
    pub fn render(&self, surface: &mut Surface) {
        let mut fill = Color::from_rgba8(24, 24, 27, 255);
        fill.set_alpha(0.85);
        surface.fill_rect(self.x, self.y, self.width, self.height, fill);
        surface.stroke_rect(self.x, self.y, self.width, self.height, 1.0, color_from_rgba(colors::BORDER));
        surface.fill_rect(self.x, self.y, 2.0, self.height, color_from_rgba(self.accent));
    }
}

/// Horizontal track progress bar.
pub struct ProgressBar {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// 0.0 to 1.0.
    pub progress: f32,
    pub color: [u8; 4],
}

impl ProgressBar {
    pub fn render(&self, surface: &mut Surface) {
        surface.fill_rect(self.x, self.y, self.width, self.height, color_from_rgba(colors::RULE));
        let filled = self.width * self.progress.clamp(0.0, 1.0);
        if filled > 0.0 {
            surface.fill_rect(self.x, self.y, filled, self.height, color_from_rgba(self.color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_clamps_out_of_range_progress() {
        let mut surface = Surface::new(100, 20).unwrap();
        let bar = ProgressBar {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 4.0,
            progress: 2.5,
            color: colors::SPOTIFY,
        };
        // Must not panic on an out-of-range fill width.
        bar.render(&mut surface);
    }

    #[test]
    fn header_rule_never_goes_negative() {
        let mut surface = Surface::new(100, 20).unwrap();
        let header = Header {
            label: "A LABEL FAR WIDER THAN THE BOX".to_string(),
            x: 0.0,
            y: 2.0,
            width: 10.0,
            font_size: 10.0,
        };
        header.render(&mut surface);
    }
}
