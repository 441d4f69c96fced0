//! Common utility functions for overlay rendering
//!
//! These are shared across the panel and the effects.
//! Text formatting is delegated to `noisefloor_types::formatting` for
//! consistency.

use tiny_skia::Color;

// Re-export formatting functions from noisefloor-types for convenience
pub use noisefloor_types::formatting;

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Apply an opacity factor to a color's alpha channel.
#[inline]
pub fn with_opacity(rgba: [u8; 4], opacity: f32) -> Color {
    let alpha = (rgba[3] as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], alpha)
}
