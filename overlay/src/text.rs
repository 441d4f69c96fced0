//! Glyph rasterization via cosmic-text.
//!
//! One shared `FontSystem` + `SwashCache` pair per surface. Everything is
//! drawn with monospace attrs to match the card's terminal look. If the
//! font database has no usable face for a glyph, that glyph simply draws
//! nothing — missing fonts must never propagate an error into the frame
//! loop.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use tiny_skia::{Color, Pixmap, PremultipliedColorU8};

const LINE_HEIGHT_FACTOR: f32 = 1.2;

pub struct TextPainter {
    font_system: FontSystem,
    cache: SwashCache,
}

impl Default for TextPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPainter {
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        db.set_monospace_family("DejaVu Sans Mono");
        Self {
            font_system: FontSystem::new_with_locale_and_db("en-US".to_string(), db),
            cache: SwashCache::new(),
        }
    }

    fn attrs() -> Attrs<'static> {
        Attrs::new().family(Family::Monospace)
    }

    fn shaped_buffer(&mut self, text: &str, size: f32) -> Buffer {
        let metrics = Metrics::new(size, size * LINE_HEIGHT_FACTOR);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, &Self::attrs(), Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Width and height of the laid-out text.
    pub fn measure(&mut self, text: &str, size: f32) -> (f32, f32) {
        let buffer = self.shaped_buffer(text, size);
        let mut width: f32 = 0.0;
        let mut lines = 0usize;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            lines += 1;
        }
        (width, lines as f32 * size * LINE_HEIGHT_FACTOR)
    }

    /// Rasterize `text` with its line box top at (`x`, `y`).
    pub fn draw(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    ) {
        let buffer = self.shaped_buffer(text, size);
        let text_color = cosmic_text::Color::rgba(
            (color.red() * 255.0) as u8,
            (color.green() * 255.0) as u8,
            (color.blue() * 255.0) as u8,
            (color.alpha() * 255.0) as u8,
        );

        let width = pixmap.width() as i32;
        let height = pixmap.height() as i32;
        buffer.draw(
            &mut self.font_system,
            &mut self.cache,
            text_color,
            |gx, gy, gw, gh, glyph_color| {
                let alpha = glyph_color.a();
                if alpha == 0 {
                    return;
                }
                for dy in 0..gh as i32 {
                    for dx in 0..gw as i32 {
                        let px = x as i32 + gx + dx;
                        let py = y as i32 + gy + dy;
                        if px < 0 || py < 0 || px >= width || py >= height {
                            continue;
                        }
                        let index = (py * width + px) as usize;
                        blend_over(
                            &mut pixmap.pixels_mut()[index],
                            glyph_color.r(),
                            glyph_color.g(),
                            glyph_color.b(),
                            alpha,
                        );
                    }
                }
            },
        );
    }
}


/// Source-over blend of one straight-alpha pixel onto a premultiplied
/// destination pixel.
fn blend_over(dst: &mut PremultipliedColorU8, r: u8, g: u8, b: u8, a: u8) {
    let sa = a as u32;
    let inv = 255 - sa;
    let mul = |s: u8, d: u8| -> u8 { ((s as u32 * sa + d as u32 * inv) / 255) as u8 };
    let out_r = mul(r, dst.red());
    let out_g = mul(g, dst.green());
    let out_b = mul(b, dst.blue());
    let out_a = (sa + dst.alpha() as u32 * inv / 255) as u8;
    if let Some(px) = PremultipliedColorU8::from_rgba(
        out_r.min(out_a),
        out_g.min(out_a),
        out_b.min(out_a),
        out_a,
    ) {
        *dst = px;
    }
}
