//! Pixel surface the scene composites into.
//!
//! Wraps a `tiny_skia::Pixmap` with the drawing helpers the panel and the
//! effects need: rects, circles, gradient lines, a radial glow, pixelated
//! blits and glyph text. Text rasterization is delegated to
//! [`crate::text::TextPainter`]; a surface without usable fonts degrades
//! text drawing to a no-op instead of failing.

use tiny_skia::{
    Color, FillRule, FilterQuality, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap,
    PixmapPaint, Point, RadialGradient, Rect, SpreadMode, Stroke, Transform,
};

use crate::text::TextPainter;

pub struct Surface {
    pixmap: Pixmap,
    text: TextPainter,
}

impl Surface {
    /// Create a surface of the given pixel size. Returns `None` for a
    /// degenerate size.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            text: TextPainter::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Fill the whole surface with one color.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    fn solid_paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        paint
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        self.pixmap.fill_rect(
            rect,
            &Self::solid_paint(color),
            Transform::identity(),
            None,
        );
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let stroke = Stroke { width, ..Stroke::default() };
        self.pixmap.stroke_path(
            &path,
            &Self::solid_paint(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let mut builder = PathBuilder::new();
        builder.push_circle(cx, cy, radius);
        let Some(path) = builder.finish() else { return };
        self.pixmap.fill_path(
            &path,
            &Self::solid_paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Color) {
        let mut builder = PathBuilder::new();
        builder.push_circle(cx, cy, radius);
        let Some(path) = builder.finish() else { return };
        let stroke = Stroke { width, ..Stroke::default() };
        self.pixmap.stroke_path(
            &path,
            &Self::solid_paint(color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    /// Radial glow fading from `color` at the center to transparent at the
    /// radius.
    pub fn radial_glow(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let mut edge = color;
        edge.set_alpha(0.0);
        let Some(shader) = RadialGradient::new(
            Point::from_xy(cx, cy),
            Point::from_xy(cx, cy),
            radius,
            vec![
                GradientStop::new(0.0, color),
                GradientStop::new(0.7, edge),
                GradientStop::new(1.0, edge),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            return;
        };
        let mut paint = Paint::default();
        paint.shader = shader;
        paint.anti_alias = true;
        let mut builder = PathBuilder::new();
        builder.push_circle(cx, cy, radius);
        let Some(path) = builder.finish() else { return };
        self.pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Full-width one-pixel horizontal line, fading from transparent at the
    /// edges through `color` at the center.
    pub fn hline_gradient(&mut self, y: f32, color: Color) {
        let width = self.width() as f32;
        let Some(shader) = Self::edge_fade(
            Point::from_xy(0.0, y),
            Point::from_xy(width, y),
            color,
        ) else {
            return;
        };
        let Some(rect) = Rect::from_xywh(0.0, y, width, 1.0) else {
            return;
        };
        let mut paint = Paint::default();
        paint.shader = shader;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Full-height one-pixel vertical line with the same edge fade.
    pub fn vline_gradient(&mut self, x: f32, color: Color) {
        let height = self.height() as f32;
        let Some(shader) = Self::edge_fade(
            Point::from_xy(x, 0.0),
            Point::from_xy(x, height),
            color,
        ) else {
            return;
        };
        let Some(rect) = Rect::from_xywh(x, 0.0, 1.0, height) else {
            return;
        };
        let mut paint = Paint::default();
        paint.shader = shader;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn edge_fade(start: Point, end: Point, color: Color) -> Option<tiny_skia::Shader<'static>> {
        let mut edge = color;
        edge.set_alpha(0.0);
        LinearGradient::new(
            start,
            end,
            vec![
                GradientStop::new(0.0, edge),
                GradientStop::new(0.5, color),
                GradientStop::new(1.0, edge),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        )
    }

    /// Blit a low-resolution pixmap over the full surface with pixelated
    /// (nearest-neighbour) upscaling.
    pub fn blit_pixelated(&mut self, source: &Pixmap, scale: f32) {
        let paint = PixmapPaint {
            quality: FilterQuality::Nearest,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            Transform::from_scale(scale, scale),
            None,
        );
    }

    /// Draw text with the shared monospace attrs. `y` is the top of the
    /// line box. No-op when no usable font is installed.
    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.text.draw(&mut self.pixmap, text, x, y, size, color);
    }

    /// Measure text dimensions at the given size.
    pub fn measure_text(&mut self, text: &str, size: f32) -> (f32, f32) {
        self.text.measure(text, size)
    }

    /// Write the current frame as a PNG file.
    pub fn save_png(&self, path: &std::path::Path) -> std::io::Result<()> {
        let encoded = self.pixmap.encode_png().map_err(std::io::Error::other)?;
        std::fs::write(path, encoded)
    }
}
