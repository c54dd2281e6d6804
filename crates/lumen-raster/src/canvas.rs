//! Software canvas for headless rendering.
//!
//! Implements the engine's [`Surface`] on an RGBA pixel buffer, using
//! fontdue to rasterize glyphs. Text is positioned on its baseline; the
//! cursor advances by the same amounts [`FontdueMetrics`] measures.
//!
//! [`FontdueMetrics`]: crate::FontdueMetrics

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};
use lumen_markup::{ClipRect, ColorValue, Font, Surface};

use crate::error::RasterError;
use crate::fonts::FontSet;
use crate::metrics::{FontdueMetrics, MeasureStrategy, kerning};

/// An RGBA pixel buffer that markup can be painted onto.
pub struct Canvas<'a> {
    buffer: RgbaImage,
    width: u32,
    height: u32,
    fonts: &'a FontSet,
    strategy: MeasureStrategy,
    color: ColorValue,
    font: Font,
    clip: Option<ClipRect>,
}

impl<'a> Canvas<'a> {
    /// A `width`×`height` canvas filled with `background`.
    #[must_use]
    pub fn new(fonts: &'a FontSet, width: u32, height: u32, background: ColorValue) -> Self {
        let buffer = ImageBuffer::from_pixel(width, height, to_rgba(background));
        Self {
            buffer,
            width,
            height,
            fonts,
            strategy: MeasureStrategy::for_platform(),
            color: ColorValue::BLACK,
            font: Font::default(),
            clip: None,
        }
    }

    /// Advance the cursor with `strategy`; must match the metrics in use.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: MeasureStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The pixels painted so far.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// The color at (`x`, `y`), or `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<ColorValue> {
        (x < self.width && y < self.height).then(|| {
            let Rgba([r, g, b, a]) = *self.buffer.get_pixel(x, y);
            ColorValue { r, g, b, a }
        })
    }

    /// Save the image; the format follows the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn save(&self, path: &Path) -> Result<(), RasterError> {
        self.buffer.save(path).map_err(|source| RasterError::Save {
            path: path.to_path_buf(),
            source,
        })
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn blend_pixel(&mut self, px: i32, py: i32, rgba: Rgba<u8>, alpha: u8) {
        if px < 0 || py < 0 || px as u32 >= self.width || py as u32 >= self.height {
            return;
        }
        if let Some(clip) = self.clip
            && !clip.contains(px as f32, py as f32)
        {
            return;
        }
        let (px, py) = (px as u32, py as u32);
        if alpha == 255 {
            self.buffer.put_pixel(px, py, rgba);
        } else {
            let bg = *self.buffer.get_pixel(px, py);
            self.buffer.put_pixel(px, py, alpha_blend(rgba, bg, alpha));
        }
    }
}

impl Surface for Canvas<'_> {
    fn set_color(&mut self, color: ColorValue) {
        self.color = color;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        let fonts = self.fonts;
        let Some(face) = fonts.select(&self.font) else {
            return;
        };
        let size = self.font.size;
        let rgba = to_rgba(self.color);
        let mut cursor_x = x;
        let mut previous = None;

        for ch in text.chars().filter(|ch| !ch.is_control()) {
            if self.strategy == MeasureStrategy::Kerned {
                cursor_x += kerning(face, previous, ch, size);
            }
            let (metrics, bitmap) = face.rasterize(ch, size);
            // fontdue's ymin is the bitmap's bottom edge relative to the baseline.
            let glyph_x = cursor_x.round() as i32 + metrics.xmin;
            let glyph_y = y.round() as i32 - metrics.ymin - metrics.height as i32;
            if metrics.width > 0 {
                for (i, &alpha) in bitmap.iter().enumerate() {
                    if alpha > 0 {
                        let px = glyph_x + (i % metrics.width) as i32;
                        let py = glyph_y + (i / metrics.width) as i32;
                        self.blend_pixel(px, py, rgba, alpha);
                    }
                }
            }
            cursor_x += metrics.advance_width;
            previous = Some(ch);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let rgba = to_rgba(self.color);
        let (x1, y1, x2, y2) = (
            x1.round() as i32,
            y1.round() as i32,
            x2.round() as i32,
            y2.round() as i32,
        );
        let steps = (x2 - x1).abs().max((y2 - y1).abs());
        if steps == 0 {
            self.blend_pixel(x1, y1, rgba, 255);
            return;
        }
        // The end point is exclusive, like a run's right edge.
        for step in 0..steps {
            let px = x1 + (x2 - x1) * step / steps;
            let py = y1 + (y2 - y1) * step / steps;
            self.blend_pixel(px, py, rgba, 255);
        }
    }

    fn set_clip(&mut self, clip: Option<ClipRect>) {
        self.clip = clip;
    }
}

/// Metrics and a canvas over one font set, advancing text the same way.
#[must_use]
pub fn metrics_and_canvas(
    fonts: &FontSet,
    width: u32,
    height: u32,
    background: ColorValue,
    strategy: MeasureStrategy,
) -> (FontdueMetrics<'_>, Canvas<'_>) {
    (
        FontdueMetrics::new(fonts).with_strategy(strategy),
        Canvas::new(fonts, width, height, background).with_strategy(strategy),
    )
}

const fn to_rgba(color: ColorValue) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// Alpha blend a foreground color onto a background color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_blend(fg: Rgba<u8>, bg: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = f32::from(alpha) / 255.0;
    let inv_a = 1.0 - a;

    Rgba([
        f32::from(fg[0]).mul_add(a, f32::from(bg[0]) * inv_a) as u8,
        f32::from(fg[1]).mul_add(a, f32::from(bg[1]) * inv_a) as u8,
        f32::from(fg[2]).mul_add(a, f32::from(bg[2]) * inv_a) as u8,
        255,
    ])
}
