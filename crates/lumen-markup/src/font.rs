//! Font handles and the font-metrics collaborator.
//!
//! The engine never touches glyph data itself. Everything it needs to
//! know about text extent comes through [`FontMetrics`], so the same scan
//! can run against real font files, a GUI toolkit's metrics, or the
//! deterministic [`ApproximateFontMetrics`] used in tests.

use serde::Serialize;
use strum_macros::Display;

/// Numeric weight of regular text.
pub const NORMAL_WEIGHT: u16 = 400;

/// Numeric weight of bold text.
pub const BOLD_WEIGHT: u16 = 700;

/// Size of the font used when the caller supplies none.
pub const DEFAULT_FONT_SIZE: f32 = 11.0;

/// Slant of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Slanted glyphs.
    Italic,
}

/// A font selection: size, weight and slant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    /// Size in pixels.
    pub size: f32,
    /// Numeric weight (400 = normal, 700 = bold).
    pub weight: u16,
    /// Slant.
    pub style: FontStyle,
}

impl Default for Font {
    fn default() -> Self {
        Self::regular(DEFAULT_FONT_SIZE)
    }
}

impl Font {
    /// Regular upright font of the given size.
    #[must_use]
    pub const fn regular(size: f32) -> Self {
        Self {
            size,
            weight: NORMAL_WEIGHT,
            style: FontStyle::Normal,
        }
    }

    /// Whether this font is bold.
    #[must_use]
    pub const fn is_bold(&self) -> bool {
        self.weight >= BOLD_WEIGHT
    }

    /// Whether this font is italic.
    #[must_use]
    pub const fn is_italic(&self) -> bool {
        matches!(self.style, FontStyle::Italic)
    }

    /// Derive a variant of this font, adding bold and/or italic.
    ///
    /// Flags only ever add emphasis: a bold base font stays bold when
    /// `bold` is false.
    #[must_use]
    pub const fn derive(self, bold: bool, italic: bool) -> Self {
        Self {
            size: self.size,
            weight: if bold && !self.is_bold() {
                BOLD_WEIGHT
            } else {
                self.weight
            },
            style: if italic { FontStyle::Italic } else { self.style },
        }
    }
}

/// Font metrics interface for text measurement.
///
/// Implementors provide per-string advance widths and line metrics. The
/// engine calls these to decide how much of a run fits, where to break a
/// line, and where to draw decoration lines. Offsets are relative to the
/// baseline, positive downward.
pub trait FontMetrics {
    /// Total advance width of `text` in `font`.
    ///
    /// This must match the cursor advancement of the surface that paints
    /// the text, or painted runs will overlap or leave gaps.
    fn text_width(&self, text: &str, font: &Font) -> f32;

    /// Distance between consecutive baselines.
    fn line_height(&self, font: &Font) -> f32;

    /// Widest advance of any glyph in `font`.
    fn max_advance(&self, font: &Font) -> f32 {
        font.size
    }

    /// Baseline-relative position of the underline.
    fn underline_offset(&self, font: &Font) -> f32 {
        (font.size * 0.1).max(1.0)
    }

    /// Baseline-relative position of the strikethrough line.
    fn strikethrough_offset(&self, font: &Font) -> f32 {
        -(font.size * 0.3)
    }
}

/// Approximate font metrics using fixed ratios.
///
/// The advance of every glyph is 0.6× the font size (typical for
/// Helvetica/Arial body text), bold glyphs are 10% wider, and the line
/// height is 1.2×. Control characters have no advance. Widths are exactly
/// additive, which makes layout arithmetic predictable.
///
/// This is used as a fallback when no font is available, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl ApproximateFontMetrics {
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    const BOLD_WIDTH_RATIO: f32 = 1.1;
    const LINE_HEIGHT_RATIO: f32 = 1.2;

    /// Advance of a single non-control glyph.
    #[must_use]
    pub fn char_width(font: &Font) -> f32 {
        let width = font.size * Self::CHAR_WIDTH_RATIO;
        if font.is_bold() {
            width * Self::BOLD_WIDTH_RATIO
        } else {
            width
        }
    }
}

impl FontMetrics for ApproximateFontMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font: &Font) -> f32 {
        let glyphs = text.chars().filter(|ch| !ch.is_control()).count();
        glyphs as f32 * Self::char_width(font)
    }

    fn line_height(&self, font: &Font) -> f32 {
        font.size * Self::LINE_HEIGHT_RATIO
    }

    fn max_advance(&self, font: &Font) -> f32 {
        Self::char_width(font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_adds_emphasis() {
        let base = Font::regular(12.0);
        let bold_italic = base.derive(true, true);
        assert!(bold_italic.is_bold());
        assert!(bold_italic.is_italic());
        assert_eq!(base.derive(false, false), base);
    }

    #[test]
    fn test_derive_keeps_bold_base() {
        let base = Font {
            weight: 900,
            ..Font::regular(12.0)
        };
        assert_eq!(base.derive(true, false).weight, 900);
        assert_eq!(base.derive(false, false).weight, 900);
    }

    #[test]
    fn test_approximate_widths_are_additive() {
        let metrics = ApproximateFontMetrics;
        let font = Font::regular(10.0);
        let whole = metrics.text_width("Hello world", &font);
        let parts = metrics.text_width("Hello ", &font) + metrics.text_width("world", &font);
        assert!((whole - parts).abs() < f32::EPSILON * 100.0);
        assert!((whole - 66.0).abs() < 0.001);
    }

    #[test]
    fn test_approximate_bold_is_wider() {
        let metrics = ApproximateFontMetrics;
        let font = Font::regular(10.0);
        assert!(metrics.text_width("Hi", &font.derive(true, false)) > metrics.text_width("Hi", &font));
    }

    #[test]
    fn test_default_font() {
        let font = Font::default();
        assert!((font.size - DEFAULT_FONT_SIZE).abs() < f32::EPSILON);
        assert!(!font.is_bold());
    }
}
