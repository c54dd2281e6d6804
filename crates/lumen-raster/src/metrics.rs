//! Font metrics backed by fontdue.
//!
//! Widths are the sum of per-character advances, optionally adjusted by
//! pair kerning. The canvas advances its cursor the same way, so a
//! measured run always ends exactly where the painted run does.

use lumen_markup::{ApproximateFontMetrics, Font, FontMetrics};
use strum_macros::{Display, EnumString};

use crate::fonts::FontSet;

/// How run widths are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MeasureStrategy {
    /// Sum of advance widths.
    Advances,
    /// Advance widths plus pair kerning.
    Kerned,
}

impl MeasureStrategy {
    /// The strategy that matches native text drawing on this platform.
    ///
    /// macOS text drawing does not apply kerning to short strings, so
    /// kerned measurements would disagree with what is drawn there.
    #[must_use]
    pub const fn for_platform() -> Self {
        if cfg!(target_os = "macos") {
            Self::Advances
        } else {
            Self::Kerned
        }
    }
}

impl Default for MeasureStrategy {
    fn default() -> Self {
        Self::for_platform()
    }
}

/// Font metrics implementation backed by fontdue's per-glyph metrics.
///
/// Uses `Font::metrics()` rather than `Font::rasterize()`, so no bitmaps
/// are generated when only measurements are needed. Falls back to
/// [`ApproximateFontMetrics`] when the font set has no face for a font.
pub struct FontdueMetrics<'a> {
    fonts: &'a FontSet,
    strategy: MeasureStrategy,
}

impl<'a> FontdueMetrics<'a> {
    /// Metrics for `fonts` using the platform's strategy.
    #[must_use]
    pub fn new(fonts: &'a FontSet) -> Self {
        Self {
            fonts,
            strategy: MeasureStrategy::for_platform(),
        }
    }

    /// Use `strategy` instead of the platform default.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: MeasureStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> MeasureStrategy {
        self.strategy
    }
}

impl FontMetrics for FontdueMetrics<'_> {
    fn text_width(&self, text: &str, font: &Font) -> f32 {
        let Some(face) = self.fonts.select(font) else {
            return ApproximateFontMetrics.text_width(text, font);
        };
        let mut width = 0.0;
        let mut previous = None;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            width += face.metrics(ch, font.size).advance_width;
            if self.strategy == MeasureStrategy::Kerned {
                width += kerning(face, previous, ch, font.size);
            }
            previous = Some(ch);
        }
        width
    }

    fn line_height(&self, font: &Font) -> f32 {
        self.fonts
            .select(font)
            .and_then(|face| face.horizontal_line_metrics(font.size))
            .map_or_else(
                || ApproximateFontMetrics.line_height(font),
                |line| line.new_line_size,
            )
    }

    fn max_advance(&self, font: &Font) -> f32 {
        self.fonts.select(font).map_or_else(
            || ApproximateFontMetrics.max_advance(font),
            |face| face.metrics('W', font.size).advance_width,
        )
    }
}

/// Kerning adjustment between `previous` and `ch`, or zero.
pub(crate) fn kerning(face: &fontdue::Font, previous: Option<char>, ch: char, size: f32) -> f32 {
    previous
        .and_then(|left| face.horizontal_kern(left, ch, size))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_falls_back_to_approximate() {
        let fonts = FontSet::empty();
        let metrics = FontdueMetrics::new(&fonts);
        let font = Font::regular(10.0);
        let approximate = ApproximateFontMetrics;
        assert!((metrics.text_width("Hello", &font) - approximate.text_width("Hello", &font)).abs() < 1e-4);
        assert!((metrics.line_height(&font) - approximate.line_height(&font)).abs() < 1e-4);
        assert!((metrics.max_advance(&font) - approximate.max_advance(&font)).abs() < 1e-4);
    }

    #[test]
    fn test_platform_strategy() {
        let expected = if cfg!(target_os = "macos") {
            MeasureStrategy::Advances
        } else {
            MeasureStrategy::Kerned
        };
        assert_eq!(MeasureStrategy::for_platform(), expected);
        assert_eq!(MeasureStrategy::default(), expected);
        assert_eq!("KERNED".parse::<MeasureStrategy>(), Ok(MeasureStrategy::Kerned));
    }

    #[test]
    fn test_system_font_widths_are_additive_without_kerning() {
        let fonts = FontSet::load_system();
        if fonts.is_empty() {
            return;
        }
        let metrics = FontdueMetrics::new(&fonts).with_strategy(MeasureStrategy::Advances);
        let font = Font::regular(14.0);
        let whole = metrics.text_width("ab", &font);
        let parts = metrics.text_width("a", &font) + metrics.text_width("b", &font);
        assert!((whole - parts).abs() < 1e-3);
        assert!(metrics.line_height(&font) > 0.0);
    }
}
