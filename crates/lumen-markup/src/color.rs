//! Color values and the `<font color=…>` attribute resolver.
//!
//! A color attribute is either a literal (`#RRGGBB`, or six bare hex
//! digits) or a theme-indirection key introduced by `!`, resolved through
//! a [`ThemeColors`] table.

use serde::Serialize;

use crate::theme::{TEXT_FOREGROUND, ThemeColors};

/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorValue {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Blue (#0000ff), the link color when the theme has none.
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Opaque color from red, green and blue channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse six hex digits (`RRGGBB`), with or without a leading `#`.
    ///
    /// Anything other than exactly six hex digits yields `None`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// Relative luminance in `0.0..=1.0` (Rec. 709 weights on sRGB values).
    #[must_use]
    pub fn luminance(&self) -> f32 {
        0.0722f32.mul_add(
            f32::from(self.b),
            0.2126f32.mul_add(f32::from(self.r), 0.7152 * f32::from(self.g)),
        ) / 255.0
    }
}

/// Minimum luminance difference between text and background.
const MIN_CONTRAST: f32 = 0.25;

/// Adjust `color` so it stays readable on `background`.
///
/// Colors that are too close in luminance to the background are replaced
/// by black or white, whichever is further from it. Without a background
/// the color is returned unchanged.
#[must_use]
pub fn ensure_contrasting_color(color: ColorValue, background: Option<ColorValue>) -> ColorValue {
    let Some(background) = background else {
        return color;
    };
    let bg = background.luminance();
    if (color.luminance() - bg).abs() >= MIN_CONTRAST {
        return color;
    }
    if bg > 0.5 {
        ColorValue::BLACK
    } else {
        ColorValue::WHITE
    }
}

/// Why a color attribute could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorProblem {
    /// The tag has no `color` attribute.
    MissingAttribute,
    /// The literal is not six hex digits.
    IllegalHex(String),
    /// The theme has no color under this key.
    UnresolvedKey(String),
}

/// Outcome of resolving a `<font>` tag's color attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColor {
    /// Color to paint with; a fallback when `problem` is set.
    pub color: ColorValue,
    /// Char offset (relative to the attribute text) the diagnostic should point at.
    pub offset: usize,
    /// What went wrong, if anything.
    pub problem: Option<ColorProblem>,
}

/// Resolve the color attribute of a `<font …>` tag.
///
/// `attributes` is the tag text after the tag name, up to (not including)
/// the closing `>`. `current` is the color in effect before the tag and is
/// kept when the attribute is missing or not valid hex. An unresolvable
/// theme key falls back to the theme's text color, then to black.
#[must_use]
pub fn resolve_font_color(
    attributes: &str,
    current: ColorValue,
    theme: Option<&dyn ThemeColors>,
) -> ResolvedColor {
    let Some(attr) = find_color_attribute(attributes) else {
        return ResolvedColor {
            color: current,
            offset: 0,
            problem: Some(ColorProblem::MissingAttribute),
        };
    };
    let offset = attributes[..attr.start].chars().count();

    if let Some(key) = attr.value.strip_prefix('!') {
        let resolved = theme.and_then(|t| t.color(key));
        return match resolved {
            Some(color) => ResolvedColor {
                color,
                offset,
                problem: None,
            },
            None => ResolvedColor {
                color: theme
                    .and_then(|t| t.color(TEXT_FOREGROUND))
                    .unwrap_or(ColorValue::BLACK),
                offset,
                problem: Some(ColorProblem::UnresolvedKey(key.to_string())),
            },
        };
    }

    let digits = attr.value.strip_prefix('#').unwrap_or(attr.value);
    let literal: String = digits.chars().take(6).collect();
    match ColorValue::from_hex(&literal) {
        Some(color) => ResolvedColor {
            color,
            offset,
            problem: None,
        },
        None => ResolvedColor {
            color: current,
            offset,
            problem: Some(ColorProblem::IllegalHex(literal)),
        },
    }
}

/// Location and raw text of a `color=` attribute value.
struct ColorAttribute<'a> {
    /// Byte offset of the value within the attribute text.
    start: usize,
    value: &'a str,
}

fn find_color_attribute(attributes: &str) -> Option<ColorAttribute<'_>> {
    let name = attributes
        .find("color")
        .or_else(|| attributes.find("COLOR"))?;
    let after_name = name + "color".len();
    let rest = &attributes[after_name..];
    let eq = rest.find('=')?;
    if !rest[..eq].trim().is_empty() {
        return None;
    }
    let value_part = &rest[eq + 1..];
    let trimmed = value_part.trim_start();
    let mut start = after_name + eq + 1 + (value_part.len() - trimmed.len());

    let value = match trimmed.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            start += 1;
            let inner = &trimmed[1..];
            inner.find(quote).map_or(inner, |end| &inner[..end])
        }
        _ => trimmed
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or(""),
    };
    Some(ColorAttribute { start, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{LINK_FOREGROUND, Theme};

    #[test]
    fn test_from_hex() {
        assert_eq!(ColorValue::from_hex("#FF0000"), Some(ColorValue::rgb(255, 0, 0)));
        assert_eq!(ColorValue::from_hex("00ff7f"), Some(ColorValue::rgb(0, 255, 127)));
        assert_eq!(ColorValue::from_hex("#F00"), None);
        assert_eq!(ColorValue::from_hex("#GG0000"), None);
    }

    #[test]
    fn test_resolve_double_quoted_hex() {
        let resolved = resolve_font_color(" color=\"#00FF00\"", ColorValue::BLACK, None);
        assert_eq!(resolved.color, ColorValue::rgb(0, 255, 0));
        assert!(resolved.problem.is_none());
    }

    #[test]
    fn test_resolve_single_quoted_and_bare() {
        let quoted = resolve_font_color(" color='#0000FF'", ColorValue::BLACK, None);
        assert_eq!(quoted.color, ColorValue::BLUE);
        let bare = resolve_font_color(" color=#123456", ColorValue::BLACK, None);
        assert_eq!(bare.color, ColorValue::rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_resolve_missing_attribute_keeps_current() {
        let current = ColorValue::rgb(1, 2, 3);
        let resolved = resolve_font_color(" size=3", current, None);
        assert_eq!(resolved.color, current);
        assert_eq!(resolved.problem, Some(ColorProblem::MissingAttribute));
    }

    #[test]
    fn test_resolve_illegal_hex() {
        let current = ColorValue::rgb(9, 9, 9);
        let resolved = resolve_font_color(" color='#ZZ1234'", current, None);
        assert_eq!(resolved.color, current);
        assert_eq!(
            resolved.problem,
            Some(ColorProblem::IllegalHex("ZZ1234".to_string()))
        );
        assert_eq!(resolved.offset, 8);
    }

    #[test]
    fn test_resolve_short_hex() {
        let resolved = resolve_font_color(" color='#FF'", ColorValue::BLACK, None);
        assert_eq!(resolved.problem, Some(ColorProblem::IllegalHex("FF".to_string())));
    }

    #[test]
    fn test_resolve_theme_key() {
        let palette = Theme::Light.palette();
        let resolved = resolve_font_color(" color='!link.foreground'", ColorValue::BLACK, Some(&palette));
        assert_eq!(Some(resolved.color), palette.color(LINK_FOREGROUND));
        assert!(resolved.problem.is_none());
    }

    #[test]
    fn test_resolve_unknown_theme_key_falls_back_to_text_color() {
        let palette = Theme::Dark.palette();
        let resolved = resolve_font_color(" color='!no.such.key'", ColorValue::BLACK, Some(&palette));
        assert_eq!(Some(resolved.color), palette.color(TEXT_FOREGROUND));
        assert_eq!(
            resolved.problem,
            Some(ColorProblem::UnresolvedKey("no.such.key".to_string()))
        );
    }

    #[test]
    fn test_resolve_theme_key_without_theme_is_black() {
        let resolved = resolve_font_color(" color=\"!link.foreground\"", ColorValue::WHITE, None);
        assert_eq!(resolved.color, ColorValue::BLACK);
        assert!(resolved.problem.is_some());
    }

    #[test]
    fn test_ensure_contrasting_color() {
        let near_white = ColorValue::rgb(240, 240, 240);
        assert_eq!(
            ensure_contrasting_color(near_white, Some(ColorValue::WHITE)),
            ColorValue::BLACK
        );
        assert_eq!(
            ensure_contrasting_color(ColorValue::BLACK, Some(ColorValue::rgb(10, 10, 10))),
            ColorValue::WHITE
        );
        assert_eq!(
            ensure_contrasting_color(ColorValue::BLACK, Some(ColorValue::WHITE)),
            ColorValue::BLACK
        );
        assert_eq!(ensure_contrasting_color(near_white, None), near_white);
    }
}
