//! Theme color tables for `!key` color indirection.
//!
//! Markup written as `<font color='!error.foreground'>` names a semantic
//! color instead of a literal. The engine resolves the key through a
//! [`ThemeColors`] implementation supplied by the caller; [`Theme`]
//! provides built-in light and dark palettes.

use std::collections::HashMap;

use strum_macros::{Display, EnumIter, EnumString};

use crate::color::ColorValue;

/// Key of the default text color, used when a theme key cannot be resolved.
pub const TEXT_FOREGROUND: &str = "text.foreground";

/// Key of the hyperlink color applied by `<a>`.
pub const LINK_FOREGROUND: &str = "link.foreground";

/// Key of the color for error text.
pub const ERROR_FOREGROUND: &str = "error.foreground";

/// Key of the color for warning text.
pub const WARNING_FOREGROUND: &str = "warning.foreground";

/// Key of the color for disabled or secondary text.
pub const DISABLED_FOREGROUND: &str = "disabled.foreground";

/// Lookup of named theme colors.
pub trait ThemeColors {
    /// The color registered under `key`, if any.
    fn color(&self, key: &str) -> Option<ColorValue>;
}

impl ThemeColors for HashMap<String, ColorValue> {
    fn color(&self, key: &str) -> Option<ColorValue> {
        self.get(key).copied()
    }
}

/// Built-in theme variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    /// Light backgrounds and dark text.
    Light,
    /// Dark backgrounds and light text.
    Dark,
}

impl Theme {
    /// Build the semantic color palette for this theme.
    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette::light(),
            Self::Dark => Palette::dark(),
        }
    }

    /// Background the palette's text colors are designed for.
    #[must_use]
    pub const fn background(self) -> ColorValue {
        match self {
            Self::Light => ColorValue::rgb(0xff, 0xff, 0xff),
            Self::Dark => ColorValue::rgb(0x1e, 0x1f, 0x22),
        }
    }
}

/// A mutable table of named colors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: HashMap<String, ColorValue>,
}

impl Palette {
    /// An empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the color for `key`.
    pub fn set(&mut self, key: impl Into<String>, color: ColorValue) {
        let _ = self.colors.insert(key.into(), color);
    }

    /// Builder form of [`Palette::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, color: ColorValue) -> Self {
        self.set(key, color);
        self
    }

    /// Number of registered colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    fn light() -> Self {
        Self::new()
            .with(TEXT_FOREGROUND, ColorValue::rgb(0x1f, 0x23, 0x28))
            .with(LINK_FOREGROUND, ColorValue::rgb(0x09, 0x69, 0xda))
            .with(ERROR_FOREGROUND, ColorValue::rgb(0xcf, 0x22, 0x2e))
            .with(WARNING_FOREGROUND, ColorValue::rgb(0x9a, 0x67, 0x00))
            .with(DISABLED_FOREGROUND, ColorValue::rgb(0x8c, 0x95, 0x9f))
    }

    fn dark() -> Self {
        Self::new()
            .with(TEXT_FOREGROUND, ColorValue::rgb(0xdf, 0xe1, 0xe5))
            .with(LINK_FOREGROUND, ColorValue::rgb(0x58, 0xa6, 0xff))
            .with(ERROR_FOREGROUND, ColorValue::rgb(0xf8, 0x51, 0x49))
            .with(WARNING_FOREGROUND, ColorValue::rgb(0xd2, 0x99, 0x22))
            .with(DISABLED_FOREGROUND, ColorValue::rgb(0x6e, 0x76, 0x81))
    }
}

impl ThemeColors for Palette {
    fn color(&self, key: &str) -> Option<ColorValue> {
        self.colors.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_builtin_palettes_define_all_keys() {
        for theme in Theme::iter() {
            let palette = theme.palette();
            for key in [
                TEXT_FOREGROUND,
                LINK_FOREGROUND,
                ERROR_FOREGROUND,
                WARNING_FOREGROUND,
                DISABLED_FOREGROUND,
            ] {
                assert!(palette.color(key).is_some(), "{theme} lacks {key}");
            }
        }
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("Light".parse::<Theme>(), Ok(Theme::Light));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_palette_set_replaces() {
        let mut palette = Palette::new();
        palette.set("accent", ColorValue::BLACK);
        palette.set("accent", ColorValue::WHITE);
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.color("accent"), Some(ColorValue::WHITE));
    }

    #[test]
    fn test_hash_map_theme() {
        let mut map = HashMap::new();
        let _ = map.insert("x".to_string(), ColorValue::BLUE);
        assert_eq!(map.color("x"), Some(ColorValue::BLUE));
        assert_eq!(map.color("y"), None);
    }
}
