//! System font discovery.
//!
//! A [`FontSet`] holds up to four faces (regular, bold, italic and
//! bold-italic). Faces that cannot be found are left empty and lookups fall
//! back towards the regular face.

use std::fs;
use std::path::{Path, PathBuf};

use fontdue::FontSettings;
use lumen_common::warn_once;
use lumen_markup::Font;

use crate::error::RasterError;

/// Component name used for diagnostics from this crate.
pub const COMPONENT: &str = "Raster";

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// The faces used to measure and draw text.
#[derive(Default)]
pub struct FontSet {
    regular: Option<fontdue::Font>,
    bold: Option<fontdue::Font>,
    italic: Option<fontdue::Font>,
    bold_italic: Option<fontdue::Font>,
}

impl FontSet {
    /// A set with no faces; everything falls back to approximate metrics
    /// and no glyphs are drawn.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Search the usual system locations for each face.
    ///
    /// Warns once when no regular face exists, listing the paths searched.
    #[must_use]
    pub fn load_system() -> Self {
        let set = Self {
            regular: load_first(FONT_SEARCH_PATHS),
            bold: load_first(FONT_BOLD_SEARCH_PATHS),
            italic: load_first(FONT_ITALIC_SEARCH_PATHS),
            bold_italic: load_first(FONT_BOLD_ITALIC_SEARCH_PATHS),
        };
        if set.regular.is_none() {
            let mut message = String::from("No system font found; text will not be drawn.\nSearched:");
            for path in FONT_SEARCH_PATHS {
                message.push_str("\n  - ");
                message.push_str(path);
            }
            warn_once(COMPONENT, &message);
        }
        set
    }

    /// Use the font file at `path` for every face.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a font.
    pub fn from_file(path: &Path) -> Result<Self, RasterError> {
        let data = fs::read(path).map_err(|source| RasterError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let face = parse(data).map_err(|reason| RasterError::InvalidFont {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(Self {
            regular: Some(face),
            ..Self::default()
        })
    }

    /// Whether no face could be loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.regular.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.bold_italic.is_none()
    }

    /// The best available face for `font`, falling back through: exact
    /// match, partial match, regular.
    #[must_use]
    pub fn select(&self, font: &Font) -> Option<&fontdue::Font> {
        match (font.is_bold(), font.is_italic()) {
            (true, true) => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.regular.as_ref()),
            (true, false) => self.bold.as_ref().or(self.regular.as_ref()),
            (false, true) => self.italic.as_ref().or(self.regular.as_ref()),
            (false, false) => self.regular.as_ref(),
        }
    }

    /// The search list for the regular face.
    #[must_use]
    pub fn search_paths() -> Vec<PathBuf> {
        FONT_SEARCH_PATHS.iter().map(PathBuf::from).collect()
    }
}

fn parse(data: Vec<u8>) -> Result<fontdue::Font, String> {
    fontdue::Font::from_bytes(data, FontSettings::default()).map_err(str::to_string)
}

fn load_first(paths: &[&str]) -> Option<fontdue::Font> {
    paths.iter().find_map(|path| {
        let data = fs::read(path).ok()?;
        parse(data).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_selects_nothing() {
        let set = FontSet::empty();
        assert!(set.is_empty());
        assert!(set.select(&Font::regular(12.0)).is_none());
        assert!(set.select(&Font::regular(12.0).derive(true, true)).is_none());
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let result = FontSet::from_file(Path::new("/nonexistent/lumen/font.ttf"));
        assert!(matches!(result, Err(RasterError::Read { .. })));
    }

    #[test]
    fn test_search_paths_cover_each_platform() {
        let paths = FontSet::search_paths();
        assert!(paths.iter().any(|p| p.to_string_lossy().contains("dejavu")));
        assert!(paths.iter().any(|p| p.to_string_lossy().starts_with("C:")));
    }
}
