//! Drawing-surface collaborator and a recording implementation.
//!
//! The engine paints through [`Surface`]: it selects a font and color,
//! then draws glyph runs at baseline positions and one-pixel lines for
//! underline and strikethrough. A lone truncation ellipsis that is wider
//! than the box is drawn under a [`ClipRect`]. [`DisplayList`] records those calls as
//! [`DisplayCommand`]s, which is how tests and the CLI's `--json` output
//! observe what was painted.

use serde::Serialize;

use crate::color::ColorValue;
use crate::font::Font;

/// A sink for paint operations.
pub trait Surface {
    /// Select the color for subsequent text and lines.
    fn set_color(&mut self, color: ColorValue);

    /// Select the font for subsequent text.
    fn set_font(&mut self, font: Font);

    /// Draw `text` with its baseline origin at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: f32, y: f32);

    /// Draw a one-pixel line from (`x1`, `y1`) to (`x2`, `y2`).
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);

    /// Restrict subsequent drawing to `clip`, or lift the restriction.
    fn set_clip(&mut self, clip: Option<ClipRect>);
}

/// An axis-aligned clip rectangle; (`x`, `y`) is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width; nothing at or right of `x + width` is drawn.
    pub width: f32,
    /// Height; nothing at or below `y + height` is drawn.
    pub height: f32,
}

impl ClipRect {
    /// Whether the point (`x`, `y`) lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// A surface that discards everything, for measure-only calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn set_color(&mut self, _color: ColorValue) {}

    fn set_font(&mut self, _font: Font) {}

    fn draw_text(&mut self, _text: &str, _x: f32, _y: f32) {}

    fn draw_line(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32) {}

    fn set_clip(&mut self, _clip: Option<ClipRect>) {}
}

/// A single recorded drawing command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayCommand {
    /// A glyph run.
    DrawText {
        /// X coordinate of the baseline origin.
        x: f32,
        /// Y coordinate of the baseline origin.
        y: f32,
        /// The text drawn.
        text: String,
        /// Font in effect.
        font: Font,
        /// Color in effect.
        color: ColorValue,
        /// Clip in effect.
        #[serde(skip_serializing_if = "Option::is_none")]
        clip: Option<ClipRect>,
    },
    /// A decoration line.
    DrawLine {
        /// Start x.
        x1: f32,
        /// Start y.
        y1: f32,
        /// End x.
        x2: f32,
        /// End y.
        y2: f32,
        /// Color in effect.
        color: ColorValue,
        /// Clip in effect.
        #[serde(skip_serializing_if = "Option::is_none")]
        clip: Option<ClipRect>,
    },
}

/// A surface that records drawing commands in order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayList {
    #[serde(skip)]
    color: Option<ColorValue>,
    #[serde(skip)]
    font: Option<Font>,
    #[serde(skip)]
    clip: Option<ClipRect>,
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded commands, in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Concatenation of all drawn text, in painting order.
    #[must_use]
    pub fn text(&self) -> String {
        self.text_runs().into_iter().map(|(text, _)| text).collect()
    }

    /// Each drawn glyph run with its baseline origin.
    #[must_use]
    pub fn text_runs(&self) -> Vec<(&str, (f32, f32))> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DisplayCommand::DrawText { text, x, y, .. } => Some((text.as_str(), (*x, *y))),
                DisplayCommand::DrawLine { .. } => None,
            })
            .collect()
    }

    /// Number of decoration lines drawn.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DisplayCommand::DrawLine { .. }))
            .count()
    }

    /// Remove all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.color = None;
        self.font = None;
        self.clip = None;
    }
}

impl Surface for DisplayList {
    fn set_color(&mut self, color: ColorValue) {
        self.color = Some(color);
    }

    fn set_font(&mut self, font: Font) {
        self.font = Some(font);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        self.commands.push(DisplayCommand::DrawText {
            x,
            y,
            text: text.to_string(),
            font: self.font.unwrap_or_default(),
            color: self.color.unwrap_or(ColorValue::BLACK),
            clip: self.clip,
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.commands.push(DisplayCommand::DrawLine {
            x1,
            y1,
            x2,
            y2,
            color: self.color.unwrap_or(ColorValue::BLACK),
            clip: self.clip,
        });
    }

    fn set_clip(&mut self, clip: Option<ClipRect>) {
        self.clip = clip;
    }
}
