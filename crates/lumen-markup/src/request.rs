//! Parameters of a single render call.

use crate::color::ColorValue;
use crate::font::Font;
use crate::layout::LayoutPolicy;

/// Everything a render call needs to know about the text and its box.
///
/// `y` is the baseline of the first line, not the top of the box.
/// Constructed with [`RenderRequest::new`] and refined with the builder
/// methods; unset limits are unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest<'a> {
    /// The text, with or without markup.
    pub text: &'a str,
    /// Char index to start scanning at (skips a marker tag the caller
    /// already consumed).
    pub start_index: usize,
    /// X of the origin.
    pub x: f64,
    /// Baseline y of the first line.
    pub y: f64,
    /// Available width.
    pub max_width: f64,
    /// Available height.
    pub max_height: f64,
    /// Base font; `None` selects the default font.
    pub font: Option<Font>,
    /// Base text color.
    pub color: ColorValue,
    /// Overflow handling.
    pub policy: LayoutPolicy,
    /// Paint, or only measure.
    pub paint: bool,
    /// Background the text is painted on, used to keep colors readable.
    pub background: Option<ColorValue>,
    /// Ignore color changes from `<font>` and `<a>` (for example while
    /// painting a selected row in a fixed foreground).
    pub force_foreground: bool,
}

impl<'a> RenderRequest<'a> {
    /// Paint `text` in black, unbounded, at the origin.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self {
            text,
            start_index: 0,
            x: 0.0,
            y: 0.0,
            max_width: f64::INFINITY,
            max_height: f64::INFINITY,
            font: None,
            color: ColorValue::BLACK,
            policy: LayoutPolicy::Clip,
            paint: true,
            background: None,
            force_foreground: false,
        }
    }

    /// Set the origin.
    #[must_use]
    pub const fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the available box.
    #[must_use]
    pub const fn within(mut self, max_width: f64, max_height: f64) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    /// Set the base font.
    #[must_use]
    pub const fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Set the base color.
    #[must_use]
    pub const fn color(mut self, color: ColorValue) -> Self {
        self.color = color;
        self
    }

    /// Set the layout policy.
    #[must_use]
    pub const fn policy(mut self, policy: LayoutPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Measure without painting.
    #[must_use]
    pub const fn measure_only(mut self) -> Self {
        self.paint = false;
        self
    }

    /// Set the paint flag explicitly.
    #[must_use]
    pub const fn paint(mut self, paint: bool) -> Self {
        self.paint = paint;
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn background(mut self, background: ColorValue) -> Self {
        self.background = Some(background);
        self
    }

    /// Suppress tag-driven color changes.
    #[must_use]
    pub const fn force_foreground(mut self) -> Self {
        self.force_foreground = true;
        self
    }

    /// Start scanning at char index `start_index`.
    #[must_use]
    pub const fn start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    /// The base font, or the default when none was given.
    #[must_use]
    pub fn base_font(&self) -> Font {
        self.font.unwrap_or_default()
    }
}
