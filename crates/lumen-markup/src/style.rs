//! Style state during a scan, and the reusable per-call scratch space.

use std::ops::Range;

use strum::IntoEnumIterator;

use crate::color::ColorValue;
use crate::font::Font;
use crate::surface::Surface;
use crate::tag::TagKind;

/// Mutable formatting state for one scan.
///
/// The color stack holds the colors in effect before each currently open
/// `<font>` or `<a>` tag, so closing a tag restores exactly the color that
/// preceded it.
#[derive(Debug)]
pub struct StyleState<'s> {
    /// Inside `<b>`/`<strong>`.
    pub bold: bool,
    /// Inside `<i>`/`<em>`.
    pub italic: bool,
    /// Inside `<u>`.
    pub underline: bool,
    /// Inside `<s>`/`<strike>`.
    pub strikethrough: bool,
    /// Inside `<a>`.
    pub link: bool,
    color: ColorValue,
    base_color: ColorValue,
    stack: &'s mut Vec<ColorValue>,
    open_color_tags: usize,
}

impl<'s> StyleState<'s> {
    /// Fresh state painting in `base_color`, using `stack` for nesting.
    ///
    /// The stack is cleared; leftovers from a previous call are discarded.
    pub fn new(base_color: ColorValue, stack: &'s mut Vec<ColorValue>) -> Self {
        stack.clear();
        Self {
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            link: false,
            color: base_color,
            base_color,
            stack,
            open_color_tags: 0,
        }
    }

    /// The color text is currently painted in.
    #[must_use]
    pub const fn color(&self) -> ColorValue {
        self.color
    }

    /// `base` with the current bold/italic flags applied.
    #[must_use]
    pub const fn font(&self, base: Font) -> Font {
        base.derive(self.bold, self.italic)
    }

    /// Whether decoration lines are drawn under or through text.
    #[must_use]
    pub const fn underlined(&self) -> bool {
        self.underline || self.link
    }

    /// Enter a color-affecting tag: save the current color and switch to `color`.
    pub fn push_color(&mut self, color: ColorValue) {
        self.stack.push(self.color);
        self.color = color;
        self.open_color_tags += 1;
    }

    /// Count a color-affecting tag that did not change the color
    /// (foreground forced by the caller).
    pub fn open_color_tag(&mut self) {
        self.open_color_tags += 1;
    }

    /// Leave a color-affecting tag.
    ///
    /// Restores the saved color; with nothing saved, or when the caller
    /// forced the foreground, falls back to the base color.
    pub fn pop_color(&mut self, forced: bool) {
        self.open_color_tags = self.open_color_tags.saturating_sub(1);
        self.color = if forced {
            self.base_color
        } else {
            self.stack.pop().unwrap_or(self.base_color)
        };
    }

    /// Whether a tag of `kind` is currently open.
    ///
    /// Tags without lasting state (line breaks, `<html>`) are never open.
    #[must_use]
    pub fn is_open(&self, kind: TagKind) -> bool {
        match kind {
            TagKind::Bold => self.bold,
            TagKind::Italic => self.italic,
            TagKind::Underline => self.underline,
            TagKind::Strikethrough => self.strikethrough,
            TagKind::Link => self.link,
            // Open `<a>` tags share the color count with `<font>`.
            TagKind::Font => self.open_color_tags > usize::from(self.link),
            TagKind::LineBreak | TagKind::Paragraph | TagKind::Html => false,
        }
    }

    /// The first tag that must be closed and is still open, if any.
    #[must_use]
    pub fn unclosed(&self) -> Option<TagKind> {
        TagKind::iter().find(|&kind| kind.requires_close() && self.is_open(kind))
    }
}

/// A deferred paint operation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PaintOp {
    Text {
        range: Range<usize>,
        x: f32,
        y: f32,
        font: Font,
        color: ColorValue,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: ColorValue,
    },
}

/// Reusable working memory for render calls.
///
/// A caller that renders many strings from one thread, such as a UI event
/// loop painting list cells, can keep one `RenderScratch` and pass it to
/// every call so the hot path does not allocate once the buffers have
/// grown. Any other caller passes `None` and each call allocates its own.
/// The scratch is exclusively borrowed for the duration of a call, so a
/// shared instance can never be mutated by two calls at once.
#[derive(Debug, Default)]
pub struct RenderScratch {
    pub(crate) chars: Vec<char>,
    pub(crate) colors: Vec<ColorValue>,
    pub(crate) run: String,
    pub(crate) tag: String,
    pub(crate) ops: Vec<PaintOp>,
    pub(crate) op_text: String,
}

impl RenderScratch {
    /// Empty scratch space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare for scanning `text`.
    pub(crate) fn reset(&mut self, text: &str) {
        self.chars.clear();
        self.chars.extend(text.chars());
        self.colors.clear();
        self.run.clear();
        self.tag.clear();
        self.ops.clear();
        self.op_text.clear();
    }

    /// Number of paint operations recorded by the last call.
    #[must_use]
    pub fn recorded_ops(&self) -> usize {
        self.ops.len()
    }

    /// Send the recorded operations to `surface`, in order.
    pub(crate) fn replay(&self, surface: &mut dyn Surface) {
        let mut current_color = None;
        let mut current_font = None;
        for op in &self.ops {
            match op {
                PaintOp::Text {
                    range,
                    x,
                    y,
                    font,
                    color,
                } => {
                    if current_font != Some(*font) {
                        surface.set_font(*font);
                        current_font = Some(*font);
                    }
                    if current_color != Some(*color) {
                        surface.set_color(*color);
                        current_color = Some(*color);
                    }
                    surface.draw_text(&self.op_text[range.clone()], *x, *y);
                }
                PaintOp::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                } => {
                    if current_color != Some(*color) {
                        surface.set_color(*color);
                        current_color = Some(*color);
                    }
                    surface.draw_line(*x1, *y1, *x2, *y2);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DisplayList;

    #[test]
    fn test_nested_colors_restore_in_order() {
        let mut stack = Vec::new();
        let base = ColorValue::BLACK;
        let red = ColorValue::rgb(255, 0, 0);
        let mut style = StyleState::new(base, &mut stack);

        style.push_color(red);
        style.push_color(ColorValue::BLUE);
        assert_eq!(style.color(), ColorValue::BLUE);
        style.pop_color(false);
        assert_eq!(style.color(), red);
        style.pop_color(false);
        assert_eq!(style.color(), base);
        // Nothing left to restore.
        style.pop_color(false);
        assert_eq!(style.color(), base);
    }

    #[test]
    fn test_pop_empty_stack_resets_to_base() {
        let mut stack = Vec::new();
        let mut style = StyleState::new(ColorValue::WHITE, &mut stack);
        style.pop_color(false);
        assert_eq!(style.color(), ColorValue::WHITE);
    }

    #[test]
    fn test_new_clears_leftovers() {
        let mut stack = vec![ColorValue::BLUE, ColorValue::BLUE];
        let mut style = StyleState::new(ColorValue::BLACK, &mut stack);
        style.pop_color(false);
        assert_eq!(style.color(), ColorValue::BLACK);
    }

    #[test]
    fn test_unclosed_reports_first_open_tag() {
        let mut stack = Vec::new();
        let mut style = StyleState::new(ColorValue::BLACK, &mut stack);
        assert_eq!(style.unclosed(), None);
        style.italic = true;
        assert_eq!(style.unclosed(), Some(TagKind::Italic));
        style.italic = false;
        style.open_color_tag();
        assert_eq!(style.unclosed(), Some(TagKind::Font));
        style.pop_color(true);
        assert_eq!(style.unclosed(), None);
    }

    #[test]
    fn test_open_link_is_not_an_open_font() {
        let mut stack = Vec::new();
        let mut style = StyleState::new(ColorValue::BLACK, &mut stack);
        style.push_color(ColorValue::BLUE);
        style.link = true;
        assert!(style.is_open(TagKind::Link));
        assert!(!style.is_open(TagKind::Font));
        assert!(!style.is_open(TagKind::LineBreak));

        style.push_color(ColorValue::WHITE);
        assert!(style.is_open(TagKind::Font));
    }

    #[test]
    fn test_replay_sets_state_once_per_change() {
        let mut scratch = RenderScratch::new();
        scratch.reset("ab");
        scratch.op_text.push_str("ab");
        let font = Font::regular(10.0);
        scratch.ops.push(PaintOp::Text {
            range: 0..1,
            x: 0.0,
            y: 10.0,
            font,
            color: ColorValue::BLACK,
        });
        scratch.ops.push(PaintOp::Text {
            range: 1..2,
            x: 6.0,
            y: 10.0,
            font,
            color: ColorValue::BLACK,
        });

        let mut list = DisplayList::new();
        scratch.replay(&mut list);
        assert_eq!(list.text(), "ab");
        assert_eq!(list.text_runs()[1].1, (6.0, 10.0));
    }
}
