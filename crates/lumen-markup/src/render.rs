//! The scan-and-emit loop.
//!
//! A single forward pass over the input alternates between tags and runs
//! of plain text. Tags mutate the [`StyleState`]; each plain-text run is
//! measured as a whole and then emitted according to the layout policy,
//! either fully or cut at the point the policy chooses.
//!
//! ```text
//!   text ──► tag? ──yes──► tag table ──► style state / line break
//!              │
//!              no
//!              ▼
//!         entity + run ──► measure ──► policy ──► paint ops / extent
//! ```
//!
//! Paint operations are recorded while scanning and only sent to the
//! surface once the whole input has been scanned successfully. Markup that
//! turns out to be unusable part-way through can therefore fall back to
//! plain text without leaving half a styled paint behind.

use std::mem;

use lumen_common::{DiagnosticSink, RenderConfig, diagnostics};

use crate::color::{ColorProblem, ColorValue, ensure_contrasting_color, resolve_font_color};
use crate::entity::{EntityMatch, resolve_entity};
use crate::error::{Condition, Diagnostic, MarkupError};
use crate::font::{Font, FontMetrics};
use crate::layout::{
    ELLIPSIS, LayoutPolicy, WrapDecision, average_char_width, byte_offset, estimate_fit,
    fit_prefix, is_collapsible_whitespace, truncation_cut, wrap_decision,
};
use crate::request::RenderRequest;
use crate::style::{PaintOp, RenderScratch, StyleState};
use crate::surface::{NullSurface, Surface};
use crate::tag::{TagKind, lookup, parse_tag};
use crate::theme::{LINK_FOREGROUND, ThemeColors};

/// Component name used when reporting diagnostics.
pub const COMPONENT: &str = "Markup";

/// Length of the `<html>` marker skipped by [`MarkupRenderer::render_string`].
pub const HTML_MARKER_LEN: usize = 6;

/// Vertical advance of `<p>`, in line heights.
const PARAGRAPH_SPACING: f64 = 1.5;

/// Renders and measures marked-up text.
///
/// Holds the collaborators shared by every call: font metrics, an
/// optional theme for `!key` colors, the diagnostics sink and the failure
/// mode. A renderer is cheap to build and holds no per-call state.
pub struct MarkupRenderer<'a> {
    metrics: &'a dyn FontMetrics,
    theme: Option<&'a dyn ThemeColors>,
    diagnostics: &'a dyn DiagnosticSink,
    config: RenderConfig,
}

impl<'a> MarkupRenderer<'a> {
    /// A lenient renderer with no theme, reporting to the process-wide sink.
    #[must_use]
    pub fn new(metrics: &'a dyn FontMetrics) -> Self {
        Self {
            metrics,
            theme: None,
            diagnostics: diagnostics::global(),
            config: RenderConfig::default(),
        }
    }

    /// Resolve `!key` colors and the link color through `theme`.
    #[must_use]
    pub fn with_theme(mut self, theme: &'a dyn ThemeColors) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Report malformed markup to `sink` instead of the process-wide sink.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Use `config` (strict or lenient).
    #[must_use]
    pub const fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// The font metrics in use.
    #[must_use]
    pub fn metrics(&self) -> &'a dyn FontMetrics {
        self.metrics
    }

    /// Render `text`, treating it as markup only if it starts with
    /// `<html` or `<HTML`.
    ///
    /// Markup is scanned from just after the six-character `<html>`
    /// marker. Returns the width painted.
    ///
    /// # Errors
    ///
    /// [`MarkupError::UnsupportedPolicy`] for [`LayoutPolicy::WordWrap`];
    /// [`MarkupError::Malformed`] for bad markup in strict mode.
    pub fn render_string(
        &self,
        request: &RenderRequest<'_>,
        surface: &mut dyn Surface,
        scratch: Option<&mut RenderScratch>,
    ) -> Result<f64, MarkupError> {
        require_single_line(request.policy)?;
        if request.text.starts_with("<html") || request.text.starts_with("<HTML") {
            let request = request.clone().start_index(HTML_MARKER_LEN);
            self.render_markup(&request, surface, scratch)
        } else {
            Ok(self.render_plain(request, surface))
        }
    }

    /// Render `text` as markup on a single line. Returns the width painted.
    ///
    /// # Errors
    ///
    /// [`MarkupError::UnsupportedPolicy`] for [`LayoutPolicy::WordWrap`];
    /// [`MarkupError::Malformed`] for bad markup in strict mode.
    pub fn render_html(
        &self,
        request: &RenderRequest<'_>,
        surface: &mut dyn Surface,
        scratch: Option<&mut RenderScratch>,
    ) -> Result<f64, MarkupError> {
        require_single_line(request.policy)?;
        self.render_markup(request, surface, scratch)
    }

    /// Render `text` literally, without interpreting markup. Returns the
    /// width painted.
    ///
    /// # Errors
    ///
    /// [`MarkupError::UnsupportedPolicy`] for [`LayoutPolicy::WordWrap`].
    pub fn render_plain_string(
        &self,
        request: &RenderRequest<'_>,
        surface: &mut dyn Surface,
    ) -> Result<f64, MarkupError> {
        require_single_line(request.policy)?;
        Ok(self.render_plain(request, surface))
    }

    /// Render `text` as markup under any layout policy.
    ///
    /// Returns the width painted for single-line policies and the height
    /// painted, including the last line, for [`LayoutPolicy::WordWrap`].
    ///
    /// # Errors
    ///
    /// [`MarkupError::Malformed`] for bad markup in strict mode.
    pub fn render_multiline(
        &self,
        request: &RenderRequest<'_>,
        surface: &mut dyn Surface,
        scratch: Option<&mut RenderScratch>,
    ) -> Result<f64, MarkupError> {
        self.render_markup(request, surface, scratch)
    }

    /// Measure `request` as markup without painting.
    ///
    /// # Errors
    ///
    /// [`MarkupError::Malformed`] for bad markup in strict mode.
    pub fn measure(&self, request: &RenderRequest<'_>) -> Result<f64, MarkupError> {
        let request = request.clone().measure_only();
        self.render_markup(&request, &mut NullSurface, None)
    }

    fn render_markup(
        &self,
        request: &RenderRequest<'_>,
        surface: &mut dyn Surface,
        scratch: Option<&mut RenderScratch>,
    ) -> Result<f64, MarkupError> {
        let mut private = None;
        let scratch = match scratch {
            Some(shared) => shared,
            None => private.insert(RenderScratch::new()),
        };

        match self.scan(request, scratch, false) {
            Ok(extent) => {
                if request.paint {
                    scratch.replay(surface);
                }
                Ok(extent)
            }
            Err(diagnostic) if self.config.failure_mode.is_strict() => {
                Err(MarkupError::Malformed(diagnostic))
            }
            Err(diagnostic) => {
                self.report(&diagnostic);
                Ok(self.render_fallback(request, surface, scratch))
            }
        }
    }

    /// Render the whole input as plain text after a fatal markup problem.
    fn render_fallback(
        &self,
        request: &RenderRequest<'_>,
        surface: &mut dyn Surface,
        scratch: &mut RenderScratch,
    ) -> f64 {
        let request = request.clone().start_index(0);
        if request.policy.is_single_line() {
            return self.render_plain(&request, surface);
        }
        // A literal scan interprets nothing, so it cannot fail.
        match self.scan(&request, scratch, true) {
            Ok(extent) => {
                if request.paint {
                    scratch.replay(surface);
                }
                extent
            }
            Err(_) => 0.0,
        }
    }

    fn scan(
        &self,
        request: &RenderRequest<'_>,
        scratch: &mut RenderScratch,
        literal: bool,
    ) -> Result<f64, Diagnostic> {
        scratch.reset(request.text);
        let RenderScratch {
            chars,
            colors,
            run,
            tag,
            ops,
            op_text,
        } = scratch;

        Scan {
            renderer: self,
            request,
            chars,
            style: StyleState::new(request.color, colors),
            pen: Pen::new(request.x, request.y),
            painter: Painter {
                paint: request.paint,
                ops,
                text: op_text,
            },
            run,
            tag,
            base_font: request.base_font(),
            literal,
            uppercase_tags: None,
        }
        .run()
    }

    pub(crate) fn report(&self, diagnostic: &Diagnostic) {
        let _ = self
            .diagnostics
            .warn_once(COMPONENT, &diagnostic.message, &diagnostic.detail);
    }
}

fn require_single_line(policy: LayoutPolicy) -> Result<(), MarkupError> {
    if policy.is_single_line() {
        Ok(())
    } else {
        Err(MarkupError::UnsupportedPolicy(policy))
    }
}

/// Position and accumulated extent of the scan.
#[derive(Debug)]
struct Pen {
    origin_x: f64,
    x: f64,
    y: f64,
    width_painted: f64,
    height_painted: f64,
    last_height: f64,
    last_was_whitespace: bool,
    truncated: bool,
    height_exhausted: bool,
    done: bool,
}

impl Pen {
    const fn new(x: f64, y: f64) -> Self {
        Self {
            origin_x: x,
            x,
            y,
            width_painted: 0.0,
            height_painted: 0.0,
            last_height: 0.0,
            last_was_whitespace: false,
            truncated: false,
            height_exhausted: false,
            done: false,
        }
    }
}

/// Records paint operations when painting, and nothing when measuring.
struct Painter<'s> {
    paint: bool,
    ops: &'s mut Vec<PaintOp>,
    text: &'s mut String,
}

impl Painter<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn text(&mut self, text: &str, x: f64, y: f64, font: Font, color: ColorValue) {
        if !self.paint || text.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(text);
        self.ops.push(PaintOp::Text {
            range: start..self.text.len(),
            x: x as f32,
            y: y as f32,
            font,
            color,
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    fn line(&mut self, x1: f64, x2: f64, y: f64, color: ColorValue) {
        if !self.paint {
            return;
        }
        self.ops.push(PaintOp::Line {
            x1: x1 as f32,
            y1: y as f32,
            x2: x2 as f32,
            y2: y as f32,
            color,
        });
    }
}

/// State of one pass over the input.
struct Scan<'r> {
    renderer: &'r MarkupRenderer<'r>,
    request: &'r RenderRequest<'r>,
    chars: &'r [char],
    style: StyleState<'r>,
    pen: Pen,
    painter: Painter<'r>,
    run: &'r mut String,
    tag: &'r mut String,
    base_font: Font,
    literal: bool,
    /// Case of the first tag seen; later tags must use the same case.
    uppercase_tags: Option<bool>,
}

impl Scan<'_> {
    fn run(mut self) -> Result<f64, Diagnostic> {
        let len = self.chars.len();
        let mut pos = self.request.start_index.min(len);

        while pos < len && !self.pen.done {
            if !self.literal && self.chars[pos] == '<' {
                pos = self.tag(pos)?;
                continue;
            }

            if self.pen.last_was_whitespace {
                while pos < len && is_collapsible_whitespace(self.chars[pos]) {
                    pos += 1;
                }
                if pos >= len {
                    break;
                }
                if !self.literal && self.chars[pos] == '<' {
                    continue;
                }
            }

            pos = self.collect_run(pos)?;
            self.emit_run();
        }

        if !self.literal
            && !self.pen.done
            && let Some(kind) = self.style.unclosed()
        {
            return Err(self.diagnostic(
                Condition::UnterminatedTag,
                format!("{kind} tag still open at end of input"),
                len,
            ));
        }

        Ok(match self.request.policy {
            LayoutPolicy::WordWrap if self.pen.height_exhausted => self.pen.height_painted,
            LayoutPolicy::WordWrap => self.pen.height_painted + self.pen.last_height,
            LayoutPolicy::Clip | LayoutPolicy::Truncate => self.pen.width_painted,
        })
    }

    fn diagnostic(&self, condition: Condition, message: impl Into<String>, at: usize) -> Diagnostic {
        Diagnostic::new(condition, message, self.request.text, at)
    }

    /// Report a recoverable problem, or abort the scan in strict mode.
    fn recover(
        &self,
        condition: Condition,
        message: impl Into<String>,
        at: usize,
    ) -> Result<(), Diagnostic> {
        let diagnostic = self.diagnostic(condition, message, at);
        if !condition.is_recoverable() || self.renderer.config.failure_mode.is_strict() {
            return Err(diagnostic);
        }
        self.renderer.report(&diagnostic);
        Ok(())
    }

    /// Process the tag starting at `pos` (a `<`). Returns the position
    /// just past its `>`.
    fn tag(&mut self, pos: usize) -> Result<usize, Diagnostic> {
        let Some(offset) = self.chars[pos + 1..].iter().position(|&c| c == '>') else {
            return Err(self.diagnostic(Condition::UnterminatedTag, "Matching '>' not found", pos));
        };
        let end = pos + 1 + offset;

        let mut body = mem::take(self.tag);
        body.clear();
        body.extend(&self.chars[pos + 1..end]);
        let result = self.interpret(&body, pos);
        *self.tag = body;

        result.map(|()| end + 1)
    }

    fn interpret(&mut self, body: &str, pos: usize) -> Result<(), Diagnostic> {
        let parsed = parse_tag(body);
        let name_pos = pos + 1 + parsed.name_offset;

        let Some(kind) = lookup(parsed.name) else {
            let slash = if parsed.closing { "/" } else { "" };
            return self.recover(
                Condition::UnknownTag,
                format!("Malformed or unsupported tag <{slash}{}>", parsed.name),
                name_pos,
            );
        };

        if kind != TagKind::Html && self.changes_case(parsed.name) {
            let slash = if parsed.closing { "/" } else { "" };
            return self.recover(
                Condition::UnknownTag,
                format!(
                    "Tag <{slash}{}> does not match the case of earlier tags",
                    parsed.name
                ),
                name_pos,
            );
        }

        if parsed.closing {
            self.close(kind, name_pos)
        } else {
            let attributes_pos = name_pos + parsed.name.chars().count();
            self.open(kind, parsed.attributes, pos, attributes_pos)
        }
    }

    /// Whether `name` switches case relative to the first tag of the input.
    fn changes_case(&mut self, name: &str) -> bool {
        let uppercase = name.bytes().any(|b| b.is_ascii_uppercase());
        match self.uppercase_tags {
            Some(first) => first != uppercase,
            None => {
                self.uppercase_tags = Some(uppercase);
                false
            }
        }
    }

    fn open(
        &mut self,
        kind: TagKind,
        attributes: &str,
        pos: usize,
        attributes_pos: usize,
    ) -> Result<(), Diagnostic> {
        if kind.multi_line_only() && self.request.policy != LayoutPolicy::WordWrap {
            return Ok(());
        }
        if kind.pushes_color() {
            if self.request.force_foreground {
                self.style.open_color_tag();
            } else {
                let color = self.tag_color(kind, attributes, attributes_pos)?;
                self.style
                    .push_color(ensure_contrasting_color(color, self.request.background));
            }
        }
        match kind {
            TagKind::Bold => self.style.bold = true,
            TagKind::Italic => self.style.italic = true,
            TagKind::Underline => self.style.underline = true,
            TagKind::Strikethrough => self.style.strikethrough = true,
            TagKind::Link => self.style.link = true,
            TagKind::Font => {}
            TagKind::LineBreak => {
                let line_height = self.line_height();
                self.new_line(line_height);
            }
            TagKind::Paragraph => {
                let line_height = self.line_height();
                self.new_line(line_height * PARAGRAPH_SPACING);
            }
            TagKind::Html => {
                if pos != 0 {
                    return self.recover(
                        Condition::UnknownTag,
                        "<html> is only allowed as the first tag",
                        pos + 1,
                    );
                }
            }
        }
        Ok(())
    }

    /// The color a color-pushing tag switches to.
    fn tag_color(
        &self,
        kind: TagKind,
        attributes: &str,
        attributes_pos: usize,
    ) -> Result<ColorValue, Diagnostic> {
        if kind == TagKind::Link {
            return Ok(self
                .renderer
                .theme
                .and_then(|theme| theme.color(LINK_FOREGROUND))
                .unwrap_or(ColorValue::BLUE));
        }

        let resolved = resolve_font_color(attributes, self.style.color(), self.renderer.theme);
        if let Some(problem) = resolved.problem {
            let (condition, message) = match problem {
                ColorProblem::MissingAttribute => (
                    Condition::BadColorAttribute,
                    "Could not find color identifier in font declaration".to_string(),
                ),
                ColorProblem::IllegalHex(text) => (
                    Condition::BadColorAttribute,
                    format!("Illegal hexadecimal color text: {text}"),
                ),
                ColorProblem::UnresolvedKey(key) => (
                    Condition::UnresolvedThemeColor,
                    format!("Could not resolve logical color: {key}"),
                ),
            };
            self.recover(condition, message, attributes_pos + resolved.offset)?;
        }
        Ok(resolved.color)
    }

    fn close(&mut self, kind: TagKind, name_pos: usize) -> Result<(), Diagnostic> {
        if kind.pushes_color() {
            self.style.pop_color(self.request.force_foreground);
        }
        match kind {
            TagKind::Bold => {
                if !self.style.bold {
                    self.recover(
                        Condition::UnmatchedClose,
                        "Closing bold tag without opening bold tag",
                        name_pos,
                    )?;
                }
                self.style.bold = false;
            }
            TagKind::Italic => {
                if !self.style.italic {
                    self.recover(
                        Condition::UnmatchedClose,
                        "Closing italics tag without opening italics tag",
                        name_pos,
                    )?;
                }
                self.style.italic = false;
            }
            TagKind::Underline => self.style.underline = false,
            TagKind::Strikethrough => self.style.strikethrough = false,
            TagKind::Link => self.style.link = false,
            TagKind::Font | TagKind::LineBreak | TagKind::Paragraph | TagKind::Html => {}
        }
        Ok(())
    }

    /// Gather the plain-text run starting at `pos` into the run buffer.
    ///
    /// A run extends to the next `<` or character reference. A reference
    /// can only start a run; its decoded character is never re-scanned. A
    /// `&` that starts no reference is ordinary text and stays in the run.
    /// Returns the position just past the run.
    fn collect_run(&mut self, mut pos: usize) -> Result<usize, Diagnostic> {
        let len = self.chars.len();
        self.run.clear();

        while pos < len {
            let c = self.chars[pos];
            if self.literal || c != '&' {
                if c == '<' && !self.literal {
                    break;
                }
                self.run.push(c);
                pos += 1;
                continue;
            }

            let (ch, consumed) = match resolve_entity(self.chars, pos) {
                EntityMatch::Decoded { .. } if !self.run.is_empty() => break,
                EntityMatch::Decoded { ch, len } => (ch, len),
                EntityMatch::Unparsable { body, .. } => {
                    self.recover(
                        Condition::BadNumericEntity,
                        format!("Unparsable numeric entity: {body}"),
                        pos,
                    )?;
                    ('&', 1)
                }
                EntityMatch::Literal => ('&', 1),
            };
            self.run.push(ch);
            pos += consumed;
        }
        Ok(pos)
    }

    fn emit_run(&mut self) {
        let run = mem::take(self.run);
        match self.request.policy {
            LayoutPolicy::WordWrap => self.wrap_run(&run),
            LayoutPolicy::Clip | LayoutPolicy::Truncate => self.single_line_run(&run),
        }
        *self.run = run;
    }

    fn single_line_run(&mut self, run: &str) {
        let metrics = self.renderer.metrics;
        let font = self.style.font(self.base_font);
        let width = f64::from(metrics.text_width(run, &font));
        self.pen.last_height = f64::from(metrics.line_height(&font));

        let available = self.request.max_width - self.pen.width_painted;
        if width <= available {
            self.emit(run, width, font);
            self.pen.last_was_whitespace = ends_with_whitespace(run);
            return;
        }

        let count = run.chars().count();
        let char_width = average_char_width(width, count, f64::from(metrics.max_advance(&font)));
        if self.request.policy == LayoutPolicy::Truncate {
            let (keep, kept_width) = truncation_cut(metrics, &font, run, count, available, char_width);
            self.emit(&run[..byte_offset(run, keep)], kept_width, font);
            self.emit_ellipsis();
        } else {
            let estimate = estimate_fit(available, char_width);
            let (keep, kept_width) = fit_prefix(metrics, &font, run, count, available, estimate);
            self.emit(&run[..byte_offset(run, keep)], kept_width, font);
        }
        self.pen.done = true;
    }

    fn wrap_run(&mut self, run: &str) {
        let metrics = self.renderer.metrics;
        let font = self.style.font(self.base_font);
        let line_height = f64::from(metrics.line_height(&font));
        let max_advance = f64::from(metrics.max_advance(&font));
        self.pen.last_height = line_height;

        let mut rest = run;
        while !rest.is_empty() && !self.pen.done {
            let width = f64::from(metrics.text_width(rest, &font));
            let available = self.request.max_width - self.pen.width_painted;
            if width <= available {
                self.emit(rest, width, font);
                self.pen.last_was_whitespace = ends_with_whitespace(rest);
                return;
            }

            let count = rest.chars().count();
            let char_width = average_char_width(width, count, max_advance);
            let at_line_start = self.pen.width_painted <= 0.0;
            let keep = match wrap_decision(
                metrics,
                &font,
                rest,
                count,
                available,
                char_width,
                at_line_start,
            ) {
                WrapDecision::BreakAt { keep } | WrapDecision::Brutal { keep } => keep,
                WrapDecision::NextLine => 0,
            };

            let split = byte_offset(rest, keep);
            let head = &rest[..split];
            if !head.is_empty() {
                let head_width = f64::from(metrics.text_width(head, &font));
                self.emit(head, head_width, font);
            }
            self.new_line(line_height);
            rest = rest[split..].trim_start_matches(is_collapsible_whitespace);
        }
        self.pen.last_was_whitespace = true;
    }

    /// Paint (or just account for) `text` of the given width at the pen.
    fn emit(&mut self, text: &str, width: f64, font: Font) {
        let color = self.style.color();
        let (x, y) = (self.pen.x, self.pen.y);
        self.painter.text(text, x, y, font, color);

        if !text.is_empty() {
            let metrics = self.renderer.metrics;
            if self.style.strikethrough {
                let line_y = y + f64::from(metrics.strikethrough_offset(&font));
                self.painter.line(x, x + width, line_y, color);
            }
            if self.style.underlined() {
                let line_y = y + f64::from(metrics.underline_offset(&font));
                self.painter.line(x, x + width, line_y, color);
            }
        }

        self.pen.x += width;
        self.pen.width_painted += width;
    }

    /// Paint the ellipsis once, in the base font and color.
    fn emit_ellipsis(&mut self) {
        if self.pen.truncated {
            return;
        }
        self.pen.truncated = true;
        let font = self.base_font;
        let width = f64::from(self.renderer.metrics.text_width(ELLIPSIS, &font));
        self.painter
            .text(ELLIPSIS, self.pen.x, self.pen.y, font, self.request.color);
        self.pen.x += width;
        self.pen.width_painted += width;
    }

    fn line_height(&self) -> f64 {
        let font = self.style.font(self.base_font);
        f64::from(self.renderer.metrics.line_height(&font))
    }

    /// Move the pen to the start of the next line, `advance` below.
    ///
    /// Stops the scan once the new line would start at or below the
    /// available height.
    fn new_line(&mut self, advance: f64) {
        self.pen.x = self.pen.origin_x;
        self.pen.y += advance;
        self.pen.height_painted += advance;
        self.pen.width_painted = 0.0;
        self.pen.last_was_whitespace = true;
        if self.pen.height_painted >= self.request.max_height {
            self.pen.height_exhausted = true;
            self.pen.done = true;
        }
    }
}

fn ends_with_whitespace(text: &str) -> bool {
    text.chars().last().is_some_and(is_collapsible_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::ApproximateFontMetrics;
    use crate::surface::DisplayList;
    use lumen_common::CollectingSink;

    #[test]
    fn test_measure_records_no_ops() {
        let metrics = ApproximateFontMetrics;
        let renderer = MarkupRenderer::new(&metrics);
        let mut scratch = RenderScratch::new();

        let request = RenderRequest::new("<u>ab</u>");
        let _ = renderer
            .render_html(&request, &mut DisplayList::new(), Some(&mut scratch))
            .unwrap();
        assert_eq!(scratch.recorded_ops(), 2);

        let request = request.measure_only();
        let _ = renderer
            .render_html(&request, &mut NullSurface, Some(&mut scratch))
            .unwrap();
        assert_eq!(scratch.recorded_ops(), 0);
    }

    #[test]
    fn test_start_index_past_end_is_empty() {
        let metrics = ApproximateFontMetrics;
        let renderer = MarkupRenderer::new(&metrics);
        let request = RenderRequest::new("<html>").start_index(HTML_MARKER_LEN + 4);
        let width = renderer
            .render_html(&request, &mut NullSurface, None)
            .unwrap();
        assert!(width.abs() < f64::EPSILON);
    }

    #[test]
    fn test_strict_mode_reports_nothing() {
        let metrics = ApproximateFontMetrics;
        let sink = CollectingSink::new();
        let renderer = MarkupRenderer::new(&metrics)
            .with_diagnostics(&sink)
            .with_config(RenderConfig::strict());
        let result = renderer.render_html(&RenderRequest::new("<q>"), &mut NullSurface, None);
        assert!(result.is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unclosed_tag_message_names_the_tag() {
        let metrics = ApproximateFontMetrics;
        let renderer = MarkupRenderer::new(&metrics).with_config(RenderConfig::strict());
        let err = renderer
            .render_html(&RenderRequest::new("<u>x"), &mut NullSurface, None)
            .unwrap_err();
        let diagnostic = err.diagnostic().unwrap();
        assert_eq!(diagnostic.message, "Underline tag still open at end of input");
        assert_eq!(diagnostic.position, 4);
    }
}
