//! Rendering text without interpreting markup.
//!
//! Plain text is painted in one piece at the origin. When it overflows,
//! clipping keeps the longest prefix that fits; truncation keeps the
//! longest prefix that still fits once an ellipsis is appended, down to a
//! lone ellipsis. A lone ellipsis wider than the box is clipped to it.

use crate::font::Font;
use crate::layout::{
    ELLIPSIS, ELLIPSIS_RESERVE, LayoutPolicy, average_char_width, byte_offset, estimate_fit,
    fit_prefix,
};
use crate::render::MarkupRenderer;
use crate::request::RenderRequest;
use crate::surface::{ClipRect, Surface};

impl MarkupRenderer<'_> {
    pub(crate) fn render_plain(&self, request: &RenderRequest<'_>, surface: &mut dyn Surface) -> f64 {
        let text = &request.text[byte_offset(request.text, request.start_index)..];
        let font = request.base_font();
        let metrics = self.metrics();
        let width = f64::from(metrics.text_width(text, &font));
        let available = request.max_width;

        if width <= available {
            paint_plain(request, surface, text, font);
            return width;
        }

        let count = text.chars().count();
        let char_width = average_char_width(width, count, f64::from(metrics.max_advance(&font)));
        match request.policy {
            LayoutPolicy::Truncate => {
                match self.truncated_candidate(text, count, font, available, char_width) {
                    Some((candidate, candidate_width)) => {
                        paint_plain(request, surface, &candidate, font);
                        candidate_width
                    }
                    None => self.paint_lone_ellipsis(request, surface, font),
                }
            }
            LayoutPolicy::Clip | LayoutPolicy::WordWrap => {
                let estimate = estimate_fit(available, char_width);
                let (keep, kept_width) = fit_prefix(metrics, &font, text, count, available, estimate);
                paint_plain(request, surface, &text[..byte_offset(text, keep)], font);
                kept_width
            }
        }
    }

    /// Shrink from the estimated fit until prefix plus ellipsis fits.
    ///
    /// Gives up at the ellipsis reservation.
    fn truncated_candidate(
        &self,
        text: &str,
        count: usize,
        font: Font,
        available: f64,
        char_width: f64,
    ) -> Option<(String, f64)> {
        let metrics = self.metrics();
        let chars: Vec<char> = text.chars().collect();
        let mut estimate = estimate_fit(available, char_width).min(count);
        let mut candidate = String::with_capacity(text.len());

        while estimate > ELLIPSIS_RESERVE {
            candidate.clear();
            if estimate < count {
                candidate.extend(&chars[..estimate - 1]);
                candidate.push_str(ELLIPSIS);
            } else {
                candidate.extend(&chars[..estimate]);
            }
            let width = f64::from(metrics.text_width(&candidate, &font));
            if width <= available {
                return Some((candidate, width));
            }
            estimate -= 1;
        }
        None
    }

    /// Paint only the ellipsis, clipped to the box when it is wider.
    ///
    /// The box starts one line above the baseline. Returns the width
    /// painted, which never exceeds the available width.
    #[allow(clippy::cast_possible_truncation)]
    fn paint_lone_ellipsis(
        &self,
        request: &RenderRequest<'_>,
        surface: &mut dyn Surface,
        font: Font,
    ) -> f64 {
        let available = request.max_width;
        if available <= 0.0 {
            return 0.0;
        }
        let width = f64::from(self.metrics().text_width(ELLIPSIS, &font));
        if width <= available {
            paint_plain(request, surface, ELLIPSIS, font);
            return width;
        }

        if request.paint {
            let line_height = f64::from(self.metrics().line_height(&font));
            surface.set_clip(Some(ClipRect {
                x: request.x as f32,
                y: (request.y - line_height) as f32,
                width: available as f32,
                height: request.max_height as f32,
            }));
            paint_plain(request, surface, ELLIPSIS, font);
            surface.set_clip(None);
        }
        available
    }
}

#[allow(clippy::cast_possible_truncation)]
fn paint_plain(request: &RenderRequest<'_>, surface: &mut dyn Surface, text: &str, font: Font) {
    if !request.paint || text.is_empty() {
        return;
    }
    surface.set_color(request.color);
    surface.set_font(font);
    surface.draw_text(text, request.x as f32, request.y as f32);
}

#[cfg(test)]
mod tests {
    use crate::font::{ApproximateFontMetrics, Font};
    use crate::layout::LayoutPolicy;
    use crate::render::MarkupRenderer;
    use crate::request::RenderRequest;
    use crate::surface::{ClipRect, DisplayCommand, DisplayList};

    fn render(text: &str, policy: LayoutPolicy, max_width: f64) -> (f64, DisplayList) {
        let metrics = ApproximateFontMetrics;
        let renderer = MarkupRenderer::new(&metrics);
        let request = RenderRequest::new(text)
            .font(Font::regular(10.0))
            .policy(policy)
            .within(max_width, f64::INFINITY);
        let mut list = DisplayList::new();
        let width = renderer
            .render_plain_string(&request, &mut list)
            .expect("single-line policy");
        (width, list)
    }

    #[test]
    fn test_fitting_text_is_painted_whole() {
        let (width, list) = render("Hello", LayoutPolicy::Clip, 100.0);
        assert!((width - 30.0).abs() < 1e-6);
        assert_eq!(list.text(), "Hello");
    }

    #[test]
    fn test_clip_keeps_fitting_prefix() {
        let (width, list) = render("abcdefghij", LayoutPolicy::Clip, 40.0);
        assert_eq!(list.text(), "abcdef");
        assert!((width - 36.0).abs() < 1e-6);
    }

    #[test]
    fn test_truncate_replaces_tail_with_ellipsis() {
        let (width, list) = render("ReallyLongWordThatOverflows", LayoutPolicy::Truncate, 36.0);
        assert_eq!(list.text(), "Reall\u{2026}");
        assert!(width <= 36.0);
    }

    #[test]
    fn test_truncate_too_narrow_paints_lone_ellipsis() {
        let (width, list) = render("abcdefghij", LayoutPolicy::Truncate, 20.0);
        assert_eq!(list.text(), "\u{2026}");
        assert!((width - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_lone_ellipsis_wider_than_box_is_clipped() {
        let metrics = ApproximateFontMetrics;
        let renderer = MarkupRenderer::new(&metrics);
        let request = RenderRequest::new("abcdefghij")
            .font(Font::regular(10.0))
            .policy(LayoutPolicy::Truncate)
            .at(0.0, 10.0)
            .within(2.0, 12.0);
        let mut list = DisplayList::new();
        let width = renderer
            .render_plain_string(&request, &mut list)
            .expect("single-line policy");

        assert!((width - 2.0).abs() < 1e-6);
        assert_eq!(list.text(), "\u{2026}");
        let DisplayCommand::DrawText {
            clip: Some(ClipRect { x, y, width, height }),
            ..
        } = list.commands()[0]
        else {
            panic!("expected a clipped ellipsis");
        };
        assert!(x.abs() < 1e-4);
        assert!((y + 2.0).abs() < 1e-4);
        assert!((width - 2.0).abs() < 1e-4);
        assert!((height - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_truncate_into_empty_box_paints_nothing() {
        let (width, list) = render("abcdefghij", LayoutPolicy::Truncate, 0.0);
        assert!(width.abs() < 1e-6);
        assert!(list.is_empty());
    }

    #[test]
    fn test_measure_only_paints_nothing() {
        let metrics = ApproximateFontMetrics;
        let renderer = MarkupRenderer::new(&metrics);
        let request = RenderRequest::new("Hello").font(Font::regular(10.0)).measure_only();
        let mut list = DisplayList::new();
        let width = renderer.render_plain_string(&request, &mut list).expect("clip");
        assert!((width - 30.0).abs() < 1e-6);
        assert!(list.is_empty());
    }

    #[test]
    fn test_word_wrap_is_rejected() {
        let metrics = ApproximateFontMetrics;
        let renderer = MarkupRenderer::new(&metrics);
        let request = RenderRequest::new("Hello").policy(LayoutPolicy::WordWrap);
        assert!(renderer.render_plain_string(&request, &mut DisplayList::new()).is_err());
    }
}
