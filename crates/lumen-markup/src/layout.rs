//! Layout policies and the overflow arithmetic they share.
//!
//! Every policy first measures a whole plain-text run. Only when the run
//! would overflow the remaining width does it look for a cut-point: an
//! estimate from the run's average character width, corrected by
//! re-measuring until the prefix actually fits.

use strum_macros::{Display, EnumIter, EnumString};

use crate::font::{Font, FontMetrics};

/// Characters reserved for the ellipsis when truncating a marked-up run.
///
/// This is a heuristic: the reservation is three average characters, not
/// the actual width of the ellipsis glyph, so at unusual sizes it can
/// over- or under-reserve. The cut is re-measured afterwards so the kept
/// prefix itself never overflows.
pub const ELLIPSIS_RESERVE: usize = 3;

/// The glyph painted where text is truncated.
pub const ELLIPSIS: &str = "\u{2026}";

/// How text that does not fit the available width is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LayoutPolicy {
    /// Paint the characters that fit and stop.
    #[default]
    Clip,
    /// Paint what fits with room for an ellipsis, then the ellipsis.
    Truncate,
    /// Break lines at whitespace; the result is the height painted.
    #[strum(to_string = "wrap", serialize = "wordwrap")]
    WordWrap,
}

impl LayoutPolicy {
    /// Whether the policy lays text out on a single line.
    #[must_use]
    pub const fn is_single_line(self) -> bool {
        !matches!(self, Self::WordWrap)
    }
}

/// Whitespace that collapses and may be broken at. A no-break space
/// (`&nbsp;`) is neither.
#[must_use]
pub fn is_collapsible_whitespace(c: char) -> bool {
    c.is_whitespace() && c != '\u{a0}'
}

/// Byte offset of the `chars`-th character of `text` (or its length).
#[must_use]
pub fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(i, _)| i)
}

/// Average advance per character of a measured run.
///
/// A degenerate run (no characters, or a non-finite width) falls back to
/// the font's maximum advance.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_char_width(width: f64, char_count: usize, max_advance: f64) -> f64 {
    let average = width / char_count as f64;
    if average.is_finite() && average > 0.0 {
        average
    } else {
        max_advance
    }
}

/// Estimated number of characters of average width `char_width` that fit
/// in `available`, rounded down.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimate_fit(available: f64, char_width: f64) -> usize {
    if available <= 0.0 || char_width <= 0.0 {
        return 0;
    }
    (available / char_width).floor() as usize
}

fn prefix_width(metrics: &dyn FontMetrics, font: &Font, text: &str, chars: usize) -> f64 {
    f64::from(metrics.text_width(&text[..byte_offset(text, chars)], font))
}

/// The longest prefix of `text` (of `char_count` characters) whose width
/// is at most `available`, searching from `estimate`.
///
/// Returns the prefix length in characters and its width.
#[must_use]
pub fn fit_prefix(
    metrics: &dyn FontMetrics,
    font: &Font,
    text: &str,
    char_count: usize,
    available: f64,
    estimate: usize,
) -> (usize, f64) {
    let mut n = estimate.min(char_count);
    let mut width = prefix_width(metrics, font, text, n);
    while n > 0 && width > available {
        n -= 1;
        width = prefix_width(metrics, font, text, n);
    }
    while n < char_count {
        let next = prefix_width(metrics, font, text, n + 1);
        if next > available {
            break;
        }
        n += 1;
        width = next;
    }
    (n, width)
}

/// Where to cut a run that overflows in truncate mode.
///
/// The estimate keeps `ceil(available / char_width)` characters minus the
/// ellipsis reservation; fewer than that leaves an empty prefix, so only
/// the ellipsis is painted. The estimate is then shortened until the
/// prefix fits `available`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn truncation_cut(
    metrics: &dyn FontMetrics,
    font: &Font,
    text: &str,
    char_count: usize,
    available: f64,
    char_width: f64,
) -> (usize, f64) {
    let chars_to_paint = if available > 0.0 && char_width > 0.0 {
        (available / char_width).ceil() as usize
    } else {
        0
    };
    let mut n = chars_to_paint
        .saturating_sub(ELLIPSIS_RESERVE)
        .min(char_count);
    let mut width = prefix_width(metrics, font, text, n);
    while n > 0 && width > available {
        n -= 1;
        width = prefix_width(metrics, font, text, n);
    }
    (n, width)
}

/// How to break a run that overflows the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapDecision {
    /// Paint `keep` characters; the character after them is whitespace.
    /// Continue on the next line after skipping whitespace.
    BreakAt {
        /// Characters kept on the current line.
        keep: usize,
    },
    /// No whitespace to break at and the line is empty: paint `keep`
    /// characters (at least one) regardless of word boundaries.
    Brutal {
        /// Characters kept on the current line.
        keep: usize,
    },
    /// No whitespace to break at: move the whole run to the next line.
    NextLine,
}

/// Decide where an overflowing run breaks.
///
/// `at_line_start` is true when nothing has been painted on the current
/// line; only then is a brutal wrap allowed, which guarantees progress on
/// tokens wider than a whole line.
#[must_use]
pub fn wrap_decision(
    metrics: &dyn FontMetrics,
    font: &Font,
    text: &str,
    char_count: usize,
    available: f64,
    char_width: f64,
    at_line_start: bool,
) -> WrapDecision {
    let estimate = estimate_fit(available, char_width);
    let (fit, _) = fit_prefix(metrics, font, text, char_count, available, estimate);

    // The character just past the fitting prefix may itself be the break.
    let boundary = text
        .chars()
        .take(fit + 1)
        .enumerate()
        .filter(|&(_, c)| is_collapsible_whitespace(c))
        .map(|(i, _)| i)
        .last();

    match boundary {
        Some(keep) if keep > 0 || !at_line_start => WrapDecision::BreakAt { keep },
        _ if at_line_start => WrapDecision::Brutal { keep: fit.max(1) },
        _ => WrapDecision::NextLine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::ApproximateFontMetrics;
    use strum::IntoEnumIterator;

    // 10px font: every glyph is 6px wide.
    fn font() -> Font {
        Font::regular(10.0)
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(LayoutPolicy::WordWrap.to_string(), "wrap");
        assert_eq!("wordwrap".parse::<LayoutPolicy>(), Ok(LayoutPolicy::WordWrap));
        assert_eq!("Truncate".parse::<LayoutPolicy>(), Ok(LayoutPolicy::Truncate));
        assert_eq!(LayoutPolicy::iter().filter(|p| p.is_single_line()).count(), 2);
    }

    #[test]
    fn test_average_char_width_fallback() {
        assert!((average_char_width(60.0, 10, 9.0) - 6.0).abs() < 1e-9);
        assert!((average_char_width(0.0, 0, 9.0) - 9.0).abs() < 1e-9);
        assert!((average_char_width(f64::INFINITY, 3, 9.0) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_prefix_converges_from_both_sides() {
        let metrics = ApproximateFontMetrics;
        let text = "abcdefghij";
        assert_eq!(fit_prefix(&metrics, &font(), text, 10, 30.0, 0).0, 5);
        assert_eq!(fit_prefix(&metrics, &font(), text, 10, 30.0, 9).0, 5);
        assert_eq!(fit_prefix(&metrics, &font(), text, 10, 29.9, 5).0, 4);
        assert_eq!(fit_prefix(&metrics, &font(), text, 10, 1000.0, 3).0, 10);
        assert_eq!(fit_prefix(&metrics, &font(), text, 10, -5.0, 3).0, 0);
    }

    #[test]
    fn test_truncation_cut_reserves_three_chars() {
        let metrics = ApproximateFontMetrics;
        let (n, width) = truncation_cut(&metrics, &font(), "abcdefghij", 10, 36.0, 6.0);
        assert_eq!(n, 3);
        assert!((width - 18.0).abs() < 1e-6);
    }

    #[test]
    fn test_truncation_cut_too_narrow_keeps_nothing() {
        let metrics = ApproximateFontMetrics;
        assert_eq!(truncation_cut(&metrics, &font(), "abcdefghij", 10, 12.0, 6.0).0, 0);
        assert_eq!(truncation_cut(&metrics, &font(), "abcdefghij", 10, -4.0, 6.0).0, 0);
    }

    #[test]
    fn test_truncation_cut_never_overflows() {
        let metrics = ApproximateFontMetrics;
        // An underestimated average width must still be corrected.
        let (n, width) = truncation_cut(&metrics, &font(), "abcdefghij", 10, 30.0, 1.0);
        assert!(width <= 30.0);
        assert_eq!(n, 5);
    }

    #[test]
    fn test_wrap_breaks_at_last_fitting_space() {
        let metrics = ApproximateFontMetrics;
        // "hello world foo": 15 chars; 72px fits 12 chars.
        let decision = wrap_decision(&metrics, &font(), "hello world foo", 15, 72.0, 6.0, true);
        assert_eq!(decision, WrapDecision::BreakAt { keep: 11 });
    }

    #[test]
    fn test_wrap_brutal_at_line_start() {
        let metrics = ApproximateFontMetrics;
        let decision = wrap_decision(&metrics, &font(), "abcdefghij", 10, 30.0, 6.0, true);
        assert_eq!(decision, WrapDecision::Brutal { keep: 5 });
        // Even with no room at all, progress is made.
        let decision = wrap_decision(&metrics, &font(), "abcdefghij", 10, 2.0, 6.0, true);
        assert_eq!(decision, WrapDecision::Brutal { keep: 1 });
    }

    #[test]
    fn test_wrap_moves_unbreakable_run_to_next_line() {
        let metrics = ApproximateFontMetrics;
        let decision = wrap_decision(&metrics, &font(), "abcdefghij", 10, 30.0, 6.0, false);
        assert_eq!(decision, WrapDecision::NextLine);
    }

    #[test]
    fn test_nbsp_is_not_a_break() {
        assert!(!is_collapsible_whitespace('\u{a0}'));
        assert!(is_collapsible_whitespace(' '));
        assert!(is_collapsible_whitespace('\t'));
    }
}
