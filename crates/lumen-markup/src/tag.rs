//! The fixed tag vocabulary.
//!
//! Each recognized tag name maps to a [`TagKind`] through a static table.
//! Names are accepted in all-lowercase or all-uppercase; mixed case is an
//! unknown tag.

use strum_macros::{Display, EnumIter};

/// What a tag does to the style state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum TagKind {
    /// `<b>`, `<strong>`
    Bold,
    /// `<i>`, `<em>`
    Italic,
    /// `<u>`
    Underline,
    /// `<s>`, `<strike>`
    Strikethrough,
    /// `<a>`: link flag plus link color, pushed on the color stack.
    Link,
    /// `<font color=…>`: color, pushed on the color stack.
    Font,
    /// `<br>`: line break (multi-line layout only).
    LineBreak,
    /// `<p>`: paragraph break (multi-line layout only).
    Paragraph,
    /// `<html>`: accepted only as the very first tag.
    Html,
}

impl TagKind {
    /// Whether opening this tag pushes the current color.
    #[must_use]
    pub const fn pushes_color(self) -> bool {
        matches!(self, Self::Link | Self::Font)
    }

    /// Whether this tag only has an effect in multi-line layout.
    #[must_use]
    pub const fn multi_line_only(self) -> bool {
        matches!(self, Self::LineBreak | Self::Paragraph)
    }

    /// Whether an open tag of this kind must be closed before the input ends.
    #[must_use]
    pub const fn requires_close(self) -> bool {
        !matches!(self, Self::LineBreak | Self::Paragraph | Self::Html)
    }
}

/// Tag names and their kinds.
pub const TAG_TABLE: &[(&str, TagKind)] = &[
    ("b", TagKind::Bold),
    ("strong", TagKind::Bold),
    ("i", TagKind::Italic),
    ("em", TagKind::Italic),
    ("u", TagKind::Underline),
    ("s", TagKind::Strikethrough),
    ("strike", TagKind::Strikethrough),
    ("a", TagKind::Link),
    ("font", TagKind::Font),
    ("br", TagKind::LineBreak),
    ("p", TagKind::Paragraph),
    ("html", TagKind::Html),
];

/// Look up a tag name.
#[must_use]
pub fn lookup(name: &str) -> Option<TagKind> {
    let uniform_case = name.bytes().all(|b| b.is_ascii_lowercase())
        || name.bytes().all(|b| b.is_ascii_uppercase());
    if name.is_empty() || !uniform_case {
        return None;
    }
    TAG_TABLE
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|&(_, kind)| kind)
}

/// A tag split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag<'a> {
    /// Whether this is a closing tag (`</…>`).
    pub closing: bool,
    /// The tag name.
    pub name: &'a str,
    /// Everything after the name up to the `>`.
    pub attributes: &'a str,
    /// Char offset of the name within the tag body.
    pub name_offset: usize,
}

/// Split the body of a tag (the text between `<` and `>`).
#[must_use]
pub fn parse_tag(body: &str) -> ParsedTag<'_> {
    let (closing, rest, name_offset) = body
        .strip_prefix('/')
        .map_or((false, body, 0), |rest| (true, rest, 1));
    let name_end = rest
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(rest.len());
    ParsedTag {
        closing,
        name: &rest[..name_end],
        attributes: &rest[name_end..],
        name_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_names() {
        assert_eq!(lookup("b"), Some(TagKind::Bold));
        assert_eq!(lookup("STRONG"), Some(TagKind::Bold));
        assert_eq!(lookup("em"), Some(TagKind::Italic));
        assert_eq!(lookup("strike"), Some(TagKind::Strikethrough));
        assert_eq!(lookup("s"), Some(TagKind::Strikethrough));
        assert_eq!(lookup("FONT"), Some(TagKind::Font));
        assert_eq!(lookup("br"), Some(TagKind::LineBreak));
    }

    #[test]
    fn test_lookup_rejects_mixed_case_and_unknown() {
        assert_eq!(lookup("Font"), None);
        assert_eq!(lookup("bR"), None);
        assert_eq!(lookup("table"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn test_parse_tag() {
        let tag = parse_tag("font color='#FF0000'");
        assert!(!tag.closing);
        assert_eq!(tag.name, "font");
        assert_eq!(tag.attributes, " color='#FF0000'");

        let close = parse_tag("/b");
        assert!(close.closing);
        assert_eq!(close.name, "b");
        assert_eq!(close.name_offset, 1);

        let self_closing = parse_tag("br/");
        assert_eq!(self_closing.name, "br");
    }

    #[test]
    fn test_kind_properties() {
        assert!(TagKind::Font.pushes_color());
        assert!(TagKind::Link.pushes_color());
        assert!(!TagKind::Bold.pushes_color());
        assert!(TagKind::Paragraph.multi_line_only());
        assert!(!TagKind::Html.requires_close());
        assert!(TagKind::Underline.requires_close());
    }
}
