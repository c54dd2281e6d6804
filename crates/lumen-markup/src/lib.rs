//! Lumen Markup
//!
//! A single-pass layout-and-paint engine for a small inline markup subset:
//! bold, italic, underline, strikethrough, links, `<font color>`, line and
//! paragraph breaks, and character references. It is meant for short,
//! lightly formatted strings such as labels, list cells and tooltips, where
//! a full document layout engine would be far too heavy.
//!
//! # Overview
//!
//! The input is scanned once. Tags update a [`StyleState`]; each run of
//! plain text between tags is measured through [`FontMetrics`] and then
//! painted onto a [`Surface`] under one of three [`LayoutPolicy`] values:
//! clip, truncate with an ellipsis, or word-wrap. The same pass returns the
//! width painted (single-line) or the height painted (word-wrap), so
//! measuring is simply rendering with painting switched off.
//!
//! Malformed markup never aborts a paint in the default lenient mode: it is
//! reported once per distinct message through the diagnostics sink and the
//! string is rendered as plain text instead. In strict mode it is returned
//! as [`MarkupError::Malformed`].
//!
//! # Example
//!
//! ```
//! use lumen_markup::{ApproximateFontMetrics, DisplayList, MarkupRenderer, RenderRequest};
//!
//! let metrics = ApproximateFontMetrics;
//! let renderer = MarkupRenderer::new(&metrics);
//! let mut list = DisplayList::new();
//! let request = RenderRequest::new("<b>Hi</b> there").within(200.0, 20.0);
//! let width = renderer.render_html(&request, &mut list, None).unwrap();
//! assert_eq!(list.text(), "Hi there");
//! assert!(width > 0.0);
//! ```

pub mod color;
pub mod entity;
pub mod error;
pub mod font;
pub mod layout;
mod plain;
pub mod render;
pub mod request;
pub mod style;
pub mod surface;
pub mod tag;
pub mod theme;

pub use color::{ColorProblem, ColorValue, ResolvedColor, ensure_contrasting_color, resolve_font_color};
pub use entity::{EntityMatch, NAMED_ENTITIES, resolve_entity};
pub use error::{Condition, Diagnostic, MarkupError};
pub use font::{ApproximateFontMetrics, DEFAULT_FONT_SIZE, Font, FontMetrics, FontStyle};
pub use layout::{ELLIPSIS, LayoutPolicy, WrapDecision};
pub use render::MarkupRenderer;
pub use request::RenderRequest;
pub use style::{RenderScratch, StyleState};
pub use surface::{ClipRect, DisplayCommand, DisplayList, NullSurface, Surface};
pub use tag::TagKind;
pub use theme::{Palette, Theme, ThemeColors};
