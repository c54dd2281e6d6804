//! Lumen Raster
//!
//! Concrete collaborators for the markup engine: font metrics backed by
//! fontdue and a [`Canvas`] surface that rasterizes onto an RGBA image.
//!
//! ```text
//! markup ──► MarkupRenderer ──► Surface calls ──► Canvas ──► PNG
//!                  ▲
//!           FontdueMetrics ◄── FontSet (system fonts)
//! ```
//!
//! When no system font can be found, measuring falls back to the
//! engine's approximate metrics and the canvas draws decoration lines
//! only.

pub mod canvas;
pub mod error;
pub mod fonts;
pub mod metrics;

pub use canvas::{Canvas, metrics_and_canvas};
pub use error::RasterError;
pub use fonts::FontSet;
pub use metrics::{FontdueMetrics, MeasureStrategy};
