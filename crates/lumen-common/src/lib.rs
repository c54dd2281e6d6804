//! Common utilities for the Lumen markup renderer.
//!
//! This crate provides shared infrastructure used by the engine, the raster
//! backend and the CLI:
//! - **Diagnostics** - deduplicated warnings with colored terminal output
//! - **Configuration** - the process-wide failure mode for malformed markup

pub mod config;
pub mod diagnostics;

pub use config::{ConfigError, FailureMode, RenderConfig, STRICT_ENV_VAR};
pub use diagnostics::{CollectingSink, DiagnosticSink, Diagnostics, warn_once};
