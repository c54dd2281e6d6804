//! Errors from loading fonts and writing images.

use std::path::PathBuf;

use thiserror::Error;

/// Things that can go wrong outside the engine itself.
#[derive(Debug, Error)]
pub enum RasterError {
    /// A font file could not be read.
    #[error("failed to read font '{}': {source}", path.display())]
    Read {
        /// The file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// A file was read but is not a usable font.
    #[error("'{}' is not a usable font: {reason}", path.display())]
    InvalidFont {
        /// The file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
    /// The rendered image could not be written.
    #[error("failed to save image to '{}': {source}", path.display())]
    Save {
        /// Destination path.
        path: PathBuf,
        /// The underlying encoder error.
        source: image::ImageError,
    },
}
