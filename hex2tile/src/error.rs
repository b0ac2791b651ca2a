//! Error types for tile pyramid generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while building a tile pyramid.
///
/// Every variant is fatal for the run: there is no partial-success mode.
#[derive(Debug, Error)]
pub enum Hex2TileError {
    /// The entry configuration or run settings are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A sprite image could not be opened or decoded.
    #[error("Failed to load sprite for '{}' from {}: {}", .id, .path.display(), .source)]
    ImageDecode {
        id: String,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The computed map has no usable extent.
    #[error("Invalid map geometry {width}×{height}: width and height must be positive and finite")]
    Geometry { width: f64, height: f64 },

    /// Filesystem error while writing output.
    #[error("I/O error at {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// PNG encoding of a tile or master image failed.
    #[error("Failed to encode {}: {}", .path.display(), .source)]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The dedicated worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl Hex2TileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Hex2TileError::Io {
            path: path.into(),
            source,
        }
    }
}
