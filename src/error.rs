//! Error types for the poster engine

use thiserror::Error;

/// Result type alias for poster engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the poster engine
#[derive(Error, Debug)]
pub enum Error {
    /// The guest grid is full; the mutation was rejected without effect
    #[error("Maximum of 9 guests allowed")]
    CapacityExceeded,

    /// The selected file is not a usable image
    #[error("Image decode failed: {0}")]
    Decode(String),

    /// Failed to rasterize the poster surface
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Failed to encode an export artifact
    #[error("Export failed: {0}")]
    Export(String),

    /// Filesystem error while reading a picked file or writing an artifact
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
