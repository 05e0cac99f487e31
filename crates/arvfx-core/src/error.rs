//! Error types for arvfx-rs.

use thiserror::Error;

/// The main error type for arvfx-rs operations.
///
/// Per-frame pipeline work never fails; these errors come from building
/// inputs (meshes, images) and loading configuration.
#[derive(Error, Debug)]
pub enum ArVfxError {
    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A flat index list whose length is not a multiple of three.
    #[error("index list length {0} is not a multiple of 3")]
    MalformedIndices(usize),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Image dimensions that cannot hold any pixel.
    #[error("invalid image size {width}x{height}")]
    ImageSize { width: u32, height: u32 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized Result type for arvfx-rs operations.
pub type Result<T> = std::result::Result<T, ArVfxError>;
