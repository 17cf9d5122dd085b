//! Error types for filter application.
//!
//! Stack mutations (rotate, flip, crop propagation, cloning) cannot fail.
//! Errors only arise at the pixel boundary, when a stage is handed a
//! buffer it cannot process.

use thiserror::Error;

/// Errors raised while applying a filter to pixel data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The pixel buffer length does not match `width * height * 3`.
    #[error("Pixel buffer size mismatch for {width}x{height}: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The image has a zero dimension.
    #[error("Image has no pixels")]
    EmptyImage,

    /// The crop rectangle selects no area of the image.
    #[error("Crop rectangle is empty: {0}")]
    EmptyCropRect(String),
}
