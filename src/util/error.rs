//! Error types for cornerkit.

use thiserror::Error;

/// Result alias for cornerkit operations.
pub type CornerKitResult<T> = std::result::Result<T, CornerKitError>;

/// Errors that can occur when running cornerkit algorithms.
///
/// `ImageTooSmall` and `CapacityExceeded` signal violated preconditions of the
/// border convolver and the candidate list. They are programming errors: the
/// computation is deterministic, so retrying with the same inputs never helps.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CornerKitError {
    /// The image has a zero dimension or its size overflows `usize`.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer cannot hold every addressed element.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A region of interest does not fit inside its parent image.
    #[error(
        "roi ({x}, {y}, {width}x{height}) out of bounds for {img_width}x{img_height} image"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Input and output images must have the same shape.
    #[error("dimension mismatch: input {in_width}x{in_height}, output {out_width}x{out_height}")]
    DimensionMismatch {
        in_width: usize,
        in_height: usize,
        out_width: usize,
        out_height: usize,
    },
    /// The image does not exceed twice the kernel radius along the pass direction.
    #[error("image {width}x{height} too small for kernel radius {radius}")]
    ImageTooSmall {
        width: usize,
        height: usize,
        radius: usize,
    },
    /// The kernel weights are unusable (empty or even length).
    #[error("invalid kernel: {0}")]
    InvalidKernel(&'static str),
    /// A fixed-capacity candidate list is full.
    #[error("candidate list capacity {capacity} exceeded")]
    CapacityExceeded { capacity: usize },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}
