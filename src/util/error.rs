//! Error types for ncclookup.

use crate::image::ChannelType;
use thiserror::Error;

/// Result alias for ncclookup operations.
pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// Errors that can occur when building images or running a search.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// Source and template channels paired at the same index have different types.
    #[error("incompatible channels: image has {expected}, template has {actual}")]
    ChannelMismatch {
        expected: ChannelType,
        actual: ChannelType,
    },
    /// Channel counts differ while the exact channel policy is in effect.
    #[error("channel count mismatch: image has {image}, template has {template}")]
    ChannelCountMismatch { image: usize, template: usize },
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The stride is shorter than one row of samples.
    #[error("invalid stride {stride} for row length {row_len}")]
    InvalidStride { row_len: usize, stride: usize },
    /// The backing buffer is smaller than the declared image.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The requested ROI does not fit inside the image.
    #[error("roi {width}x{height} at ({x}, {y}) exceeds image {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// A decomposed plane does not hold `width * height` samples.
    #[error("plane {index} has {got} samples, expected {expected}")]
    PlaneLength {
        index: usize,
        expected: usize,
        got: usize,
    },
    /// Image decoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
