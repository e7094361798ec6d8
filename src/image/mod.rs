//! Image views, channel layouts and channel decomposition.
//!
//! `ImageView` is a borrowed 2D view into an interleaved 8-bit buffer with an
//! explicit stride. The stride counts samples between the starts of
//! consecutive rows, so a stride larger than `width * channels` represents
//! padded rows. ROI slices are zero-copy views into the same backing slice and
//! retain the original stride.

use crate::util::{LookupError, LookupResult};
use std::fmt;

#[cfg(feature = "image-io")]
pub mod io;
pub mod luma;
mod owned;

pub use owned::OwnedImage;

/// Role of a single scalar plane of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelType {
    Gray,
    Red,
    Green,
    Blue,
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelType::Gray => "gray",
            ChannelType::Red => "red",
            ChannelType::Green => "green",
            ChannelType::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Interleaved sample layout of an 8-bit image buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// One luminance sample per pixel.
    Gray,
    /// Three samples per pixel in red, green, blue order.
    Rgb,
}

impl PixelLayout {
    /// Returns the channel tags in decomposition order.
    pub fn channels(self) -> &'static [ChannelType] {
        match self {
            PixelLayout::Gray => &[ChannelType::Gray],
            PixelLayout::Rgb => &[ChannelType::Red, ChannelType::Green, ChannelType::Blue],
        }
    }

    /// Returns the number of interleaved samples per pixel.
    pub fn channel_count(self) -> usize {
        self.channels().len()
    }
}

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    layout: PixelLayout,
}

impl<'a> ImageView<'a> {
    /// Creates a contiguous view with `stride == width * channels`.
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> LookupResult<Self> {
        let stride = width.saturating_mul(layout.channel_count());
        Self::new(data, width, height, stride, layout)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        layout: PixelLayout,
    ) -> LookupResult<Self> {
        let needed = required_len(width, height, stride, layout)?;
        if data.len() < needed {
            return Err(LookupError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            layout,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in samples between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the interleaved sample layout.
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the samples of the pixel at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [u8]> {
        if x >= self.width {
            return None;
        }
        let channels = self.layout.channel_count();
        let start = x * channels;
        self.row(y)?.get(start..start + channels)
    }

    /// Returns the samples of row `y`, `width * channels` long.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.layout.channel_count())?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(&self, x: usize, y: usize, width: usize, height: usize) -> LookupResult<Self> {
        if width == 0 || height == 0 {
            return Err(LookupError::InvalidDimensions { width, height });
        }
        let out_of_bounds = LookupError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y * self.stride + x * self.layout.channel_count();
        let data = self.data.get(start..).ok_or(LookupError::BufferTooSmall {
            needed: start.saturating_add(1),
            got: self.data.len(),
        })?;
        Self::new(data, width, height, self.stride, self.layout)
    }

    /// Extracts channel `index` as a row-major plane of `f64` samples.
    ///
    /// Panics if `index` is not below the layout's channel count.
    pub fn plane(&self, index: usize) -> Vec<f64> {
        let channels = self.layout.channel_count();
        assert!(index < channels, "channel {index} out of range");
        let mut out = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            let start = y * self.stride;
            let row = &self.data[start..start + self.width * channels];
            out.extend(row.iter().skip(index).step_by(channels).map(|&v| f64::from(v)));
        }
        out
    }
}

fn required_len(
    width: usize,
    height: usize,
    stride: usize,
    layout: PixelLayout,
) -> LookupResult<usize> {
    if width == 0 || height == 0 {
        return Err(LookupError::InvalidDimensions { width, height });
    }
    let row_len = width
        .checked_mul(layout.channel_count())
        .ok_or(LookupError::InvalidDimensions { width, height })?;
    if stride < row_len {
        return Err(LookupError::InvalidStride { row_len, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(LookupError::InvalidDimensions { width, height })
}
