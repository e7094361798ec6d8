//! Owned contiguous image buffers.

use crate::image::{ImageView, PixelLayout};
use crate::util::{LookupError, LookupResult};

/// Owned contiguous 8-bit image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
    layout: PixelLayout,
}

impl OwnedImage {
    /// Wraps a contiguous interleaved buffer of exactly `width * height * channels` samples.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> LookupResult<Self> {
        if width == 0 || height == 0 {
            return Err(LookupError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(layout.channel_count()))
            .ok_or(LookupError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(LookupError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(LookupError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            layout,
        })
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_>) -> Self {
        let row_len = view.width() * view.layout().channel_count();
        let mut data = Vec::with_capacity(row_len * view.height());
        let src = view.as_slice();
        for y in 0..view.height() {
            let start = y * view.stride();
            data.extend_from_slice(&src[start..start + row_len]);
        }
        Self::from_raw_parts(data, view.width(), view.height(), view.layout())
    }

    /// Builds an image whose buffer length is known to match its dimensions.
    pub(crate) fn from_raw_parts(
        data: Vec<u8>,
        width: usize,
        height: usize,
        layout: PixelLayout,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height * layout.channel_count());
        Self {
            data,
            width,
            height,
            layout,
        }
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width * self.layout.channel_count(),
            layout: self.layout,
        }
    }

    /// Returns the interleaved sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the interleaved sample layout.
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::OwnedImage;
    use crate::image::{ImageView, PixelLayout};
    use crate::util::LookupError;

    #[test]
    fn from_view_compacts_padded_rows() {
        let data = [1u8, 2, 0, 0, 3, 4];
        let view = ImageView::new(&data, 2, 2, 4, PixelLayout::Gray).unwrap();
        let owned = OwnedImage::from_view(view);
        assert_eq!(owned.data(), &[1u8, 2, 3, 4]);
        assert_eq!(owned.view().stride(), 2);
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = OwnedImage::new(vec![0u8; 5], 1, 2, PixelLayout::Rgb).err().unwrap();
        assert_eq!(err, LookupError::BufferTooSmall { needed: 6, got: 5 });
        assert!(OwnedImage::new(vec![0u8; 7], 1, 2, PixelLayout::Rgb).is_err());
    }
}
