//! Grayscale conversion shared by source images and templates.
//!
//! Colour pixels are reduced with the ITU-R BT.601 luma weights
//! (0.299, 0.587, 0.114) in 16-bit fixed point:
//! `y = (19595 * r + 38470 * g + 7471 * b + 32768) >> 16`.
//! The weights sum to 65536, so white maps to 255 and the result always fits
//! in a byte.

use crate::image::{ImageView, OwnedImage, PixelLayout};

const WEIGHT_R: u32 = 19595;
const WEIGHT_G: u32 = 38470;
const WEIGHT_B: u32 = 7471;

/// Maps one RGB triple to its luma value.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = WEIGHT_R * u32::from(r) + WEIGHT_G * u32::from(g) + WEIGHT_B * u32::from(b);
    ((y + (1 << 15)) >> 16) as u8
}

/// Converts a view to a single-channel gray image.
///
/// Gray views are copied unchanged.
pub fn to_gray(view: ImageView<'_>) -> OwnedImage {
    match view.layout() {
        PixelLayout::Gray => OwnedImage::from_view(view),
        PixelLayout::Rgb => {
            let mut data = Vec::with_capacity(view.width() * view.height());
            for y in 0..view.height() {
                if let Some(row) = view.row(y) {
                    data.extend(row.chunks_exact(3).map(|px| luma(px[0], px[1], px[2])));
                }
            }
            OwnedImage::from_raw_parts(data, view.width(), view.height(), PixelLayout::Gray)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{luma, to_gray};
    use crate::image::{ImageView, PixelLayout};

    #[test]
    fn luma_weights_cover_full_range() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn to_gray_reduces_rgb_and_keeps_gray() {
        let rgb = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 10, 10, 10];
        let view = ImageView::from_slice(&rgb, 2, 2, PixelLayout::Rgb).unwrap();
        let gray = to_gray(view);
        assert_eq!(gray.layout(), PixelLayout::Gray);
        assert_eq!(gray.data(), &[76u8, 150, 29, 10]);

        let again = to_gray(gray.view());
        assert_eq!(again, gray);
    }
}
