//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage, PixelLayout};
use crate::util::{LookupError, LookupResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> LookupResult<ImageView<'_>> {
    ImageView::from_slice(
        img.as_raw(),
        img.width() as usize,
        img.height() as usize,
        PixelLayout::Gray,
    )
}

/// Creates a borrowed view from an RGB image buffer.
pub fn view_from_rgb_image(img: &image::RgbImage) -> LookupResult<ImageView<'_>> {
    ImageView::from_slice(
        img.as_raw(),
        img.width() as usize,
        img.height() as usize,
        PixelLayout::Rgb,
    )
}

/// Creates an owned image from a dynamic image.
///
/// Colour images become `Rgb` (alpha is dropped); grey images stay `Gray`.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> LookupResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    if img.color().has_color() {
        OwnedImage::new(img.to_rgb8().into_raw(), width, height, PixelLayout::Rgb)
    } else {
        OwnedImage::new(img.to_luma8().into_raw(), width, height, PixelLayout::Gray)
    }
}

/// Loads an image from disk, keeping its colour channels.
pub fn load_image<P: AsRef<Path>>(path: P) -> LookupResult<OwnedImage> {
    let img = image::open(path).map_err(|err| LookupError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
