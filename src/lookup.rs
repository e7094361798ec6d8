//! High-level image lookup bound to one source image.

use crate::binary::ImageBinary;
use crate::image::luma::to_gray;
use crate::image::ImageView;
use crate::search::scan::scan_rect;
use crate::search::{ChannelPolicy, GPoint, Rect, ScanParams};
use crate::trace::trace_event;
use crate::util::LookupResult;

/// Channel handling chosen when a `Lookup` is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupMode {
    /// Source and templates are reduced to luma before matching.
    Gray,
    /// Channels are kept as-is; templates must carry compatible channels.
    Color,
}

/// Template search over a source image using normalized cross-correlation.
///
/// The source image is decomposed once at construction and only read
/// afterwards, so a `Lookup` can be shared between threads and searched
/// concurrently.
///
/// ```
/// use ncclookup::{ImageView, Lookup, PixelLayout};
///
/// let image = [0u8, 10, 20, 30, 10, 20, 30, 0, 20, 30, 0, 10, 30, 0, 10, 20];
/// let view = ImageView::from_slice(&image, 4, 4, PixelLayout::Gray).unwrap();
/// let lookup = Lookup::new(view);
///
/// let template = view.roi(1, 1, 2, 2).unwrap();
/// let hits = lookup.find_all(template, 0.99).unwrap();
/// assert!(hits.iter().any(|p| (p.x, p.y) == (1, 1)));
/// ```
#[derive(Clone, Debug)]
pub struct Lookup {
    binary: ImageBinary,
    mode: LookupMode,
    policy: ChannelPolicy,
}

impl Lookup {
    /// Builds a grayscale lookup; colour sources are converted to luma.
    pub fn new(image: ImageView<'_>) -> Self {
        let gray = to_gray(image);
        Self::from_binary(ImageBinary::from_view(gray.view()), LookupMode::Gray)
    }

    /// Builds a lookup that compares every colour channel.
    pub fn new_color(image: ImageView<'_>) -> Self {
        Self::from_binary(ImageBinary::from_view(image), LookupMode::Color)
    }

    fn from_binary(binary: ImageBinary, mode: LookupMode) -> Self {
        trace_event!(
            "lookup_ready",
            width = binary.width(),
            height = binary.height(),
            channels = binary.channel_count()
        );
        Self {
            binary,
            mode,
            policy: ChannelPolicy::default(),
        }
    }

    /// Sets the channel pairing policy used by every search.
    pub fn with_channel_policy(mut self, policy: ChannelPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the lookup mode.
    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    /// Returns the channel pairing policy.
    pub fn channel_policy(&self) -> ChannelPolicy {
        self.policy
    }

    /// Returns the precomputed source image statistics.
    pub fn binary(&self) -> &ImageBinary {
        &self.binary
    }

    /// Returns the source image width.
    pub fn width(&self) -> usize {
        self.binary.width()
    }

    /// Returns the source image height.
    pub fn height(&self) -> usize {
        self.binary.height()
    }

    /// Searches for `template` inside `rect` (inclusive corners).
    ///
    /// In gray mode the template is converted to luma first. With `all ==
    /// false` at most one point, the first in scan order, is returned.
    pub fn find_in_rect(
        &self,
        template: ImageView<'_>,
        rect: Rect,
        threshold: f64,
        all: bool,
    ) -> LookupResult<Vec<GPoint>> {
        let template = match self.mode {
            LookupMode::Gray => ImageBinary::from_view(to_gray(template).view()),
            LookupMode::Color => ImageBinary::from_view(template),
        };
        let params = ScanParams {
            threshold,
            collect_all: all,
            policy: self.policy,
        };
        scan_rect(&self.binary, rect, &template, params)
    }

    /// Finds every window scoring at least `threshold` over the whole image.
    pub fn find_all(&self, template: ImageView<'_>, threshold: f64) -> LookupResult<Vec<GPoint>> {
        self.find_in_rect(template, self.full_rect(), threshold, true)
    }

    /// Finds the first window, in scan order, scoring at least `threshold`.
    pub fn find_one(&self, template: ImageView<'_>, threshold: f64) -> LookupResult<Vec<GPoint>> {
        self.find_in_rect(template, self.full_rect(), threshold, false)
    }

    fn full_rect(&self) -> Rect {
        Rect::full(self.binary.width(), self.binary.height())
    }
}

#[cfg(test)]
mod tests {
    use super::{Lookup, LookupMode};
    use crate::image::{ChannelType, ImageView, PixelLayout};
    use crate::search::ChannelPolicy;
    use crate::util::LookupError;

    const RGB: [u8; 18] = [
        200, 10, 10, 10, 200, 10, 10, 10, 200, //
        90, 90, 90, 30, 60, 120, 250, 0, 40,
    ];

    #[test]
    fn gray_mode_accepts_colour_templates() {
        let view = ImageView::from_slice(&RGB, 3, 2, PixelLayout::Rgb).unwrap();
        let lookup = Lookup::new(view);
        assert_eq!(lookup.mode(), LookupMode::Gray);
        assert_eq!(lookup.binary().channel_count(), 1);

        let template = view.roi(1, 0, 2, 2).unwrap();
        let hits = lookup.find_all(template, 0.999).unwrap();
        assert!(hits.iter().any(|p| (p.x, p.y) == (1, 0)));
    }

    #[test]
    fn color_mode_rejects_gray_templates() {
        let view = ImageView::from_slice(&RGB, 3, 2, PixelLayout::Rgb).unwrap();
        let lookup = Lookup::new_color(view);
        let gray = [1u8, 2, 3, 4];
        let template = ImageView::from_slice(&gray, 2, 2, PixelLayout::Gray).unwrap();
        assert_eq!(
            lookup.find_all(template, 0.5).err().unwrap(),
            LookupError::ChannelMismatch {
                expected: ChannelType::Red,
                actual: ChannelType::Gray,
            }
        );
    }

    #[test]
    fn color_mode_self_match_scores_one_on_every_channel() {
        let view = ImageView::from_slice(&RGB, 3, 2, PixelLayout::Rgb).unwrap();
        let lookup = Lookup::new_color(view).with_channel_policy(ChannelPolicy::Exact);
        let template = view.roi(0, 0, 2, 2).unwrap();
        let hits = lookup.find_one(template, 0.999).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!((hits[0].x, hits[0].y), (0, 0));
        assert!((hits[0].g - 1.0).abs() < 1e-9);
    }
}
