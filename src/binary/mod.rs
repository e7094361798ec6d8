//! Channel decomposition of images into precomputed NCC statistics.
//!
//! An `ImageBinary` is built once per image and is read-only afterwards. The
//! source image of a `Lookup` keeps its binary for its whole life; templates
//! get a fresh binary per search call.

use crate::image::{ChannelType, ImageView};
use crate::trace::{trace_event, trace_span};
use crate::util::{LookupError, LookupResult};

mod channel;

pub use channel::ChannelStatistics;

/// Ordered per-channel statistics of one image.
#[derive(Clone, Debug)]
pub struct ImageBinary {
    width: usize,
    height: usize,
    channels: Vec<ChannelStatistics>,
}

impl ImageBinary {
    /// Decomposes a view into one `ChannelStatistics` per layout channel.
    pub fn from_view(view: ImageView<'_>) -> Self {
        let width = view.width();
        let height = view.height();
        let layout = view.layout();
        let _span = trace_span!(
            "image_binary",
            width = width,
            height = height,
            channels = layout.channel_count()
        )
        .entered();

        let channels = layout
            .channels()
            .iter()
            .enumerate()
            .map(|(idx, &channel)| ChannelStatistics::new(channel, view.plane(idx), width, height))
            .collect();
        Self {
            width,
            height,
            channels,
        }
    }

    /// Builds a binary from already decomposed, tagged planes.
    ///
    /// Every plane must hold exactly `width * height` row-major samples.
    pub fn from_planes(
        width: usize,
        height: usize,
        planes: Vec<(ChannelType, Vec<f64>)>,
    ) -> LookupResult<Self> {
        if width == 0 || height == 0 {
            return Err(LookupError::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(LookupError::InvalidDimensions { width, height })?;
        if planes.is_empty() {
            return Err(LookupError::PlaneLength {
                index: 0,
                expected,
                got: 0,
            });
        }

        let mut channels = Vec::with_capacity(planes.len());
        for (index, (channel, samples)) in planes.into_iter().enumerate() {
            if samples.len() != expected {
                return Err(LookupError::PlaneLength {
                    index,
                    expected,
                    got: samples.len(),
                });
            }
            channels.push(ChannelStatistics::new(channel, samples, width, height));
        }
        trace_event!("image_binary_planes", channels = channels.len());
        Ok(Self {
            width,
            height,
            channels,
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

    /// Returns the channels in decomposition order.
    pub fn channels(&self) -> &[ChannelStatistics] {
        &self.channels
    }

    /// Returns the number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}
