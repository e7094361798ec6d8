//! Per-channel statistics for NCC scoring.

use crate::image::ChannelType;

/// One channel's samples with its zero-mean buffer and total deviation.
///
/// `zero_mean[i] == samples[i] - mean` and `total_deviation` is the sum of
/// the squared zero-mean values. Immutable once built.
#[derive(Clone, Debug)]
pub struct ChannelStatistics {
    channel: ChannelType,
    width: usize,
    height: usize,
    mean: f64,
    samples: Vec<f64>,
    zero_mean: Vec<f64>,
    total_deviation: f64,
}

impl ChannelStatistics {
    /// Builds statistics for a row-major plane of `width * height` samples.
    ///
    /// Uniform planes (including single pixels) get `total_deviation == 0`.
    pub fn new(channel: ChannelType, samples: Vec<f64>, width: usize, height: usize) -> Self {
        debug_assert_eq!(samples.len(), width * height);
        let mean = if samples.is_empty() {
            0.0
        } else {
            samples.iter().sum::<f64>() / samples.len() as f64
        };

        let mut total_deviation = 0.0f64;
        let zero_mean = samples
            .iter()
            .map(|&v| {
                let d = v - mean;
                total_deviation += d * d;
                d
            })
            .collect();

        Self {
            channel,
            width,
            height,
            mean,
            samples,
            zero_mean,
            total_deviation,
        }
    }

    /// Returns the channel tag.
    pub fn channel(&self) -> ChannelType {
        self.channel
    }

    /// Returns the plane width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the plane height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the mean sample value.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the raw samples in row-major order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Returns the zero-mean samples in row-major order.
    pub fn zero_mean(&self) -> &[f64] {
        &self.zero_mean
    }

    /// Returns the sum of squared zero-mean values over the whole plane.
    pub fn total_deviation(&self) -> f64 {
        self.total_deviation
    }

    /// Local deviation of the inclusive rectangle `[x0, x1] x [y0, y1]`: the
    /// sum of squared differences between each sample and the rectangle's own
    /// mean. Over the full plane this equals `total_deviation`; a uniform
    /// rectangle yields exactly zero.
    ///
    /// The rectangle must lie inside the plane; violating that panics.
    pub fn deviation_over_rect(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
        let row_len = x1 - x0 + 1;
        let count = (row_len * (y1 - y0 + 1)) as f64;
        let rows = || {
            (y0..=y1).map(move |y| {
                let start = y * self.width + x0;
                &self.samples[start..start + row_len]
            })
        };

        let sum: f64 = rows().map(|row| row.iter().sum::<f64>()).sum();
        let mean = sum / count;
        rows()
            .map(|row| {
                row.iter()
                    .map(|&v| {
                        let d = v - mean;
                        d * d
                    })
                    .sum::<f64>()
            })
            .sum()
    }
}
