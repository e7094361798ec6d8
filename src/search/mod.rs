//! NCC scoring and exhaustive window search.
//!
//! `correlation` scores a single window; `scan` walks every window origin of a
//! rectangle in x-outer, y-inner order.

pub mod correlation;
pub mod scan;

/// Score reported for windows where the image window or the template has no
/// deviation, so correlation is undefined.
pub const DEGENERATE_SCORE: f64 = -1.0;

/// A matched window: top-left corner in source coordinates plus its score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GPoint {
    /// X coordinate (column) of the window origin.
    pub x: usize,
    /// Y coordinate (row) of the window origin.
    pub y: usize,
    /// Combined score, the minimum gamma over the compared channels.
    pub g: f64,
}

/// Scan region with inclusive corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Rect {
    /// Creates a rectangle from inclusive corners.
    pub fn new(x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Covers a whole `width x height` image.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width.saturating_sub(1), height.saturating_sub(1))
    }

    /// Intersects with a `width x height` image; `None` if nothing overlaps.
    pub fn clip(&self, width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 || self.x0 >= width || self.y0 >= height {
            return None;
        }
        let clipped = Self::new(
            self.x0,
            self.y0,
            self.x1.min(width - 1),
            self.y1.min(height - 1),
        );
        (clipped.x0 <= clipped.x1 && clipped.y0 <= clipped.y1).then_some(clipped)
    }

    /// Returns `true` if the window origin `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.x0..=self.x1).contains(&x) && (self.y0..=self.y1).contains(&y)
    }
}

/// How to pair source and template channels when their counts differ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelPolicy {
    /// Compare the first `min(image, template)` channels; extras are ignored.
    #[default]
    IgnoreExtra,
    /// Require equal channel counts.
    Exact,
}

/// Parameters for a rectangle scan.
#[derive(Clone, Copy, Debug)]
pub struct ScanParams {
    /// Minimum accepted combined score.
    pub threshold: f64,
    /// Collect every accepted window instead of stopping at the first.
    pub collect_all: bool,
    /// Channel pairing policy.
    pub policy: ChannelPolicy,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            threshold: 0.9,
            collect_all: true,
            policy: ChannelPolicy::IgnoreExtra,
        }
    }
}
