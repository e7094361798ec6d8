//! Low-level building blocks for custom search pipelines.
//!
//! These expose channel statistics, per-window scoring and the rectangle scan
//! underneath [`Lookup`](crate::Lookup). Most users should prefer `Lookup`.

pub use crate::binary::{ChannelStatistics, ImageBinary};
pub use crate::image::luma::{luma, to_gray};
pub use crate::search::correlation::{combined_score, gamma, pair_channels};
pub use crate::search::scan::scan_rect;
