//! ncclookup finds occurrences of a template image inside a larger source
//! image with normalized cross-correlation (NCC).
//!
//! A [`Lookup`] decomposes the source image once into per-channel statistics
//! and then answers any number of searches. Every template-sized window of
//! the search region is scored in `[-1, 1]`; windows meeting the threshold are
//! reported by their top-left corner. Matching is either done on luma
//! ([`Lookup::new`]) or channel by channel ([`Lookup::new_color`]), where the
//! weakest channel decides the score.

pub mod binary;
pub mod image;
pub mod lookup;
pub mod lowlevel;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crate::binary::{ChannelStatistics, ImageBinary};
pub use crate::image::{ChannelType, ImageView, OwnedImage, PixelLayout};
pub use crate::lookup::{Lookup, LookupMode};
pub use crate::search::{ChannelPolicy, GPoint, Rect, ScanParams, DEGENERATE_SCORE};
pub use crate::util::{LookupError, LookupResult};
