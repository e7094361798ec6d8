//! Per-window NCC scoring.
//!
//! For a template placed with its top-left corner at `(x, y)`:
//!
//! ```text
//! gamma = sum(I'(x+i, y+j) * T'(i, j)) / sqrt(dev_I(window) * dev_T)
//! ```
//!
//! where `I'` and `T'` are zero-mean samples, `dev_I(window)` is the local
//! deviation of the image under the window and `dev_T` the template's total
//! deviation. Channels are scored in order and the weakest one sets the
//! combined score.

use crate::binary::{ChannelStatistics, ImageBinary};
use crate::search::{ChannelPolicy, GPoint, DEGENERATE_SCORE};
use crate::trace::trace_debug;
use crate::util::{LookupError, LookupResult};

/// Computes the NCC score of one channel pair at window origin `(x, y)`.
///
/// Returns [`DEGENERATE_SCORE`] when either the image window or the template
/// has zero deviation. The template must fit inside the image at `(x, y)`.
pub fn gamma(image: &ChannelStatistics, template: &ChannelStatistics, x: usize, y: usize) -> f64 {
    let tpl_width = template.width();
    let tpl_height = template.height();

    let dev_i = image.deviation_over_rect(x, y, x + tpl_width - 1, y + tpl_height - 1);
    let denom = (dev_i * template.total_deviation()).sqrt();
    if denom == 0.0 {
        return DEGENERATE_SCORE;
    }

    let img_width = image.width();
    let img_zm = image.zero_mean();
    let tpl_zm = template.zero_mean();
    let mut numer = 0.0f64;
    for ty in 0..tpl_height {
        let img_start = (y + ty) * img_width + x;
        let img_row = &img_zm[img_start..img_start + tpl_width];
        let tpl_row = &tpl_zm[ty * tpl_width..(ty + 1) * tpl_width];
        numer += img_row
            .iter()
            .zip(tpl_row)
            .map(|(a, b)| a * b)
            .sum::<f64>();
    }

    // Rounding can push a perfect (anti-)correlation just past the bound.
    (numer / denom).clamp(-1.0, 1.0)
}

/// Validates channel pairing up front and returns how many channels to compare.
///
/// Channel `i` of the image is paired with channel `i` of the template. Under
/// [`ChannelPolicy::IgnoreExtra`] the first `min(image, template)` channels
/// are paired and the rest ignored; [`ChannelPolicy::Exact`] rejects differing
/// counts. Every paired index must carry the same channel type.
pub fn pair_channels(
    image: &ImageBinary,
    template: &ImageBinary,
    policy: ChannelPolicy,
) -> LookupResult<usize> {
    let n_image = image.channel_count();
    let n_template = template.channel_count();
    if policy == ChannelPolicy::Exact && n_image != n_template {
        return Err(LookupError::ChannelCountMismatch {
            image: n_image,
            template: n_template,
        });
    }

    for (img_ch, tpl_ch) in image.channels().iter().zip(template.channels()) {
        if img_ch.channel() != tpl_ch.channel() {
            trace_debug!(
                expected = %img_ch.channel(),
                actual = %tpl_ch.channel(),
                "channel mismatch"
            );
            return Err(LookupError::ChannelMismatch {
                expected: img_ch.channel(),
                actual: tpl_ch.channel(),
            });
        }
    }
    Ok(n_image.min(n_template))
}

/// Scores one window over the first `pairs` channels.
///
/// Channels are evaluated in order and the first channel scoring below
/// `threshold` rejects the window without evaluating the rest. Accepted
/// windows score the minimum gamma seen.
pub(crate) fn score_window(
    image: &ImageBinary,
    template: &ImageBinary,
    pairs: usize,
    x: usize,
    y: usize,
    threshold: f64,
) -> Option<f64> {
    let mut score = f64::MAX;
    for (img_ch, tpl_ch) in image
        .channels()
        .iter()
        .zip(template.channels())
        .take(pairs)
    {
        let g = gamma(img_ch, tpl_ch, x, y);
        if g < threshold {
            return None;
        }
        score = score.min(g);
    }
    Some(score)
}

/// Combined score of the window at `(x, y)`, or `None` if it is rejected.
///
/// Pairs channels with [`ChannelPolicy::IgnoreExtra`]; a type mismatch at any
/// paired index is an error.
pub fn combined_score(
    image: &ImageBinary,
    template: &ImageBinary,
    x: usize,
    y: usize,
    threshold: f64,
) -> LookupResult<Option<GPoint>> {
    let pairs = pair_channels(image, template, ChannelPolicy::IgnoreExtra)?;
    Ok(score_window(image, template, pairs, x, y, threshold).map(|g| GPoint { x, y, g }))
}

#[cfg(test)]
mod tests {
    use super::{combined_score, gamma, pair_channels};
    use crate::binary::ImageBinary;
    use crate::image::ChannelType;
    use crate::search::{ChannelPolicy, DEGENERATE_SCORE};
    use crate::util::LookupError;

    fn gray(width: usize, height: usize, samples: &[f64]) -> ImageBinary {
        ImageBinary::from_planes(width, height, vec![(ChannelType::Gray, samples.to_vec())])
            .unwrap()
    }

    #[test]
    fn gamma_is_one_on_verbatim_patch() {
        let image = gray(3, 2, &[1.0, 5.0, 2.0, 8.0, 3.0, 7.0]);
        let template = gray(2, 2, &[5.0, 2.0, 3.0, 7.0]);
        let g = gamma(&image.channels()[0], &template.channels()[0], 1, 0);
        assert!((g - 1.0).abs() < 1e-9, "gamma {g}");
    }

    #[test]
    fn gamma_is_invariant_to_brightness_and_contrast() {
        let image = gray(3, 1, &[10.0, 20.0, 40.0]);
        let template = gray(3, 1, &[3.0, 5.0, 9.0]);
        let g = gamma(&image.channels()[0], &template.channels()[0], 0, 0);
        assert!((g - 1.0).abs() < 1e-9);

        let inverted = gray(3, 1, &[9.0, 7.0, 3.0]);
        let g = gamma(&image.channels()[0], &inverted.channels()[0], 0, 0);
        assert!((g + 1.0).abs() < 1e-9);
    }

    #[test]
    fn flat_template_or_window_is_degenerate() {
        let image = gray(4, 1, &[4.0, 4.0, 1.0, 9.0]);
        let flat = gray(2, 1, &[6.0, 6.0]);
        let textured = gray(2, 1, &[1.0, 2.0]);
        assert_eq!(
            gamma(&image.channels()[0], &flat.channels()[0], 2, 0),
            DEGENERATE_SCORE
        );
        assert_eq!(
            gamma(&image.channels()[0], &textured.channels()[0], 0, 0),
            DEGENERATE_SCORE
        );
    }

    #[test]
    fn weakest_channel_sets_the_score() {
        // Red matches exactly, green is partially correlated.
        let image = ImageBinary::from_planes(
            3,
            1,
            vec![
                (ChannelType::Red, vec![1.0, 2.0, 3.0]),
                (ChannelType::Green, vec![1.0, 3.0, 2.0]),
            ],
        )
        .unwrap();
        let template = ImageBinary::from_planes(
            3,
            1,
            vec![
                (ChannelType::Red, vec![1.0, 2.0, 3.0]),
                (ChannelType::Green, vec![1.0, 2.0, 3.0]),
            ],
        )
        .unwrap();
        let point = combined_score(&image, &template, 0, 0, -1.0).unwrap().unwrap();
        assert!((point.g - 0.5).abs() < 1e-9, "score {}", point.g);

        assert!(combined_score(&image, &template, 0, 0, 0.6)
            .unwrap()
            .is_none());
    }

    #[test]
    fn mismatched_types_fail_and_extra_channels_follow_policy() {
        let gray_img = gray(2, 1, &[1.0, 2.0]);
        let rgb = ImageBinary::from_planes(
            2,
            1,
            vec![
                (ChannelType::Red, vec![1.0, 2.0]),
                (ChannelType::Green, vec![1.0, 2.0]),
                (ChannelType::Blue, vec![1.0, 2.0]),
            ],
        )
        .unwrap();
        assert_eq!(
            combined_score(&rgb, &gray_img, 0, 0, 0.0).err().unwrap(),
            LookupError::ChannelMismatch {
                expected: ChannelType::Red,
                actual: ChannelType::Gray,
            }
        );

        let red_only =
            ImageBinary::from_planes(2, 1, vec![(ChannelType::Red, vec![2.0, 1.0])]).unwrap();
        assert_eq!(
            pair_channels(&rgb, &red_only, ChannelPolicy::IgnoreExtra),
            Ok(1)
        );
        assert_eq!(
            pair_channels(&rgb, &red_only, ChannelPolicy::Exact),
            Err(LookupError::ChannelCountMismatch {
                image: 3,
                template: 1,
            })
        );
    }
}
