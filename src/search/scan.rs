//! Exhaustive scan over a rectangle of window origins.

use crate::binary::ImageBinary;
use crate::search::correlation::{pair_channels, score_window};
use crate::search::{GPoint, Rect, ScanParams};
use crate::trace::{trace_event, trace_span};
use crate::util::LookupResult;

/// Scans every template-sized window whose pixels lie inside `rect`.
///
/// Origins run `x` in `[rect.x0, rect.x1 - tw + 1]` (outer) and `y` in
/// `[rect.y0, rect.y1 - th + 1]` (inner). The rectangle is first clipped to
/// the image; a rectangle smaller than the template yields no windows. Matches
/// are returned in scan order. With `collect_all == false` the scan stops at
/// the first accepted window.
///
/// Channel pairing is validated before the first window, so a mismatch fails
/// the call even when no window would be scored.
pub fn scan_rect(
    image: &ImageBinary,
    rect: Rect,
    template: &ImageBinary,
    params: ScanParams,
) -> LookupResult<Vec<GPoint>> {
    let pairs = pair_channels(image, template, params.policy)?;

    let _span = trace_span!(
        "scan_rect",
        x0 = rect.x0,
        y0 = rect.y0,
        x1 = rect.x1,
        y1 = rect.y1,
        threshold = params.threshold
    )
    .entered();

    let mut out = Vec::new();
    let Some((xs, ys)) = origin_ranges(image, rect, template) else {
        trace_event!("scan_windows", count = 0usize);
        return Ok(out);
    };

    let mut evaluated = 0usize;
    'scan: for x in xs {
        for y in ys.clone() {
            evaluated += 1;
            if let Some(g) = score_window(image, template, pairs, x, y, params.threshold) {
                out.push(GPoint { x, y, g });
                if !params.collect_all {
                    break 'scan;
                }
            }
        }
    }

    trace_event!("scan_windows", count = evaluated);
    trace_event!("scan_matches", count = out.len());
    Ok(out)
}

/// Inclusive origin ranges for windows inside the clipped rectangle.
fn origin_ranges(
    image: &ImageBinary,
    rect: Rect,
    template: &ImageBinary,
) -> Option<(
    std::ops::RangeInclusive<usize>,
    std::ops::RangeInclusive<usize>,
)> {
    let rect = rect.clip(image.width(), image.height())?;
    let tpl_width = template.width();
    let tpl_height = template.height();
    if rect.x1 + 1 < rect.x0 + tpl_width || rect.y1 + 1 < rect.y0 + tpl_height {
        return None;
    }
    Some((
        rect.x0..=rect.x1 + 1 - tpl_width,
        rect.y0..=rect.y1 + 1 - tpl_height,
    ))
}

#[cfg(test)]
mod tests {
    use super::scan_rect;
    use crate::binary::ImageBinary;
    use crate::image::ChannelType;
    use crate::search::{ChannelPolicy, Rect, ScanParams};
    use crate::util::LookupError;

    fn gray(width: usize, height: usize, samples: Vec<f64>) -> ImageBinary {
        ImageBinary::from_planes(width, height, vec![(ChannelType::Gray, samples)]).unwrap()
    }

    fn params(threshold: f64, collect_all: bool) -> ScanParams {
        ScanParams {
            threshold,
            collect_all,
            policy: ChannelPolicy::IgnoreExtra,
        }
    }

    #[test]
    fn scan_order_is_x_outer_y_inner() {
        let samples = (0..20).map(|v| f64::from((v * 7) % 11)).collect();
        let image = gray(5, 4, samples);
        let template = gray(2, 2, vec![1.0, 4.0, 9.0, 2.0]);

        let hits = scan_rect(&image, Rect::full(5, 4), &template, params(-1.0, true)).unwrap();
        let origins: Vec<_> = hits.iter().map(|p| (p.x, p.y)).collect();
        let mut expected = Vec::new();
        for x in 0..=3 {
            for y in 0..=2 {
                expected.push((x, y));
            }
        }
        assert_eq!(origins, expected);
    }

    #[test]
    fn first_match_mode_stops_early() {
        let image = gray(4, 1, vec![1.0, 2.0, 1.0, 2.0]);
        let template = gray(2, 1, vec![1.0, 2.0]);
        let all = scan_rect(&image, Rect::full(4, 1), &template, params(0.9, true)).unwrap();
        assert_eq!(all.len(), 2);
        let one = scan_rect(&image, Rect::full(4, 1), &template, params(0.9, false)).unwrap();
        assert_eq!(one, vec![all[0]]);
    }

    #[test]
    fn rect_smaller_than_template_is_empty() {
        let image = gray(4, 4, (0..16).map(f64::from).collect());
        let template = gray(3, 3, (0..9).map(f64::from).collect());
        let hits = scan_rect(&image, Rect::new(1, 1, 2, 3), &template, params(-1.0, true)).unwrap();
        assert!(hits.is_empty());
        let hits = scan_rect(&image, Rect::new(9, 9, 12, 12), &template, params(-1.0, true)).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn mismatch_fails_even_without_windows() {
        let image = gray(2, 2, vec![0.0, 1.0, 2.0, 3.0]);
        let template =
            ImageBinary::from_planes(3, 3, vec![(ChannelType::Blue, vec![0.0; 9])]).unwrap();
        let err = scan_rect(&image, Rect::full(2, 2), &template, params(0.5, true))
            .err()
            .unwrap();
        assert_eq!(
            err,
            LookupError::ChannelMismatch {
                expected: ChannelType::Gray,
                actual: ChannelType::Blue,
            }
        );
    }
}
