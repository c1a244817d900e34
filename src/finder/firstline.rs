//! Finding the first line in a mask — the seed the rest of the square
//! assembler grows from.

use crate::angle::Angle;
use crate::config::FinderConfig;
use crate::finder::hough;
use crate::finder::mask::Mask;
use crate::finder::scan::CenteredScan;
use crate::finder::width::{get_middle_with_retries, GetMiddleResult};
use crate::pixel::Pixel;

/// Result of a successful per-column / estimator pass: a midpoint, its
/// measured width, and the coarse angle that led to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstLineEstimate {
    pub middle: Pixel,
    pub width: u32,
    pub estimated_angle: Angle,
}

/// Two near-opposite `LineResult`-shaped readings of the first line, sharing
/// a center but refined from opposite angle estimates. See `get_first_two_half_lines`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfLine {
    pub center: Pixel,
    pub width: u32,
    pub angle: Angle,
}

/// Search one column's rows, center-out, for a run of on-pixels suitable as
/// a first-line candidate. Rejects near-vertical runs (extent at or above
/// `maximum_vertical_start_line_width`).
fn find_column_midpoint(mask: &Mask, config: &FinderConfig, x: u32) -> Option<(u32, u32)> {
    let mut rows = CenteredScan::new(mask.height);
    let center = rows.center();

    if mask.get(x, center) {
        let mut last = center;
        while last + 1 < mask.height && mask.get(x, last + 1) {
            last += 1;
        }
        let mut first = center;
        while first > 0 && mask.get(x, first - 1) {
            first -= 1;
        }
        let width = last - first + 1;
        if width >= config.maximum_vertical_start_line_width {
            return None;
        }
        return Some(((first + last) / 2, width));
    }

    let first_on = rows.find(|&y| mask.get(x, y))?;
    let (mut first, mut last) = (first_on, first_on);
    if first_on > center {
        // Found below center: extend further down, away from center.
        while last + 1 < mask.height && mask.get(x, last + 1) {
            last += 1;
        }
    } else {
        // Found above center: extend further up, away from center.
        while first > 0 && mask.get(x, first - 1) {
            first -= 1;
        }
    }
    let width = last - first + 1;
    if width >= config.maximum_vertical_start_line_width {
        return None;
    }
    Some(((first + last) / 2, width))
}

/// Run the coarse angle scan and width/vote gates on a single candidate
/// midpoint. Returns `None` if either gate rejects it.
fn estimate_at(mask: &Mask, config: &FinderConfig, p: Pixel) -> Option<FirstLineEstimate> {
    let coarse = hough::find_line_angle_coarse(mask, p, config.hough_max_gap);
    if coarse.count < config.minimum_start_line_vote_count {
        return None;
    }

    let GetMiddleResult { pixel: middle, width } = get_middle_with_retries(
        mask,
        p,
        coarse.angle,
        config.max_gap,
        config.max_line_width,
        config.retry_jump_distance,
    )?;

    if width < config.minimum_start_line_width {
        return None;
    }

    Some(FirstLineEstimate {
        middle,
        width,
        estimated_angle: coarse.angle,
    })
}

/// Search all columns in center-out order, at stride
/// `first_line_invalid_horizontal_jump`, for the first column yielding a
/// usable estimate.
pub fn find_first_line(mask: &Mask, config: &FinderConfig) -> Option<FirstLineEstimate> {
    let stride = config.first_line_invalid_horizontal_jump.max(1);
    let num_columns = mask.width / stride;
    let mut columns = CenteredScan::new(num_columns.max(1));

    columns.find_map(|i| {
        let x = (i * stride).min(mask.width - 1);
        let (y, _width) = find_column_midpoint(mask, config, x)?;
        estimate_at(mask, config, Pixel::new(x, y))
    })
}

/// From a first-line estimate, derive the two near-opposite half-lines by
/// running the accurate bounded-range scan twice on the shared midpoint:
/// once centered on the estimated angle and once on its opposite.
pub fn get_first_two_half_lines(
    mask: &Mask,
    config: &FinderConfig,
    estimate: FirstLineEstimate,
) -> (HalfLine, HalfLine) {
    let refined = hough::find_line_angle_accurate_range(
        mask,
        estimate.middle,
        estimate.estimated_angle,
        config.accurate_range_half_width,
        config.hough_max_gap,
    );
    let refined_opposite = hough::find_line_angle_accurate_range(
        mask,
        estimate.middle,
        estimate.estimated_angle.opposite(),
        config.accurate_range_half_width,
        config.hough_max_gap,
    );

    (
        HalfLine {
            center: estimate.middle,
            width: estimate.width,
            angle: refined.angle,
        },
        HalfLine {
            center: estimate.middle,
            width: estimate.width,
            angle: refined_opposite.angle,
        },
    )
}
