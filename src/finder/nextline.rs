//! Searching for the line perpendicular to an already-known one.

use crate::angle::Angle;
use crate::config::FinderConfig;
use crate::finder::hough;
use crate::finder::mask::Mask;
use crate::finder::raster::Ray;
use crate::finder::width::get_middle;
use crate::pixel::Pixel;

/// A located, refined line: a center pixel, a measured width, and an angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineResult {
    pub center: Pixel,
    pub width: u32,
    pub angle: Angle,
}

/// Validate a candidate pixel as lying on a line roughly perpendicular to
/// `perp`, rejecting it if too thin or too weakly voted for.
fn check_line(
    mask: &Mask,
    config: &FinderConfig,
    candidate: Pixel,
    perp: Angle,
    min_width: u32,
) -> Option<LineResult> {
    let middle = get_middle(mask, candidate, perp, config.max_gap, config.max_line_width)?;
    if middle.width <= min_width {
        return None;
    }

    let refined = hough::find_line_angle_accurate_range(
        mask,
        middle.pixel,
        perp,
        config.accurate_range_half_width,
        config.hough_max_gap,
    );
    if refined.count < config.minimum_line_vote_count {
        return None;
    }

    Some(LineResult {
        center: middle.pixel,
        width: middle.width,
        angle: refined.angle,
    })
}

/// Search for the line perpendicular to `line`, on the side given by
/// `direction` (`true` = `+90°`), starting `2*line.width + offset` pixels
/// out and `min_distance` pixels along `line`. Returns `None` if the parallel
/// search path runs off the canvas before a valid candidate is found.
pub fn find_next_line(
    mask: &Mask,
    config: &FinderConfig,
    line: LineResult,
    direction: bool,
    min_distance: u32,
    offset: u32,
) -> Option<LineResult> {
    let perp = line.angle.perpendicular(direction);
    let perp_distance = 2 * line.width + offset;
    let mut search_start = mask.move_pixel(line.center, perp.cos_sin(), perp_distance);
    if min_distance > 0 {
        search_start = mask.move_pixel(search_start, line.angle.cos_sin(), min_distance);
    }

    let min_width = line.width / 3;
    let mut path = Ray::new(search_start, line.angle.cos_sin(), mask.width, mask.height);

    while path.has_next() {
        // Advance to the start of the next on-run.
        let mut on_pixel = None;
        while path.has_next() {
            let p = path.next();
            if mask.get_pixel(p) {
                on_pixel = Some(p);
                break;
            }
        }
        let Some(run_start) = on_pixel else {
            return None;
        };

        // Advance to the end of that run.
        let mut run_end = run_start;
        while path.has_next() {
            let p = path.next();
            if !mask.get_pixel(p) {
                break;
            }
            run_end = p;
        }

        let candidate = Pixel::average(run_start, run_end);
        if let Some(result) = check_line(mask, config, candidate, perp, min_width) {
            return Some(result);
        }
    }
    None
}
