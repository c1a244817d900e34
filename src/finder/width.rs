//! Line-width and line-center estimation.

use crate::angle::Angle;
use crate::finder::mask::Mask;
use crate::finder::raster::Ray;
use crate::pixel::Pixel;

/// Result of `get_middle`: the corrected center pixel and the line's total
/// measured width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetMiddleResult {
    pub pixel: Pixel,
    pub width: u32,
}

/// Sample the half-width of a line at up to `max_gap + 1` points along it,
/// moving perpendicular to `angle` (`+90°` if `plus90`, else `-90°`) at each
/// sample until an off-pixel is found. Returns the maximum half-width
/// observed, or `max_line_width` as a "too thick" sentinel if any sample
/// runs the full `max_line_width` without finding an off-pixel.
pub fn width_at(
    mask: &Mask,
    pixel: Pixel,
    angle: Angle,
    max_gap: u32,
    plus90: bool,
    max_line_width: u32,
) -> u32 {
    let mut along = Ray::new(pixel, angle.cos_sin(), mask.width, mask.height);
    let perp_angle = angle.perpendicular(plus90);
    let mut max_width_so_far = 0;

    for _ in 0..=max_gap {
        if !along.has_next() {
            break;
        }
        let along_pixel = along.next();
        let mut perp = Ray::new(along_pixel, perp_angle.cos_sin(), mask.width, mask.height);
        while perp.has_next() && perp.current_length() <= max_line_width {
            let p = perp.next();
            if !mask.get_pixel(p) {
                break;
            }
        }
        if perp.current_length() > max_line_width {
            return max_line_width;
        }
        if perp.current_length() > max_width_so_far {
            max_width_so_far = perp.current_length();
        }
    }
    max_width_so_far.saturating_sub(1)
}

/// Find the corrected center and total width of the line believed to pass
/// through `point_on_line`, given an angle estimate. Returns `None` if the
/// point isn't on (an on-pixel), or if the measured width on either side is
/// at or above `max_line_width` (a blob, not a thin line).
pub fn get_middle(
    mask: &Mask,
    point_on_line: Pixel,
    line_angle: Angle,
    max_gap: u32,
    max_line_width: u32,
) -> Option<GetMiddleResult> {
    if !mask.get_pixel(point_on_line) {
        return None;
    }

    let opposite_angle = line_angle.opposite();
    let half_gap = max_gap / 2;

    let width_upper_1 = width_at(mask, point_on_line, line_angle, half_gap, true, max_line_width);
    let width_lower_1 = width_at(mask, point_on_line, line_angle, half_gap, false, max_line_width);
    let width_upper_2 = width_at(mask, point_on_line, opposite_angle, half_gap, false, max_line_width);
    let width_lower_2 = width_at(mask, point_on_line, opposite_angle, half_gap, true, max_line_width);

    let upper = width_upper_1.max(width_upper_2);
    let lower = width_lower_1.max(width_lower_2);

    if upper >= max_line_width || lower >= max_line_width {
        return None;
    }

    let correction_x2 = upper as i64 - lower as i64;
    let corr_distance = correction_x2.unsigned_abs() as u32 / 2;
    let corr_direction = correction_x2 > 0;
    let corr_angle = line_angle.perpendicular(corr_direction);
    let middle = mask.move_pixel(point_on_line, corr_angle.cos_sin(), corr_distance);

    Some(GetMiddleResult {
        pixel: middle,
        width: (upper + lower).saturating_sub(1),
    })
}

/// Like `get_middle`, but retries by jumping `retry_jump_distance` pixels
/// along `angle` when the width can't be determined — typically because
/// `start` sits at an intersection, where the local width is huge. Stops
/// once `get_middle` succeeds, or once a jump fails to move (ran off the
/// canvas).
pub fn get_middle_with_retries(
    mask: &Mask,
    start: Pixel,
    angle: Angle,
    max_gap: u32,
    max_line_width: u32,
    retry_jump_distance: u32,
) -> Option<GetMiddleResult> {
    let mut current = start;
    loop {
        let middle = get_middle(mask, current, angle, max_gap, max_line_width);
        if middle.is_some() {
            return middle;
        }
        let next = mask.move_pixel(current, angle.cos_sin(), retry_jump_distance);
        if next == current {
            return None;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    #[test]
    fn get_middle_none_when_off_pixel() {
        let mask = Mask::new(10, 10);
        let result = get_middle(
            &mask,
            Pixel::new(5, 5),
            Angle::from_index(0),
            config::MAX_GAP,
            config::MAX_LINE_WIDTH,
        );
        assert!(result.is_none());
    }

    #[test]
    fn get_middle_on_uniform_horizontal_line() {
        let mut mask = Mask::new(20, 20);
        // A 5-pixel-wide horizontal band, rows 6..=10, centered at row 8.
        for y in 6..=10u32 {
            for x in 0..20u32 {
                mask.set(Pixel::new(x, y));
            }
        }
        let result = get_middle(
            &mask,
            Pixel::new(10, 6),
            Angle::from_index(0),
            config::MAX_GAP,
            config::MAX_LINE_WIDTH,
        )
        .expect("line should be found");
        assert_eq!(result.width, 5);
        assert_eq!(result.pixel.y, 8);
    }

    #[test]
    fn get_middle_idempotent_on_reported_center() {
        let mut mask = Mask::new(30, 30);
        for y in 10..=16u32 {
            for x in 0..30u32 {
                mask.set(Pixel::new(x, y));
            }
        }
        let first = get_middle(
            &mask,
            Pixel::new(15, 11),
            Angle::from_index(0),
            config::MAX_GAP,
            config::MAX_LINE_WIDTH,
        )
        .unwrap();
        let second = get_middle(
            &mask,
            first.pixel,
            Angle::from_index(0),
            config::MAX_GAP,
            config::MAX_LINE_WIDTH,
        )
        .unwrap();
        assert!((second.pixel.y as i64 - first.pixel.y as i64).abs() <= 1);
        assert_eq!(second.width, first.width);
    }

    #[test]
    fn get_middle_rejects_blob_wider_than_max() {
        let mut mask = Mask::new(60, 60);
        for y in 0..60u32 {
            for x in 0..60u32 {
                mask.set(Pixel::new(x, y));
            }
        }
        let result = get_middle(
            &mask,
            Pixel::new(30, 30),
            Angle::from_index(0),
            config::MAX_GAP,
            config::MAX_LINE_WIDTH,
        );
        assert!(result.is_none());
    }

    #[test]
    fn get_middle_with_retries_escapes_intersection() {
        let mut mask = Mask::new(60, 60);
        // Horizontal line and a crossing vertical line, forming a "+" blob
        // at the intersection. Starting exactly at the intersection should
        // fail locally but succeed after a retry jump along the line.
        for x in 0..60u32 {
            mask.set(Pixel::new(x, 30));
        }
        for y in 0..60u32 {
            mask.set(Pixel::new(30, y));
        }
        // Thicken the intersection into an actual blob wider than MAX_LINE_WIDTH.
        for dy in 0..20u32 {
            for dx in 0..20u32 {
                mask.set(Pixel::new(20 + dx, 20 + dy));
            }
        }
        let result = get_middle_with_retries(
            &mask,
            Pixel::new(30, 30),
            Angle::from_index(0),
            config::MAX_GAP,
            config::MAX_LINE_WIDTH,
            config::RETRY_JUMP_DISTANCE,
        );
        assert!(result.is_some());
    }
}
