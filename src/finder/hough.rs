//! The directional scorer ("Hough") and the two angle searches built on it.

use crate::angle::{Angle, RESOLUTION};
use crate::finder::mask::Mask;
use crate::finder::raster::Ray;
use crate::pixel::Pixel;

/// A scored direction: how far along `angle` from some starting pixel a
/// contiguous-enough run of on-pixels reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoughResult {
    pub angle: Angle,
    pub count: u32,
}

/// Walk the rasterizer from `start` in direction `angle`, scoring how far it
/// gets before `max_gap` consecutive off-pixels are seen. The count is the
/// step index of the farthest on-pixel reached, so it's monotone in both
/// line length and `max_gap`.
pub fn hough(mask: &Mask, start: Pixel, angle: Angle, max_gap: u32) -> HoughResult {
    let mut ray = Ray::new(start, angle.cos_sin(), mask.width, mask.height);
    let mut previous_white = 0;
    while ray.has_next() {
        let point = ray.next();
        if mask.get_pixel(point) {
            previous_white = ray.current_length();
        } else if ray.current_length() - previous_white >= max_gap {
            break;
        }
    }
    HoughResult {
        angle,
        count: previous_white,
    }
}

/// Scan all `RESOLUTION` angles at `start` and return the one with the
/// highest count, breaking ties toward the lowest index (a stable max, not
/// `Iterator::max_by_key`, which would keep the last tie instead).
pub fn find_line_angle_coarse(mask: &Mask, start: Pixel, max_gap: u32) -> HoughResult {
    let mut best = hough(mask, start, Angle::from_index(0), max_gap);
    for i in 1..RESOLUTION {
        let candidate = hough(mask, start, Angle::from_index(i), max_gap);
        if candidate.count > best.count {
            best = candidate;
        }
    }
    best
}

/// Score the `2*half_range + 1` angles centered on `center`, wrapping
/// modulo `RESOLUTION`, and return the centroid of the maximal plateau.
///
/// A plateau is the maximal run of angles around the first maximum whose
/// counts are all at least ⅞ of the maximum count (strict less-than on the
/// boundary — this threshold must be preserved exactly to match reference
/// behavior on noisy ties). If the plateau reaches either
/// edge of the search window, the true maximum might lie outside the range
/// that was scanned; this is logged at `warn!` and the window boundary is
/// used as that side of the plateau.
pub fn find_line_angle_accurate_range(
    mask: &Mask,
    start: Pixel,
    center: Angle,
    half_range: u32,
    max_gap: u32,
) -> HoughResult {
    assert!(2 * half_range < RESOLUTION, "half_range too large for RESOLUTION");

    let m = 2 * half_range + 1;
    let center_idx = center.index() as i64;
    let r = RESOLUTION as i64;
    let n = half_range as i64;

    let angle_at = |i: u32| -> Angle {
        let idx = (center_idx - n + i as i64).rem_euclid(r);
        Angle::from_index(idx as u32)
    };

    let results: Vec<HoughResult> = (0..m).map(|i| hough(mask, start, angle_at(i), max_gap)).collect();

    // First index achieving the maximum count (stable, like std::max_element).
    let mut max_idx = 0usize;
    for i in 1..results.len() {
        if results[i].count > results[max_idx].count {
            max_idx = i;
        }
    }
    let max_count = results[max_idx].count;
    let threshold = max_count - max_count / 8;

    // Scan forward from the maximum for the right edge of the plateau.
    let mut right_not_found = true;
    let mut found_index = results.len();
    for i in max_idx..results.len() {
        if results[i].count < threshold {
            found_index = i;
            right_not_found = false;
            break;
        }
    }
    let last_idx = found_index - 1;

    // Scan backward from just before the maximum for the left edge.
    let mut left_not_found = true;
    let mut l: i64 = -1;
    let mut i = max_idx as i64 - 1;
    while i >= 0 {
        if results[i as usize].count < threshold {
            l = i;
            left_not_found = false;
            break;
        }
        i -= 1;
    }
    let first_idx = (l + 1) as usize;

    if right_not_found || left_not_found {
        log::warn!(
            "accurate-range scan: plateau touches the edge of the search window \
             (center={}, half_range={half_range}); the true maximum may lie outside it",
            center.index()
        );
    }

    HoughResult {
        angle: Angle::average(angle_at(first_idx as u32), angle_at(last_idx as u32)),
        count: results[first_idx].count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    fn mask_with_ray(w: u32, h: u32, start: Pixel, angle: Angle) -> Mask {
        let mut m = Mask::new(w, h);
        m.draw_line(start, angle.cos_sin());
        m
    }

    #[test]
    fn hough_is_monotone_in_max_gap() {
        let mut m = Mask::new(50, 50);
        // A line with a 5-pixel gap in the middle.
        let angle = Angle::from_index(0);
        for x in 0..15 {
            m.set(Pixel::new(x, 25));
        }
        for x in 20..40 {
            m.set(Pixel::new(x, 25));
        }
        let small_gap = hough(&m, Pixel::new(0, 25), angle, 3).count;
        let large_gap = hough(&m, Pixel::new(0, 25), angle, 10).count;
        assert!(large_gap >= small_gap);
    }

    #[test]
    fn coarse_scan_finds_angle_zero() {
        let m = mask_with_ray(80, 80, Pixel::new(40, 40), Angle::from_index(0));
        let result = find_line_angle_coarse(&m, Pixel::new(40, 40), config::HOUGH_MAX_GAP);
        assert_eq!(result.angle, Angle::from_index(0));
    }

    #[test]
    fn coarse_scan_finds_angle_at_various_steps() {
        for idx in [0u32, 45, 90, 180, 270, 300] {
            let angle = Angle::from_index(idx);
            let m = mask_with_ray(90, 90, Pixel::new(45, 45), angle);
            let result = find_line_angle_coarse(&m, Pixel::new(45, 45), config::HOUGH_MAX_GAP);
            assert_eq!(result.angle, angle, "idx={idx}");
        }
    }

    #[test]
    fn accurate_range_centered_on_single_line_returns_same_angle() {
        for idx in [0u32, 10, 90, 180, 350] {
            let angle = Angle::from_index(idx);
            let m = mask_with_ray(100, 100, Pixel::new(50, 50), angle);
            let result = find_line_angle_accurate_range(
                &m,
                Pixel::new(50, 50),
                angle,
                config::ACCURATE_RANGE_HALF_WIDTH,
                config::HOUGH_MAX_GAP,
            );
            assert_eq!(result.angle, angle, "idx={idx}");
        }
    }

    #[test]
    fn accurate_range_handles_wrap_around_zero() {
        let angle = Angle::from_index(2);
        let m = mask_with_ray(100, 100, Pixel::new(50, 50), angle);
        let result = find_line_angle_accurate_range(
            &m,
            Pixel::new(50, 50),
            Angle::from_index(0),
            9,
            config::HOUGH_MAX_GAP,
        );
        assert_eq!(result.angle, angle);
    }
}
