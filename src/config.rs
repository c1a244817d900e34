//! Tunable parameters for the grid-finding pipeline.
//!
//! Collecting these in one struct, constructed once and held alongside the
//! mask, keeps per-call signatures short without scattering constants
//! through the pipeline. `initial_tries` / `initial_tries_factor` control
//! the retried first-corner search used by `finder::square`.

/// How many consecutive off-pixels the directional scorer tolerates before
/// giving up on a ray. See `hough::hough`.
pub const HOUGH_MAX_GAP: u32 = 16;

/// Default gap budget for the width/center estimator.
pub const MAX_GAP: u32 = 10;

/// "Lines" wider than this are treated as blobs, not lines.
pub const MAX_LINE_WIDTH: u32 = 32;

/// How far to jump along a line, in pixels, when `get_middle` fails at an
/// intersection and needs to retry away from it.
pub const RETRY_JUMP_DISTANCE: u32 = MAX_LINE_WIDTH;

/// Minimum accepted width for the first detected line.
pub const MINIMUM_START_LINE_WIDTH: u32 = 10;

/// First-line candidates with a vertical extent at or above this are
/// rejected as near-vertical.
pub const MAXIMUM_VERTICAL_START_LINE_WIDTH: u32 = 32;

/// Column stride used when searching for the first line.
pub const FIRST_LINE_INVALID_HORIZONTAL_JUMP: u32 = 10;

/// Half-width (in quantized angle steps) of the accurate bounded-range scan
/// used to refine a roughly-known angle.
pub const ACCURATE_RANGE_HALF_WIDTH: u32 = crate::angle::RESOLUTION / 40;

/// Tunables for one `GridFinder` instance.
///
/// `minimum_start_line_vote_count` and `minimum_line_vote_count` are derived
/// from the canvas size at construction time (`(width + height) / 10`)
/// rather than hardcoded, since they scale with the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderConfig {
    pub hough_max_gap: u32,
    pub max_gap: u32,
    pub max_line_width: u32,
    pub retry_jump_distance: u32,
    pub minimum_start_line_width: u32,
    pub maximum_vertical_start_line_width: u32,
    pub first_line_invalid_horizontal_jump: u32,
    pub accurate_range_half_width: u32,
    pub minimum_start_line_vote_count: u32,
    pub minimum_line_vote_count: u32,

    /// Number of parallel-offset attempts made when searching for the first
    /// two corners, keeping whichever comes out closest to the first
    /// half-line's center. Restored from the original source; `1` (the
    /// default) reproduces a single-try search exactly.
    pub initial_tries: u32,
    /// Multiplier applied to a half-line's own width to grow the search
    /// offset on each successive try.
    pub initial_tries_factor: f32,
}

impl FinderConfig {
    /// Build the default configuration for a canvas of the given size.
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let vote_count = (width + height) / 10;
        Self {
            hough_max_gap: HOUGH_MAX_GAP,
            max_gap: MAX_GAP,
            max_line_width: MAX_LINE_WIDTH,
            retry_jump_distance: RETRY_JUMP_DISTANCE,
            minimum_start_line_width: MINIMUM_START_LINE_WIDTH,
            maximum_vertical_start_line_width: MAXIMUM_VERTICAL_START_LINE_WIDTH,
            first_line_invalid_horizontal_jump: FIRST_LINE_INVALID_HORIZONTAL_JUMP,
            accurate_range_half_width: ACCURATE_RANGE_HALF_WIDTH,
            minimum_start_line_vote_count: vote_count,
            minimum_line_vote_count: vote_count,
            initial_tries: 1,
            initial_tries_factor: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_count_scales_with_canvas() {
        let cfg = FinderConfig::for_canvas(410, 308);
        assert_eq!(cfg.minimum_start_line_vote_count, (410 + 308) / 10);
        assert_eq!(cfg.minimum_line_vote_count, cfg.minimum_start_line_vote_count);
    }

    #[test]
    fn default_initial_tries_matches_spec_single_try() {
        let cfg = FinderConfig::for_canvas(100, 100);
        assert_eq!(cfg.initial_tries, 1);
    }
}
