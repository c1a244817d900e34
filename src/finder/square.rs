//! The top-level entry point: assembling a `Square` from a `Mask`.

use crate::config::FinderConfig;
use crate::finder::firstline::{find_first_line, get_first_two_half_lines, HalfLine};
use crate::finder::geometry::{Line, Point};
use crate::finder::mask::Mask;
use crate::finder::nextline::{find_next_line, LineResult};

/// One grid cell: up to five located lines and up to four corners, in the
/// slot order below — `lines[0]`/`lines[1]` are the
/// two half-lines of the first detected line, `lines[2]`/`lines[3]` its
/// perpendicular neighbors, `lines[4]` closes the square. `points[0] =
/// lines[0]∩lines[2]`, `points[1] = lines[1]∩lines[3]`, `points[2] =
/// lines[2]∩lines[4]`, `points[3] = lines[3]∩lines[4]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Square {
    pub lines: [Option<LineResult>; 5],
    pub points: [Option<Point>; 4],
}

/// Owns the mask for the duration of the search and exposes `find_square`,
/// the library's single public entry point.
pub struct GridFinder {
    mask: Mask,
    config: FinderConfig,
}

impl GridFinder {
    pub fn new(mask: Mask) -> Self {
        let config = FinderConfig::for_canvas(mask.width, mask.height);
        GridFinder { mask, config }
    }

    pub fn with_config(mask: Mask, config: FinderConfig) -> Self {
        GridFinder { mask, config }
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    fn half_line_as_line(h: &HalfLine) -> Line {
        Line::through(h.center, h.angle.cos_sin())
    }

    fn line_result_as_line(l: &LineResult) -> Line {
        Line::through(l.center, l.angle.cos_sin())
    }

    /// Find the grid cell closest to the frame center, or an empty `Square`
    /// if the scene is untrackable. Always returns — any internal
    /// "no-result" outcome just leaves the corresponding slots empty.
    pub fn find_square(&self) -> Square {
        let mut sq = Square::default();

        let Some(estimate) = find_first_line(&self.mask, &self.config) else {
            return sq;
        };
        let (half_a, half_b) = get_first_two_half_lines(&self.mask, &self.config, estimate);
        sq.lines[0] = Some(LineResult {
            center: half_a.center,
            width: half_a.width,
            angle: half_a.angle,
        });
        sq.lines[1] = Some(LineResult {
            center: half_b.center,
            width: half_b.width,
            angle: half_b.angle,
        });

        let line0 = Self::half_line_as_line(&half_a);
        let center = self.mask.center();
        let direction = line0.left_of_point(Point::new(center.x as f64, center.y as f64));

        let mut first_corner: Option<(f64, Point)> = None;
        let mut second_corner: Option<(f64, Point)> = None;
        let initial_point = Point::new(half_a.center.x as f64, half_a.center.y as f64);

        for _ in 0..self.config.initial_tries.max(1) {
            // Matches the original's zero-initialized-slot read on the first
            // iteration: before a line is found, the jump is 0, so the
            // first probe starts at exactly `2 * half_line.width`.
            let jump1 = (self.config.initial_tries_factor * sq.lines[2].map(|l| l.width).unwrap_or(0) as f32)
                .round() as u32;
            let jump2 = (self.config.initial_tries_factor * sq.lines[3].map(|l| l.width).unwrap_or(0) as f32)
                .round() as u32;

            let candidate2 = find_next_line(&self.mask, &self.config, sq.lines[0].unwrap(), direction, 0, jump1);
            let candidate3 = find_next_line(&self.mask, &self.config, sq.lines[1].unwrap(), !direction, 0, jump2);

            if let Some(l2) = candidate2 {
                let line2 = Self::line_result_as_line(&l2);
                if let Some(p) = line0.intersect(&line2) {
                    let dist = dist_sq(initial_point, p);
                    let better = match first_corner {
                        Some((best, _)) => dist < best,
                        None => true,
                    };
                    if better {
                        first_corner = Some((dist, p));
                        sq.lines[2] = Some(l2);
                        sq.points[0] = Some(p);
                    }
                }
            }

            if let Some(l3) = candidate3 {
                let line1 = Self::line_result_as_line(&sq.lines[1].unwrap());
                let line3 = Self::line_result_as_line(&l3);
                if let Some(p) = line1.intersect(&line3) {
                    let dist = dist_sq(initial_point, p);
                    let better = match second_corner {
                        Some((best, _)) => dist < best,
                        None => true,
                    };
                    if better {
                        second_corner = Some((dist, p));
                        sq.lines[3] = Some(l3);
                        sq.points[1] = Some(p);
                    }
                }
            }
        }

        if let (Some((_, p0)), Some((_, p1))) = (first_corner, second_corner) {
            let mut min_distance = ((p0.x - p1.x).abs().max((p0.y - p1.y).abs())).floor() as u32;
            min_distance -= min_distance / 4;
            let max_offset = min_distance / 2;
            let offset_incr = sq.lines[2].unwrap().width.max(sq.lines[3].unwrap().width).max(1);

            let mut offset = 0u32;
            while sq.lines[4].is_none() && offset < max_offset {
                sq.lines[4] = find_next_line(&self.mask, &self.config, sq.lines[2].unwrap(), direction, min_distance, offset);
                if sq.lines[4].is_none() {
                    sq.lines[4] = find_next_line(&self.mask, &self.config, sq.lines[3].unwrap(), !direction, min_distance, offset);
                }
                offset += offset_incr;
            }

            if let Some(l4) = sq.lines[4] {
                let line2 = Self::line_result_as_line(&sq.lines[2].unwrap());
                let line3 = Self::line_result_as_line(&sq.lines[3].unwrap());
                let line4 = Self::line_result_as_line(&l4);
                sq.points[2] = line2.intersect(&line4);
                sq.points[3] = line3.intersect(&line4);
            }
        }

        sq
    }
}

fn dist_sq(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}
