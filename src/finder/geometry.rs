//! Homogeneous-coordinate lines, points, and their intersection.

use crate::angle::CosSin;
use crate::pixel::Pixel;

/// A point in canvas coordinates, as a float pair — not necessarily inside
/// the canvas, since perspective can place a corner outside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A line in homogeneous coordinates `(a, b, c)`, satisfying `a*x + b*y + c
/// = 0` for every point on the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    /// Build the line through `p` in direction `direction`. Coefficients are
    /// `(sin, -cos, -sin*x + cos*y)`.
    pub fn through(p: Pixel, direction: CosSin) -> Self {
        let sin = direction.sind();
        let cos = direction.cosd();
        let x = p.x as f64;
        let y = p.y as f64;
        Line {
            a: sin,
            b: -cos,
            c: -sin * x + cos * y,
        }
    }

    /// `a*qx + b*qy + c >= 0`.
    pub fn right_of_point(&self, q: Point) -> bool {
        self.a * q.x + self.b * q.y + self.c >= 0.0
    }

    /// `a*qx + b*qy + c <= 0`.
    pub fn left_of_point(&self, q: Point) -> bool {
        self.a * q.x + self.b * q.y + self.c <= 0.0
    }

    /// Intersect two lines via the cross product of their homogeneous
    /// coefficients. Returns `None` for parallel (or near-parallel) lines,
    /// where the cross product's homogeneous weight is (near) zero.
    pub fn intersect(&self, other: &Line) -> Option<Point> {
        let u = self.b * other.c - self.c * other.b;
        let v = self.c * other.a - self.a * other.c;
        let w = self.a * other.b - self.b * other.a;
        if w.abs() < 1e-9 {
            return None;
        }
        Some(Point::new(u / w, v / w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Angle;

    #[test]
    fn horizontal_and_vertical_lines_intersect_at_expected_point() {
        let horizontal = Line::through(Pixel::new(0, 5), Angle::from_index(0).cos_sin());
        let vertical = Line::through(Pixel::new(3, 0), Angle::from_index(90).cos_sin());
        let p = horizontal.intersect(&vertical).expect("should intersect");
        assert!((p.x - 3.0).abs() < 1e-6);
        assert!((p.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let a = Line::through(Pixel::new(0, 0), Angle::from_index(0).cos_sin());
        let b = Line::through(Pixel::new(0, 10), Angle::from_index(0).cos_sin());
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn left_and_right_of_point_are_complementary_off_the_line() {
        let line = Line::through(Pixel::new(0, 5), Angle::from_index(0).cos_sin());
        let above = Point::new(10.0, 0.0);
        let below = Point::new(10.0, 10.0);
        assert!(line.right_of_point(above) != line.right_of_point(below));
        assert!(line.left_of_point(above) != line.left_of_point(below));
    }
}
