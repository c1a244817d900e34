//! The binary pixel mask the whole pipeline searches.

use crate::angle::CosSin;
use crate::error::GridFinderError;
use crate::finder::raster::Ray;
use crate::pixel::Pixel;

/// A W×H mask of on/off pixels, owned by the finder for the lifetime of the
/// search. Any nonzero byte counts as "on"; the drawing helpers below
/// (used only by tests) write `0xFF`.
#[derive(Debug, Clone)]
pub struct Mask {
    pub width: u32,
    pub height: u32,
    buf: Vec<u8>,
}

impl Mask {
    /// A mask of all-off pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Mask {
            width,
            height,
            buf: vec![0u8; (width as usize) * (height as usize)],
        }
    }

    /// Build a mask from existing row-major byte data.
    pub fn from_buf(width: u32, height: u32, buf: Vec<u8>) -> Self {
        assert_eq!(buf.len(), (width as usize) * (height as usize));
        Mask { width, height, buf }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.buf[(y * self.width + x) as usize] != 0
    }

    #[inline]
    pub fn get_pixel(&self, p: Pixel) -> bool {
        self.get(p.x, p.y)
    }

    /// Like `get_pixel`, but for pixels that may come from outside the
    /// library (rather than from internal code that only ever passes
    /// in-canvas pixels): rejects an out-of-range coordinate instead of
    /// panicking on the underlying buffer index.
    pub fn checked_get_pixel(&self, p: Pixel) -> Result<bool, GridFinderError> {
        if !p.in_range(self.width, self.height) {
            return Err(GridFinderError::PixelOutOfRange {
                x: p.x,
                y: p.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.get_pixel(p))
    }

    #[inline]
    pub fn set(&mut self, p: Pixel) {
        self.buf[(p.y * self.width + p.x) as usize] = 0xFF;
    }

    pub fn center(&self) -> Pixel {
        Pixel::new((self.width - 1) / 2, (self.height - 1) / 2)
    }

    /// Move `distance` pixels from `start` along `direction`, following the
    /// rasterizer. Stops early (returning the last in-canvas pixel reached)
    /// if the move runs off the edge of the frame.
    pub fn move_pixel(&self, start: Pixel, direction: CosSin, distance: u32) -> Pixel {
        let mut path = Ray::new(start, direction, self.width, self.height);
        let mut end = start;
        while path.has_next() && path.current_length() <= distance {
            end = path.next();
        }
        end
    }

    /// Draw a line onto the mask, starting at `start` going in `direction`,
    /// for testing. Returns the number of pixels drawn.
    pub fn draw_line(&mut self, start: Pixel, direction: CosSin) -> u32 {
        let mut ray = Ray::new(start, direction, self.width, self.height);
        while ray.has_next() {
            let p = ray.next();
            self.set(p);
        }
        ray.current_length()
    }

    /// Draw a line segment of the given pixel length, for testing.
    pub fn draw_segment(&mut self, start: Pixel, direction: CosSin, length: u32) {
        let mut ray = Ray::new(start, direction, self.width, self.height);
        for _ in 0..length {
            if !ray.has_next() {
                break;
            }
            let p = ray.next();
            self.set(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Angle;

    #[test]
    fn new_mask_is_all_off() {
        let m = Mask::new(5, 5);
        for y in 0..5 {
            for x in 0..5 {
                assert!(!m.get(x, y));
            }
        }
    }

    #[test]
    fn set_turns_a_pixel_on() {
        let mut m = Mask::new(4, 4);
        m.set(Pixel::new(2, 3));
        assert!(m.get(2, 3));
        assert!(!m.get(0, 0));
    }

    #[test]
    fn center_of_odd_and_even_canvases() {
        assert_eq!(Mask::new(7, 9).center(), Pixel::new(3, 4));
        assert_eq!(Mask::new(6, 8).center(), Pixel::new(2, 3));
    }

    #[test]
    fn draw_line_marks_every_pixel_on_the_ray() {
        let mut m = Mask::new(10, 10);
        let dir = Angle::from_index(0).cos_sin();
        let n = m.draw_line(Pixel::new(0, 5), dir);
        assert_eq!(n, 10);
        for x in 0..10 {
            assert!(m.get(x, 5));
        }
    }

    #[test]
    fn move_pixel_stops_at_canvas_edge() {
        let m = Mask::new(5, 5);
        let dir = Angle::from_index(0).cos_sin();
        let end = m.move_pixel(Pixel::new(3, 2), dir, 10);
        assert_eq!(end, Pixel::new(4, 2));
    }

    #[test]
    fn checked_get_pixel_rejects_out_of_range() {
        let m = Mask::new(5, 5);
        assert!(m.checked_get_pixel(Pixel::new(4, 4)).is_ok());
        assert!(matches!(
            m.checked_get_pixel(Pixel::new(5, 0)),
            Err(crate::error::GridFinderError::PixelOutOfRange { .. })
        ));
    }
}
