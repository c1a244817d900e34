//! Center-out enumeration of `[0, length)`.

/// Enumerates the indices of a 1-D range of `length` positions in
/// center-out order: `center, center+1, center-1, center+2, center-2, …`,
/// where `center = (length - 1) / 2`.
///
/// Used both to pick which column to search first (so the first line found
/// is as close to the frame center as possible) and to scan a column's rows
/// from the middle outward.
pub struct CenteredScan {
    length: u32,
    center: u32,
    x: u32,
}

impl CenteredScan {
    pub fn new(length: u32) -> Self {
        let center = (length - 1) / 2;
        CenteredScan {
            length,
            center,
            x: center,
        }
    }

    pub fn center(&self) -> u32 {
        self.center
    }

    pub fn has_next(&self) -> bool {
        self.x < self.length
    }
}

impl Iterator for CenteredScan {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if !self.has_next() {
            return None;
        }
        let result = self.x;
        // Mirrors the C++ original's `x = 2*center - x`, which relies on
        // benign unsigned wraparound when the last index is emitted: the
        // subtraction underflows to u32::MAX, and `has_next` (`x < length`)
        // stops the walk on the following call.
        self.x = (2 * self.center).wrapping_sub(self.x);
        if result <= self.center {
            self.x = self.x.wrapping_add(1);
        }
        Some(result)
    }
}
