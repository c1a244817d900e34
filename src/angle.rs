//! Quantized directions used throughout the pipeline.
//!
//! Every inner loop works with a scaled integer `(cos, sin)` pair instead of
//! floating-point trigonometry, so that the rasterizer's error-term
//! arithmetic stays exact. The `(cos, sin)` table for all `RESOLUTION`
//! directions is built once, lazily, the first time it's needed.

use std::sync::LazyLock;

use crate::error::GridFinderError;

/// Number of quantized directions around the full circle.
pub const RESOLUTION: u32 = 360;

/// Scaling factor applied to every `cos`/`sin` value so that rasterizer
/// error-term arithmetic never overflows a signed 32-bit accumulator, even
/// for canvases with on the order of 2e6 pixels along the long side.
pub const SCALE: i32 = i32::MAX / 2;

/// A scaled `(cos, sin)` pair, independent of any particular quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CosSin {
    pub cos: i32,
    pub sin: i32,
}

impl CosSin {
    pub fn cosf(self) -> f32 {
        self.cos as f32 / SCALE as f32
    }

    pub fn sinf(self) -> f32 {
        self.sin as f32 / SCALE as f32
    }

    pub fn cosd(self) -> f64 {
        self.cos as f64 / SCALE as f64
    }

    pub fn sind(self) -> f64 {
        self.sin as f64 / SCALE as f64
    }

    pub fn opposite(self) -> CosSin {
        CosSin {
            cos: -self.cos,
            sin: -self.sin,
        }
    }

    /// `+90°` when `plus90` is true, `-90°` otherwise.
    pub fn perpendicular(self, plus90: bool) -> CosSin {
        if plus90 {
            CosSin {
                cos: -self.sin,
                sin: self.cos,
            }
        } else {
            CosSin {
                cos: self.sin,
                sin: -self.cos,
            }
        }
    }
}

fn build_lut() -> [CosSin; RESOLUTION as usize] {
    let mut lut = [CosSin { cos: 0, sin: 0 }; RESOLUTION as usize];
    let step = 2.0 * std::f64::consts::PI / RESOLUTION as f64;
    for (i, entry) in lut.iter_mut().enumerate() {
        let rad = step * i as f64;
        entry.cos = (rad.cos() * SCALE as f64).round() as i32;
        entry.sin = (rad.sin() * SCALE as f64).round() as i32;
    }
    lut
}

static LUT: LazyLock<[CosSin; RESOLUTION as usize]> = LazyLock::new(build_lut);

/// A direction, represented as an index in `[0, RESOLUTION)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Angle(u32);

impl Angle {
    /// Construct from a raw index, normalizing modulo `RESOLUTION`.
    pub fn from_index(index: u32) -> Self {
        Angle(index % RESOLUTION)
    }

    /// Construct from a raw index, rejecting anything outside
    /// `[0, RESOLUTION)` instead of silently normalizing it. Use this at API
    /// boundaries where an out-of-range index is a caller bug.
    pub fn new(index: u32) -> Result<Self, GridFinderError> {
        if index >= RESOLUTION {
            Err(GridFinderError::AngleOutOfRange(index, RESOLUTION))
        } else {
            Ok(Angle(index))
        }
    }

    /// Construct from a radian value, rounded to the nearest quantized step.
    pub fn from_radians(radians: f64) -> Self {
        let step = 2.0 * std::f64::consts::PI / RESOLUTION as f64;
        let index = (radians / step).round() as i64;
        Angle::from_index(index.rem_euclid(RESOLUTION as i64) as u32)
    }

    pub fn index(self) -> u32 {
        self.0
    }

    pub fn radians(self) -> f64 {
        let step = 2.0 * std::f64::consts::PI / RESOLUTION as f64;
        self.0 as f64 * step
    }

    pub fn cos_sin(self) -> CosSin {
        LUT[self.0 as usize]
    }

    pub fn cos(self) -> i32 {
        self.cos_sin().cos
    }

    pub fn sin(self) -> i32 {
        self.cos_sin().sin
    }

    pub fn opposite(self) -> Angle {
        self + RESOLUTION / 2
    }

    /// `+90°` when `plus90` is true, `-90°` otherwise.
    pub fn perpendicular(self, plus90: bool) -> Angle {
        if plus90 {
            self + RESOLUTION / 4
        } else {
            self + 3 * (RESOLUTION / 4)
        }
    }

    /// The angle midway between `a` and `b` on the shorter arc between them.
    ///
    /// Ties are broken towards `a`: if `a == b`, the result is `a`. If the
    /// two angles are exactly opposite, the midpoint is ambiguous between the
    /// two arcs; the counterclockwise one (`a + RESOLUTION/4`) is returned.
    pub fn average(a: Angle, b: Angle) -> Angle {
        if a == b {
            return a;
        }
        let mut first = a.0;
        let mut last = b.0;
        if (last + RESOLUTION / 2) % RESOLUTION == first {
            // Exactly opposite: the two possible midpoints are a+R/4 and
            // a+3R/4. Prefer the counterclockwise one.
            return a + RESOLUTION / 4;
        }
        if first > last {
            last += RESOLUTION;
        }
        Angle::from_index((first + last) / 2)
    }
}

impl std::ops::Add<u32> for Angle {
    type Output = Angle;

    fn add(self, rhs: u32) -> Angle {
        Angle::from_index(self.0 + rhs)
    }
}
