//! Integer-arithmetic detection of a painted grid square in a binary mask.
//!
//! The entry point is [`GridFinder::find_square`], which takes ownership of
//! a [`Mask`] and reports up to five [`LineResult`]s and four [`Point`]
//! corners describing the grid cell closest to the frame center. Every
//! lower layer — the [`angle`] LUT, the Bresenham [`finder::raster`], the
//! [`finder::hough`] scorer, and the width/line searches built on top of
//! them — works entirely in scaled integer arithmetic; floats only appear
//! at the very end, in the homogeneous-coordinate line intersection that
//! produces corner points.

pub mod angle;
pub mod config;
pub mod error;
pub mod finder;
pub mod pixel;

pub use angle::Angle;
pub use config::FinderConfig;
pub use error::GridFinderError;
pub use finder::{GridFinder, Line, LineResult, Mask, Point, Square};
pub use pixel::Pixel;
