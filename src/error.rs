use thiserror::Error;

/// Domain-violation failures: a caller handed the library a coordinate or
/// index that cannot be made to make sense.
///
/// This is distinct from the "no result" outcomes used throughout the
/// pipeline (`Option`s returned by `get_middle`, `find_next_line`, and
/// friends) — those are normal control flow, not errors. See
/// `GridFinder::find_square`, which never returns this type: it catches the
/// no-result case internally and reports an empty `Square` instead.
#[derive(Debug, Error)]
pub enum GridFinderError {
    #[error("pixel ({x}, {y}) is outside the {width}x{height} canvas")]
    PixelOutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("angle index {0} is outside [0, {1})")]
    AngleOutOfRange(u32, u32),
}
