use thiserror::Error;

/// Errors raised at the edges of the engine: reading axis descriptors and
/// applying model updates. Geometry, camera and projection code is total and
/// never produces one of these.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("line {line}: {reason}")]
    AxisSyntax { line: usize, reason: String },

    #[error("line {line}: axis `{name}` has min {min} greater than max {max}")]
    AxisRange {
        line: usize,
        name: String,
        min: f32,
        max: f32,
    },

    #[error("axis index {index} is out of range for {len} axes")]
    AxisIndex { index: usize, len: usize },

    #[error("axis {index} was given a non-finite number")]
    AxisValue { index: usize },

    #[error("orbit input must be finite")]
    OrbitInput,
}

/// Convenience type alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
