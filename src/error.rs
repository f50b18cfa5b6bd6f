//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Provides semantic variants for argument validation; both operations validate
//! fully at entry and perform no partial computation on failure.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Image batch must have rank {expected}, got rank {got}")]
    BadImageRank { expected: &'static str, got: usize },

    #[error("Boxes must have shape (n, 4, 2), got: {got:?}")]
    BadBoxShape { got: Vec<usize> },

    #[error("Box count {boxes} incompatible with batch size {batch}: must be 1 or equal")]
    BoxCountMismatch { boxes: usize, batch: usize },

    #[error("Output size must be greater than 0, got: {height}x{width}")]
    ZeroSize { height: usize, width: usize },

    #[error("Image spatial dimensions must be non-empty, got: {height}x{width}")]
    EmptySource { height: usize, width: usize },

    #[error("Crop size {target_h}x{target_w} exceeds source size {source_h}x{source_w}")]
    CropTooLarge {
        target_h: usize,
        target_w: usize,
        source_h: usize,
        source_w: usize,
    },

    #[error("Size scalar must be a positive integer, got: {value}")]
    BadSizeScalar { value: f64 },

    #[error("Gradient shape {got:?} does not match output shape {expected:?}")]
    BadGradientShape { expected: Vec<usize>, got: Vec<usize> },

    #[error("Malformed plan: {reason} at step {step}")]
    MalformedPlan {
        step: &'static str,
        reason: &'static str,
    },

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }
}
