use thiserror::Error;

/// Errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The view a style manager was bound to no longer exists.
    #[error("the styled view has been dropped")]
    ViewDropped,

    #[error("image must have a nonzero size")]
    EmptyImage,

    #[error("image has {actual} pixels, expected {expected}")]
    PixelCount { expected: usize, actual: usize },

    #[error("a gradient needs at least two color stops, got {0}")]
    TooFewStops(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
