use thiserror::Error;

/// Errors reported at the boundary of the public API.
///
/// Numerical degeneracies inside the color model are never errors;
/// they are coerced to `0.0` where they occur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("a palette needs at least one color")]
    EmptyPalette,

    #[error("quality factor must be at least 1")]
    ZeroQuality,

    #[error("a Lab color has 3 components, got {len}")]
    ColorLength { len: usize },

    #[error("unknown distance type “{0}”")]
    UnknownDistance(String),

    #[error("unknown optimization strategy “{0}”")]
    UnknownStrategy(String),

    #[error("unknown color vision deficiency “{0}”")]
    UnknownConfusion(String),
}
