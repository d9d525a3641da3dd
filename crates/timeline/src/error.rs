//! Wire-format decode errors (thiserror-based).

use thiserror::Error;

/// Errors decoding the persisted cinematic wire format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("unknown interpolation code: {0}")]
    UnknownInterpolation(u8),

    #[error("unknown curve kind code: {0}")]
    UnknownCurveKind(u8),

    #[error("unknown play mode code: {0}")]
    UnknownPlayMode(u8),

    #[error("invalid timeline key: '{0}'")]
    InvalidTimeKey(String),
}
