use alloc::string::String;
use enough::StopReason;

use crate::codec::Codec;

/// Errors from texel decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TexelError {
    #[error("invalid codec tag: {0}")]
    InvalidCodec(u8),

    #[error("invalid intensity alpha mode tag: {0}")]
    InvalidMode(u8),

    #[error("unknown codec or mode name: {0}")]
    UnknownName(String),

    #[error("{codec} palette exhausted: all {capacity} entries in use")]
    PaletteExhausted { codec: Codec, capacity: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for TexelError {
    fn from(r: StopReason) -> Self {
        TexelError::Cancelled(r)
    }
}
