use alloc::format;

use crate::TexelError;

/// Resource caps applied by [`crate::DecodeRequest`] and [`crate::EncodeRequest`].
///
/// Every field defaults to `None` (unbounded). Region decode is tolerant of short
/// source buffers, so these are the only way to bound the work a caller-chosen
/// `width`/`height` can trigger.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum texel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the allocation a request makes for its output.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Limits that reject anything wider or taller than `side` texels.
    pub fn square(side: u64) -> Self {
        Self {
            max_width: Some(side),
            max_height: Some(side),
            ..Self::default()
        }
    }

    pub(crate) fn check_dimensions(&self, width: u32, height: u32) -> Result<(), TexelError> {
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds(
            "texel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )
    }

    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), TexelError> {
        exceeds("allocation", bytes as u64, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), TexelError> {
    match limit {
        Some(max) if value > max => Err(TexelError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
