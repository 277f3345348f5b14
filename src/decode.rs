use enough::Stop;

use crate::bitmap::{Bitmap, texel_count};
use crate::codec::{Codec, IntensityAlphaMode};
use crate::color::Color;
use crate::error::TexelError;
use crate::limits::Limits;
use crate::texel;

/// Decode one texel.
///
/// `offset` is the absolute byte offset of the texel in `data` and `select`
/// its nibble (0-1) or bit (0-7) within that byte for packed codecs; it is
/// ignored otherwise. Returns `None` when the texel's bytes run past the end
/// of `data`.
pub fn decode_texel(
    data: &[u8],
    palette: &[u8],
    offset: usize,
    select: usize,
    codec: Codec,
    mode: IntensityAlphaMode,
) -> Option<Color> {
    match codec {
        Codec::Rgba16 => texel::rgba16(data, offset),
        Codec::Rgba32 => texel::rgba32(data, offset),
        Codec::Ia16 => texel::ia16(data, offset),
        Codec::Ia8 => texel::ia8(data, offset),
        Codec::Ia4 => texel::ia4(data, offset, select),
        Codec::I8 => texel::i8(data, offset, mode),
        Codec::I4 => texel::i4(data, offset, select, mode),
        Codec::Ci8 => texel::ci8(data, palette, offset),
        Codec::Ci4 => texel::ci4(data, palette, offset, select),
        Codec::OneBpp => texel::one_bpp(data, offset, select),
    }
}

/// View `width` x `height` texels of `data`, starting at byte `offset`, as a
/// bitmap.
///
/// Never fails on short data: texels whose bytes lie past the end of `data`
/// are left [`Color::TRANSPARENT`], so a window hanging off the end of a file
/// renders partially. The output is allocated up front and panics like
/// [`Bitmap::new`] when `width * height` is unrepresentable;
/// [`DecodeRequest`] reports that as [`TexelError::DimensionsTooLarge`].
pub fn decode_region(
    data: &[u8],
    palette: &[u8],
    offset: usize,
    width: u32,
    height: u32,
    codec: Codec,
    mode: IntensityAlphaMode,
) -> Bitmap {
    let mut bitmap = Bitmap::new(width, height);
    decode_region_into(&mut bitmap, data, palette, offset, codec, mode);
    bitmap
}

/// Like [`decode_region`], but writes into an existing bitmap, taking its
/// dimensions. Skipped texels keep whatever the bitmap held. Returns the number
/// of texels written.
pub fn decode_region_into(
    target: &mut Bitmap,
    data: &[u8],
    palette: &[u8],
    offset: usize,
    codec: Codec,
    mode: IntensityAlphaMode,
) -> usize {
    let src = Source {
        data,
        palette,
        offset,
        codec,
        mode,
    };
    (0..target.height() as usize)
        .map(|row| src.decode_row(target, row))
        .sum()
}

struct Source<'a> {
    data: &'a [u8],
    palette: &'a [u8],
    offset: usize,
    codec: Codec,
    mode: IntensityAlphaMode,
}

impl Source<'_> {
    fn decode_row(&self, target: &mut Bitmap, row: usize) -> usize {
        let width = target.width() as usize;
        let first = row * width;
        let dst = &mut target.pixels_mut()[first..first + width];
        let mut written = 0;
        for (col, px) in dst.iter_mut().enumerate() {
            let loc = self.codec.locate(first + col);
            let Some(byte) = loc.byte.checked_add(self.offset) else {
                continue;
            };
            if let Some(color) = decode_texel(
                self.data,
                self.palette,
                byte,
                loc.select,
                self.codec,
                self.mode,
            ) {
                *px = color;
                written += 1;
            }
        }
        written
    }
}

/// Region decode with resource limits and cooperative cancellation.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    palette: &'a [u8],
    offset: usize,
    mode: IntensityAlphaMode,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            palette: &[],
            offset: 0,
            mode: IntensityAlphaMode::default(),
            limits: None,
        }
    }

    /// Palette buffer (raw RGBA16 pairs) for CI4/CI8.
    pub fn with_palette(mut self, palette: &'a [u8]) -> Self {
        self.palette = palette;
        self
    }

    /// Byte offset of the first texel.
    pub fn at_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_mode(mut self, mode: IntensityAlphaMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode `width` x `height` texels as `codec`.
    ///
    /// Short source data is not an error (see [`decode_region`]); only limits
    /// and cancellation can fail the request.
    pub fn decode(
        self,
        width: u32,
        height: u32,
        codec: Codec,
        stop: impl Stop,
    ) -> Result<Bitmap, TexelError> {
        log::debug!(
            "decode {codec} {width}x{height} at {:#x} ({} source bytes)",
            self.offset,
            self.data.len()
        );
        let out_bytes = texel_count(width, height)
            .and_then(|n| n.checked_mul(size_of::<Color>()))
            .ok_or(TexelError::DimensionsTooLarge { width, height })?;
        if let Some(limits) = self.limits {
            limits.check_dimensions(width, height)?;
            limits.check_memory(out_bytes)?;
        }
        stop.check()?;

        let mut bitmap = Bitmap::new(width, height);
        let src = Source {
            data: self.data,
            palette: self.palette,
            offset: self.offset,
            codec,
            mode: self.mode,
        };
        let mut written = 0;
        for row in 0..height as usize {
            if row % 16 == 0 {
                stop.check()?;
            }
            written += src.decode_row(&mut bitmap, row);
        }

        let skipped = bitmap.pixels().len() - written;
        if skipped > 0 {
            log::trace!("{skipped} texels past end of source data left blank");
        }
        Ok(bitmap)
    }
}
