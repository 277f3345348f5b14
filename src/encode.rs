use alloc::vec;
use alloc::vec::Vec;
use enough::Stop;

use crate::bitmap::Bitmap;
use crate::codec::{Codec, TexelLocation};
use crate::color::Color;
use crate::error::TexelError;
use crate::limits::Limits;
use crate::palette::{Palette, PaletteOverflow};
use crate::scale::{alpha_bit, rgba16_bytes, scale_8_3, scale_8_4};

/// Packed texels produced by an encode, plus the palette built for CI4/CI8.
#[derive(Clone, Debug)]
pub struct EncodeOutput {
    codec: Codec,
    data: Vec<u8>,
    palette: Option<Palette>,
    overflowed: usize,
}

impl EncodeOutput {
    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Texel bytes, sized by [`Codec::pixels_to_bytes`].
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The palette built during a CI4/CI8 encode; `None` for other codecs.
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Palette buffer of 16 (CI4) or 256 (CI8) raw pairs, zero-padded.
    pub fn palette_bytes(&self) -> Option<Vec<u8>> {
        self.palette.as_ref().map(Palette::to_bytes)
    }

    /// Number of texels that needed a new palette entry after the palette was
    /// full and were resolved by the [`PaletteOverflow`] policy instead.
    pub fn overflowed(&self) -> usize {
        self.overflowed
    }
}

/// Encode a bitmap with a fresh palette and [`PaletteOverflow::FirstEntry`].
///
/// Never fails; indexed codecs degrade lossily once the palette is full (see
/// [`EncodeOutput::overflowed`]).
pub fn encode(bitmap: &Bitmap, codec: Codec) -> EncodeOutput {
    let mut enc = Packer::new(codec, bitmap, None, PaletteOverflow::FirstEntry);
    for row in 0..bitmap.height() as usize {
        enc.pack_row(bitmap, row);
    }
    enc.finish()
}

/// Bitmap encode with palette options, resource limits and cooperative
/// cancellation.
#[derive(Clone, Debug)]
pub struct EncodeRequest<'a> {
    codec: Codec,
    overflow: PaletteOverflow,
    seed: Option<&'a Palette>,
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    pub fn new(codec: Codec) -> Self {
        Self {
            codec,
            overflow: PaletteOverflow::default(),
            seed: None,
            limits: None,
        }
    }

    pub fn with_overflow(mut self, overflow: PaletteOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Start CI4/CI8 encodes from these entries instead of an empty palette.
    /// Entries beyond the codec's capacity are dropped. Ignored for
    /// direct-color codecs.
    pub fn with_seed_palette(mut self, palette: &'a Palette) -> Self {
        self.seed = Some(palette);
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn encode(self, bitmap: &Bitmap, stop: impl Stop) -> Result<EncodeOutput, TexelError> {
        let (width, height) = (bitmap.width(), bitmap.height());
        log::debug!("encode {width}x{height} as {}", self.codec);
        if let Some(limits) = self.limits {
            limits.check_dimensions(width, height)?;
            let texel_bytes = self.codec.pixels_to_bytes(bitmap.pixels().len());
            let palette_bytes = self.codec.palette_entries().unwrap_or(0) * 2;
            limits.check_memory(texel_bytes + palette_bytes)?;
        }
        stop.check()?;

        let mut enc = Packer::new(self.codec, bitmap, self.seed, self.overflow);
        for row in 0..height as usize {
            if row % 16 == 0 {
                stop.check()?;
            }
            enc.pack_row(bitmap, row);
            if self.overflow == PaletteOverflow::Fail && enc.overflowed > 0 {
                return Err(TexelError::PaletteExhausted {
                    codec: self.codec,
                    capacity: self.codec.palette_entries().unwrap_or(0),
                });
            }
        }
        Ok(enc.finish())
    }
}

struct Packer {
    codec: Codec,
    out: Vec<u8>,
    palette: Option<Palette>,
    overflow: PaletteOverflow,
    overflowed: usize,
}

impl Packer {
    fn new(
        codec: Codec,
        bitmap: &Bitmap,
        seed: Option<&Palette>,
        overflow: PaletteOverflow,
    ) -> Self {
        let palette = codec.palette_entries().map(|cap| match seed {
            Some(seed) => seed.resized(cap),
            None => Palette::new(cap),
        });
        Self {
            codec,
            out: vec![0; codec.pixels_to_bytes(bitmap.pixels().len())],
            palette,
            overflow,
            overflowed: 0,
        }
    }

    fn pack_row(&mut self, bitmap: &Bitmap, row: usize) {
        let width = bitmap.width() as usize;
        let first = row * width;
        for (col, &color) in bitmap.pixels()[first..first + width].iter().enumerate() {
            self.put(first + col, color);
        }
    }

    fn put(&mut self, index: usize, c: Color) {
        let loc = self.codec.locate(index);
        let at = loc.byte;
        match self.codec {
            Codec::Rgba16 => self.out[at..at + 2].copy_from_slice(&rgba16_bytes(c)),
            Codec::Rgba32 => self.out[at..at + 4].copy_from_slice(&[c.r, c.g, c.b, c.a]),
            Codec::Ia16 => self.out[at..at + 2].copy_from_slice(&[c.intensity(), c.a]),
            Codec::Ia8 => self.out[at] = (scale_8_4(c.intensity()) << 4) | scale_8_4(c.a),
            Codec::Ia4 => {
                let v = (scale_8_3(c.intensity()) << 1) | alpha_bit(c.a);
                self.set_nibble(loc, v);
            }
            Codec::I8 => self.out[at] = c.intensity(),
            Codec::I4 => self.set_nibble(loc, scale_8_4(c.intensity())),
            Codec::Ci8 => {
                let v = self.palette_index(c);
                self.out[at] = v;
            }
            Codec::Ci4 => {
                let v = self.palette_index(c);
                self.set_nibble(loc, v);
            }
            Codec::OneBpp => {
                let on = u16::from(c.r) + u16::from(c.g) + u16::from(c.b) > 0;
                let mask: u8 = 0x80 >> loc.select;
                if on {
                    self.out[at] |= mask;
                } else {
                    self.out[at] &= !mask;
                }
            }
        }
    }

    fn set_nibble(&mut self, loc: TexelLocation, value: u8) {
        let shift = (1 - loc.select) * 4;
        let byte = &mut self.out[loc.byte];
        *byte = (*byte & !(0x0f << shift)) | ((value & 0x0f) << shift);
    }

    fn palette_index(&mut self, c: Color) -> u8 {
        let Some(palette) = self.palette.as_mut() else {
            return 0;
        };
        let raw = rgba16_bytes(c);
        if let Some(index) = palette.insert(raw) {
            return index;
        }
        self.overflowed += 1;
        match self.overflow {
            PaletteOverflow::Nearest => palette.nearest(raw).unwrap_or(0),
            PaletteOverflow::FirstEntry | PaletteOverflow::Fail => 0,
        }
    }

    fn finish(self) -> EncodeOutput {
        if self.overflowed > 0 {
            log::warn!(
                "{} palette full: {} texels resolved by {:?}",
                self.codec,
                self.overflowed,
                self.overflow
            );
        }
        EncodeOutput {
            codec: self.codec,
            data: self.out,
            palette: self.palette,
            overflowed: self.overflowed,
        }
    }
}
