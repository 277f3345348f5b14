//! Codec tags and format metadata.

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

use crate::error::TexelError;

/// N64 texel layout.
///
/// The discriminants are the stable numeric tags accepted by
/// [`Codec::try_from`]; anything outside `0..=9` is [`TexelError::InvalidCodec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Codec {
    /// 5/5/5/1 RGBA, two bytes per texel.
    Rgba16 = 0,
    /// 8/8/8/8 RGBA, four bytes per texel.
    Rgba32 = 1,
    /// 8-bit intensity + 8-bit alpha.
    Ia16 = 2,
    /// 4-bit intensity + 4-bit alpha.
    Ia8 = 3,
    /// 3-bit intensity + 1-bit alpha, two texels per byte.
    Ia4 = 4,
    /// 8-bit intensity.
    I8 = 5,
    /// 4-bit intensity, two texels per byte.
    I4 = 6,
    /// 8-bit index into a 256-entry RGBA16 palette.
    Ci8 = 7,
    /// 4-bit index into a 16-entry RGBA16 palette, two texels per byte.
    Ci4 = 8,
    /// 1-bit monochrome, eight texels per byte.
    OneBpp = 9,
}

/// How texels map onto storage bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Packing {
    /// Each texel occupies this many whole bytes.
    Bytes(usize),
    /// This many texels share one byte, most significant bits first.
    PerByte(usize),
}

/// Where a texel lives inside a buffer: a byte offset plus, for packed
/// codecs, which nibble (0 = high, 1 = low) or bit (0 = bit 7) of that byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TexelLocation {
    pub byte: usize,
    pub select: usize,
}

impl Codec {
    /// Every codec, in the order a format picker lists them.
    pub const ALL: [Codec; 10] = [
        Codec::Rgba16,
        Codec::Rgba32,
        Codec::Ia16,
        Codec::Ia8,
        Codec::Ia4,
        Codec::I8,
        Codec::I4,
        Codec::Ci8,
        Codec::Ci4,
        Codec::OneBpp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Codec::Rgba16 => "RGBA16",
            Codec::Rgba32 => "RGBA32",
            Codec::Ia16 => "IA16",
            Codec::Ia8 => "IA8",
            Codec::Ia4 => "IA4",
            Codec::I8 => "I8",
            Codec::I4 => "I4",
            Codec::Ci8 => "CI8",
            Codec::Ci4 => "CI4",
            Codec::OneBpp => "1BPP",
        }
    }

    pub fn packing(self) -> Packing {
        match self {
            Codec::Rgba32 => Packing::Bytes(4),
            Codec::Rgba16 | Codec::Ia16 => Packing::Bytes(2),
            Codec::Ia8 | Codec::I8 | Codec::Ci8 => Packing::Bytes(1),
            Codec::Ia4 | Codec::I4 | Codec::Ci4 => Packing::PerByte(2),
            Codec::OneBpp => Packing::PerByte(8),
        }
    }

    pub fn bits_per_texel(self) -> usize {
        match self.packing() {
            Packing::Bytes(n) => n * 8,
            Packing::PerByte(n) => 8 / n,
        }
    }

    /// Whether decoding needs a palette buffer.
    pub fn needs_palette(self) -> bool {
        self.palette_entries().is_some()
    }

    /// Palette capacity for indexed codecs.
    pub fn palette_entries(self) -> Option<usize> {
        match self {
            Codec::Ci8 => Some(256),
            Codec::Ci4 => Some(16),
            _ => None,
        }
    }

    /// Bytes that must be present at a texel's byte offset to decode it.
    pub fn texel_span(self) -> usize {
        match self.packing() {
            Packing::Bytes(n) => n,
            Packing::PerByte(_) => 1,
        }
    }

    /// Storage bytes needed for `pixels` texels. Packed codecs round up, so a
    /// trailing partial byte is still allocated.
    pub fn pixels_to_bytes(self, pixels: usize) -> usize {
        match self.packing() {
            Packing::Bytes(n) => pixels * n,
            Packing::PerByte(n) => pixels.div_ceil(n),
        }
    }

    /// Location of the texel with linear index `index` (`row * width + col`),
    /// relative to the start of the texture data.
    pub fn locate(self, index: usize) -> TexelLocation {
        match self.packing() {
            Packing::Bytes(n) => TexelLocation {
                byte: index * n,
                select: 0,
            },
            Packing::PerByte(n) => TexelLocation {
                byte: index / n,
                select: index % n,
            },
        }
    }
}

impl TryFrom<u8> for Codec {
    type Error = TexelError;

    fn try_from(tag: u8) -> Result<Self, TexelError> {
        Codec::ALL
            .get(usize::from(tag))
            .copied()
            .ok_or(TexelError::InvalidCodec(tag))
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Codec {
    type Err = TexelError;

    fn from_str(s: &str) -> Result<Self, TexelError> {
        if s.eq_ignore_ascii_case("ONEBPP") {
            return Ok(Codec::OneBpp);
        }
        Codec::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TexelError::UnknownName(s.to_string()))
    }
}

/// How I8/I4 decode derives alpha from a texel's intensity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IntensityAlphaMode {
    /// Alpha equals intensity.
    #[default]
    CopyIntensity = 0,
    /// Alpha is 0 for zero intensity, 255 otherwise.
    Binary = 1,
    /// Always opaque.
    Full = 2,
}

impl IntensityAlphaMode {
    pub const ALL: [IntensityAlphaMode; 3] = [
        IntensityAlphaMode::CopyIntensity,
        IntensityAlphaMode::Binary,
        IntensityAlphaMode::Full,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IntensityAlphaMode::CopyIntensity => "Intensity",
            IntensityAlphaMode::Binary => "Binary",
            IntensityAlphaMode::Full => "Full",
        }
    }

    /// Alpha for an 8-bit intensity.
    #[inline]
    pub fn alpha(self, intensity: u8) -> u8 {
        match self {
            IntensityAlphaMode::CopyIntensity => intensity,
            IntensityAlphaMode::Binary if intensity == 0 => 0,
            IntensityAlphaMode::Binary | IntensityAlphaMode::Full => 0xff,
        }
    }
}

impl TryFrom<u8> for IntensityAlphaMode {
    type Error = TexelError;

    fn try_from(tag: u8) -> Result<Self, TexelError> {
        IntensityAlphaMode::ALL
            .get(usize::from(tag))
            .copied()
            .ok_or(TexelError::InvalidMode(tag))
    }
}

impl fmt::Display for IntensityAlphaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntensityAlphaMode {
    type Err = TexelError;

    fn from_str(s: &str) -> Result<Self, TexelError> {
        IntensityAlphaMode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TexelError::UnknownName(s.to_string()))
    }
}
