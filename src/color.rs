use alloc::format;
use alloc::string::{String, ToString};

use crate::error::TexelError;

/// One decoded texel: four independent 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_argb(0, 0, 0, 0);
    pub const BLACK: Color = Color::from_argb(0xff, 0, 0, 0);
    pub const WHITE: Color = Color::from_argb(0xff, 0xff, 0xff, 0xff);

    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Gray texel: `intensity` on all three color channels.
    #[inline]
    pub const fn gray(intensity: u8, a: u8) -> Self {
        Self::from_argb(a, intensity, intensity, intensity)
    }

    /// Unpack `0xAARRGGBB`.
    pub const fn from_argb_u32(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_argb(a, r, g, b)
    }

    /// Pack as `0xAARRGGBB`.
    pub const fn to_argb_u32(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    /// Parse `#rrggbb` (the `#` is optional). Alpha is always 255.
    pub fn from_hex(hex: &str) -> Result<Self, TexelError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(TexelError::InvalidHexColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| TexelError::InvalidHexColor(hex.to_string()))
        };
        Ok(Self::from_argb(0xff, channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`; alpha is dropped.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Source-over composite onto `background`. The result is opaque.
    pub fn over(self, background: Color) -> Color {
        let a = u16::from(self.a);
        let blend = |fg: u8, bg: u8| -> u8 {
            ((u16::from(fg) * a + u16::from(bg) * (255 - a) + 127) / 255) as u8
        };
        Color::from_argb(
            0xff,
            blend(self.r, background.r),
            blend(self.g, background.g),
            blend(self.b, background.b),
        )
    }

    /// Mean of the color channels, truncated.
    #[inline]
    pub fn intensity(self) -> u8 {
        ((u16::from(self.r) + u16::from(self.g) + u16::from(self.b)) / 3) as u8
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGBA8> for Color {
    fn from(px: rgb::RGBA8) -> Self {
        Color::from_argb(px.a, px.r, px.g, px.b)
    }
}

#[cfg(feature = "rgb")]
impl From<Color> for rgb::RGBA8 {
    fn from(c: Color) -> Self {
        rgb::RGBA8::new(c.r, c.g, c.b, c.a)
    }
}
